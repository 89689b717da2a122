pub mod app;
pub mod search;
pub mod table;

use crate::view::DogView;

/// Entry point: launch the native GUI window
pub fn run(view: DogView) -> crate::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title(crate::TITLE)
            .with_inner_size([900.0, 800.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "DogTable",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::DogTableApp::new(cc, view)))),
    )
    .map_err(|e| crate::DogTableError::Ui(format!("GUI error: {}", e)))
}
