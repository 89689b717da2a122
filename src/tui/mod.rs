pub mod app;
pub mod search;
pub mod table;
pub mod ui;

use crate::view::DogView;

/// Entry point: take over the terminal and run the interactive table
pub fn run(view: DogView) -> crate::Result<()> {
    let mut terminal = ratatui::init();
    let mut app = app::App::new(view);
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
