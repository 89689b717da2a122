use crate::view::DogRow;
use eframe::egui;
use egui_extras::{Column, TableBuilder};

/// Height of every data row; images are scaled to fit
pub const ROW_HEIGHT: f32 = 110.0;

/// Displayed image height
pub const IMAGE_HEIGHT: f32 = 100.0;

/// What the user asked for on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    CopyUrl(String),
    OpenUrl(String),
}

/// Table display state.
#[derive(Default)]
pub struct TableState {
    /// Selected record, by position in the full record list
    pub selected: Option<usize>,
}

impl TableState {
    pub fn toggle(&mut self, index: usize) {
        self.selected = if self.selected == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Forget a selection the current filter hides.
    pub fn retain_visible(&mut self, rows: &[DogRow<'_>]) {
        if let Some(selected) = self.selected {
            if !rows.iter().any(|r| r.index == selected) {
                self.selected = None;
            }
        }
    }
}

/// Render the breed/image table. Every row is laid out, so every image is requested.
pub fn show(ui: &mut egui::Ui, rows: &[DogRow<'_>], state: &mut TableState) -> Option<RowAction> {
    let available_height = ui.available_height();
    let [breed_header, image_header] = crate::COLUMN_HEADERS;

    let mut action = None;
    let mut clicked = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::remainder().at_least(120.0).clip(true))
        .column(Column::auto().at_least(IMAGE_HEIGHT))
        .min_scrolled_height(0.0)
        .max_scroll_height(available_height)
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong(breed_header);
            });
            header.col(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.strong(image_header);
                });
            });
        })
        .body(|mut body| {
            for row in rows {
                let is_selected = state.selected == Some(row.index);
                body.row(ROW_HEIGHT, |mut table_row| {
                    table_row.set_selected(is_selected);

                    table_row.col(|ui| {
                        if ui.selectable_label(is_selected, row.breed).clicked() {
                            clicked = Some(row.index);
                        }
                    });
                    table_row.col(|ui| {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let response = ui.add(
                                egui::Image::new(row.image_url)
                                    .alt_text(row.alt)
                                    .max_height(IMAGE_HEIGHT)
                                    .show_loading_spinner(true)
                                    .sense(egui::Sense::click()),
                            );
                            if response.clicked() {
                                clicked = Some(row.index);
                            }
                            response.on_hover_text(row.alt).context_menu(|ui| {
                                if ui.button("Copy image URL").clicked() {
                                    action = Some(RowAction::CopyUrl(row.image_url.to_string()));
                                    ui.close();
                                }
                                if ui.button("Open in browser").clicked() {
                                    action = Some(RowAction::OpenUrl(row.image_url.to_string()));
                                    ui.close();
                                }
                            });
                        });
                    });
                });
            }
        });

    if let Some(index) = clicked {
        state.toggle(index);
    }
    action
}
