//! Main DogTable window

use crate::gui::search::SearchState;
use crate::gui::table::{self, RowAction, TableState};
use crate::view::{DogView, LoadState};
use eframe::egui;
use std::time::Duration;
use tracing::{debug, warn};

/// Main application state
pub struct DogTableApp {
    /// Records, query and load lifecycle
    view: DogView,
    /// Search state
    search: SearchState,
    /// Results table
    table: TableState,
    /// Status bar message from the last row action
    status_message: Option<String>,
}

impl DogTableApp {
    /// Create the app and fire the initial load
    pub fn new(cc: &eframe::CreationContext<'_>, mut view: DogView) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        view.mount();

        Self {
            view,
            search: SearchState::default(),
            table: TableState::default(),
            status_message: None,
        }
    }

    /// Pick up the fetch result and start downloading every image right away
    fn process_messages(&mut self, ctx: &egui::Context) {
        if !self.view.poll() {
            return;
        }
        if self.view.state() == &LoadState::Loaded {
            for record in self.view.records() {
                let _ = ctx.try_load_image(&record.url, egui::load::SizeHint::default());
            }
            debug!(count = self.view.records().len(), "image downloads requested");
        }
    }

    /// Render title bar
    fn render_title(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                ui.heading(crate::TITLE);
            });
            ui.add_space(6.0);
        });
    }

    /// Render search bar
    fn render_search_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search.query)
                    .desired_width(f32::INFINITY)
                    .hint_text(crate::SEARCH_LABEL),
            );

            if self.search.first_frame {
                response.request_focus();
                self.search.first_frame = false;
            }

            if response.changed() {
                self.view.set_query(self.search.query.clone());
            }
            ui.add_space(4.0);
        });
    }

    /// Render status bar
    fn render_status_bar(&self, ctx: &egui::Context, shown: usize) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| match self.view.state() {
                LoadState::NotLoaded => {
                    ui.label("Ready");
                }
                LoadState::Loading => {
                    ui.spinner();
                    ui.label("Fetching dog images...");
                }
                LoadState::Failed(reason) => {
                    ui.colored_label(ui.visuals().warn_fg_color, "Could not load images");
                    ui.separator();
                    ui.label(reason);
                }
                LoadState::Loaded => {
                    ui.label(format!("{} of {} dogs", shown, self.view.records().len()));
                    if let Some(msg) = &self.status_message {
                        ui.separator();
                        ui.label(msg);
                    }
                }
            });
        });
    }

    fn handle_action(&mut self, action: RowAction) {
        self.status_message = Some(match action {
            RowAction::CopyUrl(url) => match arboard::Clipboard::new()
                .and_then(|mut clipboard| clipboard.set_text(url.clone()))
            {
                Ok(()) => format!("Copied {}", url),
                Err(e) => {
                    warn!(error = %e, "clipboard unavailable");
                    format!("Copy failed: {}", e)
                }
            },
            RowAction::OpenUrl(url) => match open::that(&url) {
                Ok(()) => format!("Opened {}", url),
                Err(e) => {
                    warn!(error = %e, %url, "could not open browser");
                    format!("Open failed: {}", e)
                }
            },
        });
    }
}

impl eframe::App for DogTableApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_messages(ctx);

        self.render_title(ctx);
        self.render_search_bar(ctx);

        let rows = self.view.rows();
        self.table.retain_visible(&rows);
        self.render_status_bar(ctx, rows.len());

        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            action = table::show(ui, &rows, &mut self.table);
        });

        if let Some(action) = action {
            self.handle_action(action);
        }

        if self.view.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
