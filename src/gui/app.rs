//! Main ProdView window

use crate::gui::table;
use crate::loader::{spawn_load, LoadMessage};
use crate::table::{LoadState, ProductTable};
use crate::{AppConfig, ProdViewError};
use crossbeam_channel::{Receiver, TryRecvError};
use eframe::egui;
use std::time::Duration;

/// Main application state
pub struct ProdViewApp {
    /// Component state shared with the TUI
    table: ProductTable,
    /// Pending catalogue fetch
    loader: Option<Receiver<LoadMessage>>,
    /// Status bar message
    status_message: String,
}

impl ProdViewApp {
    /// Create the window state and start the fetch
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &AppConfig) -> Self {
        let mut app = Self {
            table: ProductTable::new(config.table_settings()),
            loader: None,
            status_message: "Ready".to_string(),
        };

        let started = config.product_source().and_then(spawn_load);
        match started {
            Ok(rx) => {
                if app.table.begin_load() {
                    app.loader = Some(rx);
                    app.status_message = "Loading products...".to_string();
                }
            }
            Err(e) => {
                app.table.begin_load();
                app.table.apply_load(LoadMessage::Failed(e));
                app.status_message = "Load failed".to_string();
            }
        }

        app
    }

    fn process_messages(&mut self) {
        let rx = match &self.loader {
            Some(rx) => rx,
            None => return,
        };

        let message = match rx.try_recv() {
            Ok(message) => message,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => LoadMessage::Failed(ProdViewError::LoaderDisconnected),
        };
        self.loader = None;
        self.table.apply_load(message);

        self.status_message = match self.table.load_state() {
            LoadState::Loaded => format!(
                "Loaded {} products at {}",
                self.table.products().len(),
                chrono::Local::now().format("%H:%M:%S")
            ),
            LoadState::Failed(_) => "Load failed".to_string(),
            _ => self.status_message.clone(),
        };
    }

    fn draw_search_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut query = self.table.raw_query().to_string();
            let response = ui.add(
                egui::TextEdit::singleline(&mut query)
                    .hint_text("Search or enter data")
                    .desired_width(360.0),
            );
            if response.changed() {
                self.table.on_query_change(query);
            }

            if ui.button("Reset Data").clicked() {
                self.table.reset();
            }
        });
    }

    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(&self.status_message);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!(
                    "{} of {} products",
                    self.table.filtered_count(),
                    self.table.products().len()
                ));
            });
        });
    }
}

impl eframe::App for ProdViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_messages();
        if self.table.tick() {
            self.status_message = format!("{} matching products", self.table.filtered_count());
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.draw_status_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Table Data");
            });
            ui.add_space(8.0);
            self.draw_search_bar(ui);
            ui.add_space(8.0);

            if let Some(page) = table::pagination_bar(ui, &self.table.pagination()) {
                self.table.on_page_change(page);
            }
            ui.separator();
            table::product_table(ui, self.table.rows());
        });

        // Keep polling while something is in flight
        if let Some(due) = self.table.time_to_commit() {
            ctx.request_repaint_after(due);
        } else if self.loader.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
