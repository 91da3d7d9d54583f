//! Product table and page-link widgets

use crate::pagination::PaginationBar;
use crate::table::RowsView;
use eframe::egui;
use egui_extras::{Column, TableBuilder};

const ROW_HEIGHT: f32 = 22.0;

/// Draw the table body for the current render
pub fn product_table(ui: &mut egui::Ui, rows: RowsView<'_>) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(50.0))
        .column(Column::initial(320.0).resizable(true))
        .column(Column::exact(90.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT, |mut header| {
            for name in ["Id", "Title", "Price", "Description"] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| match rows {
            RowsView::Loading => {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|_| {});
                    row.col(|ui| {
                        ui.strong("Loading...");
                    });
                    row.col(|_| {});
                    row.col(|_| {});
                });
            }
            RowsView::Failed(message) => {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|_| {});
                    row.col(|ui| {
                        ui.colored_label(egui::Color32::LIGHT_RED, "Failed to load products");
                    });
                    row.col(|_| {});
                    row.col(|ui| {
                        ui.label(message);
                    });
                });
            }
            RowsView::Page(products) => {
                for product in products {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(product.id.to_string());
                        });
                        row.col(|ui| {
                            ui.label(&product.title);
                        });
                        row.col(|ui| {
                            ui.label(product.price_text());
                        });
                        row.col(|ui| {
                            ui.label(&product.description);
                        });
                    });
                }
            }
        });
}

/// Draw the page links. Returns the page of a clicked, enabled link.
pub fn pagination_bar(ui: &mut egui::Ui, bar: &PaginationBar) -> Option<usize> {
    let mut clicked = None;
    ui.horizontal(|ui| {
        for (i, link) in bar.links().iter().enumerate() {
            let button = egui::Button::new(link.label.as_str()).selected(link.active);
            if ui.add_enabled(!link.disabled, button).clicked() {
                clicked = bar.activate(i);
            }
        }
    });
    clicked
}
