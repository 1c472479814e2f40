use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::app::HistOxide;
use crate::data::Stats;

fn stats_text(name: &str, stats: &Stats) -> String {
    format!(
        "{}\nCount: {}\nMin: {:.4}\nMax: {:.4}\nMean: {:.4}\nMedian: {:.4}\nStd Dev: {:.4}",
        name, stats.count, stats.min, stats.max, stats.mean, stats.median, stats.std_dev
    )
}

/// Render the per-category summary below the plot
pub fn render_summary_panel(app: &mut HistOxide, ui: &mut egui::Ui) {
    let Some(session) = &app.state.session else {
        ui.label("No data loaded.");
        return;
    };

    let table = session.output();
    let value_column = &session.state().value_column;
    let stats = session.value_stats();

    ui.horizontal(|ui| {
        ui.strong(value_column);
        ui.label(format!("n={}", stats.count));
        ui.separator();
        ui.label(format!("Min: {:.4}", stats.min));
        ui.label(format!("Max: {:.4}", stats.max));
        ui.separator();
        ui.label(format!("μ={:.4}", stats.mean));
        ui.label(format!("Med={:.4}", stats.median));
        ui.label(format!("σ={:.4}", stats.std_dev));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("📋").on_hover_text("Copy stats").clicked() {
                ui.ctx().copy_text(stats_text(value_column, stats));
            }
        });
    });
    ui.separator();

    let row_height = 18.0;
    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(160.0).resizable(true).clip(true))
        .column(Column::initial(80.0))
        .column(Column::initial(80.0))
        .column(Column::initial(80.0))
        .column(Column::remainder())
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Category");
            });
            header.col(|ui| {
                ui.strong("Records");
            });
            header.col(|ui| {
                ui.strong("In range");
            });
            header.col(|ui| {
                ui.strong("Peak");
            });
            header.col(|ui| {
                ui.strong("Color");
            });
        })
        .body(|body| {
            let categories = table.categories();
            body.rows(row_height, categories.len(), |mut row| {
                let Some(category) = categories.get(row.index()) else {
                    return;
                };
                let peak = table
                    .rows_for(&category.label)
                    .map(|r| r.proportion)
                    .fold(0.0, f64::max);

                row.col(|ui| {
                    ui.colored_label(category.color.to_color32(), format!("● {}", category.label));
                });
                row.col(|ui| {
                    ui.label(category.total.to_string());
                });
                row.col(|ui| {
                    if category.has_data() {
                        ui.label(category.in_range.to_string());
                    } else {
                        ui.colored_label(ui.visuals().warn_fg_color, "0 ⚠")
                            .on_hover_text("No records in the selected range");
                    }
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}%", peak * 100.0));
                });
                row.col(|ui| {
                    ui.monospace(category.color.to_string());
                });
            });
        });
}
