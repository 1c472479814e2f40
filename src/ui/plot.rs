use chrono::{DateTime, Utc};
use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};

use crate::app::HistOxide;
use crate::constants::layout::BAR_FILL_ALPHA;
use crate::histogram::HistogramTable;

/// Convert fractional epoch seconds to a UTC datetime
fn to_datetime(value: f64) -> Option<DateTime<Utc>> {
    let secs = value.floor() as i64;
    let nanos = ((value.fract() * 1_000_000_000.0) as u32).min(999_999_999);
    DateTime::<Utc>::from_timestamp(secs, nanos)
}

/// One bar chart per selected category, in selection order
fn category_charts(table: &HistogramTable) -> Vec<BarChart> {
    profiling::scope!("category_charts");

    table
        .categories()
        .iter()
        .map(|category| {
            let color = category.color.to_color32();
            let bars: Vec<Bar> = table
                .rows_for(&category.label)
                .map(|row| {
                    Bar::new(row.center(), row.proportion)
                        .width(row.width())
                        .name(format!(
                            "{}\n{}\n{}",
                            row.category_label,
                            row.interval_label(),
                            row.proportion_label()
                        ))
                })
                .collect();

            BarChart::new(category.label.clone(), bars)
                .color(color.gamma_multiply(BAR_FILL_ALPHA))
                .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| bar.name.clone()))
        })
        .collect()
}

/// Render the histogram plot for the current session
pub fn render_plot(app: &mut HistOxide, ui: &mut egui::Ui) {
    profiling::scope!("render_plot");

    let Some(session) = &app.state.session else {
        return;
    };
    let table = session.output();
    let value_column = session.state().value_column.clone();
    let is_datetime = session.source().is_datetime_column(&value_column);

    ui.vertical_centered(|ui| {
        ui.heading(session.title());
    });

    let empty = table.empty_categories();
    if !empty.is_empty() {
        ui.colored_label(
            ui.visuals().warn_fg_color,
            format!("No records in range for: {}", empty.join(", ")),
        );
    }
    if table.is_empty() {
        ui.vertical_centered(|ui| {
            ui.label("Select at least one category to plot");
        });
    }

    let plot_height = ui.available_height().max(200.0);

    let mut plot = Plot::new("histogram")
        .x_axis_label(value_column)
        .y_axis_label("Proportion")
        .show_grid(app.state.view.show_grid)
        .height(plot_height);

    if app.state.view.reset_bounds {
        plot = plot.reset();
        app.state.view.reset_bounds = false;
    }

    if app.state.view.show_legend {
        plot = plot.legend(egui_plot::Legend::default().position(egui_plot::Corner::RightTop));
    }

    if is_datetime {
        plot = plot.x_axis_formatter(|mark, _range| match to_datetime(mark.value) {
            Some(dt) => dt.format("%Y-%m-%d\n%H:%M:%S").to_string(),
            None => format!("{:.2}", mark.value),
        });
    } else {
        plot = plot.x_axis_formatter(|mark, _range| {
            if mark.value.abs() < 0.01 && mark.value != 0.0 {
                format!("{:.2e}", mark.value)
            } else if mark.value.abs() >= 1000.0 {
                format!("{:.0}", mark.value)
            } else {
                format!("{:.2}", mark.value)
            }
        });
    }

    plot = plot
        .y_axis_formatter(|mark, _range| format!("{:.0}%", mark.value * 100.0))
        .include_y(0.0)
        .include_y(table.max_proportion());
    if let Some(spec) = table.bin_spec() {
        plot = plot.include_x(spec.range_start()).include_x(spec.range_end());
    }

    let charts = category_charts(&table);
    plot.show(ui, |plot_ui| {
        for chart in charts {
            plot_ui.bar_chart(chart);
        }
    });
}
