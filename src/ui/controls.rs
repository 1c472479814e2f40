use std::path::PathBuf;

use eframe::egui::{self, ComboBox};

use crate::app::HistOxide;
use crate::constants::histogram::{BIN_WIDTH_STEP, RANGE_STEP};
use crate::state::ControlEvent;
use crate::widgets::{CategoryChecklist, RangeInput};

/// Render the left-hand control panel.
///
/// Widgets only record [`ControlEvent`]s; they are dispatched once the
/// panel is drawn so each rebuild sees a consistent session.
pub fn render_controls(app: &mut HistOxide, ctx: &egui::Context, ui: &mut egui::Ui) {
    render_file_bar(app, ctx, ui);
    ui.separator();

    let Some(session) = &app.state.session else {
        return;
    };

    let mut events = Vec::new();
    let current = session.state();
    let columns = session.source().column_names();

    ui.heading(session.title());
    ui.add_space(4.0);

    // Numerical column
    let mut value_column = current.value_column.clone();
    ComboBox::from_label("Value")
        .selected_text(&value_column)
        .show_ui(ui, |ui| {
            for col in session.numeric_columns() {
                ui.selectable_value(&mut value_column, col.clone(), col.as_str());
            }
        });
    if value_column != current.value_column {
        events.push(ControlEvent::ValueColumnChanged(value_column));
    }

    // Categorical column
    let mut category_column = current.category_column.clone();
    ComboBox::from_label("Category")
        .selected_text(&category_column)
        .show_ui(ui, |ui| {
            for col in &columns {
                ui.selectable_value(&mut category_column, col.clone(), col.as_str());
            }
        });
    if category_column != current.category_column {
        events.push(ControlEvent::CategoryColumnChanged(category_column));
    }

    ui.separator();

    // Bin width
    let (lo, hi) = session.bin_width_bounds();
    let mut bin_width = current.bin_width;
    ui.label("Bin width:");
    if bin_width_control(ui, &mut bin_width, (lo, hi)) {
        events.push(ControlEvent::BinWidthChanged(bin_width));
    }

    // Range
    let mut range = (current.range_start, current.range_end);
    let response = RangeInput::new("Range:", &mut range)
        .bounds(session.range_bounds())
        .speed(RANGE_STEP)
        .show(ui);
    if response.changed() {
        events.push(ControlEvent::RangeChanged {
            start: range.0,
            end: range.1,
        });
    }
    if ui.small_button("↔ Full range").clicked() {
        let (start, end) = session.range_bounds();
        events.push(ControlEvent::RangeChanged { start, end });
    }

    ui.separator();

    // Category checklist
    let output = session.output();
    ui.horizontal(|ui| {
        ui.strong(format!(
            "{} ({}/{})",
            current.category_column,
            current.selected_categories.len(),
            session.category_labels().len()
        ));
    });
    ui.horizontal(|ui| {
        if ui.small_button("All").clicked() {
            events.push(ControlEvent::CategoriesSelected(session.category_labels().to_vec()));
        }
        if ui.small_button("None").clicked() {
            events.push(ControlEvent::CategoriesSelected(Vec::new()));
        }
    });
    if let Some(event) = CategoryChecklist::new(session.category_labels(), current, &output).show(ui) {
        events.push(event);
    }

    for event in events {
        app.state.dispatch(event);
    }
}

/// Slider over the suggested span plus an exact entry field.
/// A width outside the slider span is shown as is; only user edits report a change.
fn bin_width_control(ui: &mut egui::Ui, bin_width: &mut f64, (lo, hi): (f64, f64)) -> bool {
    ui.horizontal(|ui| {
        let slider = ui.add(
            egui::Slider::new(bin_width, lo..=hi)
                .step_by(BIN_WIDTH_STEP)
                .clamping(egui::SliderClamping::Never),
        );
        let exact = ui.add(egui::DragValue::new(bin_width).speed(0.1));
        slider.changed() || exact.changed()
    })
    .inner
}

/// File operations, recent files and drag-and-drop
fn render_file_bar(app: &mut HistOxide, ctx: &egui::Context, ui: &mut egui::Ui) {
    let mut to_open: Option<PathBuf> = None;

    ui.horizontal(|ui| {
        if ui.button("📂").on_hover_text("Open Data File").clicked() {
            to_open = rfd::FileDialog::new()
                .add_filter("Data Files", &["csv", "parquet"])
                .pick_file();
        }

        if !app.state.recent_files.is_empty() {
            ComboBox::from_id_salt("recent_files")
                .selected_text("📋")
                .show_ui(ui, |ui| {
                    ui.label("Recent Files:");
                    ui.separator();
                    for path in &app.state.recent_files {
                        if let Some(name) = path.file_name() {
                            if ui
                                .button(name.to_string_lossy())
                                .on_hover_text(path.display().to_string())
                                .clicked()
                            {
                                to_open = Some(path.clone());
                            }
                        }
                    }
                });
        }

        ui.add_enabled_ui(app.state.has_data(), |ui| {
            if ui.button("💾").on_hover_text("Save Config").clicked() {
                app.save_config();
            }
            if ui.button("🔄").on_hover_text("Reset view (R)").clicked() {
                app.reset_view();
            }
        });

        if ui
            .button(if app.state.view.dark_mode { "🌙" } else { "☀" })
            .on_hover_text("Toggle theme (T)")
            .clicked()
        {
            app.state.view.toggle_dark_mode();
        }
        if ui.button("❓").on_hover_text("Help (F1)").clicked() {
            app.state.view.show_help = !app.state.view.show_help;
        }
    });

    if let Some(file) = &app.state.current_file {
        ui.label(format!(
            "📄 {}",
            file.file_name().and_then(|n| n.to_str()).unwrap_or("Unknown")
        ))
        .on_hover_text(file.display().to_string());
    }

    ctx.input(|i| {
        if let Some(path) = i.raw.dropped_files.first().and_then(|f| f.path.as_ref()) {
            to_open = Some(path.clone());
        }
    });

    if let Some(path) = to_open {
        if let Err(e) = app.load_file(path) {
            app.state.ui.set_error(&e);
        }
    }
}
