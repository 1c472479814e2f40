use std::path::PathBuf;

use eframe::egui::{self, CentralPanel};
use egui_extras::{Size, StripBuilder};

use crate::config::AppConfig;
use crate::constants;
use crate::error::Result;
use crate::state::{self, ControlDefaults};
use crate::ui;

pub struct HistOxide {
    pub state: state::AppState,
}

impl HistOxide {
    pub fn new(state: state::AppState) -> Self {
        Self { state }
    }

    /// Open another dataset in a fresh session.
    /// Column choices from the startup config are not carried over.
    pub fn load_file(&mut self, path: PathBuf) -> Result<()> {
        self.state.open(&path, ControlDefaults::default())
    }

    pub fn reset_view(&mut self) {
        self.state.view.reset_plot_bounds();
    }

    /// Write the current session's choices to a config file picked by the user
    pub fn save_config(&mut self) {
        let (Some(session), Some(file)) = (&self.state.session, &self.state.current_file) else {
            return;
        };
        let config = AppConfig::from_session(file.clone(), session.state(), self.state.view.dark_mode);

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(constants::config::CONFIG_FILE)
            .save_file()
        {
            match config.save(&path) {
                Ok(()) => tracing::info!(path = %path.display(), "config saved"),
                Err(e) => self.state.ui.set_error(&e),
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let view = &mut self.state.view;
        ctx.input(|i| {
            if i.key_pressed(egui::Key::R) {
                view.reset_plot_bounds();
            }
            if i.key_pressed(egui::Key::G) {
                view.show_grid = !view.show_grid;
            }
            if i.key_pressed(egui::Key::L) {
                view.show_legend = !view.show_legend;
            }
            if i.key_pressed(egui::Key::S) {
                view.show_summary_panel = !view.show_summary_panel;
            }
            if i.key_pressed(egui::Key::T) {
                view.toggle_dark_mode();
            }
            if i.key_pressed(egui::Key::H) || i.key_pressed(egui::Key::F1) {
                view.show_help = !view.show_help;
            }
            if i.key_pressed(egui::Key::Escape) {
                view.show_help = false;
            }
        });
    }

    fn render_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        ui.horizontal(|ui| {
            if let Some(name) = self.state.current_file.as_ref().and_then(|f| f.file_name()) {
                ui.label(format!("📁 {}", name.to_string_lossy()));
                ui.separator();
            }
            if let Some(session) = &self.state.session {
                let source = session.source();
                let shape = ui.label(format!("Rows: {} | Cols: {}", source.height(), source.width()));
                if let Some(path) = source.file_path() {
                    shape.on_hover_text(path.display().to_string());
                }
                ui.separator();
                let output = session.output();
                ui.label(format!("Categories: {}", output.categories().len()))
                    .on_hover_text(format!("Rebuilds: {}", session.generation()));
                if let Some(spec) = output.bin_spec() {
                    ui.separator();
                    ui.label(format!("Bins: {} × {}", spec.bin_count(), spec.bin_width()));
                }
            }

            let mut dismiss = false;
            if let Some(msg) = &self.state.ui.error {
                ui.separator();
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    format!("⚠ {}: {}", msg.title, msg.text),
                );
                dismiss = ui.small_button("✖").on_hover_text("Dismiss").clicked();
            }
            if dismiss {
                self.state.ui.clear_error();
            }
        });
    }
}

impl eframe::App for HistOxide {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        profiling::finish_frame!();

        if self.state.view.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        self.handle_shortcuts(ctx);

        CentralPanel::default().show(ctx, |ui| {
            let show_summary = self.state.view.show_summary_panel && self.state.has_data();

            StripBuilder::new(ui)
                .size(Size::exact(constants::layout::CONTROLS_PANEL_WIDTH))
                .size(Size::remainder())
                .horizontal(|mut strip| {
                    // Left panel: file and histogram controls
                    strip.cell(|ui| {
                        ui::render_controls(self, ctx, ui);
                    });

                    // Center: plot, category summary, status bar
                    strip.cell(|ui| {
                        let mut vertical_strip = StripBuilder::new(ui).size(Size::remainder());
                        if show_summary {
                            vertical_strip = vertical_strip
                                .size(Size::exact(constants::layout::SUMMARY_PANEL_HEIGHT));
                        }
                        vertical_strip = vertical_strip
                            .size(Size::exact(constants::layout::STATUS_BAR_HEIGHT));

                        vertical_strip.vertical(|mut strip| {
                            strip.cell(|ui| {
                                if self.state.has_data() {
                                    ui::render_plot(self, ui);
                                } else {
                                    ui.vertical_centered(|ui| {
                                        ui.heading("No data loaded");
                                        ui.label("Open a CSV or Parquet file, or drop one onto the window");
                                    });
                                }
                            });

                            if show_summary {
                                strip.cell(|ui| {
                                    ui::render_summary_panel(self, ui);
                                });
                            }

                            strip.cell(|ui| {
                                self.render_status_bar(ui);
                            });
                        });
                    });
                });
        });

        ui::render_help_dialog(self, ctx);
    }
}
