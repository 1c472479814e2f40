use crate::app::HistOxide;

pub fn render_help_dialog(app: &mut HistOxide, ctx: &eframe::egui::Context) {
    if app.state.view.show_help {
        eframe::egui::Window::new("⌨ Keyboard Shortcuts")
            .anchor(eframe::egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .collapsible(false)
            .show(ctx, |ui| {
                ui.heading("View");
                ui.label("R - Reset zoom");
                ui.label("G - Toggle grid");
                ui.label("L - Toggle legend");
                ui.label("S - Toggle category summary");
                ui.label("T - Toggle dark/light theme");
                ui.label("H / F1 - Toggle help");
                ui.label("ESC - Close help");

                ui.separator();
                ui.heading("Mouse Controls");
                ui.label("Scroll - Zoom in/out");
                ui.label("Drag - Pan view");
                ui.label("Hover bar - Category, interval and share");
                ui.label("Double-click - Reset zoom");

                ui.separator();
                ui.heading("Histogram");
                ui.label("Bin width - Slider or exact value");
                ui.label("Range - Records outside are left out");
                ui.label("Checkbox - Show or hide a category");

                ui.separator();
                if ui.button("Close").clicked() {
                    app.state.view.show_help = false;
                }
            });
    }
}
