mod controls;
mod help_dialog;
mod plot;
mod summary_panel;

pub use controls::render_controls;
pub use help_dialog::render_help_dialog;
pub use plot::render_plot;
pub use summary_panel::render_summary_panel;
