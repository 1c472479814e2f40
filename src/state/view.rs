//! View and visualization state

/// Display options that do not affect the histogram itself
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Dark mode theme toggle
    pub dark_mode: bool,

    /// Show help panel
    pub show_help: bool,

    /// Grid visibility
    pub show_grid: bool,

    /// Legend visibility
    pub show_legend: bool,

    /// Category summary panel visibility
    pub show_summary_panel: bool,

    /// Reset zoom bounds flag
    pub reset_bounds: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            dark_mode: true,
            show_help: false,
            show_grid: true,
            show_legend: true,
            show_summary_panel: true,
            reset_bounds: false,
        }
    }
}

impl ViewState {
    /// Reset plot bounds on next frame
    pub fn reset_plot_bounds(&mut self) {
        self.reset_bounds = true;
    }

    /// Toggle dark mode
    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }
}
