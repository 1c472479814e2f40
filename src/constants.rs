//! Application-wide constants and default values
//!
//! This module centralizes all magic numbers and default values used throughout
//! the application, making them easier to maintain and configure.

/// Histogram binning defaults
pub mod histogram {
    /// Half-width of the bin width slider around the suggested width
    pub const BIN_WIDTH_SLIDER_SPAN: f64 = 15.0;

    /// Bin width slider step
    pub const BIN_WIDTH_STEP: f64 = 1.0;

    /// Range control drag step
    pub const RANGE_STEP: f64 = 5.0;

    /// Upper bound on bins per category
    pub const MAX_BIN_COUNT: usize = 100_000;

    /// Categories selected automatically when a categorical column is chosen
    pub const MAX_AUTO_SELECTED: usize = 16;

    /// Tolerance used when checking that proportions sum to one
    pub const PROPORTION_TOLERANCE: f64 = 1e-9;
}

/// Category display colors
pub mod palette {
    /// Category20 palette restricted to its first 16 entries.
    /// Positions past the end wrap around.
    pub const CATEGORY20_16: [[u8; 3]; 16] = [
        [0x1f, 0x77, 0xb4],
        [0xae, 0xc7, 0xe8],
        [0xff, 0x7f, 0x0e],
        [0xff, 0xbb, 0x78],
        [0x2c, 0xa0, 0x2c],
        [0x98, 0xdf, 0x8a],
        [0xd6, 0x27, 0x28],
        [0xff, 0x98, 0x96],
        [0x94, 0x67, 0xbd],
        [0xc5, 0xb0, 0xd5],
        [0x8c, 0x56, 0x4b],
        [0xc4, 0x9c, 0x94],
        [0xe3, 0x77, 0xc2],
        [0xf7, 0xb6, 0xd2],
        [0x7f, 0x7f, 0x7f],
        [0xc7, 0xc7, 0xc7],
    ];
}

/// Data loading defaults
pub mod data {
    /// Rows sampled by the CSV reader for schema inference
    pub const INFER_SCHEMA_ROWS: usize = 100;
}

/// Session bookkeeping
pub mod files {
    /// Maximum number of recent files to track
    pub const MAX_RECENT_FILES: usize = 5;
}

/// UI layout defaults
pub mod layout {
    /// Left panel (controls) default width
    pub const CONTROLS_PANEL_WIDTH: f32 = 260.0;

    /// Bottom panel (category summary) default height
    pub const SUMMARY_PANEL_HEIGHT: f32 = 140.0;

    /// Bar fill opacity, hovered bars are drawn fully opaque
    pub const BAR_FILL_ALPHA: f32 = 0.7;

    /// Height reserved for the status bar
    pub const STATUS_BAR_HEIGHT: f32 = 20.0;
}

/// Configuration file paths
pub mod config {
    /// Configuration file name
    pub const CONFIG_FILE: &str = "config.json";
}
