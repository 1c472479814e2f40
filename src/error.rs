//! Error types for HistOxide
//!
//! Every fallible operation in the crate returns [`HistError`]. The
//! histogram builder only ever fails on bad input; a category with no
//! matching records is a successful outcome, reported on the
//! [`HistogramTable`](crate::histogram::HistogramTable) itself.

use thiserror::Error;

/// Main error type for HistOxide operations
#[derive(Error, Debug)]
pub enum HistError {
    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unsupported file format
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Column not found in data
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Empty dataset error
    #[error("Dataset is empty or has no rows")]
    EmptyDataset,

    /// Category label not offered by the current categorical column
    #[error("Category '{label}' does not occur in column '{column}'")]
    UnknownCategory { label: String, column: String },

    /// Column holds no usable numeric values
    #[error("Column '{column}' has no numeric values")]
    NoNumericValues { column: String },

    /// Range or bin width rejected before binning
    #[error("Invalid bin spec: {reason}")]
    InvalidBinSpec { reason: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for HistOxide operations
pub type Result<T> = std::result::Result<T, HistError>;

impl HistError {
    pub(crate) fn invalid_bin_spec(reason: impl Into<String>) -> Self {
        HistError::InvalidBinSpec {
            reason: reason.into(),
        }
    }

    pub(crate) fn column_not_found(column: impl Into<String>) -> Self {
        HistError::ColumnNotFound {
            column: column.into(),
        }
    }

    /// True when the error stems from caller input rather than the environment
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            HistError::ColumnNotFound { .. }
                | HistError::UnknownCategory { .. }
                | HistError::InvalidBinSpec { .. }
                | HistError::NoNumericValues { .. }
        )
    }

    /// Get a user-friendly error message suitable for displaying in UI
    pub fn user_message(&self) -> String {
        match self {
            HistError::FileIo(e) => format!("File error: {}", e),
            HistError::Polars(e) => format!("Data error: {}", e),
            HistError::Config(msg) => format!("Config error: {}", msg),
            HistError::UnsupportedFormat { extension } => {
                format!("Unsupported file format: '.{}'", extension)
            }
            HistError::ColumnNotFound { column } => {
                format!("Column '{}' not found", column)
            }
            HistError::UnknownCategory { label, column } => {
                format!("'{}' is not a value of '{}'", label, column)
            }
            HistError::EmptyDataset => "Dataset is empty".to_string(),
            HistError::NoNumericValues { column } => {
                format!("Column '{}' has no numeric values to bin", column)
            }
            HistError::InvalidBinSpec { reason } => format!("Invalid histogram settings: {}", reason),
            HistError::Json(e) => format!("JSON error: {}", e),
        }
    }

    /// Get a short title for the error (for the status bar)
    pub fn title(&self) -> &'static str {
        match self {
            HistError::FileIo(_) => "File Error",
            HistError::Polars(_) => "Data Error",
            HistError::Config(_) => "Configuration Error",
            HistError::UnsupportedFormat { .. } => "Unsupported Format",
            HistError::ColumnNotFound { .. } => "Column Not Found",
            HistError::UnknownCategory { .. } => "Unknown Category",
            HistError::EmptyDataset => "Empty Dataset",
            HistError::NoNumericValues { .. } => "Not Numeric",
            HistError::InvalidBinSpec { .. } => "Invalid Bin Spec",
            HistError::Json(_) => "JSON Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = HistError::column_not_found("carrier");
        assert_eq!(err.user_message(), "Column 'carrier' not found");
        assert_eq!(err.title(), "Column Not Found");

        let err = HistError::invalid_bin_spec("bin width must be positive, got 0");
        assert_eq!(
            err.user_message(),
            "Invalid histogram settings: bin width must be positive, got 0"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HistError = io_err.into();
        assert!(matches!(err, HistError::FileIo(_)));
        assert!(!err.is_bad_input());
    }

    #[test]
    fn test_bad_input_classification() {
        assert!(HistError::invalid_bin_spec("x").is_bad_input());
        assert!(HistError::column_not_found("x").is_bad_input());
        assert!(!HistError::EmptyDataset.is_bad_input());
    }
}
