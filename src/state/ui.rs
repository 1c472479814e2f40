//! UI interaction state

use crate::error::HistError;

/// A message shown in the status area until dismissed
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub title: String,
    pub text: String,
}

/// UI interaction state
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Error message to display in UI (status bar)
    pub error: Option<StatusMessage>,
}

impl UiState {
    /// Show an error from the crate's error type
    pub fn set_error(&mut self, err: &HistError) {
        self.error = Some(StatusMessage {
            title: err.title().to_string(),
            text: err.user_message(),
        });
    }

    /// Clear the current error message
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_lifecycle() {
        let mut ui = UiState::default();
        assert!(!ui.error.is_some());

        ui.set_error(&HistError::invalid_bin_spec("bin width must be positive, got 0"));
        let msg = ui.error.clone().unwrap();
        assert_eq!(msg.title, "Invalid Bin Spec");
        assert!(msg.text.contains("bin width"));

        ui.clear_error();
        assert!(!ui.error.is_some());
    }
}
