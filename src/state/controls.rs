//! Control state and the events that change it

use serde::{Deserialize, Serialize};

use crate::data::DataSource;
use crate::error::Result;
use crate::histogram::{self, HistogramTable};

/// Everything the next histogram depends on.
///
/// Never mutated in place: every event produces a fresh value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    pub category_column: String,
    pub value_column: String,
    pub selected_categories: Vec<String>,
    pub range_start: f64,
    pub range_end: f64,
    pub bin_width: f64,
}

impl ControlState {
    /// Run the histogram builder for this state
    pub fn build(&self, source: &DataSource) -> Result<HistogramTable> {
        histogram::build(
            source,
            &self.category_column,
            &self.value_column,
            &self.selected_categories,
            self.range_start,
            self.range_end,
            self.bin_width,
        )
    }

    pub fn with_range(&self, range_start: f64, range_end: f64) -> Self {
        Self {
            range_start,
            range_end,
            ..self.clone()
        }
    }

    pub fn with_bin_width(&self, bin_width: f64) -> Self {
        Self {
            bin_width,
            ..self.clone()
        }
    }

    pub fn with_selection(&self, selected_categories: Vec<String>) -> Self {
        Self {
            selected_categories,
            ..self.clone()
        }
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selected_categories.iter().any(|l| l == label)
    }
}

/// A single user interaction with the control surface
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// New numerical column; the range resets to its full span
    ValueColumnChanged(String),
    /// New categorical column; the checklist is rebuilt from its labels
    CategoryColumnChanged(String),
    /// One checkbox flipped
    CategoryToggled { label: String, active: bool },
    /// Whole selection replaced, in the given order
    CategoriesSelected(Vec<String>),
    BinWidthChanged(f64),
    RangeChanged { start: f64, end: f64 },
}

impl ControlEvent {
    /// Short name used in log lines
    pub fn kind(&self) -> &'static str {
        match self {
            ControlEvent::ValueColumnChanged(_) => "value_column",
            ControlEvent::CategoryColumnChanged(_) => "category_column",
            ControlEvent::CategoryToggled { .. } => "category_toggled",
            ControlEvent::CategoriesSelected(_) => "categories_selected",
            ControlEvent::BinWidthChanged(_) => "bin_width",
            ControlEvent::RangeChanged { .. } => "range",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ControlState {
        ControlState {
            category_column: "carrier".to_string(),
            value_column: "delay".to_string(),
            selected_categories: vec!["A".to_string()],
            range_start: 0.0,
            range_end: 10.0,
            bin_width: 1.0,
        }
    }

    #[test]
    fn test_with_helpers_leave_original_untouched() {
        let original = state();
        let narrowed = original.with_range(2.0, 4.0).with_bin_width(0.5);

        assert_eq!(original.range_start, 0.0);
        assert_eq!(original.bin_width, 1.0);
        assert_eq!((narrowed.range_start, narrowed.range_end), (2.0, 4.0));
        assert_eq!(narrowed.bin_width, 0.5);
        assert_eq!(narrowed.selected_categories, original.selected_categories);
    }

    #[test]
    fn test_is_selected() {
        let s = state().with_selection(vec!["B".to_string(), "C".to_string()]);
        assert!(s.is_selected("C"));
        assert!(!s.is_selected("A"));
    }

    #[test]
    fn test_state_serializes_to_json() {
        let json = serde_json::to_string(&state()).unwrap();
        let back: ControlState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state());
    }
}
