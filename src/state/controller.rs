//! Event-driven histogram session
//!
//! A [`Controller`] owns one session's control state and the table last
//! handed to the renderer. Each [`ControlEvent`] is turned into a new
//! [`ControlState`], the builder runs once, and on success both the state
//! and the output are swapped in together. On failure nothing changes and
//! the error goes back to the caller.

use std::sync::Arc;

use crate::constants::histogram::{BIN_WIDTH_SLIDER_SPAN, BIN_WIDTH_STEP, MAX_AUTO_SELECTED};
use crate::data::{DataSource, Stats};
use crate::error::{HistError, Result};
use crate::histogram::HistogramTable;

use super::controls::{ControlEvent, ControlState};

/// Optional starting choices, usually from the config file
#[derive(Debug, Clone, Default)]
pub struct ControlDefaults {
    pub category_column: Option<String>,
    pub value_column: Option<String>,
    pub bin_width: Option<f64>,
}

/// Suggested bin width for a dataset: `floor(sqrt(rows))`, at least one step
pub fn suggested_bin_width(rows: usize) -> f64 {
    ((rows as f64).sqrt().floor()).max(BIN_WIDTH_STEP)
}

pub struct Controller {
    source: Arc<DataSource>,
    state: ControlState,
    /// Checklist entries for the current categorical column
    category_labels: Vec<String>,
    /// Columns offered by the value selector, fixed for the session
    numeric_columns: Vec<String>,
    /// Bounds of the range control, the full span of the value column
    range_bounds: (f64, f64),
    value_stats: Stats,
    output: Arc<HistogramTable>,
    /// Number of successful rebuilds, including the initial one
    generation: u64,
}

impl Controller {
    /// Start a session over `source` and run the first build
    pub fn new(source: Arc<DataSource>, defaults: ControlDefaults) -> Result<Self> {
        let numeric_columns = source.numeric_columns();
        let category_column = match defaults.category_column {
            Some(col) => col,
            None => default_category_column(&source)?,
        };
        let value_column = match defaults.value_column {
            Some(col) => col,
            None => default_value_column(&numeric_columns, &category_column)?,
        };
        let category_labels = source.category_labels(&category_column)?;
        let value_stats = source.value_stats(&value_column)?;
        let (range_start, range_end) = value_stats.span();
        let bin_width = defaults
            .bin_width
            .unwrap_or_else(|| suggested_bin_width(source.height()));

        let state = ControlState {
            category_column,
            value_column,
            selected_categories: auto_selection(&category_labels),
            range_start,
            range_end,
            bin_width,
        };
        let output = state.build(&source)?;

        tracing::info!(
            category_column = %state.category_column,
            value_column = %state.value_column,
            categories = category_labels.len(),
            "session started"
        );

        Ok(Self {
            source,
            state,
            category_labels,
            numeric_columns,
            range_bounds: (range_start, range_end),
            value_stats,
            output: Arc::new(output),
            generation: 1,
        })
    }

    pub fn source(&self) -> &Arc<DataSource> {
        &self.source
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Latest table; a new `Arc` replaces it on every successful rebuild
    pub fn output(&self) -> Arc<HistogramTable> {
        Arc::clone(&self.output)
    }

    pub fn category_labels(&self) -> &[String] {
        &self.category_labels
    }

    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    pub fn range_bounds(&self) -> (f64, f64) {
        self.range_bounds
    }

    pub fn value_stats(&self) -> &Stats {
        &self.value_stats
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Bounds for the bin width slider, centred on the suggested width
    pub fn bin_width_bounds(&self) -> (f64, f64) {
        let suggested = suggested_bin_width(self.source.height());
        (
            (suggested - BIN_WIDTH_SLIDER_SPAN).max(BIN_WIDTH_STEP),
            suggested + BIN_WIDTH_SLIDER_SPAN,
        )
    }

    pub fn title(&self) -> String {
        format!("Histogram of {}", self.state.value_column)
    }

    /// Apply one event and rebuild.
    pub fn dispatch(&mut self, event: ControlEvent) -> Result<Arc<HistogramTable>> {
        profiling::scope!("dispatch");
        let kind = event.kind();
        self.apply(event).inspect_err(|e| {
            if e.is_bad_input() {
                tracing::warn!(event = kind, error = %e, "rebuild rejected");
            } else {
                tracing::error!(event = kind, error = %e, "rebuild failed");
            }
        })
    }

    fn apply(&mut self, event: ControlEvent) -> Result<Arc<HistogramTable>> {
        let kind = event.kind();
        let mut next_labels = None;
        let mut next_value = None;

        let next = match event {
            ControlEvent::CategoryColumnChanged(column) => {
                let labels = self.source.category_labels(&column)?;
                let next = ControlState {
                    category_column: column,
                    selected_categories: auto_selection(&labels),
                    ..self.state.clone()
                };
                next_labels = Some(labels);
                next
            }
            ControlEvent::ValueColumnChanged(column) => {
                let stats = self.source.value_stats(&column)?;
                let (start, end) = stats.span();
                let next = ControlState {
                    value_column: column,
                    range_start: start,
                    range_end: end,
                    ..self.state.clone()
                };
                next_value = Some(stats);
                next
            }
            ControlEvent::CategoryToggled { label, active } => {
                self.ensure_known(&label)?;
                let selection = self
                    .category_labels
                    .iter()
                    .filter(|l| {
                        if **l == label {
                            active
                        } else {
                            self.state.is_selected(l)
                        }
                    })
                    .cloned()
                    .collect();
                self.state.with_selection(selection)
            }
            ControlEvent::CategoriesSelected(selection) => {
                for label in &selection {
                    self.ensure_known(label)?;
                }
                self.state.with_selection(selection)
            }
            ControlEvent::BinWidthChanged(width) => self.state.with_bin_width(width),
            ControlEvent::RangeChanged { start, end } => self.state.with_range(start, end),
        };

        let table = Arc::new(next.build(&self.source)?);

        self.state = next;
        if let Some(labels) = next_labels {
            self.category_labels = labels;
        }
        if let Some(stats) = next_value {
            self.range_bounds = stats.span();
            self.value_stats = stats;
        }
        self.output = Arc::clone(&table);
        self.generation += 1;

        tracing::debug!(event = kind, generation = self.generation, rows = table.len(), "rebuilt");
        Ok(table)
    }

    fn ensure_known(&self, label: &str) -> Result<()> {
        if self.category_labels.iter().any(|l| l == label) {
            Ok(())
        } else {
            Err(HistError::UnknownCategory {
                label: label.to_string(),
                column: self.state.category_column.clone(),
            })
        }
    }
}

fn auto_selection(labels: &[String]) -> Vec<String> {
    labels.iter().take(MAX_AUTO_SELECTED).cloned().collect()
}

/// First text column, otherwise the first column
fn default_category_column(source: &DataSource) -> Result<String> {
    let names = source.column_names();
    names
        .iter()
        .find(|c| source.is_text_column(c))
        .or_else(|| names.first())
        .cloned()
        .ok_or(HistError::EmptyDataset)
}

/// First column other than the categorical one with at least two distinct numbers
fn default_value_column(numeric: &[String], category_column: &str) -> Result<String> {
    numeric
        .iter()
        .find(|c| c.as_str() != category_column)
        .or_else(|| numeric.first())
        .cloned()
        .ok_or_else(|| {
            HistError::Config("dataset has no numeric column with more than one distinct value".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::Color;
    use polars::prelude::*;

    fn flights() -> Arc<DataSource> {
        let df = df!(
            "carrier" => ["UA", "AA", "UA", "DL", "UA", "AA"],
            "delay" => [-10.0f64, 5.0, 20.0, 35.0, 50.0, 110.0],
            "distance" => [100.0f64, 200.0, 300.0, 400.0, 500.0, 600.0],
            "origin" => ["JFK", "LGA", "JFK", "EWR", "EWR", "EWR"]
        )
        .unwrap();
        Arc::new(DataSource::from_dataframe(df, None))
    }

    fn session() -> Controller {
        Controller::new(
            flights(),
            ControlDefaults {
                bin_width: Some(10.0),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_initial_state_picks_columns_and_full_range() {
        let c = session();
        let s = c.state();

        assert_eq!(s.category_column, "carrier");
        assert_eq!(s.value_column, "delay");
        assert_eq!((s.range_start, s.range_end), (-10.0, 110.0));
        assert_eq!(c.range_bounds(), (-10.0, 110.0));
        assert_eq!(c.category_labels(), ["UA", "AA", "DL"]);
        assert_eq!(s.selected_categories, vec!["UA", "AA", "DL"]);
        assert_eq!(c.generation(), 1);
        assert_eq!(c.output().rows_for("UA").count(), 12);
        assert_eq!(c.title(), "Histogram of delay");
        assert_eq!(c.numeric_columns(), ["delay", "distance"]);
    }

    #[test]
    fn test_defaults_from_config_are_honoured() {
        let c = Controller::new(
            flights(),
            ControlDefaults {
                category_column: Some("origin".to_string()),
                value_column: Some("distance".to_string()),
                bin_width: None,
            },
        )
        .unwrap();

        assert_eq!(c.state().category_column, "origin");
        assert_eq!(c.state().value_column, "distance");
        assert_eq!(c.state().bin_width, 2.0);
        assert_eq!(c.category_labels(), ["EWR", "JFK", "LGA"]);
    }

    #[test]
    fn test_unknown_default_column_is_an_error() {
        let err = Controller::new(
            flights(),
            ControlDefaults {
                category_column: Some("airline".to_string()),
                ..Default::default()
            },
        )
        .err()
        .unwrap();
        assert!(matches!(err, HistError::ColumnNotFound { .. }));
    }

    #[test]
    fn test_category_column_change_rebuilds_with_new_labels() {
        let mut c = session();
        let before = c.output();

        let table = c
            .dispatch(ControlEvent::CategoryColumnChanged("origin".to_string()))
            .unwrap();

        assert_eq!(c.category_labels(), ["EWR", "JFK", "LGA"]);
        assert_eq!(c.state().selected_categories, vec!["EWR", "JFK", "LGA"]);
        assert!(table.rows_for("EWR").count() > 0);
        assert_eq!(table.rows_for("UA").count(), 0);
        assert!(!Arc::ptr_eq(&before, &c.output()));
        assert_eq!(c.generation(), 2);
    }

    #[test]
    fn test_value_column_change_resets_range() {
        let mut c = session();
        c.dispatch(ControlEvent::RangeChanged { start: 0.0, end: 50.0 })
            .unwrap();

        c.dispatch(ControlEvent::ValueColumnChanged("distance".to_string()))
            .unwrap();

        let s = c.state();
        assert_eq!((s.range_start, s.range_end), (100.0, 600.0));
        assert_eq!(c.range_bounds(), (100.0, 600.0));
        assert_eq!(c.value_stats().count, 6);
        assert_eq!(c.title(), "Histogram of distance");
    }

    #[test]
    fn test_toggle_keeps_checklist_order() {
        let mut c = session();
        c.dispatch(ControlEvent::CategoriesSelected(vec!["DL".to_string()]))
            .unwrap();
        c.dispatch(ControlEvent::CategoryToggled {
            label: "UA".to_string(),
            active: true,
        })
        .unwrap();

        assert_eq!(c.state().selected_categories, vec!["UA", "DL"]);
        let table = c.output();
        assert_eq!(table.categories()[0].color, Color::for_position(0));

        c.dispatch(ControlEvent::CategoryToggled {
            label: "UA".to_string(),
            active: false,
        })
        .unwrap();
        assert_eq!(c.state().selected_categories, vec!["DL"]);
    }

    #[test]
    fn test_invalid_events_leave_state_untouched() {
        let mut c = session();
        let before_state = c.state().clone();
        let before_output = c.output();

        let err = c.dispatch(ControlEvent::BinWidthChanged(0.0)).unwrap_err();
        assert!(matches!(err, HistError::InvalidBinSpec { .. }));

        let err = c
            .dispatch(ControlEvent::RangeChanged { start: 5.0, end: 5.0 })
            .unwrap_err();
        assert!(matches!(err, HistError::InvalidBinSpec { .. }));

        let err = c
            .dispatch(ControlEvent::ValueColumnChanged("missing".to_string()))
            .unwrap_err();
        assert!(matches!(err, HistError::ColumnNotFound { .. }));

        let err = c
            .dispatch(ControlEvent::CategoryToggled {
                label: "WN".to_string(),
                active: true,
            })
            .unwrap_err();
        assert!(matches!(err, HistError::UnknownCategory { .. }));

        assert_eq!(c.state(), &before_state);
        assert!(Arc::ptr_eq(&before_output, &c.output()));
        assert_eq!(c.generation(), 1);
    }

    #[test]
    fn test_range_outside_data_gives_zero_fallback() {
        let mut c = session();
        let table = c
            .dispatch(ControlEvent::RangeChanged {
                start: 500.0,
                end: 600.0,
            })
            .unwrap();

        assert!(table.rows().iter().all(|r| r.proportion == 0.0));
        assert_eq!(table.empty_categories().len(), 3);
    }

    #[test]
    fn test_bin_width_change_keeps_range_and_selection() {
        let mut c = session();
        let table = c.dispatch(ControlEvent::BinWidthChanged(60.0)).unwrap();

        assert_eq!(table.rows_for("UA").count(), 2);
        assert_eq!((c.state().range_start, c.state().range_end), (-10.0, 110.0));
        assert_eq!(c.state().selected_categories.len(), 3);
    }

    #[test]
    fn test_bin_width_bounds() {
        let c = session();
        // six rows: floor(sqrt(6)) = 2
        assert_eq!(suggested_bin_width(6), 2.0);
        assert_eq!(c.bin_width_bounds(), (1.0, 17.0));
        assert_eq!(suggested_bin_width(0), 1.0);
        assert_eq!(suggested_bin_width(10_000), 100.0);
    }
}
