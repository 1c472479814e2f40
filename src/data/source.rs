use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::constants::data::INFER_SCHEMA_ROWS;
use crate::error::{HistError, Result};

use super::stats::{self, Stats};

/// DataSource wraps the loaded polars DataFrame.
///
/// It is never mutated after construction, so sessions share it behind an `Arc`.
pub struct DataSource {
    frame: DataFrame,
    /// Original file path
    file_path: Option<PathBuf>,
}

impl DataSource {
    /// Load data from a file (CSV or Parquet)
    pub fn load(path: &Path) -> Result<Self> {
        // Surface a missing file as an I/O error instead of a polars one
        std::fs::metadata(path)?;

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| HistError::UnsupportedFormat {
                extension: String::new(),
            })?;

        let lazy = match extension.to_lowercase().as_str() {
            "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
            "csv" => LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
                .with_try_parse_dates(true)
                .finish()?,
            ext => {
                return Err(HistError::UnsupportedFormat {
                    extension: ext.to_string(),
                });
            }
        };

        let frame = lazy.collect()?;
        if frame.height() == 0 {
            return Err(HistError::EmptyDataset);
        }

        tracing::info!(
            path = %path.display(),
            rows = frame.height(),
            columns = frame.width(),
            "dataset loaded"
        );

        Ok(Self::from_dataframe(frame, Some(path.to_path_buf())))
    }

    /// Create DataSource from an already-loaded DataFrame
    pub fn from_dataframe(frame: DataFrame, path: Option<PathBuf>) -> Self {
        Self {
            frame,
            file_path: path,
        }
    }

    /// Get all column names
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Get the number of rows
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Get the number of columns
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// Get the file path
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn column_values(&self, col: &str) -> Result<&Series> {
        self.frame
            .column(col)
            .map(|c| c.as_materialized_series())
            .map_err(|_| HistError::column_not_found(col))
    }

    /// Check if a column holds text values
    pub fn is_text_column(&self, col: &str) -> bool {
        self.column_values(col)
            .map(|s| matches!(s.dtype(), DataType::String))
            .unwrap_or(false)
    }

    /// Check if a column is a datetime or date type
    pub fn is_datetime_column(&self, col: &str) -> bool {
        self.column_values(col)
            .map(|s| matches!(s.dtype(), DataType::Datetime(_, _) | DataType::Date))
            .unwrap_or(false)
    }

    /// Get a column's numeric values as Vec<f64>
    /// Nulls and unparseable values become NaN
    /// Datetime/Date columns are converted to Unix timestamps (seconds since epoch)
    pub fn column_as_f64(&self, col: &str) -> Result<Vec<f64>> {
        let series = self.column_values(col)?;

        match series.dtype() {
            DataType::Datetime(unit, _) => {
                let per_second = match unit {
                    TimeUnit::Nanoseconds => 1_000_000_000.0,
                    TimeUnit::Microseconds => 1_000_000.0,
                    TimeUnit::Milliseconds => 1_000.0,
                };
                let raw = series.cast(&DataType::Int64)?;
                return Ok(raw
                    .i64()?
                    .into_iter()
                    .map(|opt| opt.map(|ts| ts as f64 / per_second).unwrap_or(f64::NAN))
                    .collect());
            }
            DataType::Date => {
                let days = series.cast(&DataType::Int32)?;
                return Ok(days
                    .i32()?
                    .into_iter()
                    .map(|opt| opt.map(|d| d as f64 * 86400.0).unwrap_or(f64::NAN))
                    .collect());
            }
            DataType::String => {
                let strings = series.str()?;
                return Ok(strings
                    .into_iter()
                    .map(|opt| {
                        opt.and_then(|s| s.trim().parse::<f64>().ok())
                            .unwrap_or(f64::NAN)
                    })
                    .collect());
            }
            _ => {}
        }

        match series.cast(&DataType::Float64) {
            Ok(s) => Ok(s
                .f64()?
                .into_iter()
                .map(|opt| opt.unwrap_or(f64::NAN))
                .collect()),
            Err(_) => Ok(vec![f64::NAN; series.len()]),
        }
    }

    /// Get a column's values in their string form, `None` for nulls.
    /// Non-text columns go through polars' own string cast, so `1.5` stays `"1.5"`.
    pub fn column_as_labels(&self, col: &str) -> Result<Vec<Option<String>>> {
        let series = self.column_values(col)?;
        let as_text = series.cast(&DataType::String)?;
        Ok(as_text
            .str()?
            .into_iter()
            .map(|opt| opt.map(str::to_string))
            .collect())
    }

    /// Distinct non-null labels of a column, most frequent first.
    /// Ties keep the order in which the labels first appear.
    pub fn category_labels(&self, col: &str) -> Result<Vec<String>> {
        let labels = self.column_as_labels(col)?;

        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (row, label) in labels.iter().enumerate() {
            if let Some(label) = label {
                counts.entry(label.as_str()).or_insert((0, row)).0 += 1;
            }
        }

        let mut ordered: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .map(|(label, (count, first))| (label, count, first))
            .collect();
        ordered.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        Ok(ordered.into_iter().map(|(label, _, _)| label.to_string()).collect())
    }

    /// Summary statistics over the finite numeric values of a column
    pub fn value_stats(&self, col: &str) -> Result<Stats> {
        let values = self.column_as_f64(col)?;
        let stats = stats::stats_from_values(&values);
        if stats.count == 0 {
            return Err(HistError::NoNumericValues {
                column: col.to_string(),
            });
        }
        Ok(stats)
    }

    /// Columns that hold at least two distinct numeric values
    pub fn numeric_columns(&self) -> Vec<String> {
        self.column_names()
            .into_iter()
            .filter(|col| {
                self.value_stats(col)
                    .map(|s| s.max > s.min)
                    .unwrap_or(false)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn flights_csv() -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "carrier,delay,distance").unwrap();
        writeln!(file, "AA,1,100").unwrap();
        writeln!(file, "AA,2,200").unwrap();
        writeln!(file, "UA,1,300").unwrap();
        writeln!(file, "UA,2,400").unwrap();
        writeln!(file, "UA,3,500").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_datasource_csv_loading() {
        let file = flights_csv();
        let ds = DataSource::load(file.path()).unwrap();

        assert_eq!(ds.height(), 5);
        assert_eq!(ds.width(), 3);
        assert_eq!(ds.column_names(), vec!["carrier", "delay", "distance"]);
        assert_eq!(ds.file_path(), Some(file.path()));

        let delay = ds.column_as_f64("delay").unwrap();
        assert_eq!(delay, vec![1.0, 2.0, 1.0, 2.0, 3.0]);
        assert!(ds.is_text_column("carrier"));
        assert!(!ds.is_text_column("delay"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DataSource::load(Path::new("/definitely/not/here.csv"))
            .err()
            .unwrap();
        assert!(matches!(err, HistError::FileIo(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        let err = DataSource::load(file.path()).err().unwrap();
        assert!(matches!(err, HistError::UnsupportedFormat { extension } if extension == "xlsx"));
    }

    #[test]
    fn test_header_only_csv_is_empty_dataset() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "carrier,delay").unwrap();
        file.flush().unwrap();

        let err = DataSource::load(file.path()).err().unwrap();
        assert!(matches!(err, HistError::EmptyDataset));
    }

    #[test]
    fn test_unknown_column() {
        let file = flights_csv();
        let ds = DataSource::load(file.path()).unwrap();

        let err = ds.column_as_f64("arrival").err().unwrap();
        assert!(matches!(err, HistError::ColumnNotFound { column } if column == "arrival"));
    }

    #[test]
    fn test_numeric_labels_use_string_form() {
        let df = df!(
            "code" => [10i64, 20, 10],
            "ratio" => [0.5f64, 1.5, 0.5]
        )
        .unwrap();
        let ds = DataSource::from_dataframe(df, None);

        let codes = ds.column_as_labels("code").unwrap();
        assert_eq!(
            codes,
            vec![Some("10".to_string()), Some("20".to_string()), Some("10".to_string())]
        );
        let ratios = ds.category_labels("ratio").unwrap();
        assert_eq!(ratios, vec!["0.5", "1.5"]);
    }

    #[test]
    fn test_category_labels_by_descending_frequency() {
        let df = df!(
            "carrier" => [Some("B"), Some("A"), Some("A"), None, Some("C"), Some("A"), Some("C")]
        )
        .unwrap();
        let ds = DataSource::from_dataframe(df, None);

        let labels = ds.category_labels("carrier").unwrap();
        // A=3, C=2, B=1; nulls are not offered as a category
        assert_eq!(labels, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_category_label_ties_keep_first_appearance() {
        let df = df!("carrier" => ["Z", "Y", "Z", "Y", "X"]).unwrap();
        let ds = DataSource::from_dataframe(df, None);

        assert_eq!(ds.category_labels("carrier").unwrap(), vec!["Z", "Y", "X"]);
    }

    #[test]
    fn test_value_stats_and_numeric_columns() {
        let df = df!(
            "carrier" => ["A", "B", "C"],
            "delay" => [Some(-5.0f64), None, Some(15.0)],
            "flat" => [7.0f64, 7.0, 7.0]
        )
        .unwrap();
        let ds = DataSource::from_dataframe(df, None);

        let stats = ds.value_stats("delay").unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min, -5.0);
        assert_eq!(stats.max, 15.0);

        let err = ds.value_stats("carrier").err().unwrap();
        assert!(matches!(err, HistError::NoNumericValues { .. }));

        assert_eq!(ds.numeric_columns(), vec!["delay"]);
    }

    #[test]
    fn test_datetime_column_as_timestamps() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "date,value").unwrap();
        writeln!(file, "2024-01-01,10.5").unwrap();
        writeln!(file, "2024-01-02,15.3").unwrap();
        file.flush().unwrap();

        let ds = DataSource::load(file.path()).unwrap();
        assert!(ds.is_datetime_column("date"));

        let timestamps = ds.column_as_f64("date").unwrap();
        assert_eq!(timestamps, vec![1704067200.0, 1704153600.0]);
    }
}
