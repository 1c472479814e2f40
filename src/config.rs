//! Startup configuration
//!
//! A small JSON document naming the dataset and, optionally, the initial
//! control choices:
//!
//! ```json
//! { "file_path": "flights.csv", "category_column": "carrier", "bin_width": 5 }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HistError, Result};
use crate::state::{ControlDefaults, ControlState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Dataset to open, relative paths resolve against the working directory
    pub file_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
}

impl AppConfig {
    /// Read and parse a config file.
    ///
    /// Every failure is reported as [`HistError::Config`] so startup can
    /// treat them uniformly.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            HistError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let config: AppConfig = serde_json::from_str(&contents).map_err(|e| {
            HistError::Config(format!("cannot parse '{}': {}", path.display(), e))
        })?;

        if config.file_path.as_os_str().is_empty() {
            return Err(HistError::Config(format!(
                "'{}' has an empty file_path",
                path.display()
            )));
        }

        tracing::debug!(config = %path.display(), file = %config.file_path.display(), "config loaded");
        Ok(config)
    }

    /// Snapshot of a running session, suitable for writing back to disk
    pub fn from_session(file_path: PathBuf, state: &ControlState, dark_mode: bool) -> Self {
        Self {
            file_path,
            category_column: Some(state.category_column.clone()),
            value_column: Some(state.value_column.clone()),
            bin_width: Some(state.bin_width),
            dark_mode: Some(dark_mode),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Initial control choices for [`Controller::new`](crate::state::Controller::new)
    pub fn to_defaults(&self) -> ControlDefaults {
        ControlDefaults {
            category_column: self.category_column.clone(),
            value_column: self.value_column.clone(),
            bin_width: self.bin_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_minimal_config() {
        let file = write_config(r#"{ "file_path": "flights.csv" }"#);
        let config = AppConfig::load(file.path()).unwrap();

        assert_eq!(config.file_path, PathBuf::from("flights.csv"));
        assert!(config.category_column.is_none());
        assert!(config.dark_mode.is_none());

        let defaults = config.to_defaults();
        assert!(defaults.value_column.is_none());
        assert!(defaults.bin_width.is_none());
    }

    #[test]
    fn test_full_config() {
        let file = write_config(
            r#"{
                "file_path": "data/flights.parquet",
                "category_column": "carrier",
                "value_column": "arr_delay",
                "bin_width": 5,
                "dark_mode": false
            }"#,
        );
        let config = AppConfig::load(file.path()).unwrap();
        let defaults = config.to_defaults();

        assert_eq!(defaults.category_column.as_deref(), Some("carrier"));
        assert_eq!(defaults.value_column.as_deref(), Some("arr_delay"));
        assert_eq!(defaults.bin_width, Some(5.0));
        assert_eq!(config.dark_mode, Some(false));
    }

    #[test]
    fn test_missing_file_path_key() {
        let file = write_config(r#"{ "category_column": "carrier" }"#);
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, HistError::Config(_)));
        assert!(err.to_string().contains("file_path"));
    }

    #[test]
    fn test_empty_file_path() {
        let file = write_config(r#"{ "file_path": "" }"#);
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(HistError::Config(_))
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let err = AppConfig::load(Path::new("/no/such/config.json")).unwrap_err();
        assert!(matches!(err, HistError::Config(_)));
    }

    #[test]
    fn test_malformed_json() {
        let file = write_config("{ file_path: ");
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(HistError::Config(_))
        ));
    }

    #[test]
    fn test_session_snapshot_reloads() {
        let state = ControlState {
            category_column: "carrier".to_string(),
            value_column: "delay".to_string(),
            selected_categories: vec!["UA".to_string()],
            range_start: -10.0,
            range_end: 110.0,
            bin_width: 7.0,
        };
        let config = AppConfig::from_session(PathBuf::from("flights.csv"), &state, true);

        let out = NamedTempFile::new().unwrap();
        config.save(out.path()).unwrap();
        let reloaded = AppConfig::load(out.path()).unwrap();

        assert_eq!(reloaded, config);
        assert_eq!(reloaded.to_defaults().bin_width, Some(7.0));
    }
}
