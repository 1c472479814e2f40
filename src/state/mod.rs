//! Application state management
//!
//! Histogram inputs live in an immutable [`ControlState`] owned by the
//! session [`Controller`]; everything else here is presentation state.

mod controller;
mod controls;
mod ui;
mod view;

pub use controller::{ControlDefaults, Controller};
pub use controls::{ControlEvent, ControlState};
pub use ui::UiState;
pub use view::ViewState;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::files::MAX_RECENT_FILES;
use crate::data::DataSource;
use crate::error::Result;

/// Main application state container
#[derive(Default)]
pub struct AppState {
    /// Current session; `None` until a dataset is loaded
    pub session: Option<Controller>,

    /// View and visualization state
    pub view: ViewState,

    /// UI interaction state
    pub ui: UiState,

    /// Currently loaded file path
    pub current_file: Option<PathBuf>,

    /// Recently opened files
    pub recent_files: Vec<PathBuf>,
}

impl AppState {
    /// Load `path` and start a fresh session over it.
    /// The previous session is dropped only when the new one starts cleanly.
    pub fn open(&mut self, path: &Path, defaults: ControlDefaults) -> Result<()> {
        let source = Arc::new(DataSource::load(path)?);
        let session = Controller::new(source, defaults)?;
        self.start_session(session, path.to_path_buf());
        Ok(())
    }

    /// Install a session built elsewhere (e.g. at startup)
    pub fn start_session(&mut self, session: Controller, path: PathBuf) {
        self.session = Some(session);
        self.remember_file(path.clone());
        self.current_file = Some(path);
        self.view.reset_plot_bounds();
        self.ui.clear_error();
    }

    /// Forward an event to the session, recording any error for display
    pub fn dispatch(&mut self, event: ControlEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.dispatch(event) {
            Ok(_) => {
                self.ui.clear_error();
                self.view.reset_plot_bounds();
            }
            Err(e) => self.ui.set_error(&e),
        }
    }

    /// Check if data is loaded
    pub fn has_data(&self) -> bool {
        self.session.is_some()
    }

    fn remember_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }
}
