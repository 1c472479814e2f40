#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::FmtSubscriber;

mod app;
mod config;
mod constants;
mod data;
mod error;
mod histogram;
mod state;
mod ui;
mod widgets;

use app::HistOxide;
use config::AppConfig;
use data::DataSource;
use error::Result;
use state::{AppState, Controller};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Interactive per-category histograms
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config naming the dataset and initial controls
    #[arg(long, default_value = constants::config::CONFIG_FILE)]
    config: PathBuf,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

/// Load the config and dataset and run the first build
fn start(cli: &Cli) -> Result<AppState> {
    let config = AppConfig::load(&cli.config)?;
    let source = Arc::new(DataSource::load(&config.file_path)?);

    let session = Controller::new(source, config.to_defaults())?;

    let mut state = AppState::default();
    if let Some(dark_mode) = config.dark_mode {
        state.view.dark_mode = dark_mode;
    }
    state.start_session(session, config.file_path);
    Ok(state)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::from(cli.log_level))
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install tracing subscriber: {e}");
    }

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = {
        puffin::set_scopes_on(true);
        let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        match puffin_http::Server::new(&addr) {
            Ok(server) => {
                tracing::info!(%addr, "puffin server listening");
                Some(server)
            }
            Err(e) => {
                error!(error = %e, "failed to start puffin server");
                None
            }
        }
    };

    let state = match start(&cli) {
        Ok(state) => state,
        Err(e) => {
            error!(config = %cli.config.display(), error = %e, "startup failed");
            return ExitCode::FAILURE;
        }
    };

    let options = eframe::NativeOptions::default();
    let result = eframe::run_native(
        "HistOxide - Category Histograms",
        options,
        Box::new(|_| Ok(Box::new(HistOxide::new(state)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "window closed with error");
            ExitCode::FAILURE
        }
    }
}
