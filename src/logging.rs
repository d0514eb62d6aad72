use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub(crate) const LOG_ENV: &str = "YOJITSU_LOG";
const DEFAULT_FILTER: &str = "info";

/// Route `tracing` output to a log file, since the terminal belongs to the UI.
///
/// Logging is best effort: if the file cannot be opened the app runs without it.
pub(crate) fn init(log_path: Option<&Path>) {
    let Some(path) = log_path else {
        return;
    };
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return,
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    tracing::info!("yojitsu v{} starting", env!("CARGO_PKG_VERSION"));
}
