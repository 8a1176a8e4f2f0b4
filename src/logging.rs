use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::error::{ReflexError, Result};

/// Environment variable holding the log filter, e.g. `REFLEX_LOG=debug`.
pub const LOG_ENV: &str = "REFLEX_LOG";

/// Installs the global subscriber, appending to `path`.
///
/// The terminal UI owns stdout, so logs only ever go to the file.
pub fn init(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(|_| ReflexError::LoggingInit)
}
