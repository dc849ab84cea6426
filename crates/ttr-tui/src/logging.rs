use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ttr-calc")
        .join("ttr-tui.log")
}

/// Send tracing output to a file; the terminal belongs to the UI.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init(path: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()?;

    Ok(path)
}
