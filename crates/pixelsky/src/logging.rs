//! Optional file logging.
//!
//! The terminal belongs to the UI, so logs go to a file and only when
//! `PIXELSKY_LOG` is set (it takes `RUST_LOG` style directives).

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PIXELSKY_LOG";

pub fn init() -> color_eyre::Result<()> {
    let Ok(directives) = std::env::var(LOG_ENV) else {
        return Ok(());
    };
    let path = pixelsky_config::log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    tracing::info!(path = %path.display(), "logging enabled");
    Ok(())
}
