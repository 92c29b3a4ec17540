//! Tracing subscriber setup
//!
//! The interactive UI owns the terminal, so its logs go to a file in the
//! cache directory. One-shot modes log to stderr. `RUST_LOG` overrides the
//! default filter in every mode.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Disabled,
}

impl LogTarget {
    /// Log file in the platform cache directory, or nothing if there is none
    pub fn default_file() -> Self {
        ProjectDirs::from("", "", "cityforecast")
            .map(|dirs| Self::File(dirs.cache_dir().join("cityforecast.log")))
            .unwrap_or(Self::Disabled)
    }
}

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install the global subscriber
pub fn init(target: LogTarget, default_filter: &str) -> std::io::Result<()> {
    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(default_filter))
                .with_writer(std::io::stderr)
                .init();
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(default_filter))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        LogTarget::Disabled => {}
    }

    tracing::debug!("logging initialized");
    Ok(())
}
