//! Tracing setup. The terminal belongs to the UI, so logs go to a file.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, appending to `path`.
pub fn init(path: &Path, filter: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter `{filter}`"))?;

    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .compact()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_filter() {
        let dir = tempfile::tempdir().unwrap();
        let err = init(&dir.path().join("x.log"), "market_agent=loud").unwrap_err();
        assert!(err.to_string().contains("invalid log filter"));
    }
}
