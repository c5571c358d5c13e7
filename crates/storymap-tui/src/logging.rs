//! Tracing subscriber setup.
//!
//! The terminal owns stdout, so logs only go to a file. Without one no
//! subscriber is installed and every event is dropped.

use std::{fs::OpenOptions, io, sync::Mutex};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogConfig;

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "STORYMAP_LOG";

/// Filter from `STORYMAP_LOG`, falling back to `fallback`.
pub fn filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber described by `config`.
///
/// Returns `Ok(false)` if logging is disabled.
pub fn init(config: &LogConfig) -> io::Result<bool> {
    let Some(path) = &config.file else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let layer = fmt::layer().with_writer(Mutex::new(file)).with_ansi(false);

    tracing_subscriber::registry().with(layer).with(filter(&config.level)).init();
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_without_file() {
        let config = LogConfig { level: "debug".into(), file: None };
        assert!(!init(&config).unwrap());
    }
}
