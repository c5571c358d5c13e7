//! Command-line and environment configuration.
//!
//! [`Args`] is what clap parses; [`ClientConfig`] is the validated form the
//! rest of the binary works with.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use storymap_app::Route;
use storymap_client::ApiConfig;
use storymap_core::AuthorId;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The API URL is not an http(s) URL.
    #[error("invalid API URL {0:?}: expected http:// or https://")]
    InvalidUrl(String),

    /// The author id is empty.
    #[error("author id must not be empty")]
    EmptyAuthor,

    /// The start path names no page.
    #[error("unknown start route {0:?}")]
    UnknownRoute(String),

    /// A timeout of zero seconds.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Story map terminal client
#[derive(Parser, Debug, Clone)]
#[command(name = "storymap-tui")]
#[command(about = "Browse and write collaborative story maps from the terminal")]
#[command(version)]
pub struct Args {
    /// Base URL of the story service
    ///
    /// If not provided, runs in demo mode against an in-memory store.
    #[arg(short, long, env = "STORYMAP_API_URL")]
    pub server: Option<String>,

    /// Author id attached to created stories
    #[arg(short, long, env = "STORYMAP_AUTHOR_ID", default_value = "guest")]
    pub author: String,

    /// Path of the page to open first
    #[arg(short, long, default_value = "/")]
    pub route: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Log level (trace, debug, info, warn, error), overridden by STORYMAP_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// File to write logs to; logs are discarded without one
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Fallback filter directive when `STORYMAP_LOG` is unset.
    pub level: String,
    /// Destination file. `None` discards logs.
    pub file: Option<PathBuf>,
}

/// Validated client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Remote story service. `None` runs the in-memory demo store.
    pub api: Option<ApiConfig>,
    /// Author of created stories.
    pub author_id: AuthorId,
    /// First page shown.
    pub start_route: Route,
    /// Logging settings.
    pub log: LogConfig,
}

impl TryFrom<Args> for ClientConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if args.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let api = match args.server {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => Some(
                ApiConfig::new(url).with_request_timeout(Duration::from_secs(args.timeout)),
            ),
            Some(url) => return Err(ConfigError::InvalidUrl(url)),
            None => None,
        };

        let author = args.author.trim();
        if author.is_empty() {
            return Err(ConfigError::EmptyAuthor);
        }

        let start_route =
            Route::parse(&args.route).ok_or_else(|| ConfigError::UnknownRoute(args.route.clone()))?;

        Ok(Self {
            api,
            author_id: AuthorId::new(author),
            start_route,
            log: LogConfig { level: args.log_level, file: args.log_file },
        })
    }
}

impl ClientConfig {
    /// True if no remote service is configured.
    pub fn is_demo(&self) -> bool {
        self.api.is_none()
    }
}

#[cfg(test)]
mod tests {
    use storymap_core::ThemeRoomId;

    use super::*;

    fn parse(argv: &[&str]) -> Result<ClientConfig, ConfigError> {
        let mut full = vec!["storymap-tui"];
        full.extend_from_slice(argv);
        ClientConfig::try_from(Args::try_parse_from(full).unwrap())
    }

    #[test]
    fn server_enables_remote_mode() {
        let config = parse(&["--server", "http://localhost:5000/api/", "--timeout", "5"]).unwrap();
        let api = config.api.unwrap();
        assert_eq!(api.base_url, "http://localhost:5000/api");
        assert_eq!(api.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn start_route_is_parsed() {
        let config = parse(&["--server", "https://x", "--route", "/story-map/7"]).unwrap();
        assert_eq!(config.start_route, Route::StoryMap(ThemeRoomId::new("7")));
        assert!(!config.is_demo());
    }

    #[test]
    fn rejects_non_http_url() {
        assert_eq!(
            parse(&["--server", "ftp://x"]),
            Err(ConfigError::InvalidUrl("ftp://x".into()))
        );
    }

    #[test]
    fn rejects_blank_author() {
        assert_eq!(parse(&["--author", "  "]), Err(ConfigError::EmptyAuthor));
    }

    #[test]
    fn rejects_unknown_route() {
        assert_eq!(parse(&["--route", "/nowhere"]), Err(ConfigError::UnknownRoute("/nowhere".into())));
    }

    #[test]
    fn rejects_zero_timeout() {
        assert_eq!(parse(&["--timeout", "0"]), Err(ConfigError::ZeroTimeout));
    }
}
