//! Terminal UI for the story map
//!
//! A thin shell over [`storymap_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic
//! [`storymap_app::Runtime`].
//!
//! This crate handles terminal rendering, command-line configuration and
//! log setup for the binary.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod demo;
pub mod logging;
pub mod markup;
pub mod terminal;
pub mod ui;

pub use config::{Args, ClientConfig, ConfigError, LogConfig};
pub use storymap_app::{App, AppAction, AppEvent, Bridge, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
