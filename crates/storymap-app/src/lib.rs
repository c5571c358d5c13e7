//! Application layer for the story map
//!
//! Pure state machines and generic runtime for navigation, story display and
//! story creation, enabling deterministic simulation testing with the same
//! code that runs in the terminal.
//!
//! # Components
//!
//! - [`App`]: UI state machine (routing, history, pages, sidebar)
//! - [`Page`]: per-page state; story display, story map, creation form
//! - [`Composer`]: block-based rich-text editor with [`FormatCommand`]s
//! - [`Bridge`]: executes App actions against a story API
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver and Bridge

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod composer;
mod driver;
mod event;
mod input;
mod pages;
mod route;
mod runtime;
mod sidebar;
mod state;

pub use action::AppAction;
pub use app::App;
pub use bridge::Bridge;
pub use composer::{Block, BlockKind, Composer, FormatCommand};
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use pages::{
    CREATE_FAILED, CreateStoryPage, FormField, HomePage, NEIGHBORS_FAILED, NOT_FOUND, Page,
    ROOM_FAILED, StoryMapPage, StoryPage, Submission,
};
pub use route::{History, NavEntry, NavState, Route};
pub use runtime::Runtime;
pub use sidebar::{Sidebar, SidebarItem};
pub use state::{Remote, RequestId, RequestIds, Session};
