//! Story API client
//!
//! The sole boundary between the story map UI and the remote story store.
//! Every operation is asynchronous and fallible with [`RequestError`]; none
//! of them leaves partial results behind on failure.
//!
//! # Components
//!
//! - [`StoryApi`]: the client interface
//! - [`MemoryStoryApi`]: arena store keyed by story id, for tests and demo
//!   mode
//! - [`ChaoticStoryApi`]: wrapper that injects request failures
//!
//! # Transport (optional)
//!
//! With the `transport` feature enabled, this crate also provides
//! [`transport::HttpStoryApi`], a REST client for a real story service.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod api;
mod chaotic;
mod config;
mod error;
mod memory;

#[cfg(feature = "transport")]
pub mod transport;

pub use api::StoryApi;
pub use chaotic::ChaoticStoryApi;
pub use config::ApiConfig;
pub use error::RequestError;
pub use memory::MemoryStoryApi;
pub use storymap_core::{Story, StoryDraft, StoryId, ThemeRoomId};
