//! Core story map types
//!
//! Pure data and functions shared by every layer of the story map client.
//! Nothing in this crate performs I/O.
//!
//! # Components
//!
//! - [`Story`], [`StoryDraft`]: the graph node and its unpersisted form
//! - [`CreateContext`]: navigation context a new story is linked from
//! - [`sanitize`]: allow-list HTML cleaning applied before storage and render
//! - [`Neighbors`]: predecessor/successor partition of resolved stories

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod draft;
mod error;
mod graph;
mod model;
mod sanitize;

pub use draft::{CreateContext, StoryDraft};
pub use error::DraftError;
pub use graph::{Neighbors, neighbor_request_ids};
pub use model::{AuthorId, Story, StoryId, StoryType, ThemeRoomId};
pub use sanitize::{format_paragraph_breaks, prepare_content, sanitize};
