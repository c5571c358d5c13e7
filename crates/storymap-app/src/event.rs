//! Application input events.
//!
//! This module defines [`AppEvent`], the complete set of inputs that drive
//! the [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (Keyboard, Resize, Navigate) and system ticks.
//! - Story API completions delivered by the [`crate::Bridge`], each tagged
//!   with the [`RequestId`] it answers.

use storymap_client::RequestError;
use storymap_core::Story;

use crate::{KeyInput, NavState, RequestId, Route};

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Open a page.
    Navigate {
        /// Page to open.
        route: Route,
        /// State handed to the page.
        state: NavState,
    },

    /// Step back to the previous page.
    Back,

    /// Story creation finished.
    StoryCreated {
        /// Request this answers.
        request: RequestId,
        /// Stored story or failure.
        result: Result<Story, RequestError>,
    },

    /// Neighbor resolution finished.
    NeighborsResolved {
        /// Request this answers.
        request: RequestId,
        /// Resolved stories or failure.
        result: Result<Vec<Story>, RequestError>,
    },

    /// Theme room listing finished.
    RoomStoriesLoaded {
        /// Request this answers.
        request: RequestId,
        /// Room stories or failure.
        result: Result<Vec<Story>, RequestError>,
    },
}
