//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use storymap_core::{StoryDraft, StoryId, ThemeRoomId};

use crate::RequestId;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Persist a new story.
    CreateStory {
        /// Id the completion must carry.
        request: RequestId,
        /// Story to persist.
        draft: StoryDraft,
    },

    /// Resolve the neighbors of the story being displayed.
    FetchNeighbors {
        /// Id the completion must carry.
        request: RequestId,
        /// `prev` followed by `next` of the subject story.
        ids: Vec<StoryId>,
    },

    /// Load every story of a theme room.
    FetchRoomStories {
        /// Id the completion must carry.
        request: RequestId,
        /// Room to list.
        theme_room_id: ThemeRoomId,
    },
}

impl AppAction {
    /// True for actions that call the story API.
    pub fn is_request(&self) -> bool {
        self.request_id().is_some()
    }

    /// Request id of an API action.
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            Self::CreateStory { request, .. }
            | Self::FetchNeighbors { request, .. }
            | Self::FetchRoomStories { request, .. } => Some(*request),
            Self::Render | Self::Quit => None,
        }
    }
}
