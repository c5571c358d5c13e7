//! API-to-Application translation layer.
//!
//! The [`Bridge`] wraps a [`StoryApi`] and adapts it to the application
//! lifecycle.
//!
//! # Responsibilities
//!
//! - Converts API-bound [`crate::AppAction`]s into story API calls.
//! - Converts each call's result back into the [`crate::AppEvent`] that
//!   answers it, tagged with the action's request id.
//! - Logs outcomes; errors are handed to the app, never propagated.

use storymap_client::StoryApi;

use crate::{AppAction, AppEvent};

/// Bridge between App actions and the story API.
///
/// Cheap to clone: the runtime hands a clone to every in-flight request.
#[derive(Clone)]
pub struct Bridge<A: StoryApi> {
    api: A,
}

impl<A: StoryApi> Bridge<A> {
    /// Bridge over `api`.
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Underlying API.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Execute an API action and return the event that answers it.
    ///
    /// Returns `None` for actions that do not touch the API.
    pub async fn execute(&self, action: AppAction) -> Option<AppEvent> {
        match action {
            AppAction::CreateStory { request, draft } => {
                tracing::debug!(%request, title = %draft.title, "create story");
                let result = self.api.create_story(draft).await;
                if let Err(err) = &result {
                    tracing::warn!(%request, error = %err, "create story failed");
                }
                Some(AppEvent::StoryCreated { request, result })
            },
            AppAction::FetchNeighbors { request, ids } => {
                tracing::debug!(%request, count = ids.len(), "fetch filtered stories");
                let result = self.api.fetch_filtered_stories(ids).await;
                if let Err(err) = &result {
                    tracing::warn!(%request, error = %err, "fetch filtered stories failed");
                }
                Some(AppEvent::NeighborsResolved { request, result })
            },
            AppAction::FetchRoomStories { request, theme_room_id } => {
                tracing::debug!(%request, room = %theme_room_id, "fetch theme room stories");
                let result = self.api.fetch_theme_room_stories(theme_room_id).await;
                if let Err(err) = &result {
                    tracing::warn!(%request, error = %err, "fetch theme room stories failed");
                }
                Some(AppEvent::RoomStoriesLoaded { request, result })
            },
            AppAction::Render | AppAction::Quit => None,
        }
    }
}
