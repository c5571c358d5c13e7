//! Story map page: every story of one theme room.

use storymap_client::RequestError;
use storymap_core::{CreateContext, Story, StoryType, ThemeRoomId};

use crate::{AppAction, Remote, RequestId, RequestIds};

/// Message shown when the room listing fails.
pub const ROOM_FAILED: &str = "Unable to fetch theme room stories";

/// State of the story map page.
#[derive(Debug, Clone)]
pub struct StoryMapPage {
    theme_room_id: ThemeRoomId,
    stories: Remote<Vec<Story>>,
    selected: usize,
}

impl StoryMapPage {
    /// Page for `theme_room_id`. Nothing is fetched until [`Self::begin`].
    pub fn new(theme_room_id: ThemeRoomId) -> Self {
        Self { theme_room_id, stories: Remote::Idle, selected: 0 }
    }

    /// Request the room listing. Supersedes any listing still in flight.
    pub fn begin(&mut self, ids: &mut RequestIds) -> AppAction {
        let request = ids.next_id();
        tracing::debug!(%request, room = %self.theme_room_id, "loading theme room");
        self.stories = Remote::Loading { request };
        self.selected = 0;
        AppAction::FetchRoomStories { request, theme_room_id: self.theme_room_id.clone() }
    }

    /// Apply a room listing. Returns false if `request` is stale.
    pub fn resolve(&mut self, request: RequestId, result: Result<Vec<Story>, RequestError>) -> bool {
        if !self.stories.is_waiting_for(request) {
            tracing::debug!(%request, room = %self.theme_room_id, "discarding stale room response");
            return false;
        }

        self.stories = match result {
            Ok(stories) => Remote::Ready(stories),
            Err(err) => {
                tracing::warn!(%request, room = %self.theme_room_id, error = %err, "room fetch failed");
                Remote::Failed(ROOM_FAILED.to_string())
            },
        };
        self.selected = 0;
        true
    }

    /// Room shown.
    pub fn theme_room_id(&self) -> &ThemeRoomId {
        &self.theme_room_id
    }

    /// Listing state.
    pub fn stories(&self) -> &Remote<Vec<Story>> {
        &self.stories
    }

    /// Index of the highlighted story.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Highlighted story, if the listing is shown.
    pub fn selected_story(&self) -> Option<&Story> {
        self.stories.ready()?.get(self.selected)
    }

    /// Number of root stories in the listing.
    pub fn root_count(&self) -> usize {
        self.stories
            .ready()
            .map_or(0, |stories| stories.iter().filter(|s| s.story_type == StoryType::Root).count())
    }

    /// Context for starting a new narrative in this room.
    pub fn new_root_context(&self) -> CreateContext {
        CreateContext::root(self.theme_room_id.clone())
    }

    /// Move the highlight down, wrapping.
    pub fn select_next(&mut self) {
        let len = self.stories.ready().map_or(0, Vec::len);
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the highlight up, wrapping.
    pub fn select_prev(&mut self) {
        let len = self.stories.ready().map_or(0, Vec::len);
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }
}
