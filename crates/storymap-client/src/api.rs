//! Story API trait.

use std::future::Future;

use storymap_core::{Story, StoryDraft, StoryId, ThemeRoomId};

use crate::RequestError;

/// Asynchronous interface to the story store.
///
/// Must be Clone (the app runtime hands a clone to every in-flight request),
/// Send + Sync, and `'static`. Implementations typically share their
/// connection or store via Arc, so clones talk to the same backend.
///
/// # Implementations
///
/// - **Memory**: [`crate::MemoryStoryApi`], arena store in process
/// - **Chaos**: [`crate::ChaoticStoryApi`], fault injection over another API
/// - **HTTP**: `transport::HttpStoryApi`, REST client (feature `transport`)
pub trait StoryApi: Clone + Send + Sync + 'static {
    /// Persist a draft and return the stored story with its new id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the request does not complete or the
    /// store rejects the draft. Nothing is persisted on error.
    fn create_story(
        &self,
        draft: StoryDraft,
    ) -> impl Future<Output = Result<Story, RequestError>> + Send;

    /// Resolve `ids` to the stories that exist.
    ///
    /// `ids` may hold duplicates; each existing story is returned once.
    /// Unknown ids are skipped. An empty `ids` resolves to an empty list
    /// without contacting the store.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] on transport or store failure. Partial
    /// results are never returned.
    fn fetch_filtered_stories(
        &self,
        ids: Vec<StoryId>,
    ) -> impl Future<Output = Result<Vec<Story>, RequestError>> + Send;

    /// Every story in a theme room.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] on transport or store failure.
    fn fetch_theme_room_stories(
        &self,
        theme_room_id: ThemeRoomId,
    ) -> impl Future<Output = Result<Vec<Story>, RequestError>> + Send;
}
