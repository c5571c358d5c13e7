//! In-memory story store
//!
//! Arena of stories behind a mutex, answering the same requests as the remote
//! store. Drives tests, simulation and the offline demo.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use storymap_core::{Story, StoryDraft, StoryId, ThemeRoomId};

use crate::{RequestError, StoryApi};

/// In-memory story store for testing, simulation and demo mode.
///
/// Stories live in one flat arena keyed by id; edges are id references.
/// Behaves like the remote store: assigns ids on creation, back-links each
/// new story into its predecessors' `next`, and rejects drafts that point at
/// stories it does not hold. All state is wrapped in `Arc<Mutex<>>` so clones
/// share one store. Uses `lock().expect()`, which panics if the mutex is
/// poisoned; acceptable for test and demo code.
#[derive(Clone, Default)]
pub struct MemoryStoryApi {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Arena of stories keyed by id.
    stories: HashMap<StoryId, Story>,

    /// Insertion order, for stable room listings.
    order: Vec<StoryId>,

    /// Counter behind generated ids.
    next_id: u64,

    /// Requests that reached the store.
    round_trips: usize,
}

impl MemoryStoreInner {
    fn insert(&mut self, story: Story) {
        if !self.stories.contains_key(&story.id) {
            self.order.push(story.id.clone());
        }
        self.stories.insert(story.id.clone(), story);
    }

    fn allocate_id(&mut self) -> StoryId {
        loop {
            self.next_id += 1;
            let id = StoryId::new(format!("{:024x}", self.next_id));
            if !self.stories.contains_key(&id) {
                return id;
            }
        }
    }

    fn create(&mut self, draft: StoryDraft) -> Result<Story, RequestError> {
        self.round_trips += 1;

        let theme_room_id = draft
            .theme_room_id
            .ok_or_else(|| RequestError::unprocessable("story needs a theme room"))?;

        if let Some(missing) = draft.prev.iter().find(|id| !self.stories.contains_key(*id)) {
            return Err(RequestError::unprocessable(format!("unknown predecessor {missing}")));
        }

        let id = self.allocate_id();
        for prev_id in &draft.prev {
            if let Some(prev) = self.stories.get_mut(prev_id) {
                if !prev.next.contains(&id) {
                    prev.next.push(id.clone());
                }
            }
        }

        let story = Story {
            id,
            title: draft.title,
            content: draft.content,
            story_type: draft.story_type,
            theme_room_id,
            prev: draft.prev,
            next: Vec::new(),
            author_id: draft.author_id,
        };
        self.insert(story.clone());

        tracing::debug!(id = %story.id, room = %story.theme_room_id, "story stored");
        Ok(story)
    }

    fn filtered(&mut self, ids: &[StoryId]) -> Vec<Story> {
        self.round_trips += 1;

        let mut seen = HashSet::new();
        ids.iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| self.stories.get(id).cloned())
            .collect()
    }

    fn room(&mut self, theme_room_id: &ThemeRoomId) -> Vec<Story> {
        self.round_trips += 1;

        self.order
            .iter()
            .filter_map(|id| self.stories.get(id))
            .filter(|story| &story.theme_room_id == theme_room_id)
            .cloned()
            .collect()
    }
}

impl MemoryStoryApi {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `stories` as given (links are not rewritten).
    pub fn with_stories(stories: impl IntoIterator<Item = Story>) -> Self {
        let api = Self::new();
        for story in stories {
            api.insert(story);
        }
        api
    }

    /// Insert or replace a story verbatim.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn insert(&self, story: Story) {
        self.inner.lock().expect("Mutex poisoned").insert(story);
    }

    /// Stored story by id.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn get(&self, id: &StoryId) -> Option<Story> {
        self.inner.lock().expect("Mutex poisoned").stories.get(id).cloned()
    }

    /// Number of stored stories.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("Mutex poisoned").stories.len()
    }

    /// Every stored story, in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn stories(&self) -> Vec<Story> {
        let inner = self.inner.lock().expect("Mutex poisoned");
        inner.order.iter().filter_map(|id| inner.stories.get(id)).cloned().collect()
    }

    /// True if the store holds no stories.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of requests that reached the store.
    ///
    /// Requests answered without touching the store (such as resolving an
    /// empty id list) are not counted.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn round_trips(&self) -> usize {
        self.inner.lock().expect("Mutex poisoned").round_trips
    }

    #[allow(clippy::expect_used)]
    fn create_now(&self, draft: StoryDraft) -> Result<Story, RequestError> {
        self.inner.lock().expect("Mutex poisoned").create(draft)
    }

    #[allow(clippy::expect_used)]
    fn filtered_now(&self, ids: &[StoryId]) -> Vec<Story> {
        self.inner.lock().expect("Mutex poisoned").filtered(ids)
    }

    #[allow(clippy::expect_used)]
    fn room_now(&self, theme_room_id: &ThemeRoomId) -> Vec<Story> {
        self.inner.lock().expect("Mutex poisoned").room(theme_room_id)
    }
}

impl StoryApi for MemoryStoryApi {
    async fn create_story(&self, draft: StoryDraft) -> Result<Story, RequestError> {
        self.create_now(draft)
    }

    async fn fetch_filtered_stories(&self, ids: Vec<StoryId>) -> Result<Vec<Story>, RequestError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.filtered_now(&ids))
    }

    async fn fetch_theme_room_stories(
        &self,
        theme_room_id: ThemeRoomId,
    ) -> Result<Vec<Story>, RequestError> {
        Ok(self.room_now(&theme_room_id))
    }
}
