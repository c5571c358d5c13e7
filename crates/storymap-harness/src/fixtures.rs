//! Story graph fixtures.
//!
//! [`StoryGraph`] builds seeded stores with mirrored edges, so tests state
//! the shape of a graph instead of hand-writing both ends of every link.

use storymap_client::MemoryStoryApi;
use storymap_core::{AuthorId, Story, StoryId, StoryType, ThemeRoomId};

/// Builder for a linked set of stories in one theme room.
///
/// ```ignore
/// let store = StoryGraph::new("room-1").root("a").child("b", &["a"]).store();
/// ```
#[derive(Debug, Clone)]
pub struct StoryGraph {
    room: ThemeRoomId,
    stories: Vec<Story>,
}

impl StoryGraph {
    /// Empty graph whose stories all live in `room`.
    pub fn new(room: impl Into<ThemeRoomId>) -> Self {
        Self { room: room.into(), stories: Vec::new() }
    }

    /// Add a root story.
    #[must_use]
    pub fn root(self, id: &str) -> Self {
        self.push(id, &[])
    }

    /// Add a child of `parents`, linking each parent's `next` back to it.
    ///
    /// Parents not yet in the graph are kept in `prev` but get no back-link.
    #[must_use]
    pub fn child(self, id: &str, parents: &[&str]) -> Self {
        self.push(id, parents)
    }

    fn push(mut self, id: &str, parents: &[&str]) -> Self {
        let id = StoryId::new(id);
        let prev: Vec<StoryId> = parents.iter().map(|&p| StoryId::new(p)).collect();

        for parent in self.stories.iter_mut().filter(|s| prev.contains(&s.id)) {
            parent.next.push(id.clone());
        }

        self.stories.push(Story {
            title: format!("Story {id}"),
            content: format!("<p>Text of {id}</p>"),
            story_type: if prev.is_empty() { StoryType::Root } else { StoryType::Child },
            theme_room_id: self.room.clone(),
            prev,
            next: Vec::new(),
            author_id: AuthorId::new("fixture"),
            id,
        });
        self
    }

    /// Story by id.
    pub fn get(&self, id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.id.as_str() == id)
    }

    /// The stories, in insertion order.
    pub fn build(self) -> Vec<Story> {
        self.stories
    }

    /// An in-memory store seeded with the graph.
    pub fn store(self) -> MemoryStoryApi {
        MemoryStoryApi::with_stories(self.stories)
    }
}
