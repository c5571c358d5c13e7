//! Reference model of the story graph.
//!
//! The model tracks stories by creation index and applies each
//! [`Operation`] with plain vectors, no ids and no network. Model-based
//! tests apply the same operations to the real App and store and compare
//! the resulting [`ObservableGraph`]s.

use std::collections::HashMap;

use storymap_core::{Story, StoryId, StoryType};

/// Operation a user performs on the story graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Start a new root story in room `room`.
    CreateRoot {
        /// Room number; the real room id is [`room_name`] of it.
        room: u8,
    },
    /// Continue the story created at index `parent`.
    ///
    /// A no-op if no such story exists yet.
    Continue {
        /// Creation index of the story being continued.
        parent: usize,
    },
}

/// Room id used for model room number `room`.
pub fn room_name(room: u8) -> String {
    format!("room-{room}")
}

/// One story as the model sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStory {
    /// Room the story lives in.
    pub room: String,
    /// Root or child.
    pub story_type: StoryType,
    /// Creation indices of predecessors.
    pub prev: Vec<usize>,
    /// Creation indices of successors.
    pub next: Vec<usize>,
}

/// Observable graph state: every story, in creation order.
pub type ObservableGraph = Vec<ModelStory>;

/// Reference implementation of story creation and linking.
#[derive(Debug, Clone, Default)]
pub struct ModelGraph {
    stories: Vec<ModelStory>,
}

impl ModelGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `op`. Returns the index of the created story, if any.
    pub fn apply(&mut self, op: Operation) -> Option<usize> {
        let index = self.stories.len();
        let story = match op {
            Operation::CreateRoot { room } => ModelStory {
                room: room_name(room),
                story_type: StoryType::Root,
                prev: Vec::new(),
                next: Vec::new(),
            },
            Operation::Continue { parent } => {
                let parent_story = self.stories.get_mut(parent)?;
                parent_story.next.push(index);
                ModelStory {
                    room: parent_story.room.clone(),
                    story_type: StoryType::Child,
                    prev: vec![parent],
                    next: Vec::new(),
                }
            },
        };
        self.stories.push(story);
        Some(index)
    }

    /// Number of stories.
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// True if no story exists.
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Observable state of the model.
    pub fn observable(&self) -> ObservableGraph {
        self.stories.clone()
    }
}

/// Observable state of real stories listed in creation order.
///
/// Edges to stories outside `stories` are dropped.
pub fn observe(stories: &[Story]) -> ObservableGraph {
    let index: HashMap<&StoryId, usize> =
        stories.iter().enumerate().map(|(i, s)| (&s.id, i)).collect();
    let indices = |ids: &[StoryId]| -> Vec<usize> {
        ids.iter().filter_map(|id| index.get(id).copied()).collect()
    };

    stories
        .iter()
        .map(|story| ModelStory {
            room: story.theme_room_id.as_str().to_owned(),
            story_type: story.story_type,
            prev: indices(&story.prev),
            next: indices(&story.next),
        })
        .collect()
}
