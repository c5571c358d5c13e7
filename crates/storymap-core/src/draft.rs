//! Unpersisted stories and their graph linkage.
//!
//! A [`StoryDraft`] is assembled from user input plus the [`CreateContext`]
//! the creation page was opened with. Linkage is derived here, never typed
//! by the user:
//!
//! - `root_node` decides the [`StoryType`]
//! - a root draft never has predecessors
//! - a child draft has exactly the predecessor it was opened from, if any

use serde::{Deserialize, Serialize};

use crate::{AuthorId, DraftError, StoryId, StoryType, ThemeRoomId, prepare_content};

/// Navigation context handed to the creation page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContext {
    /// Story the new one continues.
    pub prev_story_id: Option<StoryId>,
    /// Theme room the new story belongs to.
    pub theme_room_id: Option<ThemeRoomId>,
    /// Start a new narrative instead of continuing one.
    #[serde(default)]
    pub root_node: bool,
}

impl CreateContext {
    /// Context for a new root story in `theme_room_id`.
    pub fn root(theme_room_id: ThemeRoomId) -> Self {
        Self { prev_story_id: None, theme_room_id: Some(theme_room_id), root_node: true }
    }

    /// Context for a story continuing `prev_story_id`.
    pub fn continuing(prev_story_id: StoryId, theme_room_id: ThemeRoomId) -> Self {
        Self {
            prev_story_id: Some(prev_story_id),
            theme_room_id: Some(theme_room_id),
            root_node: false,
        }
    }

    /// Story type a draft opened with this context gets.
    pub fn story_type(&self) -> StoryType {
        if self.root_node { StoryType::Root } else { StoryType::Child }
    }

    /// Predecessor list a draft opened with this context gets.
    pub fn prev(&self) -> Vec<StoryId> {
        match (&self.prev_story_id, self.root_node) {
            (Some(id), false) => vec![id.clone()],
            _ => Vec::new(),
        }
    }
}

/// A story as sent to the store for creation.
///
/// Has no id; the store assigns one. `next` is absent because successors
/// only appear when later stories link back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDraft {
    /// Display title.
    pub title: String,
    /// Sanitized HTML body.
    pub content: String,
    /// Root or child.
    #[serde(rename = "type")]
    pub story_type: StoryType,
    /// Theme room the story belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_room_id: Option<ThemeRoomId>,
    /// Stories this one directly follows.
    pub prev: Vec<StoryId>,
    /// Creating user.
    pub author_id: AuthorId,
}

impl StoryDraft {
    /// Compose a draft from user input and navigation context.
    ///
    /// `body` is raw composer HTML; it is sanitized and paragraph spacing is
    /// normalized before it lands in the draft.
    pub fn compose(
        title: impl Into<String>,
        body: &str,
        context: &CreateContext,
        author_id: AuthorId,
    ) -> Result<Self, DraftError> {
        let story_type = context.story_type();
        if story_type == StoryType::Child && context.theme_room_id.is_none() {
            return Err(DraftError::MissingThemeRoom);
        }

        Ok(Self {
            title: title.into(),
            content: prepare_content(body),
            story_type,
            theme_room_id: context.theme_room_id.clone(),
            prev: context.prev(),
            author_id,
        })
    }
}
