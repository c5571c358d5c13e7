//! Story entity and identifier types.
//!
//! Stories reference each other by id only. Linked stories are resolved on
//! demand through the story API, so a [`Story`] never embeds another one and
//! always serializes as a flat record.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Raw identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id! {
    /// Store-assigned story identifier.
    StoryId
}

string_id! {
    /// Theme room identifier. A theme room is one partition of the story graph.
    ThemeRoomId
}

string_id! {
    /// Identifier of the user who wrote a story.
    AuthorId
}

/// Position of a story in its theme room's narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryType {
    /// Originates a theme room's narrative. Has no predecessor.
    Root,
    /// Continues an existing story.
    Child,
}

impl fmt::Display for StoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root"),
            Self::Child => f.write_str("child"),
        }
    }
}

/// A persisted story node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    pub id: StoryId,
    /// Display title.
    pub title: String,
    /// Sanitized HTML body.
    pub content: String,
    /// Root or child.
    #[serde(rename = "type")]
    pub story_type: StoryType,
    /// Theme room this story belongs to.
    pub theme_room_id: ThemeRoomId,
    /// Stories this one directly follows.
    #[serde(default)]
    pub prev: Vec<StoryId>,
    /// Stories that directly follow this one.
    #[serde(default)]
    pub next: Vec<StoryId>,
    /// Creating user.
    pub author_id: AuthorId,
}

impl Story {
    /// True if `prev` or `next` names this story itself.
    pub fn has_self_loop(&self) -> bool {
        self.prev.contains(&self.id) || self.next.contains(&self.id)
    }

    /// True if `id` is a direct predecessor.
    pub fn follows(&self, id: &StoryId) -> bool {
        self.prev.contains(id)
    }

    /// True if `id` is a direct successor.
    pub fn precedes(&self, id: &StoryId) -> bool {
        self.next.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story() -> Story {
        Story {
            id: "s2".into(),
            title: "Chapter 2".into(),
            content: "<p>Later.</p>".into(),
            story_type: StoryType::Child,
            theme_room_id: "room-9".into(),
            prev: vec!["s1".into()],
            next: vec![],
            author_id: "a1".into(),
        }
    }

    #[test]
    fn serializes_with_store_field_names() {
        let json = serde_json::to_value(story()).unwrap();

        assert_eq!(json["_id"], "s2");
        assert_eq!(json["type"], "child");
        assert_eq!(json["themeRoomId"], "room-9");
        assert_eq!(json["authorId"], "a1");
        assert_eq!(json["prev"][0], "s1");
    }

    #[test]
    fn missing_link_lists_default_to_empty() {
        let json = r#"{
            "_id": "s1",
            "title": "Chapter 1",
            "content": "<p>It began.</p>",
            "type": "root",
            "themeRoomId": "room-9",
            "authorId": "a1"
        }"#;

        let story: Story = serde_json::from_str(json).unwrap();
        assert_eq!(story.story_type, StoryType::Root);
        assert!(story.prev.is_empty());
        assert!(story.next.is_empty());
    }

    #[test]
    fn self_loop_detected() {
        let mut s = story();
        assert!(!s.has_self_loop());

        s.prev.push("s2".into());
        assert!(s.has_self_loop());
    }
}
