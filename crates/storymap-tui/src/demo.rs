//! Offline demo store.

use storymap_client::MemoryStoryApi;
use storymap_core::{AuthorId, Story, StoryId, StoryType, ThemeRoomId};

/// Room the sidebar's story map entry opens.
pub const DEMO_ROOM: &str = "1";

/// In-memory store holding a small branching narrative in [`DEMO_ROOM`].
///
/// ```text
/// lighthouse ─┬─> storm ──> rescue
///             └─> letter ─┘
/// ```
pub fn seeded_store() -> MemoryStoryApi {
    let story = |id: &str, title: &str, body: &str, prev: &[&str], next: &[&str]| Story {
        id: StoryId::new(id),
        title: title.to_owned(),
        content: body.to_owned(),
        story_type: if prev.is_empty() { StoryType::Root } else { StoryType::Child },
        theme_room_id: ThemeRoomId::new(DEMO_ROOM),
        prev: prev.iter().map(|&p| StoryId::new(p)).collect(),
        next: next.iter().map(|&n| StoryId::new(n)).collect(),
        author_id: AuthorId::new("demo"),
    };

    MemoryStoryApi::with_stories([
        story(
            "lighthouse",
            "The Lighthouse",
            "<p>The keeper lit the lamp for the <strong>last</strong> time.</p>",
            &[],
            &["storm", "letter"],
        ),
        story(
            "storm",
            "The Storm",
            "<p>Wind took the shutters.</p><br><p>Then the glass.</p>",
            &["lighthouse"],
            &["rescue"],
        ),
        story(
            "letter",
            "The Letter",
            "<p>A letter arrived, <em>unsigned</em>.</p><ul><li>no stamp</li><li>no date</li></ul>",
            &["lighthouse"],
            &["rescue"],
        ),
        story(
            "rescue",
            "The Rescue",
            "<h2>Morning</h2><p>Boats came at first light.</p>",
            &["storm", "letter"],
            &[],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_graph_is_mirrored() {
        let store = seeded_store();
        let stories = store.stories();
        assert_eq!(stories.len(), 4);
        for story in &stories {
            for next in &story.next {
                assert!(store.get(next).unwrap().follows(&story.id));
            }
        }
    }
}
