//! Story display page.
//!
//! Shows one story handed over through navigation state and resolves its
//! immediate neighbors. Each mount runs `Idle → Loading → {Ready, Failed}`
//! once; traversal to a neighbor is a fresh navigation with a fresh page.

use storymap_client::RequestError;
use storymap_core::{Neighbors, Story, neighbor_request_ids, sanitize};

use crate::{AppAction, Remote, RequestId, RequestIds};

/// Message shown when neighbor resolution fails.
pub const NEIGHBORS_FAILED: &str = "Unable to fetch related stories";

/// Message shown when the page was opened without a story.
pub const NOT_FOUND: &str = "No story found";

/// State of the story display page.
#[derive(Debug, Clone)]
pub struct StoryPage {
    subject: Option<Story>,
    /// Sanitized body of `subject`; empty when there is none.
    content: String,
    neighbors: Remote<Neighbors>,
    selected: usize,
}

impl StoryPage {
    /// Page for `subject`. Nothing is fetched until [`Self::begin`].
    pub fn new(subject: Option<Story>) -> Self {
        let content = subject.as_ref().map(|s| sanitize(&s.content)).unwrap_or_default();
        Self { subject, content, neighbors: Remote::Idle, selected: 0 }
    }

    /// Start neighbor resolution.
    ///
    /// Without a subject nothing is requested. A subject without links is
    /// settled immediately with empty partitions.
    pub fn begin(&mut self, ids: &mut RequestIds) -> Option<AppAction> {
        let story = self.subject.as_ref()?;

        let request_ids = neighbor_request_ids(story);
        if request_ids.is_empty() {
            self.neighbors = Remote::Ready(Neighbors::default());
            return None;
        }

        let request = ids.next_id();
        tracing::debug!(%request, story = %story.id, count = request_ids.len(), "resolving neighbors");
        self.neighbors = Remote::Loading { request };
        Some(AppAction::FetchNeighbors { request, ids: request_ids })
    }

    /// Apply a neighbor resolution. Returns false if `request` is stale.
    pub fn resolve(&mut self, request: RequestId, result: Result<Vec<Story>, RequestError>) -> bool {
        let Some(story) = self.subject.as_ref() else {
            return false;
        };
        if !self.neighbors.is_waiting_for(request) {
            tracing::debug!(%request, story = %story.id, "discarding stale neighbor response");
            return false;
        }

        self.neighbors = match result {
            Ok(resolved) => Remote::Ready(Neighbors::partition(story, &resolved)),
            Err(err) => {
                tracing::warn!(%request, story = %story.id, error = %err, "neighbor fetch failed");
                Remote::Failed(NEIGHBORS_FAILED.to_string())
            },
        };
        self.selected = 0;
        true
    }

    /// Story shown, if any.
    pub fn subject(&self) -> Option<&Story> {
        self.subject.as_ref()
    }

    /// True if the page was opened without a story.
    pub fn is_not_found(&self) -> bool {
        self.subject.is_none()
    }

    /// Sanitized subject body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Neighbor resolution state.
    pub fn neighbors(&self) -> &Remote<Neighbors> {
        &self.neighbors
    }

    /// Index of the highlighted neighbor (predecessors first).
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Highlighted neighbor, if neighbors are shown.
    pub fn selected_neighbor(&self) -> Option<&Story> {
        self.neighbors.ready()?.iter().nth(self.selected)
    }

    /// Move the highlight down, wrapping.
    pub fn select_next(&mut self) {
        let len = self.neighbors.ready().map_or(0, Neighbors::len);
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the highlight up, wrapping.
    pub fn select_prev(&mut self) {
        let len = self.neighbors.ready().map_or(0, Neighbors::len);
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }
}

#[cfg(test)]
mod tests {
    use storymap_core::{StoryId, StoryType, ThemeRoomId};

    use super::*;

    fn story(id: &str, prev: &[&str], next: &[&str]) -> Story {
        Story {
            id: id.into(),
            title: format!("Story {id}"),
            content: "<p>body</p><script>x()</script>".into(),
            story_type: if prev.is_empty() { StoryType::Root } else { StoryType::Child },
            theme_room_id: ThemeRoomId::new("room"),
            prev: prev.iter().map(|&p| p.into()).collect(),
            next: next.iter().map(|&n| n.into()).collect(),
            author_id: "a1".into(),
        }
    }

    #[test]
    fn missing_subject_never_fetches() {
        let mut page = StoryPage::new(None);
        let mut ids = RequestIds::default();

        assert!(page.begin(&mut ids).is_none());
        assert!(page.is_not_found());
        assert_eq!(page.neighbors(), &Remote::Idle);
    }

    #[test]
    fn unlinked_subject_settles_without_fetch() {
        let mut page = StoryPage::new(Some(story("s1", &[], &[])));
        let mut ids = RequestIds::default();

        assert!(page.begin(&mut ids).is_none());
        assert_eq!(page.neighbors(), &Remote::Ready(Neighbors::default()));
    }

    #[test]
    fn fetch_requests_prev_then_next() {
        let mut page = StoryPage::new(Some(story("s2", &["s1"], &["s3", "s4"])));
        let mut ids = RequestIds::default();

        let action = page.begin(&mut ids).unwrap();
        let AppAction::FetchNeighbors { ids, .. } = action else {
            panic!("expected neighbor fetch, got {action:?}");
        };
        assert_eq!(ids, vec![StoryId::new("s1"), StoryId::new("s3"), StoryId::new("s4")]);
    }

    #[test]
    fn resolution_partitions_neighbors() {
        let mut page = StoryPage::new(Some(story("s2", &["s1"], &[])));
        let mut ids = RequestIds::default();
        let request = page.begin(&mut ids).and_then(|a| a.request_id()).unwrap();

        assert!(page.resolve(request, Ok(vec![story("s1", &[], &["s2"])])));

        let neighbors = page.neighbors().ready().unwrap();
        assert_eq!(neighbors.predecessors.len(), 1);
        assert_eq!(neighbors.predecessors[0].id, StoryId::new("s1"));
        assert!(neighbors.successors.is_empty());
    }

    #[test]
    fn failure_shows_message() {
        let mut page = StoryPage::new(Some(story("s2", &["s1"], &[])));
        let mut ids = RequestIds::default();
        let request = page.begin(&mut ids).and_then(|a| a.request_id()).unwrap();

        assert!(page.resolve(request, Err(RequestError::Transport("down".into()))));
        assert_eq!(page.neighbors().error(), Some(NEIGHBORS_FAILED));
        assert!(page.selected_neighbor().is_none());
    }

    #[test]
    fn stale_response_ignored() {
        let mut page = StoryPage::new(Some(story("s2", &["s1"], &[])));
        let mut ids = RequestIds::default();
        let stale = page.begin(&mut ids).and_then(|a| a.request_id()).unwrap();
        let current = page.begin(&mut ids).and_then(|a| a.request_id()).unwrap();

        assert!(!page.resolve(stale, Ok(Vec::new())));
        assert!(page.neighbors().is_waiting_for(current));
    }

    #[test]
    fn content_is_sanitized() {
        let page = StoryPage::new(Some(story("s1", &[], &[])));
        assert_eq!(page.content(), "<p>body</p>");
    }

    #[test]
    fn selection_wraps() {
        let mut page = StoryPage::new(Some(story("s2", &["s1"], &["s3"])));
        let mut ids = RequestIds::default();
        let request = page.begin(&mut ids).and_then(|a| a.request_id()).unwrap();
        page.resolve(request, Ok(vec![story("s1", &[], &[]), story("s3", &[], &[])]));

        assert_eq!(page.selected_neighbor().map(|s| s.id.as_str()), Some("s1"));
        page.select_next();
        assert_eq!(page.selected_neighbor().map(|s| s.id.as_str()), Some("s3"));
        page.select_next();
        assert_eq!(page.selected(), 0);
        page.select_prev();
        assert_eq!(page.selected(), 1);
    }
}
