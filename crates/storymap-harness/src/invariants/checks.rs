//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use std::collections::HashMap;

use storymap_core::{Story, StoryId};

use super::{Invariant, InvariantKind, InvariantResult, PageKind, SystemSnapshot, Violation};

/// The mounted page must be the one the current route names.
pub struct PageMatchesRoute;

impl Invariant for PageMatchesRoute {
    fn kind(&self) -> InvariantKind {
        InvariantKind::PageMatchesRoute
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let (Some(route), Some(page)) = (&state.route, state.page) else {
            return Ok(());
        };
        let expected = PageKind::for_route(route);
        if page != expected {
            return Err(self.violation(format!("route {route} mounted {page:?}, want {expected:?}")));
        }
        if state.history_len == 0 {
            return Err(self.violation("history lost its current entry"));
        }
        Ok(())
    }
}

/// Resolved neighbors must sit in the partition their edge direction names.
///
/// A predecessor must be listed in the subject's `prev`, a successor in its
/// `next`. A story linked both ways may appear in both.
pub struct NeighborPartition;

impl Invariant for NeighborPartition {
    fn kind(&self) -> InvariantKind {
        InvariantKind::NeighborPartition
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(story) = &state.story else { return Ok(()) };
        let (Some(subject), Some(neighbors)) = (&story.subject, &story.neighbors) else {
            return Ok(());
        };

        if let Some(stray) = neighbors.predecessors.iter().find(|s| !subject.follows(&s.id)) {
            return Err(self.violation(format!(
                "story {}: predecessor {} not in prev {:?}",
                subject.id, stray.id, subject.prev
            )));
        }
        if let Some(stray) = neighbors.successors.iter().find(|s| !subject.precedes(&s.id)) {
            return Err(self.violation(format!(
                "story {}: successor {} not in next {:?}",
                subject.id, stray.id, subject.next
            )));
        }
        Ok(())
    }
}

/// A story page without a subject never asks the store for anything.
pub struct NotFoundNeverFetches;

impl Invariant for NotFoundNeverFetches {
    fn kind(&self) -> InvariantKind {
        InvariantKind::NotFoundNeverFetches
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        match &state.story {
            Some(story) if story.subject.is_none() && story.loading => {
                Err(self.violation("neighbor fetch outstanding without a subject"))
            },
            _ => Ok(()),
        }
    }
}

/// Highlighted entries must exist.
///
/// Applies to the sidebar, the story page's neighbor list and the story
/// map's story list. An empty list pins the selection at zero.
pub struct SelectionInBounds;

impl Invariant for SelectionInBounds {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SelectionInBounds
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        if let Some(sidebar) = state.sidebar {
            in_bounds(self, "sidebar", sidebar.selected, sidebar.len)?;
        }
        if let Some(story) = &state.story {
            let len = story.neighbors.as_ref().map_or(0, storymap_core::Neighbors::len);
            in_bounds(self, "neighbors", story.selected, len)?;
        }
        if let Some(map) = &state.story_map {
            let len = map.stories.as_ref().map_or(0, Vec::len);
            in_bounds(self, "room stories", map.selected, len)?;
        }
        Ok(())
    }
}

fn in_bounds(inv: &impl Invariant, what: &str, selected: usize, len: usize) -> InvariantResult {
    if selected == 0 || selected < len {
        Ok(())
    } else {
        Err(inv.violation(format!("{what}: selected {selected} of {len}")))
    }
}

/// A busy form has exactly one submission outstanding and cannot submit.
pub struct SubmitGuard;

impl Invariant for SubmitGuard {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SubmitGuard
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(create) = state.create else { return Ok(()) };
        if create.busy != create.pending {
            return Err(self.violation(format!(
                "busy {} but pending request recorded: {}",
                create.busy, create.pending
            )));
        }
        if create.busy && create.can_submit {
            return Err(self.violation("submit enabled while a submission is outstanding"));
        }
        Ok(())
    }
}

/// Stored edges are mirrored on both ends.
///
/// If `a` lists `b` in `next`, `b` lists `a` in `prev`, and the reverse.
/// Edges to stories the store does not hold are not checked.
pub struct LinkSymmetry;

impl Invariant for LinkSymmetry {
    fn kind(&self) -> InvariantKind {
        InvariantKind::LinkSymmetry
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let by_id: HashMap<&StoryId, &Story> = state.store.iter().map(|s| (&s.id, s)).collect();

        for story in &state.store {
            for next in &story.next {
                if by_id.get(next).is_some_and(|n| !n.follows(&story.id)) {
                    return Err(self.violation(format!(
                        "{} -> {}: successor does not list it in prev",
                        story.id, next
                    )));
                }
            }
            for prev in &story.prev {
                if by_id.get(prev).is_some_and(|p| !p.precedes(&story.id)) {
                    return Err(self.violation(format!(
                        "{} -> {}: predecessor does not list it in next",
                        prev, story.id
                    )));
                }
            }
        }
        Ok(())
    }
}

/// No stored story links to itself.
pub struct NoSelfLoop;

impl Invariant for NoSelfLoop {
    fn kind(&self) -> InvariantKind {
        InvariantKind::NoSelfLoop
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        match state.store.iter().find(|s| s.has_self_loop()) {
            Some(story) => Err(self.violation(format!("story {} links to itself", story.id))),
            None => Ok(()),
        }
    }
}

/// Shorthand for building a [`Violation`] tagged with an invariant's kind.
trait ViolationExt {
    fn violation(&self, message: impl Into<String>) -> Violation;
}

impl<I: Invariant + ?Sized> ViolationExt for I {
    fn violation(&self, message: impl Into<String>) -> Violation {
        Violation { invariant: self.kind(), message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use storymap_app::Route;
    use storymap_core::{AuthorId, Neighbors, StoryType, ThemeRoomId};

    use super::*;
    use crate::invariants::{CreateSnapshot, SidebarSnapshot, StorySnapshot};

    fn story(id: &str, prev: &[&str], next: &[&str]) -> Story {
        Story {
            id: StoryId::new(id),
            title: id.to_owned(),
            content: String::new(),
            story_type: if prev.is_empty() { StoryType::Root } else { StoryType::Child },
            theme_room_id: ThemeRoomId::new("room"),
            prev: prev.iter().map(|&p| StoryId::new(p)).collect(),
            next: next.iter().map(|&n| StoryId::new(n)).collect(),
            author_id: AuthorId::new("a"),
        }
    }

    fn story_page(subject: Story, neighbors: Neighbors) -> SystemSnapshot {
        SystemSnapshot {
            route: Some(Route::Story),
            page: Some(PageKind::Story),
            history_len: 1,
            story: Some(StorySnapshot {
                subject: Some(subject),
                neighbors: Some(neighbors),
                loading: false,
                selected: 0,
            }),
            ..SystemSnapshot::default()
        }
    }

    #[test]
    fn page_matches_route_fails_on_mismatch() {
        let snapshot = SystemSnapshot {
            route: Some(Route::Home),
            page: Some(PageKind::Story),
            history_len: 1,
            ..SystemSnapshot::default()
        };
        let err = PageMatchesRoute.check(&snapshot).unwrap_err();
        assert_eq!(err.invariant, InvariantKind::PageMatchesRoute);
    }

    #[test]
    fn partition_passes_for_correct_split() {
        let subject = story("b", &["a"], &["c"]);
        let resolved = [story("a", &[], &["b"]), story("c", &["b"], &[])];
        let snapshot = story_page(subject.clone(), Neighbors::partition(&subject, &resolved));

        assert!(NeighborPartition.check(&snapshot).is_ok());
    }

    #[test]
    fn partition_fails_for_swapped_direction() {
        let subject = story("b", &["a"], &["c"]);
        let neighbors =
            Neighbors { predecessors: vec![story("c", &["b"], &[])], successors: Vec::new() };

        assert!(NeighborPartition.check(&story_page(subject, neighbors)).is_err());
    }

    #[test]
    fn partition_allows_overlap() {
        let subject = story("b", &["a"], &["a"]);
        let resolved = [story("a", &["b"], &["b"])];
        let snapshot = story_page(subject.clone(), Neighbors::partition(&subject, &resolved));

        assert!(NeighborPartition.check(&snapshot).is_ok());
    }

    #[test]
    fn not_found_fails_when_loading() {
        let snapshot = SystemSnapshot {
            story: Some(StorySnapshot { loading: true, ..StorySnapshot::default() }),
            ..SystemSnapshot::default()
        };
        assert!(NotFoundNeverFetches.check(&snapshot).is_err());
    }

    #[test]
    fn selection_fails_past_end() {
        let snapshot = SystemSnapshot {
            sidebar: Some(SidebarSnapshot { open: true, selected: 7, len: 7 }),
            ..SystemSnapshot::default()
        };
        assert!(SelectionInBounds.check(&snapshot).is_err());
    }

    #[test]
    fn selection_zero_on_empty_list_passes() {
        let snapshot = SystemSnapshot {
            story: Some(StorySnapshot::default()),
            ..SystemSnapshot::default()
        };
        assert!(SelectionInBounds.check(&snapshot).is_ok());
    }

    #[test]
    fn submit_guard_fails_when_busy_and_enabled() {
        let snapshot = SystemSnapshot {
            create: Some(CreateSnapshot { busy: true, pending: true, can_submit: true }),
            ..SystemSnapshot::default()
        };
        assert!(SubmitGuard.check(&snapshot).is_err());
    }

    #[test]
    fn link_symmetry_passes_for_mirrored_edges() {
        let snapshot = SystemSnapshot::empty()
            .with_store(vec![story("a", &[], &["b"]), story("b", &["a"], &[])]);
        assert!(LinkSymmetry.check(&snapshot).is_ok());
    }

    #[test]
    fn link_symmetry_fails_for_one_sided_edge() {
        let snapshot =
            SystemSnapshot::empty().with_store(vec![story("a", &[], &[]), story("b", &["a"], &[])]);
        assert!(LinkSymmetry.check(&snapshot).is_err());
    }

    #[test]
    fn link_symmetry_ignores_unknown_ends() {
        let snapshot = SystemSnapshot::empty().with_store(vec![story("b", &["gone"], &[])]);
        assert!(LinkSymmetry.check(&snapshot).is_ok());
    }

    #[test]
    fn self_loop_is_reported() {
        let snapshot = SystemSnapshot::empty().with_store(vec![story("a", &["a"], &["a"])]);
        assert!(NoSelfLoop.check(&snapshot).is_err());
    }
}
