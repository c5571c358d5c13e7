//! Related-story resolution helpers.

use crate::{Story, StoryId};

/// Ids to resolve for `story`'s neighbors: `prev` followed by `next`.
///
/// Duplicates are kept; the store returns each existing story once.
pub fn neighbor_request_ids(story: &Story) -> Vec<StoryId> {
    story.prev.iter().chain(story.next.iter()).cloned().collect()
}

/// Resolved neighbors of one story, split by edge direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbors {
    /// Resolved stories whose id is in the subject's `prev`.
    pub predecessors: Vec<Story>,
    /// Resolved stories whose id is in the subject's `next`.
    pub successors: Vec<Story>,
}

impl Neighbors {
    /// Partition `resolved` by membership in `subject.prev` and `subject.next`.
    ///
    /// A story linked in both directions lands in both partitions. Stories
    /// linked in neither direction are dropped.
    pub fn partition(subject: &Story, resolved: &[Story]) -> Self {
        let predecessors = resolved.iter().filter(|s| subject.follows(&s.id)).cloned().collect();
        let successors = resolved.iter().filter(|s| subject.precedes(&s.id)).cloned().collect();
        Self { predecessors, successors }
    }

    /// True if neither partition holds a story.
    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty() && self.successors.is_empty()
    }

    /// Predecessors followed by successors, in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Story> {
        self.predecessors.iter().chain(self.successors.iter())
    }

    /// Total entries across both partitions.
    pub fn len(&self) -> usize {
        self.predecessors.len() + self.successors.len()
    }
}
