//! Story map invariants.
//!
//! Properties of the mounted page and of the story graph that hold after
//! every event the App processes, whatever the order of keys, navigation
//! and API completions. Simulation runs check them on each render.
//!
//! # Architecture
//!
//! The invariant system extracts observable state from the App and the story
//! store into a [`SystemSnapshot`], then runs registered [`Invariant`] checks
//! against it.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let snapshot = SystemSnapshot::from_app(&app).with_store(store.stories());
//! registry.check_all(&snapshot)?;
//! ```

mod checks;
mod snapshot;

use std::fmt;

pub use checks::{
    LinkSymmetry, NeighborPartition, NoSelfLoop, NotFoundNeverFetches, PageMatchesRoute,
    SelectionInBounds, SubmitGuard,
};
pub use snapshot::{
    CreateSnapshot, PageKind, SidebarSnapshot, StoryMapSnapshot, StorySnapshot, SystemSnapshot,
};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Identifies an invariant in violation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantKind {
    /// See [`PageMatchesRoute`].
    PageMatchesRoute,
    /// See [`NeighborPartition`].
    NeighborPartition,
    /// See [`NotFoundNeverFetches`].
    NotFoundNeverFetches,
    /// See [`SelectionInBounds`].
    SelectionInBounds,
    /// See [`SubmitGuard`].
    SubmitGuard,
    /// See [`LinkSymmetry`].
    LinkSymmetry,
    /// See [`NoSelfLoop`].
    NoSelfLoop,
}

impl InvariantKind {
    /// Invariant name for error reporting.
    pub fn name(self) -> &'static str {
        match self {
            Self::PageMatchesRoute => "page_matches_route",
            Self::NeighborPartition => "neighbor_partition",
            Self::NotFoundNeverFetches => "not_found_never_fetches",
            Self::SelectionInBounds => "selection_in_bounds",
            Self::SubmitGuard => "submit_guard",
            Self::LinkSymmetry => "link_symmetry",
            Self::NoSelfLoop => "no_self_loop",
        }
    }
}

impl fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{invariant}: {message}")]
pub struct Violation {
    /// Which invariant was violated.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

/// A property checked against a [`SystemSnapshot`].
pub trait Invariant: Send + Sync {
    /// Which invariant this is.
    fn kind(&self) -> InvariantKind;

    /// `Err` names the offending page state or story.
    fn check(&self, state: &SystemSnapshot) -> InvariantResult;
}

/// Ordered set of invariants run together.
///
/// Use [`InvariantRegistry::standard()`] for the full App and store set.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with every standard invariant.
    ///
    /// Includes:
    /// - [`PageMatchesRoute`]: mounted page follows the route
    /// - [`NeighborPartition`]: neighbors sit on the side their edge names
    /// - [`NotFoundNeverFetches`]: missing subject means no request
    /// - [`SelectionInBounds`]: highlighted entries exist
    /// - [`SubmitGuard`]: one submission at a time
    /// - [`LinkSymmetry`]: stored edges are mirrored
    /// - [`NoSelfLoop`]: no story links to itself
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(PageMatchesRoute);
        registry.add(NeighborPartition);
        registry.add(NotFoundNeverFetches);
        registry.add(SelectionInBounds);
        registry.add(SubmitGuard);
        registry.add(LinkSymmetry);
        registry.add(NoSelfLoop);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given state.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, state: &SystemSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking on the first failing check.
    ///
    /// # Panics
    ///
    /// Panics if any invariant is violated.
    #[allow(clippy::panic)]
    pub fn assert_all(&self, state: &SystemSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_invariants() {
        let registry = InvariantRegistry::standard();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn empty_snapshot_passes_invariants() {
        let registry = InvariantRegistry::standard();
        let snapshot = SystemSnapshot::empty();
        assert!(registry.check_all(&snapshot).is_ok());
    }

    #[test]
    fn violation_display_names_invariant() {
        let violation =
            Violation { invariant: InvariantKind::SubmitGuard, message: "double submit".into() };
        assert_eq!(violation.to_string(), "submit_guard: double submit");
    }
}
