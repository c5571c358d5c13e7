//! Deterministic simulation harness for story map testing.
//!
//! Drives the real [`storymap_app::Runtime`] with a scripted [`SimDriver`]
//! over an in-memory story store, so full user flows run without a terminal
//! or a network.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation of story creation
//! and linking. Operations are applied to both the model and the real App
//! and store, and their observable graphs are compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the full
//! App and store set.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod fixtures;
pub mod invariants;
pub mod model;
pub mod sim_driver;

pub use fixtures::StoryGraph;
pub use invariants::{
    CreateSnapshot, Invariant, InvariantKind, InvariantRegistry, InvariantResult, LinkSymmetry,
    NeighborPartition, NoSelfLoop, NotFoundNeverFetches, PageKind, PageMatchesRoute,
    SelectionInBounds, SidebarSnapshot, StoryMapSnapshot, StorySnapshot, SubmitGuard,
    SystemSnapshot, Violation,
};
pub use model::{ModelGraph, ModelStory, ObservableGraph, Operation, observe, room_name};
pub use sim_driver::{SimDriver, SimDriverError};
