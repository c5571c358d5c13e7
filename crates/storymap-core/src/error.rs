//! Error types for draft composition.

use thiserror::Error;

/// A draft that cannot be submitted as composed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// A child story was composed without a theme room to attach to.
    #[error("a continuing story needs a theme room")]
    MissingThemeRoom,
}
