//! Observable request and session state.
//!
//! These are the view-model building blocks shared by every page: the
//! request ids that key asynchronous completions, the lifecycle of a remote
//! value, and the signed-in author.

use std::fmt;

use storymap_core::AuthorId;

/// Identifies one API request issued by the app.
///
/// Completions carry the id of the request they answer. A page only applies
/// a completion whose id it is still waiting for; anything else is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Wrap a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator of [`RequestId`]s.
#[derive(Debug, Clone, Default)]
pub struct RequestIds {
    next: u64,
}

impl RequestIds {
    /// Allocate the next id.
    pub fn next_id(&mut self) -> RequestId {
        self.next += 1;
        RequestId(self.next)
    }
}

/// Lifecycle of a value fetched from the story API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Remote<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Waiting for `request`.
    Loading {
        /// Request whose completion will settle this value.
        request: RequestId,
    },
    /// Fetched.
    Ready(T),
    /// Fetch failed; holds the user-visible message.
    Failed(String),
}

impl<T> Remote<T> {
    /// True while waiting on `request` specifically.
    pub fn is_waiting_for(&self, request: RequestId) -> bool {
        matches!(self, Self::Loading { request: pending } if *pending == request)
    }

    /// Outstanding request, if any.
    pub fn pending(&self) -> Option<RequestId> {
        match self {
            Self::Loading { request } => Some(*request),
            Self::Idle | Self::Ready(_) | Self::Failed(_) => None,
        }
    }

    /// True while a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending().is_some()
    }

    /// Fetched value, if ready.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Idle | Self::Loading { .. } | Self::Failed(_) => None,
        }
    }

    /// Failure message, if failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            Self::Idle | Self::Loading { .. } | Self::Ready(_) => None,
        }
    }
}

/// Signed-in user.
///
/// Source of the author id stamped on every new story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    author_id: AuthorId,
}

impl Session {
    /// Session for `author_id`.
    pub fn new(author_id: AuthorId) -> Self {
        Self { author_id }
    }

    /// Author of stories created in this session.
    pub fn author_id(&self) -> &AuthorId {
        &self.author_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_increase() {
        let mut ids = RequestIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(b > a);
    }

    #[test]
    fn waiting_matches_only_own_request() {
        let remote: Remote<()> = Remote::Loading { request: RequestId::new(3) };
        assert!(remote.is_waiting_for(RequestId::new(3)));
        assert!(!remote.is_waiting_for(RequestId::new(2)));
        assert!(!Remote::Ready(()).is_waiting_for(RequestId::new(3)));
    }
}
