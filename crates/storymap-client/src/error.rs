//! Request errors.
//!
//! One taxonomy covers every story API operation. Variants carry strings
//! rather than source errors so a [`RequestError`] can be cloned into app
//! events and compared in tests.

use thiserror::Error;

/// Failure of a story API request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The request did not complete (connection, timeout, injected fault).
    #[error("network error: {0}")]
    Transport(String),

    /// The store answered and refused the request.
    #[error("story service rejected request (status {status}): {message}")]
    Rejected {
        /// HTTP-style status code.
        status: u16,
        /// Reason given by the store.
        message: String,
    },

    /// The store answered with a body that could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl RequestError {
    /// Status used when a draft fails store-side validation.
    pub const UNPROCESSABLE: u16 = 422;

    /// Validation rejection with the given reason.
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::Rejected { status: Self::UNPROCESSABLE, message: message.into() }
    }

    /// Returns true if this error may succeed when the user tries again.
    ///
    /// Transport failures and server-side (5xx) rejections are transient.
    /// Validation rejections and undecodable bodies are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Rejected { status, .. } => *status >= 500,
            Self::Decode(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(RequestError::Transport("reset".into()).is_transient());
        assert!(RequestError::Rejected { status: 503, message: String::new() }.is_transient());
        assert!(!RequestError::unprocessable("bad prev").is_transient());
        assert!(!RequestError::Decode("eof".into()).is_transient());
    }

    #[test]
    fn display_includes_status() {
        let err = RequestError::unprocessable("unknown story s9");
        assert_eq!(
            err.to_string(),
            "story service rejected request (status 422): unknown story s9"
        );
    }
}
