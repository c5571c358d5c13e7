//! Fault-injecting story API wrapper
//!
//! Delegates to another [`StoryApi`] but fails a configurable share of
//! requests with a transport error. Exercises the error paths of the story
//! page and creation form without a flaky network.

use std::sync::{Arc, Mutex};

use storymap_core::{Story, StoryDraft, StoryId, ThemeRoomId};

use crate::{RequestError, StoryApi};

/// Story API wrapper that randomly fails requests.
///
/// Failed requests never reach the inner API, so a failed creation persists
/// nothing. RNG state and the request counter sit behind `Arc<Mutex<>>`,
/// making the wrapper Clone and thread-safe; clones share one failure
/// sequence.
#[derive(Clone)]
pub struct ChaoticStoryApi<A: StoryApi> {
    inner: A,
    /// Failure rate (0.0 = never fail, 1.0 = always fail)
    failure_rate: f64,
    rng: Arc<Mutex<ChaoticRng>>,
    request_count: Arc<Mutex<usize>>,
}

/// Deterministic LCG so chaos runs replay from a seed.
struct ChaoticRng {
    state: u64,
}

impl ChaoticRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next value in [0.0, 1.0)
    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> f64 {
        // Numerical Recipes constants
        const A: u64 = 1_664_525;
        const C: u64 = 1_013_904_223;
        const M: u64 = 1u64 << 32;

        self.state = (A.wrapping_mul(self.state).wrapping_add(C)) % M;
        (self.state as f64) / (M as f64)
    }

    fn should_fail(&mut self, failure_rate: f64) -> bool {
        self.next() < failure_rate
    }
}

impl<A: StoryApi> ChaoticStoryApi<A> {
    const DEFAULT_SEED: u64 = 0x5703_1A9E_0000_0001;

    /// Wrap `inner`, failing requests with probability `failure_rate`.
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    pub fn new(inner: A, failure_rate: f64) -> Self {
        Self::with_seed(inner, failure_rate, Self::DEFAULT_SEED)
    }

    /// Wrap with an explicit seed for reproducible chaos.
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    pub fn with_seed(inner: A, failure_rate: f64, seed: u64) -> Self {
        assert!(
            (0.0..=1.0).contains(&failure_rate),
            "failure_rate must be between 0.0 and 1.0, got {failure_rate}"
        );

        Self {
            inner,
            failure_rate,
            rng: Arc::new(Mutex::new(ChaoticRng::new(seed))),
            request_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Wrapped API, for inspecting the store after chaos.
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Requests attempted through this wrapper, failed ones included.
    pub fn request_count(&self) -> usize {
        #[allow(clippy::expect_used)]
        *self.request_count.lock().expect("request_count mutex poisoned")
    }

    /// Count the request and roll for failure.
    fn admit(&self, operation: &'static str) -> Result<(), RequestError> {
        #[allow(clippy::expect_used)]
        {
            *self.request_count.lock().expect("request_count mutex poisoned") += 1;
        }

        #[allow(clippy::expect_used)]
        let fail = self.rng.lock().expect("ChaoticRng mutex poisoned").should_fail(self.failure_rate);

        if fail {
            tracing::debug!(operation, "injecting request failure");
            return Err(RequestError::Transport("injected failure".to_string()));
        }
        Ok(())
    }
}

impl<A: StoryApi> StoryApi for ChaoticStoryApi<A> {
    async fn create_story(&self, draft: StoryDraft) -> Result<Story, RequestError> {
        self.admit("create_story")?;
        self.inner.create_story(draft).await
    }

    async fn fetch_filtered_stories(&self, ids: Vec<StoryId>) -> Result<Vec<Story>, RequestError> {
        self.admit("fetch_filtered_stories")?;
        self.inner.fetch_filtered_stories(ids).await
    }

    async fn fetch_theme_room_stories(
        &self,
        theme_room_id: ThemeRoomId,
    ) -> Result<Vec<Story>, RequestError> {
        self.admit("fetch_theme_room_stories")?;
        self.inner.fetch_theme_room_stories(theme_room_id).await
    }
}

#[cfg(test)]
mod tests {
    use storymap_core::{AuthorId, CreateContext};

    use super::*;
    use crate::MemoryStoryApi;

    fn root_draft() -> StoryDraft {
        StoryDraft::compose(
            "t",
            "<p>x</p>",
            &CreateContext::root("room".into()),
            AuthorId::new("a1"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn zero_failure_rate_always_delegates() {
        let chaotic = ChaoticStoryApi::new(MemoryStoryApi::new(), 0.0);

        for _ in 0..50 {
            chaotic.create_story(root_draft()).await.expect("should not fail with 0% rate");
        }

        assert_eq!(chaotic.inner().len(), 50);
        assert_eq!(chaotic.request_count(), 50);
    }

    #[tokio::test]
    async fn full_failure_rate_never_persists() {
        let chaotic = ChaoticStoryApi::new(MemoryStoryApi::new(), 1.0);

        let err = chaotic.create_story(root_draft()).await.unwrap_err();
        assert!(err.is_transient());
        assert!(chaotic.fetch_filtered_stories(vec!["s1".into()]).await.is_err());
        assert!(chaotic.fetch_theme_room_stories("room".into()).await.is_err());

        assert!(chaotic.inner().is_empty());
        assert_eq!(chaotic.inner().round_trips(), 0);
        assert_eq!(chaotic.request_count(), 3);
    }

    #[tokio::test]
    async fn same_seed_same_failures() {
        let first = ChaoticStoryApi::with_seed(MemoryStoryApi::new(), 0.5, 42);
        let second = ChaoticStoryApi::with_seed(MemoryStoryApi::new(), 0.5, 42);

        for i in 0..100 {
            let a = first.create_story(root_draft()).await;
            let b = second.create_story(root_draft()).await;
            assert_eq!(a.is_ok(), b.is_ok(), "determinism violated at request {i}");
        }
    }

    #[test]
    #[should_panic(expected = "failure_rate must be between 0.0 and 1.0")]
    fn rejects_invalid_failure_rate() {
        let _chaotic = ChaoticStoryApi::new(MemoryStoryApi::new(), 1.5);
    }
}
