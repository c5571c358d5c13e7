//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`storymap_app::Runtime`] orchestration code runs in both production and
//! simulation.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
};

use storymap_app::{App, AppEvent, Driver, KeyInput, Route};
use storymap_client::MemoryStoryApi;

use crate::invariants::{InvariantRegistry, SystemSnapshot};

/// Error type for simulation driver.
#[derive(Debug, Clone, thiserror::Error)]
#[error("SimDriverError: {0}")]
pub struct SimDriverError(pub String);

/// Shared state for event injection.
///
/// Clones of the driver share it, so tests keep a handle after moving the
/// driver into a runtime.
#[derive(Default)]
struct SharedState {
    pending_events: VecDeque<AppEvent>,
    rendered_routes: Vec<Route>,
    last_status: Option<String>,
    stopped: bool,
}

/// Simulation driver for deterministic testing.
///
/// Input comes from an injected event queue. Every render records the route
/// on screen and, when invariants are enabled, checks them against the App
/// (and the store, if one is attached). A violation fails the render, which
/// stops the runtime with a [`SimDriverError`].
#[derive(Clone)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    invariants: Option<Arc<InvariantRegistry>>,
    store: Option<MemoryStoryApi>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Create a new simulation driver.
    pub fn new() -> Self {
        Self { state: Arc::new(Mutex::new(SharedState::default())), invariants: None, store: None }
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Arc::new(registry));
        self
    }

    /// Include `store` in the snapshots invariants are checked against.
    #[must_use]
    pub fn with_store(mut self, store: MemoryStoryApi) -> Self {
        self.store = Some(store);
        self
    }

    #[allow(clippy::expect_used)]
    fn shared(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().expect("Mutex poisoned")
    }

    /// Inject an `AppEvent` for processing.
    pub fn inject_event(&self, event: AppEvent) {
        self.shared().pending_events.push_back(event);
    }

    /// Inject a key press.
    pub fn inject_key(&self, key: KeyInput) {
        self.inject_event(AppEvent::Key(key));
    }

    /// Inject one key press per character of `text`.
    pub fn inject_text(&self, text: &str) {
        let mut state = self.shared();
        state.pending_events.extend(text.chars().map(|c| AppEvent::Key(KeyInput::Char(c))));
    }

    /// Inject a tick event.
    pub fn inject_tick(&self) {
        self.inject_event(AppEvent::Tick);
    }

    /// Check if there are pending events to process.
    pub fn has_pending(&self) -> bool {
        !self.shared().pending_events.is_empty()
    }

    /// Routes on screen at each render, oldest first.
    pub fn rendered_routes(&self) -> Vec<Route> {
        self.shared().rendered_routes.clone()
    }

    /// Number of renders so far.
    pub fn render_count(&self) -> usize {
        self.shared().rendered_routes.len()
    }

    /// Status line at the last render.
    pub fn last_status(&self) -> Option<String> {
        self.shared().last_status.clone()
    }

    /// Whether the runtime released the driver.
    pub fn is_stopped(&self) -> bool {
        self.shared().stopped
    }

    /// Snapshot of `app` plus the attached store, if any.
    pub fn snapshot(&self, app: &App) -> SystemSnapshot {
        let snapshot = SystemSnapshot::from_app(app);
        match &self.store {
            Some(store) => snapshot.with_store(store.stories()),
            None => snapshot,
        }
    }

    /// Check invariants against App state.
    ///
    /// # Errors
    ///
    /// Returns every violation found, joined into one message.
    pub fn check_invariants(&self, app: &App) -> Result<(), SimDriverError> {
        let Some(registry) = &self.invariants else { return Ok(()) };
        registry.check_all(&self.snapshot(app)).map_err(|violations| {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            SimDriverError(messages.join("; "))
        })
    }

    fn pop_event(&self) -> Option<AppEvent> {
        self.shared().pending_events.pop_front()
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        let event = self.pop_event();
        if event.is_none() {
            // Let spawned API tasks make progress on a current-thread runtime.
            tokio::task::yield_now().await;
        }
        Ok(event)
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        {
            let mut state = self.shared();
            state.rendered_routes.push(app.current_route().clone());
            state.last_status = app.status_message().map(str::to_owned);
        }
        self.check_invariants(app)
    }

    fn stop(&mut self) {
        self.shared().stopped = true;
    }
}
