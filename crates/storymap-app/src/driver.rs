//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific input and rendering, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{App, AppEvent};

/// Abstracts user-facing I/O for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal UI and in simulation.
/// Story API traffic does not pass through the driver; the runtime sends it
/// to a [`storymap_client::StoryApi`] directly.
///
/// # Implementations
///
/// - **TUI**: crossterm for terminal events, ratatui for rendering
/// - **Simulation**: scripted event queue, rendering recorded for assertions
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event.
    ///
    /// Returns an event, or `None` if no event is ready. Must be cancel
    /// safe: the runtime drops the future when an API completion wins.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Release platform resources.
    fn stop(&mut self);
}
