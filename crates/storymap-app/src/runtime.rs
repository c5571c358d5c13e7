//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Bridge`]: adapter to the story API
//! - [`Driver`]: Platform-specific I/O
//!
//! API actions run as spawned tasks on the current tokio runtime. Their
//! completions come back through a channel and are fed to the App like any
//! other event, so the App never awaits and never blocks on the network.

use storymap_client::StoryApi;
use tokio::sync::mpsc;

use crate::{App, AppAction, AppEvent, Bridge, Driver};

/// Generic runtime that orchestrates App, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `A`: Story API the bridge talks to
pub struct Runtime<D, A>
where
    D: Driver,
    A: StoryApi,
{
    driver: D,
    app: App,
    bridge: Bridge<A>,
    completions_tx: mpsc::UnboundedSender<AppEvent>,
    completions_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// API tasks spawned but not yet answered.
    in_flight: usize,
}

impl<D, A> Runtime<D, A>
where
    D: Driver,
    A: StoryApi,
{
    /// Create a runtime driving `app` with `driver`, talking to `api`.
    pub fn new(driver: D, api: A, app: App) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self { driver, app, bridge: Bridge::new(api), completions_tx, completions_rx, in_flight: 0 }
    }

    /// Run the main event loop until the App quits.
    ///
    /// Each cycle waits for whichever comes first: an input event from the
    /// driver or an API completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let result = self.run_until_quit().await;
        self.driver.stop();
        result
    }

    async fn run_until_quit(&mut self) -> Result<(), D::Error> {
        if self.start()? {
            return Ok(());
        }
        while !self.step().await? {}
        Ok(())
    }

    /// Issue the start page's requests and draw the first frame.
    ///
    /// Returns `true` if the application should quit.
    pub fn start(&mut self) -> Result<bool, D::Error> {
        let actions = self.app.start();
        self.process_actions(actions)
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    pub async fn step(&mut self) -> Result<bool, D::Error> {
        let event = tokio::select! {
            Some(event) = self.completions_rx.recv() => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(event)
            },
            polled = self.driver.poll_event() => polled?,
        };

        match event {
            Some(event) => self.dispatch(event),
            None => Ok(false),
        }
    }

    /// Feed one event to the App and execute the resulting actions.
    ///
    /// Returns `true` if the application should quit.
    pub fn dispatch(&mut self, event: AppEvent) -> Result<bool, D::Error> {
        let actions = self.app.handle(event);
        self.process_actions(actions)
    }

    /// Wait for every in-flight API task and dispatch its completion.
    ///
    /// Completions may issue further requests; those are awaited too.
    /// Returns `true` if the application should quit.
    pub async fn settle(&mut self) -> Result<bool, D::Error> {
        while self.in_flight > 0 {
            let Some(event) = self.completions_rx.recv().await else {
                break;
            };
            self.in_flight -= 1;
            if self.dispatch(event)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => return Ok(true),

                // API operations go through the bridge
                AppAction::CreateStory { .. }
                | AppAction::FetchNeighbors { .. }
                | AppAction::FetchRoomStories { .. } => self.spawn_request(action),
            }
        }
        Ok(false)
    }

    fn spawn_request(&mut self, action: AppAction) {
        let bridge = self.bridge.clone();
        let completions = self.completions_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            if let Some(event) = bridge.execute(action).await {
                // Receiver lives as long as the runtime; a send error means shutdown.
                let _ = completions.send(event);
            }
        });
    }

    /// API tasks spawned but not yet answered.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the Driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Get a reference to the story API
    pub fn api(&self) -> &A {
        self.bridge.api()
    }
}
