//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the system at a point in time.
//! Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks.

use storymap_app::{App, Page, Route, Sidebar};
use storymap_core::{Neighbors, Story};

/// Kind of the mounted page, without its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Landing page.
    Landing,
    /// Home page with the room prompt.
    Home,
    /// Favorites, settings or help.
    Static,
    /// Stories of one theme room.
    StoryMap,
    /// One story and its neighbors.
    Story,
    /// Creation form.
    CreateStory,
}

impl PageKind {
    /// Page kind a route mounts.
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Landing => Self::Landing,
            Route::Home => Self::Home,
            Route::Favorites | Route::Settings | Route::Help => Self::Static,
            Route::StoryMap(_) => Self::StoryMap,
            Route::Story => Self::Story,
            Route::CreateStory => Self::CreateStory,
        }
    }
}

/// Snapshot of the entire system state.
///
/// Holds the App's observable state and, optionally, the contents of the
/// story store behind it.
#[derive(Debug, Clone, Default)]
pub struct SystemSnapshot {
    /// Current route. `None` for an empty snapshot.
    pub route: Option<Route>,
    /// Kind of the mounted page.
    pub page: Option<PageKind>,
    /// Number of history entries.
    pub history_len: usize,
    /// Sidebar state.
    pub sidebar: Option<SidebarSnapshot>,
    /// Story page state, if mounted.
    pub story: Option<StorySnapshot>,
    /// Story map page state, if mounted.
    pub story_map: Option<StoryMapSnapshot>,
    /// Creation form state, if mounted.
    pub create: Option<CreateSnapshot>,
    /// Stories held by the store.
    pub store: Vec<Story>,
}

impl SystemSnapshot {
    /// Create an empty snapshot (no app, no store).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture the observable state of `app`.
    pub fn from_app(app: &App) -> Self {
        let mut snapshot = Self {
            route: Some(app.current_route().clone()),
            page: None,
            history_len: app.history().len(),
            sidebar: Some(SidebarSnapshot::from_sidebar(app.sidebar())),
            ..Self::default()
        };

        snapshot.page = Some(match app.page() {
            Page::Landing => PageKind::Landing,
            Page::Home(_) => PageKind::Home,
            Page::Static(_) => PageKind::Static,
            Page::StoryMap(page) => {
                snapshot.story_map = Some(StoryMapSnapshot {
                    stories: page.stories().ready().cloned(),
                    loading: page.stories().is_loading(),
                    selected: page.selected(),
                });
                PageKind::StoryMap
            },
            Page::Story(page) => {
                snapshot.story = Some(StorySnapshot {
                    subject: page.subject().cloned(),
                    neighbors: page.neighbors().ready().cloned(),
                    loading: page.neighbors().is_loading(),
                    selected: page.selected(),
                });
                PageKind::Story
            },
            Page::CreateStory(page) => {
                snapshot.create = Some(CreateSnapshot {
                    busy: page.is_busy(),
                    pending: page.pending().is_some(),
                    can_submit: page.can_submit(),
                });
                PageKind::CreateStory
            },
        });

        snapshot
    }

    /// Attach the store contents.
    #[must_use]
    pub fn with_store(mut self, stories: Vec<Story>) -> Self {
        self.store = stories;
        self
    }
}

/// Snapshot of the sidebar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidebarSnapshot {
    /// Whether the sidebar is shown.
    pub open: bool,
    /// Highlighted entry.
    pub selected: usize,
    /// Number of entries.
    pub len: usize,
}

impl SidebarSnapshot {
    fn from_sidebar(sidebar: &Sidebar) -> Self {
        Self { open: sidebar.is_open(), selected: sidebar.selected(), len: sidebar.items().len() }
    }
}

/// Snapshot of the story page.
#[derive(Debug, Clone, Default)]
pub struct StorySnapshot {
    /// Displayed story. `None` renders the not-found state.
    pub subject: Option<Story>,
    /// Resolved neighbors, if the fetch succeeded.
    pub neighbors: Option<Neighbors>,
    /// A neighbor fetch is outstanding.
    pub loading: bool,
    /// Highlighted neighbor.
    pub selected: usize,
}

/// Snapshot of the story map page.
#[derive(Debug, Clone, Default)]
pub struct StoryMapSnapshot {
    /// Loaded room stories.
    pub stories: Option<Vec<Story>>,
    /// A room fetch is outstanding.
    pub loading: bool,
    /// Highlighted story.
    pub selected: usize,
}

/// Snapshot of the creation form.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateSnapshot {
    /// A submission is outstanding.
    pub busy: bool,
    /// A request id is recorded for the submission.
    pub pending: bool,
    /// The submit control is enabled.
    pub can_submit: bool,
}

#[cfg(test)]
mod tests {
    use storymap_app::Session;
    use storymap_core::{AuthorId, ThemeRoomId};

    use super::*;

    fn app(route: Route) -> App {
        App::new(Session::new(AuthorId::new("a1")), route)
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = SystemSnapshot::empty();
        assert!(snapshot.route.is_none());
        assert!(snapshot.store.is_empty());
    }

    #[test]
    fn story_map_snapshot_tracks_loading() {
        let mut app = app(Route::StoryMap(ThemeRoomId::new("r1")));
        app.start();

        let snapshot = SystemSnapshot::from_app(&app);
        assert_eq!(snapshot.page, Some(PageKind::StoryMap));
        assert!(snapshot.story_map.is_some_and(|map| map.loading));
        assert!(snapshot.story.is_none());
    }

    #[test]
    fn create_snapshot_starts_idle() {
        let snapshot = SystemSnapshot::from_app(&app(Route::CreateStory));
        let create = snapshot.create.unwrap();
        assert!(!create.busy);
        assert!(!create.pending);
        assert_eq!(snapshot.history_len, 1);
    }
}
