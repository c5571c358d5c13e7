//! Page state.
//!
//! One [`Page`] is mounted at a time, built from the current history entry.
//! Pages own their request bookkeeping; the [`crate::App`] only routes
//! completions to whichever page is mounted.

mod create;
mod home;
mod story;
mod story_map;

pub use create::{CREATE_FAILED, CreateStoryPage, FormField, Submission};
pub use home::HomePage;
pub use story::{NEIGHBORS_FAILED, NOT_FOUND, StoryPage};
pub use story_map::{ROOM_FAILED, StoryMapPage};

use crate::{AppAction, NavEntry, RequestIds, Route};

/// Mounted page.
#[derive(Debug, Clone)]
pub enum Page {
    /// `/`
    Landing,
    /// `/home`
    Home(HomePage),
    /// `/favorites`, `/settings`, `/help`
    Static(Route),
    /// `/story-map/:id`
    StoryMap(StoryMapPage),
    /// `/story`
    Story(StoryPage),
    /// `/create-story`
    CreateStory(CreateStoryPage),
}

impl Page {
    /// Build the page for `entry`. Nothing is requested yet.
    pub fn mount(entry: &NavEntry) -> Self {
        match &entry.route {
            Route::Landing => Self::Landing,
            Route::Home => Self::Home(HomePage::default()),
            Route::Favorites | Route::Settings | Route::Help => Self::Static(entry.route.clone()),
            Route::StoryMap(id) => Self::StoryMap(StoryMapPage::new(id.clone())),
            Route::Story => Self::Story(StoryPage::new(entry.state.story().cloned())),
            Route::CreateStory => Self::CreateStory(CreateStoryPage::new(entry.state.create_context())),
        }
    }

    /// Issue the requests the freshly mounted page needs.
    pub fn begin(&mut self, ids: &mut RequestIds) -> Option<AppAction> {
        match self {
            Self::StoryMap(page) => Some(page.begin(ids)),
            Self::Story(page) => page.begin(ids),
            Self::Landing | Self::Home(_) | Self::Static(_) | Self::CreateStory(_) => None,
        }
    }
}
