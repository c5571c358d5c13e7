//! Routes, navigation state and history.
//!
//! Every page is reached through a [`Route`]. Pages that need more than
//! their path (the story page needs its subject, the creation page its
//! linkage context) receive it as [`NavState`], handed over in-process and
//! never persisted. [`History`] keeps the visited `(Route, NavState)` pairs
//! so "back" restores the previous page exactly.

use std::fmt;

use storymap_core::{CreateContext, Story, ThemeRoomId};

/// Addressable page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Landing,
    /// `/home`
    Home,
    /// `/favorites`
    Favorites,
    /// `/settings`
    Settings,
    /// `/help`
    Help,
    /// `/story-map/:id`
    StoryMap(ThemeRoomId),
    /// `/story`
    Story,
    /// `/create-story`
    CreateStory,
}

impl Route {
    /// Parse a path. Trailing slashes are ignored.
    ///
    /// Returns `None` for unknown paths and for `/story-map/` without an id
    /// (or with an id containing `/`).
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let route = match trimmed {
            "" => Self::Landing,
            "/home" => Self::Home,
            "/favorites" => Self::Favorites,
            "/settings" => Self::Settings,
            "/help" => Self::Help,
            "/story" => Self::Story,
            "/create-story" => Self::CreateStory,
            other => {
                let id = other.strip_prefix("/story-map/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Self::StoryMap(ThemeRoomId::new(id))
            },
        };
        Some(route)
    }

    /// Path for this route.
    pub fn path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::Home => "/home".to_string(),
            Self::Favorites => "/favorites".to_string(),
            Self::Settings => "/settings".to_string(),
            Self::Help => "/help".to_string(),
            Self::StoryMap(id) => format!("/story-map/{id}"),
            Self::Story => "/story".to_string(),
            Self::CreateStory => "/create-story".to_string(),
        }
    }

    /// True if `other` is the same page, ignoring route parameters.
    pub fn same_page(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// State handed to a page on navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavState {
    /// Nothing handed over.
    #[default]
    Empty,
    /// Subject of the story page.
    Story(Story),
    /// Linkage for the creation page.
    Create(CreateContext),
}

impl NavState {
    /// Story subject, if this state carries one.
    pub fn story(&self) -> Option<&Story> {
        match self {
            Self::Story(story) => Some(story),
            Self::Empty | Self::Create(_) => None,
        }
    }

    /// Creation context; empty for any other state.
    pub fn create_context(&self) -> CreateContext {
        match self {
            Self::Create(context) => context.clone(),
            Self::Empty | Self::Story(_) => CreateContext::default(),
        }
    }
}

/// One visited page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    /// Page path.
    pub route: Route,
    /// State the page was opened with.
    pub state: NavState,
}

impl NavEntry {
    /// Entry for `route` opened with `state`.
    pub fn new(route: Route, state: NavState) -> Self {
        Self { route, state }
    }
}

/// Stack of visited pages. Never empty.
#[derive(Debug, Clone)]
pub struct History {
    first: NavEntry,
    rest: Vec<NavEntry>,
}

impl History {
    /// History starting at `entry`.
    pub fn new(entry: NavEntry) -> Self {
        Self { first: entry, rest: Vec::new() }
    }

    /// Page currently shown.
    pub fn current(&self) -> &NavEntry {
        self.rest.last().unwrap_or(&self.first)
    }

    /// Visit a new page.
    pub fn push(&mut self, entry: NavEntry) {
        self.rest.push(entry);
    }

    /// Step back one page.
    ///
    /// Returns `false` (and changes nothing) on the first page.
    pub fn back(&mut self) -> bool {
        self.rest.pop().is_some()
    }

    /// Number of entries, current page included.
    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    /// Always false: history holds at least the first page.
    pub fn is_empty(&self) -> bool {
        false
    }
}
