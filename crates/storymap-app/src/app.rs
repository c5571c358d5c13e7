//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the
//! interactive state of the story map completely decoupled from terminal
//! and network mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Keeps the navigation history and mounts the page for its top entry.
//! - Routes key presses to the sidebar or the mounted page.
//! - Allocates request ids and routes API completions to the page waiting
//!   for them; completions nobody waits for are dropped.
//! - Stores terminal dimensions and a transient status line.

use storymap_client::RequestError;
use storymap_core::{CreateContext, Story};

use crate::{
    AppAction, AppEvent, FormatCommand, History, KeyInput, NavEntry, NavState, Page, RequestId,
    RequestIds, Route, Session, Sidebar, Submission,
};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    session: Session,
    history: History,
    /// Page for the top history entry.
    page: Page,
    sidebar: Sidebar,
    requests: RequestIds,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create an App for `session` showing `start`.
    ///
    /// The start page issues its requests on [`Self::start`].
    pub fn new(session: Session, start: Route) -> Self {
        let entry = NavEntry::new(start, NavState::Empty);
        let page = Page::mount(&entry);
        Self {
            session,
            history: History::new(entry),
            page,
            sidebar: Sidebar::new(),
            requests: RequestIds::default(),
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Issue the start page's requests and draw the first frame.
    pub fn start(&mut self) -> Vec<AppAction> {
        let mut actions: Vec<AppAction> = self.page.begin(&mut self.requests).into_iter().collect();
        actions.push(AppAction::Render);
        actions
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Navigate { route, state } => self.navigate(route, state),
            AppEvent::Back => self.back(),
            AppEvent::StoryCreated { request, result } => self.story_created(request, result),
            AppEvent::NeighborsResolved { request, result } => {
                let applied = match &mut self.page {
                    Page::Story(page) => page.resolve(request, result),
                    _ => false,
                };
                self.render_if(applied, request)
            },
            AppEvent::RoomStoriesLoaded { request, result } => {
                let applied = match &mut self.page {
                    Page::StoryMap(page) => page.resolve(request, result),
                    _ => false,
                };
                self.render_if(applied, request)
            },
        }
    }

    /// Open `route` with `state`, keeping the current page in history.
    pub fn navigate(&mut self, route: Route, state: NavState) -> Vec<AppAction> {
        tracing::debug!(%route, "navigate");
        self.history.push(NavEntry::new(route, state));
        self.status_message = None;
        self.remount()
    }

    /// Return to the previous page. Quits on the first page.
    pub fn back(&mut self) -> Vec<AppAction> {
        if !self.history.back() {
            return self.quit();
        }
        tracing::debug!(route = %self.history.current().route, "back");
        self.remount()
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    fn remount(&mut self) -> Vec<AppAction> {
        self.page = Page::mount(self.history.current());
        let mut actions: Vec<AppAction> = self.page.begin(&mut self.requests).into_iter().collect();
        actions.push(AppAction::Render);
        actions
    }

    fn render_if(&self, applied: bool, request: RequestId) -> Vec<AppAction> {
        if applied {
            vec![AppAction::Render]
        } else {
            tracing::debug!(%request, route = %self.current_route(), "dropping completion");
            vec![]
        }
    }

    fn story_created(
        &mut self,
        request: RequestId,
        result: Result<Story, RequestError>,
    ) -> Vec<AppAction> {
        let Page::CreateStory(page) = &mut self.page else {
            return self.render_if(false, request);
        };

        match page.resolve(request, result) {
            Submission::Created(story) => {
                let actions = self.back();
                self.status_message = Some(format!("Created \"{}\"", story.title));
                actions
            },
            Submission::Failed => vec![AppAction::Render],
            Submission::Stale => self.render_if(false, request),
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Ctrl('q') => return self.quit(),
            KeyInput::Ctrl('n') => {
                self.sidebar.toggle();
                return vec![AppAction::Render];
            },
            _ => {},
        }

        if self.sidebar.is_open() {
            return self.sidebar_key(key);
        }

        match self.page {
            Page::CreateStory(_) => self.create_key(key),
            Page::Home(_) => self.home_key(key),
            Page::Story(_) => self.story_key(key),
            Page::StoryMap(_) => self.story_map_key(key),
            Page::Landing => match key {
                KeyInput::Enter => self.navigate(Route::Home, NavState::Empty),
                KeyInput::Char('q') => self.quit(),
                KeyInput::Esc => self.back(),
                _ => vec![],
            },
            Page::Static(_) => match key {
                KeyInput::Char('q') => self.quit(),
                KeyInput::Esc => self.back(),
                _ => vec![],
            },
        }
    }

    fn sidebar_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Up => self.sidebar.select_prev(),
            KeyInput::Down => self.sidebar.select_next(),
            KeyInput::Esc => self.sidebar.close(),
            KeyInput::Enter => {
                if let Some(route) = self.sidebar.choose() {
                    return self.navigate(route, NavState::Empty);
                }
            },
            _ => return vec![],
        }
        vec![AppAction::Render]
    }

    fn home_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        let Page::Home(page) = &mut self.page else {
            return vec![];
        };

        if key == KeyInput::Esc {
            return self.back();
        }
        match page.handle_key(key) {
            Some(room) => self.navigate(Route::StoryMap(room), NavState::Empty),
            None => vec![AppAction::Render],
        }
    }

    fn create_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        let Page::CreateStory(page) = &mut self.page else {
            return vec![];
        };

        let command = match key {
            KeyInput::Esc => return self.back(),
            KeyInput::Ctrl('s') => {
                return match page.submit(&self.session, &mut self.requests) {
                    Some(action) => vec![action, AppAction::Render],
                    None => vec![AppAction::Render],
                };
            },
            KeyInput::Ctrl('b') => Some(FormatCommand::Bold),
            KeyInput::Ctrl('e') => Some(FormatCommand::Italic),
            KeyInput::Ctrl('t') => Some(FormatCommand::Heading2),
            KeyInput::Ctrl('l') => Some(FormatCommand::BulletList),
            KeyInput::Ctrl('o') => Some(FormatCommand::OrderedList),
            _ => None,
        };

        let changed = match command {
            Some(command) => {
                command.apply(page.composer_mut());
                true
            },
            None => page.handle_key(key),
        };
        if changed { vec![AppAction::Render] } else { vec![] }
    }

    fn story_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        let Page::Story(page) = &mut self.page else {
            return vec![];
        };

        match key {
            KeyInput::Up => page.select_prev(),
            KeyInput::Down => page.select_next(),
            KeyInput::Enter => {
                if let Some(neighbor) = page.selected_neighbor().cloned() {
                    return self.navigate(Route::Story, NavState::Story(neighbor));
                }
            },
            KeyInput::Char('c') => {
                if let Some(story) = page.subject() {
                    let context =
                        CreateContext::continuing(story.id.clone(), story.theme_room_id.clone());
                    return self.navigate(Route::CreateStory, NavState::Create(context));
                }
            },
            KeyInput::Char('m') => {
                if let Some(story) = page.subject() {
                    let route = Route::StoryMap(story.theme_room_id.clone());
                    return self.navigate(route, NavState::Empty);
                }
            },
            KeyInput::Char('q') => return self.quit(),
            KeyInput::Esc => return self.back(),
            _ => return vec![],
        }
        vec![AppAction::Render]
    }

    fn story_map_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        let Page::StoryMap(page) = &mut self.page else {
            return vec![];
        };

        match key {
            KeyInput::Up => page.select_prev(),
            KeyInput::Down => page.select_next(),
            KeyInput::Enter => {
                if let Some(story) = page.selected_story().cloned() {
                    return self.navigate(Route::Story, NavState::Story(story));
                }
            },
            KeyInput::Char('n') => {
                let context = page.new_root_context();
                return self.navigate(Route::CreateStory, NavState::Create(context));
            },
            KeyInput::Char('r') => {
                let action = page.begin(&mut self.requests);
                return vec![action, AppAction::Render];
            },
            KeyInput::Char('q') => return self.quit(),
            KeyInput::Esc => return self.back(),
            _ => return vec![],
        }
        vec![AppAction::Render]
    }

    /// Signed-in user.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mounted page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Route of the mounted page.
    pub fn current_route(&self) -> &Route {
        &self.history.current().route
    }

    /// Visited pages.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Navigation menu.
    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use storymap_core::{AuthorId, StoryType, ThemeRoomId};

    use super::*;

    fn app_at(route: Route) -> App {
        App::new(Session::new(AuthorId::new("author-1")), route)
    }

    fn story(id: &str, prev: &[&str], next: &[&str]) -> Story {
        Story {
            id: id.into(),
            title: format!("Story {id}"),
            content: "<p>body</p>".into(),
            story_type: StoryType::Child,
            theme_room_id: ThemeRoomId::new("room"),
            prev: prev.iter().map(|&p| p.into()).collect(),
            next: next.iter().map(|&n| n.into()).collect(),
            author_id: "a1".into(),
        }
    }

    fn type_keys(app: &mut App, text: &str) {
        for c in text.chars() {
            let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
        }
    }

    #[test]
    fn story_map_start_fetches_room() {
        let mut app = app_at(Route::StoryMap("1".into()));
        let actions = app.start();

        assert!(matches!(actions.as_slice(), [
            AppAction::FetchRoomStories { .. },
            AppAction::Render
        ]));
    }

    #[test]
    fn story_without_state_renders_not_found() {
        let mut app = app_at(Route::Landing);
        let actions = app.navigate(Route::Story, NavState::Empty);

        assert_eq!(actions, vec![AppAction::Render]);
        assert!(matches!(app.page(), Page::Story(page) if page.is_not_found()));
    }

    #[test]
    fn back_on_first_page_quits() {
        let mut app = app_at(Route::Home);
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Esc)), vec![AppAction::Quit]);
    }

    #[test]
    fn neighbor_selection_navigates() {
        let mut app = app_at(Route::Landing);
        let actions = app.navigate(Route::Story, NavState::Story(story("s2", &["s1"], &[])));
        let request = actions[0].request_id().unwrap();
        let _ = app.handle(AppEvent::NeighborsResolved {
            request,
            result: Ok(vec![story("s1", &[], &["s2"])]),
        });

        let actions = app.handle(AppEvent::Key(KeyInput::Enter));

        assert!(matches!(actions.as_slice(), [AppAction::FetchNeighbors { .. }, AppAction::Render]));
        let Page::Story(page) = app.page() else { panic!("expected story page") };
        assert_eq!(page.subject().map(|s| s.id.as_str()), Some("s1"));
        assert_eq!(app.history().len(), 3);
    }

    #[test]
    fn stale_neighbors_after_leaving_page_dropped() {
        let mut app = app_at(Route::Landing);
        let actions = app.navigate(Route::Story, NavState::Story(story("s2", &["s1"], &[])));
        let request = actions[0].request_id().unwrap();
        let _ = app.back();

        let actions = app.handle(AppEvent::NeighborsResolved { request, result: Ok(Vec::new()) });

        assert!(actions.is_empty());
        assert!(matches!(app.page(), Page::Landing));
    }

    #[test]
    fn continue_opens_linked_creation_form() {
        let mut app = app_at(Route::Landing);
        let _ = app.navigate(Route::Story, NavState::Story(story("s2", &[], &[])));
        let _ = app.handle(AppEvent::Key(KeyInput::Char('c')));

        let Page::CreateStory(page) = app.page() else { panic!("expected creation page") };
        assert_eq!(page.context(), &CreateContext::continuing("s2".into(), "room".into()));
    }

    #[test]
    fn created_story_returns_to_previous_page() {
        let mut app = app_at(Route::StoryMap("room".into()));
        let _ = app.start();
        let _ = app.handle(AppEvent::Key(KeyInput::Char('n')));
        type_keys(&mut app, "Chapter 1");
        let _ = app.handle(AppEvent::Key(KeyInput::Tab));
        type_keys(&mut app, "It began.");

        let actions = app.handle(AppEvent::Key(KeyInput::Ctrl('s')));
        let Some(AppAction::CreateStory { request, draft }) = actions.first().cloned() else {
            panic!("expected creation action, got {actions:?}");
        };
        assert_eq!(draft.story_type, StoryType::Root);
        assert_eq!(draft.author_id, AuthorId::new("author-1"));

        let mut stored = story("new", &[], &[]);
        stored.title = draft.title.clone();
        let actions = app.handle(AppEvent::StoryCreated { request, result: Ok(stored) });

        assert!(matches!(app.current_route(), Route::StoryMap(_)));
        assert!(actions.iter().any(|a| matches!(a, AppAction::FetchRoomStories { .. })));
        assert_eq!(app.status_message(), Some("Created \"Chapter 1\""));
    }

    #[test]
    fn sidebar_captures_navigation_keys() {
        let mut app = app_at(Route::Landing);
        let _ = app.handle(AppEvent::Key(KeyInput::Ctrl('n')));
        assert!(app.sidebar().is_open());

        let _ = app.handle(AppEvent::Key(KeyInput::Down));
        let _ = app.handle(AppEvent::Key(KeyInput::Enter));

        assert_eq!(app.current_route(), &Route::Favorites);
        assert!(!app.sidebar().is_open());
    }

    #[test]
    fn toolbar_shortcut_toggles_format() {
        let mut app = app_at(Route::CreateStory);
        let _ = app.handle(AppEvent::Key(KeyInput::Ctrl('b')));

        let Page::CreateStory(page) = app.page() else { panic!("expected creation page") };
        assert!(FormatCommand::Bold.is_active(page.composer()));
    }
}
