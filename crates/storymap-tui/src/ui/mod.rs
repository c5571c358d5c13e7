//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing into a frame.

mod create;
mod footer;
mod home;
mod navbar;
mod sidebar;
mod story;
mod story_map;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
};
use storymap_app::{App, Page};

/// Style of the highlighted entry in any list.
fn highlight() -> Style {
    Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
}

/// Style of secondary text.
fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const NAVBAR_HEIGHT: u16 = 1;
    const BODY_MIN_HEIGHT: u16 = 3;
    const FOOTER_HEIGHT: u16 = 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NAVBAR_HEIGHT),
            Constraint::Min(BODY_MIN_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    let [navbar_area, body_area, footer_area] = chunks.as_ref() else {
        return;
    };

    navbar::render(frame, app, *navbar_area);
    render_body(frame, app, *body_area);
    footer::render(frame, app, *footer_area);
}

/// Render the body (sidebar when open, then the mounted page).
fn render_body(frame: &mut Frame, app: &App, area: Rect) {
    const SIDEBAR_WIDTH: u16 = 20;
    const PAGE_MIN_WIDTH: u16 = 20;

    let page_area = if app.sidebar().is_open() {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(PAGE_MIN_WIDTH)])
            .split(area);
        let [sidebar_area, page_area] = chunks.as_ref() else {
            return;
        };
        sidebar::render(frame, app, *sidebar_area);
        *page_area
    } else {
        area
    };

    match app.page() {
        Page::Landing => home::render_landing(frame, page_area),
        Page::Home(page) => home::render_home(frame, page, page_area),
        Page::Static(route) => home::render_static(frame, route, page_area),
        Page::StoryMap(page) => story_map::render(frame, page, page_area),
        Page::Story(page) => story::render(frame, page, page_area),
        Page::CreateStory(page) => create::render(frame, page, page_area),
    }
}
