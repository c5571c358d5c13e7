//! Sidebar
//!
//! Navigation destinations; the page on screen is marked, the highlighted
//! entry follows the arrow keys.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use storymap_app::{App, Sidebar};

const ACTIVE_PREFIX: &str = ">";
const INACTIVE_PREFIX: &str = " ";

/// Render the sidebar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let sidebar = app.sidebar();
    let current = app.current_route();

    let items: Vec<ListItem> = sidebar
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let active = Sidebar::is_active(item, current);
            let prefix = if active { ACTIVE_PREFIX } else { INACTIVE_PREFIX };
            let style = if index == sidebar.selected() {
                super::highlight()
            } else if active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(format!(" {}", item.label), style),
            ]))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Menu ");
    frame.render_widget(List::new(items).block(block), area);
}
