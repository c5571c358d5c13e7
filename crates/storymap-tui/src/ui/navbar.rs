//! Navbar
//!
//! App name, current path and the signed-in author.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use storymap_app::App;

const APP_NAME: &str = " StoryMap ";

/// Render the navbar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            APP_NAME,
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(app.current_route().path(), Style::default().fg(Color::White)),
        Span::styled(format!("  @{}", app.session().author_id()), super::dim()),
    ]);

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(Color::Black)), area);
}
