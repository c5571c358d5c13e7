//! Footer
//!
//! Status message on the first line, key hints for the mounted page on the
//! second.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use storymap_app::{App, Page};

/// Key hints for the mounted page.
fn hints(app: &App) -> &'static str {
    if app.sidebar().is_open() {
        return "↑↓ select · Enter open · Esc close";
    }
    match app.page() {
        Page::Landing => "Enter start · ^N menu · q quit",
        Page::Home(_) => "type a theme room id · Enter open · Esc back · ^N menu",
        Page::Static(_) => "Esc back · ^N menu · q quit",
        Page::StoryMap(_) => "↑↓ select · Enter read · n new story · r reload · Esc back",
        Page::Story(_) => "↑↓ select · Enter read · c continue · m theme room · Esc back",
        Page::CreateStory(_) => {
            "Tab field · ^S submit · ^B bold ^E italic ^T heading ^L list ^O numbered · Esc cancel"
        },
    }
}

/// Render the footer.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.status_message().map_or_else(Line::default, |message| {
        Line::from(Span::styled(format!(" {message}"), Style::default().fg(Color::Yellow)))
    });
    let hint = Line::from(Span::styled(format!(" {}", hints(app)), super::dim()));

    frame.render_widget(Paragraph::new(vec![status, hint]), area);
}
