//! Landing, home and static pages.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use storymap_app::{HomePage, Route};

/// Render the landing page.
pub fn render_landing(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "StoryMap",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from("Write stories together, one branch at a time."),
        Line::default(),
        Line::from(Span::styled("Press Enter to begin", super::dim())),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Render the home page with its theme room prompt.
pub fn render_home(frame: &mut Frame, page: &HomePage, area: Rect) {
    let lines = vec![
        Line::from("Open a theme room to browse its stories."),
        Line::default(),
        Line::from(vec![
            Span::styled("Theme room: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(page.room_input().to_owned()),
            Span::styled("▌", Style::default().fg(Color::Yellow)),
        ]),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Home ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the favorites, settings or help page.
pub fn render_static(frame: &mut Frame, route: &Route, area: Rect) {
    let (title, body): (&str, &[&str]) = match route {
        Route::Favorites => (" Favorites ", &["No favorite stories yet."]),
        Route::Settings => (" Settings ", &["Author and server are set on the command line."]),
        _ => (
            " Help ",
            &[
                "^N opens the menu from any page; Esc steps back.",
                "On a story, c continues it and m opens its theme room.",
                "In a theme room, n starts a new root story.",
                "While writing, ^S submits the story.",
            ],
        ),
    };

    let lines: Vec<Line> = body.iter().map(|&text| Line::from(text)).collect();
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }).block(block), area);
}
