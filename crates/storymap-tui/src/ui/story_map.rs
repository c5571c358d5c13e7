//! Story map page
//!
//! Every story of the theme room, roots marked.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use storymap_app::{Remote, StoryMapPage};
use storymap_core::StoryType;

/// Render the story map page.
pub fn render(frame: &mut Frame, page: &StoryMapPage, area: Rect) {
    let title = format!(" Theme room {} ", page.theme_room_id());
    let block = Block::default().borders(Borders::ALL).title(title);

    let stories = match page.stories() {
        Remote::Ready(stories) => stories,
        Remote::Idle | Remote::Loading { .. } => {
            let text = Line::from(Span::styled("Loading stories…", super::dim()));
            frame.render_widget(Paragraph::new(text).block(block), area);
            return;
        },
        Remote::Failed(message) => {
            let text = Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red)));
            frame.render_widget(Paragraph::new(text).block(block), area);
            return;
        },
    };

    if stories.is_empty() {
        let text = Line::from(Span::styled("No stories yet. Press n to start one.", super::dim()));
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let items: Vec<ListItem> = stories
        .iter()
        .enumerate()
        .map(|(index, story)| {
            let marker = match story.story_type {
                StoryType::Root => Span::styled("◆ ", Style::default().fg(Color::Cyan)),
                StoryType::Child => Span::styled("  ↳ ", super::dim()),
            };
            let style =
                if index == page.selected() { super::highlight() } else { Style::default() };
            ListItem::new(Line::from(vec![marker, Span::styled(story.title.clone(), style)]))
        })
        .collect();

    let summary = format!(" {} roots · {} stories ", page.root_count(), stories.len());
    let block = block.title_bottom(summary);
    frame.render_widget(List::new(items).block(block), area);
}
