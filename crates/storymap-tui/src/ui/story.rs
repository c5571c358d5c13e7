//! Story page
//!
//! The subject's title and body above its predecessors and successors.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use storymap_app::{NOT_FOUND, Remote, StoryPage};
use storymap_core::Story;

use crate::markup;

/// Render the story page.
pub fn render(frame: &mut Frame, page: &StoryPage, area: Rect) {
    const NEIGHBORS_HEIGHT: u16 = 8;

    let Some(subject) = page.subject() else {
        let text = Line::from(Span::styled(NOT_FOUND, Style::default().fg(Color::Red)));
        let block = Block::default().borders(Borders::ALL).title(" Story ");
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(NEIGHBORS_HEIGHT)])
        .split(area);
    let [content_area, neighbors_area] = chunks.as_ref() else {
        return;
    };

    render_content(frame, subject, page.content(), *content_area);
    render_neighbors(frame, page, *neighbors_area);
}

fn render_content(frame: &mut Frame, subject: &Story, content: &str, area: Rect) {
    let title = Span::styled(
        format!(" {} ", subject.title),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    );
    let kind = Span::styled(format!(" {} ", subject.story_type), super::dim());
    let block =
        Block::default().borders(Borders::ALL).title(Line::from(title)).title_bottom(Line::from(kind));

    let paragraph =
        Paragraph::new(markup::to_lines(content)).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(paragraph, area);
}

fn render_neighbors(frame: &mut Frame, page: &StoryPage, area: Rect) {
    let neighbors = match page.neighbors() {
        Remote::Ready(neighbors) => neighbors,
        Remote::Idle | Remote::Loading { .. } => {
            let text = Line::from(Span::styled("Loading related stories…", super::dim()));
            frame.render_widget(Paragraph::new(text).block(related_block()), area);
            return;
        },
        Remote::Failed(message) => {
            let text = Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red)));
            frame.render_widget(Paragraph::new(text).block(related_block()), area);
            return;
        },
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let [prev_area, next_area] = chunks.as_ref() else {
        return;
    };

    // Selection runs over predecessors first, then successors.
    let offset = neighbors.predecessors.len();
    let selected = page.selected();
    render_list(frame, " Comes after ", &neighbors.predecessors, selected, *prev_area);
    render_list(
        frame,
        " Continues with ",
        &neighbors.successors,
        selected.checked_sub(offset).unwrap_or(usize::MAX),
        *next_area,
    );
}

fn related_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title(" Related ")
}

fn render_list(frame: &mut Frame, title: &str, stories: &[Story], selected: usize, area: Rect) {
    let items: Vec<ListItem> = if stories.is_empty() {
        vec![ListItem::new(Line::from(Span::styled("none", super::dim())))]
    } else {
        stories
            .iter()
            .enumerate()
            .map(|(index, story)| {
                let style = if index == selected { super::highlight() } else { Style::default() };
                ListItem::new(Line::from(Span::styled(story.title.clone(), style)))
            })
            .collect()
    };

    let block = Block::default().borders(Borders::ALL).title(title.to_owned());
    frame.render_widget(List::new(items).block(block), area);
}
