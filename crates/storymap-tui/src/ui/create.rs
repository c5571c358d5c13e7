//! Create story page
//!
//! Title field, formatting toolbar and the composed body. Toolbar buttons
//! light up when their format applies to the block being edited.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use storymap_app::{BlockKind, CreateStoryPage, FormField, FormatCommand};
use storymap_core::CreateContext;

const CURSOR: &str = "▌";

fn field_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { Style::default().fg(Color::Yellow) } else { Style::default() };
    Block::default().borders(Borders::ALL).border_style(border).title(title.to_owned())
}

/// One-line description of where the new story will be linked.
fn context_line(context: &CreateContext) -> Line<'static> {
    let text = match (&context.theme_room_id, &context.prev_story_id) {
        (None, _) => {
            return Line::from(Span::styled(
                "No theme room selected; open one from the story map first.",
                Style::default().fg(Color::Red),
            ));
        },
        (Some(room), _) if context.root_node => format!("New root story in theme room {room}"),
        (Some(room), Some(prev)) => format!("Continuing story {prev} in theme room {room}"),
        (Some(room), None) => format!("New story in theme room {room}"),
    };
    Line::from(Span::styled(text, super::dim()))
}

/// Toolbar buttons, active ones highlighted.
pub fn toolbar(page: &CreateStoryPage) -> Line<'static> {
    let mut spans = Vec::with_capacity(FormatCommand::ALL.len() * 2);
    for command in FormatCommand::ALL {
        let style = if command.is_active(page.composer()) {
            super::highlight()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("[{}]", command.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Composed body as the author sees it while typing.
fn body_lines(page: &CreateStoryPage, focused: bool) -> Vec<Line<'static>> {
    let blocks: Vec<_> = page.composer().blocks().collect();
    let last = blocks.len().saturating_sub(1);
    let mut ordinal = 0;

    blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let prefix = match block.kind {
                BlockKind::Bullet => "• ".to_owned(),
                BlockKind::Ordered => {
                    ordinal += 1;
                    format!("{ordinal}. ")
                },
                BlockKind::Paragraph | BlockKind::Heading => {
                    ordinal = 0;
                    String::new()
                },
            };

            let mut style = Style::default();
            if block.kind == BlockKind::Heading || block.bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            if block.italic {
                style = style.add_modifier(Modifier::ITALIC);
            }

            let mut spans = vec![Span::raw(prefix), Span::styled(block.text.clone(), style)];
            if focused && index == last {
                spans.push(Span::styled(CURSOR, Style::default().fg(Color::Yellow)));
            }
            Line::from(spans)
        })
        .collect()
}

/// Render the create story page.
pub fn render(frame: &mut Frame, page: &CreateStoryPage, area: Rect) {
    const TITLE_HEIGHT: u16 = 3;
    const TOOLBAR_HEIGHT: u16 = 1;
    const MESSAGE_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(TOOLBAR_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(MESSAGE_HEIGHT),
        ])
        .split(area);

    let [context_area, title_area, toolbar_area, body_area, message_area] = chunks.as_ref() else {
        return;
    };

    frame.render_widget(Paragraph::new(context_line(page.context())), *context_area);

    let title_focused = page.focus() == FormField::Title;
    let mut title = vec![Span::raw(page.title().to_owned())];
    if title_focused {
        title.push(Span::styled(CURSOR, Style::default().fg(Color::Yellow)));
    }
    let title_widget = Paragraph::new(Line::from(title)).block(field_block(" Title ", title_focused));
    frame.render_widget(title_widget, *title_area);

    frame.render_widget(Paragraph::new(toolbar(page)), *toolbar_area);

    let body_focused = page.focus() == FormField::Body;
    let body = Paragraph::new(body_lines(page, body_focused))
        .wrap(Wrap { trim: false })
        .block(field_block(" Story ", body_focused));
    frame.render_widget(body, *body_area);

    let message = if page.is_busy() {
        Line::from(Span::styled("Saving…", Style::default().fg(Color::Yellow)))
    } else if let Some(error) = page.error() {
        Line::from(Span::styled(error.to_owned(), Style::default().fg(Color::Red)))
    } else if page.can_submit() {
        Line::from(Span::styled("Ready to submit (^S)", super::dim()))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(message), *message_area);
}
