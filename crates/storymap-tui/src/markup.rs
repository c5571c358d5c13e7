//! Sanitized HTML to styled terminal lines.
//!
//! Input is story content that already went through
//! [`storymap_core::sanitize`], so only the allow-listed tags appear and
//! attributes can be ignored. Unknown tags are dropped, their text kept.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use scraper::{ElementRef, Html, Node};

const BULLET: &str = "• ";
const INDENT: &str = "  ";
const QUOTE_BAR: &str = "│ ";

#[derive(Debug, Clone, Copy)]
enum List {
    Bullet,
    Ordered(usize),
}

/// Line builder state while walking the markup.
#[derive(Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    lists: Vec<List>,
    bold: usize,
    italic: usize,
    underline: usize,
    strike: usize,
    code: usize,
    heading: usize,
    link: usize,
    quote: usize,
    pre: usize,
}

impl Renderer {
    fn style(&self) -> Style {
        let mut style = Style::default();
        if self.bold > 0 || self.heading > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underline > 0 || self.link > 0 {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if self.strike > 0 {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        if self.heading > 0 {
            style = style.fg(Color::Yellow);
        } else if self.link > 0 {
            style = style.fg(Color::Cyan);
        } else if self.code > 0 || self.pre > 0 {
            style = style.fg(Color::Green);
        }
        style
    }

    fn start_line(&mut self) {
        if self.quote > 0 && self.spans.is_empty() {
            let bar = QUOTE_BAR.repeat(self.quote);
            self.spans.push(Span::styled(bar, Style::default().fg(Color::DarkGray)));
        }
    }

    fn has_text(&self) -> bool {
        self.spans.iter().any(|span| !span.content.trim().is_empty())
    }

    /// End the current line if it holds text.
    fn flush(&mut self) {
        if self.has_text() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        } else {
            self.spans.clear();
        }
    }

    /// End the current line, emitting it even when empty.
    fn line_break(&mut self) {
        self.lines.push(Line::from(std::mem::take(&mut self.spans)));
    }

    fn text(&mut self, raw: &str) {
        let text = if self.pre > 0 { raw.to_owned() } else { collapse_whitespace(raw) };

        let text = if self.spans.iter().all(|s| s.content.trim().is_empty()) {
            text.trim_start().to_owned()
        } else {
            text
        };
        if text.is_empty() {
            return;
        }

        self.start_line();
        let style = self.style();
        self.spans.push(Span::styled(text, style));
    }

    fn open(&mut self, name: &str) {
        match name {
            "p" | "pre" => {
                self.flush();
                if name == "pre" {
                    self.pre += 1;
                }
            },
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.flush();
                self.heading += 1;
            },
            "br" => self.line_break(),
            "ul" => {
                self.flush();
                self.lists.push(List::Bullet);
            },
            "ol" => {
                self.flush();
                self.lists.push(List::Ordered(0));
            },
            "li" => {
                self.flush();
                self.start_line();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(List::Ordered(n)) => {
                        *n += 1;
                        format!("{n}. ")
                    },
                    Some(List::Bullet) | None => BULLET.to_owned(),
                };
                self.spans.push(Span::raw(format!("{}{marker}", INDENT.repeat(depth))));
            },
            "blockquote" => {
                self.flush();
                self.quote += 1;
            },
            "strong" | "b" => self.bold += 1,
            "em" | "i" => self.italic += 1,
            "u" => self.underline += 1,
            "s" => self.strike += 1,
            "code" => self.code += 1,
            "a" => self.link += 1,
            _ => {},
        }
    }

    fn close(&mut self, name: &str) {
        match name {
            "p" | "li" => self.flush(),
            "pre" => {
                self.flush();
                self.pre = self.pre.saturating_sub(1);
            },
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.flush();
                self.heading = self.heading.saturating_sub(1);
            },
            "ul" | "ol" => {
                self.flush();
                self.lists.pop();
            },
            "blockquote" => {
                self.flush();
                self.quote = self.quote.saturating_sub(1);
            },
            "strong" | "b" => self.bold = self.bold.saturating_sub(1),
            "em" | "i" => self.italic = self.italic.saturating_sub(1),
            "u" => self.underline = self.underline.saturating_sub(1),
            "s" => self.strike = self.strike.saturating_sub(1),
            "code" => self.code = self.code.saturating_sub(1),
            "a" => self.link = self.link.saturating_sub(1),
            _ => {},
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        self.lines
    }
}

/// Convert sanitized HTML into styled lines.
pub fn to_lines(html: &str) -> Vec<Line<'static>> {
    let fragment = Html::parse_fragment(html);
    let mut renderer = Renderer::default();
    walk(&mut renderer, fragment.root_element());
    renderer.finish()
}

fn walk(renderer: &mut Renderer, element: ElementRef<'_>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => renderer.text(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    let name = child.value().name();
                    renderer.open(name);
                    walk(renderer, child);
                    renderer.close(name);
                }
            },
            _ => {},
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn paragraphs_become_lines() {
        let lines = to_lines("<p>one</p><p>two</p>");
        assert_eq!(plain(&lines), vec!["one", "two"]);
    }

    #[test]
    fn stored_paragraph_break_leaves_blank_line() {
        let lines = to_lines("<p>one</p><br><p>two</p>");
        assert_eq!(plain(&lines), vec!["one", "", "two"]);
    }

    #[test]
    fn lists_get_markers() {
        let lines = to_lines("<ul><li>a</li><li>b</li></ul><ol><li>x</li><li>y</li></ol>");
        assert_eq!(plain(&lines), vec!["• a", "• b", "1. x", "2. y"]);
    }

    #[test]
    fn inline_marks_style_spans() {
        let lines = to_lines("<p>plain <strong>bold</strong> <em>soft</em></p>");
        let spans = &lines[0].spans;

        let bold = spans.iter().find(|s| s.content == "bold").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        let soft = spans.iter().find(|s| s.content == "soft").unwrap();
        assert!(soft.style.add_modifier.contains(Modifier::ITALIC));
        assert!(!soft.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn headings_are_bold() {
        let lines = to_lines("<h2>Morning</h2><p>text</p>");
        assert_eq!(plain(&lines), vec!["Morning", "text"]);
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn entities_are_decoded() {
        let lines = to_lines("<p>a &lt;b&gt; &amp;amp; c</p>");
        assert_eq!(plain(&lines), vec!["a <b> &amp; c"]);
    }

    #[test]
    fn whitespace_collapses_outside_pre() {
        let lines = to_lines("<p>  spaced \n  out </p>");
        assert_eq!(plain(&lines), vec!["spaced out "]);
    }

    #[test]
    fn unclosed_tags_close_at_the_end() {
        let lines = to_lines("<p>open <em>soft");
        assert_eq!(plain(&lines), vec!["open soft"]);
        assert!(lines[0].spans[1].style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn nested_lists_indent() {
        let lines = to_lines("<ul><li>a<ul><li>b</li></ul></li></ul>");
        assert_eq!(plain(&lines), vec!["• a", "  • b"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(to_lines("").is_empty());
    }
}
