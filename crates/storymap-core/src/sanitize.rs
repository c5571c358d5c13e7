//! Allow-list HTML sanitising.
//!
//! Story bodies are authored as HTML by the composer and become live markup
//! when rendered, so every body passes through [`sanitize`] before it is
//! stored and again before it is displayed.
//!
//! # Invariants
//!
//! - Output never contains script or style elements, event-handler
//!   attributes, or URLs outside `http`, `https` and `mailto`.
//! - `sanitize(sanitize(x)) == sanitize(x)`.
//! - Never panics; empty input yields empty output.

use std::{collections::HashSet, sync::LazyLock};

/// Formatting and structural tags produced by the composer.
const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "strong", "b", "em", "i",
    "u", "s", "blockquote", "code", "pre", "a",
];

/// Elements removed together with their contents.
const STRIPPED_WITH_CONTENT: &[&str] = &["script", "style"];

const URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

static CLEANER: LazyLock<ammonia::Builder<'static>> = LazyLock::new(|| {
    let mut builder = ammonia::Builder::empty();
    builder
        .add_tags(ALLOWED_TAGS)
        .add_tag_attributes("a", &["href", "title"])
        .url_schemes(URL_SCHEMES.iter().copied().collect::<HashSet<_>>())
        .link_rel(Some("noopener noreferrer"))
        .clean_content_tags(STRIPPED_WITH_CONTENT.iter().copied().collect::<HashSet<_>>())
        .strip_comments(true);
    builder
});

/// Remove unsafe markup from an HTML fragment.
///
/// A cleaning pass re-serializes the parsed tree, and re-parsing is lossy in
/// places (each pass drops one leading newline inside `<pre>`), so cleaning
/// repeats until the output stops changing. A pass that changes the output
/// only ever removes text, so the loop ends.
pub fn sanitize(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let mut current = CLEANER.clean(html).to_string();
    loop {
        let next = CLEANER.clean(&current).to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Insert a line break between adjacent paragraphs so they stay visually
/// separated when rendered.
pub fn format_paragraph_breaks(html: &str) -> String {
    html.replace("</p><p>", "</p><br><p>")
}

/// Sanitize a composed body and normalize paragraph spacing for storage.
pub fn prepare_content(html: &str) -> String {
    format_paragraph_breaks(&sanitize(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_composer_formatting() {
        let html = "<h2>Title</h2><p><strong>bold</strong> and <em>soft</em></p>\
                    <ul><li>one</li></ul><ol><li>two</li></ol>";
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn strips_script_with_contents() {
        let cleaned = sanitize("<p>safe</p><script>alert(1)</script>");
        assert_eq!(cleaned, "<p>safe</p>");
    }

    #[test]
    fn strips_event_handlers() {
        let cleaned = sanitize(r#"<p onclick="steal()">hi</p>"#);
        assert_eq!(cleaned, "<p>hi</p>");
    }

    #[test]
    fn strips_javascript_urls() {
        let cleaned = sanitize(r#"<a href="javascript:alert(1)">x</a>"#);
        assert!(!cleaned.contains("javascript"));
        assert!(cleaned.contains(">x</a>"));
    }

    #[test]
    fn keeps_https_links() {
        let cleaned = sanitize(r#"<a href="https://example.com">x</a>"#);
        assert!(cleaned.contains(r#"href="https://example.com""#));
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "");
    }

    #[test]
    fn unclosed_markup_does_not_panic() {
        let cleaned = sanitize("<p><b>never closed");
        assert_eq!(sanitize(&cleaned), cleaned);
    }

    #[test]
    fn leading_newlines_in_pre_settle() {
        let once = sanitize("<pre>\n\n\n\n\n\n\nx</pre>");
        assert_eq!(sanitize(&once), once);
        assert!(once.ends_with("x</pre>"));
    }

    #[test]
    fn paragraph_breaks_between_adjacent_paragraphs() {
        assert_eq!(format_paragraph_breaks("<p>a</p><p>b</p><p>c</p>"), "<p>a</p><br><p>b</p><br><p>c</p>");
        assert_eq!(format_paragraph_breaks("<p>only</p>"), "<p>only</p>");
    }

    #[test]
    fn prepared_content_survives_display_sanitizing() {
        let prepared = prepare_content("<p>a</p><p>b</p>");
        assert_eq!(prepared, "<p>a</p><br><p>b</p>");
        assert_eq!(sanitize(&prepared), prepared);
    }
}
