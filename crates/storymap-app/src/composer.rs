//! Block-based rich-text composer.
//!
//! The composer holds story text as a list of blocks and renders it to the
//! HTML the creation flow submits. Editing happens at the end of the last
//! block; formatting commands act on that block.

/// Structural kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockKind {
    /// `<p>`
    #[default]
    Paragraph,
    /// `<h2>`
    Heading,
    /// `<li>` inside `<ul>`
    Bullet,
    /// `<li>` inside `<ol>`
    Ordered,
}

impl BlockKind {
    fn is_list(self) -> bool {
        matches!(self, Self::Bullet | Self::Ordered)
    }
}

/// One block of text with whole-block inline marks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// Structural kind.
    pub kind: BlockKind,
    /// Plain text.
    pub text: String,
    /// Rendered strong.
    pub bold: bool,
    /// Rendered emphasized.
    pub italic: bool,
}

impl Block {
    fn continuing(previous: &Self) -> Self {
        Self { kind: previous.kind, ..Self::default() }
    }

    fn inline_html(&self) -> String {
        let mut html = html_escape::encode_text(&self.text).into_owned();
        if self.italic {
            html = format!("<em>{html}</em>");
        }
        if self.bold {
            html = format!("<strong>{html}</strong>");
        }
        html
    }
}

/// Story body editor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composer {
    blocks: Vec<Block>,
    current: Block,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    /// Empty composer with one paragraph.
    pub fn new() -> Self {
        Self { blocks: Vec::new(), current: Block::default() }
    }

    /// All blocks, the one being edited last.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().chain(std::iter::once(&self.current))
    }

    /// Block being edited.
    pub fn current(&self) -> &Block {
        &self.current
    }

    /// True if no block holds visible text.
    pub fn is_empty(&self) -> bool {
        self.blocks().all(|block| block.text.trim().is_empty())
    }

    /// Append a character to the current block.
    pub fn insert_char(&mut self, c: char) {
        self.current.text.push(c);
    }

    /// Delete the last character, joining into the previous block when the
    /// current one is already empty.
    pub fn backspace(&mut self) {
        if self.current.text.pop().is_some() {
            return;
        }
        if let Some(previous) = self.blocks.pop() {
            self.current = previous;
        }
    }

    /// Start a new block.
    ///
    /// A list item continues the list. Enter on an empty list item leaves
    /// the list instead, turning it into a paragraph.
    pub fn new_block(&mut self) {
        if self.current.kind.is_list() && self.current.text.is_empty() {
            self.current.kind = BlockKind::Paragraph;
            return;
        }

        let next = if self.current.kind.is_list() {
            Block::continuing(&self.current)
        } else {
            Block::default()
        };
        self.blocks.push(std::mem::replace(&mut self.current, next));
    }

    /// Render to HTML, grouping consecutive list items into one list.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let mut open_list: Option<BlockKind> = None;

        for block in self.blocks().filter(|b| !b.text.trim().is_empty()) {
            if open_list.is_some_and(|kind| kind != block.kind) {
                html.push_str(list_close(open_list));
                open_list = None;
            }

            let inner = block.inline_html();
            match block.kind {
                BlockKind::Paragraph => html.push_str(&format!("<p>{inner}</p>")),
                BlockKind::Heading => html.push_str(&format!("<h2>{inner}</h2>")),
                BlockKind::Bullet | BlockKind::Ordered => {
                    if open_list.is_none() {
                        html.push_str(if block.kind == BlockKind::Bullet { "<ul>" } else { "<ol>" });
                        open_list = Some(block.kind);
                    }
                    html.push_str(&format!("<li>{inner}</li>"));
                },
            }
        }
        html.push_str(list_close(open_list));
        html
    }
}

fn list_close(kind: Option<BlockKind>) -> &'static str {
    match kind {
        Some(BlockKind::Bullet) => "</ul>",
        Some(BlockKind::Ordered) => "</ol>",
        Some(BlockKind::Paragraph | BlockKind::Heading) | None => "",
    }
}

/// Toolbar command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCommand {
    /// Toggle strong.
    Bold,
    /// Toggle emphasis.
    Italic,
    /// Toggle level-2 heading.
    Heading2,
    /// Toggle bullet list item.
    BulletList,
    /// Toggle numbered list item.
    OrderedList,
}

impl FormatCommand {
    /// Toolbar order.
    pub const ALL: [Self; 5] =
        [Self::Bold, Self::Italic, Self::Heading2, Self::BulletList, Self::OrderedList];

    /// Short toolbar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bold => "B",
            Self::Italic => "I",
            Self::Heading2 => "H2",
            Self::BulletList => "•",
            Self::OrderedList => "1.",
        }
    }

    /// True if the command's format applies to the current block.
    pub fn is_active(self, composer: &Composer) -> bool {
        let block = composer.current();
        match self {
            Self::Bold => block.bold,
            Self::Italic => block.italic,
            Self::Heading2 => block.kind == BlockKind::Heading,
            Self::BulletList => block.kind == BlockKind::Bullet,
            Self::OrderedList => block.kind == BlockKind::Ordered,
        }
    }

    /// Toggle the command's format on the current block.
    pub fn apply(self, composer: &mut Composer) {
        let active = self.is_active(composer);
        let block = &mut composer.current;
        let toggle_kind = |kind| if active { BlockKind::Paragraph } else { kind };
        match self {
            Self::Bold => block.bold = !active,
            Self::Italic => block.italic = !active,
            Self::Heading2 => block.kind = toggle_kind(BlockKind::Heading),
            Self::BulletList => block.kind = toggle_kind(BlockKind::Bullet),
            Self::OrderedList => block.kind = toggle_kind(BlockKind::Ordered),
        }
    }
}
