/// Inline run of text inside a rendered line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { text: String, url: String },
}

impl InlineSpan {
    /// Visible text of the span (link text without its url)
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::Text(s)
            | InlineSpan::Bold(s)
            | InlineSpan::Italic(s)
            | InlineSpan::Code(s) => s,
            InlineSpan::Link { text, .. } => text,
        }
    }
}

/// One rendered input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Empty or whitespace-only line
    LineBreak,
    /// `#`, `##` or `###` heading (level 1 to 3)
    Heading { level: u8, spans: Vec<InlineSpan> },
    ListItem(Vec<InlineSpan>),
    Paragraph(Vec<InlineSpan>),
}

impl Block {
    pub fn spans(&self) -> &[InlineSpan] {
        match self {
            Block::LineBreak => &[],
            Block::Heading { spans, .. } | Block::ListItem(spans) | Block::Paragraph(spans) => {
                spans
            }
        }
    }

    /// Concatenated visible text of all spans
    pub fn plain_text(&self) -> String {
        self.spans().iter().map(InlineSpan::text).collect()
    }
}
