use crate::markdown::{Block, InlineSpan, blocks};
use crate::utils::strip_ansi_codes;

/// Bullet printed in front of list items
pub const BULLET: &str = "•";

/// Render AI-written markdown as plain terminal text, one output line per input line
pub fn render_plain(text: &str) -> String {
    let lines: Vec<String> = blocks(text).map(|block| block_to_plain(&block)).collect();
    lines.join("\n")
}

/// Plain text of one block; level 1 and 2 headings are underlined
pub fn block_to_plain(block: &Block) -> String {
    match block {
        Block::LineBreak => String::new(),
        Block::Heading { level, spans } => {
            let title = spans_to_plain(spans);
            let rule = match level {
                1 => '=',
                2 => '-',
                _ => return title,
            };
            let underline: String = std::iter::repeat_n(rule, title.chars().count()).collect();
            format!("{}\n{}", title, underline)
        }
        Block::ListItem(spans) => format!("{} {}", BULLET, spans_to_plain(spans)),
        Block::Paragraph(spans) => spans_to_plain(spans),
    }
}

pub fn spans_to_plain(spans: &[InlineSpan]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            InlineSpan::Text(s) | InlineSpan::Bold(s) | InlineSpan::Italic(s) => out.push_str(s),
            InlineSpan::Code(s) => {
                out.push('`');
                out.push_str(s);
                out.push('`');
            }
            InlineSpan::Link { text, url } => {
                out.push_str(text);
                out.push_str(" (");
                out.push_str(url);
                out.push(')');
            }
        }
    }
    strip_ansi_codes(&out)
}
