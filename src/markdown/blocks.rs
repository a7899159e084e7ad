use super::ast::Block;
use super::inline::parse_inline;

/// Line prefixes in the order they are tested
const HEADING_3: &str = "### ";
const HEADING_2: &str = "## ";
const HEADING_1: &str = "# ";
const LIST_DASH: &str = "- ";
const LIST_STAR: &str = "* ";

/// Render text into one block per `\n`-separated line
pub fn render_markdown(text: &str) -> Vec<Block> {
    blocks(text).collect()
}

/// Lazily render text line by line
///
/// The iterator yields exactly one [`Block`] per line, in input order, including a
/// [`Block::LineBreak`] for every blank line.
pub fn blocks(text: &str) -> impl Iterator<Item = Block> + '_ {
    text.split('\n').map(|line| render_line(line.strip_suffix('\r').unwrap_or(line)))
}

/// Render a single line (which must not contain `\n`)
pub fn render_line(line: &str) -> Block {
    if line.trim().is_empty() {
        return Block::LineBreak;
    }

    if let Some(rest) = line.strip_prefix(HEADING_3) {
        Block::Heading { level: 3, spans: parse_inline(rest) }
    } else if let Some(rest) = line.strip_prefix(HEADING_2) {
        Block::Heading { level: 2, spans: parse_inline(rest) }
    } else if let Some(rest) = line.strip_prefix(HEADING_1) {
        Block::Heading { level: 1, spans: parse_inline(rest) }
    } else if let Some(rest) = line.strip_prefix(LIST_DASH).or_else(|| line.strip_prefix(LIST_STAR))
    {
        Block::ListItem(parse_inline(rest))
    } else {
        Block::Paragraph(parse_inline(line))
    }
}
