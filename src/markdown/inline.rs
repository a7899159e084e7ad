//! Inline pattern scanning for a single line.
//!
//! Each pattern is searched independently across the whole line (leftmost, non-overlapping
//! matches), then the matches of all four patterns are merged into one span sequence.

use std::sync::OnceLock;

use regex::Regex;

use super::ast::InlineSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchKind {
    Bold,
    Italic,
    Code,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InlineMatch<'a> {
    start: usize,
    len: usize,
    kind: MatchKind,
    content: &'a str,
    url: &'a str,
}

impl<'a> InlineMatch<'a> {
    fn end(&self) -> usize {
        self.start + self.len
    }

    fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }

    fn into_span(self) -> InlineSpan {
        let content = self.content.to_string();
        match self.kind {
            MatchKind::Bold => InlineSpan::Bold(content),
            MatchKind::Italic => InlineSpan::Italic(content),
            MatchKind::Code => InlineSpan::Code(content),
            MatchKind::Link => InlineSpan::Link { text: content, url: self.url.to_string() },
        }
    }
}

/// Split one line of text into typed inline spans
///
/// Literal text between matches becomes [`InlineSpan::Text`]. Italic matches starting inside a
/// bold match are dropped, and a match that starts before the end of an already emitted match
/// is skipped. An empty input yields no spans.
pub fn parse_inline(line: &str) -> Vec<InlineSpan> {
    let mut matches = scan(line, re_bold(), MatchKind::Bold);

    let italics = scan(line, re_italic(), MatchKind::Italic);
    let kept: Vec<InlineMatch> = italics
        .into_iter()
        .filter(|italic| {
            !matches.iter().any(|bold| bold.kind == MatchKind::Bold && bold.contains(italic.start))
        })
        .collect();
    matches.extend(kept);
    matches.extend(scan(line, re_code(), MatchKind::Code));
    matches.extend(scan(line, re_link(), MatchKind::Link));

    // Stable: equal offsets keep bold, italic, code, link order
    matches.sort_by_key(|m| m.start);

    let mut spans = Vec::new();
    let mut cursor = 0;
    for m in matches {
        if m.start < cursor {
            continue;
        }
        if m.start > cursor {
            spans.push(InlineSpan::Text(line[cursor..m.start].to_string()));
        }
        cursor = m.end();
        spans.push(m.into_span());
    }
    if cursor < line.len() {
        spans.push(InlineSpan::Text(line[cursor..].to_string()));
    }

    spans
}

fn re_bold() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*|__(.*?)__").expect("valid bold pattern"))
}

fn re_italic() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*(.*?)\*|_(.*?)_").expect("valid italic pattern"))
}

fn re_code() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`]+)`").expect("valid code pattern"))
}

fn re_link() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link pattern"))
}

/// All global matches of `re` in `line`; the first participating group is the content and
/// group 2 of a link is its url
fn scan<'a>(line: &'a str, re: &Regex, kind: MatchKind) -> Vec<InlineMatch<'a>> {
    re.captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let (content, url) = match kind {
                MatchKind::Link => (caps.get(1)?.as_str(), caps.get(2)?.as_str()),
                _ => (caps.get(1).or_else(|| caps.get(2))?.as_str(), ""),
            };
            Some(InlineMatch { start: whole.start(), len: whole.len(), kind, content, url })
        })
        .collect()
}
