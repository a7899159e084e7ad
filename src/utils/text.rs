/// Returns at most `max_chars` characters of `text`, never splitting a UTF-8 code point
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// First line of `text`, truncated for single-row list displays
pub fn first_line_preview(text: &str, max_chars: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    let truncated = truncate_chars(line, max_chars);
    if truncated.len() < line.len() { format!("{}…", truncated) } else { truncated.to_string() }
}
