//! Terminal output sanitization
//!
//! Report text comes from a remote service and file names from the user's disk. Both are passed
//! through [`strip_ansi_codes`] before printing so embedded escape sequences cannot clear the
//! screen, move the cursor or restyle the terminal.

/// Strips ANSI CSI escape sequences and stray control characters
///
/// Tabs, newlines and carriage returns are kept.
///
/// # Examples
///
/// ```
/// use contractiq::utils::terminal::strip_ansi_codes;
///
/// let text = "\x1b[31mUnlimited liability\x1b[0m";
/// assert_eq!(strip_ansi_codes(text), "Unlimited liability");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.next_if_eq(&'[').is_some() {
            // Skip parameters up to and including the final letter
            for next_ch in chars.by_ref() {
                if next_ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }

        result.push(ch);
    }

    result
}
