//! Shared text utilities for the renderer.
//!
//! All widths and ranges are in characters, not bytes, so accented names
//! ("Reclutador Líder") line up.

/// ANSI bold.
pub const BOLD: &str = "\u{1b}[1m";
/// ANSI dim.
pub const DIM: &str = "\u{1b}[2m";
/// ANSI reset.
pub const RESET: &str = "\u{1b}[0m";

/// Number of characters in `text`.
#[must_use]
pub fn char_width(text: &str) -> usize {
    text.chars().count()
}

/// Left-aligns `text` in a field of `width` characters.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let mut out = text.to_string();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(char_width(text))));
    out
}

/// Wraps the character ranges of `text` in bold.
///
/// Ranges are `(start, end)` with end exclusive and are clamped to the text,
/// so ranges computed before truncation are safe to pass.
///
/// # Example
///
/// ```
/// use recluta::ui::helpers::{highlight, BOLD, RESET};
///
/// assert_eq!(highlight("acme", &[(0, 2)]), format!("{BOLD}ac{RESET}me"));
/// ```
#[must_use]
pub fn highlight(text: &str, ranges: &[(usize, usize)]) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 8);
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());
        if start == end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(BOLD);
        out.extend(&chars[start..end]);
        out.push_str(RESET);
        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out
}
