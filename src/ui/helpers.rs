//! Shared rendering utilities.
//!
//! Cursor positioning, padding by visible width and fuzzy match highlighting.
//! All text measurements are in characters, not bytes.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `(row, col)`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Visible width of `text`, counted in characters.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` characters.
#[must_use]
pub fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Splits `text` into `(segment, highlighted)` runs.
///
/// Ranges are clamped to the text and to each other, so overlapping or
/// out-of-bounds ranges never panic.
#[must_use]
pub fn highlight_segments(text: &str, ranges: &[(usize, usize)]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(pos, chars.len());
        let end = end.clamp(start, chars.len());
        if start > pos {
            segments.push((chars[pos..start].iter().collect(), false));
        }
        if end > start {
            segments.push((chars[start..end].iter().collect(), true));
        }
        pos = end;
    }

    if pos < chars.len() {
        segments.push((chars[pos..].iter().collect(), false));
    }
    segments
}

/// Prints `text` with the given character ranges highlighted.
///
/// Selected rows skip match highlighting so the selection background stays
/// uniform.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    for (segment, highlighted) in highlight_segments(text, ranges) {
        if highlighted {
            print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
            print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
            print!("{segment}");
            print!("{}", Theme::reset());
            print!("{}", Theme::fg(&theme.colors.text_normal));
        } else {
            print!("{segment}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(segments: &[(String, bool)]) -> Vec<(&str, bool)> {
        segments.iter().map(|(s, h)| (s.as_str(), *h)).collect()
    }

    #[test]
    fn segments_alternate_between_ranges() {
        let segments = highlight_segments("Ana Souza", &[(0, 3), (4, 5)]);
        assert_eq!(plain(&segments), vec![("Ana", true), (" ", false), ("S", true), ("ouza", false)]);
    }

    #[test]
    fn out_of_bounds_ranges_are_clamped() {
        let segments = highlight_segments("Zé", &[(1, 10), (8, 12)]);
        assert_eq!(plain(&segments), vec![("Z", false), ("é", true)]);
    }

    #[test]
    fn width_counts_characters() {
        assert_eq!(width("João"), 4);
        assert_eq!(clip("Conceição", 5), "Conce");
    }
}
