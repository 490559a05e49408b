//! Shared rendering utilities and helpers.
//!
//! Low-level text utilities used by the view model computation and the
//! component renderers: cursor positioning, cell truncation, and keyword
//! highlighting with proper ANSI escape sequence management. All width
//! arithmetic is in characters, not bytes.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Flattens a text to one line and fits it into `width` characters.
///
/// Newlines and tabs become spaces. Text longer than `width` is cut and
/// ends with `…`.
///
/// # Example
///
/// ```
/// use evalboard::ui::helpers::truncate;
///
/// assert_eq!(truncate("hello world", 8), "hello w…");
/// assert_eq!(truncate("two\nlines", 20), "two lines");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();

    if flat.chars().count() <= width {
        return flat;
    }
    if width == 0 {
        return String::new();
    }

    let mut cut: String = flat.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Pads `text` with spaces to `width` characters.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Coalesces sorted character indices into `(start, end)` ranges with an
/// exclusive end.
///
/// # Example
///
/// ```
/// use evalboard::ui::helpers::coalesce_ranges;
///
/// assert_eq!(coalesce_ranges(&[0, 1, 2, 5, 7, 8]), vec![(0, 3), (5, 6), (7, 9)]);
/// ```
#[must_use]
pub fn coalesce_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Keeps the parts of `ranges` that fall inside the first `len` characters.
#[must_use]
pub fn clip_ranges(ranges: &[(usize, usize)], len: usize) -> Vec<(usize, usize)> {
    ranges
        .iter()
        .filter(|(start, _)| *start < len)
        .map(|&(start, end)| (start, end.min(len)))
        .collect()
}

/// Renders text with highlighted character ranges for keyword matches.
///
/// Ranges are character indices `(start, end)` with an exclusive end, sorted
/// and non-overlapping. When `is_selected` is `true` the text is printed
/// plainly so the highlight does not fight the selection background.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let ranges = clip_ranges(ranges, chars.len());
    let mut current_pos = 0;

    for (start, end) in ranges {
        if end <= current_pos {
            continue;
        }
        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start.max(current_pos)..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Greedy word wrap into at most `max_lines` lines of `width` characters.
///
/// The last line ends with `…` when text is left over. Words longer than a
/// line are cut.
pub fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return vec![];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current.is_empty() {
            current = truncate(word, width);
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            if lines.len() == max_lines {
                break;
            }
            current = truncate(word, width);
        }
    }

    if lines.len() < max_lines {
        if !current.is_empty() {
            lines.push(current);
        }
    } else if let Some(last) = lines.last_mut() {
        let mut cut: String = last.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        *last = cut;
    }

    lines
}

/// Wraps every line of `text` to `width` characters, keeping blank lines as
/// paragraph breaks.
///
/// ```
/// use evalboard::ui::helpers::wrap_paragraphs;
///
/// let lines = wrap_paragraphs("first point\n\nsecond point", 6);
/// assert_eq!(lines, vec!["first", "point", "", "second", "point"]);
/// ```
#[must_use]
pub fn wrap_paragraphs(text: &str, width: usize) -> Vec<String> {
    text.trim()
        .lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                wrap(line, width, usize::MAX)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("héllo", 5), "héllo");
        assert_eq!(truncate("héllo", 4), "hél…");
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("abc", 1), "…");
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abcdef");
    }

    #[test]
    fn test_clip_ranges() {
        assert_eq!(clip_ranges(&[(0, 2), (4, 8), (9, 10)], 6), vec![(0, 2), (4, 6)]);
        assert!(clip_ranges(&[(3, 4)], 0).is_empty());
    }

    #[test]
    fn test_coalesce_empty() {
        assert!(coalesce_ranges(&[]).is_empty());
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        assert_eq!(wrap("one two three", 7, 4), vec!["one two", "three"]);
    }

    #[test]
    fn test_wrap_marks_overflow() {
        let lines = wrap("aaa bbb ccc ddd", 3, 2);
        assert_eq!(lines, vec!["aaa", "bb…"]);
    }

    #[test]
    fn test_wrap_cuts_long_words() {
        assert_eq!(wrap("abcdefgh", 4, 2), vec!["abc…"]);
        assert!(wrap("", 10, 3).is_empty());
    }
}
