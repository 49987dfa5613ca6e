//! Hover-text building for measure rows.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;

/// Column width the hover text is wrapped to.
pub const WRAP_WIDTH: usize = 30;

/// Line-break token the chart renderer splits hover text on.
pub const LINE_BREAK: &str = "<br>";

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[day]-[month]-[year]");

/// Builds the hover text for one measure row: "DD-MM-YYYY: measure comments",
/// wrapped to [`WRAP_WIDTH`] columns and joined with [`LINE_BREAK`].
pub fn measure_display_text(date_implemented: Date, measure: &str, comments: &str) -> String {
    let date = date_implemented
        .format(&DATE_FORMAT)
        .unwrap_or_else(|_| date_implemented.to_string());
    wrap_to_markup(&format!("{date}: {measure} {comments}"), WRAP_WIDTH)
}

/// Greedy word wrap. Whitespace runs (including embedded newlines) collapse to
/// single spaces, words longer than `width` are split, and the resulting lines
/// are joined with [`LINE_BREAK`].
pub fn wrap_to_markup(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();

        // Words wider than a whole line get hard-split.
        while chars.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            lines.push(chars.drain(..width).collect());
        }
        if chars.is_empty() {
            continue;
        }

        let word_len = chars.len();
        if current_len == 0 {
            current = chars.into_iter().collect();
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.extend(chars);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current = chars.into_iter().collect();
            current_len = word_len;
        }
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines.join(LINE_BREAK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn formats_date_day_month_year() {
        let text = measure_display_text(date!(2020 - 04 - 07), "Curfew", "");
        assert!(text.starts_with("07-04-2020: Curfew"));
    }

    #[test]
    fn wraps_at_column_width() {
        let text = measure_display_text(
            date!(2020 - 03 - 15),
            "Limit public gatherings",
            "Banned gatherings of more than ten people nationwide",
        );
        for line in text.split(LINE_BREAK) {
            assert!(
                line.chars().count() <= WRAP_WIDTH,
                "line `{line}` exceeds {WRAP_WIDTH} columns"
            );
        }
        assert!(text.contains(LINE_BREAK));
    }

    #[test]
    fn collapses_embedded_newlines() {
        let wrapped = wrap_to_markup("first\nsecond third", 30);
        assert_eq!(wrapped, "first second third");
    }

    #[test]
    fn splits_overlong_words() {
        let wrapped = wrap_to_markup("abcdefghij", 4);
        assert_eq!(wrapped, "abcd<br>efgh<br>ij");
    }

    #[test]
    fn empty_comments_leave_no_trailing_break() {
        let text = measure_display_text(date!(2020 - 05 - 01), "Border closure", "");
        assert!(!text.ends_with(LINE_BREAK));
        assert!(!text.ends_with(' '));
    }
}
