//! Text helpers shared by the views.

use anyhow::{Result, bail};

/// Something that can be shown as one row of a list panel.
pub trait ListItem {
    fn display_strings(&self) -> Vec<String>;
}

/// Render items as left-aligned columns separated by a single space.
///
/// Every item must yield the same number of columns.
pub fn render_list<T: ListItem>(items: &[T]) -> Result<String> {
    let rows: Vec<Vec<String>> = items.iter().map(ListItem::display_strings).collect();
    let Some(first) = rows.first() else {
        return Ok(String::new());
    };
    let columns = first.len();
    if let Some(bad) = rows.iter().find(|r| r.len() != columns) {
        bail!(
            "each item must return the same number of strings to display ({} vs {})",
            columns,
            bad.len()
        );
    }

    let widths: Vec<usize> = (0..columns)
        .map(|c| rows.iter().map(|r| r[c].chars().count()).max().unwrap_or(0))
        .collect();

    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            let mut line = String::new();
            for (c, cell) in row.iter().enumerate() {
                line.push_str(cell);
                // The last column is not padded.
                if c + 1 < columns {
                    let pad = widths[c] - cell.chars().count();
                    line.extend(std::iter::repeat_n(' ', pad + 1));
                }
            }
            line
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Drop a leading UTF-8 byte-order mark.
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix('\u{feff}').unwrap_or(s)
}

/// Convert CRLF and lone CR line endings to LF.
pub fn normalize_linefeeds(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Rows needed to show `content` wrapped at `width` columns.
pub fn wrapped_line_count(content: &str, width: usize) -> usize {
    let width = width.max(1);
    content
        .split('\n')
        .map(|line| line.chars().count() / width + 1)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(Vec<&'static str>);

    impl ListItem for Row {
        fn display_strings(&self) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }
    }

    #[test]
    fn render_list_pads_columns() {
        let rows = [Row(vec!["M", "src/main.rs"]), Row(vec!["??", "notes.txt"])];
        assert_eq!(
            render_list(&rows).unwrap(),
            "M  src/main.rs\n?? notes.txt"
        );
    }

    #[test]
    fn render_list_rejects_ragged_rows() {
        let rows = [Row(vec!["a", "b"]), Row(vec!["c"])];
        assert!(render_list(&rows).is_err());
    }

    #[test]
    fn render_list_of_nothing_is_empty() {
        let rows: [Row; 0] = [];
        assert_eq!(render_list(&rows).unwrap(), "");
    }

    #[test]
    fn bom_is_stripped_only_at_start() {
        assert_eq!(strip_bom("\u{feff}hello"), "hello");
        assert_eq!(strip_bom("he\u{feff}llo"), "he\u{feff}llo");
    }

    #[test]
    fn linefeeds_are_normalized() {
        assert_eq!(normalize_linefeeds("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn wrapped_line_count_counts_overflow() {
        assert_eq!(wrapped_line_count("abc", 10), 1);
        assert_eq!(wrapped_line_count("abcdefghijk", 10), 2);
        assert_eq!(wrapped_line_count("a\nb", 10), 2);
    }
}
