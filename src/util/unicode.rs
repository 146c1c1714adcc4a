use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.split('\t')
        .enumerate()
        .map(|(i, part)| {
            let w = UnicodeWidthStr::width(part);
            if i > 0 { w + 4 } else { w }
        })
        .sum()
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells <= 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = grapheme_display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Right-pad with spaces to exactly `cells` cells (truncating first if needed).
pub fn pad_to_width(s: &str, cells: usize) -> String {
    let mut out = truncate_to_width(s, cells);
    let w = display_width(&out);
    out.extend(std::iter::repeat_n(' ', cells.saturating_sub(w)));
    out
}

/// Pack items into rows no wider than `max_cells`, separated by `gap` cells.
/// An item wider than the row gets a row of its own.
pub fn pack_rows<'a>(items: &'a [String], gap: usize, max_cells: usize) -> Vec<Vec<&'a str>> {
    let mut rows: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut used = 0;
    for item in items {
        let w = display_width(item);
        let needed = if current.is_empty() { w } else { used + gap + w };
        if !current.is_empty() && needed > max_cells {
            rows.push(std::mem::take(&mut current));
            used = w;
        } else {
            used = needed;
        }
        current.push(item);
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

fn grapheme_display_width(g: &str) -> usize {
    if g == "\t" {
        4
    } else {
        UnicodeWidthStr::width(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
    }

    #[test]
    fn display_width_hangul() {
        assert_eq!(display_width("개인"), 4);
        assert_eq!(display_width("[편집]"), 6);
    }

    #[test]
    fn display_width_tab() {
        assert_eq!(display_width("a\tb"), 6);
    }

    #[test]
    fn display_width_empty() {
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_no_truncation_needed() {
        assert_eq!(truncate_to_width("memo", 10), "memo");
    }

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_to_width("groceries", 5), "groc\u{2026}");
    }

    #[test]
    fn truncate_hangul_boundary() {
        // budget 4 cells fits two syllables
        assert_eq!(truncate_to_width("아이디어", 5), "아이\u{2026}");
        // budget 3 cells fits only one
        assert_eq!(truncate_to_width("아이디어", 4), "아\u{2026}");
    }

    #[test]
    fn truncate_zero_and_one() {
        assert_eq!(truncate_to_width("memo", 0), "");
        assert_eq!(truncate_to_width("memo", 1), "\u{2026}");
    }

    #[test]
    fn pad_fills_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("개인", 6), "개인  ");
        assert_eq!(pad_to_width("abcdef", 4), "abc\u{2026}");
    }

    #[test]
    fn pack_rows_wraps_on_overflow() {
        let items: Vec<String> = ["#one", "#two", "#three"].iter().map(|s| s.to_string()).collect();
        let rows = pack_rows(&items, 2, 10);
        assert_eq!(rows, vec![vec!["#one", "#two"], vec!["#three"]]);
    }

    #[test]
    fn pack_rows_oversized_item_alone() {
        let items: Vec<String> = ["#a", "#averyveryverylongtag", "#b"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = pack_rows(&items, 1, 8);
        assert_eq!(
            rows,
            vec![vec!["#a"], vec!["#averyveryverylongtag"], vec!["#b"]]
        );
    }

    #[test]
    fn pack_rows_empty() {
        assert!(pack_rows(&[], 2, 10).is_empty());
    }
}
