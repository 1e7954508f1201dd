//! Bullet segmentation for multi-line description fields.

/// Splits `text` into its non-blank lines, each trimmed, in source order.
///
/// `\r\n` line endings are handled by the trim. Duplicates are kept.
pub fn segment_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_blank_lines_between_points() {
        assert_eq!(segment_lines("Led X\n\nShipped Y"), vec!["Led X", "Shipped Y"]);
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(
            segment_lines("  Built the pipeline  \n\tCut costs 20%\t"),
            vec!["Built the pipeline", "Cut costs 20%"]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(segment_lines("one\r\ntwo\r\n\r\n"), vec!["one", "two"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(segment_lines("").is_empty());
    }

    #[test]
    fn test_whitespace_only_input() {
        assert!(segment_lines("   \n \t \n\n").is_empty());
    }

    #[test]
    fn test_keeps_duplicates_and_order() {
        assert_eq!(segment_lines("b\na\nb"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_single_line_without_newline() {
        assert_eq!(segment_lines("Only point"), vec!["Only point"]);
    }

    #[test]
    fn test_no_element_is_blank_and_each_matches_its_source_line() {
        let text = "  first \n\n second\n   \nthird  ";
        let segments = segment_lines(text);
        assert!(segments.iter().all(|s| !s.trim().is_empty()));
        let expected: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        assert_eq!(segments, expected);
    }
}
