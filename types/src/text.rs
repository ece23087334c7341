//! Small pure text helpers.

/// Longest prefix of `s` holding at most `max` characters.
///
/// Counts `char`s (not bytes) so a Unicode scalar value is never split.
#[must_use]
pub fn char_prefix(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// `s` without surrounding whitespace or byte-order marks.
#[must_use]
pub fn trim_candidate(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Split process output into candidate lines: each line trimmed, blank lines dropped.
#[must_use]
pub fn non_blank_lines(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(trim_candidate)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{char_prefix, non_blank_lines, trim_candidate};

    #[test]
    fn prefix_of_short_string_is_whole_string() {
        assert_eq!(char_prefix("hello", 100), "hello");
    }

    #[test]
    fn prefix_cuts_at_char_boundary() {
        assert_eq!(char_prefix("héllo wörld", 7), "héllo w");
        assert_eq!(char_prefix("🦀🦀🦀", 2), "🦀🦀");
    }

    #[test]
    fn prefix_of_zero_is_empty() {
        assert_eq!(char_prefix("abc", 0), "");
    }

    #[test]
    fn lines_are_trimmed_and_blank_lines_dropped() {
        let lines = non_blank_lines("  main\n\n* dev  \r\n   \nfeature/x\n");
        assert_eq!(lines, vec!["main", "* dev", "feature/x"]);
    }

    #[test]
    fn whitespace_only_output_has_no_lines() {
        assert!(non_blank_lines(" \n\t\n  ").is_empty());
    }

    #[test]
    fn byte_order_marks_are_stripped() {
        assert_eq!(trim_candidate("\u{feff}main"), "main");
        assert_eq!(trim_candidate(" \u{feff} dev "), "dev");
        assert_eq!(non_blank_lines("\u{feff}a.ts\n\u{feff}\nb.ts"), vec!["a.ts", "b.ts"]);
    }
}
