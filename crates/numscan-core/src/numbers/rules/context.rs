//! Context snippets around matches.

/// Byte offset `chars` characters before `start`, clamped to the text start.
pub fn chars_before(text: &str, start: usize, chars: usize) -> usize {
    text[..start]
        .char_indices()
        .rev()
        .take(chars)
        .last()
        .map_or(start, |(i, _)| i)
}

/// Byte offset `chars` characters after `end`, clamped to the text end.
pub fn chars_after(text: &str, end: usize, chars: usize) -> usize {
    text[end..]
        .char_indices()
        .nth(chars)
        .map_or(text.len(), |(i, _)| end + i)
}

/// Text from `chars` characters before a match to `chars` characters after
/// it, with whitespace runs (newlines included) collapsed to single spaces.
pub fn context_snippet(text: &str, start: usize, end: usize, chars: usize) -> String {
    let from = chars_before(text, start, chars);
    let to = chars_after(text, end, chars);
    text[from..to].split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snippet_clamps_to_text() {
        let text = "Total: 42";
        assert_eq!(context_snippet(text, 7, 9, 50), "Total: 42");
    }

    #[test]
    fn test_snippet_window() {
        let text = "aaaaa bbbbb 123 ccccc ddddd";
        // "123" spans 12..15
        assert_eq!(context_snippet(text, 12, 15, 3), "bb 123 cc");
    }

    #[test]
    fn test_snippet_normalizes_whitespace() {
        let text = "line one\n\n  value\t 7 \r\nline two";
        let start = text.find('7').unwrap();
        assert_eq!(context_snippet(text, start, start + 1, 50), "line one value 7 line two");
    }

    #[test]
    fn test_snippet_counts_characters() {
        let text = "€€€€ 5 €€€€";
        let start = text.find('5').unwrap();
        assert_eq!(context_snippet(text, start, start + 1, 2), "€ 5 €");
    }

    #[test]
    fn test_offsets_at_edges() {
        assert_eq!(chars_before("abc", 0, 10), 0);
        assert_eq!(chars_after("abc", 3, 10), 3);
        assert_eq!(chars_before("abcdef", 4, 2), 2);
        assert_eq!(chars_after("abcdef", 2, 2), 4);
    }
}
