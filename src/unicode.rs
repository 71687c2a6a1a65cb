/// Character-level Unicode classification for Chinese text.

/// CJK Unified Ideographs, including extensions A and B and the
/// compatibility block. Characters outside these ranges never carry a
/// dictionary entry, so the segmenter can skip the lookup entirely.
pub fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
        || ('\u{F900}'..='\u{FAFF}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_classification() {
        assert!(is_han('中'));
        assert!(is_han('㐅')); // extension A
        assert!(is_han('𠀀')); // extension B
        assert!(is_han('樂')); // compatibility-adjacent BMP kanji form
        assert!(!is_han('あ'));
        assert!(!is_han('A'));
        assert!(!is_han('。'));
        assert!(!is_han('a'));
    }
}
