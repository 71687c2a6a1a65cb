//! Pinyin syllable decomposition and tone handling.
//!
//! A [`Syllable`] is the unit the dictionary stores and the renderers
//! consume: an optional initial, a final (`rime`), and a tone number.
//! Tone 0 is the neutral tone; 1..=4 are the contour tones.

use serde::{Deserialize, Serialize};

/// Initials recognized when splitting a syllable, longest first so that
/// `zh`/`ch`/`sh` win over `z`/`c`/`s`.
const INITIALS: &[&str] = &[
    "zh", "ch", "sh", "b", "p", "m", "f", "d", "t", "n", "l", "g", "k", "h", "j", "q", "x", "r",
    "z", "c", "s", "y", "w",
];

/// Precomposed tone-marked characters: (marked, base, tone).
///
/// Includes the syllabic nasals (ń, ňg, ...) that appear in readings of
/// interjections like 嗯 and 呣.
const TONED: &[(char, char, u8)] = &[
    ('ā', 'a', 1),
    ('á', 'a', 2),
    ('ǎ', 'a', 3),
    ('à', 'a', 4),
    ('ē', 'e', 1),
    ('é', 'e', 2),
    ('ě', 'e', 3),
    ('è', 'e', 4),
    ('ō', 'o', 1),
    ('ó', 'o', 2),
    ('ǒ', 'o', 3),
    ('ò', 'o', 4),
    ('ī', 'i', 1),
    ('í', 'i', 2),
    ('ǐ', 'i', 3),
    ('ì', 'i', 4),
    ('ū', 'u', 1),
    ('ú', 'u', 2),
    ('ǔ', 'u', 3),
    ('ù', 'u', 4),
    ('ǖ', 'ü', 1),
    ('ǘ', 'ü', 2),
    ('ǚ', 'ü', 3),
    ('ǜ', 'ü', 4),
    ('ń', 'n', 2),
    ('ň', 'n', 3),
    ('ǹ', 'n', 4),
    ('ḿ', 'm', 2),
];

fn unmark(c: char) -> Option<(char, u8)> {
    TONED
        .iter()
        .find(|&&(marked, _, _)| marked == c)
        .map(|&(_, base, tone)| (base, tone))
}

fn mark(base: char, tone: u8) -> Option<char> {
    TONED
        .iter()
        .find(|&&(_, b, t)| b == base && t == tone)
        .map(|&(marked, _, _)| marked)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'ü')
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SyllableError {
    #[error("empty syllable")]
    Empty,
    #[error("invalid character {ch:?} in syllable {syllable:?}")]
    InvalidChar { syllable: String, ch: char },
    #[error("multiple tone marks in syllable {0:?}")]
    MultipleTones(String),
    #[error("invalid tone digit {digit} in syllable {syllable:?}")]
    InvalidTone { syllable: String, digit: char },
}

/// One phonetic reading of a character.
///
/// Immutable once constructed; the dictionary hands out shared references
/// for the lifetime of the conversion call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Syllable {
    /// Leading consonant cluster; `None` for vowel-initial syllables
    /// ("an", "er") and syllabic nasals ("ń").
    pub initial: Option<String>,
    /// The final: vowel nucleus plus any trailing nasal. Named `rime`
    /// because `final` is a Rust keyword.
    pub rime: String,
    /// 0 = neutral, 1..=4 = contour tones.
    pub tone: u8,
    /// Canonical tone-marked form ("zhōng").
    pub raw: String,
}

impl Syllable {
    /// Parse a tone-marked syllable such as "zhōng" or "lǜ".
    ///
    /// Expects precomposed (NFC) diacritics, which is what the data assets
    /// use. A syllable without any mark gets the neutral tone.
    pub fn parse_marked(s: &str) -> Result<Self, SyllableError> {
        if s.is_empty() {
            return Err(SyllableError::Empty);
        }
        let mut plain = String::with_capacity(s.len());
        let mut tone = 0u8;
        for c in s.chars() {
            if let Some((base, t)) = unmark(c) {
                if tone != 0 {
                    return Err(SyllableError::MultipleTones(s.to_string()));
                }
                tone = t;
                plain.push(base);
            } else if c.is_ascii_lowercase() || c == 'ü' {
                plain.push(c);
            } else {
                return Err(SyllableError::InvalidChar {
                    syllable: s.to_string(),
                    ch: c,
                });
            }
        }
        Ok(Self::from_plain(&plain, tone))
    }

    /// Parse a tone-numbered syllable such as "zhong1", "lv4" or "ma".
    ///
    /// `v` is accepted as the common ASCII spelling of `ü`. A missing
    /// digit means the neutral tone.
    pub fn parse_numbered(s: &str) -> Result<Self, SyllableError> {
        if s.is_empty() {
            return Err(SyllableError::Empty);
        }
        let (body, tone) = match s.chars().last() {
            Some(d) if d.is_ascii_digit() => {
                let tone = d as u8 - b'0';
                if tone > 4 {
                    return Err(SyllableError::InvalidTone {
                        syllable: s.to_string(),
                        digit: d,
                    });
                }
                (&s[..s.len() - 1], tone)
            }
            _ => (s, 0),
        };
        if body.is_empty() {
            return Err(SyllableError::Empty);
        }
        let mut plain = String::with_capacity(body.len());
        for c in body.chars() {
            match c {
                'v' => plain.push('ü'),
                c if c.is_ascii_lowercase() || c == 'ü' => plain.push(c),
                c => {
                    return Err(SyllableError::InvalidChar {
                        syllable: s.to_string(),
                        ch: c,
                    })
                }
            }
        }
        Ok(Self::from_plain(&plain, tone))
    }

    /// Build from an unmarked body plus tone, splitting initial and rime.
    fn from_plain(plain: &str, tone: u8) -> Self {
        let initial = INITIALS
            .iter()
            .find(|&&i| plain.starts_with(i) && plain.len() > i.len())
            .map(|&i| i.to_string());
        let rime = match &initial {
            Some(i) => plain[i.len()..].to_string(),
            None => plain.to_string(),
        };
        let raw = compose(plain, &rime, initial.as_deref().map_or(0, str::len), tone);
        Self {
            initial,
            rime,
            tone,
            raw,
        }
    }

    /// Bare syllable with all tone information stripped.
    pub fn plain(&self) -> String {
        match &self.initial {
            Some(i) => format!("{i}{}", self.rime),
            None => self.rime.clone(),
        }
    }

    /// Canonical tone-marked form.
    pub fn marked(&self) -> &str {
        &self.raw
    }

    /// Char index (within the plain form) of the letter that carries the
    /// tone mark. Used by the diacritic and inline-digit renderers.
    pub(crate) fn tone_char_index(&self) -> usize {
        let initial_len = self.initial.as_deref().map_or(0, |i| i.chars().count());
        initial_len + rime_mark_index(&self.rime)
    }
}

/// Char index within the rime of the vowel that takes the tone mark.
///
/// Pinned convention (standard orthography): `a` if present, else `e`,
/// else the `o` of `ou`, else the last vowel. The last-vowel branch puts
/// the mark on `u` in "iu" and on `i` in "ui", matching printed pinyin.
/// Syllabic nasals have no vowel; the mark lands on the first letter.
fn rime_mark_index(rime: &str) -> usize {
    let chars: Vec<char> = rime.chars().collect();
    if let Some(i) = chars.iter().position(|&c| c == 'a') {
        return i;
    }
    if let Some(i) = chars.iter().position(|&c| c == 'e') {
        return i;
    }
    if rime.contains("ou") {
        return chars.iter().position(|&c| c == 'o').unwrap_or(0);
    }
    chars
        .iter()
        .rposition(|&c| is_vowel(c))
        .unwrap_or(0)
}

/// Recompose the tone-marked form from the plain body.
fn compose(plain: &str, rime: &str, initial_len: usize, tone: u8) -> String {
    if tone == 0 {
        return plain.to_string();
    }
    let initial_chars = plain[..initial_len].chars().count();
    let mark_at = initial_chars + rime_mark_index(rime);
    plain
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i == mark_at {
                mark(c, tone).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(s: &str) -> Syllable {
        Syllable::parse_marked(s).unwrap()
    }

    #[test]
    fn test_parse_marked_basic() {
        let s = marked("zhōng");
        assert_eq!(s.initial.as_deref(), Some("zh"));
        assert_eq!(s.rime, "ong");
        assert_eq!(s.tone, 1);
        assert_eq!(s.marked(), "zhōng");
        assert_eq!(s.plain(), "zhong");
    }

    #[test]
    fn test_parse_marked_vowel_initial() {
        let s = marked("ān");
        assert_eq!(s.initial, None);
        assert_eq!(s.rime, "an");
        assert_eq!(s.tone, 1);
    }

    #[test]
    fn test_parse_marked_umlaut() {
        let s = marked("lǜ");
        assert_eq!(s.initial.as_deref(), Some("l"));
        assert_eq!(s.rime, "ü");
        assert_eq!(s.tone, 4);
        assert_eq!(s.marked(), "lǜ");
    }

    #[test]
    fn test_parse_marked_neutral() {
        let s = marked("de");
        assert_eq!(s.tone, 0);
        assert_eq!(s.marked(), "de");
    }

    #[test]
    fn test_parse_marked_syllabic_nasal() {
        let s = marked("ń");
        assert_eq!(s.initial, None);
        assert_eq!(s.rime, "n");
        assert_eq!(s.tone, 2);
    }

    #[test]
    fn test_parse_marked_er() {
        let s = marked("ér");
        assert_eq!(s.initial, None);
        assert_eq!(s.rime, "er");
        assert_eq!(s.tone, 2);
    }

    #[test]
    fn test_parse_marked_rejects_uppercase() {
        let err = Syllable::parse_marked("Zhōng").unwrap_err();
        assert!(matches!(err, SyllableError::InvalidChar { ch: 'Z', .. }));
    }

    #[test]
    fn test_parse_marked_rejects_double_tone() {
        let err = Syllable::parse_marked("zhōngá").unwrap_err();
        assert!(matches!(err, SyllableError::MultipleTones(_)));
    }

    #[test]
    fn test_parse_numbered() {
        let s = Syllable::parse_numbered("zhong1").unwrap();
        assert_eq!(s.marked(), "zhōng");
        assert_eq!(s.tone, 1);

        let s = Syllable::parse_numbered("lv4").unwrap();
        assert_eq!(s.marked(), "lǜ");

        let s = Syllable::parse_numbered("ma").unwrap();
        assert_eq!(s.tone, 0);
        assert_eq!(s.marked(), "ma");
    }

    #[test]
    fn test_parse_numbered_bad_tone() {
        let err = Syllable::parse_numbered("ma7").unwrap_err();
        assert!(matches!(err, SyllableError::InvalidTone { digit: '7', .. }));
    }

    #[test]
    fn test_mark_placement() {
        // a wins
        assert_eq!(Syllable::parse_numbered("hao3").unwrap().marked(), "hǎo");
        // e wins over i/u
        assert_eq!(Syllable::parse_numbered("lei2").unwrap().marked(), "léi");
        // ou marks the o
        assert_eq!(Syllable::parse_numbered("ou1").unwrap().marked(), "ōu");
        assert_eq!(Syllable::parse_numbered("gou3").unwrap().marked(), "gǒu");
        // iu marks the u, ui marks the i
        assert_eq!(Syllable::parse_numbered("xiu1").unwrap().marked(), "xiū");
        assert_eq!(Syllable::parse_numbered("gui4").unwrap().marked(), "guì");
        // uo marks the o
        assert_eq!(Syllable::parse_numbered("duo1").unwrap().marked(), "duō");
        // iong marks the o
        assert_eq!(
            Syllable::parse_numbered("jiong3").unwrap().marked(),
            "jiǒng"
        );
    }

    #[test]
    fn test_marked_numbered_roundtrip() {
        for s in ["zhōng", "guó", "lǜ", "xiū", "hǎo", "ér", "de"] {
            let a = marked(s);
            assert_eq!(a.marked(), s);
            let b = Syllable::parse_numbered(&format!(
                "{}{}",
                a.plain().replace('ü', "v"),
                if a.tone == 0 {
                    String::new()
                } else {
                    a.tone.to_string()
                }
            ))
            .unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_tone_char_index() {
        assert_eq!(marked("zhōng").tone_char_index(), 2); // zh-o
        assert_eq!(marked("guó").tone_char_index(), 2); // g-u-o
        assert_eq!(marked("ān").tone_char_index(), 0);
        assert_eq!(marked("xiū").tone_char_index(), 2); // x-i-u
    }
}
