//! The five output encodings for a resolved syllable.

use serde::{Deserialize, Serialize};

use crate::syllable::Syllable;

/// Output encoding. Discriminants are the tag values the marshalling
/// layer stores alongside each element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Mode {
    /// Bare syllable, tone stripped: "zhong".
    Plain = 1,
    /// Diacritic over the tone-carrying vowel: "zhōng".
    Tone = 2,
    /// First letter of the initial, or of the final when there is no
    /// initial: "z".
    Letter = 3,
    /// Tone digit appended at the very end of the syllable: "zhong1".
    ToneNum = 4,
    /// Tone digit directly after the tone-carrying vowel: "zho1ng".
    /// Keeps the digit from colliding with a following separator.
    ToneNumEnd = 5,
}

/// Render one syllable. `slug` lower-cases the result; separators are
/// the assembler's job, never inserted here.
pub fn render(syl: &Syllable, mode: Mode, slug: bool) -> String {
    // An empty final cannot come out of the source parsers; treat it as
    // a data-integrity hole and render nothing.
    if syl.rime.is_empty() {
        return String::new();
    }
    let out = match mode {
        Mode::Plain => syl.plain(),
        Mode::Tone => syl.marked().to_string(),
        Mode::Letter => first_letter(syl),
        Mode::ToneNum => {
            let mut s = syl.plain();
            if syl.tone != 0 {
                s.push(digit(syl.tone));
            }
            s
        }
        Mode::ToneNumEnd => tone_num_inline(syl),
    };
    if slug {
        out.to_lowercase()
    } else {
        out
    }
}

fn digit(tone: u8) -> char {
    (b'0' + tone) as char
}

fn first_letter(syl: &Syllable) -> String {
    let source = syl.initial.as_deref().unwrap_or(&syl.rime);
    source.chars().take(1).collect()
}

/// Same digit as `ToneNum`, placed after the vowel that would carry the
/// diacritic. The neutral tone carries no digit in either variant.
fn tone_num_inline(syl: &Syllable) -> String {
    let plain = syl.plain();
    if syl.tone == 0 {
        return plain;
    }
    let at = syl.tone_char_index();
    let mut out = String::with_capacity(plain.len() + 1);
    for (i, c) in plain.chars().enumerate() {
        out.push(c);
        if i == at {
            out.push(digit(syl.tone));
        }
    }
    out
}
