//! Segmenter: scans input text scalar-by-scalar and classifies each
//! position as a recognized ideograph (with its dictionary readings) or
//! an unrecognized character.
//!
//! Phrase keys are matched greedily, longest first; a phrase match pins
//! one reading per covered character, which is how polyphonic compound
//! overrides reach the resolver.

use std::collections::VecDeque;

use crate::dict::Dict;
use crate::syllable::Syllable;
use crate::unicode::is_han;

/// One segment of the input. Borrows from the input text and the
/// dictionary; created per scan and discarded with the conversion call.
#[derive(Debug, Clone)]
pub enum Token<'a> {
    /// A recognized ideograph.
    Han {
        /// Source text of this character.
        text: &'a str,
        /// Single-character dictionary entry, rank order. Empty when the
        /// character is only reachable through a phrase key.
        readings: &'a [Syllable],
        /// Phrase-override reading when matched inside a compound.
        pinned: Option<&'a Syllable>,
    },
    /// An unrecognized scalar: punctuation, Latin letters, digits,
    /// whitespace, or an ideograph absent from the dictionary.
    Other { text: &'a str },
}

impl<'a> Token<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Token::Han { text, .. } | Token::Other { text } => text,
        }
    }
}

/// Lazily segment `text` against `dict`. Single-pass; re-call to rescan.
pub fn segment<'a>(text: &'a str, dict: &'a Dict) -> Tokens<'a> {
    Tokens {
        text,
        dict,
        pos: 0,
        queued: VecDeque::new(),
    }
}

pub struct Tokens<'a> {
    text: &'a str,
    dict: &'a Dict,
    pos: usize,
    queued: VecDeque<Token<'a>>,
}

impl<'a> Tokens<'a> {
    /// Queue one `Han` token per character covered by a phrase match.
    fn queue_phrase(&mut self, len: usize, pinned: &'a [Syllable]) {
        let dict = self.dict;
        let rest: &'a str = &self.text[self.pos..];
        let mut start = 0;
        for (i, c) in rest.chars().take(len).enumerate() {
            let end = start + c.len_utf8();
            self.queued.push_back(Token::Han {
                text: &rest[start..end],
                readings: dict.lookup_char(c).unwrap_or(&[]),
                pinned: Some(&pinned[i]),
            });
            start = end;
        }
        self.pos += start;
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(token) = self.queued.pop_front() {
            return Some(token);
        }
        let dict = self.dict;
        let rest: &'a str = &self.text[self.pos..];
        let c = rest.chars().next()?;
        let char_text = &rest[..c.len_utf8()];

        if is_han(c) {
            if !dict.phrases().is_empty() {
                if let Some((len, pinned)) = dict.phrase_match(rest.chars()) {
                    self.queue_phrase(len, pinned);
                    return self.queued.pop_front();
                }
            }
            if let Some(readings) = dict.lookup_char(c) {
                self.pos += c.len_utf8();
                return Some(Token::Han {
                    text: char_text,
                    readings,
                    pinned: None,
                });
            }
        }

        self.pos += c.len_utf8();
        Some(Token::Other { text: char_text })
    }
}
