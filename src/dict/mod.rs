//! The reading dictionary: immutable after load, shared process-wide.
//!
//! - `Dict::global()` returns the lazily-built singleton parsed from the
//!   embedded assets in `data/`
//! - `Dict::init_custom(chars, phrases)` swaps in caller-supplied data
//!   before the first `global()` call
//! - `Dict::from_sources` / `Dict::open` build private dictionaries from
//!   text assets or a compiled binary file

mod binary;
pub mod source;
mod trie;

pub(crate) use trie::PhraseTrie;

use std::collections::HashMap;
use std::io;
use std::sync::OnceLock;

use crate::syllable::Syllable;

/// Embedded single-character reading table.
pub const DEFAULT_CHARS: &str = include_str!("../../data/pinyin.txt");
/// Embedded polyphonic-compound override table.
pub const DEFAULT_PHRASES: &str = include_str!("../../data/phrases.txt");

static CUSTOM_SOURCES: OnceLock<(String, String)> = OnceLock::new();

/// Unified error type for dictionary parsing and binary I/O.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected HPDC)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),

    #[error("parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error("dictionary already initialized")]
    AlreadyInitialized,
}

/// Character → readings mapping plus the phrase override trie.
///
/// Never mutated after construction, so `&Dict` is freely shareable
/// across threads; conversion calls borrow it for their lifetime.
pub struct Dict {
    chars: HashMap<char, Vec<Syllable>>,
    phrases: PhraseTrie,
}

impl Dict {
    /// Parse a dictionary from the two text assets.
    pub fn from_sources(chars_txt: &str, phrases_txt: &str) -> Result<Self, DictError> {
        let chars = source::parse_chars(chars_txt)?;
        let mut phrases = PhraseTrie::new();
        for (key, readings) in source::parse_phrases(phrases_txt)? {
            phrases.insert(&key, readings);
        }
        Ok(Self { chars, phrases })
    }

    /// Build directly from parsed entries. Mainly for tests and benches.
    pub fn from_entries(
        chars: impl IntoIterator<Item = (char, Vec<Syllable>)>,
        phrases: impl IntoIterator<Item = (String, Vec<Syllable>)>,
    ) -> Self {
        let mut trie = PhraseTrie::new();
        for (key, readings) in phrases {
            trie.insert(&key, readings);
        }
        Self {
            chars: chars.into_iter().collect(),
            phrases: trie,
        }
    }

    /// Install custom source data before the first `global()` call.
    ///
    /// The data is validated eagerly; invalid data never replaces the
    /// embedded assets.
    pub fn init_custom(chars_txt: String, phrases_txt: String) -> Result<(), DictError> {
        Self::from_sources(&chars_txt, &phrases_txt)?;
        CUSTOM_SOURCES
            .set((chars_txt, phrases_txt))
            .map_err(|_| DictError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    ///
    /// Loading failure of the embedded data is fatal: the engine cannot
    /// produce any output without its dictionary.
    pub fn global() -> &'static Dict {
        static INSTANCE: OnceLock<Dict> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let (chars, phrases) = CUSTOM_SOURCES
                .get()
                .map(|(c, p)| (c.as_str(), p.as_str()))
                .unwrap_or((DEFAULT_CHARS, DEFAULT_PHRASES));
            Dict::from_sources(chars, phrases).expect("embedded dictionary data must be valid")
        })
    }

    /// All readings of a single character, rank order, default first.
    /// `None` is the normal "unrecognized" signal, not an error.
    pub fn lookup_char(&self, c: char) -> Option<&[Syllable]> {
        self.chars.get(&c).map(|v| v.as_slice())
    }

    /// Greedy longest phrase match starting at the head of `chars`.
    /// Returns the covered char count and one pinned reading per char.
    pub fn phrase_match(
        &self,
        chars: impl IntoIterator<Item = char>,
    ) -> Option<(usize, &[Syllable])> {
        self.phrases.longest_match(chars)
    }

    pub(crate) fn phrases(&self) -> &PhraseTrie {
        &self.phrases
    }

    /// Returns (character count, phrase count).
    pub fn stats(&self) -> (usize, usize) {
        (self.chars.len(), self.phrases.iter().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syl(s: &str) -> Syllable {
        Syllable::parse_marked(s).unwrap()
    }

    fn sample_dict() -> Dict {
        Dict::from_entries(
            [
                ('中', vec![syl("zhōng"), syl("zhòng")]),
                ('国', vec![syl("guó")]),
                ('重', vec![syl("zhòng"), syl("chóng")]),
                ('庆', vec![syl("qìng")]),
            ],
            [(
                "重庆".to_string(),
                vec![syl("chóng"), syl("qìng")],
            )],
        )
    }

    #[test]
    fn test_lookup_char() {
        let dict = sample_dict();
        let readings = dict.lookup_char('中').unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].marked(), "zhōng");
        assert!(dict.lookup_char('犬').is_none());
        assert!(dict.lookup_char('A').is_none());
    }

    #[test]
    fn test_phrase_match() {
        let dict = sample_dict();
        let (len, readings) = dict.phrase_match("重庆人".chars()).unwrap();
        assert_eq!(len, 2);
        assert_eq!(readings[0].marked(), "chóng");
        assert!(dict.phrase_match("重要".chars()).is_none());
    }

    #[test]
    fn test_from_sources() {
        let dict = Dict::from_sources(
            "U+4E2D: zhōng,zhòng\nU+56FD: guó\n",
            "# no phrases\n",
        )
        .unwrap();
        assert_eq!(dict.stats(), (2, 0));
        assert!(dict.phrases().is_empty());
    }

    #[test]
    fn test_embedded_assets_parse() {
        let dict = Dict::from_sources(DEFAULT_CHARS, DEFAULT_PHRASES).unwrap();
        let (chars, phrases) = dict.stats();
        assert!(chars > 200, "expected 200+ characters, got {chars}");
        assert!(phrases > 10, "expected 10+ phrases, got {phrases}");
        // every phrase character should also have a single-char entry
        for (key, _) in dict.phrases().iter() {
            for c in key.chars() {
                assert!(
                    dict.lookup_char(c).is_some(),
                    "phrase char {c} missing from character table"
                );
            }
        }
    }

    #[test]
    fn test_global_is_shared() {
        let a = Dict::global() as *const Dict;
        let b = Dict::global() as *const Dict;
        assert_eq!(a, b);
    }
}
