//! Compiled binary dictionary format.
//!
//! Layout: 4 bytes magic `HPDC`, 1 byte version, then a bincode payload.
//! `open` memory-maps the file read-only; the mapping lives only for the
//! duration of deserialization, so no self-referential state is kept.

use std::fs::{self, File};
use std::path::Path;

use memmap2::Mmap;
use serde::{Deserialize, Serialize};

use crate::syllable::Syllable;

use super::{Dict, DictError, PhraseTrie};

const MAGIC: &[u8; 4] = b"HPDC";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 5;

#[derive(Serialize, Deserialize)]
struct DictData {
    chars: Vec<(char, Vec<Syllable>)>,
    phrases: Vec<(String, Vec<Syllable>)>,
}

impl Dict {
    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let mut chars: Vec<(char, Vec<Syllable>)> = self
            .chars
            .iter()
            .map(|(c, readings)| (*c, readings.clone()))
            .collect();
        chars.sort_by_key(|(c, _)| *c);

        let mut phrases: Vec<(String, Vec<Syllable>)> = self
            .phrases
            .iter()
            .into_iter()
            .map(|(key, readings)| (key, readings.clone()))
            .collect();
        phrases.sort_by(|(a, _), (b, _)| a.cmp(b));

        let data = DictData { chars, phrases };
        let mut buf = Vec::new();
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        let encoded = bincode::serialize(&data).map_err(DictError::Serialize)?;
        buf.extend_from_slice(&encoded);
        Ok(buf)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, DictError> {
        if data.len() < HEADER_SIZE {
            return Err(DictError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(DictError::InvalidMagic);
        }
        if data[4] != VERSION {
            return Err(DictError::UnsupportedVersion(data[4]));
        }
        let decoded: DictData =
            bincode::deserialize(&data[HEADER_SIZE..]).map_err(DictError::Deserialize)?;

        let mut phrases = PhraseTrie::new();
        for (key, readings) in decoded.phrases {
            phrases.insert(&key, readings);
        }
        Ok(Self {
            chars: decoded.chars.into_iter().collect(),
            phrases,
        })
    }

    /// Open a compiled dictionary file.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is dropped
        // before this function returns.
        let mmap = unsafe { Mmap::map(&file)? };
        Self::from_bytes(&mmap)
    }

    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        Ok(fs::write(path, self.to_bytes()?)?)
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
            [("重庆".to_string(), vec![syl("chóng"), syl("qìng")])],
        )
    }

    #[test]
    fn test_roundtrip() {
        let dict = sample_dict();
        let bytes = dict.to_bytes().unwrap();
        let dict2 = Dict::from_bytes(&bytes).unwrap();

        assert_eq!(dict.stats(), dict2.stats());
        let r1 = dict.lookup_char('中').unwrap();
        let r2 = dict2.lookup_char('中').unwrap();
        assert_eq!(r1, r2);
        let (len, readings) = dict2.phrase_match("重庆".chars()).unwrap();
        assert_eq!(len, 2);
        assert_eq!(readings[0].marked(), "chóng");
    }

    #[test]
    fn test_save_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hanpin.dict");
        let dict = sample_dict();
        dict.save(&path).unwrap();

        let opened = Dict::open(&path).unwrap();
        assert_eq!(opened.stats(), dict.stats());
        assert_eq!(
            opened.lookup_char('国').unwrap()[0].marked(),
            "guó"
        );
    }

    #[test]
    fn test_invalid_magic() {
        let result = Dict::from_bytes(b"XXXX\x01data");
        assert!(matches!(result, Err(DictError::InvalidMagic)));
    }

    #[test]
    fn test_header_too_short() {
        let result = Dict::from_bytes(b"HPD");
        assert!(matches!(result, Err(DictError::InvalidHeader)));
    }

    #[test]
    fn test_unsupported_version() {
        let result = Dict::from_bytes(b"HPDC\x99");
        assert!(matches!(result, Err(DictError::UnsupportedVersion(0x99))));
    }

    #[test]
    fn test_truncated_payload() {
        let dict = sample_dict();
        let bytes = dict.to_bytes().unwrap();
        let result = Dict::from_bytes(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DictError::Deserialize(_))));
    }
}
