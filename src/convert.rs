//! Resolver and assembler: the public conversion entry points.
//!
//! `convert` produces the flat separator-joined string; `convert_array`
//! produces one record per input unit with policy decisions left to the
//! caller. Both are stateless per call beyond the shared dictionary.

use std::str;

use tracing::{debug, debug_span};

use crate::dict::Dict;
use crate::render::{render, Mode};
use crate::segment::{segment, Token};
use crate::syllable::Syllable;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input byte buffer is not well-formed UTF-8. Reported as a
    /// distinct failure: an undecodable buffer is a data-integrity
    /// problem, not an "unrecognized character".
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] str::Utf8Error),

    /// The configured separator is not a single ASCII byte.
    #[error("separator {0:#04x} is not ASCII")]
    NonAsciiSeparator(u8),
}

/// Conversion options, threaded through one call; no global state.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    /// Byte inserted between output pieces. Must be ASCII.
    pub separator: u8,
    /// Emit every distinct reading instead of only the default one.
    pub multi: bool,
    /// Drop unrecognized characters instead of passing them through.
    pub ignore_unknown: bool,
    /// Isolate each unrecognized scalar as its own piece. When false,
    /// consecutive unrecognized characters coalesce into one piece with
    /// no internal separator.
    pub split_unknown: bool,
    /// Lower-case rendered output (URL-slug normalization).
    pub slug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Plain,
            separator: b' ',
            multi: false,
            ignore_unknown: false,
            split_unknown: true,
            slug: false,
        }
    }
}

/// One per-character conversion record (structured output).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Record {
    /// Original source substring of this unit.
    pub source: String,
    /// Rendered readings in resolver order; empty for pass-through units.
    pub outputs: Vec<String>,
    /// Renderer tag, `None` for pass-through units. The marshalling
    /// layer stores this alongside each element.
    pub mode: Option<Mode>,
}

/// Readings to emit for a recognized unit: the pinned (phrase-override)
/// or default-rank reading, or, in multi mode, the pinned reading
/// followed by every dictionary reading in rank order with exact
/// duplicates collapsed. The non-multi reading is always element 0.
fn resolve<'a>(
    readings: &'a [Syllable],
    pinned: Option<&'a Syllable>,
    multi: bool,
) -> Vec<&'a Syllable> {
    let mut out: Vec<&Syllable> = Vec::new();
    if let Some(p) = pinned {
        out.push(p);
    }
    if multi {
        for r in readings {
            if !out.iter().any(|&s| s == r) {
                out.push(r);
            }
        }
    } else if out.is_empty() {
        if let Some(first) = readings.first() {
            out.push(first);
        }
    }
    out
}

fn separator(config: &Config) -> Result<String, Error> {
    if config.separator.is_ascii() {
        Ok((config.separator as char).to_string())
    } else {
        Err(Error::NonAsciiSeparator(config.separator))
    }
}

/// Convert `text` against the global dictionary into one flat string.
pub fn convert(text: &str, config: &Config) -> Result<String, Error> {
    convert_with(Dict::global(), text, config)
}

/// Convert a raw byte buffer, validating the encoding first.
pub fn convert_bytes(bytes: &[u8], config: &Config) -> Result<String, Error> {
    let text = str::from_utf8(bytes)?;
    convert(text, config)
}

/// Convert `text` against a caller-supplied dictionary.
pub fn convert_with(dict: &Dict, text: &str, config: &Config) -> Result<String, Error> {
    let sep = separator(config)?;
    let _span = debug_span!("convert", len = text.len(), mode = ?config.mode).entered();

    let mut pieces: Vec<String> = Vec::new();
    let mut unknown = String::new();
    for token in segment(text, dict) {
        match token {
            Token::Other { text } => {
                if config.ignore_unknown {
                    continue;
                }
                if config.split_unknown {
                    pieces.push(text.to_string());
                } else {
                    unknown.push_str(text);
                }
            }
            Token::Han {
                readings, pinned, ..
            } => {
                if !unknown.is_empty() {
                    pieces.push(std::mem::take(&mut unknown));
                }
                let rendered: Vec<String> = resolve(readings, pinned, config.multi)
                    .iter()
                    .map(|s| render(s, config.mode, config.slug))
                    .collect();
                let piece = rendered.join(&sep);
                if !piece.is_empty() {
                    pieces.push(piece);
                }
            }
        }
    }
    if !unknown.is_empty() {
        pieces.push(unknown);
    }

    debug!(pieces = pieces.len(), "assembled");
    Ok(pieces.join(&sep))
}

/// Convert into per-character records against the global dictionary.
///
/// One record per input unit, in order. No separator, dropping, or
/// coalescing policy is applied; that is deferred to the caller.
pub fn convert_array(text: &str, config: &Config) -> Vec<Record> {
    convert_array_with(Dict::global(), text, config)
}

pub fn convert_array_with(dict: &Dict, text: &str, config: &Config) -> Vec<Record> {
    let _span = debug_span!("convert_array", len = text.len()).entered();
    segment(text, dict)
        .map(|token| match token {
            Token::Other { text } => Record {
                source: text.to_string(),
                outputs: Vec::new(),
                mode: None,
            },
            Token::Han {
                text,
                readings,
                pinned,
            } => Record {
                source: text.to_string(),
                outputs: resolve(readings, pinned, config.multi)
                    .iter()
                    .map(|s| render(s, config.mode, config.slug))
                    .collect(),
                mode: Some(config.mode),
            },
        })
        .collect()
}

/// URL-slug convenience: plain syllables, lower-cased, joined by
/// `separator` (typically `b'-'`).
pub fn slug(text: &str, separator: u8) -> Result<String, Error> {
    convert(
        text,
        &Config {
            mode: Mode::Plain,
            separator,
            slug: true,
            ..Config::default()
        },
    )
}
