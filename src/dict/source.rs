//! Parsers for the text dictionary assets.
//!
//! Two formats, both line-oriented with `#` comments:
//!
//! - character table: `U+4E2D: zhōng,zhòng  # 中`
//! - phrase table:    `重庆: chóng qìng`
//!
//! Readings are tone-marked and rank-ordered; the first reading of a
//! character is its default. Malformed lines are rejected loudly so a
//! corrupt asset fails at initialization instead of degrading output.

use std::collections::HashMap;

use crate::syllable::Syllable;

use super::DictError;

/// Parse the single-character reading table.
pub fn parse_chars(text: &str) -> Result<HashMap<char, Vec<Syllable>>, DictError> {
    let mut map = HashMap::new();
    for (idx, raw_line) in text.lines().enumerate() {
        let line = strip_comment(raw_line);
        if line.is_empty() {
            continue;
        }
        let (key, value) = split_entry(line, idx)?;

        let hex = key
            .strip_prefix("U+")
            .ok_or_else(|| parse_err(idx, format!("expected U+XXXX key, got {key:?}")))?;
        let cp = u32::from_str_radix(hex, 16)
            .map_err(|_| parse_err(idx, format!("bad codepoint {key:?}")))?;
        let ch = char::from_u32(cp)
            .ok_or_else(|| parse_err(idx, format!("U+{cp:04X} is not a scalar value")))?;

        let readings = parse_readings(value.split(','), idx)?;
        if map.insert(ch, readings).is_some() {
            return Err(parse_err(idx, format!("duplicate entry for {ch}")));
        }
    }
    Ok(map)
}

/// Parse the phrase override table into (key, per-character readings)
/// pairs. Each key must be at least two characters and carry exactly one
/// syllable per character.
pub fn parse_phrases(text: &str) -> Result<Vec<(String, Vec<Syllable>)>, DictError> {
    let mut out = Vec::new();
    for (idx, raw_line) in text.lines().enumerate() {
        let line = strip_comment(raw_line);
        if line.is_empty() {
            continue;
        }
        let (key, value) = split_entry(line, idx)?;

        let char_count = key.chars().count();
        if char_count < 2 {
            return Err(parse_err(idx, format!("phrase key {key:?} is too short")));
        }
        let readings = parse_readings(value.split_whitespace(), idx)?;
        if readings.len() != char_count {
            return Err(parse_err(
                idx,
                format!(
                    "phrase {key:?} has {char_count} characters but {} syllables",
                    readings.len()
                ),
            ));
        }
        out.push((key.to_string(), readings));
    }
    Ok(out)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => line[..i].trim(),
        None => line.trim(),
    }
}

fn split_entry(line: &str, idx: usize) -> Result<(&str, &str), DictError> {
    let (key, value) = line
        .split_once(':')
        .ok_or_else(|| parse_err(idx, format!("missing ':' in {line:?}")))?;
    Ok((key.trim(), value.trim()))
}

fn parse_readings<'a>(
    parts: impl Iterator<Item = &'a str>,
    idx: usize,
) -> Result<Vec<Syllable>, DictError> {
    let mut readings = Vec::new();
    for part in parts {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let syl = Syllable::parse_marked(part).map_err(|e| parse_err(idx, e.to_string()))?;
        readings.push(syl);
    }
    if readings.is_empty() {
        return Err(parse_err(idx, "entry has no readings".to_string()));
    }
    Ok(readings)
}

fn parse_err(idx: usize, msg: String) -> DictError {
    DictError::Parse {
        line: idx + 1,
        msg,
    }
}
