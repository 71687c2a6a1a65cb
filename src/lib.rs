//! Chinese text → Pinyin conversion.
//!
//! For each input character the engine resolves one or more readings
//! from a built-in dictionary and renders them in one of five encodings
//! (bare syllable, diacritic, first letter, or two tone-digit
//! placements). Results come back either as one separator-joined string
//! or as per-character records.
//!
//! ```
//! use hanpin::{convert, Config, Mode};
//!
//! let config = Config {
//!     mode: Mode::Tone,
//!     ..Config::default()
//! };
//! assert_eq!(convert("中国", &config)?, "zhōng guó");
//!
//! let numbered = Config {
//!     mode: Mode::ToneNum,
//!     ..Config::default()
//! };
//! assert_eq!(convert("中国", &numbered)?, "zhong1 guo2");
//! # Ok::<(), hanpin::Error>(())
//! ```
//!
//! The dictionary is loaded once from embedded data and shared
//! read-only for the process lifetime; every conversion call owns its
//! transient state, so calls are independent across threads.

pub mod convert;
pub mod dict;
pub mod render;
pub mod segment;
pub mod syllable;
mod trace_init;
pub mod unicode;

pub use convert::{
    convert, convert_array, convert_array_with, convert_bytes, convert_with, slug, Config, Error,
    Record,
};
pub use dict::{Dict, DictError};
pub use render::{render, Mode};
pub use syllable::{Syllable, SyllableError};
pub use trace_init::init_tracing;
