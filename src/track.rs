//! Track entity, filename parsing and construction from audio files.
//!
//! A `Track` is built once from a path: `parse` derives the normalized path,
//! filename and an author/title guess, and `factory` picks the variant by
//! suffix and fills in duration/album from the tag or WAV readers.

mod factory;
mod model;
mod parse;
mod time;

pub use factory::{TagInfo, WavParams, from_path, read_tags, read_wav_params};
pub use model::*;
pub use parse::{normalize_path, parse, split_author_title};
pub use time::format_mmss;
