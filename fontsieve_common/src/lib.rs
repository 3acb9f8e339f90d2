//! Shared code for the `fontsieve` tools: codepoint range handling, coverage checks against a
//! target range, reading the character map of font files, and recovering the codepoints encoded
//! in `lv_font_conv` generated C sources.
//!
//! Not public API.

pub mod codepoints;
pub mod coverage;
pub mod lvgl;
pub mod report;

#[cfg(feature = "profiles")]
pub mod config;

#[cfg(feature = "ttf")]
pub mod font_file;

pub use codepoints::{Codepoint, CodepointRange};
