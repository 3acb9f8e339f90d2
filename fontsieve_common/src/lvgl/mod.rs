//! Recovers the codepoints encoded in a C source file generated by `lv_font_conv`.
//!
//! No font library is involved: the generated source is scraped as text. The converter emits
//! two structures that matter here:
//!
//! * `unicode_list_<N>` arrays, holding offsets of the codepoints in a sparse range relative to
//!   its start.
//! * the `cmaps` array of `lv_font_fmt_txt_cmap_t` descriptors, each describing either a dense
//!   range (`range_start` + `range_length`) or a sparse one referencing a `unicode_list_<N>`.
//!
//! When scraping these finds suspiciously few codepoints, every large hex literal in the file is
//! taken as a codepoint as well. See [`ExtractConfig`] for the thresholds involved.

mod cmap;
mod extract;
mod scan;

pub use cmap::{parse_cmap_entry, split_cmap_blocks, CmapEntry};
pub use extract::{
    decode_lossy, extract_codepoints, extract_file, materialize, read_source, ExtractConfig,
    Extraction, DEFAULT_DISPLAY_LIMIT, DEFAULT_FALLBACK_FLOOR, DEFAULT_FALLBACK_THRESHOLD,
};
pub use scan::{collect_unicode_lists, LiteralScanner, UnicodeLists};
