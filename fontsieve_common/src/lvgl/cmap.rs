use crate::{codepoints::Codepoint, lvgl::scan::parse_literal};
use regex_lite::Regex;
use std::collections::BTreeMap;

/// One `lv_font_fmt_txt_cmap_t` descriptor.
///
/// Every field is optional: a field that never appears in the source stays `None` rather than
/// defaulting to zero.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CmapEntry {
    pub range_start: Option<Codepoint>,
    pub range_length: Option<u32>,
    pub glyph_id_start: Option<u32>,
    /// Name of the referenced offset array, e.g. `unicode_list_0`.
    pub unicode_list: Option<String>,
    pub list_length: Option<u32>,
    /// The format tag, e.g. `LV_FONT_FMT_TXT_CMAP_SPARSE_TINY`.
    pub format: Option<String>,
    /// Numeric fields not otherwise known.
    pub other: BTreeMap<String, u32>,
}

/// Returns the offset of the brace closing the one at `open`, if it is ever closed.
fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in text[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Finds the contents of the `cmaps` array, without its outer braces.
fn find_cmaps_body(source: &str) -> Option<&str> {
    let typed = Regex::new(
        r"static\s+const\s+[^{;]*lv_font_fmt_txt_cmap_t\s+cmaps\s*\[\s*\]\s*=\s*\{",
    )
    .unwrap();
    let bare = Regex::new(r"\bcmaps\s*\[\s*\]\s*=\s*\{").unwrap();

    let header = typed.find(source).or_else(|| bare.find(source))?;
    let open = header.end() - 1;
    let close = matching_brace(source, open).unwrap_or(source.len());
    Some(&source[open + 1..close])
}

/// Splits the `cmaps` array into the source text of each top-level `{ ... }` descriptor.
///
/// Nested braces are kept inside their descriptor. Returns an empty list if the file has no
/// `cmaps` array.
pub fn split_cmap_blocks(source: &str) -> Vec<&str> {
    let Some(body) = find_cmaps_body(source) else {
        return Vec::new();
    };

    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in body.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    let block = body[start..=i].trim();
                    blocks.push(block.strip_suffix(',').unwrap_or(block));
                }
            }
            _ => {}
        }
    }
    blocks
}

/// Parses the `.field = value` assignments of one descriptor block.
pub fn parse_cmap_entry(block: &str) -> CmapEntry {
    let assignment = Regex::new(r"\.(?P<key>[a-zA-Z0-9_]+)\s*=\s*(?P<val>[^,}\n]+)").unwrap();
    let list_name = Regex::new(r"unicode_list_\d+").unwrap();
    let number = Regex::new(r"0x[0-9A-Fa-f]+|\d+").unwrap();

    let mut entry = CmapEntry::default();
    for captures in assignment.captures_iter(block) {
        let key = captures["key"].trim();
        let value = captures["val"].trim().trim_end_matches(',');

        match key {
            "unicode_list" => {
                entry.unicode_list = list_name.find(value).map(|m| m.as_str().to_string());
            }
            "type" => {
                entry.format = value.split_whitespace().last().map(str::to_string);
            }
            _ => {
                let Some(num) = number.find(value).and_then(|m| parse_literal(m.as_str())) else {
                    continue;
                };
                match key {
                    "range_start" => entry.range_start = Some(num),
                    "range_length" => entry.range_length = Some(num),
                    "glyph_id_start" => entry.glyph_id_start = Some(num),
                    "list_length" => entry.list_length = Some(num),
                    _ => {
                        entry.other.insert(key.to_string(), num);
                    }
                }
            }
        }
    }
    entry
}
