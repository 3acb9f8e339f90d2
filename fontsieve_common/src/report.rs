use crate::codepoints::{format_codepoint, Codepoint};
use unic_ucd::{block::Block, category::GeneralCategory};

/// Whether a character can be shown directly in a terminal report.
///
/// Control, format, surrogate, private use and separator characters are not, except for the
/// ASCII space. Characters the Unicode tables don't know about are assumed to be printable, as
/// they are most likely assigned in a newer Unicode version.
pub fn is_printable(ch: char) -> bool {
    match GeneralCategory::of(ch) {
        GeneralCategory::Unassigned => true,
        category => ch == ' ' || !(category.is_other() || category.is_separator()),
    }
}

/// Returns the text shown for a codepoint: the character itself, or `(non-printable)`.
pub fn display_codepoint(cp: Codepoint) -> String {
    match char::from_u32(cp) {
        Some(ch) if is_printable(ch) => ch.to_string(),
        _ => "(non-printable)".to_string(),
    }
}

/// Formats one report line, e.g. `  0x4E00 -> 一`.
pub fn codepoint_line(cp: Codepoint) -> String {
    format!("  {} -> {}", format_codepoint(cp), display_codepoint(cp))
}

/// Returns the name of the Unicode block containing a codepoint.
pub fn block_name(cp: Codepoint) -> &'static str {
    match char::from_u32(cp).and_then(Block::of) {
        None => "Unknown Block",
        Some(block) => block.name,
    }
}

/// Joins the printable characters among the codepoints with spaces.
pub fn character_sample(codepoints: &[Codepoint]) -> String {
    let chars: Vec<_> = codepoints
        .iter()
        .filter_map(|x| char::from_u32(*x))
        .filter(|x| is_printable(*x))
        .map(|x| x.to_string())
        .collect();
    chars.join(" ")
}
