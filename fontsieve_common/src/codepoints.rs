use anyhow::*;
use std::{collections::BTreeSet, fmt, ops::RangeInclusive};

/// A Unicode codepoint. Values are never validated against the Unicode maximum.
pub type Codepoint = u32;

/// An inclusive range of codepoints.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct CodepointRange {
    pub start: Codepoint,
    pub end: Codepoint,
}
impl CodepointRange {
    pub fn new(start: Codepoint, end: Codepoint) -> Result<Self> {
        ensure!(start <= end, "Range start 0x{start:04X} is after its end 0x{end:04X}.");
        Ok(CodepointRange { start, end })
    }

    pub fn single(cp: Codepoint) -> Self {
        CodepointRange { start: cp, end: cp }
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn iter(&self) -> RangeInclusive<Codepoint> {
        self.start..=self.end
    }
}
impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}-0x{:04X}", self.start, self.end)
    }
}

/// Formats a codepoint the way all reports print it, e.g. `0x0041`.
pub fn format_codepoint(cp: Codepoint) -> String {
    format!("0x{cp:04X}")
}

/// Collapses a sorted list of codepoints into maximal contiguous ranges.
///
/// Duplicated entries are tolerated. Expanding the returned ranges again yields exactly the set
/// of input codepoints.
pub fn collapse_ranges(codepoints: &[Codepoint]) -> Vec<CodepointRange> {
    let mut ranges = Vec::new();
    let mut iter = codepoints.iter().copied();
    let Some(first) = iter.next() else {
        return ranges;
    };

    let mut start = first;
    let mut prev = first;
    for cp in iter {
        if cp == prev {
            continue;
        }
        if prev.checked_add(1) != Some(cp) {
            ranges.push(CodepointRange { start, end: prev });
            start = cp;
        }
        prev = cp;
    }
    ranges.push(CodepointRange { start, end: prev });
    ranges
}

/// Parses a hex codepoint, with or without a `0x` or `0X` prefix.
pub fn parse_hex(text: &str) -> Result<Codepoint> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u32::from_str_radix(digits, 16).with_context(|| format!("Invalid hex codepoint: '{text}'"))
}

/// Parses a range list such as `0x0600-0x06FF,0x0750-0x077F,0x08A0`.
///
/// Each comma separated item is either a single hex codepoint or two hex codepoints joined by a
/// hyphen. Empty items are skipped, but the list as a whole must contain at least one range.
pub fn parse_range_list(text: &str) -> Result<Vec<CodepointRange>> {
    let mut ranges = Vec::new();
    for item in text.split(',').map(str::trim).filter(|x| !x.is_empty()) {
        let range = match item.split_once('-') {
            Some((start, end)) => CodepointRange::new(parse_hex(start)?, parse_hex(end)?)?,
            None => CodepointRange::single(parse_hex(item)?),
        };
        ranges.push(range);
    }
    ensure!(!ranges.is_empty(), "No ranges found in '{text}'.");
    Ok(ranges)
}

/// Formats ranges back into the comma separated form accepted by [`parse_range_list`].
pub fn format_range_list(ranges: &[CodepointRange]) -> String {
    let items: Vec<_> = ranges.iter().map(|x| x.to_string()).collect();
    items.join(",")
}

/// Returns every codepoint covered by the given ranges.
pub fn flatten_ranges(ranges: &[CodepointRange]) -> BTreeSet<Codepoint> {
    let mut set = BTreeSet::new();
    for range in ranges {
        set.extend(range.iter());
    }
    set
}

/// Splits a sorted codepoint list into chunks of at most `chunk_size` codepoints, returning the
/// first and last codepoint of each chunk.
///
/// The chunks are not contiguous ranges: they are bounds for conversion tools that accept a
/// limited number of glyphs per range argument.
pub fn chunk_codepoints(codepoints: &[Codepoint], chunk_size: usize) -> Result<Vec<CodepointRange>> {
    ensure!(chunk_size != 0, "Chunk size must be at least 1.");
    let mut chunks = Vec::new();
    for chunk in codepoints.chunks(chunk_size) {
        chunks.push(CodepointRange::new(chunk[0], chunk[chunk.len() - 1])?);
    }
    Ok(chunks)
}
