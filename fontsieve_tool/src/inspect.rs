use anyhow::*;
use fontsieve_common::{
    codepoints::{chunk_codepoints, collapse_ranges, format_range_list, Codepoint},
    font_file::read_font_codepoints,
    report::{block_name, character_sample},
};
use std::{io::Write, path::Path};

/// Which end of a font's character list to print.
#[derive(Copy, Clone, Debug)]
pub enum Selection {
    First(usize),
    Last(usize),
}

fn load_codepoints(font: &Path, min: Codepoint) -> Result<(usize, Vec<Codepoint>)> {
    let codepoints = read_font_codepoints(font)?;
    let total = codepoints.len();
    Ok((total, codepoints.into_iter().filter(|x| *x >= min).collect()))
}

pub fn print_ranges(out: &mut impl Write, font: &Path, min: Option<Codepoint>) -> Result<()> {
    let (total, codepoints) = load_codepoints(font, min.unwrap_or(0))?;
    writeln!(out, "Number of codepoints in font: {total}")?;
    for range in collapse_ranges(&codepoints) {
        writeln!(out, "{range} ({}) {}", range.len(), block_name(range.start))?;
    }
    Ok(())
}

pub fn print_chars(
    out: &mut impl Write,
    font: &Path,
    min: Codepoint,
    selection: Selection,
) -> Result<()> {
    let (total, codepoints) = load_codepoints(font, min)?;
    let selected = match selection {
        Selection::First(n) => &codepoints[..n.min(codepoints.len())],
        Selection::Last(n) => &codepoints[codepoints.len().saturating_sub(n)..],
    };
    writeln!(out, "Number of codepoints in font: {total}")?;
    writeln!(out, "{}", character_sample(selected))?;
    Ok(())
}

pub fn print_chunks(
    out: &mut impl Write,
    font: &Path,
    min: Codepoint,
    chunk_size: usize,
) -> Result<()> {
    let (_, codepoints) = load_codepoints(font, min)?;
    let chunks = chunk_codepoints(&codepoints, chunk_size)?;
    writeln!(out, "Ranges for conversion (codepoints 0x{min:04X}+, {} chunks):", chunks.len())?;
    writeln!(out, "{}", format_range_list(&chunks))?;
    Ok(())
}
