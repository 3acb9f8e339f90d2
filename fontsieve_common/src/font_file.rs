use crate::codepoints::Codepoint;
use anyhow::*;
use glob::MatchOptions;
use log::{debug, warn};
use skrifa::{FontRef, MetadataProvider};
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    result::Result::Ok,
};

/// Returns the codepoints mapped by the best Unicode character map of a font.
///
/// Font collections are supported, in which case the first face is read.
pub fn font_codepoints(data: &[u8]) -> Result<BTreeSet<Codepoint>> {
    let font = FontRef::from_index(data, 0)?;
    let charmap = font.charmap();
    ensure!(charmap.has_map(), "Font has no supported Unicode character map.");
    Ok(charmap.mappings().map(|(cp, _)| cp).collect())
}

/// Reads a font file and returns its codepoints.
pub fn read_font_codepoints(path: &Path) -> Result<BTreeSet<Codepoint>> {
    let data = fs::read(path).with_context(|| format!("Could not read '{}'", path.display()))?;
    let codepoints = font_codepoints(&data)
        .with_context(|| format!("Could not parse font '{}'", path.display()))?;
    debug!("Read {} codepoints from {}", codepoints.len(), path.display());
    Ok(codepoints)
}

/// Reads a font file, treating a font that cannot be read as having no codepoints at all.
///
/// Used by operations that scan a whole directory and should not stop at one broken file.
pub fn read_font_codepoints_lossy(path: &Path) -> BTreeSet<Codepoint> {
    match read_font_codepoints(path) {
        Ok(codepoints) => codepoints,
        Err(e) => {
            warn!("Error reading {}: {e:#}", path.display());
            BTreeSet::new()
        }
    }
}

/// Lists the `.ttf` files directly inside a directory, sorted by path.
pub fn list_ttf_files(dir: &Path) -> Result<Vec<PathBuf>> {
    ensure!(dir.is_dir(), "'{}' is not a directory.", dir.display());

    let pattern = format!("{}/*.ttf", glob::Pattern::escape(&dir.to_string_lossy()));
    let options = MatchOptions { case_sensitive: false, ..MatchOptions::new() };

    let mut files = Vec::new();
    for entry in glob::glob_with(&pattern, options)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
