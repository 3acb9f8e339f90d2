use anyhow::*;
use fontsieve_common::{
    codepoints::CodepointRange,
    config::Profile,
    coverage::{Coverage, CoverageStatus},
    font_file::read_font_codepoints_lossy,
};
use log::{debug, warn};
use serde::Deserialize;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    result::Result::Ok,
};

#[derive(Clone, Debug, Deserialize)]
pub struct FontInfo {
    #[serde(default)]
    pub variants: Vec<Variant>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Variant {
    pub id: String,
    #[serde(default)]
    pub ttf: Option<String>,
}

/// A font file to fetch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlannedFile {
    pub name: String,
    pub url: String,
}

/// Lists the `.ttf` files available for a font, skipping variants without one.
pub fn plan_downloads(font_id: &str, info: &FontInfo) -> Vec<PlannedFile> {
    info.variants
        .iter()
        .filter_map(|variant| {
            let url = variant.ttf.as_ref()?;
            Some(PlannedFile { name: format!("{font_id}-{}.ttf", variant.id), url: url.clone() })
        })
        .collect()
}

fn fetch_font_info(url: &str) -> Result<FontInfo> {
    debug!("Fetching {url}");
    Ok(reqwest::blocking::get(url)?.error_for_status()?.json()?)
}

fn fetch_file(url: &str, path: &Path) -> Result<()> {
    debug!("Downloading {url} to {}", path.display());
    let data = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
    fs::write(path, &data)?;
    Ok(())
}

/// Checks a downloaded font, deleting it when too many target codepoints are missing.
///
/// Returns whether the font was kept.
pub fn check_downloaded(
    out: &mut impl Write,
    path: &Path,
    target: &[CodepointRange],
    tolerance: usize,
) -> Result<bool> {
    let coverage = Coverage::check(&read_font_codepoints_lossy(path), target);
    let status = coverage.status(tolerance);
    match status {
        CoverageStatus::Full => writeln!(out, "    ✅ Full coverage of target range")?,
        CoverageStatus::Tolerated(_) => writeln!(out, "    {status}")?,
        CoverageStatus::Insufficient(_) => writeln!(out, "    {status} → removing")?,
    }

    if !status.is_acceptable() {
        fs::remove_file(path)
            .with_context(|| format!("Could not remove '{}'", path.display()))?;
    }
    Ok(status.is_acceptable())
}

/// Downloads every variant of the fonts a profile names, keeping those that cover its ranges.
pub fn download_profile(out: &mut impl Write, profile: &Profile, output: &Path) -> Result<()> {
    let Some(source) = &profile.download else {
        bail!("Profile has no download section.");
    };
    let target = profile.target_ranges()?;
    fs::create_dir_all(output)
        .with_context(|| format!("Could not create '{}'", output.display()))?;

    let mut kept = Vec::new();
    for font_id in &source.fonts {
        writeln!(out, "Processing {font_id} …")?;
        let info = match fetch_font_info(&source.font_url(font_id)) {
            Ok(info) => info,
            Err(e) => {
                warn!("Failed to get info for {font_id}: {e:?}");
                writeln!(out, "  Failed to get info for {font_id}: {e}")?;
                continue;
            }
        };

        for file in plan_downloads(font_id, &info) {
            let path: PathBuf = output.join(&file.name);
            writeln!(out, "  Downloading {} …", file.name)?;
            if let Err(e) = fetch_file(&file.url, &path) {
                warn!("Failed download {}: {e:?}", file.name);
                writeln!(out, "    Failed download {}: {e}", file.name)?;
                continue;
            }
            if check_downloaded(out, &path, &target, profile.tolerance)? {
                kept.push(file.name);
            }
        }
    }

    writeln!(out, "Done, {} fonts saved in: {}", kept.len(), output.display())?;
    Ok(())
}
