use crate::Target;
use anyhow::*;
use fontsieve_common::{
    codepoints::format_range_list,
    coverage::{Coverage, CoverageStatus},
    font_file::{list_ttf_files, read_font_codepoints_lossy},
};
use log::{debug, info};
use std::{fs, io::Write, path::Path};

/// Missing codepoints tolerated when filtering, unless a profile says otherwise.
pub const DEFAULT_TOLERANCE: usize = 5000;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|x| x.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Lists the fonts in a directory that contain every target codepoint.
pub fn find_fonts(out: &mut impl Write, dir: &Path, target: &Target) -> Result<()> {
    writeln!(out, "Looking for fonts in:\n  {}", dir.display())?;
    writeln!(out, "Target Unicode range(s):\n  {}", format_range_list(&target.ranges))?;
    writeln!(out, "{}", "-".repeat(51))?;

    let mut matches = Vec::new();
    for path in list_ttf_files(dir)? {
        let coverage = Coverage::check(&read_font_codepoints_lossy(&path), &target.ranges);
        if coverage.is_complete() {
            matches.push(file_name(&path));
        } else {
            writeln!(out, "{}: missing {} codepoints:", file_name(&path), coverage.missing.len())?;
            writeln!(out, "{}", coverage.missing_list())?;
        }
    }

    if matches.is_empty() {
        writeln!(out, "No fonts cover the specified range.")?;
    } else {
        writeln!(out, "Fonts that cover this Unicode range:")?;
        for name in matches {
            writeln!(out, " - {name}")?;
        }
    }
    Ok(())
}

/// Copies every font in `input` to `output`, printing how well each covers the target.
pub fn filter_fonts(
    out: &mut impl Write,
    input: &Path,
    output: &Path,
    target: &Target,
    tolerance: usize,
) -> Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("Could not create '{}'", output.display()))?;

    let fonts = list_ttf_files(input)?;
    info!("Checking {} fonts against {} target ranges", fonts.len(), target.ranges.len());
    for path in fonts {
        let name = file_name(&path);
        let coverage = Coverage::check(&read_font_codepoints_lossy(&path), &target.ranges);
        match coverage.status(tolerance) {
            CoverageStatus::Insufficient(n) => {
                writeln!(out, "{name} ⚠️ Missing {n} codepoints (subset font)")?
            }
            status => writeln!(out, "{name} {status}")?,
        }

        let dest = output.join(&name);
        debug!("Copying {} to {}", path.display(), dest.display());
        fs::copy(&path, &dest)
            .with_context(|| format!("Could not copy '{}'", path.display()))?;
    }

    writeln!(out, "All done, fonts saved in: {}", output.display())?;
    Ok(())
}
