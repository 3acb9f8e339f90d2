use anyhow::*;
use fontsieve_common::{
    lvgl::{
        collect_unicode_lists, extract_file, parse_cmap_entry, read_source, split_cmap_blocks,
        ExtractConfig,
    },
    report::codepoint_line,
};
use log::info;
use std::{io::Write, path::Path};

pub fn print_report(out: &mut impl Write, config: &ExtractConfig) -> Result<()> {
    let extraction = extract_file(config)?;
    if extraction.used_fallback {
        info!(
            "Structured parsing found {} codepoints, fallback scan raised this to {}",
            extraction.structured,
            extraction.len()
        );
    }

    let name = config.path.file_name().unwrap_or(config.path.as_os_str());
    writeln!(out)?;
    writeln!(out, "File: {}", name.to_string_lossy())?;
    writeln!(out, "  Codepoints found: {}", extraction.len())?;
    if !config.no_chars {
        writeln!(out)?;
        writeln!(out, " Characters (codepoint -> glyph):")?;
        let limit = config.limit.unwrap_or(usize::MAX);
        for cp in extraction.codepoints.iter().take(limit) {
            writeln!(out, "{}", codepoint_line(*cp))?;
        }
    }
    Ok(())
}

fn field(value: Option<u32>) -> String {
    match value {
        Some(value) => format!("0x{value:04X}"),
        None => "-".to_string(),
    }
}

pub fn print_cmaps(out: &mut impl Write, path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let lists = collect_unicode_lists(&source);
    let blocks = split_cmap_blocks(&source);
    info!("Found {} cmap entries in {}", blocks.len(), path.display());

    for block in blocks {
        let entry = parse_cmap_entry(block);
        writeln!(out, "range_start: {}", field(entry.range_start))?;
        writeln!(out, "range_length: {}", field(entry.range_length))?;
        writeln!(out, "glyph_id_start: {}", field(entry.glyph_id_start))?;
        writeln!(out, "list_length: {}", field(entry.list_length))?;
        writeln!(out, "type: {}", entry.format.as_deref().unwrap_or("-"))?;
        if let Some(name) = &entry.unicode_list {
            match lists.get(name) {
                Some(offsets) => writeln!(out, "unicode_list: {name} ({} entries)", offsets.len())?,
                None => writeln!(out, "unicode_list: {name} (not found)")?,
            }
        }
        for (key, value) in &entry.other {
            writeln!(out, "{key}: {}", field(Some(*value)))?;
        }
        writeln!(out, "{}", "-".repeat(30))?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    const SOURCE: &str = "\
static const uint16_t unicode_list_0[] = {
    0x0, 0x5, 0xa
};

static const lv_font_fmt_txt_cmap_t cmaps[] =
{
    {
        .range_start = 65, .range_length = 2, .glyph_id_start = 1,
        .unicode_list = NULL, .glyph_id_ofs_list = NULL, .list_length = 0, .type = LV_FONT_FMT_TXT_CMAP_FORMAT0_TINY
    },
    {
        .range_start = 19968, .range_length = 11, .glyph_id_start = 3,
        .unicode_list = unicode_list_0, .glyph_id_ofs_list = NULL, .list_length = 3, .type = LV_FONT_FMT_TXT_CMAP_SPARSE_TINY
    }
};
";

    fn write_source() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font_16.c");
        fs::write(&path, SOURCE).unwrap();
        (dir, path)
    }

    #[test]
    fn test_report() {
        let (_dir, path) = write_source();
        let mut out = Vec::new();
        print_report(&mut out, &ExtractConfig::new(&path)).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            "\nFile: font_16.c\n  Codepoints found: 5\n\n Characters (codepoint -> glyph):\n  \
             0x0041 -> A\n  0x0042 -> B\n  0x4E00 -> 一\n  0x4E05 -> 丅\n  0x4E0A -> 上\n"
        );
    }

    #[test]
    fn test_report_limits() {
        let (_dir, path) = write_source();

        let mut out = Vec::new();
        print_report(&mut out, &ExtractConfig::new(&path).limit(2)).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Codepoints found: 5"));
        assert_eq!(out.lines().filter(|x| x.starts_with("  0x")).count(), 2);
        assert!(out.ends_with("  0x0041 -> A\n  0x0042 -> B\n"));

        let mut out = Vec::new();
        print_report(&mut out, &ExtractConfig::new(&path).no_chars()).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out, "\nFile: font_16.c\n  Codepoints found: 5\n");
    }

    #[test]
    fn test_report_missing_file() {
        let mut out = Vec::new();
        let err = print_report(&mut out, &ExtractConfig::new("/no/such/font.c")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_cmaps() {
        let (_dir, path) = write_source();
        let mut out = Vec::new();
        print_cmaps(&mut out, &path).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("range_start: 0x0041\nrange_length: 0x0002\n"));
        assert!(out.contains("type: LV_FONT_FMT_TXT_CMAP_SPARSE_TINY\n"));
        assert!(out.contains("unicode_list: unicode_list_0 (3 entries)\n"));
        assert_eq!(out.matches(&"-".repeat(30)).count(), 2);
    }
}
