use crate::{
    codepoints::Codepoint,
    lvgl::{
        cmap::{parse_cmap_entry, split_cmap_blocks, CmapEntry},
        scan::{collect_unicode_lists, LiteralScanner, UnicodeLists},
    },
};
use anyhow::*;
use derive_setters::Setters;
use log::{debug, info};
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_DISPLAY_LIMIT: usize = 200;
pub const DEFAULT_FALLBACK_THRESHOLD: usize = 256;
pub const DEFAULT_FALLBACK_FLOOR: Codepoint = 0x80;

/// Options for extracting the codepoints of a generated font source.
#[derive(Setters, Clone, Debug)]
#[setters(strip_option)]
pub struct ExtractConfig {
    #[setters(skip)]
    pub path: PathBuf,
    /// Maximum number of characters listed in a report. `None` lists everything.
    pub limit: Option<usize>,
    /// Only report the number of codepoints found.
    #[setters(bool)]
    pub no_chars: bool,
    /// Structured results smaller than this trigger the hex literal fallback.
    pub fallback_threshold: usize,
    /// Hex literals below this value are ignored by the fallback.
    pub fallback_floor: Codepoint,
}
impl ExtractConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ExtractConfig {
            path: path.into(),
            limit: Some(DEFAULT_DISPLAY_LIMIT),
            no_chars: false,
            fallback_threshold: DEFAULT_FALLBACK_THRESHOLD,
            fallback_floor: DEFAULT_FALLBACK_FLOOR,
        }
    }
}

/// The codepoints recovered from one source file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Extraction {
    /// Every codepoint found, sorted ascending.
    pub codepoints: Vec<Codepoint>,
    /// The number of codepoints found by parsing the `cmaps` descriptors alone.
    pub structured: usize,
    /// Whether the hex literal fallback was applied.
    pub used_fallback: bool,
}
impl Extraction {
    pub fn len(&self) -> usize {
        self.codepoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codepoints.is_empty()
    }
}

/// Resolves descriptors into the codepoints they cover.
///
/// A descriptor referencing a known offset array contributes `range_start + offset` for each
/// offset, ignoring its `range_length`. Otherwise it contributes the dense range starting at
/// `range_start`. Descriptors without `range_start` contribute nothing.
pub fn materialize(entries: &[CmapEntry], lists: &UnicodeLists) -> BTreeSet<Codepoint> {
    let mut codepoints = BTreeSet::new();
    for entry in entries {
        let Some(start) = entry.range_start else {
            continue;
        };

        let offsets = entry.unicode_list.as_ref().and_then(|name| lists.get(name));
        if let Some(offsets) = offsets {
            codepoints.extend(offsets.iter().filter_map(|x| start.checked_add(*x)));
        } else if let Some(length) = entry.range_length {
            codepoints.extend(start..start.saturating_add(length));
        }
    }
    codepoints
}

/// Recovers the codepoints encoded in the text of a generated font source.
pub fn extract_codepoints(source: &str, config: &ExtractConfig) -> Extraction {
    let lists = collect_unicode_lists(source);
    let entries: Vec<_> = split_cmap_blocks(source)
        .into_iter()
        .map(parse_cmap_entry)
        .collect();
    debug!("Found {} unicode lists and {} cmap entries", lists.len(), entries.len());

    let mut codepoints = materialize(&entries, &lists);
    let structured = codepoints.len();

    let used_fallback = structured < config.fallback_threshold;
    if used_fallback {
        info!(
            "Only {structured} codepoints found in cmaps, also scanning for hex literals >= 0x{:X}",
            config.fallback_floor,
        );
        let floor = config.fallback_floor;
        codepoints.extend(LiteralScanner::hex().scan(source).filter(|x| *x >= floor));
    }

    Extraction { codepoints: codepoints.into_iter().collect(), structured, used_fallback }
}

/// Decodes UTF-8, dropping invalid byte sequences instead of replacing them.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Reads a source file as text.
pub fn read_source(path: &Path) -> Result<String> {
    ensure!(path.exists(), "File not found: {}", path.display());
    let bytes = fs::read(path).with_context(|| format!("Could not read '{}'", path.display()))?;
    Ok(decode_lossy(&bytes))
}

/// Reads the file named by the configuration and extracts its codepoints.
pub fn extract_file(config: &ExtractConfig) -> Result<Extraction> {
    let source = read_source(&config.path)?;
    Ok(extract_codepoints(&source, config))
}

#[cfg(test)]
mod test {
    use super::*;

    fn entry(start: Option<u32>, length: Option<u32>, list: Option<&str>) -> CmapEntry {
        CmapEntry {
            range_start: start,
            range_length: length,
            unicode_list: list.map(str::to_string),
            ..CmapEntry::default()
        }
    }

    fn config() -> ExtractConfig {
        ExtractConfig::new("test.c")
    }

    #[test]
    fn test_materialize_dense() {
        let codepoints = materialize(&[entry(Some(0x41), Some(3), None)], &UnicodeLists::new());
        assert_eq!(codepoints.into_iter().collect::<Vec<_>>(), vec![0x41, 0x42, 0x43]);
    }

    #[test]
    fn test_materialize_sparse_ignores_length() {
        let mut lists = UnicodeLists::new();
        lists.insert("unicode_list_0".to_string(), vec![0, 5, 10]);
        let entries = [entry(Some(0x1000), Some(500), Some("unicode_list_0"))];
        let codepoints = materialize(&entries, &lists);
        assert_eq!(codepoints.into_iter().collect::<Vec<_>>(), vec![0x1000, 0x1005, 0x100A]);
    }

    #[test]
    fn test_materialize_skips_incomplete_entries() {
        let entries = [
            entry(None, Some(10), None),
            entry(Some(0x100), None, None),
            entry(Some(0x200), None, Some("unicode_list_9")),
            entry(Some(0x300), Some(2), Some("unicode_list_9")),
        ];
        let codepoints = materialize(&entries, &UnicodeLists::new());
        assert_eq!(codepoints.into_iter().collect::<Vec<_>>(), vec![0x300, 0x301]);
    }

    #[test]
    fn test_minimal_file() {
        let source = "\
            static const uint16_t unicode_list_0[] = {0, 1, 2};\n\
            static const lv_font_fmt_txt_cmap_t cmaps[] = {\n\
                {\n\
                    .range_start = 0x4E00, .unicode_list = unicode_list_0\n\
                }\n\
            };\n";
        let extraction = extract_codepoints(source, &config());
        assert_eq!(extraction.codepoints, vec![0x4E00, 0x4E01, 0x4E02]);
        assert_eq!(extraction.structured, 3);
        assert!(extraction.used_fallback);
    }

    #[test]
    fn test_fallback_only_adds() {
        let source = "\
            static const uint8_t glyph_bitmap[] = { 0x7f, 0xff, 0x12 };\n\
            static const lv_font_fmt_txt_cmap_t cmaps[] = {\n\
                { .range_start = 0x41, .range_length = 2 }\n\
            };\n";
        let extraction = extract_codepoints(source, &config());
        assert_eq!(extraction.structured, 2);
        assert!(extraction.used_fallback);
        assert_eq!(extraction.codepoints, vec![0x41, 0x42, 0xFF]);
    }

    #[test]
    fn test_fallback_not_applied_at_threshold() {
        let source = "\
            static const uint32_t magic = 0xDEADBEEF;\n\
            static const uint8_t glyph_bitmap[] = { 0xff, 0x1234 };\n\
            static const lv_font_fmt_txt_cmap_t cmaps[] = {\n\
                { .range_start = 0x4E00, .range_length = 256 }\n\
            };\n";
        let extraction = extract_codepoints(source, &config());
        assert_eq!(extraction.structured, 256);
        assert!(!extraction.used_fallback);
        let expected: Vec<_> = (0x4E00..0x4F00).collect();
        assert_eq!(extraction.codepoints, expected);
    }

    #[test]
    fn test_configurable_fallback() {
        let source = "cmaps[] = { { .range_start = 0x41, .range_length = 1 } }; x = 0x50;";
        let extraction = extract_codepoints(source, &config().fallback_floor(0x42));
        assert_eq!(extraction.codepoints, vec![0x41, 0x50]);

        let extraction = extract_codepoints(source, &config().fallback_threshold(1));
        assert!(!extraction.used_fallback);
        assert_eq!(extraction.codepoints, vec![0x41]);
    }

    #[test]
    fn test_no_structure() {
        let extraction = extract_codepoints("int main() { return 0x10; }", &config());
        assert!(extraction.is_empty());
        assert_eq!(extraction.structured, 0);
        assert!(extraction.used_fallback);
    }

    #[test]
    fn test_decode_lossy() {
        assert_eq!(decode_lossy(b"ab\xFF\xFEcd"), "abcd");
        assert_eq!(decode_lossy("日本".as_bytes()), "日本");
    }

    #[test]
    fn test_missing_file() {
        let err = read_source(Path::new("/definitely/not/here.c")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
