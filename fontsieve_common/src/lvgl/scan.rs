use crate::codepoints::Codepoint;
use regex_lite::Regex;
use std::collections::HashMap;

/// Offset arrays found in a source file, keyed by their name (e.g. `unicode_list_0`).
pub type UnicodeLists = HashMap<String, Vec<Codepoint>>;

/// A purely lexical scanner for integer literals.
pub struct LiteralScanner {
    regex: Regex,
}
impl LiteralScanner {
    /// Matches `0x` followed by hex digits.
    pub fn hex() -> Self {
        LiteralScanner { regex: Regex::new(r"0x[0-9A-Fa-f]+").unwrap() }
    }

    /// Matches hex literals as well as plain decimal literals.
    pub fn numeric() -> Self {
        LiteralScanner { regex: Regex::new(r"0x[0-9A-Fa-f]+|\d+").unwrap() }
    }

    /// Yields the value of every literal in `text`, left to right, duplicates included.
    ///
    /// Literals that do not fit a codepoint are skipped.
    pub fn scan<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Codepoint> + 'a {
        self.regex
            .find_iter(text)
            .filter_map(|m| parse_literal(m.as_str()))
    }
}

/// Parses a `0x` prefixed hex literal or a decimal literal.
pub(crate) fn parse_literal(text: &str) -> Option<Codepoint> {
    match text.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Finds every `unicode_list_<N>[] = { ... };` declaration and parses its contents.
pub fn collect_unicode_lists(source: &str) -> UnicodeLists {
    let array = Regex::new(
        r"(?s)(?:static\s+)?(?:const\s+)?(?:uint16_t|uint32_t|int)\s+(?P<name>unicode_list_\d+)\s*\[\s*\]\s*=\s*\{(?P<body>.*?)\};",
    )
    .unwrap();
    let scanner = LiteralScanner::numeric();

    let mut lists = HashMap::new();
    for captures in array.captures_iter(source) {
        let name = captures["name"].to_string();
        let values = scanner.scan(&captures["body"]).collect();
        lists.insert(name, values);
    }
    lists
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_hex_scan() {
        let scanner = LiteralScanner::hex();
        let values: Vec<_> = scanner
            .scan("a = 0x41, b = 0X42, c = 12, 0xffff; 0x41 0x1F600")
            .collect();
        assert_eq!(values, vec![0x41, 0xFFFF, 0x41, 0x1F600]);
        assert_eq!(scanner.scan("no literals here").count(), 0);
    }

    #[test]
    fn test_hex_scan_skips_overflow() {
        let scanner = LiteralScanner::hex();
        let values: Vec<_> = scanner.scan("0x123456789, 0x80").collect();
        assert_eq!(values, vec![0x80]);
    }

    #[test]
    fn test_numeric_scan() {
        let scanner = LiteralScanner::numeric();
        let values: Vec<_> = scanner.scan("{0, 1, 0x1d, 42}").collect();
        assert_eq!(values, vec![0, 1, 0x1D, 42]);
    }

    #[test]
    fn test_collect_unicode_lists() {
        let source = "\
            static const uint16_t unicode_list_0[] = {\n\
                0x0, 0x1d, 0x2f,\n\
                0x40\n\
            };\n\
            \n\
            static const uint32_t unicode_list_12[] = {0, 5, 10};\n\
            static const uint8_t glyph_bitmap[] = { 0x12, 0x34 };\n\
            int unicode_list_3 [ ] = { };\n";
        let lists = collect_unicode_lists(source);
        assert_eq!(lists.len(), 3);
        assert_eq!(lists["unicode_list_0"], vec![0x0, 0x1D, 0x2F, 0x40]);
        assert_eq!(lists["unicode_list_12"], vec![0, 5, 10]);
        assert!(lists["unicode_list_3"].is_empty());
    }

    #[test]
    fn test_collect_requires_integer_type() {
        let lists = collect_unicode_lists("static const char unicode_list_0[] = {1, 2};");
        assert!(lists.is_empty());
    }
}
