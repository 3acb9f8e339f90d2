//! Minimal fonts for tests.

use write_fonts::{tables::cmap::Cmap, types::GlyphId, FontBuilder};

/// Builds a font containing only a character map for the given characters.
pub fn build_font(chars: impl IntoIterator<Item = char>) -> Vec<u8> {
    let mappings = chars
        .into_iter()
        .enumerate()
        .map(|(i, ch)| (ch, GlyphId::new(i as u32 + 1)));
    let mut builder = FontBuilder::new();
    builder.add_table(&Cmap::from_mappings(mappings).unwrap()).unwrap();
    builder.build()
}
