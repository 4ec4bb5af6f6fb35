use serde::{Deserialize, Serialize};

use crate::glyph::glyph_set::GlyphSet;
use crate::synth::example::Exemplar;

/// Which flavour of the panel a session runs.
///
/// - `ThreeClass` : one output per reference glyph, tiered feedback.
/// - `Binary`     : a single detector for the first reference glyph,
///                  thresholded match/no-match feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    ThreeClass,
    Binary,
}

impl Variant {
    pub fn output_width(&self, glyphs: &GlyphSet) -> usize {
        match self {
            Variant::ThreeClass => glyphs.len(),
            Variant::Binary => 1,
        }
    }

    pub fn exemplars(&self, glyphs: &GlyphSet) -> Vec<Exemplar> {
        let mut exemplars = glyphs.exemplars();
        if *self == Variant::Binary {
            exemplars.truncate(1);
        }
        exemplars
    }

    /// Glyph whose tiles the panel starts from: the second glyph for the
    /// multi-class panel (the first when there is only one), the detected
    /// glyph for the binary panel.
    pub fn initial_glyph(&self, glyphs: &GlyphSet) -> usize {
        match self {
            Variant::ThreeClass => 1.min(glyphs.len().saturating_sub(1)),
            Variant::Binary => 0,
        }
    }

    /// Display label per output.
    pub fn labels(&self, glyphs: &GlyphSet) -> Vec<String> {
        let mut names = glyphs.names();
        if *self == Variant::Binary {
            names.truncate(1);
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_class_uses_every_glyph() {
        let glyphs = GlyphSet::builtin().unwrap();
        let v = Variant::ThreeClass;
        assert_eq!(v.output_width(&glyphs), 3);
        assert_eq!(v.exemplars(&glyphs).len(), 3);
        assert_eq!(v.initial_glyph(&glyphs), 1);
        assert_eq!(v.labels(&glyphs), vec!["letter_a", "letter_b", "letter_c"]);
    }

    #[test]
    fn binary_detects_first_glyph_only() {
        let glyphs = GlyphSet::builtin().unwrap();
        let v = Variant::Binary;
        assert_eq!(v.output_width(&glyphs), 1);
        let exemplars = v.exemplars(&glyphs);
        assert_eq!(exemplars.len(), 1);
        assert_eq!(exemplars[0].class_index, 0);
        assert_eq!(v.initial_glyph(&glyphs), 0);
    }
}
