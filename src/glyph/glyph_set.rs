use std::path::Path;

use crate::error::GlyphError;
use crate::glyph::builtin;
use crate::glyph::tile::GlyphDefinition;
use crate::synth::example::Exemplar;

/// Named reference glyphs in class order. Every glyph has the same tile count,
/// which is the classifier's input width.
#[derive(Debug, Clone)]
pub struct GlyphSet {
    entries: Vec<(String, GlyphDefinition)>,
}

impl GlyphSet {
    pub fn new(entries: Vec<(String, GlyphDefinition)>) -> Result<GlyphSet, GlyphError> {
        let expected = entries.first().ok_or(GlyphError::NoGlyphs)?.1.tile_count();
        for (name, glyph) in &entries {
            glyph.validate()?;
            if glyph.tile_count() != expected {
                return Err(GlyphError::TileCountMismatch {
                    name: name.clone(),
                    expected,
                    actual: glyph.tile_count(),
                });
            }
        }
        Ok(GlyphSet { entries })
    }

    /// Letters A, B and C.
    pub fn builtin() -> Result<GlyphSet, GlyphError> {
        let entries = builtin::NAMES
            .iter()
            .map(|&name| -> Result<_, GlyphError> {
                Ok((name.to_owned(), builtin::builtin(name)?))
            })
            .collect::<Result<Vec<_>, GlyphError>>()?;
        GlyphSet::new(entries)
    }

    /// Loads `<dir>/<name>.json` for every name, in the given order.
    pub fn load_dir(dir: &Path, names: &[String]) -> Result<GlyphSet, GlyphError> {
        let entries = names
            .iter()
            .map(|name| -> Result<_, GlyphError> {
                let glyph = GlyphDefinition::load_json(&dir.join(format!("{name}.json")))?;
                Ok((name.clone(), glyph))
            })
            .collect::<Result<Vec<_>, GlyphError>>()?;
        GlyphSet::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn vector_length(&self) -> usize {
        self.entries.first().map(|(_, g)| g.tile_count()).unwrap_or(0)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn get(&self, index: usize) -> Option<&GlyphDefinition> {
        self.entries.get(index).map(|(_, g)| g)
    }

    /// One exemplar per glyph, class index = position in the set.
    pub fn exemplars(&self) -> Vec<Exemplar> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (_, g))| Exemplar::new(g.encode(), i))
            .collect()
    }
}
