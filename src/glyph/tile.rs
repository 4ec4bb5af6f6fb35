use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GlyphError;
use crate::glyph::encoder::{encode, EncodedVector};

/// One grid cell. `id` is its stable identity; only `is_active` ever changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub id: u32,
    pub is_active: bool,
}

impl Tile {
    pub fn new(id: u32, is_active: bool) -> Tile {
        Tile { id, is_active }
    }
}

/// A glyph drawn on a grid `width` tiles wide, tiles listed row by row.
///
/// Wire format (JSON):
/// ```json
/// { "width": 5, "tiles": [ { "id": 0, "isActive": false }, ... ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphDefinition {
    pub width: usize,
    pub tiles: Vec<Tile>,
}

impl GlyphDefinition {
    /// Parses and validates a definition.
    pub fn from_json(json: &str) -> Result<GlyphDefinition, GlyphError> {
        let glyph: GlyphDefinition = serde_json::from_str(json)?;
        glyph.validate()?;
        Ok(glyph)
    }

    pub fn load_json(path: &Path) -> Result<GlyphDefinition, GlyphError> {
        let json = std::fs::read_to_string(path).map_err(|source| GlyphError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        GlyphDefinition::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Width must be positive, and there must be at least one tile with no
    /// id repeated.
    pub fn validate(&self) -> Result<(), GlyphError> {
        if self.width == 0 {
            return Err(GlyphError::ZeroWidth);
        }
        if self.tiles.is_empty() {
            return Err(GlyphError::Empty);
        }
        let mut seen = HashSet::with_capacity(self.tiles.len());
        for tile in &self.tiles {
            if !seen.insert(tile.id) {
                return Err(GlyphError::DuplicateTile(tile.id));
            }
        }
        Ok(())
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Number of rows, counting a trailing partial row.
    pub fn height(&self) -> usize {
        self.tiles.len().div_ceil(self.width.max(1))
    }

    pub fn encode(&self) -> EncodedVector {
        encode(&self.tiles)
    }

    /// Flips the tile with `id` and returns its new state. Unknown ids leave
    /// the glyph untouched.
    pub fn toggle(&mut self, id: u32) -> Result<bool, GlyphError> {
        let tile = self
            .tiles
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(GlyphError::UnknownTile(id))?;
        tile.is_active = !tile.is_active;
        Ok(tile.is_active)
    }

    /// Rows of `#` (active) and `.` (inactive), for logs and debugging.
    pub fn render_ascii(&self) -> String {
        self.tiles
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|t| if t.is_active { '#' } else { '.' }).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
