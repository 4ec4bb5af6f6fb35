use crate::glyph::tile::Tile;

/// One value per tile, 1.0 for active and 0.0 for inactive, in tile order.
pub type EncodedVector = Vec<f64>;

/// Maps a tile sequence to the classifier's input vector.
pub fn encode(tiles: &[Tile]) -> EncodedVector {
    tiles.iter().map(|t| if t.is_active { 1.0 } else { 0.0 }).collect()
}
