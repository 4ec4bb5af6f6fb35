pub mod tile;
pub mod encoder;
pub mod glyph_set;
pub mod builtin;

pub use tile::{GlyphDefinition, Tile};
pub use encoder::{encode, EncodedVector};
pub use glyph_set::GlyphSet;
