//! Reference glyphs shipped with the crate: capital A, B and C on a 5×7 grid.

use crate::error::GlyphError;
use crate::glyph::tile::GlyphDefinition;

const LETTER_A: &str = include_str!("../../glyphs/letter_a.json");
const LETTER_B: &str = include_str!("../../glyphs/letter_b.json");
const LETTER_C: &str = include_str!("../../glyphs/letter_c.json");

/// Names of the built-in glyphs, in class order.
pub const NAMES: [&str; 3] = ["letter_a", "letter_b", "letter_c"];

pub fn builtin(name: &str) -> Result<GlyphDefinition, GlyphError> {
    let json = match name {
        "letter_a" => LETTER_A,
        "letter_b" => LETTER_B,
        "letter_c" => LETTER_C,
        other => return Err(GlyphError::Unknown(other.to_owned())),
    };
    GlyphDefinition::from_json(json)
}
