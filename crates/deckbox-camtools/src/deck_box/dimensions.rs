//! Box-level dimensions derived from the card and material parameters.

use super::types::BoxParameters;
use crate::error::DeckBoxResult;

/// Outer width: `num` compartments of `deckheight`, each followed by one
/// sheet of material, plus the closing wall.
pub fn box_width(num: u32, deckheight: f64, thickness: f64) -> f64 {
    f64::from(num) * (deckheight + thickness) + thickness
}

/// Outer depth: card width between two side walls.
pub fn box_depth(cardwidth: f64, thickness: f64) -> f64 {
    cardwidth + 2.0 * thickness
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedDimensions {
    pub boxwidth: f64,
    pub boxdepth: f64,
    pub height: f64,
}

impl DerivedDimensions {
    /// Validate `params` and derive the box dimensions from them.
    pub fn derive(params: &BoxParameters) -> DeckBoxResult<Self> {
        params.validate()?;

        Ok(Self {
            boxwidth: box_width(params.num, params.deckheight, params.thickness),
            boxdepth: box_depth(params.cardwidth, params.thickness),
            height: params.cardheight,
        })
    }
}
