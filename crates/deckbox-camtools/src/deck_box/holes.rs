//! Finger-hole rows keying the dividers into the floor and the walls.

use super::dimensions::DerivedDimensions;
use super::plan::PanelCallback;
use super::types::BoxParameters;

/// A row of finger holes in panel-local coordinates: starts at `(x, y)`, runs
/// `length` in direction `angle` (degrees, counter-clockwise from `+x`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolePosition {
    pub x: f64,
    pub y: f64,
    pub length: f64,
    pub angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerHolePlacer {
    thickness: f64,
    deckheight: f64,
    num: u32,
    boxdepth: f64,
    cardheight: f64,
}

impl DividerHolePlacer {
    pub fn new(params: &BoxParameters, dims: &DerivedDimensions) -> Self {
        Self {
            thickness: params.thickness,
            deckheight: params.deckheight,
            num: params.num,
            boxdepth: dims.boxdepth,
            cardheight: params.cardheight,
        }
    }

    /// Centre line of every internal divider, measured from the panel edge.
    pub fn offsets(&self) -> impl Iterator<Item = f64> + '_ {
        let t = self.thickness;
        let pitch = self.deckheight + t;
        (1..self.num).map(move |i| 0.5 * t + pitch * f64::from(i))
    }

    /// Holes across the full depth of the floor.
    pub fn divider_bottom(&self) -> Vec<HolePosition> {
        self.holes(self.boxdepth)
    }

    /// Holes up the wall height of the front and back panels.
    pub fn divider_back_and_front(&self) -> Vec<HolePosition> {
        self.holes(self.cardheight)
    }

    pub fn holes_for(&self, callback: PanelCallback) -> Vec<HolePosition> {
        match callback {
            PanelCallback::DividerBottom => self.divider_bottom(),
            PanelCallback::DividerBackAndFront => self.divider_back_and_front(),
        }
    }

    fn holes(&self, length: f64) -> Vec<HolePosition> {
        self.offsets()
            .map(|x| HolePosition {
                x,
                y: 0.0,
                length,
                angle: 90.0,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placer(num: u32) -> DividerHolePlacer {
        let params = BoxParameters {
            num,
            ..Default::default()
        };
        let dims = DerivedDimensions::derive(&params).unwrap();
        DividerHolePlacer::new(&params, &dims)
    }

    #[test]
    fn test_default_offsets() {
        let offsets: Vec<f64> = placer(3).offsets().collect();
        assert_eq!(offsets, vec![69.5, 137.5]);
    }

    #[test]
    fn test_hole_lengths() {
        let p = placer(3);
        assert!(p.divider_bottom().iter().all(|h| h.length == 74.0));
        assert!(p.divider_back_and_front().iter().all(|h| h.length == 92.0));
        assert!(p
            .divider_bottom()
            .iter()
            .all(|h| h.angle == 90.0 && h.y == 0.0));
    }

    #[test]
    fn test_single_compartment_has_no_holes() {
        let p = placer(1);
        assert!(p.divider_bottom().is_empty());
        assert!(p.divider_back_and_front().is_empty());
    }

    #[test]
    fn test_holes_for_callback() {
        let p = placer(4);
        assert_eq!(p.holes_for(PanelCallback::DividerBottom), p.divider_bottom());
        assert_eq!(
            p.holes_for(PanelCallback::DividerBackAndFront),
            p.divider_back_and_front()
        );
    }
}
