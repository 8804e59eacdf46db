//! Type definitions for the Deck Box generator

use serde::{Deserialize, Serialize};

use crate::error::{DeckBoxError, DeckBoxResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerJointSettings {
    /// Width of fingers in multiples of thickness
    pub finger: f64,
    /// Space between fingers in multiples of thickness
    pub space: f64,
    /// Space at start and end in multiples of normal spaces
    pub surrounding_spaces: f64,
    /// Extra space to allow fingers to move in/out (multiples of thickness)
    pub play: f64,
    /// Extra material for burn marks (multiples of thickness)
    pub extra_length: f64,
}

impl Default for FingerJointSettings {
    fn default() -> Self {
        Self {
            finger: 2.0,
            space: 2.0,
            surrounding_spaces: 2.0,
            play: 0.0,
            extra_length: 0.0,
        }
    }
}

/// Physical inputs of a deck box.
///
/// `deckheight` is the thickness of one stack of cards (the width of one
/// compartment), `cardwidth`/`cardheight` the card face dimensions and `num`
/// the number of compartments. All lengths are millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxParameters {
    pub deckheight: f64,
    pub cardwidth: f64,
    pub cardheight: f64,
    pub num: u32,
    pub thickness: f64,
    pub finger_joint: FingerJointSettings,
    /// Kerf compensation (tool/beam diameter)
    pub burn: f64,
    /// Gap left between panels on the sheet
    pub spacing: f64,
}

impl Default for BoxParameters {
    fn default() -> Self {
        Self {
            deckheight: 65.0,
            cardwidth: 68.0,
            cardheight: 92.0,
            num: 3,
            thickness: 3.0,
            finger_joint: FingerJointSettings::default(),
            burn: 0.1,
            spacing: 5.0,
        }
    }
}

impl BoxParameters {
    pub fn validate(&self) -> DeckBoxResult<()> {
        for (name, value) in [
            ("thickness", self.thickness),
            ("deckheight", self.deckheight),
            ("cardwidth", self.cardwidth),
            ("cardheight", self.cardheight),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DeckBoxError::invalid_parameter(
                    name,
                    value,
                    "must be a positive length",
                ));
            }
        }

        if self.num < 1 {
            return Err(DeckBoxError::invalid_parameter(
                "num",
                f64::from(self.num),
                "at least one compartment is required",
            ));
        }

        let fj = &self.finger_joint;
        if !fj.finger.is_finite() || fj.finger <= 0.0 {
            return Err(DeckBoxError::invalid_parameter(
                "finger",
                fj.finger,
                "finger width must be positive",
            ));
        }
        if !fj.space.is_finite() || fj.space <= 0.0 {
            return Err(DeckBoxError::invalid_parameter(
                "space",
                fj.space,
                "finger spacing must be positive",
            ));
        }
        for (name, value) in [
            ("surrounding_spaces", fj.surrounding_spaces),
            ("play", fj.play),
            ("extra_length", fj.extra_length),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DeckBoxError::invalid_parameter(
                    name,
                    value,
                    "must not be negative",
                ));
            }
        }

        if !self.burn.is_finite() || self.burn < 0.0 || self.burn >= self.thickness {
            return Err(DeckBoxError::invalid_parameter(
                "burn",
                self.burn,
                "kerf must be between 0 and the material thickness",
            ));
        }

        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(DeckBoxError::invalid_parameter(
                "spacing",
                self.spacing,
                "must not be negative",
            ));
        }

        Ok(())
    }
}

/// Settings for the laser G-code backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeSettings {
    pub laser_passes: u32,
    pub z_step_down: f64,
    pub laser_power: u32,
    pub feed_rate: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for GcodeSettings {
    fn default() -> Self {
        Self {
            laser_passes: 3,
            z_step_down: 0.5,
            laser_power: 1000,
            feed_rate: 500.0,
            offset_x: 10.0,
            offset_y: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub fn push_unique_point(path: &mut Vec<Point>, point: Point) {
    if let Some(last) = path.last() {
        if (point.x - last.x).abs() < 0.001 && (point.y - last.y).abs() < 0.001 {
            return;
        }
    }
    path.push(point);
}

/// Axis-aligned bounds of a point set as `(min_x, min_y, max_x, max_y)`.
pub fn bounds<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<(f64, f64, f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in points {
        if !p.x.is_finite() || !p.y.is_finite() {
            continue;
        }
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    if min_x.is_finite() {
        Some((min_x, min_y, max_x, max_y))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(BoxParameters::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_compartments() {
        let params = BoxParameters {
            num: 0,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("'num'"));
    }

    #[test]
    fn test_rejects_negative_thickness() {
        let params = BoxParameters {
            thickness: -3.0,
            ..Default::default()
        };
        match params.validate() {
            Err(DeckBoxError::InvalidParameter { name, value, .. }) => {
                assert_eq!(name, "thickness");
                assert_eq!(value, -3.0);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_nan_cardwidth() {
        let params = BoxParameters {
            cardwidth: f64::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_kerf_wider_than_material() {
        let params = BoxParameters {
            burn: 3.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_push_unique_point_skips_duplicates() {
        let mut path = Vec::new();
        push_unique_point(&mut path, Point::new(1.0, 1.0));
        push_unique_point(&mut path, Point::new(1.0, 1.0));
        push_unique_point(&mut path, Point::new(2.0, 1.0));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_bounds() {
        let pts = [Point::new(1.0, -2.0), Point::new(-4.0, 3.0)];
        assert_eq!(bounds(&pts), Some((-4.0, -2.0, 1.0, 3.0)));
        assert_eq!(bounds(&Vec::<Point>::new()), None);
    }
}
