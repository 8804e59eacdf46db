//! Edge codes, the edge registry and the two custom edge profiles.
//!
//! A panel outline is walked counter-clockwise starting at its bottom-left
//! corner, so the panel interior is always on the left of travel. Every side
//! is drawn in its own frame: `+x` runs along the edge, `+y` points into the
//! panel. Custom profiles describe themselves as turtle steps in that frame.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::types::{push_unique_point, Point};
use crate::error::{DeckBoxError, DeckBoxResult};

/// Symbol of the rail inset edge.
pub const INSET_EDGE: char = 'a';
/// Symbol of the finger access edge.
pub const FINGER_HOLE_EDGE: char = 'A';

/// Radius of the rounded reversal at the bottom of a finger notch. The notch
/// is twice as wide.
const FINGER_HOLE_RADIUS: f64 = 10.0;
/// Degrees of arc covered by one sampled segment when tracing.
const ARC_STEP_DEGREES: f64 = 15.0;

/// One primitive of an edge path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathStep {
    /// Turn in place; positive is counter-clockwise.
    Turn(f64),
    /// Straight segment. `tabbed` marks it as part of the finger-joint
    /// interlock pattern.
    Edge { length: f64, tabbed: bool },
    /// Turn while travelling along a circular arc.
    Arc { degrees: f64, radius: f64 },
}

/// A drawable replacement for a straight panel side.
pub trait EdgeProfile: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Path covering a side of `length`, starting at the side's first corner
    /// and ending at its second corner with the original heading.
    fn steps(&self, length: f64) -> DeckBoxResult<Vec<PathStep>>;
}

/// Rail notch: the side is recessed by one material thickness so a sliding
/// lid can run along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsetEdge {
    pub thickness: f64,
}

impl InsetEdge {
    pub fn new(thickness: f64) -> Self {
        Self { thickness }
    }
}

impl EdgeProfile for InsetEdge {
    fn name(&self) -> &'static str {
        "inset"
    }

    fn steps(&self, length: f64) -> DeckBoxResult<Vec<PathStep>> {
        if length <= 0.0 {
            return Err(DeckBoxError::underflow(self.name(), length, 0.0));
        }
        let t = self.thickness;

        Ok(vec![
            PathStep::Turn(90.0),
            PathStep::Edge { length: t, tabbed: true },
            PathStep::Turn(-90.0),
            PathStep::Edge { length, tabbed: true },
            PathStep::Turn(-90.0),
            PathStep::Edge { length: t, tabbed: true },
            PathStep::Turn(90.0),
        ])
    }
}

/// Centred U-shaped notch, `wall_height / 5` deep, to grip a card stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerHoleEdge {
    pub wall_height: f64,
}

impl FingerHoleEdge {
    pub fn new(wall_height: f64) -> Self {
        Self { wall_height }
    }

    pub fn depth(&self) -> f64 {
        self.wall_height / 5.0
    }

    pub fn min_length() -> f64 {
        2.0 * FINGER_HOLE_RADIUS
    }
}

impl EdgeProfile for FingerHoleEdge {
    fn name(&self) -> &'static str {
        "finger hole"
    }

    fn steps(&self, length: f64) -> DeckBoxResult<Vec<PathStep>> {
        if length <= Self::min_length() {
            return Err(DeckBoxError::underflow(
                self.name(),
                length,
                Self::min_length(),
            ));
        }
        let side = length / 2.0 - FINGER_HOLE_RADIUS;
        let depth = self.depth();

        Ok(vec![
            PathStep::Edge { length: side, tabbed: true },
            PathStep::Turn(90.0),
            PathStep::Edge { length: depth, tabbed: true },
            PathStep::Arc {
                degrees: -180.0,
                radius: FINGER_HOLE_RADIUS,
            },
            PathStep::Edge { length: depth, tabbed: true },
            PathStep::Turn(90.0),
            PathStep::Edge { length: side, tabbed: true },
        ])
    }
}

/// Sum of all turns in degrees. Zero for every well-formed edge profile.
pub fn net_turning(steps: &[PathStep]) -> f64 {
    steps
        .iter()
        .map(|step| match step {
            PathStep::Turn(deg) => *deg,
            PathStep::Arc { degrees, .. } => *degrees,
            PathStep::Edge { .. } => 0.0,
        })
        .sum()
}

/// Trace `steps` from the origin heading along `+x`.
pub fn trace_steps(steps: &[PathStep]) -> Vec<Point> {
    let mut path = vec![Point::new(0.0, 0.0)];
    let mut pos = Point::new(0.0, 0.0);
    let mut heading: f64 = 0.0;

    for step in steps {
        match *step {
            PathStep::Turn(deg) => heading += deg,
            PathStep::Edge { length, .. } => {
                let rad = heading.to_radians();
                pos = Point::new(pos.x + length * rad.cos(), pos.y + length * rad.sin());
                push_unique_point(&mut path, pos);
            }
            PathStep::Arc { degrees, radius } => {
                let sign = degrees.signum();
                let rad = heading.to_radians();
                // Centre sits on the inside of the turn.
                let center = Point::new(
                    pos.x - sign * radius * rad.sin(),
                    pos.y + sign * radius * rad.cos(),
                );
                let start = heading - sign * 90.0;
                let segments = (degrees.abs() / ARC_STEP_DEGREES).ceil().max(1.0) as usize;

                for i in 1..=segments {
                    let phi = (start + degrees * i as f64 / segments as f64).to_radians();
                    pos = Point::new(
                        center.x + radius * phi.cos(),
                        center.y + radius * phi.sin(),
                    );
                    push_unique_point(&mut path, pos);
                }
                heading += degrees;
            }
        }
    }

    path
}

/// Side of a rectangular panel, in outline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Bottom,
    Right,
    Top,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Bottom, Side::Right, Side::Top, Side::Left];

    /// Length of this side on a `width` x `height` panel.
    pub fn length(self, width: f64, height: f64) -> f64 {
        match self {
            Side::Bottom | Side::Top => width,
            Side::Right | Side::Left => height,
        }
    }
}

/// Four edge symbols, one per side: bottom, right, top, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeCode([char; 4]);

impl EdgeCode {
    pub const fn new(symbols: [char; 4]) -> Self {
        Self(symbols)
    }

    pub fn symbol(&self, side: Side) -> char {
        self.0[side as usize]
    }

    pub fn symbols(&self) -> [char; 4] {
        self.0
    }

    pub fn sides(&self) -> impl Iterator<Item = (Side, char)> + '_ {
        Side::ALL.into_iter().zip(self.0)
    }
}

impl FromStr for EdgeCode {
    type Err = DeckBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let symbols: [char; 4] = chars
            .try_into()
            .map_err(|_| DeckBoxError::InvalidEdgeCode(s.to_string()))?;
        Ok(Self(symbols))
    }
}

impl fmt::Display for EdgeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0 {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// What a registered symbol draws.
#[derive(Debug)]
pub enum EdgeBehavior {
    /// `e`: straight edge
    Plain,
    /// `E`: straight edge pushed out by one material thickness
    Outset,
    /// `f`: fingers protrude
    FingerJoint,
    /// `F`: notches receive the mating fingers
    FingerJointCounterpart,
    Custom(Box<dyn EdgeProfile>),
}

/// Symbol table resolving edge-code characters to behaviours.
#[derive(Debug)]
pub struct EdgeRegistry {
    edges: HashMap<char, EdgeBehavior>,
}

impl Default for EdgeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeRegistry {
    /// Registry holding the built-in `e`, `E`, `f` and `F` edges.
    pub fn new() -> Self {
        let mut edges = HashMap::new();
        edges.insert('e', EdgeBehavior::Plain);
        edges.insert('E', EdgeBehavior::Outset);
        edges.insert('f', EdgeBehavior::FingerJoint);
        edges.insert('F', EdgeBehavior::FingerJointCounterpart);
        Self { edges }
    }

    pub fn register(&mut self, symbol: char, profile: Box<dyn EdgeProfile>) -> DeckBoxResult<()> {
        if self.edges.contains_key(&symbol) {
            return Err(DeckBoxError::DuplicateEdgeSymbol(symbol));
        }
        self.edges.insert(symbol, EdgeBehavior::Custom(profile));
        Ok(())
    }

    pub fn resolve(&self, symbol: char, panel: &str) -> DeckBoxResult<&EdgeBehavior> {
        self.edges
            .get(&symbol)
            .ok_or_else(|| DeckBoxError::UnregisteredEdgeSymbol {
                symbol,
                panel: panel.to_string(),
            })
    }

    /// Resolve every symbol of `code` without tracing any profile.
    pub fn check_symbols(&self, code: &EdgeCode, panel: &str) -> DeckBoxResult<()> {
        for symbol in code.symbols() {
            self.resolve(symbol, panel)?;
        }
        Ok(())
    }

    /// Resolve every side of a `width` x `height` panel and check that custom
    /// profiles fit their side.
    pub fn check(
        &self,
        code: &EdgeCode,
        width: f64,
        height: f64,
        panel: &str,
    ) -> DeckBoxResult<()> {
        for (side, symbol) in code.sides() {
            if let EdgeBehavior::Custom(profile) = self.resolve(symbol, panel)? {
                profile.steps(side.length(width, height))?;
            }
        }
        Ok(())
    }
}
