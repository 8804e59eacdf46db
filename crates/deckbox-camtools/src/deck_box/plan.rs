//! Ordered emission plan for every panel of the box.
//!
//! The plan is plain data: which custom edges to register, then a list of
//! single panels and panel groups. Groups share a layout origin; each group
//! is followed by an undrawn placeholder that moves the cursor past it.

use super::dimensions::DerivedDimensions;
use super::edges::{EdgeCode, EdgeProfile, FingerHoleEdge, InsetEdge, FINGER_HOLE_EDGE, INSET_EDGE};
use super::types::BoxParameters;
use crate::error::DeckBoxResult;

/// How the layout cursor moves once a panel has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceMode {
    /// Draw, then move right by the panel width.
    Right,
    /// Draw, then move up by the panel height.
    Up,
    /// Move up by the panel height without drawing.
    UpOnly,
    /// Draw in place.
    Stay,
}

impl AdvanceMode {
    pub fn draws(self) -> bool {
        !matches!(self, AdvanceMode::UpOnly)
    }
}

/// Hole pattern cut into a panel while it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCallback {
    DividerBottom,
    DividerBackAndFront,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub width: f64,
    pub height: f64,
    pub edges: EdgeCode,
    pub callback: Option<PanelCallback>,
    pub advance: AdvanceMode,
    pub label: Option<&'static str>,
}

impl PanelSpec {
    fn new(width: f64, height: f64, edges: &str, advance: AdvanceMode) -> DeckBoxResult<Self> {
        Ok(Self {
            width,
            height,
            edges: edges.parse()?,
            callback: None,
            advance,
            label: None,
        })
    }

    fn labeled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    fn with_callback(mut self, callback: PanelCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Label for diagnostics; placeholders have none.
    pub fn name(&self) -> &str {
        self.label.unwrap_or("(placeholder)")
    }
}

/// Custom edge bound to a symbol before any panel is emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CustomEdge {
    Inset { thickness: f64 },
    FingerHole { wall_height: f64 },
}

impl CustomEdge {
    pub fn symbol(&self) -> char {
        match self {
            CustomEdge::Inset { .. } => INSET_EDGE,
            CustomEdge::FingerHole { .. } => FINGER_HOLE_EDGE,
        }
    }

    pub fn profile(&self) -> Box<dyn EdgeProfile> {
        match *self {
            CustomEdge::Inset { thickness } => Box::new(InsetEdge::new(thickness)),
            CustomEdge::FingerHole { wall_height } => Box::new(FingerHoleEdge::new(wall_height)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanStep {
    Panel(PanelSpec),
    /// Siblings laid out from one saved cursor position.
    Group(Vec<PanelSpec>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelPlan {
    pub custom_edges: Vec<CustomEdge>,
    pub steps: Vec<PlanStep>,
}

impl PanelPlan {
    pub fn build(params: &BoxParameters, dims: &DerivedDimensions) -> DeckBoxResult<Self> {
        use AdvanceMode::{Right, Up, UpOnly};

        let t = params.thickness;
        let c = params.deckheight;
        let x = dims.boxwidth;
        let y = dims.boxdepth;
        let h = dims.height;
        // Sliding clearance for the lid and its lip.
        let lid_depth = y - t * 0.2;

        let custom_edges = vec![
            CustomEdge::Inset { thickness: t },
            CustomEdge::FingerHole { wall_height: h },
        ];

        let mut steps = vec![
            PlanStep::Group(vec![
                PanelSpec::new(x, lid_depth, "eFee", Right)?.labeled("Lid"),
                PanelSpec::new(x, y, "ffff", Right)?
                    .with_callback(PanelCallback::DividerBottom)
                    .labeled("Bottom"),
            ]),
            PlanStep::Panel(PanelSpec::new(x, y, "eEEE", UpOnly)?),
            PlanStep::Panel(PanelSpec::new(x, t, "feee", Up)?.labeled("Lip Front")),
            PlanStep::Panel(PanelSpec::new(x, t, "eefe", Up)?.labeled("Lip Back")),
            PlanStep::Group(vec![
                PanelSpec::new(x, h + t, "FfFf", Right)?
                    .with_callback(PanelCallback::DividerBackAndFront)
                    .labeled("Back"),
                PanelSpec::new(x, h + t, "FfFf", Right)?
                    .with_callback(PanelCallback::DividerBackAndFront)
                    .labeled("Front"),
            ]),
            PlanStep::Panel(PanelSpec::new(x, h + t, "EEEE", UpOnly)?),
            // Only the right side carries the rail lock on its top edge.
            PlanStep::Group(vec![
                PanelSpec::new(y, h + t, "FFEF", Right)?.labeled("Outer Side Left"),
                PanelSpec::new(y, h + t, "FFaF", Right)?.labeled("Outer Side Right"),
            ]),
            PlanStep::Panel(PanelSpec::new(y, h + t, "fFfF", UpOnly)?),
            PlanStep::Group(vec![
                PanelSpec::new(y, h, "Aeee", Right)?.labeled("Inner Side Left"),
                PanelSpec::new(y, h, "Aeee", Right)?.labeled("Inner Side Right"),
            ]),
            PlanStep::Panel(PanelSpec::new(y, h, "eAee", UpOnly)?),
            PlanStep::Group(vec![
                PanelSpec::new(lid_depth, t, "fEeE", Right)?.labeled("Lid Lip")
            ]),
            PlanStep::Panel(PanelSpec::new(y, t * 2.0, "efee", UpOnly)?),
        ];

        for _ in 1..params.num {
            steps.push(PlanStep::Panel(
                PanelSpec::new(h, y, "faff", Right)?.labeled("Divider"),
            ));
        }

        for _ in 0..params.num {
            steps.push(PlanStep::Panel(
                PanelSpec::new(c, h, "eeee", Right)?.labeled("Front inlay"),
            ));
            steps.push(PlanStep::Panel(
                PanelSpec::new(c, h, "eeee", Right)?.labeled("Back inlay"),
            ));
        }

        steps.push(PlanStep::Panel(
            PanelSpec::new(x, y - 2.0 * t, "eeee", Right)?.labeled("Lid topper"),
        ));

        Ok(Self {
            custom_edges,
            steps,
        })
    }

    /// Every panel in emission order, placeholders included.
    pub fn panels(&self) -> impl Iterator<Item = &PanelSpec> {
        self.steps.iter().flat_map(|step| match step {
            PlanStep::Panel(panel) => std::slice::from_ref(panel),
            PlanStep::Group(panels) => panels.as_slice(),
        })
    }

    pub fn drawn_panels(&self) -> impl Iterator<Item = &PanelSpec> {
        self.panels().filter(|panel| panel.advance.draws())
    }

    pub fn drawn_panel_count(&self) -> usize {
        self.drawn_panels().count()
    }
}
