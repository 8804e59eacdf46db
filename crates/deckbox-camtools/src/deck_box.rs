//! Deck Box Maker
//!
//! Sliding-lid box for stacks of trading cards, adapted from the DeckBox
//! generator of https://github.com/florianfesti/boxes. The box holds `num`
//! compartments side by side, separated by dividers keyed into the floor and
//! the front/back walls. The lid slides in a rail formed by the outer walls,
//! the lips and an inset on one outer side.

pub mod dimensions;
pub mod edges;
pub mod holes;
pub mod plan;
pub mod sequencer;
pub mod types;

pub use dimensions::DerivedDimensions;
pub use edges::{EdgeCode, EdgeProfile, EdgeRegistry, FingerHoleEdge, InsetEdge, PathStep};
pub use holes::{DividerHolePlacer, HolePosition};
pub use plan::{AdvanceMode, PanelCallback, PanelPlan, PanelSpec, PlanStep};
pub use sequencer::PanelSequencer;
pub use types::{BoxParameters, FingerJointSettings, GcodeSettings, Point};

use tracing::info;

use crate::error::DeckBoxResult;
use crate::export;
use crate::panel_renderer::{PanelRenderer, RenderedPanel};

pub struct DeckBoxMaker {
    params: BoxParameters,
    dims: DerivedDimensions,
    plan: PanelPlan,
    panels: Vec<RenderedPanel>,
}

impl DeckBoxMaker {
    /// Validate the parameters and prepare the panel plan.
    pub fn new(params: BoxParameters) -> DeckBoxResult<Self> {
        let dims = DerivedDimensions::derive(&params)?;
        let plan = PanelPlan::build(&params, &dims)?;

        Ok(Self {
            params,
            dims,
            plan,
            panels: Vec::new(),
        })
    }

    pub fn params(&self) -> &BoxParameters {
        &self.params
    }

    pub fn dimensions(&self) -> &DerivedDimensions {
        &self.dims
    }

    pub fn plan(&self) -> &PanelPlan {
        &self.plan
    }

    pub fn panels(&self) -> &[RenderedPanel] {
        &self.panels
    }

    /// Lay out every panel. On error no panels are kept.
    pub fn generate(&mut self) -> DeckBoxResult<()> {
        self.panels.clear();

        info!(
            "Generating deck box {:.1}x{:.1}x{:.1} mm with {} compartments",
            self.dims.boxwidth, self.dims.boxdepth, self.dims.height, self.params.num
        );

        let sequencer = PanelSequencer::new(&self.params, &self.dims);
        let mut renderer = PanelRenderer::new(&self.params);
        sequencer.run(&self.plan, &mut renderer)?;

        self.panels = renderer.into_panels();
        Ok(())
    }

    pub fn to_svg(&self) -> String {
        export::to_svg(&self.panels)
    }

    pub fn to_gcode(&self, settings: &GcodeSettings) -> String {
        export::to_gcode(&self.panels, &self.params, &self.dims, settings)
    }
}
