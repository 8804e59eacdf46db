//! Drives a [`Renderer`] through a [`PanelPlan`].

use tracing::{debug, info};

use super::dimensions::DerivedDimensions;
use super::holes::DividerHolePlacer;
use super::plan::{PanelPlan, PanelSpec, PlanStep};
use super::types::BoxParameters;
use crate::error::{DeckBoxError, DeckBoxResult};
use crate::renderer::{CursorGuard, Renderer};

#[derive(Debug, Clone)]
pub struct PanelSequencer {
    placer: DividerHolePlacer,
}

impl PanelSequencer {
    pub fn new(params: &BoxParameters, dims: &DerivedDimensions) -> Self {
        Self {
            placer: DividerHolePlacer::new(params, dims),
        }
    }

    /// Register the plan's custom edges, validate every panel against the
    /// renderer's registry, then emit the panels in order. Placeholders only
    /// need their symbols to resolve; drawn panels must also fit their custom
    /// profiles. Nothing is emitted unless the whole plan validates. Returns
    /// the number of drawn panels.
    pub fn run<R: Renderer + ?Sized>(
        &self,
        plan: &PanelPlan,
        renderer: &mut R,
    ) -> DeckBoxResult<usize> {
        for edge in &plan.custom_edges {
            renderer.register_edge(edge.symbol(), edge.profile())?;
        }

        for panel in plan.panels() {
            Self::check_panel(renderer, panel)?;
        }

        let mut drawn = 0;
        for step in &plan.steps {
            match step {
                PlanStep::Panel(panel) => drawn += self.emit(renderer, panel)?,
                PlanStep::Group(panels) => {
                    let mut group = CursorGuard::new(&mut *renderer);
                    for panel in panels {
                        drawn += self.emit(&mut *group, panel)?;
                    }
                }
            }
        }

        info!("Emitted {} panels", drawn);
        Ok(drawn)
    }

    fn check_panel<R: Renderer + ?Sized>(renderer: &R, panel: &PanelSpec) -> DeckBoxResult<()> {
        for (name, value) in [("width", panel.width), ("height", panel.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DeckBoxError::invalid_parameter(
                    &format!("{} {}", panel.name(), name),
                    value,
                    "panel dimensions must be positive",
                ));
            }
        }
        let edges = renderer.edges();
        if panel.advance.draws() {
            edges.check(&panel.edges, panel.width, panel.height, panel.name())
        } else {
            edges.check_symbols(&panel.edges, panel.name())
        }
    }

    fn emit<R: Renderer + ?Sized>(
        &self,
        renderer: &mut R,
        panel: &PanelSpec,
    ) -> DeckBoxResult<usize> {
        let holes = panel
            .callback
            .map(|callback| self.placer.holes_for(callback))
            .unwrap_or_default();

        debug!(
            "Panel {} {:.2}x{:.2} edges={} holes={} advance={:?}",
            panel.name(),
            panel.width,
            panel.height,
            panel.edges,
            holes.len(),
            panel.advance
        );

        renderer.emit_panel(panel, &holes)?;
        Ok(usize::from(panel.advance.draws()))
    }
}
