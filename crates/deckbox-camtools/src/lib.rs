//! # DeckBox CAM Tools
//!
//! Panel layout for a laser-cut, finger-jointed card deck box.
//!
//! - **Deck Box Maker**: derives the box dimensions, plans every panel and
//!   lays them out on the sheet
//! - **Panel Renderer**: rectangular panels with finger joints, custom edge
//!   profiles and divider finger holes
//! - **Export**: SVG documents and multi-pass laser G-code

pub mod deck_box;
pub mod error;
pub mod export;
pub mod panel_renderer;
pub mod renderer;

pub use deck_box::{
    BoxParameters, DeckBoxMaker, DerivedDimensions, FingerJointSettings, GcodeSettings,
    PanelPlan, PanelSequencer,
};
pub use error::{DeckBoxError, DeckBoxResult};
pub use panel_renderer::{PanelRenderer, RenderedPanel};
pub use renderer::{CursorGuard, CursorStack, DrawCursor, Renderer};
