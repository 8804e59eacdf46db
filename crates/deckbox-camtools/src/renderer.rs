//! Contract between the panel sequencer and a drawing backend.

use std::ops::{Deref, DerefMut};

use tracing::warn;

use crate::deck_box::edges::{EdgeProfile, EdgeRegistry};
use crate::deck_box::holes::HolePosition;
use crate::deck_box::plan::PanelSpec;
use crate::error::DeckBoxResult;

/// Layout position of the next panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawCursor {
    pub x: f64,
    pub y: f64,
}

/// Cursor plus the snapshots taken by enclosing groups.
#[derive(Debug, Clone, Default)]
pub struct CursorStack {
    current: DrawCursor,
    saved: Vec<DrawCursor>,
}

impl CursorStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> DrawCursor {
        self.current
    }

    pub fn advance(&mut self, dx: f64, dy: f64) {
        self.current.x += dx;
        self.current.y += dy;
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Return to the most recent snapshot. Returns `false` when nothing was
    /// saved, leaving the cursor unchanged.
    pub fn restore(&mut self) -> bool {
        match self.saved.pop() {
            Some(cursor) => {
                self.current = cursor;
                true
            }
            None => false,
        }
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

/// A backend that can lay out and draw rectangular panels.
pub trait Renderer {
    /// Bind a custom edge symbol. Each symbol may be registered once.
    fn register_edge(&mut self, symbol: char, profile: Box<dyn EdgeProfile>) -> DeckBoxResult<()>;

    /// Edge symbols known to this renderer.
    fn edges(&self) -> &EdgeRegistry;

    /// Draw (or, for `UpOnly`, only measure) one panel, cut `holes` into it
    /// in panel-local coordinates, and advance the cursor.
    fn emit_panel(&mut self, panel: &PanelSpec, holes: &[HolePosition]) -> DeckBoxResult<()>;

    fn save_cursor(&mut self);

    fn restore_cursor(&mut self);
}

/// Saves the renderer's cursor on creation and restores it on drop.
pub struct CursorGuard<'a, R: Renderer + ?Sized> {
    renderer: &'a mut R,
}

impl<'a, R: Renderer + ?Sized> CursorGuard<'a, R> {
    pub fn new(renderer: &'a mut R) -> Self {
        renderer.save_cursor();
        Self { renderer }
    }
}

impl<R: Renderer + ?Sized> Deref for CursorGuard<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.renderer
    }
}

impl<R: Renderer + ?Sized> DerefMut for CursorGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.renderer
    }
}

impl<R: Renderer + ?Sized> Drop for CursorGuard<'_, R> {
    fn drop(&mut self) {
        self.renderer.restore_cursor();
    }
}

/// Restore helper for renderers built on [`CursorStack`].
pub fn restore_or_warn(stack: &mut CursorStack) {
    if !stack.restore() {
        warn!("Cursor restore without a matching save; cursor left in place");
    }
}
