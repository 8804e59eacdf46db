//! Rectangular panel renderer with finger joints
//!
//! Finger/space sizes are multiples of the material thickness, the same
//! scheme as https://github.com/florianfesti/boxes. Outlines are closed
//! polylines in layout coordinates, kerf-compensated by half the burn width.

use tracing::trace;

use crate::deck_box::edges::{trace_steps, EdgeBehavior, EdgeCode, EdgeProfile, EdgeRegistry, Side};
use crate::deck_box::holes::HolePosition;
use crate::deck_box::plan::{AdvanceMode, PanelSpec};
use crate::deck_box::types::{bounds, push_unique_point, BoxParameters, FingerJointSettings, Point};
use crate::error::DeckBoxResult;
use crate::renderer::{restore_or_warn, CursorStack, DrawCursor, Renderer};

/// One drawn panel, positioned on the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPanel {
    pub label: Option<String>,
    pub width: f64,
    pub height: f64,
    pub edges: EdgeCode,
    /// Sheet position of the panel's local origin (its bottom-left corner)
    pub origin: Point,
    pub outline: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
}

#[derive(Debug)]
pub struct PanelRenderer {
    thickness: f64,
    finger_joint: FingerJointSettings,
    burn: f64,
    spacing: f64,
    registry: EdgeRegistry,
    cursor: CursorStack,
    /// Tallest drawn panel of each open group
    group_heights: Vec<f64>,
    /// Height of the group closed last, reserved by the next placeholder
    reserved: f64,
    panels: Vec<RenderedPanel>,
}

impl PanelRenderer {
    pub fn new(params: &BoxParameters) -> Self {
        Self {
            thickness: params.thickness,
            finger_joint: params.finger_joint.clone(),
            burn: params.burn,
            spacing: params.spacing,
            registry: EdgeRegistry::new(),
            cursor: CursorStack::new(),
            group_heights: Vec::new(),
            reserved: 0.0,
            panels: Vec::new(),
        }
    }

    pub fn panels(&self) -> &[RenderedPanel] {
        &self.panels
    }

    pub fn into_panels(self) -> Vec<RenderedPanel> {
        self.panels
    }

    pub fn cursor(&self) -> DrawCursor {
        self.cursor.position()
    }

    /// Calculate number of fingers and leftover space for a given length
    pub fn calc_fingers(&self, length: f64) -> (usize, f64) {
        let settings = &self.finger_joint;
        let t = self.thickness;

        let space = settings.space * t;
        let finger = settings.finger * t;

        let mut fingers = ((length - (settings.surrounding_spaces - 1.0) * space)
            / (space + finger))
            .floor()
            .max(0.0) as usize;

        // Squeeze in a single finger when the surrounding space allows it
        if fingers == 0 && length > finger + t {
            fingers = 1;
        }

        let leftover = if fingers > 0 {
            length - (fingers as f64) * (space + finger) + space
        } else {
            length
        };

        (fingers, leftover)
    }

    /// Finger joint edge in the side frame. `positive` fingers protrude,
    /// otherwise notches receive the mating fingers.
    fn draw_finger_edge(&self, length: f64, positive: bool) -> Vec<Point> {
        let settings = &self.finger_joint;
        let t = self.thickness;

        let mut space = settings.space * t;
        let mut finger = settings.finger * t;
        let play = settings.play * t;
        let extra = settings.extra_length * t;
        let kerf = self.burn;
        let half_kerf = kerf / 2.0;

        let (fingers, mut leftover) = self.calc_fingers(length);

        if !positive {
            finger += play;
            space -= play;
            leftover -= play;
        }

        let (finger_draw, space_draw, leftover_draw, tip_y) = if positive {
            (finger + kerf, space - kerf, leftover - kerf, -t - extra - half_kerf)
        } else {
            (finger - kerf, space + kerf, leftover + kerf, t - half_kerf)
        };
        let base_y = -half_kerf;

        let mut path = Vec::new();
        let mut x = 0.0;
        path.push(Point::new(x, base_y));
        x += leftover_draw / 2.0;
        path.push(Point::new(x, base_y));

        for i in 0..fingers {
            path.push(Point::new(x, tip_y));
            x += finger_draw;
            path.push(Point::new(x, tip_y));
            path.push(Point::new(x, base_y));

            if i + 1 < fingers {
                x += space_draw;
                path.push(Point::new(x, base_y));
            }
        }

        x += leftover_draw / 2.0;
        path.push(Point::new(x, base_y));

        path
    }

    fn draw_custom_edge(
        &self,
        profile: &dyn EdgeProfile,
        length: f64,
    ) -> DeckBoxResult<Vec<Point>> {
        let half_kerf = self.burn / 2.0;
        Ok(trace_steps(&profile.steps(length)?)
            .into_iter()
            .map(|p| Point::new(p.x, p.y - half_kerf))
            .collect())
    }

    /// One side in its own frame: `+x` along the side, `+y` into the panel.
    fn draw_edge(&self, symbol: char, length: f64, panel: &str) -> DeckBoxResult<Vec<Point>> {
        let t = self.thickness;
        let half_kerf = self.burn / 2.0;

        let path = match self.registry.resolve(symbol, panel)? {
            EdgeBehavior::Plain => vec![
                Point::new(0.0, -half_kerf),
                Point::new(length, -half_kerf),
            ],
            EdgeBehavior::Outset => vec![
                Point::new(0.0, -half_kerf),
                Point::new(0.0, -t - half_kerf),
                Point::new(length, -t - half_kerf),
                Point::new(length, -half_kerf),
            ],
            EdgeBehavior::FingerJoint => self.draw_finger_edge(length, true),
            EdgeBehavior::FingerJointCounterpart => self.draw_finger_edge(length, false),
            EdgeBehavior::Custom(profile) => self.draw_custom_edge(profile.as_ref(), length)?,
        };

        Ok(path)
    }

    /// Closed outline of a `width` x `height` panel in panel coordinates.
    pub fn draw_rectangular_wall(
        &self,
        width: f64,
        height: f64,
        edges: &EdgeCode,
        panel: &str,
    ) -> DeckBoxResult<Vec<Point>> {
        let half_kerf = self.burn / 2.0;
        let mut path: Vec<Point> = Vec::new();

        for (side, symbol) in edges.sides() {
            let local = self.draw_edge(symbol, side.length(width, height), panel)?;
            let (to_panel, corner): (Box<dyn Fn(&Point) -> Point>, Point) = match side {
                // Bottom edge: left to right (0,0) → (width,0)
                Side::Bottom => (
                    Box::new(|p: &Point| Point::new(p.x, p.y)),
                    Point::new(width + half_kerf, -half_kerf),
                ),
                // Right edge: bottom to top (width,0) → (width,height)
                Side::Right => (
                    Box::new(move |p: &Point| Point::new(width - p.y, p.x)),
                    Point::new(width + half_kerf, height + half_kerf),
                ),
                // Top edge: right to left (width,height) → (0,height)
                Side::Top => (
                    Box::new(move |p: &Point| Point::new(width - p.x, height - p.y)),
                    Point::new(-half_kerf, height + half_kerf),
                ),
                // Left edge: top to bottom (0,height) → (0,0)
                Side::Left => (
                    Box::new(move |p: &Point| Point::new(p.y, height - p.x)),
                    Point::new(-half_kerf, -half_kerf),
                ),
            };

            for p in &local {
                push_unique_point(&mut path, to_panel(p));
            }
            push_unique_point(&mut path, corner);
        }

        // Close the loop
        if let Some(first) = path.first().copied() {
            push_unique_point(&mut path, first);
        }

        Ok(path)
    }

    /// How far one side reaches outside the panel rectangle. Custom profiles
    /// only cut into the panel, so they are not traced.
    fn edge_overhang(&self, symbol: char, length: f64, panel: &str) -> DeckBoxResult<f64> {
        let t = self.thickness;
        let overhang = match self.registry.resolve(symbol, panel)? {
            EdgeBehavior::Outset => t,
            EdgeBehavior::FingerJoint if self.calc_fingers(length).0 > 0 => {
                t + self.finger_joint.extra_length * t
            }
            _ => 0.0,
        };
        Ok(overhang + self.burn / 2.0)
    }

    /// Bounding size of a panel's outline, from the edge symbols alone.
    pub fn measure_wall(
        &self,
        width: f64,
        height: f64,
        edges: &EdgeCode,
        panel: &str,
    ) -> DeckBoxResult<(f64, f64)> {
        let mut overhang = [0.0; 4];
        for (side, symbol) in edges.sides() {
            overhang[side as usize] =
                self.edge_overhang(symbol, side.length(width, height), panel)?;
        }
        let [bottom, right, top, left] = overhang;
        Ok((width + left + right, height + bottom + top))
    }

    /// Rectangular slots for one row of finger holes, positioned to receive
    /// a finger edge of the same length.
    pub fn hole_slots(&self, hole: &HolePosition) -> Vec<Vec<Point>> {
        let settings = &self.finger_joint;
        let t = self.thickness;
        let kerf = self.burn;

        let (fingers, mut leftover) = self.calc_fingers(hole.length);

        // Holes receive fingers, so they get the play
        let play = settings.play * t;
        let finger = settings.finger * t + play;
        let space = settings.space * t - play;
        leftover -= play;

        let slot_w = finger - kerf;
        let slot_h = t - kerf;

        let angle = hole.angle.to_radians();
        let (dx, dy) = (angle.cos(), angle.sin());
        let (nx, ny) = (-dy, dx);
        let at = |along: f64, across: f64| {
            Point::new(
                hole.x + dx * along + nx * across,
                hole.y + dy * along + ny * across,
            )
        };

        let mut slots = Vec::with_capacity(fingers);
        let mut pos = leftover / 2.0;

        for _ in 0..fingers {
            let start = pos + kerf / 2.0;
            let end = start + slot_w;
            slots.push(vec![
                at(start, -slot_h / 2.0),
                at(end, -slot_h / 2.0),
                at(end, slot_h / 2.0),
                at(start, slot_h / 2.0),
                at(start, -slot_h / 2.0),
            ]);
            pos += finger + space;
        }

        slots
    }
}

impl Renderer for PanelRenderer {
    fn register_edge(&mut self, symbol: char, profile: Box<dyn EdgeProfile>) -> DeckBoxResult<()> {
        self.registry.register(symbol, profile)
    }

    fn edges(&self) -> &EdgeRegistry {
        &self.registry
    }

    fn emit_panel(&mut self, panel: &PanelSpec, holes: &[HolePosition]) -> DeckBoxResult<()> {
        let name = panel.name();
        let spacing = self.spacing;

        if !panel.advance.draws() {
            let (_, height) = self.measure_wall(panel.width, panel.height, &panel.edges, name)?;
            // Never less than the group it follows
            let height = height.max(std::mem::take(&mut self.reserved));
            trace!("Reserving {:.2} mm for {}", height, name);
            self.cursor.advance(0.0, height + spacing);
            return Ok(());
        }

        let outline = self.draw_rectangular_wall(panel.width, panel.height, &panel.edges, name)?;
        let (min_x, min_y, max_x, max_y) =
            bounds(&outline).unwrap_or((0.0, 0.0, panel.width, panel.height));

        // Place the outline's bounding box at the cursor
        let cursor = self.cursor.position();
        let origin = Point::new(cursor.x - min_x, cursor.y - min_y);

        let shift = |p: &Point| Point::new(p.x + origin.x, p.y + origin.y);
        let holes: Vec<Vec<Point>> = holes
            .iter()
            .flat_map(|hole| self.hole_slots(hole))
            .map(|slot| slot.iter().map(shift).collect())
            .collect();

        trace!(
            "Drawing {} at ({:.2}, {:.2}) with {} slots",
            name,
            origin.x,
            origin.y,
            holes.len()
        );

        self.panels.push(RenderedPanel {
            label: panel.label.map(str::to_string),
            width: panel.width,
            height: panel.height,
            edges: panel.edges,
            origin,
            outline: outline.iter().map(shift).collect(),
            holes,
        });

        if let Some(tallest) = self.group_heights.last_mut() {
            *tallest = tallest.max(max_y - min_y);
        }

        match panel.advance {
            AdvanceMode::Right => self.cursor.advance(max_x - min_x + spacing, 0.0),
            AdvanceMode::Up => self.cursor.advance(0.0, max_y - min_y + spacing),
            AdvanceMode::UpOnly | AdvanceMode::Stay => {}
        }

        Ok(())
    }

    fn save_cursor(&mut self) {
        self.cursor.save();
        self.group_heights.push(0.0);
    }

    fn restore_cursor(&mut self) {
        restore_or_warn(&mut self.cursor);
        if let Some(height) = self.group_heights.pop() {
            self.reserved = height;
        }
    }
}
