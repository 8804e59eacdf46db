//! SVG and laser G-code output for rendered panels.

use std::fmt::Write as _;

use crate::deck_box::dimensions::DerivedDimensions;
use crate::deck_box::types::{bounds, BoxParameters, GcodeSettings, Point};
use crate::panel_renderer::RenderedPanel;

const SVG_MARGIN: f64 = 10.0;
const SAFE_Z: f64 = 5.0;

fn layout_bounds(panels: &[RenderedPanel]) -> Option<(f64, f64, f64, f64)> {
    bounds(
        panels
            .iter()
            .flat_map(|panel| panel.outline.iter().chain(panel.holes.iter().flatten())),
    )
}

fn svg_path(points: &[Point], to_svg: impl Fn(&Point) -> (f64, f64)) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let (x, y) = to_svg(p);
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{} {:.3} {:.3} ", cmd, x, y);
    }
    d.push('Z');
    d
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// SVG document in millimetres, one group per panel. The layout's `+y` points
/// up, so it is flipped into SVG's downward axis.
pub fn to_svg(panels: &[RenderedPanel]) -> String {
    let (min_x, min_y, max_x, max_y) = layout_bounds(panels).unwrap_or((0.0, 0.0, 0.0, 0.0));
    let width = max_x - min_x + 2.0 * SVG_MARGIN;
    let height = max_y - min_y + 2.0 * SVG_MARGIN;
    let to_svg = |p: &Point| (p.x - min_x + SVG_MARGIN, max_y - p.y + SVG_MARGIN);

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.3}mm\" height=\"{h:.3}mm\" viewBox=\"0 0 {w:.3} {h:.3}\">",
        w = width,
        h = height
    );

    for panel in panels {
        let label = panel.label.as_deref().unwrap_or("");
        let _ = writeln!(svg, "  <g data-label=\"{}\">", escape_xml(label));
        let _ = writeln!(
            svg,
            "    <path d=\"{}\" fill=\"none\" stroke=\"#000000\" stroke-width=\"0.1\"/>",
            svg_path(&panel.outline, to_svg)
        );
        for hole in &panel.holes {
            let _ = writeln!(
                svg,
                "    <path d=\"{}\" fill=\"none\" stroke=\"#0000ff\" stroke-width=\"0.1\"/>",
                svg_path(hole, to_svg)
            );
        }
        if !label.is_empty() {
            let centre = Point::new(
                panel.origin.x + panel.width / 2.0,
                panel.origin.y + panel.height / 2.0,
            );
            let (cx, cy) = to_svg(&centre);
            let _ = writeln!(
                svg,
                "    <text x=\"{:.3}\" y=\"{:.3}\" font-size=\"4\" text-anchor=\"middle\" fill=\"#ff0000\">{}</text>",
                cx,
                cy,
                escape_xml(label)
            );
        }
        svg.push_str("  </g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

fn push_loop(gcode: &mut String, path: &[Point], shift: (f64, f64), settings: &GcodeSettings) {
    let Some(first) = path.first() else {
        return;
    };
    let (shift_x, shift_y) = shift;

    gcode.push_str(&format!(
        "G0 X{:.2} Y{:.2} ; Rapid to start\n",
        first.x + shift_x,
        first.y + shift_y
    ));

    for pass_num in 1..=settings.laser_passes {
        let z_depth = -(pass_num as f64 - 1.0) * settings.z_step_down;
        gcode.push_str(&format!(
            "; Pass {}/{} at Z{:.2}\n",
            pass_num, settings.laser_passes, z_depth
        ));

        if pass_num > 1 {
            gcode.push_str(&format!("G0 Z{:.2} ; Move to pass depth\n", z_depth));
        }

        gcode.push_str(&format!("M3 S{} ; Laser on\n", settings.laser_power));

        for (idx, point) in path.iter().skip(1).enumerate() {
            if idx == 0 {
                gcode.push_str(&format!(
                    "G1 X{:.2} Y{:.2} F{:.0}\n",
                    point.x + shift_x,
                    point.y + shift_y,
                    settings.feed_rate
                ));
            } else {
                gcode.push_str(&format!(
                    "G1 X{:.2} Y{:.2}\n",
                    point.x + shift_x,
                    point.y + shift_y
                ));
            }
        }

        gcode.push_str("M5 ; Laser off\n");

        if pass_num < settings.laser_passes {
            gcode.push_str(&format!(
                "G0 X{:.2} Y{:.2} ; Return to start\n",
                first.x + shift_x,
                first.y + shift_y
            ));
        }
    }
}

/// Laser G-code. Holes are cut before their panel's outline so the part
/// does not shift once it is free.
pub fn to_gcode(
    panels: &[RenderedPanel],
    params: &BoxParameters,
    dims: &DerivedDimensions,
    settings: &GcodeSettings,
) -> String {
    let mut gcode = String::new();
    let fj = &params.finger_joint;

    gcode.push_str("; Deck Box G-code\n");
    gcode.push_str(";\n");
    gcode.push_str("; --- Box Dimensions ---\n");
    gcode.push_str(&format!(
        "; Dimensions: {}x{}x{} mm\n",
        dims.boxwidth, dims.boxdepth, dims.height
    ));
    gcode.push_str(&format!(
        "; Cards: {}x{} mm, stack height {} mm\n",
        params.cardwidth, params.cardheight, params.deckheight
    ));
    gcode.push_str(&format!("; Compartments: {}\n", params.num));
    gcode.push_str(";\n");

    gcode.push_str("; --- Material Settings ---\n");
    gcode.push_str(&format!("; Material thickness: {} mm\n", params.thickness));
    gcode.push_str(&format!("; Burn / Tool Dia: {} mm\n", params.burn));
    gcode.push_str(";\n");

    gcode.push_str("; --- Finger Joint Settings ---\n");
    gcode.push_str(&format!(
        "; Finger width: {} * thickness = {} mm\n",
        fj.finger,
        fj.finger * params.thickness
    ));
    gcode.push_str(&format!(
        "; Space width: {} * thickness = {} mm\n",
        fj.space,
        fj.space * params.thickness
    ));
    gcode.push_str(&format!("; Surrounding spaces: {}\n", fj.surrounding_spaces));
    gcode.push_str(&format!("; Play: {} mm\n", fj.play * params.thickness));
    gcode.push_str(&format!(
        "; Extra length: {} mm\n",
        fj.extra_length * params.thickness
    ));
    gcode.push_str(";\n");

    gcode.push_str("; --- Laser Settings ---\n");
    gcode.push_str(&format!("; Laser passes: {}\n", settings.laser_passes));
    gcode.push_str(&format!("; Laser power: S{}\n", settings.laser_power));
    gcode.push_str(&format!("; Feed rate: {:.0} mm/min\n", settings.feed_rate));
    gcode.push_str(";\n");

    gcode.push_str("; Initialization\n");
    gcode.push_str("G21 ; Set units to millimeters\n");
    gcode.push_str("G90 ; Absolute positioning\n");
    gcode.push_str("G17 ; XY plane selection\n");
    gcode.push('\n');
    gcode.push_str(&format!(
        "G0 Z{:.2} F{:.0} ; Move to safe height\n\n",
        SAFE_Z, settings.feed_rate
    ));

    // The configured offset is the minimum XY of the whole layout
    let shift = match layout_bounds(panels) {
        Some((min_x, min_y, _, _)) => (settings.offset_x - min_x, settings.offset_y - min_y),
        None => (0.0, 0.0),
    };

    for (i, panel) in panels.iter().enumerate() {
        gcode.push_str(&format!(
            "; Panel {}: {}\n",
            i + 1,
            panel.label.as_deref().unwrap_or("Unlabeled")
        ));

        for (j, hole) in panel.holes.iter().enumerate() {
            gcode.push_str(&format!("; Hole {}\n", j + 1));
            push_loop(&mut gcode, hole, shift, settings);
        }

        gcode.push_str("; Outline\n");
        push_loop(&mut gcode, &panel.outline, shift, settings);
        gcode.push('\n');
    }

    gcode.push_str("M5 ; Ensure laser off\n");
    gcode.push_str("G0 Z10.0 ; Move to safe height\n");
    gcode.push_str("G0 X0 Y0 ; Return to origin\n");
    gcode.push_str("M2 ; Program end\n");

    gcode
}
