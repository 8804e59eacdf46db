//! End-to-end generation of the deck box panel layout

use deckbox_camtools::deck_box::{BoxParameters, DeckBoxMaker, GcodeSettings};
use deckbox_camtools::DeckBoxError;

fn generated(params: BoxParameters) -> DeckBoxMaker {
    let mut maker = DeckBoxMaker::new(params).expect("Failed to create DeckBoxMaker");
    maker.generate().expect("Failed to generate box");
    maker
}

#[test]
fn test_default_box_dimensions_and_panels() {
    let maker = generated(BoxParameters::default());
    let dims = maker.dimensions();

    assert_eq!(dims.boxwidth, 3.0 * 65.0 + 4.0 * 3.0);
    assert_eq!(dims.boxdepth, 68.0 + 2.0 * 3.0);
    assert_eq!(dims.height, 92.0);

    let labels: Vec<&str> = maker
        .panels()
        .iter()
        .filter_map(|p| p.label.as_deref())
        .collect();
    assert_eq!(labels.len(), 20);
    assert_eq!(labels.iter().filter(|l| **l == "Divider").count(), 2);
    assert_eq!(labels.iter().filter(|l| l.ends_with("inlay")).count(), 6);
    assert_eq!(labels.first(), Some(&"Lid"));
    assert_eq!(labels.last(), Some(&"Lid topper"));
}

#[test]
fn test_two_compartment_box() {
    let params = BoxParameters {
        deckheight: 40.0,
        cardwidth: 63.0,
        cardheight: 88.0,
        num: 2,
        thickness: 4.0,
        ..Default::default()
    };
    let maker = generated(params);
    let dims = maker.dimensions();

    assert_eq!(dims.boxwidth, 2.0 * 40.0 + 3.0 * 4.0);
    assert_eq!(dims.boxdepth, 63.0 + 8.0);
    assert_eq!(maker.panels().len(), 12 + 1 + 4);

    let bottom = maker
        .panels()
        .iter()
        .find(|p| p.label.as_deref() == Some("Bottom"))
        .unwrap();
    assert!(!bottom.holes.is_empty());

    let divider = maker
        .panels()
        .iter()
        .find(|p| p.label.as_deref() == Some("Divider"))
        .unwrap();
    assert_eq!(divider.width, 88.0);
    assert_eq!(divider.height, 71.0);
    assert_eq!(divider.edges.to_string(), "faff");
}

#[test]
fn test_panels_do_not_overlap() {
    let maker = generated(BoxParameters::default());
    let boxes: Vec<(f64, f64, f64, f64)> = maker
        .panels()
        .iter()
        .map(|p| {
            let xs = p.outline.iter().map(|pt| pt.x);
            let ys = p.outline.iter().map(|pt| pt.y);
            (
                xs.clone().fold(f64::INFINITY, f64::min),
                ys.clone().fold(f64::INFINITY, f64::min),
                xs.fold(f64::NEG_INFINITY, f64::max),
                ys.fold(f64::NEG_INFINITY, f64::max),
            )
        })
        .collect();

    for (i, a) in boxes.iter().enumerate() {
        for b in boxes.iter().skip(i + 1) {
            let overlap_x = a.0 < b.2 - 1e-6 && b.0 < a.2 - 1e-6;
            let overlap_y = a.1 < b.3 - 1e-6 && b.1 < a.3 - 1e-6;
            assert!(!(overlap_x && overlap_y), "{:?} overlaps {:?}", a, b);
        }
    }
}

#[test]
fn test_outlines_are_closed() {
    let maker = generated(BoxParameters::default());
    for panel in maker.panels() {
        assert_eq!(panel.outline.first(), panel.outline.last());
        for hole in &panel.holes {
            assert_eq!(hole.first(), hole.last());
        }
    }
}

#[test]
fn test_svg_and_gcode_cover_every_panel() {
    let maker = generated(BoxParameters::default());

    let svg = maker.to_svg();
    assert_eq!(svg.matches("<g ").count(), maker.panels().len());
    assert!(svg.contains("data-label=\"Outer Side Right\""));

    let settings = GcodeSettings {
        laser_passes: 1,
        ..Default::default()
    };
    let gcode = maker.to_gcode(&settings);
    assert_eq!(gcode.matches("; Outline").count(), maker.panels().len());
    assert!(gcode.contains("; Compartments: 3"));

    // The whole layout starts at the configured offset
    let min_x = gcode
        .lines()
        .filter(|l| l.starts_with("G0 X") || l.starts_with("G1 X"))
        .filter(|l| !l.contains("Return to origin"))
        .filter_map(|l| {
            let x: String = l[4..]
                .chars()
                .take_while(|c| c.is_numeric() || *c == '.' || *c == '-')
                .collect();
            x.parse::<f64>().ok()
        })
        .fold(f64::INFINITY, f64::min);
    assert!((min_x - settings.offset_x).abs() < 0.01);
}

#[test]
fn test_short_cards_generate() {
    // The inner-side placeholder carries the finger notch on an 18mm side,
    // but it is never drawn
    let params = BoxParameters {
        cardheight: 18.0,
        ..Default::default()
    };
    let maker = generated(params);
    assert_eq!(maker.panels().len(), 20);

    let inner = maker
        .panels()
        .iter()
        .find(|p| p.label.as_deref() == Some("Inner Side Left"))
        .unwrap();
    assert_eq!(inner.height, 18.0);
}

#[test]
fn test_generation_fails_without_panels() {
    let params = BoxParameters {
        cardwidth: 10.0,
        ..Default::default()
    };
    let mut maker = DeckBoxMaker::new(params).unwrap();

    match maker.generate() {
        Err(DeckBoxError::GeometryUnderflow { length, minimum, .. }) => {
            assert_eq!(length, 16.0);
            assert_eq!(minimum, 20.0);
        }
        other => panic!("expected underflow, got {:?}", other),
    }
    assert!(maker.panels().is_empty());
}

#[test]
fn test_invalid_burn_is_rejected() {
    let params = BoxParameters {
        burn: 3.0,
        ..Default::default()
    };
    match DeckBoxMaker::new(params) {
        Err(DeckBoxError::InvalidParameter { name, .. }) => assert_eq!(name, "burn"),
        Err(other) => panic!("unexpected error {}", other),
        Ok(_) => panic!("burn equal to thickness must be rejected"),
    }
}
