//! Sequencer behaviour against a recording renderer

use deckbox_camtools::deck_box::{
    AdvanceMode, BoxParameters, DerivedDimensions, EdgeProfile, EdgeRegistry, HolePosition,
    PanelPlan, PanelSequencer, PanelSpec, PlanStep,
};
use deckbox_camtools::{DeckBoxError, DeckBoxResult, Renderer};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Register(char),
    Save,
    Restore,
    Emit(String, usize),
}

#[derive(Debug, Default)]
struct RecordingRenderer {
    registry: EdgeRegistry,
    events: Vec<Event>,
}

impl Renderer for RecordingRenderer {
    fn register_edge(&mut self, symbol: char, profile: Box<dyn EdgeProfile>) -> DeckBoxResult<()> {
        self.events.push(Event::Register(symbol));
        self.registry.register(symbol, profile)
    }

    fn edges(&self) -> &EdgeRegistry {
        &self.registry
    }

    fn emit_panel(&mut self, panel: &PanelSpec, holes: &[HolePosition]) -> DeckBoxResult<()> {
        self.events.push(Event::Emit(panel.name().to_string(), holes.len()));
        Ok(())
    }

    fn save_cursor(&mut self) {
        self.events.push(Event::Save);
    }

    fn restore_cursor(&mut self) {
        self.events.push(Event::Restore);
    }
}

fn setup(num: u32) -> (PanelSequencer, PanelPlan) {
    let params = BoxParameters {
        num,
        ..Default::default()
    };
    let dims = DerivedDimensions::derive(&params).unwrap();
    let plan = PanelPlan::build(&params, &dims).unwrap();
    (PanelSequencer::new(&params, &dims), plan)
}

#[test]
fn test_edges_registered_before_any_panel() {
    let (sequencer, plan) = setup(3);
    let mut renderer = RecordingRenderer::default();
    sequencer.run(&plan, &mut renderer).unwrap();

    assert_eq!(renderer.events[0], Event::Register('a'));
    assert_eq!(renderer.events[1], Event::Register('A'));
    assert!(renderer.events[2..]
        .iter()
        .all(|e| !matches!(e, Event::Register(_))));
}

#[test]
fn test_groups_are_bracketed_by_save_and_restore() {
    let (sequencer, plan) = setup(3);
    let mut renderer = RecordingRenderer::default();
    sequencer.run(&plan, &mut renderer).unwrap();

    let events = &renderer.events[2..];
    assert_eq!(
        &events[..6],
        &[
            Event::Save,
            Event::Emit("Lid".into(), 0),
            Event::Emit("Bottom".into(), 2),
            Event::Restore,
            Event::Emit("(placeholder)".into(), 0),
            Event::Emit("Lip Front".into(), 0),
        ]
    );

    let saves = events.iter().filter(|e| **e == Event::Save).count();
    let restores = events.iter().filter(|e| **e == Event::Restore).count();
    assert_eq!(saves, 5);
    assert_eq!(saves, restores);
}

#[test]
fn test_run_reports_drawn_panels() {
    for num in 1..5 {
        let (sequencer, plan) = setup(num);
        let mut renderer = RecordingRenderer::default();
        let drawn = sequencer.run(&plan, &mut renderer).unwrap();
        assert_eq!(drawn, plan.drawn_panel_count());

        let emitted = renderer
            .events
            .iter()
            .filter(|e| matches!(e, Event::Emit(..)))
            .count();
        assert_eq!(emitted, drawn + 5);
    }
}

#[test]
fn test_unregistered_symbol_aborts_before_emitting() {
    let (sequencer, mut plan) = setup(2);
    plan.steps.push(PlanStep::Panel(PanelSpec {
        width: 10.0,
        height: 10.0,
        edges: "eeZe".parse().unwrap(),
        callback: None,
        advance: AdvanceMode::Right,
        label: Some("Broken"),
    }));

    let mut renderer = RecordingRenderer::default();
    let err = sequencer.run(&plan, &mut renderer).unwrap_err();
    assert_eq!(
        err,
        DeckBoxError::UnregisteredEdgeSymbol {
            symbol: 'Z',
            panel: "Broken".to_string(),
        }
    );
    assert!(!renderer
        .events
        .iter()
        .any(|e| matches!(e, Event::Emit(..) | Event::Save)));
}

#[test]
fn test_registering_twice_is_rejected() {
    let (sequencer, plan) = setup(2);
    let mut renderer = RecordingRenderer::default();
    sequencer.run(&plan, &mut renderer).unwrap();

    let err = sequencer.run(&plan, &mut renderer).unwrap_err();
    assert_eq!(err, DeckBoxError::DuplicateEdgeSymbol('a'));
}

#[test]
fn test_non_positive_panel_is_rejected() {
    let (sequencer, mut plan) = setup(1);
    plan.steps.insert(
        0,
        PlanStep::Panel(PanelSpec {
            width: 0.0,
            height: 10.0,
            edges: "eeee".parse().unwrap(),
            callback: None,
            advance: AdvanceMode::Right,
            label: Some("Empty"),
        }),
    );

    let mut renderer = RecordingRenderer::default();
    assert!(matches!(
        sequencer.run(&plan, &mut renderer),
        Err(DeckBoxError::InvalidParameter { .. })
    ));
}

#[test]
fn test_placeholder_symbols_must_resolve() {
    let (sequencer, mut plan) = setup(1);
    plan.steps.push(PlanStep::Panel(PanelSpec {
        width: 10.0,
        height: 5.0,
        edges: "eZee".parse().unwrap(),
        callback: None,
        advance: AdvanceMode::UpOnly,
        label: None,
    }));

    let mut renderer = RecordingRenderer::default();
    assert!(matches!(
        sequencer.run(&plan, &mut renderer),
        Err(DeckBoxError::UnregisteredEdgeSymbol { symbol: 'Z', .. })
    ));
}

#[test]
fn test_placeholder_profiles_are_not_traced() {
    // A finger notch on a 5mm side would underflow if it were drawn
    let (sequencer, mut plan) = setup(1);
    plan.steps.push(PlanStep::Panel(PanelSpec {
        width: 10.0,
        height: 5.0,
        edges: "eAee".parse().unwrap(),
        callback: None,
        advance: AdvanceMode::UpOnly,
        label: None,
    }));

    let mut renderer = RecordingRenderer::default();
    let drawn = sequencer.run(&plan, &mut renderer).unwrap();
    assert_eq!(drawn, plan.drawn_panel_count());
}
