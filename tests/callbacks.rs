use needle_plot_wasm::application::{NeedlePlot, PlotConfig, RecordingExecutor};
use needle_plot_wasm::domain::events::PlotEvent;
use needle_plot_wasm::domain::plot::{Mutation, PlotData};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen_test::*;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Zoom(f64),
    Position(f64),
    ZoomAndMove(f64, f64, bool),
}

fn plot_with_log() -> (NeedlePlot, Rc<RefCell<Vec<Call>>>, RecordingExecutor) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let executor = RecordingExecutor::new();
    let data = PlotData { mutations: vec![Mutation::new(157.0, 6.0), Mutation::new(282.0, 10.0)], sites: vec![] };
    let (zooms, positions, combined) = (log.clone(), log.clone(), log.clone());
    let plot = NeedlePlot::builder(PlotConfig::new(393.0, data))
        .on_zoom(move |scale, _| zooms.borrow_mut().push(Call::Zoom(scale)))
        .on_position(move |aa, _| positions.borrow_mut().push(Call::Position(aa)))
        .on_zoom_and_move(move |scale, aa, _, stop| combined.borrow_mut().push(Call::ZoomAndMove(scale, aa, stop)))
        .executor(executor.clone())
        .build()
        .unwrap();
    (plot, log, executor)
}

#[wasm_bindgen_test]
fn unchanged_zoom_fires_nothing() {
    let (mut plot, log, _) = plot_with_log();
    plot.set_zoom(1.0, false, false, false);
    assert!(log.borrow().is_empty());
}

#[wasm_bindgen_test]
fn zoom_fires_with_new_scale() {
    let (mut plot, log, _) = plot_with_log();
    plot.set_zoom(2.5, false, false, false);
    assert_eq!(*log.borrow(), vec![Call::Zoom(2.5)]);
}

#[wasm_bindgen_test]
fn clamped_zoom_reports_clamped_scale() {
    let (mut plot, log, _) = plot_with_log();
    plot.set_zoom(40.0, false, false, false);
    assert_eq!(*log.borrow(), vec![Call::Zoom(6.0)]);
}

#[wasm_bindgen_test]
fn suppressed_calls_stay_silent() {
    let (mut plot, log, _) = plot_with_log();
    plot.set_zoom(3.0, true, true, false);
    plot.set_position(-100.0, true, false);
    plot.set_zoom_and_aa_position(4.0, 20.0, true, false);
    assert!(log.borrow().is_empty());
}

#[wasm_bindgen_test]
fn position_reports_left_edge_sequence_position() {
    let (mut plot, log, _) = plot_with_log();
    plot.set_zoom(2.0, true, false, false);
    let screen = plot.transform().sequence_position_to_screen_offset(40.0, 2.0);
    plot.set_position(screen, false, false);
    match log.borrow().as_slice() {
        [Call::Position(aa)] => assert!((aa - 40.0).abs() < 1e-9),
        other => panic!("unexpected calls {:?}", other),
    }
}

#[wasm_bindgen_test]
fn combined_zoom_keeps_anchor_and_animates() {
    let (mut plot, log, executor) = plot_with_log();
    plot.set_zoom_and_aa_position(3.0, 100.0, false, true);

    assert_eq!(plot.get_zoom(), 3.0);
    assert!((plot.get_aa_position() - 100.0).abs() < 1e-9);

    let calls = log.borrow().clone();
    assert_eq!(calls.len(), 3);
    match calls[0] {
        Call::ZoomAndMove(scale, aa, stop) => {
            assert_eq!(scale, 3.0);
            assert!((aa - 100.0).abs() < 1e-9);
            assert!(!stop);
        }
        ref other => panic!("unexpected first call {:?}", other),
    }
    assert_eq!(calls[1], Call::Zoom(3.0));
    assert!(matches!(calls[2], Call::Position(_)));
    assert!(executor.last().map(|t| t.is_animated()).unwrap_or(false));
}

fn count_viewport_changes(plot: &mut NeedlePlot) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let seen = count.clone();
    plot.subscribe(move |event| {
        if let PlotEvent::ViewportChanged { .. } = event {
            seen.set(seen.get() + 1);
        }
    });
    count
}

#[wasm_bindgen_test]
fn combined_zoom_and_pan_resyncs_once() {
    let (mut plot, _, executor) = plot_with_log();
    let changes = count_viewport_changes(&mut plot);
    let before = executor.len();

    plot.set_zoom_and_aa_position(3.0, 100.0, false, true);

    assert_eq!(executor.len(), before + 1);
    assert_eq!(changes.get(), 1);

    plot.set_zoom_and_move(5.0, -200.0, true, false, false);
    assert_eq!(executor.len(), before + 2);
    assert_eq!(changes.get(), 2);
}

#[wasm_bindgen_test]
fn each_single_request_resyncs_once() {
    let (mut plot, _, executor) = plot_with_log();
    let changes = count_viewport_changes(&mut plot);
    let before = executor.len();

    plot.set_zoom(2.0, false, true, false);
    plot.set_position(-50.0, false, true);

    assert_eq!(executor.len(), before + 2);
    assert_eq!(changes.get(), 2);
}

#[wasm_bindgen_test]
fn resize_resyncs_once_and_reports_view() {
    let (mut plot, log, executor) = plot_with_log();
    let changes = count_viewport_changes(&mut plot);
    let resized = Rc::new(RefCell::new(Vec::new()));
    let sizes = resized.clone();
    plot.subscribe(move |event| {
        if let PlotEvent::Resized { width, height } = event {
            sizes.borrow_mut().push((*width, *height));
        }
    });
    let before = executor.len();

    plot.set_size(800.0, 300.0, 8.0);

    assert_eq!(executor.len(), before + 1);
    assert_eq!(changes.get(), 1);
    assert_eq!(*resized.borrow(), vec![(800.0, 300.0)]);
    assert!(matches!(log.borrow().as_slice(), [Call::ZoomAndMove(scale, _, false)] if *scale == 1.0));
    assert!(executor.last().map(|t| t.is_animated()).unwrap_or(false));
}

#[wasm_bindgen_test]
fn rejected_resize_does_not_resync() {
    let (mut plot, log, executor) = plot_with_log();
    let changes = count_viewport_changes(&mut plot);
    let before = executor.len();

    plot.set_size(800.0, 300.0, 0.5);

    assert_eq!(executor.len(), before);
    assert_eq!(changes.get(), 0);
    assert!(log.borrow().is_empty());
}

#[wasm_bindgen_test]
fn onload_runs_once_after_build() {
    let loaded = Rc::new(RefCell::new(0));
    let counter = loaded.clone();
    let data = PlotData { mutations: vec![Mutation::new(5.0, 1.0)], sites: vec![] };
    let plot = NeedlePlot::builder(PlotConfig::new(50.0, data))
        .on_load(move || *counter.borrow_mut() += 1)
        .build()
        .unwrap();
    assert_eq!(*loaded.borrow(), 1);
    assert_eq!(plot.get_zoom(), 1.0);
}
