use needle_plot_wasm::application::{NeedlePlot, PlotConfig};
use needle_plot_wasm::domain::plot::{Mutation, PlotData};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use wasm_bindgen_test::*;

fn plot() -> NeedlePlot {
    let data = PlotData { mutations: vec![Mutation::new(120.0, 4.0), Mutation::new(300.0, 9.0)], sites: vec![] };
    NeedlePlot::builder(PlotConfig::new(393.0, data)).build().unwrap()
}

#[quickcheck]
fn zoom_always_within_extent(scale: f64) -> TestResult {
    if !scale.is_finite() {
        return TestResult::discard();
    }
    let mut plot = plot();
    plot.set_zoom(scale, true, false, false);
    let zoom = plot.get_zoom();
    TestResult::from_bool((1.0..=6.0).contains(&zoom))
}

#[quickcheck]
fn position_always_within_bounds(scale: f64, position: f64) -> TestResult {
    if !scale.is_finite() || position.is_nan() {
        return TestResult::discard();
    }
    let mut plot = plot();
    plot.set_zoom(scale, true, false, false);
    plot.set_position(position, true, false);
    let p = plot.get_position();
    TestResult::from_bool(p <= 0.0 && p >= plot.pan_boundary())
}

#[wasm_bindgen_test]
fn unzoomed_plot_cannot_pan() {
    let mut plot = plot();
    plot.set_position(-200.0, true, false);
    assert_eq!(plot.get_position(), 0.0);
    plot.set_position(50.0, true, false);
    assert_eq!(plot.get_position(), 0.0);
}

#[wasm_bindgen_test]
fn zooming_keeps_position_inside_new_boundary() {
    let mut plot = plot();
    plot.set_zoom(6.0, true, false, false);
    plot.set_position(f64::NEG_INFINITY, true, false);
    assert_eq!(plot.get_position(), plot.pan_boundary());

    plot.set_zoom(1.5, true, false, false);
    assert_eq!(plot.get_position(), plot.pan_boundary());
    assert!((plot.get_aa_position() - (393.0 - 393.0 / 1.5)).abs() < 1e-9);
}

#[wasm_bindgen_test]
fn resize_rescales_unit_and_extent() {
    let mut plot = plot();
    plot.set_zoom(6.0, true, false, false);
    plot.set_size(800.0, 400.0, 4.0);
    assert_eq!(plot.get_zoom(), 4.0);
    assert!((plot.transform().unit() - 705.0 / 393.0).abs() < 1e-12);
    assert_eq!(plot.config().height_px(), 400.0);
}

#[wasm_bindgen_test]
fn invalid_resize_is_ignored() {
    let mut plot = plot();
    plot.set_size(800.0, 400.0, 0.5);
    assert_eq!(plot.config().max_zoom, 6.0);
    assert_eq!(plot.config().width_px(), 600.0);
}
