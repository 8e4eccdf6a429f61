use needle_plot_wasm::domain::plot::CoordinateTransform;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use wasm_bindgen_test::*;

fn transform() -> CoordinateTransform {
    // default width 600 minus left/right paddings
    CoordinateTransform::new(505.0, 393.0)
}

#[wasm_bindgen_test]
fn unit_for_default_width() {
    let t = transform();
    assert!((t.unit() - 1.285).abs() < 1e-3);
    assert!((t.position_to_pixel(282.0) - 358.7).abs() < 0.1);
}

#[quickcheck]
fn sequence_position_survives_screen_round_trip(pos: f64, scale: f64) -> TestResult {
    if !pos.is_finite() || !scale.is_finite() || pos.abs() > 1e6 {
        return TestResult::discard();
    }
    let scale = 1.0 + scale.abs() % 5.0;
    let t = transform();
    let screen = t.sequence_position_to_screen_offset(pos, scale);
    let back = t.pixel_to_sequence_position(screen, scale);
    TestResult::from_bool((back - pos).abs() <= 1e-9 * pos.abs().max(1.0))
}

#[quickcheck]
fn boundary_shows_sequence_end(scale: f64) -> TestResult {
    if !scale.is_finite() {
        return TestResult::discard();
    }
    let scale = 1.0 + scale.abs() % 5.0;
    let t = transform();
    let shift_limit = 393.0 / scale - 393.0;
    let boundary = t.pan_boundary(shift_limit, scale);
    let right_edge = t.pixel_to_sequence_position(boundary, scale) + 393.0 / scale;
    TestResult::from_bool((right_edge - 393.0).abs() < 1e-6)
}
