#![cfg(target_arch = "wasm32")]

use needle_plot_wasm::application::{NeedlePlot, PlotConfig};
use needle_plot_wasm::domain::plot::{Mutation, PlotData, Site};
use needle_plot_wasm::infrastructure::rendering::{CanvasRenderer, CanvasTransitionExecutor};
use needle_plot_wasm::presentation::{PlotHandle, host_queue};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn setup_canvas() -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document.create_element("canvas").unwrap().dyn_into::<web_sys::HtmlCanvasElement>().unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn config() -> PlotConfig {
    let data = PlotData {
        mutations: vec![Mutation::new(157.0, 6.0), Mutation::new(282.0, 10.0)],
        sites: vec![Site::new(142.0, 167.0, "phosphorylation")],
    };
    PlotConfig::new(393.0, data)
}

#[wasm_bindgen_test]
fn frame_resizes_canvas_and_draws() {
    let canvas = setup_canvas();
    let renderer = CanvasRenderer::new(canvas.clone()).unwrap();
    let plot = NeedlePlot::builder(config()).executor(CanvasTransitionExecutor::new(renderer)).build().unwrap();

    assert_eq!(canvas.width(), 600);
    assert_eq!(canvas.height(), 300);
    assert_eq!(plot.get_zoom(), 1.0);
    assert!(canvas.to_data_url().unwrap().starts_with("data:image/png"));
    canvas.remove();
}

#[wasm_bindgen_test]
fn destroy_clears_and_ignores_later_calls() {
    let canvas = setup_canvas();
    let renderer = CanvasRenderer::new(canvas.clone()).unwrap();
    let plot = NeedlePlot::builder(config()).executor(CanvasTransitionExecutor::new(renderer)).build().unwrap();
    let handle = Rc::new(PlotHandle::new(plot, host_queue()));

    handle.with(|plot| plot.set_zoom(3.0, true, false, false));
    assert_eq!(handle.with(|plot| plot.get_zoom()), Some(3.0));

    handle.with(|plot| plot.destroy());
    handle.with(|plot| plot.set_zoom(5.0, true, false, false));
    assert_eq!(handle.with(|plot| plot.is_destroyed()), Some(true));
    assert_eq!(handle.with(|plot| plot.get_zoom()), Some(3.0));
    canvas.remove();
}
