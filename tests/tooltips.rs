use needle_plot_wasm::application::{HeadlessSurface, MinimalTooltip, NeedlePlot, PlotConfig};
use needle_plot_wasm::domain::plot::{Mutation, PlotData, Site};
use needle_plot_wasm::domain::tooltip::{PointerPosition, Tooltip, TooltipTarget};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen_test::*;

fn plot(needles: &HeadlessSurface, sites: &HeadlessSurface) -> NeedlePlot {
    let data = PlotData {
        mutations: vec![Mutation::new(50.0, 4.0)],
        sites: vec![Site::new(10.0, 30.0, "acetylation")],
    };
    let mut config = PlotConfig::new(100.0, data);
    config.width = Some(195.0);
    config.height = Some(200.0);
    NeedlePlot::builder(config)
        .needle_tooltip(Rc::new(RefCell::new(MinimalTooltip::for_needles(needles.clone()))))
        .site_tooltip(Rc::new(RefCell::new(MinimalTooltip::for_sites(sites.clone()))))
        .build()
        .unwrap()
}

#[wasm_bindgen_test]
fn hovering_a_site_shows_its_type() {
    let (needles, sites) = (HeadlessSurface::new(), HeadlessSurface::new());
    let mut plot = plot(&needles, &sites);
    // site spans x 10..30 on the baseline at y 140
    plot.pointer_move(90.0 + 20.0, 145.0, PointerPosition::new(300.0, 400.0));
    let state = sites.state();
    assert!(state.visible);
    assert_eq!(state.content, "acetylation");
    assert!(!needles.state().visible);

    plot.pointer_leave();
    assert!(!sites.state().visible);
}

#[wasm_bindgen_test]
fn hovering_empty_space_shows_nothing() {
    let (needles, sites) = (HeadlessSurface::new(), HeadlessSurface::new());
    let mut plot = plot(&needles, &sites);
    plot.pointer_move(90.0 + 80.0, 40.0, PointerPosition::new(0.0, 0.0));
    assert!(!needles.state().visible);
    assert!(!sites.state().visible);
}

#[wasm_bindgen_test]
fn destroy_removes_tooltips() {
    let (needles, sites) = (HeadlessSurface::new(), HeadlessSurface::new());
    let mut plot = plot(&needles, &sites);
    plot.destroy();
    assert!(needles.state().removed);
    assert!(sites.state().removed);
}

/// Counts how often the plot asks it to follow its element.
#[derive(Clone, Default)]
struct AnchoredTooltip {
    follows: Rc<Cell<usize>>,
}

impl Tooltip for AnchoredTooltip {
    fn bind(&mut self, _targets: &[TooltipTarget]) {}

    fn show(&mut self, _target: &TooltipTarget, _pointer: PointerPosition) {}

    fn hide(&mut self) {}

    fn move_to_pointer(&mut self, _pointer: PointerPosition) {}

    fn move_to_element(&mut self) {
        self.follows.set(self.follows.get() + 1);
    }
}

fn anchored_plot() -> (NeedlePlot, AnchoredTooltip, AnchoredTooltip) {
    let (needles, sites) = (AnchoredTooltip::default(), AnchoredTooltip::default());
    let data = PlotData { mutations: vec![Mutation::new(50.0, 4.0)], sites: vec![Site::new(10.0, 30.0, "acetylation")] };
    let plot = NeedlePlot::builder(PlotConfig::new(100.0, data))
        .needle_tooltip(Rc::new(RefCell::new(needles.clone())))
        .site_tooltip(Rc::new(RefCell::new(sites.clone())))
        .build()
        .unwrap();
    (plot, needles, sites)
}

#[wasm_bindgen_test]
fn every_resync_moves_both_tooltips_once() {
    let (mut plot, needles, sites) = anchored_plot();
    let start = (needles.follows.get(), sites.follows.get());

    plot.set_zoom_and_aa_position(3.0, 20.0, false, true);
    assert_eq!(needles.follows.get(), start.0 + 1);
    assert_eq!(sites.follows.get(), start.1 + 1);

    plot.set_aa_position(10.0, true, false);
    assert_eq!(needles.follows.get(), start.0 + 2);
    assert_eq!(sites.follows.get(), start.1 + 2);

    plot.set_size(400.0, 250.0, 6.0);
    assert_eq!(needles.follows.get(), start.0 + 3);
    assert_eq!(sites.follows.get(), start.1 + 3);
}

#[wasm_bindgen_test]
fn destroyed_plot_stops_moving_tooltips() {
    let (mut plot, needles, _) = anchored_plot();
    plot.destroy();
    let after = needles.follows.get();
    plot.set_zoom(4.0, false, false, false);
    assert_eq!(needles.follows.get(), after);
}
