use needle_plot_wasm::application::{NeedlePlot, PlotConfig, RecordingExecutor};
use needle_plot_wasm::domain::events::PlotEvent;
use needle_plot_wasm::domain::plot::{HeadKey, Mutation, PlotData, services};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen_test::*;

fn overlapping_plot() -> (NeedlePlot, RecordingExecutor) {
    let data = PlotData {
        mutations: vec![
            Mutation::new(234.0, 18.0).with_category("distal"),
            Mutation::new(234.0, 18.0).with_category("distal"),
            Mutation::new(100.0, 3.0).with_category("proximal"),
        ],
        sites: vec![],
    };
    let mut config = PlotConfig::new(393.0, data);
    config.mutations_color_map = Some(HashMap::from([("distal".to_string(), "#000000".to_string())]));
    let executor = RecordingExecutor::new();
    let plot = NeedlePlot::builder(config).executor(executor.clone()).build().unwrap();
    (plot, executor)
}

#[wasm_bindgen_test]
fn coincident_heads_share_a_count_label() {
    let (plot, _) = overlapping_plot();
    assert_eq!(plot.head_groups().overlap_count(&HeadKey::new(234.0, 18.0)), 2);

    let frame = plot.current_frame().unwrap();
    let labels: Vec<Option<&str>> =
        frame.needles.iter().map(|n| n.head.count.as_ref().map(|c| c.text.as_str())).collect();
    assert_eq!(labels, vec![Some("2"), Some("2"), None]);

    // dark heads get a light label
    let label = frame.needles[0].head.count.as_ref().unwrap();
    assert_eq!(label.fill, "white");
    assert_eq!(frame.needles[0].head.fill.as_deref(), Some("#000000"));
    assert_eq!(frame.needles[2].head.fill, None);
}

#[wasm_bindgen_test]
fn hovering_a_cluster_fans_it_out() {
    let (mut plot, executor) = overlapping_plot();
    let fanned = Rc::new(RefCell::new(Vec::new()));
    let sink = fanned.clone();
    plot.subscribe(move |event| {
        if let PlotEvent::HeadsFannedOut { position, count, .. } = event {
            sink.borrow_mut().push((*position, *count));
        }
    });

    plot.fan_out(0);
    assert_eq!(*fanned.borrow(), vec![(234.0, 2)]);

    let width = services::width_per_head(plot.transform().unit(), 6.0, 1.0);
    let frame = executor.last().unwrap().target;
    assert!((frame.needles[0].head.dx + width / 2.0).abs() < 1e-9);
    assert!((frame.needles[1].head.dx - width / 2.0).abs() < 1e-9);
    assert_eq!(frame.needles[2].head.dx, 0.0);

    // already spread
    plot.fan_out(1);
    assert_eq!(fanned.borrow().len(), 1);
}

#[wasm_bindgen_test]
fn refresh_collapses_fanned_heads() {
    let (mut plot, _) = overlapping_plot();
    plot.fan_out(0);
    plot.set_zoom(2.0, true, false, false);
    let frame = plot.current_frame().unwrap();
    assert!(frame.needles.iter().all(|n| n.head.dx == 0.0));
}

#[wasm_bindgen_test]
fn single_heads_do_not_fan_out() {
    let (mut plot, executor) = overlapping_plot();
    let before = executor.len();
    plot.fan_out(2);
    assert_eq!(executor.len(), before);
}
