#![cfg(target_arch = "wasm32")]

use js_sys::{Function, JSON, Object, Reflect};
use needle_plot_wasm::presentation::NeedlePlotApi;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn container() -> web_sys::HtmlElement {
    let document = gloo::utils::document();
    let div = document.create_element("div").unwrap().dyn_into::<web_sys::HtmlElement>().unwrap();
    gloo::utils::body().append_child(&div).unwrap();
    div
}

fn tooltip_count() -> u32 {
    gloo::utils::document().get_elements_by_class_name("tooltip").length()
}

fn config(element: &web_sys::HtmlElement, json: &str) -> JsValue {
    let config = JSON::parse(json).unwrap();
    Reflect::set(&config, &"element".into(), element).unwrap();
    config
}

#[wasm_bindgen_test]
fn mounts_canvas_and_default_tooltips() {
    let element = container();
    let before = tooltip_count();
    let api = NeedlePlotApi::new(config(
        &element,
        r#"{"sequence_length": 393, "data": {"mutations": [{"pos": 157, "value": 6}]}}"#,
    ))
    .unwrap();

    assert_eq!(element.child_element_count(), 1);
    assert_eq!(tooltip_count(), before + 2);

    api.destroy();
    assert_eq!(element.child_element_count(), 0);
    assert_eq!(tooltip_count(), before);
    element.remove();
}

#[wasm_bindgen_test]
fn bad_site_tooltip_leaves_no_elements() {
    let element = container();
    let before = tooltip_count();
    let config = config(&element, r#"{"sequence_length": 393}"#);
    Reflect::set(&config, &"site_tooltip".into(), &Object::new()).unwrap();

    assert!(NeedlePlotApi::new(config).is_err());
    assert_eq!(element.child_element_count(), 0);
    assert_eq!(tooltip_count(), before);
    element.remove();
}

#[wasm_bindgen_test]
fn invalid_config_leaves_no_elements() {
    let element = container();
    let before = tooltip_count();
    let config = config(&element, r#"{"sequence_length": 0}"#);
    let render = Function::new_with_args("d", "return String(d.pos)");
    let needle_tooltip = Object::new();
    Reflect::set(&needle_tooltip, &"render".into(), &render).unwrap();
    Reflect::set(&config, &"needle_tooltip".into(), &needle_tooltip).unwrap();

    assert!(NeedlePlotApi::new(config).is_err());
    assert_eq!(element.child_element_count(), 0);
    assert_eq!(tooltip_count(), before);
    element.remove();
}
