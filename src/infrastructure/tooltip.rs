use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::application::tooltip::TooltipSurface;
use crate::domain::logging::LogComponent;
use crate::log_warn;

/// A fixed-position `div.tooltip` appended to the document body.
pub struct DomTooltipSurface {
    element: HtmlElement,
}

impl DomTooltipSurface {
    pub fn new() -> Result<Self, JsValue> {
        let document = gloo::utils::document();
        let element = document.create_element("div")?.dyn_into::<HtmlElement>()?;
        element.set_class_name("tooltip");
        let style = element.style();
        style.set_property("pointer-events", "none")?;
        style.set_property("position", "fixed")?;
        style.set_property("opacity", "0")?;
        gloo::utils::body().append_child(&element)?;
        Ok(Self { element })
    }

    fn set_style(&self, name: &str, value: &str) {
        if self.element.style().set_property(name, value).is_err() {
            log_warn!(LogComponent::Tooltip("dom"), "Failed to set tooltip style {}", name);
        }
    }
}

impl TooltipSurface for DomTooltipSurface {
    fn set_content(&mut self, html: &str) {
        self.element.set_inner_html(html);
    }

    fn set_visible(&mut self, visible: bool) {
        self.set_style("opacity", if visible { "1" } else { "0" });
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.set_style("left", &format!("{}px", x));
        self.set_style("top", &format!("{}px", y));
    }

    fn remove(&mut self) {
        self.element.remove();
    }
}
