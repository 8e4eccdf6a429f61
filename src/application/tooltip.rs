use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::tooltip::{PointerPosition, Tooltip, TooltipTarget};

/// Where a [`MinimalTooltip`] puts its content (a positioned DOM element in
/// the browser).
pub trait TooltipSurface {
    fn set_content(&mut self, html: &str);
    fn set_visible(&mut self, visible: bool);
    /// Place at page (client) coordinates.
    fn move_to(&mut self, x: f64, y: f64);
    fn remove(&mut self) {}
}

pub type RenderFn = Box<dyn Fn(&Value) -> String>;

/// Default tooltip: renders the hovered element with a user function and
/// follows the pointer.
pub struct MinimalTooltip<S: TooltipSurface> {
    surface: S,
    render: RenderFn,
}

impl<S: TooltipSurface> MinimalTooltip<S> {
    pub fn new(surface: S, render: impl Fn(&Value) -> String + 'static) -> Self {
        Self { surface, render: Box::new(render) }
    }

    /// Shows the mutation position.
    pub fn for_needles(surface: S) -> Self {
        Self::new(surface, |mutation| field_text(mutation.get("pos")))
    }

    /// Shows the site type.
    pub fn for_sites(surface: S) -> Self {
        Self::new(surface, |site| field_text(site.get("type")))
    }
}

/// Plain-text rendering of a JSON field: integers without a fraction,
/// arrays joined with commas.
pub fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Some(Value::Array(items)) => {
            items.iter().map(|item| field_text(Some(item))).collect::<Vec<_>>().join(",")
        }
        Some(other) => other.to_string(),
    }
}

impl<S: TooltipSurface> Tooltip for MinimalTooltip<S> {
    fn bind(&mut self, _targets: &[TooltipTarget]) {
        self.hide();
    }

    fn show(&mut self, target: &TooltipTarget, pointer: PointerPosition) {
        let html = (self.render)(&target.data);
        self.surface.set_content(&html);
        self.surface.set_visible(true);
        self.move_to_pointer(pointer);
    }

    fn hide(&mut self) {
        self.surface.set_visible(false);
    }

    fn move_to_pointer(&mut self, pointer: PointerPosition) {
        self.surface.move_to(pointer.x, pointer.y);
    }

    fn remove(&mut self) {
        self.surface.remove();
    }
}

/// Observable state of a [`HeadlessSurface`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceState {
    pub content: String,
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub removed: bool,
}

/// In-memory surface; clones share state.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SurfaceState {
        self.state.borrow().clone()
    }
}

impl TooltipSurface for HeadlessSurface {
    fn set_content(&mut self, html: &str) {
        self.state.borrow_mut().content = html.to_string();
    }

    fn set_visible(&mut self, visible: bool) {
        self.state.borrow_mut().visible = visible;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let mut state = self.state.borrow_mut();
        state.x = x;
        state.y = y;
    }

    fn remove(&mut self) {
        let mut state = self.state.borrow_mut();
        state.removed = true;
        state.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tooltip::TargetKind;
    use serde_json::json;

    #[test]
    fn default_needle_tooltip_shows_position() {
        let surface = HeadlessSurface::new();
        let mut tooltip = MinimalTooltip::for_needles(surface.clone());
        let target = TooltipTarget { kind: TargetKind::Needle, id: 0, data: json!({"pos": 282.0, "value": 10}) };

        tooltip.bind(std::slice::from_ref(&target));
        assert!(!surface.state().visible);

        tooltip.show(&target, PointerPosition::new(40.0, 60.0));
        assert_eq!(
            surface.state(),
            SurfaceState { content: "282".into(), visible: true, x: 40.0, y: 60.0, removed: false }
        );

        tooltip.hide();
        assert!(!surface.state().visible);
    }

    #[test]
    fn default_site_tooltip_lists_types() {
        let surface = HeadlessSurface::new();
        let mut tooltip = MinimalTooltip::for_sites(surface.clone());
        let target = TooltipTarget {
            kind: TargetKind::Site,
            id: 0,
            data: json!({"start": 1, "end": 5, "type": ["phosphorylation", "acetylation"]}),
        };
        tooltip.show(&target, PointerPosition::default());
        assert_eq!(surface.state().content, "phosphorylation,acetylation");
        tooltip.remove();
        assert!(surface.state().removed);
    }
}
