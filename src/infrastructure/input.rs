//! DOM event wiring for a plot canvas.

use gloo::events::{EventListener, EventListenerOptions};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use crate::application::gesture::DeltaMode;
use crate::domain::tooltip::PointerPosition;

/// Receives pointer input in canvas pixel coordinates.
pub trait PointerSink {
    fn wheel(&self, x: f64, delta_y: f64, mode: DeltaMode);
    fn double_click(&self, x: f64, shift: bool);
    fn drag_start(&self, x: f64);
    fn drag_move(&self, x: f64);
    fn drag_end(&self);
    fn pointer_move(&self, x: f64, y: f64, client: PointerPosition);
    fn pointer_leave(&self);
}

/// Keeps the listeners alive; dropping it unbinds them.
pub struct InputBindings {
    _listeners: Vec<EventListener>,
}

/// Pointer position in canvas pixels, accounting for CSS scaling.
fn canvas_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    let sx = if rect.width() > 0.0 { canvas.width() as f64 / rect.width() } else { 1.0 };
    let sy = if rect.height() > 0.0 { canvas.height() as f64 / rect.height() } else { 1.0 };
    ((event.client_x() as f64 - rect.left()) * sx, (event.client_y() as f64 - rect.top()) * sy)
}

fn client_point(event: &MouseEvent) -> PointerPosition {
    PointerPosition::new(event.client_x() as f64, event.client_y() as f64)
}

/// Wire wheel zoom, drag pan, double-click zoom and hover to `sink`.
/// Move and release are watched on the window so drags may leave the canvas.
pub fn bind_canvas(canvas: &HtmlCanvasElement, sink: Rc<dyn PointerSink>) -> InputBindings {
    let mut listeners = Vec::new();

    {
        let (canvas_ref, sink) = (canvas.clone(), sink.clone());
        listeners.push(EventListener::new_with_options(
            canvas,
            "wheel",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if let Some(wheel) = event.dyn_ref::<WheelEvent>() {
                    wheel.prevent_default();
                    let (x, _) = canvas_point(&canvas_ref, wheel);
                    sink.wheel(x, wheel.delta_y(), DeltaMode::from_dom(wheel.delta_mode()));
                }
            },
        ));
    }

    {
        let (canvas_ref, sink) = (canvas.clone(), sink.clone());
        listeners.push(EventListener::new(canvas, "dblclick", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let (x, _) = canvas_point(&canvas_ref, mouse);
                sink.double_click(x, mouse.shift_key());
            }
        }));
    }

    {
        let (canvas_ref, sink) = (canvas.clone(), sink.clone());
        listeners.push(EventListener::new(canvas, "mousedown", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let (x, _) = canvas_point(&canvas_ref, mouse);
                sink.drag_start(x);
            }
        }));
    }

    {
        let (canvas_ref, sink) = (canvas.clone(), sink.clone());
        listeners.push(EventListener::new(canvas, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let (x, y) = canvas_point(&canvas_ref, mouse);
                sink.pointer_move(x, y, client_point(mouse));
            }
        }));
    }

    {
        let sink = sink.clone();
        listeners.push(EventListener::new(canvas, "mouseleave", move |_| sink.pointer_leave()));
    }

    let window = gloo::utils::window();
    {
        let (canvas_ref, sink) = (canvas.clone(), sink.clone());
        listeners.push(EventListener::new(&window, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let (x, _) = canvas_point(&canvas_ref, mouse);
                sink.drag_move(x);
            }
        }));
    }
    listeners.push(EventListener::new(&window, "mouseup", move |_| sink.drag_end()));

    InputBindings { _listeners: listeners }
}
