use gloo_timers::future::TimeoutFuture;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::CanvasRenderer;
use crate::application::{
    animation::{Transition, TransitionExecutor},
    scene::SceneFrame,
};
use crate::domain::logging::LogComponent;
use crate::log_error;

const FRAME_INTERVAL_MS: u32 = 16;

/// Plays transitions on a canvas. Each transition bumps a generation
/// counter; a running animation stops as soon as it sees a newer one, and
/// the next transition starts from whatever was drawn last.
#[derive(Clone)]
pub struct CanvasTransitionExecutor {
    renderer: Rc<CanvasRenderer>,
    shown: Rc<RefCell<Option<SceneFrame>>>,
    generation: Rc<Cell<u64>>,
}

impl CanvasTransitionExecutor {
    pub fn new(renderer: CanvasRenderer) -> Self {
        Self { renderer: Rc::new(renderer), shown: Rc::new(RefCell::new(None)), generation: Rc::new(Cell::new(0)) }
    }

    pub fn renderer(&self) -> &CanvasRenderer {
        &self.renderer
    }

    fn draw(renderer: &CanvasRenderer, shown: &RefCell<Option<SceneFrame>>, frame: SceneFrame) {
        if let Err(err) = renderer.render(&frame) {
            log_error!(LogComponent::Render("transition"), "Failed to draw frame: {:?}", err);
        }
        *shown.borrow_mut() = Some(frame);
    }
}

impl TransitionExecutor for CanvasTransitionExecutor {
    fn run(&mut self, transition: Transition) {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let from = self.shown.borrow().clone();
        let from = match from {
            Some(from) if transition.is_animated() => from,
            _ => {
                Self::draw(&self.renderer, &self.shown, transition.target);
                return;
            }
        };

        let renderer = self.renderer.clone();
        let shown = self.shown.clone();
        let current = self.generation.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let start = js_sys::Date::now();
            loop {
                if current.get() != generation {
                    return;
                }
                let elapsed = js_sys::Date::now() - start;
                let t = (elapsed / transition.duration_ms).min(1.0);
                let frame = from.interpolate(&transition.target, transition.easing.apply(t));
                Self::draw(&renderer, &shown, frame);
                if t >= 1.0 {
                    return;
                }
                TimeoutFuture::new(FRAME_INTERVAL_MS).await;
            }
        });
    }

    fn clear(&mut self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        *self.shown.borrow_mut() = None;
        self.renderer.clear();
    }
}
