use leptos::html::Canvas;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::application::{NeedlePlot, PlotConfig};
use crate::domain::logging::LogComponent;
use crate::log_error;
use crate::infrastructure::{
    input::{InputBindings, bind_canvas},
    rendering::{CanvasRenderer, CanvasTransitionExecutor},
};
use crate::presentation::{PlotHandle, host_queue};

/// Mounted plot together with the listeners feeding it.
struct Mounted {
    handle: Rc<PlotHandle>,
    _bindings: InputBindings,
}

fn mount(canvas: web_sys::HtmlCanvasElement, config: PlotConfig) -> Result<Mounted, String> {
    let renderer = CanvasRenderer::new(canvas.clone()).map_err(|e| format!("{:?}", e))?;
    let plot = NeedlePlot::builder(config)
        .executor(CanvasTransitionExecutor::new(renderer))
        .build()
        .map_err(|e| e.to_string())?;
    let handle = Rc::new(PlotHandle::new(plot, host_queue()));
    let bindings = bind_canvas(&canvas, handle.clone());
    Ok(Mounted { handle, _bindings: bindings })
}

/// Needle plot drawn into its own canvas. The plot is created once the
/// canvas is mounted and destroyed with the component.
#[component]
pub fn NeedlePlotView(config: PlotConfig) -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();
    let mounted: Rc<RefCell<Option<Mounted>>> = Rc::new(RefCell::new(None));
    let (status, set_status) = create_signal(String::new());

    {
        let mounted = mounted.clone();
        create_effect(move |_| {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            if mounted.borrow().is_some() {
                return;
            }
            let element: &web_sys::HtmlCanvasElement = &canvas;
            match mount(element.clone(), config.clone()) {
                Ok(plot) => {
                    *mounted.borrow_mut() = Some(plot);
                    set_status.set(String::new());
                }
                Err(err) => {
                    log_error!(LogComponent::Host("leptos"), "Failed to mount plot: {}", err);
                    set_status.set(err);
                }
            }
        });
    }

    on_cleanup(move || {
        if let Some(plot) = mounted.borrow_mut().take() {
            plot.handle.with(|plot| plot.destroy());
        }
    });

    view! {
        <div class="needleplot-container">
            <canvas node_ref=canvas_ref class="needleplot"/>
            <Show when=move || !status.get().is_empty()>
                <div class="status">{move || status.get()}</div>
            </Show>
        </div>
    }
}
