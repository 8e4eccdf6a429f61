use js_sys::{Array, Function, JSON, Object, Reflect};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

use super::handle::{HostQueue, PlotHandle, host_queue};
use crate::application::{MinimalTooltip, NeedlePlot, NeedlePlotBuilder, PlotConfig, SharedTooltip};
use crate::domain::{
    errors::{PlotError, PlotResult},
    logging::LogComponent,
    tooltip::{PointerPosition, Tooltip, TooltipTarget},
};
use crate::infrastructure::{
    input::{InputBindings, bind_canvas},
    rendering::{CanvasRenderer, CanvasTransitionExecutor},
    tooltip::DomTooltipSurface,
};
use crate::{log_info, log_warn};

/// Options consumed by the bridge itself; everything else is plot config.
const HOST_KEYS: [&str; 8] = [
    "element",
    "needle_tooltip",
    "site_tooltip",
    "zoom_callback",
    "position_callback",
    "zoomAndMove_callback",
    "zoom_and_move_callback",
    "onload",
];

fn to_js_error(err: PlotError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn get(object: &JsValue, key: &str) -> JsValue {
    Reflect::get(object, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn get_function(object: &JsValue, key: &str) -> Option<Function> {
    get(object, key).dyn_into::<Function>().ok()
}

fn to_js(value: &Value) -> JsValue {
    JSON::parse(&value.to_string()).unwrap_or(JsValue::NULL)
}

fn from_js(value: &JsValue) -> Value {
    JSON::stringify(value)
        .ok()
        .and_then(|json| json.as_string())
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or(Value::Null)
}

/// Call a host function once the plot borrow is released.
fn enqueue(queue: &HostQueue, function: Function, args: Array) {
    queue.borrow_mut().push_back(Box::new(move || {
        if let Err(err) = function.apply(&JsValue::NULL, &args) {
            log_warn!(LogComponent::Host("js"), "Host callback threw: {:?}", err);
        }
    }));
}

/// Adapter for host tooltip objects implementing `bind`, `show`, `hide`,
/// `moveToPointer` and optionally `moveToElement` and `remove`.
struct JsTooltip {
    object: JsValue,
    queue: HostQueue,
}

impl JsTooltip {
    fn call(&self, method: &'static str, args: Array) {
        let object = self.object.clone();
        self.queue.borrow_mut().push_back(Box::new(move || {
            // optional hooks are skipped when absent
            let Some(function) = get_function(&object, method) else {
                return;
            };
            if let Err(err) = function.apply(&object, &args) {
                log_warn!(LogComponent::Tooltip("js"), "{} threw: {:?}", method, err);
            }
        }));
    }

    fn target(target: &TooltipTarget) -> JsValue {
        let object = Object::new();
        let _ = Reflect::set(&object, &"kind".into(), &JsValue::from_str(target.kind.as_ref()));
        let _ = Reflect::set(&object, &"id".into(), &(target.id as f64).into());
        let _ = Reflect::set(&object, &"data".into(), &to_js(&target.data));
        object.into()
    }

    fn pointer(pointer: PointerPosition) -> JsValue {
        let object = Object::new();
        let _ = Reflect::set(&object, &"clientX".into(), &pointer.x.into());
        let _ = Reflect::set(&object, &"clientY".into(), &pointer.y.into());
        object.into()
    }
}

impl Tooltip for JsTooltip {
    fn bind(&mut self, targets: &[TooltipTarget]) {
        let targets: Array = targets.iter().map(Self::target).collect();
        self.call("bind", Array::of1(&targets));
    }

    fn show(&mut self, target: &TooltipTarget, pointer: PointerPosition) {
        self.call("show", Array::of2(&Self::target(target), &Self::pointer(pointer)));
    }

    fn hide(&mut self) {
        self.call("hide", Array::new());
    }

    fn move_to_pointer(&mut self, pointer: PointerPosition) {
        self.call("moveToPointer", Array::of1(&Self::pointer(pointer)));
    }

    fn move_to_element(&mut self) {
        self.call("moveToElement", Array::new());
    }

    fn remove(&mut self) {
        self.call("remove", Array::new());
    }
}

/// Host `render` used by a DOM tooltip. Runs synchronously since its
/// result is needed for the tooltip content.
fn js_render(render: Function) -> impl Fn(&Value) -> String + 'static {
    move |data| match render.call1(&JsValue::NULL, &to_js(data)) {
        Ok(html) => html.as_string().unwrap_or_else(|| from_js(&html).to_string()),
        Err(err) => {
            log_warn!(LogComponent::Tooltip("js"), "Tooltip render threw: {:?}", err);
            String::new()
        }
    }
}

type DomTooltip = MinimalTooltip<DomTooltipSurface>;

/// DOM tooltips made while mounting; removed again when mounting fails.
#[derive(Default)]
struct MountedTooltips(Vec<SharedTooltip>);

impl MountedTooltips {
    fn dom(&mut self, tooltip: DomTooltip) -> SharedTooltip {
        let tooltip: SharedTooltip = Rc::new(RefCell::new(tooltip));
        self.0.push(tooltip.clone());
        tooltip
    }

    fn discard(self) {
        for tooltip in self.0 {
            tooltip.borrow_mut().remove();
        }
    }
}

/// The host tooltip under `key`, or a DOM tooltip built by `fallback`.
fn tooltip(
    config: &JsValue,
    key: &str,
    queue: &HostQueue,
    mounted: &mut MountedTooltips,
    fallback: fn(DomTooltipSurface) -> DomTooltip,
) -> Result<SharedTooltip, JsValue> {
    let object = get(config, key);
    if object.is_undefined() || object.is_null() {
        return Ok(mounted.dom(fallback(DomTooltipSurface::new()?)));
    }
    if get_function(&object, "show").is_some() {
        let tooltip: SharedTooltip = Rc::new(RefCell::new(JsTooltip { object, queue: queue.clone() }));
        return Ok(tooltip);
    }
    match get_function(&object, "render") {
        Some(render) => Ok(mounted.dom(MinimalTooltip::new(DomTooltipSurface::new()?, js_render(render)))),
        None => Err(to_js_error(PlotError::InvalidConfig(format!("{} needs show() or render()", key)))),
    }
}

fn mount_element(config: &JsValue) -> PlotResult<HtmlElement> {
    let element = get(config, "element");
    if let Some(id) = element.as_string() {
        let id = id.trim_start_matches('#').to_string();
        return gloo::utils::document()
            .get_element_by_id(&id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| PlotError::Mount(format!("no element with id '{}'", id)));
    }
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| PlotError::Mount("element must be an id or an HTMLElement".to_string()))
}

fn plot_config(config: &JsValue) -> Result<PlotConfig, JsValue> {
    let source = config
        .dyn_ref::<Object>()
        .ok_or_else(|| to_js_error(PlotError::InvalidConfig("config must be an object".to_string())))?;
    let copy = Object::assign(&Object::new(), source);
    for key in HOST_KEYS {
        Reflect::delete_property(&copy, &JsValue::from_str(key))?;
    }
    let json = JSON::stringify(&copy)?.as_string().unwrap_or_default();
    let mut plot_config = PlotConfig::from_json(&json).map_err(to_js_error)?;
    plot_config.element = get(config, "element").as_string();
    Ok(plot_config)
}

fn with_callbacks(mut builder: NeedlePlotBuilder, config: &JsValue, queue: &HostQueue) -> NeedlePlotBuilder {
    if let Some(function) = get_function(config, "zoom_callback") {
        let queue = queue.clone();
        builder = builder.on_zoom(move |scale, flag| {
            enqueue(&queue, function.clone(), Array::of2(&scale.into(), &flag.into()));
        });
    }
    if let Some(function) = get_function(config, "position_callback") {
        let queue = queue.clone();
        builder = builder.on_position(move |aa_position, flag| {
            enqueue(&queue, function.clone(), Array::of2(&aa_position.into(), &flag.into()));
        });
    }
    let zoom_and_move =
        get_function(config, "zoomAndMove_callback").or_else(|| get_function(config, "zoom_and_move_callback"));
    if let Some(function) = zoom_and_move {
        let queue = queue.clone();
        builder = builder.on_zoom_and_move(move |scale, aa_position, flag, stop_animation| {
            let args = Array::of4(&scale.into(), &aa_position.into(), &flag.into(), &stop_animation.into());
            enqueue(&queue, function.clone(), args);
        });
    }
    if let Some(function) = get_function(config, "onload") {
        let queue = queue.clone();
        builder = builder.on_load(move || enqueue(&queue, function, Array::new()));
    }
    builder
}

/// Everything that can fail before the canvas is attached.
fn build_plot(
    config: &JsValue,
    plot_config: PlotConfig,
    canvas: &HtmlCanvasElement,
    queue: &HostQueue,
    mounted: &mut MountedTooltips,
) -> Result<NeedlePlot, JsValue> {
    let renderer = CanvasRenderer::new(canvas.clone())?;
    let needle_tooltip = tooltip(config, "needle_tooltip", queue, mounted, MinimalTooltip::for_needles)?;
    let site_tooltip = tooltip(config, "site_tooltip", queue, mounted, MinimalTooltip::for_sites)?;
    let builder = NeedlePlot::builder(plot_config)
        .executor(CanvasTransitionExecutor::new(renderer))
        .needle_tooltip(needle_tooltip)
        .site_tooltip(site_tooltip);
    with_callbacks(builder, config, queue).build().map_err(to_js_error)
}

/// Browser entry point: `new NeedlePlot(config)`.
#[wasm_bindgen(js_name = NeedlePlot)]
pub struct NeedlePlotApi {
    handle: Rc<PlotHandle>,
    canvas: HtmlCanvasElement,
    bindings: RefCell<Option<InputBindings>>,
}

#[wasm_bindgen(js_class = NeedlePlot)]
impl NeedlePlotApi {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<NeedlePlotApi, JsValue> {
        let element = mount_element(&config).map_err(to_js_error)?;
        let plot_config = plot_config(&config)?;
        let queue = host_queue();

        let canvas = gloo::utils::document().create_element("canvas")?.dyn_into::<HtmlCanvasElement>()?;
        canvas.set_class_name("needleplot");

        let mut mounted = MountedTooltips::default();
        let mut plot = match build_plot(&config, plot_config, &canvas, &queue, &mut mounted) {
            Ok(plot) => plot,
            Err(err) => {
                mounted.discard();
                return Err(err);
            }
        };
        if let Err(err) = element.append_child(&canvas) {
            plot.destroy();
            return Err(err);
        }
        let handle = Rc::new(PlotHandle::new(plot, queue));
        let bindings = bind_canvas(&canvas, handle.clone());
        log_info!(LogComponent::Host("js"), "Plot mounted");

        Ok(Self { handle, canvas, bindings: RefCell::new(Some(bindings)) })
    }

    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&self, scale: f64, stop_callback: Option<bool>, recalculate_position: Option<bool>, animate: Option<bool>) {
        self.handle.with(|plot| {
            plot.set_zoom(
                scale,
                stop_callback.unwrap_or(false),
                recalculate_position.unwrap_or(false),
                animate.unwrap_or(false),
            )
        });
    }

    #[wasm_bindgen(js_name = getZoom)]
    pub fn get_zoom(&self) -> f64 {
        self.handle.with(|plot| plot.get_zoom()).unwrap_or(f64::NAN)
    }

    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&self, position: f64, stop_callback: Option<bool>, animate: Option<bool>) {
        self.handle.with(|plot| plot.set_position(position, stop_callback.unwrap_or(false), animate.unwrap_or(false)));
    }

    #[wasm_bindgen(js_name = setAAPosition)]
    pub fn set_aa_position(&self, position: f64, stop_callback: Option<bool>, animate: Option<bool>) {
        self.handle
            .with(|plot| plot.set_aa_position(position, stop_callback.unwrap_or(false), animate.unwrap_or(false)));
    }

    #[wasm_bindgen(js_name = setZoomAndAAPosition)]
    pub fn set_zoom_and_aa_position(&self, scale: f64, position: f64, stop_callback: Option<bool>, animate: Option<bool>) {
        self.handle.with(|plot| {
            plot.set_zoom_and_aa_position(scale, position, stop_callback.unwrap_or(false), animate.unwrap_or(false))
        });
    }

    #[wasm_bindgen(js_name = getAAPosition)]
    pub fn get_aa_position(&self) -> f64 {
        self.handle.with(|plot| plot.get_aa_position()).unwrap_or(f64::NAN)
    }

    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&self, width: f64, height: f64, max_zoom: f64) {
        self.handle.with(|plot| plot.set_size(width, height, max_zoom));
    }

    /// Remove the canvas, the tooltips and the DOM listeners.
    pub fn destroy(&self) {
        self.bindings.borrow_mut().take();
        self.handle.with(|plot| plot.destroy());
        self.canvas.remove();
    }
}
