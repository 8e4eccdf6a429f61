//! The plot instance: owns the viewport state and routes every zoom, pan,
//! resize and pointer request through clamping, re-sync and callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use super::{
    animation::{RecordingExecutor, Transition, TransitionExecutor},
    config::PlotConfig,
    gesture::{DeltaMode, ZoomGesture, ZoomTick},
    scene::{SceneFrame, SceneParams, SceneSynchronizer},
    tooltip::{HeadlessSurface, MinimalTooltip},
};
use crate::domain::{
    errors::PlotResult,
    events::{EventDispatcher, InMemoryEventDispatcher, PlotEvent},
    logging::{LogComponent, log_viewport},
    plot::{Axis, AxisScale, CoordinateTransform, HeadGroups, PlotData, ViewportState, services},
    tooltip::{PointerPosition, TargetKind, Tooltip, TooltipTarget},
};
use crate::{log_debug, log_info, log_warn};

pub type SharedTooltip = Rc<RefCell<dyn Tooltip>>;

pub type ZoomCallback = Box<dyn FnMut(f64, bool)>;
pub type PositionCallback = Box<dyn FnMut(f64, bool)>;
/// `(scale, aa_position, user_triggered, stop_animation)`
pub type ZoomAndMoveCallback = Box<dyn FnMut(f64, f64, bool, bool)>;

/// Host hooks. `zoom` receives the new scale, `position` the sequence
/// position at the left edge; the flag is always `true`.
#[derive(Default)]
pub struct PlotCallbacks {
    pub zoom: Option<ZoomCallback>,
    pub position: Option<PositionCallback>,
    pub zoom_and_move: Option<ZoomAndMoveCallback>,
    pub onload: Option<Box<dyn FnOnce()>>,
}

pub struct NeedlePlotBuilder {
    config: PlotConfig,
    needle_tooltip: Option<SharedTooltip>,
    site_tooltip: Option<SharedTooltip>,
    callbacks: PlotCallbacks,
    executor: Option<Box<dyn TransitionExecutor>>,
}

impl NeedlePlotBuilder {
    pub fn new(config: PlotConfig) -> Self {
        Self { config, needle_tooltip: None, site_tooltip: None, callbacks: PlotCallbacks::default(), executor: None }
    }

    pub fn needle_tooltip(mut self, tooltip: SharedTooltip) -> Self {
        self.needle_tooltip = Some(tooltip);
        self
    }

    pub fn site_tooltip(mut self, tooltip: SharedTooltip) -> Self {
        self.site_tooltip = Some(tooltip);
        self
    }

    pub fn on_zoom(mut self, callback: impl FnMut(f64, bool) + 'static) -> Self {
        self.callbacks.zoom = Some(Box::new(callback));
        self
    }

    pub fn on_position(mut self, callback: impl FnMut(f64, bool) + 'static) -> Self {
        self.callbacks.position = Some(Box::new(callback));
        self
    }

    pub fn on_zoom_and_move(mut self, callback: impl FnMut(f64, f64, bool, bool) + 'static) -> Self {
        self.callbacks.zoom_and_move = Some(Box::new(callback));
        self
    }

    pub fn on_load(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.callbacks.onload = Some(Box::new(callback));
        self
    }

    pub fn executor(mut self, executor: impl TransitionExecutor + 'static) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    pub fn build(self) -> PlotResult<NeedlePlot> {
        NeedlePlot::create(self)
    }
}

pub struct NeedlePlot {
    config: PlotConfig,
    viewport: ViewportState,
    transform: CoordinateTransform,
    x_axis: Axis,
    y_axis: Axis,
    scene: SceneSynchronizer,
    gesture: ZoomGesture,
    executor: Box<dyn TransitionExecutor>,
    needle_tooltip: SharedTooltip,
    site_tooltip: SharedTooltip,
    callbacks: PlotCallbacks,
    dispatcher: InMemoryEventDispatcher,
    hovered: Option<(TargetKind, usize)>,
    current: Option<SceneFrame>,
    destroyed: bool,
}

/// Borrow the scene inputs from individual fields so the synchronizer can be
/// borrowed mutably at the same time.
macro_rules! scene_params {
    ($plot:expr) => {
        SceneParams {
            config: &$plot.config,
            transform: &$plot.transform,
            viewport: &$plot.viewport,
            x_axis: &$plot.x_axis,
            y_axis: &$plot.y_axis,
        }
    };
}

impl NeedlePlot {
    pub fn builder(config: PlotConfig) -> NeedlePlotBuilder {
        NeedlePlotBuilder::new(config)
    }

    fn create(builder: NeedlePlotBuilder) -> PlotResult<Self> {
        let NeedlePlotBuilder { mut config, needle_tooltip, site_tooltip, mut callbacks, executor } = builder;
        config.adjust_dimensions();
        config.validate()?;
        config.data.assign_ids();

        let (x_axis, y_axis) = create_axes(&config);
        let viewport = ViewportState::new(config.zoom_extent());
        let scene = SceneSynchronizer::new(&config.data, &config);

        let needle_tooltip = needle_tooltip
            .unwrap_or_else(|| Rc::new(RefCell::new(MinimalTooltip::for_needles(HeadlessSurface::new()))));
        let site_tooltip = site_tooltip
            .unwrap_or_else(|| Rc::new(RefCell::new(MinimalTooltip::for_sites(HeadlessSurface::new()))));

        let mut dispatcher = InMemoryEventDispatcher::new();
        for tooltip in [needle_tooltip.clone(), site_tooltip.clone()] {
            dispatcher.subscribe_to_plot_events(move |event| {
                if let PlotEvent::ViewportChanged { .. } = event {
                    tooltip.borrow_mut().move_to_element();
                }
            });
        }

        let onload = callbacks.onload.take();
        let mut plot = Self {
            transform: CoordinateTransform::new(config.plot_width(), config.sequence_length),
            gesture: ZoomGesture::new(config.zoom_extent()),
            executor: executor.unwrap_or_else(|| Box::new(RecordingExecutor::new())),
            config,
            viewport,
            x_axis,
            y_axis,
            scene,
            needle_tooltip,
            site_tooltip,
            callbacks,
            dispatcher,
            hovered: None,
            current: None,
            destroyed: false,
        };

        plot.bind_tooltips();
        plot.rescale_plot();
        plot.refresh(false);

        log_info!(
            LogComponent::Plot,
            "Created plot: {} needles, {} sites, {}x{}",
            plot.config.data.mutations.len(),
            plot.config.data.sites.len(),
            plot.config.width_px(),
            plot.config.height_px()
        );

        if let Some(onload) = onload {
            onload();
        }
        Ok(plot)
    }

    fn bind_tooltips(&mut self) {
        let needles: Vec<TooltipTarget> =
            self.config.data.mutations.iter().map(|m| self.target(TargetKind::Needle, m.id)).collect();
        let sites: Vec<TooltipTarget> =
            (0..self.config.data.sites.len()).map(|i| self.target(TargetKind::Site, i)).collect();
        self.needle_tooltip.borrow_mut().bind(&needles);
        self.site_tooltip.borrow_mut().bind(&sites);
    }

    fn target(&self, kind: TargetKind, id: usize) -> TooltipTarget {
        let graph = self.scene.graph();
        let data = match kind {
            TargetKind::Needle => graph.needle_payload(id),
            TargetKind::Site => graph.site_payload(id),
        };
        TooltipTarget { kind, id, data: data.unwrap_or_default() }
    }

    fn tooltip(&self, kind: TargetKind) -> SharedTooltip {
        match kind {
            TargetKind::Needle => self.needle_tooltip.clone(),
            TargetKind::Site => self.site_tooltip.clone(),
        }
    }

    // --- readers ---

    pub fn get_zoom(&self) -> f64 {
        self.viewport.scale()
    }

    /// Screen offset of the content (0 or negative).
    pub fn get_position(&self) -> f64 {
        self.viewport.position()
    }

    /// Sequence position shown at the left edge.
    pub fn get_aa_position(&self) -> f64 {
        self.transform.pixel_to_sequence_position(self.viewport.position(), self.viewport.scale())
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Input data with ids assigned.
    pub fn data(&self) -> &PlotData {
        &self.config.data
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    pub fn head_groups(&self) -> &HeadGroups {
        self.scene.head_groups()
    }

    pub fn gesture(&self) -> &ZoomGesture {
        &self.gesture
    }

    /// Last frame handed to the transition executor.
    pub fn current_frame(&self) -> Option<&SceneFrame> {
        self.current.as_ref()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Leftmost allowed screen offset at the current scale.
    pub fn pan_boundary(&self) -> f64 {
        let scale = self.viewport.scale();
        self.transform.pan_boundary(self.x_axis.shift_limit(scale), scale)
    }

    pub fn subscribe(&mut self, handler: impl Fn(&PlotEvent) + 'static) {
        self.dispatcher.subscribe_to_plot_events(handler);
    }

    // --- viewport primitives ---

    fn position_from_aa(&self, aa_position: f64) -> f64 {
        self.transform.sequence_position_to_screen_offset(aa_position, self.viewport.scale())
    }

    /// Store a clamped scale. Returns whether it changed.
    fn apply_zoom(&mut self, requested: f64, suppress_callback: bool, recalculate_position: bool) -> bool {
        if !requested.is_finite() {
            log_warn!(LogComponent::Viewport, "Ignoring zoom request {}", requested);
            return false;
        }
        let old_aa = self.get_aa_position();
        if !self.viewport.set_scale(requested) {
            return false;
        }
        let scale = self.viewport.scale();
        if !suppress_callback {
            if let Some(callback) = self.callbacks.zoom.as_mut() {
                callback(scale, true);
            }
        }
        if recalculate_position {
            let position = self.position_from_aa(old_aa);
            self.apply_position(position, suppress_callback);
        } else {
            // the boundary moved with the scale
            let position = self.viewport.position();
            let boundary = self.pan_boundary();
            self.viewport.set_position(position, boundary);
        }
        self.gesture.sync(self.viewport.scale(), self.viewport.position());
        true
    }

    /// Store a clamped position. Returns whether it changed.
    fn apply_position(&mut self, requested: f64, suppress_callback: bool) -> bool {
        if requested.is_nan() {
            log_warn!(LogComponent::Viewport, "Ignoring NaN position");
            return false;
        }
        let boundary = self.pan_boundary();
        let changed = self.viewport.set_position(requested, boundary);
        self.gesture.sync(self.viewport.scale(), self.viewport.position());
        if !suppress_callback {
            let aa_position = self.get_aa_position();
            if let Some(callback) = self.callbacks.position.as_mut() {
                callback(aa_position, true);
            }
        }
        changed
    }

    // --- public control surface ---

    pub fn set_zoom(&mut self, scale: f64, suppress_callback: bool, recalculate_position: bool, animate: bool) {
        if self.destroyed {
            return;
        }
        self.apply_zoom(scale, suppress_callback, recalculate_position);
        self.refresh(animate);
    }

    pub fn set_position(&mut self, position: f64, suppress_callback: bool, animate: bool) {
        if self.destroyed {
            return;
        }
        self.apply_position(position, suppress_callback);
        self.refresh(animate);
    }

    /// Pan so `aa_position` is at the left edge.
    pub fn set_aa_position(&mut self, aa_position: f64, suppress_callback: bool, animate: bool) {
        if self.destroyed {
            return;
        }
        let position = self.position_from_aa(aa_position);
        self.apply_position(position, suppress_callback);
        self.refresh(animate);
    }

    /// Zoom while keeping `aa_position` at the left edge.
    pub fn set_zoom_and_aa_position(&mut self, scale: f64, aa_position: f64, suppress_callback: bool, animate: bool) {
        let position = self.position_from_aa(aa_position);
        self.set_zoom_and_move(scale, position, suppress_callback, !animate, true);
    }

    /// Combined zoom and pan with a single re-sync.
    ///
    /// With `recalculate_position` the scale is applied first and the
    /// sequence position under `position` (at the old scale) is kept at the
    /// left edge. Without it `position` is applied first, then the scale.
    pub fn set_zoom_and_move(
        &mut self,
        scale: f64,
        position: f64,
        suppress_callback: bool,
        stop_animation: bool,
        recalculate_position: bool,
    ) {
        if self.destroyed {
            return;
        }
        let old_aa = self.transform.pixel_to_sequence_position(position, self.viewport.scale());

        let (zoomed, moved) = if recalculate_position {
            let zoomed = self.apply_zoom(scale, true, false);
            let new_position = self.position_from_aa(old_aa);
            (zoomed, self.apply_position(new_position, true))
        } else {
            let before = self.viewport.position();
            self.apply_position(position, true);
            let zoomed = self.apply_zoom(scale, true, false);
            (zoomed, self.viewport.position() != before)
        };

        if !suppress_callback {
            let scale = self.viewport.scale();
            let aa_position = self.get_aa_position();
            if let Some(callback) = self.callbacks.zoom_and_move.as_mut() {
                callback(scale, aa_position, true, stop_animation);
            }
            if zoomed {
                if let Some(callback) = self.callbacks.zoom.as_mut() {
                    callback(scale, true);
                }
            }
            if moved {
                if let Some(callback) = self.callbacks.position.as_mut() {
                    callback(aa_position, true);
                }
            }
        }

        self.refresh(!stop_animation);
    }

    /// Resize and re-sync with callbacks and animation.
    pub fn set_size(&mut self, width: f64, height: f64, max_zoom: f64) {
        if self.destroyed {
            return;
        }
        let previous = self.config.clone();
        self.config.width = Some(width);
        self.config.height = Some(height);
        self.config.max_zoom = max_zoom;
        self.config.adjust_dimensions();
        if let Err(err) = self.config.validate() {
            log_warn!(LogComponent::Plot, "Ignoring resize: {}", err);
            self.config = previous;
            return;
        }

        let extent = self.config.zoom_extent();
        self.viewport.set_extent(extent);
        self.gesture.set_extent(extent);
        self.rescale_plot();
        self.dispatcher.publish_plot_event(PlotEvent::Resized {
            width: self.config.width_px(),
            height: self.config.height_px(),
        });

        let (scale, position) = (self.viewport.scale(), self.viewport.position());
        self.set_zoom_and_move(scale, position, false, false, false);
    }

    /// Remove tooltips and every created element. Later calls do nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        for tooltip in [&self.needle_tooltip, &self.site_tooltip] {
            tooltip.borrow_mut().remove();
        }
        self.scene.clear();
        self.executor.clear();
        self.dispatcher.clear();
        self.current = None;
        self.hovered = None;
        self.destroyed = true;
        log_debug!(LogComponent::Plot, "Plot destroyed");
    }

    // --- pointer input; x and y relative to the plot's top-left corner ---

    /// Show the tooltip of the element under the pointer and fan out
    /// overlapping heads. `client` is the pointer in page coordinates.
    pub fn pointer_move(&mut self, x: f64, y: f64, client: PointerPosition) {
        if self.destroyed || self.gesture.is_dragging() {
            return;
        }
        let hit = self.current.as_ref().and_then(|frame| frame.hit_test(x, y));
        if hit == self.hovered {
            if let Some((kind, _)) = hit {
                self.tooltip(kind).borrow_mut().move_to_pointer(client);
            }
            return;
        }
        if let Some((kind, _)) = self.hovered.take() {
            self.tooltip(kind).borrow_mut().hide();
        }
        if let Some((kind, id)) = hit {
            let target = self.target(kind, id);
            self.tooltip(kind).borrow_mut().show(&target, client);
            if kind == TargetKind::Needle {
                self.fan_out(id);
            }
        }
        self.hovered = hit;
    }

    pub fn pointer_leave(&mut self) {
        if let Some((kind, _)) = self.hovered.take() {
            self.tooltip(kind).borrow_mut().hide();
        }
    }

    /// Spread the heads sharing the location of needle `id`.
    pub fn fan_out(&mut self, id: usize) {
        let Some(key) = self.config.data.mutations.iter().find(|m| m.id == id).map(|m| m.head_key()) else {
            return;
        };
        let params = scene_params!(self);
        let Some(count) = self.scene.fan_out(&key, &params) else {
            return;
        };
        let frame = self.scene.frame(&params);
        self.present(frame, true);
        self.dispatcher.publish_plot_event(PlotEvent::HeadsFannedOut {
            position: key.pos(),
            value: key.value(),
            count,
        });
    }

    pub fn wheel(&mut self, x: f64, delta_y: f64, mode: DeltaMode) {
        let x = x - self.config.paddings.left;
        if let Some(tick) = self.gesture.wheel(x, delta_y, mode) {
            self.apply_gesture(tick);
        }
    }

    pub fn double_click(&mut self, x: f64, shift: bool) {
        let x = x - self.config.paddings.left;
        if let Some(tick) = self.gesture.double_click(x, shift) {
            self.apply_gesture(tick);
        }
    }

    pub fn drag_start(&mut self, x: f64) {
        self.pointer_leave();
        self.gesture.drag_start(x - self.config.paddings.left);
    }

    pub fn drag_move(&mut self, x: f64) {
        if let Some(tick) = self.gesture.drag_move(x - self.config.paddings.left) {
            self.apply_gesture(tick);
        }
    }

    pub fn drag_end(&mut self) {
        self.gesture.drag_end();
    }

    /// Gesture steps go through the clamped combined primitive with
    /// callbacks and without animation.
    fn apply_gesture(&mut self, tick: ZoomTick) {
        if self.destroyed {
            return;
        }
        self.set_zoom_and_move(tick.scale, tick.translate, false, true, false);
    }

    // --- re-sync ---

    /// Zoom-independent layout: unit, ranges, needles and sites.
    fn rescale_plot(&mut self) {
        self.transform = CoordinateTransform::new(self.config.plot_width(), self.config.sequence_length);
        self.x_axis.scale.set_range(0.0, self.config.plot_width());
        self.y_axis.scale.set_range(self.config.baseline(), self.config.paddings.top);
        self.x_axis.set_tick_size(self.config.site_height + 3.0);
        let params = scene_params!(self);
        self.scene.layout(&params);
    }

    /// Bring axes and content in line with the viewport, present the frame
    /// and notify subscribers.
    fn refresh(&mut self, animate: bool) {
        if self.destroyed {
            return;
        }
        let scale = self.viewport.scale();
        let aa_position = self.get_aa_position();
        self.x_axis.move_to(aa_position, scale);
        self.x_axis.set_tick_count(services::ticks_for(scale, self.config.max_zoom));

        let params = scene_params!(self);
        self.scene.adjust(&params);
        let frame = self.scene.frame(&params);
        self.present(frame, animate);
        self.gesture.sync(scale, self.viewport.position());

        log_viewport(&self.viewport, aa_position, animate);
        self.dispatcher.publish_plot_event(PlotEvent::ViewportChanged {
            scale,
            position: self.viewport.position(),
            aa_position,
            animated: animate,
        });
    }

    fn present(&mut self, frame: SceneFrame, animate: bool) {
        let transition = if animate && self.config.animations_speed > 0.0 {
            Transition::animated(frame.clone(), self.config.animations_speed)
        } else {
            Transition::immediate(frame.clone())
        };
        self.executor.run(transition);
        self.current = Some(frame);
    }
}

/// X axis over the whole sequence; y axis over the magnitudes, linear from
/// zero or logarithmic from the smallest nonzero value.
fn create_axes(config: &PlotConfig) -> (Axis, Axis) {
    let (min, max) = config.y_bounds();
    let (start, end) = services::y_domain(config.use_log, min, max, &config.data.mutations);
    let mut y_axis = Axis::new(if config.use_log { AxisScale::log() } else { AxisScale::linear() });
    y_axis.set_domain(start, end);
    y_axis.scale.nice();

    let mut x_axis = Axis::new(AxisScale::linear());
    x_axis.set_domain(0.0, config.sequence_length);
    (x_axis, y_axis)
}
