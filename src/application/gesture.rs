//! Wheel, drag and double-click zoom gesture.
//!
//! Tracks its own `(scale, translate)` pair like a classic d3 zoom behavior:
//! every gesture step keeps the point under the pointer fixed and yields a
//! [`ZoomTick`] the plot applies (with clamping). The plot writes the clamped
//! result back through [`ZoomGesture::sync`].

use crate::domain::plot::ZoomExtent;

/// One gesture step: requested scale and horizontal translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTick {
    pub scale: f64,
    pub translate: f64,
}

/// Wheel delta units (`WheelEvent.deltaMode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => DeltaMode::Line,
            2 => DeltaMode::Page,
            _ => DeltaMode::Pixel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    /// Content location grabbed at drag start
    anchor: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoomGesture {
    scale: f64,
    translate: f64,
    extent: ZoomExtent,
    drag: Option<DragState>,
}

impl ZoomGesture {
    pub fn new(extent: ZoomExtent) -> Self {
        Self { scale: extent.clamp(1.0).unwrap_or(extent.min), translate: 0.0, extent, drag: None }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> f64 {
        self.translate
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn set_extent(&mut self, extent: ZoomExtent) {
        self.extent = extent;
    }

    /// Adopt the plot's (clamped) state.
    pub fn sync(&mut self, scale: f64, translate: f64) {
        self.scale = scale;
        self.translate = translate;
    }

    /// Content location under a pointer x.
    fn location(&self, pointer_x: f64) -> f64 {
        (pointer_x - self.translate) / self.scale
    }

    /// Scale around `pointer_x`, keeping what is under it in place.
    fn zoom_around(&mut self, pointer_x: f64, requested: f64) -> Option<ZoomTick> {
        let anchor = self.location(pointer_x);
        self.scale = self.extent.clamp(requested)?;
        self.translate = pointer_x - anchor * self.scale;
        Some(self.tick())
    }

    fn tick(&self) -> ZoomTick {
        ZoomTick { scale: self.scale, translate: self.translate }
    }

    /// Wheel step; negative `delta_y` (scrolling up) zooms in.
    pub fn wheel(&mut self, pointer_x: f64, delta_y: f64, mode: DeltaMode) -> Option<ZoomTick> {
        let delta = -delta_y * if mode == DeltaMode::Pixel { 1.0 } else { 120.0 };
        let requested = self.scale * 2f64.powf(delta * 0.002);
        self.zoom_around(pointer_x, requested)
    }

    /// Zoom to the next power of two (the previous one with `shift`).
    pub fn double_click(&mut self, pointer_x: f64, shift: bool) -> Option<ZoomTick> {
        let k = self.scale.log2();
        let exponent = if shift { k.ceil() - 1.0 } else { k.floor() + 1.0 };
        self.zoom_around(pointer_x, 2f64.powf(exponent))
    }

    pub fn drag_start(&mut self, pointer_x: f64) {
        self.drag = Some(DragState { anchor: self.location(pointer_x) });
    }

    /// Pan so the grabbed location follows the pointer.
    pub fn drag_move(&mut self, pointer_x: f64) -> Option<ZoomTick> {
        let drag = self.drag?;
        let translate = pointer_x - drag.anchor * self.scale;
        if !translate.is_finite() {
            return None;
        }
        self.translate = translate;
        Some(self.tick())
    }

    pub fn drag_end(&mut self) {
        self.drag = None;
    }
}
