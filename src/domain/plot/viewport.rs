use serde::Serialize;

/// Allowed zoom range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomExtent {
    pub min: f64,
    pub max: f64,
}

impl ZoomExtent {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a requested scale into the extent; `None` for NaN or infinite
    /// requests, which are ignored.
    pub fn clamp(&self, scale: f64) -> Option<f64> {
        scale.is_finite().then(|| scale.clamp(self.min, self.max))
    }
}

/// What is visible: zoom factor and horizontal screen offset.
///
/// `position` always lies in `[boundary, 0]` where the boundary depends on
/// the scale, so the sequence never scrolls past either end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportState {
    scale: f64,
    position: f64,
    extent: ZoomExtent,
}

impl ViewportState {
    pub fn new(extent: ZoomExtent) -> Self {
        let scale = extent.clamp(1.0).unwrap_or(extent.min);
        Self { scale, position: 0.0, extent }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn extent(&self) -> ZoomExtent {
        self.extent
    }

    pub fn set_extent(&mut self, extent: ZoomExtent) {
        self.extent = extent;
    }

    /// Store a new scale, clamped into the extent. Returns `false` when the
    /// request was ignored or did not change anything.
    pub fn set_scale(&mut self, requested: f64) -> bool {
        match self.extent.clamp(requested) {
            Some(scale) if scale != self.scale => {
                self.scale = scale;
                true
            }
            _ => false,
        }
    }

    /// Store a new position clamped into `[boundary, 0]`. NaN is ignored.
    /// Returns `false` when nothing changed.
    pub fn set_position(&mut self, requested: f64, boundary: f64) -> bool {
        let Some(position) = clamp_position(requested, boundary) else {
            return false;
        };
        let changed = position != self.position;
        self.position = position;
        changed
    }
}

/// Positions right of the sequence start clamp to 0, positions past the
/// boundary clamp to it.
pub fn clamp_position(requested: f64, boundary: f64) -> Option<f64> {
    if requested.is_nan() {
        None
    } else if requested > 0.0 {
        Some(0.0)
    } else if requested < boundary {
        Some(boundary)
    } else {
        Some(requested)
    }
}
