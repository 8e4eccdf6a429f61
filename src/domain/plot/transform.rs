//! Conversions between the three horizontal coordinate spaces:
//!
//! - sequence position: residue index along the protein, stable across
//!   zoom and pan;
//! - pixel offset: sequence position times `unit`, independent of zoom;
//! - screen offset: pixel offset after the current zoom and pan, the value
//!   stored as the viewport position (0 or negative).

/// Pixels per sequence position, fixed for a given plot width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    unit: f64,
}

impl CoordinateTransform {
    pub fn new(plot_width: f64, sequence_length: f64) -> Self {
        Self { unit: plot_width / sequence_length }
    }

    pub fn unit(&self) -> f64 {
        self.unit
    }

    pub fn position_to_pixel(&self, pos: f64) -> f64 {
        pos * self.unit
    }

    /// Sequence position shown at the left edge for a given screen offset.
    pub fn pixel_to_sequence_position(&self, screen_offset: f64, scale: f64) -> f64 {
        -(screen_offset / self.unit) / scale
    }

    /// Screen offset that puts `pos` at the left edge.
    pub fn sequence_position_to_screen_offset(&self, pos: f64, scale: f64) -> f64 {
        self.position_to_pixel(-pos) * scale
    }

    /// Leftmost allowed screen offset for a domain shift limit
    /// (see [`Axis::shift_limit`](super::axis::Axis::shift_limit)).
    pub fn pan_boundary(&self, shift_limit: f64, scale: f64) -> f64 {
        self.position_to_pixel(shift_limit) * scale
    }
}
