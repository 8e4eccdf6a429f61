use super::scale::AxisScale;

pub const DEFAULT_TICK_COUNT: usize = 10;

/// An axis: a scale plus the full data domain `[start, end]` it was set up
/// with. The x axis moves its visible domain as the plot pans and zooms.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub scale: AxisScale,
    start: f64,
    end: f64,
    tick_count: usize,
    tick_size: f64,
}

impl Axis {
    pub fn new(scale: AxisScale) -> Self {
        Self { scale, start: 0.0, end: 0.0, tick_count: DEFAULT_TICK_COUNT, tick_size: 6.0 }
    }

    /// Set the full domain. The scale clamps to it from now on.
    pub fn set_domain(&mut self, start: f64, end: f64) {
        self.start = start;
        self.end = end;
        self.scale.set_domain(start, end);
        self.scale.set_clamp(true);
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Span of the domain visible at the given zoom.
    pub fn coverage(&self, zoom: f64) -> f64 {
        self.end / zoom
    }

    /// Show `[start_pos, start_pos + coverage]`.
    pub fn move_to(&mut self, start_pos: f64, zoom: f64) {
        self.scale.set_domain(start_pos, start_pos + self.coverage(zoom));
    }

    /// How far (in domain units, negative) the view may shift before the
    /// domain end would scroll past the right edge.
    pub fn shift_limit(&self, zoom: f64) -> f64 {
        self.coverage(zoom) - self.end
    }

    pub fn tick_count(&self) -> usize {
        self.tick_count
    }

    pub fn set_tick_count(&mut self, count: usize) {
        self.tick_count = count;
    }

    pub fn tick_size(&self) -> f64 {
        self.tick_size
    }

    pub fn set_tick_size(&mut self, size: f64) {
        self.tick_size = size;
    }

    pub fn ticks(&self) -> Vec<f64> {
        self.scale.ticks(self.tick_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x_axis() -> Axis {
        let mut axis = Axis::new(AxisScale::linear());
        axis.scale.set_range(0.0, 505.0);
        axis.set_domain(0.0, 393.0);
        axis
    }

    #[test]
    fn coverage_shrinks_with_zoom() {
        let axis = x_axis();
        assert_eq!(axis.coverage(1.0), 393.0);
        assert_eq!(axis.coverage(3.0), 131.0);
        assert_eq!(axis.shift_limit(1.0), 0.0);
        assert_eq!(axis.shift_limit(3.0), -262.0);
    }

    #[test]
    fn move_to_keeps_full_domain_for_limits() {
        let mut axis = x_axis();
        axis.move_to(100.0, 3.0);
        assert_eq!(axis.scale.domain(), [100.0, 231.0]);
        assert_eq!(axis.end(), 393.0);
        assert_eq!(axis.shift_limit(3.0), -262.0);
    }
}
