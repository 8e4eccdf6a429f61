//! Continuous scales mapping a domain value to a pixel coordinate.
//!
//! Both scales follow the classic d3 (v3) behavior the plot was designed
//! around: optional clamping, `nice()` rounding of the domain and
//! "human" tick values.

/// Linear scale `[d0, d1] -> [r0, r1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
    clamp: bool,
}

impl Default for LinearScale {
    fn default() -> Self {
        Self { domain: [0.0, 1.0], range: [0.0, 1.0], clamp: false }
    }
}

/// Normalized position of `x` in `[a, b]`. A degenerate span maps to 0.
fn normalize(x: f64, a: f64, b: f64) -> f64 {
    let span = b - a;
    if span == 0.0 { 0.0 } else { (x - a) / span }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Step between ticks for roughly `count` ticks over `[start, stop]`.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (lo, hi) = if start <= stop { (start, stop) } else { (stop, start) };
    let span = hi - lo;
    if !(span > 0.0) || !span.is_finite() || count == 0 {
        return 0.0;
    }
    let count = count as f64;
    let mut step = 10f64.powf((span / count).log10().floor());
    let err = count / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }
    step
}

/// Multiples of `step` inside `[lo, hi]`, computed from integer indices so
/// decimal steps do not accumulate rounding error.
fn ticks_with_step(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) {
        return if lo.is_finite() { vec![lo] } else { Vec::new() };
    }
    let first = (lo / step).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    let inverse = if step < 1.0 { Some((1.0 / step).round()) } else { None };
    (first..=last)
        .map(|k| match inverse {
            Some(inv) => k as f64 / inv,
            None => k as f64 * step,
        })
        .collect()
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range, clamp: false }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    pub fn set_domain(&mut self, start: f64, end: f64) {
        self.domain = [start, end];
    }

    pub fn set_range(&mut self, start: f64, end: f64) {
        self.range = [start, end];
    }

    pub fn set_clamp(&mut self, clamp: bool) {
        self.clamp = clamp;
    }

    pub fn apply(&self, x: f64) -> f64 {
        let mut t = normalize(x, self.domain[0], self.domain[1]);
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        lerp(self.range[0], self.range[1], t)
    }

    pub fn invert(&self, y: f64) -> f64 {
        let mut t = normalize(y, self.range[0], self.range[1]);
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        lerp(self.domain[0], self.domain[1], t)
    }

    pub fn tick_step(&self, count: usize) -> f64 {
        tick_step(self.domain[0], self.domain[1], count)
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let [d0, d1] = self.domain;
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        ticks_with_step(lo, hi, self.tick_step(count))
    }

    /// Extend the domain to multiples of the tick step.
    pub fn nice(&mut self, count: usize) {
        // Two passes: the first rounding can change the step.
        for _ in 0..2 {
            let step = self.tick_step(count);
            if !(step > 0.0) {
                return;
            }
            let [d0, d1] = self.domain;
            if d0 <= d1 {
                self.domain = [(d0 / step).floor() * step, (d1 / step).ceil() * step];
            } else {
                self.domain = [(d0 / step).ceil() * step, (d1 / step).floor() * step];
            }
        }
    }
}

/// Base-10 logarithmic scale. The domain must be strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct LogScale {
    domain: [f64; 2],
    linear: LinearScale,
}

impl Default for LogScale {
    fn default() -> Self {
        Self::new([1.0, 10.0], [0.0, 1.0])
    }
}

impl LogScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        let linear = LinearScale::new([domain[0].log10(), domain[1].log10()], range);
        Self { domain, linear }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.linear.range()
    }

    pub fn set_domain(&mut self, start: f64, end: f64) {
        self.domain = [start, end];
        self.linear.set_domain(start.log10(), end.log10());
    }

    pub fn set_range(&mut self, start: f64, end: f64) {
        self.linear.set_range(start, end);
    }

    pub fn set_clamp(&mut self, clamp: bool) {
        self.linear.set_clamp(clamp);
    }

    pub fn apply(&self, x: f64) -> f64 {
        self.linear.apply(x.log10())
    }

    pub fn invert(&self, y: f64) -> f64 {
        10f64.powf(self.linear.invert(y))
    }

    /// Round the domain out to whole powers of ten.
    pub fn nice(&mut self) {
        let [d0, d1] = self.domain;
        let (lo, hi) = (d0.log10(), d1.log10());
        let (lo, hi) = if lo <= hi { (lo.floor(), hi.ceil()) } else { (lo.ceil(), hi.floor()) };
        self.set_domain(10f64.powf(lo), 10f64.powf(hi));
    }

    /// `k * 10^i` for `k` in `1..10`, restricted to the domain.
    pub fn ticks(&self) -> Vec<f64> {
        let [d0, d1] = self.domain;
        let (u, v) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        let (lo, hi) = (u.log10(), v.log10());
        if !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        let (first, last) = (lo.floor() as i32, hi.ceil() as i32);
        let mut ticks = Vec::new();
        for exponent in first..last {
            let power = 10f64.powi(exponent);
            for k in 1..10 {
                ticks.push(power * k as f64);
            }
        }
        ticks.push(10f64.powi(last));
        let tolerance = 1e-12;
        ticks.retain(|t| *t >= u * (1.0 - tolerance) && *t <= v * (1.0 + tolerance));
        ticks
    }
}

/// Scale adapter used by both axes.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisScale {
    Linear(LinearScale),
    Log(LogScale),
}

impl Default for AxisScale {
    fn default() -> Self {
        AxisScale::Linear(LinearScale::default())
    }
}

impl AxisScale {
    pub fn linear() -> Self {
        AxisScale::Linear(LinearScale::default())
    }

    pub fn log() -> Self {
        AxisScale::Log(LogScale::default())
    }

    pub fn is_log(&self) -> bool {
        matches!(self, AxisScale::Log(_))
    }

    pub fn apply(&self, x: f64) -> f64 {
        match self {
            AxisScale::Linear(s) => s.apply(x),
            AxisScale::Log(s) => s.apply(x),
        }
    }

    pub fn invert(&self, y: f64) -> f64 {
        match self {
            AxisScale::Linear(s) => s.invert(y),
            AxisScale::Log(s) => s.invert(y),
        }
    }

    pub fn domain(&self) -> [f64; 2] {
        match self {
            AxisScale::Linear(s) => s.domain(),
            AxisScale::Log(s) => s.domain(),
        }
    }

    pub fn range(&self) -> [f64; 2] {
        match self {
            AxisScale::Linear(s) => s.range(),
            AxisScale::Log(s) => s.range(),
        }
    }

    pub fn set_domain(&mut self, start: f64, end: f64) {
        match self {
            AxisScale::Linear(s) => s.set_domain(start, end),
            AxisScale::Log(s) => s.set_domain(start, end),
        }
    }

    pub fn set_range(&mut self, start: f64, end: f64) {
        match self {
            AxisScale::Linear(s) => s.set_range(start, end),
            AxisScale::Log(s) => s.set_range(start, end),
        }
    }

    pub fn set_clamp(&mut self, clamp: bool) {
        match self {
            AxisScale::Linear(s) => s.set_clamp(clamp),
            AxisScale::Log(s) => s.set_clamp(clamp),
        }
    }

    pub fn nice(&mut self) {
        match self {
            AxisScale::Linear(s) => s.nice(10),
            AxisScale::Log(s) => s.nice(),
        }
    }

    /// Tick values; `count` is a hint ignored by the log scale.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            AxisScale::Linear(s) => s.ticks(count),
            AxisScale::Log(s) => s.ticks(),
        }
    }

    /// Tick spacing for label precision (linear scales only).
    pub fn tick_step(&self, count: usize) -> Option<f64> {
        match self {
            AxisScale::Linear(s) => Some(s.tick_step(count)),
            AxisScale::Log(_) => None,
        }
    }
}
