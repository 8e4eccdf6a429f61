use super::entities::Mutation;

/// X-axis tick density: denser labels once fully zoomed in.
pub fn ticks_for(scale: f64, max_zoom: f64) -> usize {
    if scale == max_zoom { 20 } else { 10 }
}

/// Head radius in content units. The content group is stretched by
/// `scale`, so dividing by it keeps heads the same size on screen.
pub fn head_radius(unit: f64, head_size: f64, scale: f64) -> f64 {
    unit / 2.0 * (head_size / scale)
}

/// Horizontal room given to each head when a cluster fans out.
pub fn width_per_head(unit: f64, head_size: f64, scale: f64) -> f64 {
    unit * (head_size / scale)
}

/// Offsets spreading `count` heads side by side, centered on the needle.
pub fn fan_out_offsets(count: usize, width_per_head: f64) -> Vec<f64> {
    let width = count as f64 * width_per_head;
    let first = width_per_head / 2.0 - width / 2.0;
    (0..count).map(|i| first + i as f64 * width_per_head).collect()
}

/// Minimum and maximum magnitude; `None` without mutations.
pub fn magnitude_extent(mutations: &[Mutation]) -> Option<(f64, f64)> {
    mutations.iter().map(|m| m.value).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Lower bound usable on a log axis: an exact zero minimum is replaced by
/// the smallest nonzero magnitude, or by a tiny epsilon if there is none.
pub fn log_floor(min: f64, mutations: &[Mutation]) -> f64 {
    if min != 0.0 {
        return min;
    }
    mutations
        .iter()
        .map(|m| m.value)
        .filter(|v| *v != 0.0)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))))
        .unwrap_or(f64::MIN_POSITIVE)
}

/// Y domain before `nice()`.
///
/// Linear axes start at zero. Log axes start at the (floored) minimum and
/// never get a non-positive maximum.
pub fn y_domain(use_log: bool, min: Option<f64>, max: Option<f64>, mutations: &[Mutation]) -> (f64, f64) {
    if use_log {
        let floor = log_floor(min.unwrap_or(0.0), mutations);
        let floor = if floor > 0.0 { floor } else { f64::MIN_POSITIVE };
        let top = match max {
            Some(max) if max > 0.0 => max,
            _ => 1.0,
        };
        (floor, top.max(floor))
    } else {
        (0.0, max.unwrap_or(1.0))
    }
}

/// Digits after the decimal point needed to tell ticks `step` apart.
pub fn precision_for_step(step: f64) -> usize {
    if !(step > 0.0) {
        return 0;
    }
    (-(step.log10() + 0.01).floor()).max(0.0) as usize
}

/// Fixed-point formatting with `,` thousands separators.
pub fn format_grouped(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };
    let mut grouped = String::new();
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    if negative { format!("-{}", grouped) } else { grouped }
}

/// Label for a linear y tick; only whole counts are labelled.
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 { format!("{}", value as i64) } else { String::new() }
}

/// Label for a log y tick holding a percentage; small values get more digits.
pub fn format_percent(value: f64) -> String {
    let fraction = value / 100.0;
    let precision = if fraction < 0.0001 {
        3
    } else if fraction < 0.001 {
        2
    } else if fraction < 0.01 {
        1
    } else {
        0
    };
    format!("{:.*}%", precision, value)
}

/// Every how many log ticks a label is drawn, so labels stay about 40px apart.
pub fn log_ticks_per_label(tick_count: usize, axis_height: f64) -> usize {
    let slots = axis_height / 40.0;
    if tick_count as f64 > slots && slots > 0.0 {
        ((tick_count as f64 / slots).round() as usize).max(1)
    } else {
        1
    }
}
