use hecs::World;

use super::components::{Marker, Needle, NeedleHead, NeedleLine, SiteBox};
use crate::domain::plot::{AxisScale, CoordinateTransform, HeadKey, services};

/// Place needle stems: from the magnitude down to the site track.
pub fn layout_needles(world: &mut World, transform: &CoordinateTransform, y: &AxisScale, baseline: f64) {
    let stroke_width = transform.position_to_pixel(1.0) / 2.0;
    for (_, (needle, line)) in world.query_mut::<(&Needle, &mut NeedleLine)>() {
        line.x = transform.position_to_pixel(needle.pos);
        line.y1 = y.apply(needle.value);
        line.y2 = baseline;
        line.stroke_width = stroke_width;
    }
}

/// Place site boxes on the site track below the plot.
pub fn layout_sites(world: &mut World, transform: &CoordinateTransform, baseline: f64, site_height: f64) {
    let one = transform.position_to_pixel(1.0);
    for (_, site) in world.query_mut::<&mut SiteBox>() {
        site.x = transform.position_to_pixel(site.start);
        site.y = baseline;
        site.width = transform.position_to_pixel(site.end - site.start);
        site.height = site_height;
        site.stroke_width = one / 10.0;
        // shift by -2: half the marker height, so it rests on the box
        site.marker = Marker {
            tx: transform.position_to_pixel((site.end - site.start) / 2.0),
            ty: -2.0,
            sx: one,
            sy: 4.0,
        };
    }
}

/// Size heads for the current zoom and collapse any fan-out.
pub fn adjust_heads(world: &mut World, unit: f64, head_size: f64, scale: f64, y: &AxisScale) {
    let radius = services::head_radius(unit, head_size, scale);
    for (_, (needle, head)) in world.query_mut::<(&Needle, &mut NeedleHead)>() {
        head.dx = 0.0;
        head.cy = y.apply(needle.value);
        head.sy = scale;
        head.radius = radius;
        if let Some(label) = head.count.as_mut() {
            label.font_size = radius * 2.0;
            label.dx = -radius / 2.0;
            label.dy = radius / 2.0;
        }
    }
}

/// Spread the heads at `key` by the given offsets, in id order.
/// Returns how many heads moved.
pub fn fan_out_heads(world: &mut World, key: &HeadKey, members: &[usize], offsets: &[f64]) -> usize {
    let mut moved = 0;
    for (_, (needle, head)) in world.query_mut::<(&Needle, &mut NeedleHead)>() {
        if head.key != *key {
            continue;
        }
        if let Some(slot) = members.iter().position(|id| *id == needle.id) {
            if let Some(offset) = offsets.get(slot) {
                head.dx = *offset;
                moved += 1;
            }
        }
    }
    moved
}
