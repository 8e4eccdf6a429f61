//! Scene synchronization: turns the viewport state into positioned visual
//! elements and a declarative [`SceneFrame`] the renderer draws.
//!
//! Everything below the content group (needles, heads, sites) lives in
//! content coordinates: x in pixels at zoom 1, y in pixels. The content group
//! is drawn with `translate(position, 0) scale(scale, 1)` inside the padded
//! area, so y is never zoomed.

use serde::Serialize;

use super::config::PlotConfig;
use crate::domain::{
    plot::{Axis, CoordinateTransform, HeadGroups, HeadKey, Paddings, PlotData, ViewportState, services},
    tooltip::TargetKind,
};
use crate::ecs::{
    SceneGraph,
    components::{Needle, NeedleHead, NeedleLine, SiteBox},
    systems,
};

/// Zoom and pan applied to the content group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContentTransform {
    pub translate_x: f64,
    pub scale_x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeedleSprite {
    pub id: usize,
    pub background: bool,
    pub line: NeedleLine,
    pub head: NeedleHead,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    /// Pixel offset along the axis
    pub offset: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisGeometry {
    pub domain: [f64; 2],
    pub range: [f64; 2],
    pub tick_size: f64,
    /// Requested tick density; the scale may return fewer nice ticks.
    pub tick_count: usize,
    pub ticks: Vec<Tick>,
}

/// Axis caption, positioned inside the padded area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Extra downward shift in ems
    pub dy_em: f64,
    pub rotation_deg: f64,
}

/// Everything needed to draw the plot once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneFrame {
    pub width: f64,
    pub height: f64,
    pub paddings: Paddings,
    pub content: ContentTransform,
    pub needles: Vec<NeedleSprite>,
    pub sites: Vec<SiteBox>,
    /// Drawn at `translate(0, baseline)` in the padded area
    pub x_axis: AxisGeometry,
    pub y_axis: AxisGeometry,
    pub x_legend: Option<LegendLabel>,
    pub y_legend: Option<LegendLabel>,
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

impl SceneFrame {
    /// Frame shown at progress `t` (already eased) of a transition from
    /// `self` to `target`. Elements present in both frames are blended; the
    /// rest is taken from `target`.
    pub fn interpolate(&self, target: &SceneFrame, t: f64) -> SceneFrame {
        let mut frame = target.clone();
        frame.content = ContentTransform {
            translate_x: lerp(self.content.translate_x, target.content.translate_x, t),
            scale_x: lerp(self.content.scale_x, target.content.scale_x, t),
        };

        if self.needles.len() == target.needles.len() {
            for (sprite, from) in frame.needles.iter_mut().zip(&self.needles) {
                if sprite.id != from.id {
                    continue;
                }
                let to = sprite.clone();
                sprite.line.y1 = lerp(from.line.y1, to.line.y1, t);
                sprite.line.stroke_width = lerp(from.line.stroke_width, to.line.stroke_width, t);
                sprite.head.dx = lerp(from.head.dx, to.head.dx, t);
                sprite.head.cy = lerp(from.head.cy, to.head.cy, t);
                sprite.head.sy = lerp(from.head.sy, to.head.sy, t);
                sprite.head.radius = lerp(from.head.radius, to.head.radius, t);
                if let (Some(label), Some(old)) = (sprite.head.count.as_mut(), from.head.count.as_ref()) {
                    label.font_size = lerp(old.font_size, label.font_size, t);
                    label.dx = lerp(old.dx, label.dx, t);
                    label.dy = lerp(old.dy, label.dy, t);
                }
            }
        }

        if self.sites.len() == target.sites.len() {
            for (site, from) in frame.sites.iter_mut().zip(&self.sites) {
                site.stroke_width = lerp(from.stroke_width, site.stroke_width, t);
            }
        }

        // Ticks of the target, sliding with the blended domain
        let [d0, d1] = [
            lerp(self.x_axis.domain[0], target.x_axis.domain[0], t),
            lerp(self.x_axis.domain[1], target.x_axis.domain[1], t),
        ];
        let [r0, r1] = target.x_axis.range;
        if d1 != d0 {
            frame.x_axis.domain = [d0, d1];
            frame.x_axis.ticks = target
                .x_axis
                .ticks
                .iter()
                .map(|tick| Tick { offset: r0 + (tick.value - d0) / (d1 - d0) * (r1 - r0), ..tick.clone() })
                .filter(|tick| tick.offset >= r0.min(r1) - 1e-6 && tick.offset <= r0.max(r1) + 1e-6)
                .collect();
        }
        frame
    }

    /// Screen x of the content origin.
    fn content_origin(&self) -> f64 {
        self.paddings.left + self.content.translate_x
    }

    /// Element under a point given relative to the plot's top-left corner.
    /// Sites are drawn last and win over needles; later needles win over
    /// earlier ones.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<(TargetKind, usize)> {
        if x < self.paddings.left {
            return None;
        }
        let origin = self.content_origin();
        let scale = self.content.scale_x;

        for site in self.sites.iter().rev() {
            let left = origin + site.x * scale;
            let right = left + site.width * scale;
            let top = site.y - site.marker.sy;
            let bottom = site.y + site.height;
            if x >= left && x <= right && y >= top && y <= bottom {
                return Some((TargetKind::Site, site.index));
            }
        }

        for needle in self.needles.iter().rev() {
            let head = &needle.head;
            let cx = origin + (needle.line.x + head.dx) * scale;
            let r = head.radius * scale;
            let (ddx, ddy) = (x - cx, y - head.cy);
            if ddx * ddx + ddy * ddy <= r * r {
                return Some((TargetKind::Needle, needle.id));
            }
        }

        for needle in self.needles.iter().rev() {
            let line = &needle.line;
            let lx = origin + line.x * scale;
            let tolerance = (line.stroke_width * scale / 2.0).max(2.0);
            if (x - lx).abs() <= tolerance && y >= line.y1 && y <= line.y2 {
                return Some((TargetKind::Needle, needle.id));
            }
        }
        None
    }

    pub fn needle(&self, id: usize) -> Option<&NeedleSprite> {
        self.needles.iter().find(|n| n.id == id)
    }
}

/// Inputs of one synchronization pass.
pub struct SceneParams<'a> {
    pub config: &'a PlotConfig,
    pub transform: &'a CoordinateTransform,
    pub viewport: &'a ViewportState,
    pub x_axis: &'a Axis,
    pub y_axis: &'a Axis,
}

/// Keeps the scene graph in step with the viewport.
pub struct SceneSynchronizer {
    graph: SceneGraph,
    groups: HeadGroups,
    fanned_out: Option<HeadKey>,
}

impl SceneSynchronizer {
    /// Create one entity per mutation and site. `data` must already carry ids.
    pub fn new(data: &PlotData, config: &PlotConfig) -> Self {
        let groups = HeadGroups::from_mutations(&data.mutations);
        let mut graph = SceneGraph::new();
        for mutation in &data.mutations {
            let fill = config.color_for(mutation.category.as_deref());
            graph.spawn_needle(mutation, fill, groups.overlap_count(&mutation.head_key()));
        }
        for (index, site) in data.sites.iter().enumerate() {
            graph.spawn_site(index, site);
        }
        Self { graph, groups, fanned_out: None }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn head_groups(&self) -> &HeadGroups {
        &self.groups
    }

    pub fn fanned_out(&self) -> Option<HeadKey> {
        self.fanned_out
    }

    /// Zoom-independent placement; run after construction and resizes.
    pub fn layout(&mut self, params: &SceneParams) {
        let baseline = params.config.baseline();
        systems::layout_needles(&mut self.graph.world, params.transform, &params.y_axis.scale, baseline);
        systems::layout_sites(&mut self.graph.world, params.transform, baseline, params.config.site_height);
    }

    /// Zoom-dependent sizing; collapses a fanned-out cluster.
    pub fn adjust(&mut self, params: &SceneParams) {
        systems::adjust_heads(
            &mut self.graph.world,
            params.transform.unit(),
            params.config.head_size,
            params.viewport.scale(),
            &params.y_axis.scale,
        );
        self.fanned_out = None;
    }

    /// Spread the cluster at `key` side by side. Returns the cluster size,
    /// or `None` when there is nothing to spread or it is already spread.
    pub fn fan_out(&mut self, key: &HeadKey, params: &SceneParams) -> Option<usize> {
        if !self.groups.is_overlapping(key) || self.fanned_out == Some(*key) {
            return None;
        }
        if self.fanned_out.is_some() {
            self.adjust(params);
        }
        let members = self.groups.members(key).to_vec();
        let width = services::width_per_head(
            params.transform.unit(),
            params.config.head_size,
            params.viewport.scale(),
        );
        let offsets = services::fan_out_offsets(members.len(), width);
        systems::fan_out_heads(&mut self.graph.world, key, &members, &offsets);
        self.fanned_out = Some(*key);
        Some(members.len())
    }

    pub fn frame(&self, params: &SceneParams) -> SceneFrame {
        let config = params.config;
        let mut needles: Vec<NeedleSprite> = self
            .graph
            .world
            .query::<(&Needle, &NeedleLine, &NeedleHead)>()
            .iter()
            .map(|(_, (needle, line, head))| NeedleSprite {
                id: needle.id,
                background: needle.background,
                line: line.clone(),
                head: head.clone(),
            })
            .collect();
        needles.sort_by_key(|n| n.id);

        let mut sites: Vec<SiteBox> =
            self.graph.world.query::<&SiteBox>().iter().map(|(_, site)| site.clone()).collect();
        sites.sort_by_key(|s| s.index);

        SceneFrame {
            width: config.width_px(),
            height: config.height_px(),
            paddings: config.paddings,
            content: ContentTransform {
                translate_x: params.viewport.position(),
                scale_x: params.viewport.scale(),
            },
            needles,
            sites,
            x_axis: x_axis_geometry(params.x_axis, config.site_height + 3.0),
            y_axis: y_axis_geometry(params.y_axis, config.height_px()),
            x_legend: config.legends.x.clone().map(|text| LegendLabel {
                text,
                x: (config.width_px() - config.paddings.left) / 2.0,
                y: config.baseline(),
                dy_em: 3.0,
                rotation_deg: 0.0,
            }),
            y_legend: config.legends.y.clone().map(|text| LegendLabel {
                text,
                x: -(config.paddings.left - 15.0),
                y: (config.height_px() - config.paddings.top) / 2.0,
                dy_em: 0.0,
                rotation_deg: -90.0,
            }),
        }
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.fanned_out = None;
    }
}

fn x_axis_geometry(axis: &Axis, tick_size: f64) -> AxisGeometry {
    let step = axis.scale.tick_step(axis.tick_count()).unwrap_or(1.0);
    let precision = services::precision_for_step(step);
    let ticks = axis
        .ticks()
        .into_iter()
        .map(|value| Tick { value, offset: axis.scale.apply(value), label: services::format_grouped(value, precision) })
        .collect();
    AxisGeometry {
        domain: axis.scale.domain(),
        range: axis.scale.range(),
        tick_size,
        tick_count: axis.tick_count(),
        ticks,
    }
}

fn y_axis_geometry(axis: &Axis, height: f64) -> AxisGeometry {
    let values = axis.ticks();
    let ticks = if axis.scale.is_log() {
        let every = services::log_ticks_per_label(values.len(), height);
        values
            .iter()
            .enumerate()
            .map(|(i, value)| Tick {
                value: *value,
                offset: axis.scale.apply(*value),
                label: if i % every == 0 { services::format_percent(*value) } else { String::new() },
            })
            .collect()
    } else {
        values
            .iter()
            .map(|value| Tick { value: *value, offset: axis.scale.apply(*value), label: services::format_count(*value) })
            .collect()
    };
    AxisGeometry {
        domain: axis.scale.domain(),
        range: axis.scale.range(),
        tick_size: axis.tick_size(),
        tick_count: axis.tick_count(),
        ticks,
    }
}
