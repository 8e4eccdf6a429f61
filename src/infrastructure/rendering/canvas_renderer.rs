use std::f64::consts::PI;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::application::scene::{AxisGeometry, LegendLabel, NeedleSprite, SceneFrame};
use crate::domain::logging::LogComponent;
use crate::log_debug;
use crate::ecs::components::SiteBox;

const FONT_SIZE: f64 = 10.0;
const LEGEND_FONT_SIZE: f64 = 12.0;
const AXIS_COLOR: &str = "#000000";
const NEEDLE_COLOR: &str = "#555555";
const BACKGROUND_NEEDLE_COLOR: &str = "#cccccc";
const SITE_STROKE: &str = "#333333";

/// Fill of a site box by its class.
fn site_fill(class: &str) -> &'static str {
    match class.trim_start_matches("site ") {
        "multi_ptm" => "#9b59b6",
        "phosphorylation" => "#e67e22",
        "acetylation" => "#3498db",
        "ubiquitination" => "#27ae60",
        "methylation" => "#f1c40f",
        _ => "#bbbbbb",
    }
}

/// Canvas 2D renderer for scene frames - Infrastructure implementation
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| JsValue::from_str("Failed to get 2D context"))?
            .ok_or_else(|| JsValue::from_str("2D context not available"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("Failed to cast to 2D context"))?;
        Ok(Self { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn clear(&self) {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.context.clear_rect(0.0, 0.0, w, h);
    }

    /// Draw one frame, resizing the canvas to the frame if needed.
    pub fn render(&self, frame: &SceneFrame) -> Result<(), JsValue> {
        let (width, height) = (frame.width.round().max(0.0) as u32, frame.height.round().max(0.0) as u32);
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            log_debug!(LogComponent::Render("canvas"), "Canvas resized to {}x{}", width, height);
        }

        let ctx = &self.context;
        ctx.clear_rect(0.0, 0.0, frame.width, frame.height);

        ctx.save();
        ctx.translate(frame.paddings.left, 0.0)?;

        // content is hidden under the left padding
        ctx.save();
        ctx.begin_path();
        ctx.rect(0.0, 0.0, frame.width - frame.paddings.left, frame.height);
        ctx.clip();
        ctx.translate(frame.content.translate_x, 0.0)?;
        ctx.scale(frame.content.scale_x, 1.0)?;
        for needle in &frame.needles {
            self.render_needle(needle)?;
        }
        for site in &frame.sites {
            self.render_site(site)?;
        }
        ctx.restore();

        self.render_x_axis(&frame.x_axis, frame.height - frame.paddings.bottom)?;
        self.render_y_axis(&frame.y_axis)?;
        if let Some(legend) = &frame.x_legend {
            self.render_legend(legend)?;
        }
        if let Some(legend) = &frame.y_legend {
            self.render_legend(legend)?;
        }
        ctx.restore();
        Ok(())
    }

    fn render_needle(&self, needle: &NeedleSprite) -> Result<(), JsValue> {
        let ctx = &self.context;
        let line = &needle.line;
        let color = if needle.background { BACKGROUND_NEEDLE_COLOR } else { NEEDLE_COLOR };
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(line.stroke_width);
        ctx.begin_path();
        ctx.move_to(line.x, line.y1);
        ctx.line_to(line.x, line.y2);
        ctx.stroke();

        let head = &needle.head;
        ctx.save();
        ctx.translate(line.x + head.dx, head.cy)?;
        ctx.scale(1.0, head.sy)?;
        ctx.begin_path();
        ctx.arc(0.0, 0.0, head.radius.max(0.0), 0.0, 2.0 * PI)?;
        // unfilled heads render black, like an SVG circle without fill
        ctx.set_fill_style_str(head.fill.as_deref().unwrap_or("black"));
        ctx.fill();

        if let Some(label) = &head.count {
            ctx.set_fill_style_str(label.fill.as_str());
            ctx.set_font(&format!("{}px sans-serif", label.font_size));
            ctx.set_text_baseline("alphabetic");
            ctx.set_text_align("start");
            ctx.fill_text(&label.text, label.dx, label.dy)?;
        }
        ctx.restore();
        Ok(())
    }

    fn render_site(&self, site: &SiteBox) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.save();
        ctx.translate(site.x, site.y)?;
        ctx.set_line_width(site.stroke_width);
        ctx.set_stroke_style_str(SITE_STROKE);
        ctx.set_fill_style_str(site_fill(&site.class));
        ctx.fill_rect(0.0, 0.0, site.width, site.height);
        ctx.stroke_rect(0.0, 0.0, site.width, site.height);

        // unit-area triangle, scaled to sit on the box
        let marker = site.marker;
        let ry = (1.0 / 3f64.sqrt()).sqrt();
        let rx = ry * 3f64.sqrt() / 2.0;
        ctx.translate(marker.tx, marker.ty)?;
        ctx.scale(marker.sx, marker.sy)?;
        ctx.begin_path();
        ctx.move_to(0.0, -ry);
        ctx.line_to(rx, ry);
        ctx.line_to(-rx, ry);
        ctx.close_path();
        ctx.fill();
        ctx.restore();
        Ok(())
    }

    fn render_x_axis(&self, axis: &AxisGeometry, baseline: f64) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.save();
        ctx.translate(0.0, baseline)?;
        ctx.set_stroke_style_str(AXIS_COLOR);
        ctx.set_fill_style_str(AXIS_COLOR);
        ctx.set_line_width(1.0);
        ctx.set_font(&format!("{}px sans-serif", FONT_SIZE));
        ctx.set_text_align("center");
        ctx.set_text_baseline("top");

        ctx.begin_path();
        ctx.move_to(axis.range[0], 0.0);
        ctx.line_to(axis.range[1], 0.0);
        ctx.stroke();

        for tick in &axis.ticks {
            ctx.begin_path();
            ctx.move_to(tick.offset, 0.0);
            ctx.line_to(tick.offset, axis.tick_size);
            ctx.stroke();
            if !tick.label.is_empty() {
                ctx.fill_text(&tick.label, tick.offset, axis.tick_size + 3.0)?;
            }
        }
        ctx.restore();
        Ok(())
    }

    fn render_y_axis(&self, axis: &AxisGeometry) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.save();
        ctx.set_stroke_style_str(AXIS_COLOR);
        ctx.set_fill_style_str(AXIS_COLOR);
        ctx.set_line_width(1.0);
        ctx.set_font(&format!("{}px sans-serif", FONT_SIZE));
        ctx.set_text_align("end");
        ctx.set_text_baseline("middle");

        ctx.begin_path();
        ctx.move_to(0.0, axis.range[0]);
        ctx.line_to(0.0, axis.range[1]);
        ctx.stroke();

        for tick in &axis.ticks {
            ctx.begin_path();
            ctx.move_to(0.0, tick.offset);
            ctx.line_to(-axis.tick_size, tick.offset);
            ctx.stroke();
            if !tick.label.is_empty() {
                ctx.fill_text(&tick.label, -axis.tick_size - 3.0, tick.offset)?;
            }
        }
        ctx.restore();
        Ok(())
    }

    fn render_legend(&self, legend: &LegendLabel) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.save();
        ctx.set_fill_style_str(AXIS_COLOR);
        ctx.set_font(&format!("{}px sans-serif", LEGEND_FONT_SIZE));
        ctx.set_text_align("center");
        ctx.set_text_baseline("alphabetic");
        ctx.translate(legend.x, legend.y + legend.dy_em * LEGEND_FONT_SIZE)?;
        ctx.rotate(legend.rotation_deg.to_radians())?;
        ctx.fill_text(&legend.text, 0.0, 0.0)?;
        ctx.restore();
        Ok(())
    }
}
