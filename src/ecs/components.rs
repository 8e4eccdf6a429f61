use serde::Serialize;
use serde_json::Value;

use crate::domain::plot::HeadKey;

/// ECS component identifying a needle entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Needle {
    pub id: usize,
    pub pos: f64,
    pub value: f64,
    pub background: bool,
}

/// Needle stem in content coordinates (before zoom and pan).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NeedleLine {
    pub x: f64,
    pub y1: f64,
    pub y2: f64,
    pub stroke_width: f64,
}

/// Count drawn inside heads that share a location with others.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountLabel {
    pub text: String,
    pub fill: String,
    pub font_size: f64,
    pub dx: f64,
    pub dy: f64,
}

/// Needle head. Rendered as `translate(x + dx, cy) scale(1, sy)` inside the
/// content group, which keeps it round while the content is stretched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeedleHead {
    #[serde(skip)]
    pub key: HeadKey,
    pub dx: f64,
    pub cy: f64,
    pub sy: f64,
    pub radius: f64,
    pub fill: Option<String>,
    pub count: Option<CountLabel>,
}

/// Placement of the triangle marker on top of a site box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Marker {
    pub tx: f64,
    pub ty: f64,
    pub sx: f64,
    pub sy: f64,
}

/// Site box in content coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteBox {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub stroke_width: f64,
    pub class: String,
    pub marker: Marker,
}

/// Serialized entity handed to tooltips.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload(pub Value);
