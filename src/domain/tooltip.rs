//! Tooltip collaborator contract.
//!
//! A plot owns two tooltips (needles and sites). The plot routes pointer
//! movement to them; the tooltip decides how to present the payload.

use serde_json::Value;
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum TargetKind {
    Needle,
    Site,
}

/// One element a tooltip can be shown for.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipTarget {
    pub kind: TargetKind,
    /// Mutation id or site index
    pub id: usize,
    /// Serialized mutation or site, extra properties included
    pub data: Value,
}

/// Pointer location in page (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub trait Tooltip {
    /// Attach the tooltip to the elements it will be shown for.
    fn bind(&mut self, targets: &[TooltipTarget]);

    fn show(&mut self, target: &TooltipTarget, pointer: PointerPosition);

    fn hide(&mut self);

    fn move_to_pointer(&mut self, pointer: PointerPosition);

    /// Called after every zoom or pan so a tooltip anchored to an element
    /// can follow it.
    fn move_to_element(&mut self) {}

    /// Tear down anything the tooltip created.
    fn remove(&mut self) {}
}
