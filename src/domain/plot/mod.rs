//! Needle plot aggregate: input entities, scales, axes and the viewport
//! coordinate engine.

pub mod axis;
pub mod entities;
pub mod scale;
pub mod services;
pub mod transform;
pub mod value_objects;
pub mod viewport;

pub use axis::Axis;
pub use entities::*;
pub use scale::{AxisScale, LinearScale, LogScale};
pub use transform::CoordinateTransform;
pub use value_objects::*;
pub use viewport::{ViewportState, ZoomExtent};
