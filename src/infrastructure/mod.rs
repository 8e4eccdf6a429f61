pub mod input;
pub mod rendering;
pub mod services;
pub mod tooltip;
