pub mod handle;
pub mod wasm_api;

pub use handle::{HostQueue, PlotHandle, host_queue};
pub use wasm_api::NeedlePlotApi;
