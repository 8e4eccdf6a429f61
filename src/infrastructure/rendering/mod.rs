pub mod canvas_renderer;
pub mod executor;

pub use canvas_renderer::CanvasRenderer;
pub use executor::CanvasTransitionExecutor;
