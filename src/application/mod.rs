pub mod animation;
pub mod config;
pub mod gesture;
pub mod needle_plot;
pub mod scene;
pub mod tooltip;

pub use animation::{Easing, RecordingExecutor, Transition, TransitionExecutor};
pub use config::PlotConfig;
pub use gesture::{DeltaMode, ZoomGesture, ZoomTick};
pub use needle_plot::{NeedlePlot, NeedlePlotBuilder, PlotCallbacks, SharedTooltip};
pub use scene::{SceneFrame, SceneSynchronizer};
pub use tooltip::{HeadlessSurface, MinimalTooltip, TooltipSurface};
