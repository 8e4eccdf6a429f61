use derive_more::Display;

/// Errors raised while building or mounting a plot. Viewport operations
/// themselves never fail: they clamp.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum PlotError {
    #[display(fmt = "Invalid configuration: {}", _0)]
    InvalidConfig(String),
    #[display(fmt = "Rendering error: {}", _0)]
    Rendering(String),
    #[display(fmt = "Mount error: {}", _0)]
    Mount(String),
}

impl std::error::Error for PlotError {}

impl From<serde_json::Error> for PlotError {
    fn from(err: serde_json::Error) -> Self {
        PlotError::InvalidConfig(err.to_string())
    }
}

pub type PlotResult<T> = Result<T, PlotError>;
