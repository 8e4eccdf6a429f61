//! Logging port for the plot.
//!
//! Entries are tagged with the part of the plot that produced them and may
//! carry `key=value` fields. Re-syncs log the viewport through
//! [`log_viewport`] so every console line about zoom or pan has the same
//! shape.

use derive_more::Display;
use std::fmt;
use std::sync::OnceLock;

use crate::domain::plot::ViewportState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum LogLevel {
    #[display(fmt = "DEBUG")]
    Debug,
    #[display(fmt = " INFO")]
    Info,
    #[display(fmt = " WARN")]
    Warn,
    #[display(fmt = "ERROR")]
    Error,
}

/// Part of the plot a log line comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LogComponent {
    /// Plot lifecycle: create, resize, destroy.
    #[display(fmt = "plot")]
    Plot,
    /// Zoom and pan requests and re-syncs.
    #[display(fmt = "viewport")]
    Viewport,
    #[display(fmt = "render:{}", _0)]
    Render(&'static str),
    #[display(fmt = "tooltip:{}", _0)]
    Tooltip(&'static str),
    /// Embedding code: JS class, Leptos view, host-call queue.
    #[display(fmt = "host:{}", _0)]
    Host(&'static str),
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: impl Into<String>) -> Self {
        Self {
            timestamp: get_time_provider().current_timestamp(),
            level,
            component,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }
}

impl fmt::Display for LogEntry {
    /// `LEVEL component | message | k=v k=v`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} | {}", self.level, self.component, self.message)?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            let sep = if i == 0 { " | " } else { " " };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    /// Checked before an entry is built, so filtered lines cost nothing.
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }
}

static GLOBAL_LOGGER: OnceLock<Box<dyn Logger>> = OnceLock::new();
static GLOBAL_TIME_PROVIDER: OnceLock<Box<dyn TimeProvider>> = OnceLock::new();

/// Install the process-wide logger. Later calls are ignored.
pub fn init_logger(logger: Box<dyn Logger>) {
    let _ = GLOBAL_LOGGER.set(logger);
}

/// Install the process-wide time provider. Later calls are ignored.
pub fn init_time_provider(time_provider: Box<dyn TimeProvider>) {
    let _ = GLOBAL_TIME_PROVIDER.set(time_provider);
}

pub fn get_logger() -> &'static dyn Logger {
    GLOBAL_LOGGER.get().map(|logger| logger.as_ref()).unwrap_or(&NoOpLogger)
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    GLOBAL_TIME_PROVIDER.get().map(|provider| provider.as_ref()).unwrap_or(&CounterTimeProvider)
}

/// Entry describing the viewport after a re-sync.
pub fn viewport_entry(viewport: &ViewportState, aa_position: f64, animated: bool) -> LogEntry {
    let extent = viewport.extent();
    LogEntry::new(LogLevel::Debug, LogComponent::Viewport, "synced")
        .field("scale", viewport.scale())
        .field("position", viewport.position())
        .field("aa", aa_position)
        .field("zoom", format!("{}..{}", extent.min, extent.max))
        .field("animated", animated)
}

pub fn log_viewport(viewport: &ViewportState, aa_position: f64, animated: bool) {
    let logger = get_logger();
    if logger.enabled(LogLevel::Debug) {
        logger.log(viewport_entry(viewport, aa_position, animated));
    }
}

/// Used until a logger is installed, and in native tests.
struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&self, _entry: LogEntry) {}

    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }
}

/// Monotonic counter standing in for wall-clock time outside the browser.
struct CounterTimeProvider;

impl TimeProvider for CounterTimeProvider {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::SeqCst)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("#{}", timestamp)
    }
}

#[macro_export]
macro_rules! log_at {
    ($level:expr, $component:expr, $($arg:tt)*) => {{
        let logger = $crate::domain::logging::get_logger();
        if logger.enabled($level) {
            logger.log($crate::domain::logging::LogEntry::new($level, $component, format!($($arg)*)));
        }
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::log_at!($crate::domain::logging::LogLevel::Debug, $component, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::domain::logging::LogLevel::Info, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::domain::logging::LogLevel::Warn, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::domain::logging::LogLevel::Error, $component, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plot::ZoomExtent;

    #[test]
    fn components_name_plot_parts() {
        assert_eq!(LogComponent::Viewport.to_string(), "viewport");
        assert_eq!(LogComponent::Render("canvas").to_string(), "render:canvas");
        assert_eq!(LogComponent::Host("queue").to_string(), "host:queue");
    }

    #[test]
    fn viewport_entry_carries_zoom_state() {
        let mut viewport = ViewportState::new(ZoomExtent::new(1.0, 10.0));
        viewport.set_scale(4.0);
        viewport.set_position(-30.0, -1000.0);

        let entry = viewport_entry(&viewport, 7.5, true);
        assert_eq!(entry.level, LogLevel::Debug);
        assert_eq!(entry.component, LogComponent::Viewport);
        let keys: Vec<&str> = entry.fields.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, ["scale", "position", "aa", "zoom", "animated"]);
        assert_eq!(entry.to_string(), "DEBUG viewport | synced | scale=4 position=-30 aa=7.5 zoom=1..10 animated=true");
    }

    #[test]
    fn warn_sorts_above_debug() {
        assert!(LogLevel::Debug < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
