//! Logging configuration types.

/// Callback receiving every formatted log line, for mirroring the batch
/// log into a host progress reporter.
pub type LogCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Configuration for a batch logger.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum level written to the log.
    pub level: LogLevel,
    /// Prepend a `[HH:MM:SS]` timestamp to every line.
    pub show_timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            show_timestamps: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
