//! Statement logging sinks
//!
//! The importer reports every statement to an injected sink: once at debug
//! level before execution, and once more at error level when execution
//! fails. The sink defaults to [`NullLog`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Error,
}

/// A statement log sink.
pub trait QueryLog {
    fn log(&self, level: LogLevel, message: &str);
}

/// Discards everything. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLog;

impl QueryLog for NullLog {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

/// Forwards to the `log` crate facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdLog;

impl QueryLog for StdLog {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => log::debug!("{}", message),
            LogLevel::Info => log::info!("{}", message),
            LogLevel::Error => log::error!("{}", message),
        }
    }
}
