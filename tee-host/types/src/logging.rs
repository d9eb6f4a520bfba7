// Licensed under the Apache-2.0 license

//! Diagnostic logging for native sessions
//!
//! The driver layer reports diagnostics through a [`TeeLog`]: a verbosity
//! level and an opaque [`LogSink`]. Without an explicit sink the messages are
//! forwarded to the `log` facade.

use core::fmt;

/// Verbosity of the session's diagnostic output.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// No output
    #[default]
    Quiet = 0,
    /// Errors only
    Error = 1,
    /// Errors and call tracing
    Verbose = 2,
}

impl LogLevel {
    /// Convert a raw level, clamping anything above `Verbose`.
    pub fn from_raw(level: u32) -> Self {
        match level {
            0 => LogLevel::Quiet,
            1 => LogLevel::Error,
            _ => LogLevel::Verbose,
        }
    }

    pub fn as_raw(self) -> u32 {
        self as u32
    }
}

/// Receiver of diagnostic messages.
pub trait LogSink: Send {
    fn log(&self, is_error: bool, message: &str);
}

impl<F> LogSink for F
where
    F: Fn(bool, &str) + Send,
{
    fn log(&self, is_error: bool, message: &str) {
        self(is_error, message)
    }
}

/// Sink used when the caller supplies none.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLogSink;

impl LogSink for DefaultLogSink {
    fn log(&self, is_error: bool, message: &str) {
        if is_error {
            log::error!(target: "tee_host", "{}", message);
        } else {
            log::debug!(target: "tee_host", "{}", message);
        }
    }
}

/// Level-gated diagnostic channel owned by a native handle.
pub struct TeeLog {
    level: LogLevel,
    sink: Box<dyn LogSink>,
}

impl TeeLog {
    pub fn new(level: LogLevel, sink: Option<Box<dyn LogSink>>) -> Self {
        Self {
            level,
            sink: sink.unwrap_or_else(|| Box::new(DefaultLogSink)),
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Set a new level and return the previous one.
    pub fn set_level(&mut self, level: LogLevel) -> LogLevel {
        core::mem::replace(&mut self.level, level)
    }

    /// Replace the sink; `None` restores the default sink.
    pub fn set_sink(&mut self, sink: Option<Box<dyn LogSink>>) {
        self.sink = sink.unwrap_or_else(|| Box::new(DefaultLogSink));
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        if self.level >= LogLevel::Error {
            self.sink.log(true, &format!("error: {}", args));
        }
    }

    pub fn verbose(&self, args: fmt::Arguments<'_>) {
        if self.level >= LogLevel::Verbose {
            self.sink.log(false, &args.to_string());
        }
    }
}

impl Default for TeeLog {
    fn default() -> Self {
        Self::new(LogLevel::default(), None)
    }
}

impl fmt::Debug for TeeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeeLog").field("level", &self.level).finish()
    }
}
