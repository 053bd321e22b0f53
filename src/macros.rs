//! Logging macros for ergonomic message formatting.
//!
//! The macros take any [`Log`](crate::core::Log) implementor (a
//! [`LogHandle`](crate::core::LogHandle) or a concrete adapter), check the
//! level first and only then build the message with `format!`, so arguments
//! are checked at compile time and never rendered for disabled levels.
//!
//! A leading `cause = <error>` attaches an error and its source chain.
//!
//! # Examples
//!
//! ```
//! use rust_log_facade::adapters::ConsoleLog;
//! use rust_log_facade::core::MemorySink;
//! use rust_log_facade::{info, error};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let log = ConsoleLog::new("server", sink.clone());
//!
//! let port = 8080;
//! info!(log, "Server listening on port {}", port);
//!
//! let err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
//! error!(log, cause = err, "Bind to {} failed", port);
//! assert_eq!(sink.len(), 2);
//! ```

/// Log a message at a runtime level.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # use std::sync::Arc;
/// # let log = ConsoleLog::new("app", Arc::new(MemorySink::new()));
/// use rust_log_facade::log;
/// log!(log, LogLevel::Info, "Simple message");
/// log!(log, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, cause = $cause:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::core::Log as _;
        let level = $level;
        let logger = &$logger;
        if logger.is_enabled(level) {
            logger.log_cause(level, &format!($($arg)+), &$cause);
        }
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::core::Log as _;
        let level = $level;
        let logger = &$logger;
        if logger.is_enabled(level) {
            logger.log(level, &format!($($arg)+));
        }
    }};
}

/// Log a trace-level message.
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # use std::sync::Arc;
/// # let log = ConsoleLog::new("app", Arc::new(MemorySink::new()));
/// use rust_log_facade::trace;
/// trace!(log, "Entering calculate()");
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # use std::sync::Arc;
/// # let log = ConsoleLog::new("app", Arc::new(MemorySink::new()));
/// use rust_log_facade::warn;
/// warn!(log, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
