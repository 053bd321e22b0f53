//! The `Log` capability every backend adapter implements
//!
//! A backend supplies four things: its logger name, its backend identifier,
//! an effective threshold and a `write` that emits one already-rendered
//! message. Everything callers use (the six `is_<level>_enabled` probes and
//! the four call shapes per level) is provided on top of those, so every
//! adapter exposes exactly the same surface.
//!
//! Formatting only happens after the level has been found enabled:
//!
//! ```
//! use rust_log_facade::adapters::ConsoleLog;
//! use rust_log_facade::core::{Log, LogLevel, MemorySink};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let log = ConsoleLog::new("app", sink.clone()).with_threshold(LogLevel::Info);
//!
//! log.debug_args("skipped {}", &[&1]).unwrap();
//! log.info_args("kept {}", &[&2]).unwrap();
//! assert_eq!(sink.len(), 1);
//! ```

use super::error::Result;
use super::formatter::{MessageFormatter, PlaceholderFormatter};
use super::log_level::LogLevel;
use std::error::Error;
use std::fmt::Display;
use std::sync::Arc;

/// Shared handle to a resolved logger
pub type LogHandle = Arc<dyn Log>;

/// Whether two handles are the same logger instance, not merely equal ones
#[inline]
pub fn same_handle(a: &LogHandle, b: &LogHandle) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// Render an error followed by its `source()` chain
///
/// ```
/// use rust_log_facade::core::render_cause;
///
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
/// assert_eq!(render_cause(&err), "disk gone");
/// ```
pub fn render_cause(cause: &(dyn Error + 'static)) -> String {
    let mut out = cause.to_string();
    let mut source = cause.source();
    while let Some(err) = source {
        out.push_str("\n\tcaused by: ");
        out.push_str(&err.to_string());
        source = err.source();
    }
    out
}

macro_rules! level_methods {
    (
        $level:expr,
        $label:literal,
        $probe:ident,
        $plain:ident,
        $args:ident,
        $cause:ident,
        $cause_args:ident
    ) => {
        #[doc = concat!("Whether ", $label, " output is enabled")]
        #[inline]
        fn $probe(&self) -> bool {
            self.is_enabled($level)
        }

        #[doc = concat!("Log a ", $label, " message")]
        #[inline]
        fn $plain(&self, message: &str) {
            self.log($level, message);
        }

        #[doc = concat!("Log a ", $label, " message with `{}` arguments")]
        #[inline]
        fn $args(&self, pattern: &str, args: &[&dyn Display]) -> Result<()> {
            self.log_args($level, pattern, args)
        }

        #[doc = concat!("Log a ", $label, " message with a cause")]
        #[inline]
        fn $cause(&self, message: &str, cause: &(dyn Error + 'static)) {
            self.log_cause($level, message, cause);
        }

        #[doc = concat!("Log a ", $label, " message with a cause and `{}` arguments")]
        #[inline]
        fn $cause_args(
            &self,
            pattern: &str,
            cause: &(dyn Error + 'static),
            args: &[&dyn Display],
        ) -> Result<()> {
            self.log_cause_args($level, pattern, cause, args)
        }
    };
}

pub trait Log: Send + Sync {
    /// Logger name this handle was created for
    fn name(&self) -> &str;

    /// Identifier of the backend that built this handle
    fn backend(&self) -> &str;

    /// Lowest level that trace/debug/info must reach to be emitted
    fn threshold(&self) -> LogLevel;

    /// Emit one rendered message. Implementations re-check enablement.
    fn write(&self, level: LogLevel, message: &str, cause: Option<&(dyn Error + 'static)>);

    fn formatter(&self) -> &dyn MessageFormatter {
        &PlaceholderFormatter
    }

    #[inline]
    fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(self.threshold())
    }

    fn log(&self, level: LogLevel, message: &str) {
        if self.is_enabled(level) {
            self.write(level, message, None);
        }
    }

    fn log_args(&self, level: LogLevel, pattern: &str, args: &[&dyn Display]) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }
        let message = self.formatter().format(pattern, args)?;
        self.write(level, &message, None);
        Ok(())
    }

    fn log_cause(&self, level: LogLevel, message: &str, cause: &(dyn Error + 'static)) {
        if self.is_enabled(level) {
            self.write(level, message, Some(cause));
        }
    }

    fn log_cause_args(
        &self,
        level: LogLevel,
        pattern: &str,
        cause: &(dyn Error + 'static),
        args: &[&dyn Display],
    ) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }
        let message = self.formatter().format(pattern, args)?;
        self.write(level, &message, Some(cause));
        Ok(())
    }

    level_methods!(
        LogLevel::Trace,
        "trace",
        is_trace_enabled,
        trace,
        trace_args,
        trace_cause,
        trace_cause_args
    );
    level_methods!(
        LogLevel::Debug,
        "debug",
        is_debug_enabled,
        debug,
        debug_args,
        debug_cause,
        debug_cause_args
    );
    level_methods!(
        LogLevel::Info,
        "info",
        is_info_enabled,
        info,
        info_args,
        info_cause,
        info_cause_args
    );
    level_methods!(
        LogLevel::Warn,
        "warn",
        is_warn_enabled,
        warn,
        warn_args,
        warn_cause,
        warn_cause_args
    );
    level_methods!(
        LogLevel::Error,
        "error",
        is_error_enabled,
        error,
        error_args,
        error_cause,
        error_cause_args
    );
    level_methods!(
        LogLevel::Fatal,
        "fatal",
        is_fatal_enabled,
        fatal,
        fatal_args,
        fatal_cause,
        fatal_cause_args
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FacadeError;
    use parking_lot::Mutex;
    use std::fmt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingFormatter {
        calls: AtomicUsize,
    }

    impl MessageFormatter for CountingFormatter {
        fn format(&self, pattern: &str, args: &[&dyn Display]) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            crate::core::formatter::format(pattern, args)
        }
    }

    struct RecordingLog {
        threshold: LogLevel,
        formatter: CountingFormatter,
        written: Mutex<Vec<(LogLevel, String, Option<String>)>>,
    }

    impl RecordingLog {
        fn new(threshold: LogLevel) -> Self {
            Self {
                threshold,
                formatter: CountingFormatter::default(),
                written: Mutex::new(Vec::new()),
            }
        }

        fn format_calls(&self) -> usize {
            self.formatter.calls.load(Ordering::SeqCst)
        }
    }

    impl Log for RecordingLog {
        fn name(&self) -> &str {
            "recording"
        }

        fn backend(&self) -> &str {
            "test"
        }

        fn threshold(&self) -> LogLevel {
            self.threshold
        }

        fn write(&self, level: LogLevel, message: &str, cause: Option<&(dyn Error + 'static)>) {
            if !self.is_enabled(level) {
                return;
            }
            self.written
                .lock()
                .push((level, message.to_string(), cause.map(render_cause)));
        }

        fn formatter(&self) -> &dyn MessageFormatter {
            &self.formatter
        }
    }

    #[derive(Debug)]
    struct Outer(Inner);
    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("wrapper failure")
        }
    }
    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("inner failure")
        }
    }
    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }
    impl Error for Inner {}

    #[test]
    fn test_info_threshold_probes() {
        let log = RecordingLog::new(LogLevel::Info);
        assert!(!log.is_trace_enabled());
        assert!(!log.is_debug_enabled());
        assert!(log.is_info_enabled());
        assert!(log.is_warn_enabled());
        assert!(log.is_error_enabled());
        assert!(log.is_fatal_enabled());
    }

    #[test]
    fn test_disabled_level_never_formats() {
        let log = RecordingLog::new(LogLevel::Info);

        log.debug_args("value {}", &[&42]).unwrap();
        log.trace_cause_args("value {}", &Inner, &[&42]).unwrap();
        assert_eq!(log.format_calls(), 0);
        assert!(log.written.lock().is_empty());

        log.info_args("value {}", &[&42]).unwrap();
        assert_eq!(log.format_calls(), 1);
        assert_eq!(log.written.lock()[0].1, "value 42");
    }

    #[test]
    fn test_warn_and_above_ignore_threshold() {
        let log = RecordingLog::new(LogLevel::Fatal);
        log.info("dropped");
        log.warn("kept");
        log.error("kept");
        log.fatal("kept");

        let levels: Vec<LogLevel> = log.written.lock().iter().map(|w| w.0).collect();
        assert_eq!(levels, vec![LogLevel::Warn, LogLevel::Error, LogLevel::Fatal]);
    }

    #[test]
    fn test_cause_is_rendered_with_chain() {
        let log = RecordingLog::new(LogLevel::Trace);
        log.error_cause("request failed", &Outer(Inner));

        let written = log.written.lock();
        assert_eq!(
            written[0].2.as_deref(),
            Some("wrapper failure\n\tcaused by: inner failure")
        );
    }

    #[test]
    fn test_format_error_reaches_caller() {
        let log = RecordingLog::new(LogLevel::Trace);
        let err = log.info_args("{}", &[&1, &2]).unwrap_err();
        assert!(matches!(err, FacadeError::FormatMismatch { .. }));
        assert!(log.written.lock().is_empty());
    }

    #[test]
    fn test_same_handle_is_identity() {
        let a: LogHandle = Arc::new(RecordingLog::new(LogLevel::Info));
        let b: LogHandle = Arc::new(RecordingLog::new(LogLevel::Info));
        assert!(same_handle(&a, &Arc::clone(&a)));
        assert!(!same_handle(&a, &b));
    }
}
