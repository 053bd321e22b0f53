//! Console adapter: the always-available fallback backend

use crate::core::{
    render_cause, ConsoleConfig, Diagnostics, FacadeConfig, Log, LogBackend, LogHandle, LogLevel,
    MessageFormatter, Result, Sink, StderrSink, TimestampFormat, CONSOLE_BACKEND,
};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::Write as _;
use std::sync::Arc;

#[cfg(feature = "colors")]
use colored::Colorize;

thread_local! {
    static LINE_BUFFER: RefCell<String> = const { RefCell::new(String::new()) };
}

/// Writes `<timestamp> [LEVEL] <name> - <message>` lines to a [`Sink`]
///
/// # Examples
///
/// ```
/// use rust_log_facade::adapters::ConsoleLog;
/// use rust_log_facade::core::{Log, LogLevel, MemorySink, TimestampFormat};
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemorySink::new());
/// let log = ConsoleLog::new("db", sink.clone())
///     .with_threshold(LogLevel::Debug)
///     .with_timestamp_format(TimestampFormat::UnixMillis);
///
/// log.trace("dropped");
/// log.debug("kept");
/// assert_eq!(sink.len(), 1);
/// assert!(sink.lines()[0].ends_with("[DEBUG] db - kept"));
/// ```
pub struct ConsoleLog {
    name: String,
    sink: Arc<dyn Sink>,
    threshold: LogLevel,
    use_colors: bool,
    timestamp_format: TimestampFormat,
    formatter: Option<Arc<dyn MessageFormatter>>,
    diagnostics: Diagnostics,
}

impl ConsoleLog {
    pub fn new(name: &str, sink: Arc<dyn Sink>) -> Self {
        Self {
            name: name.to_owned(),
            sink,
            threshold: LogLevel::Trace,
            use_colors: false,
            timestamp_format: TimestampFormat::default(),
            formatter: None,
            diagnostics: Diagnostics::default(),
        }
    }

    /// Console logger writing to stderr
    pub fn stderr(name: &str) -> Self {
        Self::new(name, Arc::new(StderrSink))
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: LogLevel) -> Self {
        self.threshold = threshold;
        self
    }

    /// Colorize the level label (no effect without the `colors` feature)
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn MessageFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Where sink failures are reported
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    fn render(
        &self,
        out: &mut String,
        level: LogLevel,
        message: &str,
        cause: Option<&(dyn Error + 'static)>,
    ) {
        out.push_str(&self.timestamp_format.now());
        out.push_str(" [");
        self.push_level(out, level);
        out.push_str("] ");
        out.push_str(&self.name);
        out.push_str(" - ");
        out.push_str(message);
        if let Some(cause) = cause {
            out.push('\t');
            out.push_str(&render_cause(cause));
        }
    }

    #[cfg(feature = "colors")]
    fn push_level(&self, out: &mut String, level: LogLevel) {
        if self.use_colors {
            let _ = write!(out, "{}", level.to_str().color(level.color_code()));
        } else {
            out.push_str(level.to_str());
        }
    }

    #[cfg(not(feature = "colors"))]
    fn push_level(&self, out: &mut String, level: LogLevel) {
        let _ = write!(out, "{}", level);
    }

    fn emit(&self, line: &str) {
        if let Err(e) = self.sink.write_line(line) {
            self.diagnostics.error(
                "console",
                format_args!("failed to write to '{}' sink: {}", self.sink.name(), e),
            );
        }
    }
}

impl Log for ConsoleLog {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend(&self) -> &str {
        CONSOLE_BACKEND
    }

    fn threshold(&self) -> LogLevel {
        self.threshold
    }

    fn formatter(&self) -> &dyn MessageFormatter {
        match self.formatter {
            Some(ref formatter) => formatter.as_ref(),
            None => &crate::core::PlaceholderFormatter,
        }
    }

    fn write(&self, level: LogLevel, message: &str, cause: Option<&(dyn Error + 'static)>) {
        if !self.is_enabled(level) {
            return;
        }

        LINE_BUFFER.with(|buffer| match buffer.try_borrow_mut() {
            Ok(mut line) => {
                line.clear();
                self.render(&mut line, level, message, cause);
                self.emit(&line);
            }
            // re-entered from inside a sink on this thread
            Err(_) => {
                let mut line = String::new();
                self.render(&mut line, level, message, cause);
                self.emit(&line);
            }
        });
    }
}

impl std::fmt::Debug for ConsoleLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleLog")
            .field("name", &self.name)
            .field("sink", &self.sink.name())
            .field("threshold", &self.threshold)
            .field("use_colors", &self.use_colors)
            .field("timestamp_format", &self.timestamp_format)
            .finish()
    }
}

/// Builds [`ConsoleLog`] handles from the `console` section of the config
pub struct ConsoleBackend {
    settings: ConsoleConfig,
    sink: Arc<dyn Sink>,
    diagnostics: Diagnostics,
}

impl ConsoleBackend {
    pub fn new(settings: ConsoleConfig, sink: Arc<dyn Sink>, diagnostics: Diagnostics) -> Self {
        Self {
            settings,
            sink,
            diagnostics,
        }
    }

    pub fn from_config(config: &FacadeConfig, diagnostics: &Diagnostics) -> Self {
        Self::new(config.console.clone(), Arc::new(StderrSink), diagnostics.clone())
    }
}

impl LogBackend for ConsoleBackend {
    fn create(&self, name: &str) -> Result<LogHandle> {
        let log = ConsoleLog::new(name, Arc::clone(&self.sink))
            .with_threshold(self.settings.level)
            .with_colors(self.settings.colors)
            .with_timestamp_format(self.settings.timestamp.clone())
            .with_diagnostics(self.diagnostics.clone());
        Ok(Arc::new(log))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FacadeError, MemorySink};
    use std::fmt::Display;
    use std::io;

    fn fixed(name: &str, sink: &Arc<MemorySink>) -> ConsoleLog {
        ConsoleLog::new(name, sink.clone())
            .with_timestamp_format(TimestampFormat::Custom("T".into()))
    }

    #[test]
    fn test_line_layout() {
        let sink = Arc::new(MemorySink::new());
        let log = fixed("orders", &sink);

        log.info("placed");
        log.warn_args("retry {} of {}", &[&1, &3]).unwrap();

        assert_eq!(
            sink.lines(),
            vec![
                "T [INFO] orders - placed".to_string(),
                "T [WARN] orders - retry 1 of 3".to_string(),
            ]
        );
    }

    #[test]
    fn test_cause_chain_is_appended() {
        #[derive(Debug)]
        struct Wrapper(io::Error);
        impl std::fmt::Display for Wrapper {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("save failed")
            }
        }
        impl Error for Wrapper {
            fn source(&self) -> Option<&(dyn Error + 'static)> {
                Some(&self.0)
            }
        }

        let sink = Arc::new(MemorySink::new());
        let log = fixed("store", &sink);
        let err = Wrapper(io::Error::new(io::ErrorKind::Other, "disk full"));

        log.error_cause("write rejected", &err);
        assert_eq!(
            sink.lines()[0],
            "T [ERROR] store - write rejected\tsave failed\n\tcaused by: disk full"
        );
    }

    #[test]
    fn test_threshold_gates_low_levels_only() {
        let sink = Arc::new(MemorySink::new());
        let log = fixed("x", &sink).with_threshold(LogLevel::Fatal);

        assert!(!log.is_info_enabled());
        assert!(log.is_warn_enabled());
        assert!(log.is_error_enabled());

        log.info("hidden");
        log.warn("shown");
        log.error("shown");
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_direct_write_rechecks_level() {
        let sink = Arc::new(MemorySink::new());
        let log = fixed("x", &sink).with_threshold(LogLevel::Info);
        log.write(LogLevel::Debug, "hidden", None);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_custom_formatter() {
        struct Upper;
        impl MessageFormatter for Upper {
            fn format(&self, pattern: &str, args: &[&dyn Display]) -> Result<String> {
                crate::core::formatter::format(pattern, args).map(|s| s.to_uppercase())
            }
        }

        let sink = Arc::new(MemorySink::new());
        let log = fixed("x", &sink).with_formatter(Arc::new(Upper));
        log.info_args("hello {}", &[&"world"]).unwrap();
        assert_eq!(sink.lines()[0], "T [INFO] x - HELLO WORLD");
    }

    #[test]
    fn test_format_error_emits_nothing() {
        let sink = Arc::new(MemorySink::new());
        let log = fixed("x", &sink);
        let err = log.info_args("{}", &[&1, &2]).err().unwrap();
        assert!(err.is_format_error());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_sink_failure_goes_to_diagnostics() {
        struct Broken;
        impl Sink for Broken {
            fn write_line(&self, _line: &str) -> Result<()> {
                Err(FacadeError::io_operation(
                    "writing line",
                    "pipe closed",
                    io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
                ))
            }
            fn flush(&self) -> Result<()> {
                Ok(())
            }
            fn name(&self) -> &str {
                "broken"
            }
        }

        let diag = Arc::new(MemorySink::new());
        let log = ConsoleLog::new("x", Arc::new(Broken))
            .with_diagnostics(Diagnostics::to_sink(diag.clone()));
        log.info("lost");
        assert_eq!(diag.matching("'broken' sink").len(), 1);
    }

    #[test]
    fn test_backend_applies_console_settings() {
        let sink = Arc::new(MemorySink::new());
        let settings = ConsoleConfig {
            level: LogLevel::Warn,
            colors: false,
            timestamp: TimestampFormat::Custom("T".into()),
        };
        let backend = ConsoleBackend::new(settings, sink.clone(), Diagnostics::silent());

        let log = backend.create("svc").unwrap();
        assert_eq!(log.backend(), CONSOLE_BACKEND);
        assert_eq!(log.threshold(), LogLevel::Warn);
        log.debug("hidden");
        log.fatal("down");
        assert_eq!(sink.lines(), vec!["T [FATAL] svc - down".to_string()]);
    }

    #[cfg(feature = "colors")]
    #[test]
    fn test_colored_level_keeps_label() {
        colored::control::set_override(true);
        let sink = Arc::new(MemorySink::new());
        let log = fixed("x", &sink).with_colors(true);
        log.info("painted");
        let line = &sink.lines()[0];
        assert!(line.contains("INFO"));
        assert!(line.contains("\u{1b}["));
        assert!(line.ends_with("x - painted"));
    }
}
