//! Side-channel for the facade's own notices
//!
//! Notices never go through a facade logger (that would recurse into
//! resolution); they are written straight to a [`Sink`], stderr by default.

use super::log_level::LogLevel;
use super::sink::{Sink, StderrSink};
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Diagnostics {
    sink: Option<Arc<dyn Sink>>,
}

impl Diagnostics {
    pub fn stderr() -> Self {
        Self {
            sink: Some(Arc::new(StderrSink)),
        }
    }

    pub fn to_sink(sink: Arc<dyn Sink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Discards every notice
    pub fn silent() -> Self {
        Self { sink: None }
    }

    pub fn is_silent(&self) -> bool {
        self.sink.is_none()
    }

    pub fn notice(&self, level: LogLevel, component: &str, message: impl fmt::Display) {
        if let Some(ref sink) = self.sink {
            let line = format!("[{}] log_facade {}: {}", level, component, message);
            // nowhere left to report a failing diagnostics sink
            let _ = sink.write_line(&line);
        }
    }

    pub fn warn(&self, component: &str, message: impl fmt::Display) {
        self.notice(LogLevel::Warn, component, message);
    }

    pub fn error(&self, component: &str, message: impl fmt::Display) {
        self.notice(LogLevel::Error, component, message);
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sink {
            Some(ref sink) => write!(f, "Diagnostics({})", sink.name()),
            None => f.write_str("Diagnostics(silent)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sink::MemorySink;

    #[test]
    fn test_notice_layout() {
        let sink = Arc::new(MemorySink::new());
        let diagnostics = Diagnostics::to_sink(sink.clone());

        diagnostics.warn("resolver", "backend 'tracing' rejected");
        diagnostics.error("registry", format_args!("factory '{}' failed", "custom"));

        assert_eq!(
            sink.lines(),
            vec![
                "[WARN] log_facade resolver: backend 'tracing' rejected".to_string(),
                "[ERROR] log_facade registry: factory 'custom' failed".to_string(),
            ]
        );
    }

    #[test]
    fn test_silent_discards() {
        let diagnostics = Diagnostics::silent();
        assert!(diagnostics.is_silent());
        diagnostics.warn("resolver", "ignored");
    }
}
