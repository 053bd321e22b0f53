//! Bridge to the `tracing` ecosystem
//!
//! Events are emitted with target `log_facade` and carry the logger name in a
//! `logger` field. `tracing` has no fatal level, so fatal becomes `ERROR`.

use crate::core::{
    render_cause, FacadeError, Log, LogBackend, LogHandle, LogLevel, Result, TRACING_BACKEND,
};
use std::error::Error;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing::Level;

/// Target attached to every bridged event
pub const TRACING_TARGET: &str = "log_facade";

macro_rules! bridged_event {
    ($level:expr, $($fields:tt)+) => {
        match $level {
            LogLevel::Trace => tracing::event!(target: TRACING_TARGET, Level::TRACE, $($fields)+),
            LogLevel::Debug => tracing::event!(target: TRACING_TARGET, Level::DEBUG, $($fields)+),
            LogLevel::Info => tracing::event!(target: TRACING_TARGET, Level::INFO, $($fields)+),
            LogLevel::Warn => tracing::event!(target: TRACING_TARGET, Level::WARN, $($fields)+),
            LogLevel::Error | LogLevel::Fatal => {
                tracing::event!(target: TRACING_TARGET, Level::ERROR, $($fields)+)
            }
        }
    };
}

/// Facade level a `tracing` level filter lets through
pub(crate) fn threshold_for(filter: LevelFilter) -> LogLevel {
    if filter >= LevelFilter::TRACE {
        LogLevel::Trace
    } else if filter >= LevelFilter::DEBUG {
        LogLevel::Debug
    } else if filter >= LevelFilter::INFO {
        LogLevel::Info
    } else {
        // warn and above are emitted regardless
        LogLevel::Warn
    }
}

#[derive(Debug)]
pub struct TracingLog {
    name: String,
}

impl TracingLog {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }
}

impl Log for TracingLog {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend(&self) -> &str {
        TRACING_BACKEND
    }

    fn threshold(&self) -> LogLevel {
        threshold_for(LevelFilter::current())
    }

    fn write(&self, level: LogLevel, message: &str, cause: Option<&(dyn Error + 'static)>) {
        if !self.is_enabled(level) {
            return;
        }

        let logger = self.name.as_str();
        match cause {
            Some(cause) => {
                let cause = render_cause(cause);
                bridged_event!(level, logger = %logger, cause = %cause, "{}", message);
            }
            None => bridged_event!(level, logger = %logger, "{}", message),
        }
    }
}

/// Available once a global `tracing` subscriber has been installed
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingBackend;

impl LogBackend for TracingBackend {
    fn create(&self, name: &str) -> Result<LogHandle> {
        if !tracing::dispatcher::has_been_set() {
            return Err(FacadeError::backend_unavailable(
                TRACING_BACKEND,
                "no global tracing subscriber installed",
            ));
        }
        Ok(Arc::new(TracingLog::new(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    #[test]
    fn test_threshold_mapping() {
        assert_eq!(threshold_for(LevelFilter::TRACE), LogLevel::Trace);
        assert_eq!(threshold_for(LevelFilter::DEBUG), LogLevel::Debug);
        assert_eq!(threshold_for(LevelFilter::INFO), LogLevel::Info);
        assert_eq!(threshold_for(LevelFilter::WARN), LogLevel::Warn);
        assert_eq!(threshold_for(LevelFilter::OFF), LogLevel::Warn);
    }

    #[test]
    fn test_events_reach_scoped_subscriber() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(Level::TRACE)
            .finish();

        let log = TracingLog::new("payments");
        tracing::subscriber::with_default(subscriber, || {
            log.warn_args("retrying {}", &[&"charge"]).unwrap();
            let err = io::Error::new(io::ErrorKind::TimedOut, "gateway timeout");
            log.fatal_cause("giving up", &err);
        });

        let text = captured.text();
        assert!(text.contains("WARN"));
        assert!(text.contains("retrying charge"));
        assert!(text.contains("logger=payments"));
        assert!(text.contains("ERROR"));
        assert!(text.contains("giving up"));
        assert!(text.contains("cause=gateway timeout"));
    }
}
