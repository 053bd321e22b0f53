//! Bridge to the `log` crate
//!
//! Records use the logger name as their target, so `env_logger`-style
//! per-target filtering keeps working. Fatal is sent as `Error`.

use crate::core::{
    render_cause, FacadeError, Log, LogBackend, LogHandle, LogLevel, Result, LOG_BACKEND,
};
use std::error::Error;
use std::sync::Arc;

pub(crate) fn to_log_level(level: LogLevel) -> ::log::Level {
    match level {
        LogLevel::Trace => ::log::Level::Trace,
        LogLevel::Debug => ::log::Level::Debug,
        LogLevel::Info => ::log::Level::Info,
        LogLevel::Warn => ::log::Level::Warn,
        LogLevel::Error | LogLevel::Fatal => ::log::Level::Error,
    }
}

pub(crate) fn threshold_for(filter: ::log::LevelFilter) -> LogLevel {
    match filter {
        ::log::LevelFilter::Trace => LogLevel::Trace,
        ::log::LevelFilter::Debug => LogLevel::Debug,
        ::log::LevelFilter::Info => LogLevel::Info,
        _ => LogLevel::Warn,
    }
}

#[derive(Debug)]
pub struct LogCrateLog {
    name: String,
}

impl LogCrateLog {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }
}

impl Log for LogCrateLog {
    fn name(&self) -> &str {
        &self.name
    }

    fn backend(&self) -> &str {
        LOG_BACKEND
    }

    fn threshold(&self) -> LogLevel {
        threshold_for(::log::max_level())
    }

    fn write(&self, level: LogLevel, message: &str, cause: Option<&(dyn Error + 'static)>) {
        if !self.is_enabled(level) {
            return;
        }

        let target = self.name.as_str();
        let lvl = to_log_level(level);
        match cause {
            Some(cause) => {
                ::log::log!(target: target, lvl, "{}\t{}", message, render_cause(cause))
            }
            None => ::log::log!(target: target, lvl, "{}", message),
        }
    }
}

/// Available once a `log` logger has raised the max level above `Off`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCrateBackend;

impl LogBackend for LogCrateBackend {
    fn create(&self, name: &str) -> Result<LogHandle> {
        if ::log::max_level() == ::log::LevelFilter::Off {
            return Err(FacadeError::backend_unavailable(
                LOG_BACKEND,
                "no log crate logger installed",
            ));
        }
        Ok(Arc::new(LogCrateLog::new(name)))
    }
}
