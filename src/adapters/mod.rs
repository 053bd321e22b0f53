//! Built-in backend adapters

pub mod console;
#[cfg(feature = "log-bridge")]
pub mod log_bridge;
#[cfg(feature = "tracing-bridge")]
pub mod tracing_bridge;

pub use console::{ConsoleBackend, ConsoleLog};
#[cfg(feature = "log-bridge")]
pub use log_bridge::{LogCrateBackend, LogCrateLog};
#[cfg(feature = "tracing-bridge")]
pub use tracing_bridge::{TracingBackend, TracingLog, TRACING_TARGET};

use crate::core::{BackendTable, Diagnostics, FacadeConfig, Sink, CONSOLE_BACKEND};
use std::sync::Arc;

/// Register every adapter compiled into this build; console writes to stderr
pub fn register_defaults(
    table: &mut BackendTable,
    config: &FacadeConfig,
    diagnostics: &Diagnostics,
) {
    register_defaults_with_sink(table, config, diagnostics, None);
}

/// Like [`register_defaults`], with console output sent to `console_sink`
pub fn register_defaults_with_sink(
    table: &mut BackendTable,
    config: &FacadeConfig,
    diagnostics: &Diagnostics,
    console_sink: Option<Arc<dyn Sink>>,
) {
    #[cfg(feature = "tracing-bridge")]
    table.register(crate::core::TRACING_BACKEND, Arc::new(TracingBackend));

    #[cfg(feature = "log-bridge")]
    table.register(crate::core::LOG_BACKEND, Arc::new(LogCrateBackend));

    let console = match console_sink {
        Some(sink) => ConsoleBackend::new(config.console.clone(), sink, diagnostics.clone()),
        None => ConsoleBackend::from_config(config, diagnostics),
    };
    table.register(CONSOLE_BACKEND, Arc::new(console));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MemorySink;

    #[test]
    fn test_registers_compiled_adapters() {
        let mut table = BackendTable::new();
        register_defaults(&mut table, &FacadeConfig::default(), &Diagnostics::silent());

        assert!(table.contains("console"));
        assert_eq!(table.contains("tracing"), cfg!(feature = "tracing-bridge"));
        assert_eq!(table.contains("log"), cfg!(feature = "log-bridge"));
    }

    #[test]
    fn test_console_sink_override() {
        let sink = Arc::new(MemorySink::new());
        let mut table = BackendTable::new();
        register_defaults_with_sink(
            &mut table,
            &FacadeConfig::default(),
            &Diagnostics::silent(),
            Some(sink.clone()),
        );

        let log = table.get("console").unwrap().create("x").unwrap();
        log.info("to memory");
        assert_eq!(sink.len(), 1);
    }
}
