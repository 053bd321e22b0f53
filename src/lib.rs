//! # Rust Log Facade
//!
//! A logging facade that binds named loggers to whichever backend is
//! available at runtime.
//!
//! ## Features
//!
//! - **Scoped factories**: one factory per [`Scope`](crate::core::Scope), created on first use
//! - **Backend discovery**: candidates are tried in priority order, and the
//!   first success is remembered as a fast path
//! - **Cached loggers**: repeated lookups return the identical handle
//! - **Uniform API**: six levels × four call shapes plus `is_<level>_enabled` probes
//! - **Built-in adapters**: `tracing`, `log` and a console fallback
//!
//! ```
//! use rust_log_facade::prelude::*;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let registry = FactoryRegistry::builder()
//!     .console_sink(sink.clone())
//!     .candidates(["console"])
//!     .diagnostics(Diagnostics::silent())
//!     .build();
//!
//! let log = registry.get_log(&Scope::Global, "app").unwrap();
//! if log.is_debug_enabled() {
//!     log.debug_args("config has {} entries", &[&12]).unwrap();
//! }
//! assert_eq!(sink.len(), 1);
//! ```

pub mod macros;

pub mod adapters;
pub mod core;

pub mod prelude {
    pub use crate::adapters::ConsoleLog;
    pub use crate::core::{
        or_null, same_handle, Diagnostics, FacadeConfig, FacadeError, FactoryRegistry, FileSink,
        Log, LogFactory, LogHandle, LogLevel, MemorySink, Result, Scope, Sink, TimestampFormat,
    };
    pub use crate::{get_log, get_log_in};
}

pub use crate::adapters::ConsoleLog;
pub use crate::core::registry::{
    get_factory, get_log, get_log_in, global, install_global, reset_global,
};
pub use crate::core::{
    FacadeConfig, FacadeError, FacadeMetrics, FactoryRegistry, Log, LogFactory, LogHandle,
    LogLevel, Result, Scope,
};
