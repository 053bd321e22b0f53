//! Core facade types and traits

pub mod backend;
pub mod cache;
pub mod capability;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod factory;
pub mod formatter;
pub mod log_level;
pub mod metrics;
pub mod registry;
pub mod resolver;
pub mod scope;
pub mod sink;
pub mod timestamp;

pub use backend::{
    BackendTable, CandidateList, FnBackend, LogBackend, CONSOLE_BACKEND, DEFAULT_CANDIDATES,
    LOG_BACKEND, TRACING_BACKEND,
};
pub use cache::LoggerCache;
pub use capability::{render_cause, same_handle, Log, LogHandle};
pub use config::{ConsoleConfig, FacadeConfig};
pub use diagnostics::Diagnostics;
pub use error::{CandidateRejection, FacadeError, Result};
pub use factory::{
    DefaultLogFactory, FactoryConstructor, FactoryContext, FactoryTable, LogFactory,
    DEFAULT_FACTORY,
};
pub use formatter::{or_null, MessageFormatter, OrNull, PlaceholderFormatter, PLACEHOLDER};
pub use log_level::LogLevel;
pub use metrics::{FacadeMetrics, MetricsSnapshot};
pub use registry::{FactoryRegistry, FactoryRegistryBuilder};
pub use resolver::{AdapterResolver, ConstructionRecipe};
pub use scope::Scope;
pub use sink::{FileSink, MemorySink, Sink, StderrSink};
pub use timestamp::TimestampFormat;
