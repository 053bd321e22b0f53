//! File logging example
//!
//! Demonstrates a custom backend that writes console-format lines to a file,
//! selected through configuration.
//!
//! Run with: cargo run --example file_logging

use rust_log_facade::core::{FactoryRegistry, LogHandle};
use rust_log_facade::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Log Facade - File Logging Example ===\n");

    let file_sink = Arc::new(FileSink::new("application.log")?);
    let registry = FactoryRegistry::builder()
        .config(FacadeConfig::default().with_backend("file"))
        .backend_fn("file", {
            let sink = file_sink.clone();
            move |name| {
                Ok(Arc::new(
                    ConsoleLog::new(name, sink.clone())
                        .with_threshold(LogLevel::Debug)
                        .with_timestamp_format(TimestampFormat::Iso8601),
                ) as LogHandle)
            }
        })
        .build();

    let log = registry.get_log(&Scope::Global, "file_logging")?;

    println!("1. Logging to application.log:");
    log.info("Application started");
    log.debug("Loading configuration...");
    log.info("Configuration loaded successfully");
    log.warn("Using default settings for some options");
    log.trace("Trace output is below the threshold");

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        log.info_args("Processing item {}/{}", &[&i, &5])?;
        if i == 3 {
            log.warn("Item 3 took longer than expected");
        }
    }

    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "plugin.so not found");
    log.error_cause("Failed to load optional plugin", &err);
    file_sink.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the written lines.");

    Ok(())
}
