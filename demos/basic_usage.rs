//! Basic facade usage example
//!
//! Demonstrates resolving a logger, the four call shapes and level probes.
//!
//! Run with: cargo run --example basic_usage

use rust_log_facade::prelude::*;
use rust_log_facade::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Log Facade - Basic Usage Example ===\n");

    // With no tracing subscriber or log logger installed, discovery falls
    // through to the console backend. Rejected candidates are reported on
    // stderr by the facade's diagnostics.
    let log = get_log("basic_usage")?;
    println!("1. Resolved backend: {}\n", log.backend());

    println!("2. Logging at different levels:");
    log.trace("This is a trace message");
    log.debug("This is a debug message");
    log.info("This is an info message");
    log.warn("This is a warning message");
    log.error("This is an error message");
    log.fatal("This is a fatal message");

    println!("\n3. Placeholder arguments:");
    log.info_args("Server listening on {}:{}", &[&"0.0.0.0", &8080])?;
    let missing: Option<&str> = None;
    log.info_args("Optional value is {}", &[&or_null(missing)])?;

    println!("\n4. Errors as causes:");
    let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    log.error_cause("Upstream unavailable", &err);
    log.warn_cause_args("Retry {} of {} failed", &err, &[&1, &3])?;

    println!("\n5. Guarding expensive messages:");
    if log.is_debug_enabled() {
        let summary: Vec<u32> = (1..=5).collect();
        log.debug_args("State summary: {}", &[&format!("{:?}", summary)])?;
    }

    println!("\n6. Macros:");
    info!(log, "Processed {} items in {}ms", 128, 42);
    warn!(log, cause = err, "Falling back to cache for {}", "user-7");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
