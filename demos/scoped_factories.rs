//! Scoped factories example
//!
//! Demonstrates independent scopes, custom backends and the candidate cascade.
//!
//! Run with: cargo run --example scoped_factories

use rust_log_facade::core::{FactoryRegistry, LogHandle};
use rust_log_facade::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Log Facade - Scoped Factories Example ===\n");

    let audit_sink = Arc::new(MemorySink::new());
    let registry = FactoryRegistry::builder()
        // an unavailable backend, skipped with a diagnostic notice
        .backend_fn("syslog", |_| {
            Err(FacadeError::backend_unavailable("syslog", "no syslog socket"))
        })
        .backend_fn("audit", {
            let sink = audit_sink.clone();
            move |name| {
                Ok(Arc::new(ConsoleLog::new(name, sink.clone()).with_threshold(LogLevel::Info))
                    as LogHandle)
            }
        })
        .candidates(["syslog", "audit", "console"])
        .build();

    println!("1. Each scope gets its own factory:");
    let plugin_a = registry.get_log(&Scope::named("plugin-a"), "loader")?;
    let plugin_b = registry.get_log(&Scope::named("plugin-b"), "loader")?;
    println!("   same handle across scopes: {}", same_handle(&plugin_a, &plugin_b));

    let again = registry.get_log(&Scope::named("plugin-a"), "loader")?;
    println!("   same handle within a scope: {}", same_handle(&plugin_a, &again));

    println!("\n2. Loggers resolved through the cascade:");
    plugin_a.info_args("{} handlers registered", &[&4])?;
    plugin_b.debug("hidden below the audit threshold");
    plugin_b.warn("plugin-b is deprecated");

    for line in audit_sink.lines() {
        println!("   audit> {}", line);
    }

    println!("\n3. Resolution metrics:");
    let m = registry.metrics().snapshot();
    println!("   {:?}", m);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
