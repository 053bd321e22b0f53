//! Criterion benchmarks for rust_log_facade

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_log_facade::core::formatter::format;
use rust_log_facade::prelude::*;
use std::sync::Arc;

fn memory_registry() -> (FactoryRegistry, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let registry = FactoryRegistry::builder()
        .console_sink(sink.clone())
        .candidates(["console"])
        .config(FacadeConfig::default().with_console_level(LogLevel::Info))
        .diagnostics(Diagnostics::silent())
        .build();
    (registry, sink)
}

// ============================================================================
// Lookup Benchmarks
// ============================================================================

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    group.throughput(Throughput::Elements(1));

    let (registry, _sink) = memory_registry();
    let scope = Scope::named("bench");
    registry.get_log(&scope, "cached").unwrap();

    group.bench_function("cached_logger", |b| {
        b.iter(|| black_box(registry.get_log(black_box(&scope), black_box("cached")).unwrap()));
    });

    group.bench_function("fresh_scope_discovery", |b| {
        b.iter(|| {
            registry.reset();
            black_box(registry.get_log(&scope, black_box("fresh")).unwrap())
        });
    });

    group.finish();
}

// ============================================================================
// Call Site Benchmarks
// ============================================================================

fn bench_call_sites(c: &mut Criterion) {
    let mut group = c.benchmark_group("call_sites");
    group.throughput(Throughput::Elements(1));

    let (registry, sink) = memory_registry();
    let log = registry.get_log(&Scope::Global, "calls").unwrap();

    group.bench_function("disabled_debug_args", |b| {
        b.iter(|| log.debug_args(black_box("value {}"), &[&black_box(42)]).unwrap());
    });

    group.bench_function("is_debug_enabled", |b| {
        b.iter(|| black_box(log.is_debug_enabled()));
    });

    group.bench_function("enabled_info_args", |b| {
        b.iter(|| {
            log.info_args(black_box("value {} of {}"), &[&black_box(1), &black_box(2)])
                .unwrap();
            sink.clear();
        });
    });

    group.finish();
}

// ============================================================================
// Formatter Benchmarks
// ============================================================================

fn bench_formatter(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatter");
    group.throughput(Throughput::Elements(1));

    group.bench_function("no_args", |b| {
        b.iter(|| format(black_box("plain message without arguments"), &[]).unwrap());
    });

    group.bench_function("three_args", |b| {
        b.iter(|| {
            format(
                black_box("user {} did {} in {}ms"),
                &[&black_box(42), &black_box("login"), &black_box(3.5)],
            )
            .unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_lookup, bench_call_sites, bench_formatter);
criterion_main!(benches);
