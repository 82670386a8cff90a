//! Performance benchmarks for the Tax Calculator.
//!
//! This benchmark suite covers:
//! - The core calculation at one salary per bracket
//! - A batch of 1000 calculations over a spread of salaries
//! - A quick-calculate request through the HTTP router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use tax_calculator::api::{AppState, create_router};
use tax_calculator::calculation::calculate;
use tax_calculator::config::ConfigLoader;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/app.yaml").expect("Failed to load config");
    AppState::new(config)
}

/// Benchmark: one calculation per bracket.
fn bench_calculate_by_bracket(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate");

    for salary in [200_000_i64, 400_000, 800_000, 1_500_000] {
        let gross = Decimal::from(salary);
        group.bench_with_input(BenchmarkId::from_parameter(salary), &gross, |b, gross| {
            b.iter(|| calculate(black_box(*gross)))
        });
    }

    group.finish();
}

/// Benchmark: 1000 calculations over salaries from 0 to ~2M.
fn bench_batch_1000(c: &mut Criterion) {
    let salaries: Vec<Decimal> = (0..1000_i64)
        .map(|i| Decimal::new(i * 200_017, 2))
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(salaries.len() as u64));

    group.bench_function("batch_1000", |b| {
        b.iter(|| {
            let total: Decimal = salaries
                .iter()
                .map(|gross| calculate(*gross).tax_paid)
                .sum();
            black_box(total)
        })
    });

    group.finish();
}

/// Benchmark: POST /tax/calculate through the router.
fn bench_quick_calculate_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();
    let router = create_router(state);
    let body = serde_json::json!({ "gross_salary": "1500000" }).to_string();

    c.bench_function("quick_calculate_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/tax/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_calculate_by_bracket,
    bench_batch_1000,
    bench_quick_calculate_request
);
criterion_main!(benches);
