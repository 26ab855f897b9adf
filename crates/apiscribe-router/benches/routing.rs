//! Route resolution benchmarks.
//!
//! Run with: `cargo bench -p apiscribe-router`

use apiscribe_router::RouteTable;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http::Method;

fn build_table(num_routes: usize) -> RouteTable {
    let mut table = RouteTable::new();

    for i in 0..num_routes / 3 {
        table
            .route(&Method::GET, &format!("/api/v1/resource{i}"), format!("getResource{i}"))
            .expect("valid route");
    }

    for i in 0..num_routes / 3 {
        table
            .route(
                &Method::GET,
                &format!("/api/v1/resource{i}/{{id:[0-9]+}}"),
                format!("getResourceById{i}"),
            )
            .expect("valid route");
    }

    for i in 0..num_routes / 3 {
        table
            .route(
                &Method::GET,
                &format!("/api/v1/org/{{orgId}}/resource{i}/{{id}}"),
                format!("getOrgResource{i}"),
            )
            .expect("valid route");
    }

    table
}

fn bench_static_match(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("static_match", |b| {
        b.iter(|| {
            black_box(table.resolve(&Method::GET, "/api/v1/resource20"));
        });
    });
}

fn bench_param_match(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("param_match", |b| {
        b.iter(|| {
            black_box(table.resolve(&Method::GET, "/api/v1/resource25/12345"));
        });
    });
}

fn bench_miss(c: &mut Criterion) {
    let table = build_table(100);

    c.bench_function("miss", |b| {
        b.iter(|| {
            black_box(table.resolve(&Method::GET, "/api/v1/nonexistent/path"));
        });
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for num_routes in [10, 50, 100, 500] {
        let table = build_table(num_routes);

        group.bench_with_input(
            BenchmarkId::new("param_match", num_routes),
            &num_routes,
            |b, &n| {
                let path = format!("/api/v1/resource{}/12345", n / 6);
                b.iter(|| black_box(table.resolve(&Method::GET, &path)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_static_match,
    bench_param_match,
    bench_miss,
    bench_scaling
);
criterion_main!(benches);
