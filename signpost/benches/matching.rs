use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use futures_executor::block_on;
use hyper::Method;
use signpost::{build_router, HandlingOutcome, RouteParams, RouteTable};

fn handled(_: RouteParams) -> HandlingOutcome {
    HandlingOutcome::Handled
}

// Registers `count` routes which never match the probe paths, followed by the ones that do, so
// the probes measure a full walk of the table.
fn table_with(count: usize) -> RouteTable {
    let mut table = RouteTable::new();
    for i in 0..count {
        table
            .add(&format!("section{}/{{id:int}}/items/{{slug?}}", i), handled)
            .unwrap();
    }
    table.add("hello/{name:alpha}", handled).unwrap();
    table.add("users/{id:guid}/posts/{page:range(1,100)?}", handled).unwrap();
    table
}

fn matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");
    let probes = [
        "hello/World",
        "users/936DA01F-9ABD-4D9D-80C7-02AF85C822A8/posts/7",
        "nowhere/to/be/found",
    ];

    for count in [0usize, 10, 100] {
        let table = table_with(count);
        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_with_input(BenchmarkId::new("match_path", count), &table, |b, table| {
            b.iter(|| {
                for probe in &probes {
                    criterion::black_box(table.match_path(probe));
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("match_request", count), &table, |b, table| {
            b.iter(|| {
                for probe in &probes {
                    criterion::black_box(table.match_request(&Method::GET, probe));
                }
            })
        });
    }

    group.finish();
}

fn dispatch(c: &mut Criterion) {
    let router = build_router(|route| {
        route
            .route("hello/{name:alpha}", |_: RouteParams| HandlingOutcome::NotHandled)?
            .route("hello/{name}", handled)?
            .default_responder(handled);
        Ok(())
    })
    .unwrap();

    c.bench_function("dispatch fall-through", |b| {
        b.iter(|| block_on(router.dispatch("hello/World")).unwrap())
    });
    c.bench_function("dispatch encoded", |b| {
        b.iter(|| block_on(router.dispatch_encoded(None, "/hello/W%C3%B6rld")).unwrap())
    });
}

criterion_group!(benches, matching, dispatch);
criterion_main!(benches);
