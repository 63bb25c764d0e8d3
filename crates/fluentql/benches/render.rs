use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fluentql::{Query, Record, table};

/// SELECT col0, col1, ... FROM t WHERE col0 = ? AND col1 = ? ...
fn build_select(n: usize) -> Query {
    let columns: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let mut q = table("t").select(columns.iter().cloned());
    for (i, column) in columns.iter().enumerate() {
        q = q.where_eq(column, i as i64);
    }
    q
}

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/prepare");

    for n in [1, 5, 10, 50, 100] {
        let q = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &q, |b, q| {
            b.iter(|| black_box(q.prepare()));
        });
    }

    group.finish();
}

fn bench_literal(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/literal");

    for n in [1, 5, 10, 50, 100] {
        let q = build_select(n).to_sql();
        group.bench_with_input(BenchmarkId::from_parameter(n), &q, |b, q| {
            b.iter(|| black_box(q.get()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).prepare()));
        });
    }

    group.finish();
}

fn bench_nested_groups(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/nested_groups");

    for n in [2, 8, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let q = table("t")
                    .where_group(|q| {
                        for i in 0..n {
                            q.or_where_group(|q| {
                                q.where_eq("a", i as i64).where_in("b", [1, 2, 3]);
                                Ok(())
                            })?;
                        }
                        Ok(())
                    })
                    .unwrap();
                black_box(q.prepare())
            });
        });
    }

    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/insert");

    for n in [5, 20, 100] {
        let record: Record = (0..n).map(|i| (format!("col{i}"), i as i64)).collect();
        let q = table("t");
        group.bench_with_input(BenchmarkId::from_parameter(n), &record, |b, record| {
            b.iter(|| black_box(q.prepare_insert(record.clone())));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_prepare,
    bench_literal,
    bench_build_and_render,
    bench_nested_groups,
    bench_insert
);
criterion_main!(benches);
