use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use paramql::{ClauseKind, FieldDescriptor, FragmentBuilder, Value};
use std::collections::BTreeMap;

/// `n` condition descriptors plus one select and one order-by term, spread
/// over two aliases, and a model where every field is present.
fn setup(n: usize) -> (Vec<FieldDescriptor>, BTreeMap<String, Value>) {
    let mut descriptors = Vec::with_capacity(n + 2);
    let mut model = BTreeMap::new();
    for i in 0..n {
        let field = format!("f{i}");
        let alias = if i % 2 == 0 { "a" } else { "b" };
        descriptors.push(FieldDescriptor::new(
            field.clone(),
            format!("col{i} = :p{i}"),
            format!("p{i}"),
            alias,
        ));
        model.insert(field, Value::str(format!("value number {i}")));
    }
    descriptors.push(FieldDescriptor::new("sel", "col0", "", "a").kind(ClauseKind::Select));
    descriptors.push(FieldDescriptor::new("ord", "col0 DESC", "", "a").kind(ClauseKind::OrderBy));
    model.insert("sel".into(), Value::bool(true));
    model.insert("ord".into(), Value::bool(true));
    (descriptors, model)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("fragment_builder/build");

    for n in [1, 5, 10, 50, 100] {
        let (descriptors, model) = setup(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(FragmentBuilder::from_descriptors(&model, &descriptors)));
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("fragment_builder/render");

    for n in [1, 10, 100] {
        let (descriptors, model) = setup(n);
        let fragments = FragmentBuilder::from_descriptors(&model, &descriptors);
        group.bench_with_input(BenchmarkId::from_parameter(n), &fragments, |b, f| {
            b.iter(|| {
                black_box(f.conditions("a"));
                black_box(f.select("a"));
                black_box(f.order_by("a"));
                black_box(f.all_replacements());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_render);
criterion_main!(benches);
