use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fuzzy_timeline::compute::temporal::{aggregate, histogram, objects_at, partition_visible, ticks_for};
use fuzzy_timeline::{
    Config, DataObject, Dataset, MILLIS_PER_DAY, SpanWidth, TimeExtent, TimelineController, Timestamp,
};

fn sample_datasets(count: usize) -> Vec<Dataset> {
    let origin = Timestamp::from_millis(0);
    let objects = (0..count).map(|i| {
        let begin = origin.saturating_add_millis((i as i64 % 3650) * MILLIS_PER_DAY);
        if i % 2 == 0 {
            DataObject::exact(format!("exact:{}", i), begin)
        } else {
            let end = begin.saturating_add_millis((i as i64 % 90 + 1) * MILLIS_PER_DAY);
            DataObject::fuzzy(format!("fuzzy:{}", i), begin, end)
        }
    });
    vec![Dataset::from_objects("bench", objects)]
}

fn benchmark_extent_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("extent_operations");

    for size in [1_000, 10_000, 100_000] {
        let datasets = sample_datasets(size);
        group.bench_with_input(BenchmarkId::new("aggregate", size), &datasets, |b, datasets| {
            b.iter(|| aggregate(black_box(datasets)).unwrap())
        });
    }

    let object = DataObject::fuzzy(
        "span",
        Timestamp::from_millis(3 * MILLIS_PER_DAY / 2),
        Timestamp::from_millis(40 * MILLIS_PER_DAY),
    );
    group.bench_function("ticks_for", |b| {
        b.iter(|| {
            ticks_for(
                black_box(&object),
                Timestamp::from_millis(0),
                SpanWidth::from_days(7.0),
            )
            .unwrap()
        })
    });

    group.finish();
}

fn benchmark_binning(c: &mut Criterion) {
    let mut group = c.benchmark_group("binning");

    let datasets = sample_datasets(10_000);
    let extent = aggregate(&datasets).unwrap();
    let objects = &datasets[0].objects;

    for days in [1.0, 7.0, 30.0] {
        let width = SpanWidth::from_days(days);
        let bins = (extent.duration_millis() as f64 / width.as_millis()).floor() as usize + 1;
        group.bench_with_input(BenchmarkId::new("histogram_days", days as u32), &width, |b, width| {
            b.iter(|| histogram(black_box(objects), extent.min(), bins, *width).unwrap())
        });
    }

    group.finish();
}

fn benchmark_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    let datasets = sample_datasets(10_000);
    let at = Timestamp::from_millis(1000 * MILLIS_PER_DAY);
    let window = TimeExtent::new(at, at.saturating_add_millis(30 * MILLIS_PER_DAY));

    group.bench_function("objects_at", |b| {
        b.iter(|| objects_at(black_box(&datasets), black_box(at)))
    });

    group.bench_function("partition_visible", |b| {
        b.iter(|| partition_visible(black_box(&datasets), black_box(window)))
    });

    group.finish();
}

fn benchmark_controller(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller");

    let datasets = sample_datasets(10_000);

    group.bench_function("load_10k", |b| {
        b.iter(|| {
            let mut controller = TimelineController::new(Config::default()).unwrap();
            controller.load(black_box(datasets.clone())).unwrap();
            controller
        })
    });

    let mut controller = TimelineController::new(Config::default()).unwrap();
    controller.load(datasets.clone()).unwrap();
    let window = TimeExtent::new(
        Timestamp::from_millis(500 * MILLIS_PER_DAY),
        Timestamp::from_millis(900 * MILLIS_PER_DAY),
    );
    let (shown, hidden) = controller.partition(window).unwrap();

    group.bench_function("span_changed", |b| {
        b.iter(|| {
            controller
                .span_changed(SpanWidth::from_days(14.0), black_box(&shown), black_box(&hidden))
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_extent_operations,
    benchmark_binning,
    benchmark_queries,
    benchmark_controller
);
criterion_main!(benches);
