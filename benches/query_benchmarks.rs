use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use workoutlog::{filter, summarize, Intensity, Workout, WorkoutFilter, WorkoutRepository};

/// Benchmarks for the view derivations the UI runs after every mutation

const TYPES: [&str; 5] = ["Running", "Cycling", "Squat", "Yoga", "Swimming"];

fn create_workout_dataset(size: usize) -> Vec<Workout> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();

    (0..size)
        .map(|i| Workout {
            id: i.to_string(),
            exercise_type: TYPES[i % TYPES.len()].to_string(),
            duration: 20 + (i % 70) as u32,
            date: start + Duration::days(i as i64),
            intensity: Intensity::ALL[i % 3],
            notes: if i % 4 == 0 {
                Some("leg day, felt strong".to_string())
            } else {
                None
            },
            created_at: created + Duration::days(i as i64),
            updated_at: None,
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filter");
    let criteria = WorkoutFilter::new().with_type("Squat").with_search("leg");

    for &size in &[10, 100, 1000, 10000] {
        let workouts = create_workout_dataset(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("type_and_search", size), &workouts, |b, workouts| {
            b.iter(|| filter(black_box(workouts), &criteria).len());
        });
    }

    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Summarize");

    for &size in &[10, 100, 1000, 10000] {
        let workouts = create_workout_dataset(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("summarize", size), &workouts, |b, workouts| {
            b.iter(|| summarize(black_box(workouts)));
        });
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("Snapshot");

    for &size in &[100, 1000] {
        let workouts = create_workout_dataset(size);

        group.bench_with_input(BenchmarkId::new("save_load", size), &workouts, |b, workouts| {
            b.iter(|| {
                let mut repo = WorkoutRepository::in_memory();
                repo.save(workouts).unwrap();
                repo.load().unwrap().len()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_summarize, bench_snapshot);
criterion_main!(benches);
