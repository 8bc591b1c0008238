//! Throughput of the photometric, time-budget and parsing paths.
//!
//! Run with: `cargo bench --package etc-bench`

use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use etc_bench::{
    CAD_RESPONSE, HORIZONS_RESPONSE, budget_workloads, exptime_grid, velocity_grid,
};
use etc_lib::prelude::*;
use std::hint::black_box;

fn depth_benchmark(c: &mut Criterion) {
    let calc = DepthCalculator::global();
    let exptimes = exptime_grid(100);

    let mut group = c.benchmark_group("depth");
    group.throughput(Throughput::Elements(
        (exptimes.len() * Filter::COUNT) as u64,
    ));

    for (name, conditions) in [
        ("dark", ObservingConditions::dark()),
        ("twilight", ObservingConditions::twilight().with_airmass(1.5)),
    ] {
        group.bench_with_input(
            BenchmarkId::new("depth_for_exposure_time", name),
            &conditions,
            |b, conditions| {
                b.iter(|| {
                    for filter in Filter::all() {
                        for &t in &exptimes {
                            black_box(calc.depth_for_exposure_time(t, *filter, conditions));
                        }
                    }
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("exposure_time_for_depth", name),
            &conditions,
            |b, conditions| {
                b.iter(|| {
                    for filter in Filter::all() {
                        for &t in &exptimes {
                            black_box(calc.exposure_time_for_depth(20.0 + t / 100.0, *filter, conditions));
                        }
                    }
                });
            },
        );
    }

    group.finish();
}

fn trailing_benchmark(c: &mut Criterion) {
    let velocities = velocity_grid(200);
    let seeing = Angle::from_arcseconds(0.8);
    let exptime = Time::from_seconds(30.0);

    let mut group = c.benchmark_group("trailing");
    group.throughput(Throughput::Elements(velocities.len() as u64));

    group.bench_function("typed", |b| {
        b.iter(|| {
            for &v in &velocities {
                black_box(trailing_losses(
                    AngularVelocity::from_degrees_per_day(v),
                    seeing,
                    exptime,
                ));
            }
        });
    });

    let inputs: Vec<Quantity> = velocities
        .iter()
        .map(|v| format!("{v} deg/day").parse().unwrap())
        .collect();
    let seeing_q: Quantity = "0.8 arcsec".parse().unwrap();
    let exptime_q: Quantity = "30 s".parse().unwrap();
    group.bench_function("checked", |b| {
        b.iter(|| {
            for v in &inputs {
                black_box(trailing_losses_checked(v, &seeing_q, &exptime_q).unwrap());
            }
        });
    });

    group.finish();
}

fn budget_benchmark(c: &mut Criterion) {
    let estimator = TimeBudgetEstimator::global();
    let mut group = c.benchmark_group("budget");

    for workload in budget_workloads() {
        let visit = workload.visit().unwrap();
        group.bench_with_input(
            BenchmarkId::new("estimate", workload.name),
            &visit,
            |b, visit| {
                b.iter(|| black_box(estimator.estimate(workload.n_fields, visit).unwrap()));
            },
        );
    }

    group.finish();
}

fn parse_benchmark(c: &mut Criterion) {
    let close_approach = Utc.with_ymd_and_hms(2023, 3, 14, 5, 12, 0).unwrap();

    let mut group = c.benchmark_group("parse");
    group.bench_function("close_approaches", |b| {
        b.iter(|| black_box(etc_fetch::parse_close_approaches(CAD_RESPONSE).unwrap()));
    });
    group.bench_function("ephemeris", |b| {
        b.iter(|| {
            black_box(
                etc_fetch::parse_ephemeris(HORIZONS_RESPONSE, "2023 EY", close_approach).unwrap(),
            )
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    depth_benchmark,
    trailing_benchmark,
    budget_benchmark,
    parse_benchmark
);
criterion_main!(benches);
