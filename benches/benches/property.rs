// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `sun_property` notification and `sun_timing` polling.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use sun_property::{Property, Subscription};
use sun_timing::CallbackTimer;

fn bench_property_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("property/set");

    for observers in [0usize, 1, 4, 16] {
        let property = Property::new(0_u64);
        let sum = Rc::new(Cell::new(0_u64));
        let _subscriptions: Vec<Subscription> = (0..observers)
            .map(|_| {
                let sum = sum.clone();
                property.lazy_link(move |_, v| sum.set(sum.get().wrapping_add(*v)))
            })
            .collect();
        group.throughput(Throughput::Elements(observers.max(1) as u64));

        group.bench_with_input(BenchmarkId::new("changed", observers), &property, |b, property| {
            let mut next = 0_u64;
            b.iter(|| {
                next += 1;
                property.set(black_box(next));
            });
        });

        group.bench_with_input(BenchmarkId::new("unchanged", observers), &property, |b, property| {
            let current = property.get();
            b.iter(|| property.set(black_box(current)));
        });
    }

    group.finish();
}

fn bench_timer_poll(c: &mut Criterion) {
    let mut group = c.benchmark_group("timer/advance_poll");

    for interval_ms in [1u64, 10, 100] {
        group.bench_with_input(
            BenchmarkId::from_parameter(interval_ms),
            &interval_ms,
            |b, &interval_ms| {
                let mut timer =
                    CallbackTimer::new(Duration::ZERO, Duration::from_millis(interval_ms)).unwrap();
                timer.start();
                b.iter(|| {
                    timer.advance(Duration::from_millis(16));
                    let mut due = 0_u32;
                    while timer.poll() {
                        due += 1;
                    }
                    black_box(due)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_property_set, bench_timer_poll);
criterion_main!(benches);
