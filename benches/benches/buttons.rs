// Copyright 2025 the Sun Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `sun_buttons` dispatch paths.

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use sun_buttons::{
    ButtonContext, EventLog, Instrumentation, PushButtonModel, PushButtonOptions, RadioGroup,
};
use sun_property::Property;

fn bench_push_fire(c: &mut Criterion) {
    let mut group = c.benchmark_group("push/fire");

    for listeners in [1usize, 4, 32] {
        let model = PushButtonModel::new(PushButtonOptions::default()).unwrap();
        let count = Rc::new(Cell::new(0_u64));
        for _ in 0..listeners {
            let count = count.clone();
            model.add_listener(Rc::new(move || count.set(count.get() + 1)));
        }
        group.throughput(Throughput::Elements(listeners as u64));

        group.bench_with_input(BenchmarkId::new("click", listeners), &model, |b, model| {
            b.iter(|| {
                model.set_over(true);
                model.set_down(true).unwrap();
                model.set_down(false).unwrap();
            });
        });

        group.bench_with_input(BenchmarkId::new("fire", listeners), &model, |b, model| {
            b.iter(|| black_box(model.fire()));
        });
    }

    group.finish();
}

fn bench_push_instrumented(c: &mut Criterion) {
    let mut group = c.benchmark_group("push/instrumented");

    // The log grows with every fire; rebuild it per batch.
    group.bench_function("event_log", |b| {
        b.iter_batched(
            || {
                let log = Rc::new(EventLog::new());
                let model = PushButtonModel::new_in(
                    PushButtonOptions::default().with_phetio_id("bench"),
                    ButtonContext::default().with_instrumentation(log.clone() as Rc<dyn Instrumentation>),
                )
                .unwrap();
                model.add_listener(Rc::new(|| {}));
                (log, model)
            },
            |(log, model)| {
                for _ in 0..64 {
                    model.fire().unwrap();
                }
                black_box(log.is_balanced());
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_hold_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("push/hold_step");

    // One simulated second at different frame rates.
    for frame_ms in [1u64, 16, 33] {
        let frames = 1_000 / frame_ms;
        group.throughput(Throughput::Elements(frames));
        group.bench_with_input(BenchmarkId::from_parameter(frame_ms), &frame_ms, |b, &frame_ms| {
            b.iter_batched(
                || {
                    let model =
                        PushButtonModel::new(PushButtonOptions::default().with_fire_on_hold(true))
                            .unwrap();
                    model.add_listener(Rc::new(|| {}));
                    model.set_over(true);
                    model.set_down(true).unwrap();
                    model
                },
                |model| {
                    for _ in 0..frames {
                        model.step(Duration::from_millis(frame_ms)).unwrap();
                    }
                    black_box(model);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_radio_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("radio/select_all");

    for len in [4usize, 16, 64] {
        let selection = Property::new(0_usize);
        let radio = RadioGroup::new(selection, 0..len, "bench", ButtonContext::default()).unwrap();
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::from_parameter(len), &radio, |b, radio| {
            b.iter(|| {
                for member in radio.members() {
                    member.fire().unwrap();
                }
                black_box(radio.selected_index())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_push_fire,
    bench_push_instrumented,
    bench_hold_step,
    bench_radio_select
);
criterion_main!(benches);
