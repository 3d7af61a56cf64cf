// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use flipbook_book::{Book, BookViewer, Key, PointerId, ViewerConfig, ViewerInput};
use flipbook_timing::TimerQueue;
use kurbo::Point;

fn viewer(pages: u32) -> BookViewer<u32> {
    BookViewer::new(
        Book::new("bench", Some(u32::MAX), None, 0..pages),
        ViewerConfig::default(),
    )
}

fn bench_read_through(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewer/read_through");

    // One key press per spread until the book rests on its back cover.
    for pages in [8_u32, 64, 512] {
        group.throughput(Throughput::Elements(u64::from(pages / 2 + 2)));
        group.bench_with_input(BenchmarkId::from_parameter(pages), &pages, |b, &pages| {
            b.iter_batched(
                || viewer(pages),
                |mut v| {
                    let mut now = 0;
                    while !v.state().is_showing_back_cover() {
                        v.handle(ViewerInput::Key(Key::ArrowRight), now);
                        now += 1_000;
                        v.tick(now);
                    }
                    black_box(v.layers().len());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_peel_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewer/peel_drag");
    let finger = PointerId(1);

    for moves in [16_u32, 256] {
        group.throughput(Throughput::Elements(u64::from(moves)));
        group.bench_with_input(BenchmarkId::from_parameter(moves), &moves, |b, &moves| {
            b.iter_batched(
                || {
                    let mut v = viewer(16);
                    v.handle(ViewerInput::Key(Key::ArrowRight), 0);
                    v.tick(1_000);
                    v
                },
                |mut v| {
                    let start = Point::new(v.layout().bounds().x1 - 1.0, 10.0);
                    v.handle(ViewerInput::PointerDown { pointer: finger, pos: start }, 2_000);
                    for i in 0..moves {
                        let pos = start - kurbo::Vec2::new(f64::from(i), 0.0);
                        v.handle(ViewerInput::PointerMove { pointer: finger, pos }, 2_000);
                        black_box(v.layers().len());
                    }
                    v.handle(ViewerInput::PointerUp { pointer: finger }, 3_000);
                    black_box(v);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_timer_churn(c: &mut Criterion) {
    c.bench_function("timing/schedule_pop", |b| {
        b.iter(|| {
            let mut timers = TimerQueue::new();
            for i in 0..8_u64 {
                timers.schedule(i, 650 - i * 10, i);
            }
            let mut fired = 0;
            while let Some(timer) = timers.pop_due(1_000) {
                fired += timer.into_key();
            }
            black_box(fired)
        });
    });
}

criterion_group!(benches, bench_read_through, bench_peel_drag, bench_timer_churn);
criterion_main!(benches);
