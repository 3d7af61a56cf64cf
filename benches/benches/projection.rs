// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use flipbook_book::{Book, BookMachine, FlipTimings, PeelDirection, project};

fn machine_in(phase: &str, timings: FlipTimings) -> BookMachine {
    let mut m = BookMachine::new(64, timings);
    if phase == "closed" {
        return m;
    }
    m.advance(0);
    m.tick(10_000);
    m.advance(10_000);
    m.tick(20_000);
    match phase {
        "flipping_forward" => {
            m.advance(20_000);
        }
        "flipping_backward" => {
            m.retreat(20_000);
        }
        "peeling" => {
            m.begin_peel(PeelDirection::Prev);
            m.update_peel(0.4);
        }
        _ => {}
    }
    m
}

fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection/project");
    let timings = FlipTimings::default();
    let book = Book::new(
        "bench",
        Some("cover".to_string()),
        Some("back".to_string()),
        (0..64).map(|i| format!("page-{i}")),
    );

    for phase in ["closed", "open", "flipping_forward", "flipping_backward", "peeling"] {
        let machine = machine_in(phase, timings);
        group.bench_with_input(BenchmarkId::from_parameter(phase), &machine, |b, m| {
            b.iter(|| black_box(project(&book, m.state(), &timings)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_project);
criterion_main!(benches);
