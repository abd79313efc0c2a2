//! Console benchmark: wrapping, appending and viewport rendering.
//!
//! Target: engine output (a few KB per move) appends in well under a frame.

use chess_console::console::{ConsoleView, LineBuffer, Wrapper, MAX_LINES};
use chess_console::surface::{Monospace, RecordingCanvas};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// A typical search line from a chess engine.
const SEARCH_LINE: &str =
    "  12->   1.23/30  0.41   1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 4. Ba4 Nf6 5. O-O Be7 6. Re1 b5\n";

fn wrap_short_line(c: &mut Criterion) {
    let measure = Monospace::default();
    let wrapper = Wrapper::new(&measure, 12, 560);

    c.bench_function("wrap_short_line", |b| {
        b.iter(|| wrapper.wrap(black_box("White(1): e4\n")));
    });
}

fn wrap_long_line(c: &mut Criterion) {
    let measure = Monospace::default();
    let wrapper = Wrapper::new(&measure, 12, 280);
    let text = SEARCH_LINE.repeat(4);

    c.bench_function("wrap_long_line", |b| {
        b.iter(|| wrapper.wrap(black_box(&text)));
    });
}

fn append_partial_chunks(c: &mut Criterion) {
    let measure = Monospace::default();
    let wrapper = Wrapper::new(&measure, 12, 560);

    c.bench_function("append_partial_chunks", |b| {
        let mut lines = LineBuffer::new(MAX_LINES);
        b.iter(|| {
            for chunk in SEARCH_LINE.as_bytes().chunks(16) {
                if let Ok(chunk) = std::str::from_utf8(chunk) {
                    lines.append(black_box(chunk), &wrapper);
                }
            }
        });
    });
}

fn append_at_capacity(c: &mut Criterion) {
    let measure = Monospace::default();
    let wrapper = Wrapper::new(&measure, 12, 560);
    let mut lines = LineBuffer::new(MAX_LINES);
    for _ in 0..MAX_LINES {
        lines.append(SEARCH_LINE, &wrapper);
    }

    c.bench_function("append_at_capacity", |b| {
        b.iter(|| black_box(lines.append(black_box(SEARCH_LINE), &wrapper)));
    });
}

fn render_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_visible");

    for line_count in [100, 1_000, MAX_LINES] {
        let mut view = ConsoleView::new(Monospace::default());
        view.set_size(560, 480);
        for _ in 0..line_count {
            view.append_text(SEARCH_LINE);
        }

        group.bench_with_input(
            BenchmarkId::new("lines", line_count),
            &view,
            |b, view| {
                b.iter(|| {
                    let mut canvas = RecordingCanvas::new();
                    black_box(view.render(&mut canvas))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    wrap_short_line,
    wrap_long_line,
    append_partial_chunks,
    append_at_capacity,
    render_scale,
);
criterion_main!(benches);
