//! Criterion benchmarks for the EPD frame codec and render planners.
//!
//! The serial line is the real bottleneck (a full LCD clock face is
//! hundreds of frames at 115200 baud), so these exist to confirm that
//! planning and encoding stay negligible next to transmission.
//!
//! Run with:
//! ```bash
//! cargo bench --package epd-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use epd_core::render::digits::{plan_digits, FontStyle};
use epd_core::render::layout::wrap_lines;
use epd_core::{BaudRate, Color, Command, CoordinateEncoding, FontSize, Rotation};

// ── Command fixtures ──────────────────────────────────────────────────────────

fn catalog() -> Vec<(&'static str, Command)> {
    vec![
        ("Handshake", Command::Handshake),
        ("SetBaud", Command::SetBaud(BaudRate::B115200)),
        ("Update", Command::Update),
        ("SetRotation", Command::SetRotation(Rotation::Normal)),
        (
            "SetColor",
            Command::SetColor {
                foreground: Color::Black,
                background: Color::White,
            },
        ),
        ("SetEnglishFont", Command::SetEnglishFont(FontSize::Dots32)),
        ("DrawPixel", Command::DrawPixel { x: 400, y: 300 }),
        (
            "FillRect",
            Command::FillRect {
                x0: 0,
                y0: 0,
                x1: 799,
                y1: 599,
            },
        ),
        (
            "FillTriangle",
            Command::FillTriangle {
                x0: 20,
                y0: 0,
                x1: 30,
                y1: 30,
                x2: 10,
                y2: 10,
            },
        ),
        ("Clear", Command::Clear),
        (
            "DrawText",
            Command::DrawText {
                x: 16,
                y: 32,
                text: "benchmark text line of realistic length".to_string(),
            },
        ),
        (
            "DrawBitmap",
            Command::DrawBitmap {
                x: 0,
                y: 0,
                name: "PIC1.BMP".to_string(),
            },
        ),
    ]
}

// ── Benchmark groups ──────────────────────────────────────────────────────────

/// Benchmarks `Command::encode` for a representative command set.
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_command");
    for (name, command) in catalog() {
        group.bench_with_input(BenchmarkId::new("cmd", name), &command, |b, command| {
            b.iter(|| {
                black_box(command)
                    .encode(black_box(CoordinateEncoding::Standard))
                    .expect("encode must succeed")
            })
        });
    }
    group.finish();
}

/// Benchmarks digit planning for both fonts at clock-face sizes.
fn bench_plan_digits(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_digits");

    // LCD "HH:MM:SS": the heaviest everyday workload, 8 cells of up to
    // 28 triangles each plus pacing markers.
    group.bench_function("lcd_clock_face", |b| {
        b.iter(|| plan_digits(black_box(40), black_box(100), "12:34:56", 0.63, FontStyle::Lcd))
    });

    group.bench_function("block_clock_face", |b| {
        b.iter(|| {
            plan_digits(
                black_box(40),
                black_box(100),
                "12:34:56",
                2.5,
                FontStyle::Block,
            )
        })
    });

    group.finish();
}

/// Benchmarks greedy word wrap over a paragraph of prose.
fn bench_wrap_lines(c: &mut Criterion) {
    let paragraph = "The quick brown fox jumps over the lazy dog while the \
                     slow gray panel refreshes behind it, one deliberate \
                     update at a time, never in a hurry and never twice.";

    let mut group = c.benchmark_group("wrap_lines");
    for limit in [200u32, 400, 760] {
        group.bench_with_input(BenchmarkId::new("limit", limit), &limit, |b, &limit| {
            b.iter(|| wrap_lines(black_box(paragraph), limit, 32).expect("wrap must succeed"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_plan_digits, bench_wrap_lines);
criterion_main!(benches);
