//! Criterion benchmarks for pixscene critical paths
//!
//! Benchmarks the core operations:
//! - Tokenizer: line splitting
//! - Parser: full scene parsing
//! - Renderer: scene to image rendering

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pixscene::parser::{parse_str, ParseOptions};
use pixscene::renderer::{render_scene, RenderOptions};
use pixscene::tokenizer::tokenize;

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a `position 2` line with n coordinate pairs
fn make_position_line(n: usize, side: usize) -> String {
    let mut line = String::from("position 2");
    for i in 0..n {
        line.push_str(&format!(" {} {}", i % side, (i / side) % side));
    }
    line
}

/// Generate a `color 4` line with n RGBA groups
fn make_color_line(n: usize) -> String {
    let mut line = String::from("color 4");
    for i in 0..n {
        line.push_str(&format!(" {} {} {} 255", i % 256, (i * 7) % 256, (i * 13) % 256));
    }
    line
}

/// Generate a scene that fills a side×side image, one row per position record
fn make_scene(side: usize) -> String {
    let mut scene = format!("png {} {} bench.png\n", side, side);
    scene.push_str(&make_color_line(side));
    scene.push('\n');
    for y in 0..side {
        let mut line = String::from("position 2");
        for x in 0..side {
            line.push_str(&format!(" {} {}", x, y));
        }
        scene.push_str(&line);
        scene.push('\n');
    }
    scene.push_str(&format!("drawPixels {}\n", side));
    scene
}

// =============================================================================
// Tokenizer Benchmarks
// =============================================================================

fn bench_tokenizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer");

    for size in [16, 256, 4096].iter() {
        let line = make_position_line(*size, 64);
        group.throughput(Throughput::Elements((*size * 2) as u64));
        group.bench_with_input(BenchmarkId::new("tokenize", size), &line, |b, line| {
            b.iter(|| tokenize(black_box(line), "position 2".len()).count())
        });
    }

    group.bench_function("tokenize_wide_whitespace", |b| {
        let line = "color 4     255\t\t0   0     255          0 255 0 255   ";
        b.iter(|| tokenize(black_box(line), "color 4".len()).count())
    });

    group.finish();
}

// =============================================================================
// Parser Benchmarks
// =============================================================================

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");
    let options = ParseOptions::default();

    for side in [8, 32, 128].iter() {
        let content = make_scene(*side);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_scene", side), &content, |b, content| {
            b.iter(|| parse_str(black_box(content), &options))
        });
    }

    group.finish();
}

// =============================================================================
// Renderer Benchmarks
// =============================================================================

fn bench_renderer(c: &mut Criterion) {
    let mut group = c.benchmark_group("renderer");
    let options = RenderOptions::default();

    for side in [8, 32, 128].iter() {
        let parsed = parse_str(&make_scene(*side), &ParseOptions::default())
            .expect("generated scene should parse");
        group.throughput(Throughput::Elements((*side * *side) as u64));
        group.bench_with_input(BenchmarkId::new("render_scene", side), &parsed.scene, |b, scene| {
            b.iter(|| render_scene(black_box(scene), &options))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenizer, bench_parser, bench_renderer);
criterion_main!(benches);
