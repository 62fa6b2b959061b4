//! Flush benchmark: Change detection and ANSI frame encoding.
//!
//! Target: < 500µs to encode a fully changed 200×50 frame.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::io;
use termframe::backend::Backend;
use termframe::{Attributes, Cell, Color, ColorDepth, Grid, StreamRenderer};

/// Fill a grid with varied glyphs and colors.
fn fill_grid(grid: &mut Grid, seed: u8) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let c = char::from(b'A' + ((x + y + u16::from(seed)) % 26) as u8);
            let fg = Color::rgb(
                ((x * 3 + u16::from(seed)) % 256) as u8,
                ((y * 7 + u16::from(seed)) % 256) as u8,
                ((x + y) % 256) as u8,
            );
            grid.draw_cell(
                i32::from(x),
                i32::from(y),
                Cell::styled(c, fg, Color::rgb(20, 20, 30), Attributes::empty()),
            );
        }
    }
}

fn flush_unchanged(c: &mut Criterion) {
    let mut grid = Grid::new(200, 50).unwrap();
    fill_grid(&mut grid, 0);
    let mut renderer = StreamRenderer::new(io::sink(), ColorDepth::TrueColor);
    renderer.flush(&mut grid).unwrap();

    c.bench_function("flush_200x50_unchanged", |b| {
        b.iter(|| renderer.flush(black_box(&mut grid)).unwrap());
    });
}

fn flush_single_change(c: &mut Criterion) {
    let mut grid = Grid::new(200, 50).unwrap();
    fill_grid(&mut grid, 0);
    let mut renderer = StreamRenderer::new(io::sink(), ColorDepth::TrueColor);
    renderer.flush(&mut grid).unwrap();
    let mut toggle = false;

    c.bench_function("flush_200x50_single_change", |b| {
        b.iter(|| {
            toggle = !toggle;
            let glyph = if toggle { 'X' } else { 'Y' };
            grid.draw(100, 25, glyph, Color::RED, Color::Unset, Attributes::empty());
            renderer.flush(black_box(&mut grid)).unwrap()
        });
    });
}

fn flush_full_change(c: &mut Criterion) {
    let mut group = c.benchmark_group("flush_full_change");
    for depth in [ColorDepth::TrueColor, ColorDepth::Palette16] {
        let mut grid = Grid::new(200, 50).unwrap();
        let mut renderer = StreamRenderer::new(io::sink(), depth);
        let mut seed = 0u8;

        group.bench_with_input(BenchmarkId::new("200x50", format!("{depth:?}")), &depth, |b, _| {
            b.iter(|| {
                seed = seed.wrapping_add(1);
                fill_grid(&mut grid, seed);
                renderer.flush(black_box(&mut grid)).unwrap()
            });
        });
    }
    group.finish();
}

fn encode_solid_rows(c: &mut Criterion) {
    let mut grid = Grid::new(200, 50).unwrap();
    grid.draw_rect(termframe::Coord::ZERO, termframe::Coord::new(200, 50), Color::BLUE);
    let mut renderer = StreamRenderer::new(io::sink(), ColorDepth::TrueColor);

    c.bench_function("encode_200x50_solid", |b| {
        b.iter(|| renderer.encode(black_box(grid.front())).len());
    });
}

criterion_group!(
    benches,
    flush_unchanged,
    flush_single_change,
    flush_full_change,
    encode_solid_rows
);
criterion_main!(benches);
