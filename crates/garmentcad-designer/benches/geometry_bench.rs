//! Criterion benchmarks for nesting and region lookup.
//! Piece counts: {10, 50, 200}; grid sizes: {3, 6, 12} lines per axis.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use garmentcad_core::{GeometryTolerance, NestingSettings};
use garmentcad_designer::{find_closed_region_at, pack, NestingPiece, Path, Point, Rotations};

fn pieces(count: usize) -> Vec<NestingPiece> {
    (0..count)
        .map(|i| {
            let w = 40.0 + (i * 37 % 90) as f64;
            let h = 30.0 + (i * 53 % 120) as f64;
            NestingPiece::new(
                format!("piece{i}"),
                vec![
                    Point::new(0.0, 0.0),
                    Point::new(w, 0.0),
                    Point::new(w, h),
                    Point::new(0.0, h),
                ],
            )
            .with_rotations(Rotations::quarter_turns())
        })
        .collect()
}

fn grid(lines: usize) -> Vec<Path> {
    let span = lines as f64 * 10.0;
    let mut paths = Vec::with_capacity(lines * 2);
    for i in 0..lines {
        let at = i as f64 * 10.0 + 5.0;
        let strip = |a: Point, b: Point, c: Point, d: Point| Path::from_points(&[a, b, c, d], true);
        if let Ok(p) = strip(
            Point::new(at, -5.0),
            Point::new(at + 1.0, -5.0),
            Point::new(at + 1.0, span + 5.0),
            Point::new(at, span + 5.0),
        ) {
            paths.push(p);
        }
        if let Ok(p) = strip(
            Point::new(-5.0, at),
            Point::new(span + 5.0, at),
            Point::new(span + 5.0, at + 1.0),
            Point::new(-5.0, at + 1.0),
        ) {
            paths.push(p);
        }
    }
    paths
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");
    let settings = NestingSettings::default();
    for &n in &[10usize, 50, 200] {
        let input = pieces(n);
        group.bench_with_input(BenchmarkId::new("shelf", n), &input, |b, input| {
            b.iter(|| pack(input, 1500.0, &settings))
        });
    }
    group.finish();
}

fn bench_regions(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_closed_region_at");
    let tolerance = GeometryTolerance::default();
    for &n in &[3usize, 6, 12] {
        let paths = grid(n);
        let probe = Point::new(10.0, 10.0);
        group.bench_with_input(BenchmarkId::new("grid", n), &paths, |b, paths| {
            b.iter(|| find_closed_region_at(paths, probe, &tolerance))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pack, bench_regions);
criterion_main!(benches);
