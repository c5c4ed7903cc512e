//! Benchmarks for descriptor parsing and layout.

use std::fs;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dlgview::parser::parse_descriptor;
use dlgview::types::{resolve_geometry, MarginMode};
use dlgview::DialogPreview;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

/// A display with `n` controls inside a `controls` container.
fn generated_dialog(n: usize) -> String {
    let mut source = String::from("class Generated {\n    idd = 9000;\n    class controls {\n");
    for i in 0..n {
        let x = (i % 20) as f64 * 0.045;
        let y = (i / 20) as f64 * 0.03;
        source.push_str(&format!(
            "        class Cell{i}: RscText {{ idc = {}; x = {x:.3}; y = {y:.3}; w = 0.04; h = 0.025; text = \"#{i}\"; }};\n",
            9000 + i
        ));
    }
    source.push_str("    };\n};\n");
    source
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let shop = load_fixture("shop.hpp");
    let large = generated_dialog(500);

    group.bench_function("parse_shop", |b| {
        b.iter(|| parse_descriptor(black_box(&shop)).unwrap())
    });

    group.bench_function("parse_generated_500", |b| {
        b.iter(|| parse_descriptor(black_box(&large)).unwrap())
    });

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");

    let large = generated_dialog(500);
    let parsed = parse_descriptor(&large).unwrap();

    group.bench_function("resolve_geometry_500", |b| {
        b.iter(|| resolve_geometry(black_box(&parsed.controls)))
    });

    group.bench_function("normalize_margins_500", |b| {
        let layout = resolve_geometry(&parsed.controls).layout;
        b.iter(|| black_box(layout.clone()).normalize_margins())
    });

    group.bench_function("preview_truncated_500", |b| {
        b.iter(|| DialogPreview::from_source(black_box(&large), MarginMode::Truncated).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_layout);
criterion_main!(benches);
