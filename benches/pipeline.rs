//! Benchmarks for the sprout pipeline.

use std::fs;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sprout::render::{Canvas, PixelRenderer, RenderStrategy, TurtleRenderer};
use sprout::{catalog, parse_rules, PlantSession, SeededRandom};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name)).unwrap()
}

// -- Parsing benchmarks --

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let rules_source = load_fixture("stochastic.rules");

    group.bench_function("parse_rules_small", |b| {
        b.iter(|| parse_rules(black_box("F=FF")).unwrap())
    });

    group.bench_function("parse_rules_stochastic", |b| {
        b.iter(|| parse_rules(black_box(&rules_source)).unwrap())
    });

    group.finish();
}

// -- Expansion benchmarks --

fn bench_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("expansion");

    let fern = catalog::find("branching-fern").unwrap();
    group.bench_function("expand_fern", |b| {
        b.iter(|| PlantSession::new(black_box(fern.clone()), "bench").unwrap())
    });

    let shrub = catalog::find("triple-adaptive-shrub").unwrap();
    group.bench_function("expand_shrub_stochastic", |b| {
        b.iter(|| PlantSession::new(black_box(shrub.clone()), "bench").unwrap())
    });

    group.finish();
}

// -- Rendering benchmarks --

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    group.sample_size(20);

    let mut session = PlantSession::new(catalog::find("branching-fern").unwrap(), "bench").unwrap();
    session.mature();
    let sentence = session.sentence().clone();
    let traits = session.traits().clone();

    group.bench_function("turtle_vector", |b| {
        let renderer = TurtleRenderer::default();
        b.iter(|| {
            let mut canvas = Canvas::new(512, 512);
            let mut rng = SeededRandom::new(1.0);
            renderer.render(
                black_box(&sentence),
                &traits,
                1000.0,
                &mut rng,
                &mut canvas,
            )
        })
    });

    group.bench_function("pixel_blocked", |b| {
        let renderer = PixelRenderer::new();
        b.iter(|| {
            let mut canvas = Canvas::new(512, 512);
            let mut rng = SeededRandom::new(1.0);
            renderer.render(
                black_box(&sentence),
                &traits,
                1000.0,
                &mut rng,
                &mut canvas,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_expansion, bench_rendering);
criterion_main!(benches);
