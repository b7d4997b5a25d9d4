use std::path::Path;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use blf::config::BLFConfig;
use blf::io::read_catalogue;
use blf::opt::blf_optimizer::BLFOptimizer;
use nesty::entities::Catalogue;
use nesty::io::import::import_catalogue;

criterion_main!(benches);
criterion_group!(benches, blf_solve_bench, intersects_bench);

const INSTANCES: [&str; 3] = ["squares", "mixed", "bars"];

fn load(name: &str) -> (Catalogue, i64, i64) {
    let path = format!("../assets/{name}.json");
    let ext_catalogue = read_catalogue(Path::new(&path)).expect("could not read catalogue");
    let catalogue = import_catalogue(&ext_catalogue).expect("could not import catalogue");
    (catalogue, ext_catalogue.spacing, ext_catalogue.trimming)
}

/// Benchmark a complete nesting run on each of the reference catalogues
fn blf_solve_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("blf_solve");
    for name in INSTANCES {
        let (catalogue, spacing, trimming) = load(name);
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| {
                BLFOptimizer::new(&catalogue, BLFConfig::default(), spacing, trimming)
                    .expect("structural failure")
                    .solve()
            })
        });
    }
    group.finish();
}

/// Benchmark the exact intersection test between the silhouettes of a dense layout
fn intersects_bench(c: &mut Criterion) {
    let (catalogue, spacing, trimming) = load("mixed");
    let solution = BLFOptimizer::new(&catalogue, BLFConfig::default(), spacing, trimming)
        .expect("structural failure")
        .solve();
    let silhouettes = solution
        .placements
        .iter()
        .filter_map(|p| {
            let shape = catalogue.shape(p.shape_id)?;
            shape.silhouette(&p.transformation(), spacing).ok()
        })
        .collect::<Vec<_>>();

    let mut group = c.benchmark_group("intersects");
    group.throughput(criterion::Throughput::Elements(
        (silhouettes.len() * silhouettes.len()) as u64,
    ));
    group.bench_function("all_pairs", |b| {
        b.iter(|| {
            let mut n_collisions = 0;
            for s1 in silhouettes.iter() {
                for s2 in silhouettes.iter() {
                    if nesty::geometry::intersects(s1, s2) {
                        n_collisions += 1;
                    }
                }
            }
            n_collisions
        })
    });
    group.finish();
}
