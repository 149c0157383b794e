use criterion::{black_box, criterion_group, criterion_main, Criterion};
use florapart::{assign, lloyd, sample};
use florapart::{Centroid, ClusterConfig, PresenceTable, RegionUniverse};
use rand::prelude::*;

// ~30% presence per (entity, region) pair; entity lines without any
// region would be malformed and are not emitted
fn synthetic_data(regions: usize, entities: usize, rng: &mut StdRng) -> String {
    let mut data = String::new();
    for entity in 0..entities {
        let mut line = format!("e{:04}", entity);
        let mut any = false;
        for region in 0..regions {
            if rng.gen_bool(0.3) {
                line.push_str(&format!(",g{:03}", region));
                any = true;
            }
        }
        if any {
            data.push_str(&line);
            data.push('\n');
        }
    }
    data
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let mut rng = StdRng::seed_from_u64(42);
    let regions = 64;
    let entities = 512;
    let k = 8;

    let codes: Vec<String> = (0..regions).map(|i| format!("g{:03}", i)).collect();
    let universe = RegionUniverse::new(codes);
    let data = synthetic_data(regions, entities, &mut rng);
    let table = PresenceTable::from_reader(data.as_bytes()).unwrap();
    let vectors = table.materialize(&universe);
    let labels = sample::sample_centroids(&universe, k, 42).unwrap();
    let config = ClusterConfig::build().universe(universe).build();

    let centroids: Vec<Centroid> = labels
        .iter()
        .map(|label| {
            let value = vectors
                .vector_for(label)
                .map(<[f64]>::to_vec)
                .unwrap_or_else(|| vec![0.0; vectors.dims()]);
            Centroid::new(label.clone(), value)
        })
        .collect();

    group.bench_function("parse_r64_e512", |b| {
        b.iter(|| PresenceTable::from_reader(black_box(data.as_bytes())).unwrap())
    });

    group.bench_function("assign_r64_e512_k8", |b| {
        b.iter(|| assign::assign(black_box(&vectors), black_box(&centroids)))
    });

    group.bench_function("lloyd_r64_e512_k8", |b| {
        b.iter(|| lloyd::calculate(black_box(&vectors), labels.clone(), &config).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
