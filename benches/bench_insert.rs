use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lineagedb::{
    LineageCatalog,
    bench_utils::{CatalogCorpus, CorpusShape, generate_corpus, load_corpus},
};

const CHAIN_SEED: u64 = 0xA17C;
const LAYER_SEED: u64 = 0xB25F;
const SAMPLE_SIZE: usize = 20;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

fn bench_scales() -> &'static [usize] {
    #[cfg(feature = "bench-ci")]
    {
        &[100, 500]
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        &[500, 2_000, 5_000]
    }
}

struct BenchCase {
    id: String,
    corpus: CatalogCorpus,
}

fn bench_cases() -> Vec<BenchCase> {
    let mut cases = Vec::new();
    for &size in bench_scales() {
        cases.push(BenchCase {
            id: format!("chain_{size}"),
            corpus: generate_corpus(CorpusShape::Chain, size, CHAIN_SEED + size as u64),
        });
        cases.push(BenchCase {
            id: format!("layered_{size}"),
            corpus: generate_corpus(
                CorpusShape::Layered { layers: 8, fan: 3 },
                size,
                LAYER_SEED + size as u64,
            ),
        });
    }
    cases
}

fn bench_create_datasets(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_datasets");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for case in bench_cases() {
        group.bench_function(BenchmarkId::from_parameter(&case.id), |b| {
            b.iter(|| {
                let catalog = LineageCatalog::open_in_memory().expect("catalog");
                for spec in &case.corpus.specs {
                    catalog.create_dataset(spec).expect("dataset");
                }
            });
        });
    }
    group.finish();
}

fn bench_load_with_edges(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_with_edges");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for case in bench_cases() {
        group.bench_function(BenchmarkId::from_parameter(&case.id), |b| {
            b.iter(|| {
                let catalog = LineageCatalog::open_in_memory().expect("catalog");
                load_corpus(&catalog, &case.corpus).expect("load");
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = insert_benches;
    config = Criterion::default();
    targets = bench_create_datasets, bench_load_with_edges
);
criterion_main!(insert_benches);
