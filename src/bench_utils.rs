use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    catalog::LineageCatalog,
    errors::CatalogError,
    model::{DatasetSpec, EdgeInsert},
};

/// Synthetic catalog corpus for benchmarks: dataset specs plus DAG edges
/// expressed as (upstream, downstream) indices into `specs`.
#[derive(Clone, Debug)]
pub struct CatalogCorpus {
    pub specs: Vec<DatasetSpec>,
    pub edges: Vec<(usize, usize)>,
}

impl CatalogCorpus {
    pub fn datasets(&self) -> usize {
        self.specs.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[derive(Clone, Copy, Debug)]
pub enum CorpusShape {
    /// One long pipeline: 0 -> 1 -> 2 -> ...
    Chain,
    /// Every dataset feeds one sink.
    FanIn,
    /// Datasets arranged in layers; each dataset draws random feeds from
    /// the previous layer. Edges always point forward, so the corpus is a
    /// DAG by construction.
    Layered { layers: usize, fan: usize },
}

pub fn generate_corpus(shape: CorpusShape, size: usize, seed: u64) -> CatalogCorpus {
    assert!(size > 1, "corpus size must exceed 1");
    let specs = build_specs(size);
    let edges = match shape {
        CorpusShape::Chain => (0..size - 1).map(|i| (i, i + 1)).collect(),
        CorpusShape::FanIn => (0..size - 1).map(|i| (i, size - 1)).collect(),
        CorpusShape::Layered { layers, fan } => layered_edges(size, layers, fan, seed),
    };
    CatalogCorpus { specs, edges }
}

/// Loads the whole corpus through the public mutation path. Returns how
/// many edges were freshly inserted.
pub fn load_corpus(
    catalog: &LineageCatalog,
    corpus: &CatalogCorpus,
) -> Result<usize, CatalogError> {
    for spec in &corpus.specs {
        catalog.create_dataset(spec)?;
    }
    let mut inserted = 0;
    for &(upstream, downstream) in &corpus.edges {
        let outcome = catalog.add_edge(
            &corpus.specs[upstream].fqn,
            &corpus.specs[downstream].fqn,
        )?;
        if outcome == EdgeInsert::Inserted {
            inserted += 1;
        }
    }
    Ok(inserted)
}

fn build_specs(size: usize) -> Vec<DatasetSpec> {
    (0..size)
        .map(|i| {
            DatasetSpec::new(format!("bench.warehouse.layer_{}.table_{i}", i % 7))
                .with_source_system("bench")
                .with_column("id", Some("bigint"))
                .with_column(format!("value_{i}"), Some("text"))
        })
        .collect()
}

fn layered_edges(size: usize, layers: usize, fan: usize, seed: u64) -> Vec<(usize, usize)> {
    let layers = layers.max(2);
    let per_layer = size.div_ceil(layers);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();
    for node in per_layer..size {
        let layer_start = (node / per_layer) * per_layer;
        let prev_start = layer_start - per_layer;
        for _ in 0..fan.max(1) {
            let upstream = rng.gen_range(prev_start..layer_start);
            edges.push((upstream, node));
        }
    }
    edges.sort();
    edges.dedup();
    edges
}
