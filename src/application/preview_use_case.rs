// ============================================================
// Layer 2 — PreviewUseCase
// ============================================================
// Dry run of the input pipeline a training driver would build:
//
//   Step 1: Open the dataset with a seeded generator  (Layer 4)
//   Step 2: Split train / validation (seeded)         (Layer 4)
//   Step 3: Build burn dataloaders with MelBatcher    (Layer 4)
//   Step 4: Walk the validation loader once and record
//           the padded batch shapes
//
// Runs on the NdArray CPU backend; nothing here needs a GPU.

use std::sync::Arc;

use anyhow::{Context, Result};
use burn::data::dataloader::DataLoaderBuilder;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;

use crate::application::config::DataConfig;
use crate::data::{
    batcher::MelBatcher,
    dataset::{MelDataset, MelSample},
    splitter::split_dataset,
};

type PreviewBackend = burn::backend::NdArray;

#[derive(Debug, Clone, Serialize)]
pub struct PreviewSummary {
    pub train_items:  usize,
    pub valid_items:  usize,
    /// [batch, frames, n_mels] of every validation batch, in order
    pub valid_shapes: Vec<[usize; 3]>,
}

pub struct PreviewUseCase {
    config: DataConfig,
}

impl PreviewUseCase {
    pub fn new(config: DataConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<PreviewSummary> {
        let cfg = &self.config;
        anyhow::ensure!(cfg.batch_size > 0, "batch_size must be at least 1");
        anyhow::ensure!(cfg.num_workers > 0, "num_workers must be at least 1");
        anyhow::ensure!(
            (0.0..=1.0).contains(&cfg.valid_ratio),
            "valid_ratio must be within [0, 1], got {}",
            cfg.valid_ratio
        );

        // ── Step 1: Dataset ───────────────────────────────────────────────────
        let dataset = MelDataset::seeded(&cfg.data_dir, cfg.segment_len, cfg.seed)
            .with_context(|| format!("Cannot open dataset '{}'", cfg.data_dir))?;
        let dataset = Arc::new(dataset);

        // ── Step 2: Split ─────────────────────────────────────────────────────
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let (train_set, valid_set) =
            split_dataset::<_, MelSample, _>(dataset, cfg.train_fraction(), &mut rng);
        tracing::info!(
            "Split: {} train, {} validation",
            train_set.len(),
            valid_set.len()
        );

        // ── Step 3: Dataloaders ───────────────────────────────────────────────
        let device  = burn::backend::ndarray::NdArrayDevice::default();
        let batcher = MelBatcher::<PreviewBackend>::new(device);

        let train_loader = DataLoaderBuilder::new(batcher.clone())
            .batch_size(cfg.batch_size)
            .shuffle(cfg.seed)
            .num_workers(cfg.num_workers)
            .build(train_set);

        let valid_loader = DataLoaderBuilder::new(batcher)
            .batch_size(cfg.batch_size)
            .num_workers(cfg.num_workers)
            .build(valid_set);

        // ── Step 4: One pass over validation ──────────────────────────────────
        let valid_shapes: Vec<[usize; 3]> = valid_loader
            .iter()
            .map(|batch| batch.mels.dims())
            .inspect(|dims| tracing::debug!("Validation batch {:?}", dims))
            .collect();

        Ok(PreviewSummary {
            train_items: train_loader.num_items(),
            valid_items: valid_loader.num_items(),
            valid_shapes,
        })
    }
}
