// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Opens a dataset the same way training would and reports what is
// in it:
//
//   Step 1: Read metadata.json              (Layer 4 - data)
//   Step 2: Build the MelDataset            (Layer 4 - data)
//           → fails on unknown speakers / malformed JSON
//   Step 3: Collect mel_len statistics
//   Step 4: Check every feature file exists

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::config::DataConfig;
use crate::data::{dataset::MelDataset, loader::read_metadata};

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub n_mels:        usize,
    pub speakers:      usize,
    pub utterances:    usize,
    pub min_mel_len:   usize,
    pub mean_mel_len:  f64,
    pub max_mel_len:   usize,
    /// Utterances that will be randomly segmented at fetch time
    pub segmented:     usize,
    /// feature_path of every entry whose file is missing
    pub missing_files: Vec<String>,
}

pub struct InspectUseCase {
    config: DataConfig,
}

impl InspectUseCase {
    pub fn new(config: DataConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<DatasetSummary> {
        let cfg = &self.config;
        let dir = Path::new(&cfg.data_dir);

        // ── Step 1 + 2: metadata and dataset ──────────────────────────────────
        let metadata = read_metadata(dir)
            .with_context(|| format!("Cannot load metadata from '{}'", cfg.data_dir))?;
        let dataset = MelDataset::seeded(dir, cfg.segment_len, cfg.seed)
            .with_context(|| format!("Cannot open dataset '{}'", cfg.data_dir))?;

        // ── Step 3: frame statistics ──────────────────────────────────────────
        let lens: Vec<usize> = metadata.utterances().map(|u| u.mel_len).collect();
        let total: usize = lens.iter().sum();
        let mean_mel_len = if lens.is_empty() { 0.0 } else { total as f64 / lens.len() as f64 };

        // ── Step 4: integrity ─────────────────────────────────────────────────
        let missing_files: Vec<String> = dataset
            .missing_features()
            .into_iter()
            .map(|e| e.feature_path.clone())
            .collect();
        for path in &missing_files {
            tracing::warn!("Missing feature file: {}", path);
        }

        let summary = DatasetSummary {
            n_mels:       dataset.n_mels(),
            speakers:     dataset.speaker_count(),
            utterances:   dataset.len(),
            min_mel_len:  lens.iter().copied().min().unwrap_or(0),
            mean_mel_len,
            max_mel_len:  lens.iter().copied().max().unwrap_or(0),
            segmented:    lens.iter().filter(|&&n| n > cfg.segment_len).count(),
            missing_files,
        };

        tracing::info!(
            "{} utterances, {} speakers, {} longer than {} frames",
            summary.utterances, summary.speakers, summary.segmented, cfg.segment_len,
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn test_summary_counts() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_dataset(dir.path(), 5, &[("a", &[10, 40]), ("b", &[16])]);
        std::fs::remove_file(dir.path().join("b-0.pt")).unwrap();

        let cfg = DataConfig {
            data_dir: dir.path().to_string_lossy().into_owned(),
            segment_len: 16,
            ..Default::default()
        };
        let summary = InspectUseCase::new(cfg).execute().unwrap();

        assert_eq!(summary.n_mels, 5);
        assert_eq!(summary.speakers, 2);
        assert_eq!(summary.utterances, 3);
        assert_eq!(summary.min_mel_len, 10);
        assert_eq!(summary.max_mel_len, 40);
        assert!((summary.mean_mel_len - 22.0).abs() < 1e-9);
        assert_eq!(summary.segmented, 1);
        assert_eq!(summary.missing_files, vec!["b-0.pt".to_string()]);
    }

    #[test]
    fn test_missing_directory_fails() {
        let cfg = DataConfig { data_dir: "/definitely/not/here".into(), ..Default::default() };
        assert!(InspectUseCase::new(cfg).execute().is_err());
    }
}
