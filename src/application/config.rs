// ============================================================
// Layer 2 — Data Configuration
// ============================================================
// Everything needed to open a dataset and build its loaders.
// Serialisable so a training driver can store it next to its own
// run configuration.

use serde::{Deserialize, Serialize};

use crate::data::dataset::DEFAULT_SEGMENT_LEN;
use crate::data::splitter::DEFAULT_TRAIN_FRACTION;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub data_dir:    String,
    pub segment_len: usize,
    pub batch_size:  usize,
    /// Fraction of utterances held out for validation
    pub valid_ratio: f64,
    /// Seeds both the split shuffle and segment selection
    pub seed:        u64,
    pub num_workers: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir:    "./Dataset".to_string(),
            segment_len: DEFAULT_SEGMENT_LEN,
            batch_size:  32,
            valid_ratio: 1.0 - DEFAULT_TRAIN_FRACTION,
            seed:        42,
            num_workers: 1,
        }
    }
}

impl DataConfig {
    pub fn train_fraction(&self) -> f64 {
        1.0 - self.valid_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_recipe() {
        let cfg = DataConfig::default();
        assert_eq!(cfg.segment_len, 128);
        assert!((cfg.train_fraction() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_json_roundtrip() {
        let cfg = DataConfig { data_dir: "data".into(), seed: 7, ..Default::default() };
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(serde_json::from_str::<DataConfig>(&json).unwrap(), cfg);
    }
}
