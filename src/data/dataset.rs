// ============================================================
// Layer 4 — Speaker Mel Dataset
// ============================================================
// Implements Burn's Dataset trait over a dataset directory.
//
// Construction reads mapping.json and metadata.json once and
// flattens every speaker's utterances into one index:
//
//   metadata.speakers (document order)
//     id10001: [a, b]          index 0 → (a, speaker2id[id10001])
//     id10300: [c]     ──▶     index 1 → (b, speaker2id[id10001])
//                              index 2 → (c, speaker2id[id10300])
//
// Feature tensors are read from disk on every fetch and never
// cached. Utterances longer than `segment_len` frames are cut to a
// random `segment_len` window; shorter ones pass through unpadded.
//
// Randomness comes from the generator handed to `with_rng`, so a
// seeded StdRng makes segment choice reproducible. `new` seeds from
// OS entropy, and then two fetches of the same index may return
// different windows.
//
// Reference: Burn Book §4 (Datasets)

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use burn::data::dataset::Dataset;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::loader::{load_mel, read_mapping, read_metadata};
use crate::data::mel::MelSpectrogram;
use crate::domain::error::DataError;
use crate::domain::metadata::SampleEntry;

/// Frames per segment unless configured otherwise
pub const DEFAULT_SEGMENT_LEN: usize = 128;

/// One (feature, label) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MelSample {
    /// [frames, n_mels] with frames ≤ segment_len
    pub mel: MelSpectrogram,

    /// The speaker id as a length-1 container, so every label has
    /// the same shape before collation
    pub label: [i64; 1],
}

pub struct MelDataset<R = StdRng> {
    data_dir:      PathBuf,
    segment_len:   usize,
    n_mels:        usize,
    speaker_count: usize,
    entries:       Vec<SampleEntry>,
    rng:           Mutex<R>,
}

impl MelDataset<StdRng> {
    /// Open `data_dir` with an entropy-seeded generator.
    pub fn new(data_dir: impl AsRef<Path>, segment_len: usize) -> Result<Self, DataError> {
        Self::with_rng(data_dir, segment_len, StdRng::from_entropy())
    }

    /// Open `data_dir` with a generator seeded from `seed`.
    pub fn seeded(data_dir: impl AsRef<Path>, segment_len: usize, seed: u64) -> Result<Self, DataError> {
        Self::with_rng(data_dir, segment_len, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MelDataset<R> {
    /// Open `data_dir`, drawing segment offsets from `rng`.
    ///
    /// Fails if either JSON file is missing or malformed, if
    /// `segment_len` is 0, or if a speaker in metadata.json has no
    /// entry in mapping.json.
    pub fn with_rng(data_dir: impl AsRef<Path>, segment_len: usize, rng: R) -> Result<Self, DataError> {
        let data_dir = data_dir.as_ref().to_path_buf();

        if segment_len == 0 {
            return Err(DataError::InvalidConfig("segment_len must be at least 1".into()));
        }

        let mapping  = read_mapping(&data_dir)?;
        let metadata = read_metadata(&data_dir)?;
        let entries  = metadata.flatten(&mapping)?;

        tracing::info!(
            "Loaded '{}': {} utterances from {} speakers (n_mels={}, segment_len={})",
            data_dir.display(),
            entries.len(),
            metadata.speaker_count(),
            metadata.n_mels,
            segment_len,
        );

        Ok(Self {
            data_dir,
            segment_len,
            n_mels: metadata.n_mels,
            speaker_count: metadata.speaker_count(),
            entries,
            rng: Mutex::new(rng),
        })
    }

    /// Number of flattened utterances.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct speakers under "speakers" in metadata.json; sizes the
    /// classifier's output layer.
    pub fn speaker_count(&self) -> usize {
        self.speaker_count
    }

    pub fn n_mels(&self) -> usize {
        self.n_mels
    }

    pub fn segment_len(&self) -> usize {
        self.segment_len
    }

    /// The flattened index, in dataset order.
    pub fn entries(&self) -> &[SampleEntry] {
        &self.entries
    }

    /// Entries whose feature file does not exist under the data dir.
    pub fn missing_features(&self) -> Vec<&SampleEntry> {
        self.entries
            .iter()
            .filter(|e| !self.data_dir.join(&e.feature_path).is_file())
            .collect()
    }

    /// Load sample `index`, segmenting it if it is longer than
    /// `segment_len` frames.
    pub fn fetch(&self, index: usize) -> Result<MelSample, DataError> {
        let entry = self.entries.get(index).ok_or(DataError::IndexOutOfBounds {
            index,
            len: self.entries.len(),
        })?;

        let mel = load_mel(&self.data_dir.join(&entry.feature_path), self.n_mels)?;

        let mel = {
            // a panic elsewhere while holding the lock leaves the generator usable
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            mel.random_segment(self.segment_len, &mut *rng)
        };

        Ok(MelSample {
            mel,
            label: [entry.speaker_id as i64],
        })
    }
}

// ─── Burn Dataset Trait Implementation ────────────────────────────────────────
// Burn's loader stops an epoch at the first None, so None is reserved
// for indices past the end. A feature file that cannot be read aborts
// the run instead of silently shortening the epoch.
impl<R: Rng + Send> Dataset<MelSample> for MelDataset<R> {
    fn get(&self, index: usize) -> Option<MelSample> {
        match self.fetch(index) {
            Ok(sample) => Some(sample),
            Err(DataError::IndexOutOfBounds { .. }) => None,
            Err(e) => {
                tracing::error!("Failed to fetch sample {}: {}", index, e);
                panic!("failed to fetch sample {index}: {e}");
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
