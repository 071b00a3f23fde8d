// ============================================================
// Layer 4 — Mel Batcher (collate with padding)
// ============================================================
// Implements Burn's Batcher trait to turn a Vec<MelSample> into
// tensors.
//
// Samples arrive with different frame counts (anything up to
// segment_len), so each one is padded at the end to the longest
// sample in the batch:
//
//   sample 0: [f0 f1 f2 f3 f4]          → [f0 f1 f2 f3 f4]
//   sample 1: [f0 f1 f2]                → [f0 f1 f2 P  P ]
//
// where P is a whole frame of PAD_VALUE. -20 is roughly log(1e-9),
// i.e. silence in a log-mel spectrogram.
//
// Output shapes:
//   mels:   [batch, max_frames, n_mels]
//   labels: [batch]
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::MelSample;

/// Log-mel value used for padding frames
pub const PAD_VALUE: f32 = -20.0;

// ─── MelBatch ─────────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct MelBatch<B: Backend> {
    /// Padded features — shape: [batch, max_frames, n_mels]
    pub mels: Tensor<B, 3>,

    /// Speaker ids — shape: [batch]
    pub labels: Tensor<B, 1, Int>,
}

impl<B: Backend> MelBatch<B> {
    pub fn batch_size(&self) -> usize {
        self.labels.dims()[0]
    }
}

// ─── MelBatcher ───────────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct MelBatcher<B: Backend> {
    /// Device the batch tensors are created on
    pub device: B::Device,
    pub pad_value: f32,
}

impl<B: Backend> MelBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device, pad_value: PAD_VALUE }
    }

    pub fn with_pad_value(mut self, pad_value: f32) -> Self {
        self.pad_value = pad_value;
        self
    }
}

impl<B: Backend> Batcher<MelSample, MelBatch<B>> for MelBatcher<B> {
    fn batch(&self, items: Vec<MelSample>) -> MelBatch<B> {
        let batch_size = items.len();
        let max_frames = items.iter().map(|s| s.mel.frames()).max().unwrap_or(0);
        let n_mels     = items.first().map(|s| s.mel.n_mels()).unwrap_or(0);

        // ── Pad and flatten features ──────────────────────────────────────────
        let mut mel_flat: Vec<f32> = Vec::with_capacity(batch_size * max_frames * n_mels);
        for sample in &items {
            mel_flat.extend_from_slice(sample.mel.as_slice());
            let missing = (max_frames - sample.mel.frames()) * n_mels;
            mel_flat.extend(std::iter::repeat(self.pad_value).take(missing));
        }

        // ── Stack labels ──────────────────────────────────────────────────────
        // each label is a length-1 array; concatenating gives [batch]
        let labels: Vec<i32> = items
            .iter()
            .flat_map(|s| s.label.iter().map(|&id| id as i32))
            .collect();

        let mels = Tensor::<B, 1>::from_floats(mel_flat.as_slice(), &self.device)
            .reshape([batch_size, max_frames, n_mels]);

        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        MelBatch { mels, labels }
    }
}
