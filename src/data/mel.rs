// ============================================================
// Layer 4 — Mel-Spectrogram Tensor
// ============================================================
// A plain row-major buffer: frame t occupies
// data[t * n_mels .. (t + 1) * n_mels].
//
// Segmenting never pads. A tensor of at most `segment_len`
// frames comes back untouched; padding to a common length is
// the batcher's job.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MelSpectrogram {
    data:   Vec<f32>,
    frames: usize,
    n_mels: usize,
}

impl MelSpectrogram {
    /// Wrap a row-major buffer. Returns None if `data.len()` is not
    /// `frames * n_mels`.
    pub fn new(data: Vec<f32>, frames: usize, n_mels: usize) -> Option<Self> {
        (data.len() == frames * n_mels).then_some(Self { data, frames, n_mels })
    }

    pub fn frames(&self) -> usize { self.frames }

    pub fn n_mels(&self) -> usize { self.n_mels }

    pub fn as_slice(&self) -> &[f32] { &self.data }

    /// The `n_mels` values of frame `t`.
    pub fn frame(&self, t: usize) -> Option<&[f32]> {
        (t < self.frames).then(|| &self.data[t * self.n_mels..(t + 1) * self.n_mels])
    }

    /// Frames `start .. start + len`, or None if that runs past the end.
    pub fn window(&self, start: usize, len: usize) -> Option<Self> {
        let end = start.checked_add(len)?;
        if end > self.frames {
            return None;
        }
        Some(Self {
            data:   self.data[start * self.n_mels..end * self.n_mels].to_vec(),
            frames: len,
            n_mels: self.n_mels,
        })
    }

    /// Cut a uniformly placed `segment_len`-frame window out of a longer
    /// tensor; shorter or equal tensors are returned as they are.
    ///
    /// The start offset is drawn from `[0, frames - segment_len]`.
    pub fn random_segment<R: Rng + ?Sized>(self, segment_len: usize, rng: &mut R) -> Self {
        if self.frames <= segment_len {
            return self;
        }
        let start = rng.gen_range(0..=self.frames - segment_len);
        let n_mels = self.n_mels;
        let data = self.data[start * n_mels..(start + segment_len) * n_mels].to_vec();
        Self { data, frames: segment_len, n_mels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    /// frame t holds [t*10, t*10 + 1, ...]
    fn ramp(frames: usize, n_mels: usize) -> MelSpectrogram {
        let data = (0..frames)
            .flat_map(|t| (0..n_mels).map(move |m| (t * 10 + m) as f32))
            .collect();
        MelSpectrogram::new(data, frames, n_mels).unwrap()
    }

    #[test]
    fn test_new_checks_length() {
        assert!(MelSpectrogram::new(vec![0.0; 6], 2, 3).is_some());
        assert!(MelSpectrogram::new(vec![0.0; 5], 2, 3).is_none());
    }

    #[test]
    fn test_short_tensor_is_untouched() {
        let mel = ramp(4, 3);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(mel.clone().random_segment(4, &mut rng), mel);
        assert_eq!(mel.clone().random_segment(10, &mut rng), mel);
    }

    #[test]
    fn test_segment_is_contiguous_window() {
        let mel = ramp(50, 2);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let seg = mel.clone().random_segment(8, &mut rng);
            assert_eq!(seg.frames(), 8);
            assert_eq!(seg.n_mels(), 2);
            // first frame value encodes the start offset
            let start = (seg.frame(0).unwrap()[0] / 10.0) as usize;
            assert!(start <= 50 - 8);
            assert_eq!(seg, mel.window(start, 8).unwrap());
        }
    }

    #[test]
    fn test_window_bounds() {
        let mel = ramp(5, 1);
        assert_eq!(mel.window(3, 2).unwrap().as_slice(), &[30.0, 40.0]);
        assert!(mel.window(4, 2).is_none());
        assert!(mel.frame(5).is_none());
    }
}
