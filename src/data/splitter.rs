// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Randomly shuffles items and splits them into two sets:
//   - Training set:   used by the external training driver
//   - Validation set: fed to ml::validator
//
// Metadata lists utterances speaker by speaker, so an unshuffled
// split would put whole speakers in validation that the model never
// saw in training.
//
// The generator is passed in, so a seeded StdRng gives the same
// split on every run.
//
// Split ratio: 90% training by default.
//
// Reference: rand crate documentation (SliceRandom)

use std::sync::Arc;

use burn::data::dataset::Dataset;
use rand::seq::SliceRandom;
use rand::Rng;

/// Fraction of samples kept for training by default
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.9;

/// Randomly shuffle `samples` and split into (train, validation).
///
/// # Arguments
/// * `samples`        - All available samples (consumed by this function)
/// * `train_fraction` - Proportion for training, e.g. 0.9 = 90%
/// * `rng`            - Source of the shuffle
pub fn split_train_val<T, R>(mut samples: Vec<T>, train_fraction: f64, rng: &mut R) -> (Vec<T>, Vec<T>)
where
    R: Rng + ?Sized,
{
    samples.shuffle(rng);

    let total    = samples.len();
    let split_at = ((total as f64) * train_fraction.clamp(0.0, 1.0)).round() as usize;
    let split_at = split_at.min(total);

    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        samples.len(),
        val.len(),
    );

    (samples, val)
}

// ─── SubsetDataset ────────────────────────────────────────────────────────────
/// A view of selected indices of a shared dataset.
pub struct SubsetDataset<D> {
    inner:   Arc<D>,
    indices: Vec<usize>,
}

impl<D> SubsetDataset<D> {
    pub fn new(inner: Arc<D>, indices: Vec<usize>) -> Self {
        Self { inner, indices }
    }

    /// Indices into the wrapped dataset, in subset order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<D, I> Dataset<I> for SubsetDataset<D>
where
    D: Dataset<I>,
{
    fn get(&self, index: usize) -> Option<I> {
        self.indices.get(index).and_then(|&i| self.inner.get(i))
    }

    fn len(&self) -> usize {
        self.indices.len()
    }
}

/// Split every index of `dataset` into train and validation subsets.
pub fn split_dataset<D, I, R>(
    dataset: Arc<D>,
    train_fraction: f64,
    rng: &mut R,
) -> (SubsetDataset<D>, SubsetDataset<D>)
where
    D: Dataset<I>,
    R: Rng + ?Sized,
{
    let indices: Vec<usize> = (0..dataset.len()).collect();
    let (train, val) = split_train_val(indices, train_fraction, rng);
    (
        SubsetDataset::new(Arc::clone(&dataset), train),
        SubsetDataset::new(dataset, val),
    )
}
