// ============================================================
// Layer 5 — Validation Loop
// ============================================================
// Runs a classifier over every batch of a validation loader and
// averages loss and accuracy per batch:
//
//   for each batch (in loader order):
//       scores   = model(mels)                 [batch, n_speakers]
//       loss     = criterion(scores, labels)
//       accuracy = mean(argmax(scores, 1) == labels)
//       running sums += (loss, accuracy)
//
//   result = running_accuracy / number_of_batches
//
// The average is over batches, not samples: a short last batch
// weighs as much as a full one.
//
// The model is in eval mode for the whole pass and gets its prior
// mode back afterwards (see ml::mode), whether the pass finishes,
// returns an error or unwinds from a panic in the model or loss.
// Nothing is caught or retried.
//
// Key burn insight:
//   argmax(1) returns [batch, 1], so we flatten before .equal()

use burn::{
    data::dataloader::DataLoader,
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::data::batcher::MelBatch;
use crate::domain::error::ValidationError;
use crate::domain::traits::ModelMode;
use crate::infra::progress::ValidProgress;
use crate::ml::classifier::{Criterion, SpeakerClassifier};
use crate::ml::mode::ModeGuard;

/// Loss and accuracy of a single batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchScore {
    pub loss:     f64,
    /// Fraction of samples whose arg-max class equals the label, in [0, 1]
    pub accuracy: f64,
}

/// Averages over one full validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Mean of per-batch losses
    pub loss:     f64,
    /// Mean of per-batch accuracies
    pub accuracy: f64,
    pub batches:  usize,
    pub samples:  usize,
}

/// Forward one batch and score it.
///
/// Moves the batch to `device`, runs the model, applies the
/// criterion and compares arg-max predictions with the labels.
pub fn model_fn<B, M, C>(batch: MelBatch<B>, model: &M, criterion: &C, device: &B::Device) -> BatchScore
where
    B: Backend,
    M: SpeakerClassifier<B> + ?Sized,
    C: Criterion<B> + ?Sized,
{
    let mels   = batch.mels.to_device(device);
    let labels = batch.labels.to_device(device);
    let batch_size = labels.dims()[0];

    let scores = model.forward(mels);
    let loss   = criterion.loss(scores.clone(), labels.clone());

    // speaker id with the highest score
    let preds = scores.argmax(1).flatten::<1>(0, 1);
    let correct: i64 = preds
        .equal(labels)
        .int().sum().into_scalar().elem::<i64>();

    let accuracy = if batch_size > 0 { correct as f64 / batch_size as f64 } else { 0.0 };

    BatchScore {
        loss: loss.into_scalar().elem::<f64>(),
        accuracy,
    }
}

/// Validate and return the mean per-batch accuracy.
pub fn validate<B, M, C>(
    dataloader: &dyn DataLoader<MelBatch<B>>,
    model:      &mut M,
    criterion:  &C,
    device:     &B::Device,
) -> Result<f64, ValidationError>
where
    B: Backend,
    M: SpeakerClassifier<B> + ?Sized,
    C: Criterion<B> + ?Sized,
{
    run_validation(dataloader, model, criterion, device).map(|report| report.accuracy)
}

/// Validate and return both averages plus batch/sample counts.
pub fn run_validation<B, M, C>(
    dataloader: &dyn DataLoader<MelBatch<B>>,
    model:      &mut M,
    criterion:  &C,
    device:     &B::Device,
) -> Result<ValidationReport, ValidationError>
where
    B: Backend,
    M: SpeakerClassifier<B> + ?Sized,
    C: Criterion<B> + ?Sized,
{
    let progress = ValidProgress::new(dataloader.num_items());
    validation_pass(dataloader, model, criterion, device, &progress)
}

fn validation_pass<B, M, C>(
    dataloader: &dyn DataLoader<MelBatch<B>>,
    model:      &mut M,
    criterion:  &C,
    device:     &B::Device,
    progress:   &ValidProgress,
) -> Result<ValidationReport, ValidationError>
where
    B: Backend,
    M: SpeakerClassifier<B> + ?Sized,
    C: Criterion<B> + ?Sized,
{
    let model = ModeGuard::enter(model, ModelMode::Eval);

    let mut running_loss     = 0.0f64;
    let mut running_accuracy = 0.0f64;
    let mut batches          = 0usize;
    let mut samples          = 0usize;

    for batch in dataloader.iter() {
        let batch_size = batch.batch_size();
        let score = model_fn(batch, &*model, criterion, device);

        running_loss     += score.loss;
        running_accuracy += score.accuracy;
        batches          += 1;
        samples          += batch_size;

        progress.advance(
            batch_size,
            running_loss / batches as f64,
            running_accuracy / batches as f64,
        );
    }

    progress.finish();

    if batches == 0 {
        tracing::warn!("Validation loader produced no batches");
        return Err(ValidationError::EmptyLoader);
    }

    let report = ValidationReport {
        loss:     running_loss / batches as f64,
        accuracy: running_accuracy / batches as f64,
        batches,
        samples,
    };

    tracing::info!(
        "Validation: loss={:.4} accuracy={:.4} over {} batches ({} utterances)",
        report.loss, report.accuracy, report.batches, report.samples,
    );

    Ok(report)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::Arc;

    use burn::backend::NdArray;
    use burn::data::dataloader::batcher::Batcher;
    use burn::data::dataloader::DataLoaderBuilder;
    use burn::data::dataset::InMemDataset;

    use crate::data::batcher::MelBatcher;
    use crate::data::dataset::MelSample;
    use crate::data::mel::MelSpectrogram;
    use crate::domain::traits::ModeSwitch;
    use crate::ml::classifier::CrossEntropyCriterion;

    type TestBackend = NdArray;

    const N_CLASSES: usize = 3;

    /// Predicts the class written in the first feature of each sample.
    /// Panics if called outside eval mode.
    struct EchoClassifier {
        mode: ModelMode,
    }

    impl ModeSwitch for EchoClassifier {
        fn mode(&self) -> ModelMode { self.mode }
        fn set_mode(&mut self, mode: ModelMode) { self.mode = mode; }
    }

    impl<B: Backend> SpeakerClassifier<B> for EchoClassifier {
        fn forward(&self, mels: Tensor<B, 3>) -> Tensor<B, 2> {
            assert_eq!(self.mode, ModelMode::Eval, "forward called in train mode");
            let [batch, frames, n_mels] = mels.dims();
            let device = mels.device();
            let data: Vec<f32> = mels.into_data().to_vec().unwrap();

            let mut scores = vec![0.0f32; batch * N_CLASSES];
            for i in 0..batch {
                let class = data[i * frames * n_mels] as usize;
                scores[i * N_CLASSES + class] = 5.0;
            }
            Tensor::from_floats(TensorData::new(scores, [batch, N_CLASSES]), &device)
        }
    }

    /// Fails every forward pass.
    struct BrokenClassifier {
        mode: ModelMode,
    }

    impl ModeSwitch for BrokenClassifier {
        fn mode(&self) -> ModelMode { self.mode }
        fn set_mode(&mut self, mode: ModelMode) { self.mode = mode; }
    }

    impl<B: Backend> SpeakerClassifier<B> for BrokenClassifier {
        fn forward(&self, _mels: Tensor<B, 3>) -> Tensor<B, 2> {
            panic!("shape mismatch in classifier");
        }
    }

    /// (predicted class, true label) → sample the EchoClassifier will
    /// predict as `predicted`
    fn sample(predicted: usize, label: i64) -> MelSample {
        MelSample {
            mel: MelSpectrogram::new(vec![predicted as f32; 2 * 4], 2, 4).unwrap(),
            label: [label],
        }
    }

    fn loader(
        samples: Vec<MelSample>,
        batch_size: usize,
    ) -> Arc<dyn DataLoader<MelBatch<TestBackend>>> {
        DataLoaderBuilder::new(MelBatcher::<TestBackend>::new(Default::default()))
            .batch_size(batch_size)
            .build(InMemDataset::new(samples))
    }

    #[test]
    fn test_model_fn_scores_one_batch() {
        let device = Default::default();
        let batch = MelBatcher::<TestBackend>::new(Default::default())
            .batch(vec![sample(0, 0), sample(1, 1), sample(2, 0), sample(1, 1)]);
        let model = EchoClassifier { mode: ModelMode::Eval };
        let criterion = CrossEntropyCriterion::<TestBackend>::new(&device);

        let score = model_fn(batch, &model, &criterion, &device);
        assert_eq!(score.accuracy, 0.75);
        assert!(score.loss.is_finite() && score.loss > 0.0);
    }

    #[test]
    fn test_single_batch_three_of_four_correct() {
        let device = Default::default();
        let loader = loader(
            vec![sample(0, 0), sample(1, 1), sample(2, 2), sample(0, 1)],
            4,
        );
        let mut model = EchoClassifier { mode: ModelMode::Train };
        let criterion = CrossEntropyCriterion::<TestBackend>::new(&device);

        let accuracy = validate(&*loader, &mut model, &criterion, &device).unwrap();
        assert_eq!(accuracy, 0.75);
        assert_eq!(model.mode, ModelMode::Train);
    }

    #[test]
    fn test_accuracy_is_mean_over_batches() {
        let device = Default::default();
        // batches of 2, 2, 1 with accuracies 1.0, 0.5, 0.0
        let loader = loader(
            vec![sample(0, 0), sample(1, 1), sample(2, 2), sample(2, 0), sample(1, 0)],
            2,
        );
        let mut model = EchoClassifier { mode: ModelMode::Train };
        let criterion = CrossEntropyCriterion::<TestBackend>::new(&device);

        let report = run_validation(&*loader, &mut model, &criterion, &device).unwrap();
        assert_eq!(report.batches, 3);
        assert_eq!(report.samples, 5);
        assert!((report.accuracy - 0.5).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&report.accuracy));
        assert!(report.loss > 0.0);
    }

    #[test]
    fn test_closure_criterion() {
        let device = Default::default();
        let loader = loader(vec![sample(1, 1), sample(2, 2)], 2);
        let mut model = EchoClassifier { mode: ModelMode::Train };
        let zero_loss = |scores: Tensor<TestBackend, 2>, _labels: Tensor<TestBackend, 1, Int>| {
            scores.sum() * 0.0
        };

        let report = run_validation(&*loader, &mut model, &zero_loss, &device).unwrap();
        assert_eq!(report.loss, 0.0);
        assert_eq!(report.accuracy, 1.0);
    }

    #[test]
    fn test_empty_loader_is_error_and_restores_mode() {
        let device = Default::default();
        let loader = loader(Vec::new(), 4);
        let mut model = EchoClassifier { mode: ModelMode::Train };
        let criterion = CrossEntropyCriterion::<TestBackend>::new(&device);

        let err = validate(&*loader, &mut model, &criterion, &device).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyLoader));
        assert_eq!(model.mode, ModelMode::Train);
    }

    #[test]
    fn test_model_panic_propagates_and_restores_mode() {
        let device = Default::default();
        let loader = loader(vec![sample(0, 0)], 1);
        let mut model = BrokenClassifier { mode: ModelMode::Train };
        let criterion = CrossEntropyCriterion::<TestBackend>::new(&device);

        let result = catch_unwind(AssertUnwindSafe(|| {
            validate(&*loader, &mut model, &criterion, &device)
        }));
        assert!(result.is_err());
        assert_eq!(model.mode, ModelMode::Train);
    }
}
