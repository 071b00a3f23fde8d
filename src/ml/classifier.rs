use burn::{
    nn::loss::{CrossEntropyLoss, CrossEntropyLossConfig},
    prelude::*,
};

use crate::domain::traits::ModeSwitch;

/// A speaker classifier over padded mel batches.
pub trait SpeakerClassifier<B: Backend>: ModeSwitch {
    /// mels: [batch, frames, n_mels] → class scores: [batch, n_speakers]
    fn forward(&self, mels: Tensor<B, 3>) -> Tensor<B, 2>;
}

/// Maps (scores, labels) to a single-element loss tensor.
pub trait Criterion<B: Backend> {
    fn loss(&self, scores: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> Tensor<B, 1>;
}

impl<B, F> Criterion<B> for F
where
    B: Backend,
    F: Fn(Tensor<B, 2>, Tensor<B, 1, Int>) -> Tensor<B, 1>,
{
    fn loss(&self, scores: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        self(scores, labels)
    }
}

/// Mean cross-entropy over the batch, from raw (unnormalised) scores.
#[derive(Debug)]
pub struct CrossEntropyCriterion<B: Backend> {
    loss: CrossEntropyLoss<B>,
}

impl<B: Backend> CrossEntropyCriterion<B> {
    pub fn new(device: &B::Device) -> Self {
        Self {
            loss: CrossEntropyLossConfig::new().init(device),
        }
    }
}

impl<B: Backend> Criterion<B> for CrossEntropyCriterion<B> {
    fn loss(&self, scores: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        self.loss.forward(scores, labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_cross_entropy_prefers_confident_correct_scores() {
        let device = Default::default();
        let criterion = CrossEntropyCriterion::<TestBackend>::new(&device);
        let labels = Tensor::<TestBackend, 1, Int>::from_ints([0, 1], &device);

        let right = Tensor::<TestBackend, 2>::from_floats([[5.0, 0.0], [0.0, 5.0]], &device);
        let wrong = Tensor::<TestBackend, 2>::from_floats([[0.0, 5.0], [5.0, 0.0]], &device);

        let right: f64 = criterion.loss(right, labels.clone()).into_scalar().elem();
        let wrong: f64 = criterion.loss(wrong, labels).into_scalar().elem();
        assert!(right < 0.01);
        assert!(wrong > right);
    }
}
