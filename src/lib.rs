//! Speaker classification support over precomputed mel-spectrograms.
//!
//! * [`data::dataset::MelDataset`] reads a dataset directory
//!   (`mapping.json`, `metadata.json`, one safetensors feature file per
//!   utterance) and serves randomly segmented samples through burn's
//!   `Dataset` trait.
//! * [`data::batcher::MelBatcher`] pads samples into batches.
//! * [`ml::validator::validate`] runs any [`ml::classifier::SpeakerClassifier`]
//!   over a validation loader in eval mode and returns the mean accuracy.

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
pub mod ml;
