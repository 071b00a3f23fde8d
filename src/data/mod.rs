// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from a dataset directory on disk to padded tensor
// batches:
//
//   mapping.json + metadata.json
//       │
//       ▼
//   loader            → typed records, safetensors feature files
//       │
//       ▼
//   MelDataset        → flattened (feature_path, speaker_id) index,
//       │               random fixed-length segments per fetch
//       ▼
//   splitter          → shuffled train / validation subsets
//       │
//       ▼
//   MelBatcher        → pads segments to the batch maximum and
//       │               stacks labels
//       ▼
//   DataLoader        → burn's loader, consumed by ml::validator
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads mapping.json, metadata.json and feature tensors
pub mod loader;

/// Row-major frames × n_mels feature tensor and segment slicing
pub mod mel;

/// Implements Burn's Dataset trait over a speaker dataset directory
pub mod dataset;

/// Implements Burn's Batcher trait with padding collation
pub mod batcher;

/// Shuffles and splits data into train/validation sets
pub mod splitter;

#[cfg(test)]
pub(crate) mod fixtures;
