// ============================================================
// Layer 3 — Errors
// ============================================================
// Every failure the data pipeline and validation loop can hit.
// Nothing here is caught or retried inside the crate: a bad
// sample or an empty loader stops the run and surfaces to the
// caller, which wraps it with anyhow context.

use std::path::PathBuf;

/// Failures while reading the dataset layout or a feature file.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// mapping.json / metadata.json missing or unreadable.
    #[error("cannot read '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// mapping.json / metadata.json is not the expected shape.
    #[error("malformed '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A loader parameter is out of range (e.g. segment_len == 0).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Metadata names a speaker that mapping.json does not know.
    #[error("speaker '{speaker}' is missing from speaker2id")]
    UnknownSpeaker { speaker: String },

    #[error("sample index {index} out of bounds for dataset of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Feature file missing or unreadable at fetch time.
    #[error("cannot read feature file '{path}': {source}")]
    FeatureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Feature file readable but not a usable frames × n_mels tensor.
    #[error("bad feature file '{path}': {reason}")]
    FeatureFormat { path: PathBuf, reason: String },
}

impl DataError {
    /// True for errors raised while constructing a dataset from its
    /// JSON files or parameters.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DataError::ConfigRead { .. } | DataError::ConfigParse { .. } | DataError::InvalidConfig(_)
        )
    }

    /// True for lookups that miss: unknown speaker or out-of-range index.
    pub fn is_lookup(&self) -> bool {
        matches!(self, DataError::UnknownSpeaker { .. } | DataError::IndexOutOfBounds { .. })
    }
}

/// Failures of the validation loop itself. Model and loss failures
/// are burn panics and unwind straight through.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("dataloader yielded no batches; average accuracy is undefined")]
    EmptyLoader,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        let err = DataError::InvalidConfig("segment_len must be > 0".into());
        assert!(err.is_configuration());
        assert!(!err.is_lookup());

        let err = DataError::IndexOutOfBounds { index: 5, len: 3 };
        assert!(err.is_lookup());
        assert_eq!(
            err.to_string(),
            "sample index 5 out of bounds for dataset of length 3"
        );
    }
}
