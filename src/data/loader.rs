// ============================================================
// Layer 4 — Dataset Directory Loader
// ============================================================
// Reads the three kinds of files in a dataset directory:
//
//   data_dir/
//     ├── mapping.json      speaker name → class id
//     ├── metadata.json     n_mels + utterances per speaker
//     └── uttr-*.pt ...     one feature tensor per utterance
//
// Feature files are safetensors containing a single 2-D tensor of
// shape [frames, n_mels] (F32 or F64). If a file holds several
// tensors, the one named "mel" is used.
//
// Reference: safetensors crate documentation
//            Rust Book §9 (Error Handling)

use std::fs;
use std::path::{Path, PathBuf};

use safetensors::tensor::{Dtype, TensorView};
use safetensors::SafeTensors;
use serde::de::DeserializeOwned;

use crate::data::mel::MelSpectrogram;
use crate::domain::error::DataError;
use crate::domain::metadata::{Metadata, SpeakerMapping};

pub const MAPPING_FILE:  &str = "mapping.json";
pub const METADATA_FILE: &str = "metadata.json";

/// Tensor name preferred when a feature file holds more than one tensor
pub const MEL_TENSOR_NAME: &str = "mel";

/// Read `<data_dir>/mapping.json`.
pub fn read_mapping(data_dir: &Path) -> Result<SpeakerMapping, DataError> {
    read_json(data_dir.join(MAPPING_FILE))
}

/// Read `<data_dir>/metadata.json`.
pub fn read_metadata(data_dir: &Path) -> Result<Metadata, DataError> {
    read_json(data_dir.join(METADATA_FILE))
}

fn read_json<T: DeserializeOwned>(path: PathBuf) -> Result<T, DataError> {
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(source) => return Err(DataError::ConfigRead { path, source }),
    };

    let value = serde_json::from_str(&text)
        .map_err(|source| DataError::ConfigParse { path: path.clone(), source })?;

    tracing::debug!("Parsed '{}'", path.display());
    Ok(value)
}

/// Load one feature tensor and check it is `[frames, n_mels]`.
pub fn load_mel(path: &Path, n_mels: usize) -> Result<MelSpectrogram, DataError> {
    let bytes = fs::read(path).map_err(|source| DataError::FeatureRead {
        path: path.to_path_buf(),
        source,
    })?;

    let format_err = |reason: String| DataError::FeatureFormat {
        path: path.to_path_buf(),
        reason,
    };

    let tensors = SafeTensors::deserialize(&bytes)
        .map_err(|e| format_err(format!("not a safetensors file: {e:?}")))?;
    let view = pick_tensor(&tensors).map_err(format_err)?;

    let (frames, width) = match view.shape() {
        &[frames, width] => (frames, width),
        other => return Err(format_err(format!("expected a 2-D tensor, got shape {other:?}"))),
    };
    if width != n_mels {
        return Err(format_err(format!("expected {n_mels} mel bins, got {width}")));
    }

    let data = decode_floats(&view).map_err(format_err)?;
    MelSpectrogram::new(data, frames, n_mels)
        .ok_or_else(|| format_err(format!("payload does not fill shape [{frames}, {n_mels}]")))
}

/// "mel" if present, otherwise the only tensor in the file.
fn pick_tensor<'a>(tensors: &'a SafeTensors<'a>) -> Result<TensorView<'a>, String> {
    if let Ok(view) = tensors.tensor(MEL_TENSOR_NAME) {
        return Ok(view);
    }

    let mut all = tensors.tensors();
    match all.len() {
        1 => Ok(all.remove(0).1),
        0 => Err("file holds no tensors".to_string()),
        n => Err(format!("file holds {n} tensors and none is named '{MEL_TENSOR_NAME}'")),
    }
}

/// Little-endian F32/F64 payload → Vec<f32>
fn decode_floats(view: &TensorView<'_>) -> Result<Vec<f32>, String> {
    let bytes = view.data();
    match view.dtype() {
        Dtype::F32 => Ok(bytes
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect()),
        Dtype::F64 => Ok(bytes
            .chunks_exact(8)
            .map(|b| f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]) as f32)
            .collect()),
        other => Err(format!("unsupported dtype {other:?}, expected F32 or F64")),
    }
}
