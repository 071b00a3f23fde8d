// On-disk dataset fixtures shared by the data and application tests.

use std::fs;
use std::path::Path;

use safetensors::tensor::{Dtype, TensorView};

use crate::data::loader::{MAPPING_FILE, METADATA_FILE, MEL_TENSOR_NAME};
use crate::data::mel::MelSpectrogram;

/// frame t holds [base + t*100, base + t*100 + 1, ...], so any frame
/// identifies its own offset.
pub fn ramp_mel(frames: usize, n_mels: usize, base: f32) -> MelSpectrogram {
    let data = (0..frames)
        .flat_map(|t| (0..n_mels).map(move |m| base + (t * 100 + m) as f32))
        .collect();
    MelSpectrogram::new(data, frames, n_mels).unwrap()
}

pub fn write_mel(path: &Path, mel: &MelSpectrogram) {
    let bytes: Vec<u8> = mel.as_slice().iter().flat_map(|v| v.to_le_bytes()).collect();
    let view = TensorView::new(Dtype::F32, vec![mel.frames(), mel.n_mels()], &bytes).unwrap();
    safetensors::serialize_to_file(vec![(MEL_TENSOR_NAME, view)], &None, path).unwrap();
}

/// Write mapping.json, metadata.json and one feature file per utterance.
///
/// `speakers` lists (speaker, frame counts); speaker ids follow list
/// order. Utterance k of every speaker is `<speaker>-<k>.pt`, filled
/// with `ramp_mel(frames, n_mels, 10_000 * speaker_id)`. serde_json
/// writes map keys sorted, so pass speakers in sorted order to keep
/// file order and list order the same.
pub fn write_dataset(dir: &Path, n_mels: usize, speakers: &[(&str, &[usize])]) {
    let mut speaker2id = serde_json::Map::new();
    let mut meta_speakers = serde_json::Map::new();

    for (id, (speaker, lens)) in speakers.iter().enumerate() {
        speaker2id.insert(speaker.to_string(), serde_json::json!(id));

        let mut utterances = Vec::new();
        for (k, &frames) in lens.iter().enumerate() {
            let feature_path = format!("{speaker}-{k}.pt");
            write_mel(
                &dir.join(&feature_path),
                &ramp_mel(frames, n_mels, 10_000.0 * id as f32),
            );
            utterances.push(serde_json::json!({
                "feature_path": feature_path,
                "mel_len": frames,
            }));
        }
        meta_speakers.insert(speaker.to_string(), serde_json::Value::Array(utterances));
    }

    let mapping = serde_json::json!({ "speaker2id": speaker2id });
    let metadata = serde_json::json!({ "n_mels": n_mels, "speakers": meta_speakers });
    fs::write(dir.join(MAPPING_FILE), mapping.to_string()).unwrap();
    fs::write(dir.join(METADATA_FILE), metadata.to_string()).unwrap();
}
