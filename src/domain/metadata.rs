// ============================================================
// Layer 3 — Dataset Metadata Records
// ============================================================
// Typed views of the two JSON files that describe a dataset:
//
//   mapping.json   {"speaker2id": {"id10001": 0, ...}}
//   metadata.json  {"n_mels": 40,
//                   "speakers": {"id10001": [{"feature_path": "uttr-x.pt",
//                                             "mel_len": 431}, ...], ...}}
//
// serde rejects anything that does not match these shapes, so the
// rest of the crate never pokes at untyped JSON.
//
// Speaker order matters: it fixes the dataset's index space, and it
// must follow the order of keys in metadata.json rather than a sorted
// order. A plain HashMap/BTreeMap would lose that, so "speakers" goes
// through a small map visitor that keeps entries in document order.
//
// Reference: serde docs (Implementing Deserialize, MapAccess)

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::domain::error::DataError;

/// Contents of mapping.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerMapping {
    /// Speaker name → dense class id in 0..N
    pub speaker2id: HashMap<String, usize>,
}

impl SpeakerMapping {
    pub fn id_of(&self, speaker: &str) -> Option<usize> {
        self.speaker2id.get(speaker).copied()
    }

    pub fn len(&self) -> usize {
        self.speaker2id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speaker2id.is_empty()
    }
}

/// One utterance entry under a speaker in metadata.json.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtteranceRecord {
    /// Path of the feature file, relative to the data directory
    pub feature_path: String,
    /// Number of frames in the stored mel-spectrogram
    pub mel_len: usize,
}

/// All utterances of one speaker, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerUtterances {
    pub speaker: String,
    pub utterances: Vec<UtteranceRecord>,
}

/// Contents of metadata.json.
#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    /// Feature dimension of every mel-spectrogram in the dataset
    pub n_mels: usize,

    #[serde(deserialize_with = "speakers_in_document_order")]
    pub speakers: Vec<SpeakerUtterances>,
}

/// One row of the flattened sample index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleEntry {
    pub feature_path: String,
    pub speaker_id: usize,
}

impl Metadata {
    /// Number of distinct speakers listed under "speakers".
    pub fn speaker_count(&self) -> usize {
        self.speakers.len()
    }

    /// Total number of utterances across every speaker.
    pub fn utterance_count(&self) -> usize {
        self.speakers.iter().map(|s| s.utterances.len()).sum()
    }

    /// Iterate every utterance record, speaker by speaker.
    pub fn utterances(&self) -> impl Iterator<Item = &UtteranceRecord> {
        self.speakers.iter().flat_map(|s| s.utterances.iter())
    }

    /// Flatten speakers → utterances into (feature_path, speaker_id) rows.
    ///
    /// Fails on the first speaker that `mapping` does not know; no
    /// partial index is returned.
    pub fn flatten(&self, mapping: &SpeakerMapping) -> Result<Vec<SampleEntry>, DataError> {
        let mut entries = Vec::with_capacity(self.utterance_count());

        for group in &self.speakers {
            let speaker_id = mapping
                .id_of(&group.speaker)
                .ok_or_else(|| DataError::UnknownSpeaker {
                    speaker: group.speaker.clone(),
                })?;

            entries.extend(group.utterances.iter().map(|u| SampleEntry {
                feature_path: u.feature_path.clone(),
                speaker_id,
            }));
        }

        Ok(entries)
    }
}

// ─── Ordered speaker map ──────────────────────────────────────────────────────
fn speakers_in_document_order<'de, D>(deserializer: D) -> Result<Vec<SpeakerUtterances>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SpeakersVisitor;

    impl<'de> Visitor<'de> for SpeakersVisitor {
        type Value = Vec<SpeakerUtterances>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map from speaker id to a list of utterance records")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut seen = HashSet::new();
            let mut speakers = Vec::with_capacity(map.size_hint().unwrap_or(0));

            while let Some((speaker, utterances)) =
                map.next_entry::<String, Vec<UtteranceRecord>>()?
            {
                if !seen.insert(speaker.clone()) {
                    return Err(de::Error::custom(format!("duplicate speaker '{speaker}'")));
                }
                speakers.push(SpeakerUtterances { speaker, utterances });
            }

            Ok(speakers)
        }
    }

    deserializer.deserialize_map(SpeakersVisitor)
}
