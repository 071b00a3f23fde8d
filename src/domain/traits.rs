// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Framework-free abstractions shared by the data and ml layers.
//
// A model is either training (dropout active, statistics updated)
// or evaluating. The validation loop flips a model into evaluation
// mode and must flip it back afterwards; ModeSwitch is the minimal
// surface it needs for that, so the guard in ml::mode works for any
// model type without knowing anything about its layers.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::fmt;

/// Whether a model's training-only layers are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelMode {
    #[default]
    Train,
    Eval,
}

impl fmt::Display for ModelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelMode::Train => f.write_str("train"),
            ModelMode::Eval => f.write_str("eval"),
        }
    }
}

// ─── ModeSwitch ───────────────────────────────────────────────────────────────
/// Any model whose train/eval mode can be read and changed.
///
/// Implementations:
///   - any SpeakerClassifier (ml::classifier) supplied by a training driver
///   - test doubles that record mode transitions
pub trait ModeSwitch {
    /// Current mode
    fn mode(&self) -> ModelMode;

    /// Switch to `mode`; switching to the current mode is a no-op
    fn set_mode(&mut self, mode: ModelMode);
}
