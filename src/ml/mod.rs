// ============================================================
// Layer 5 — ML / Evaluation Layer (Burn)
// ============================================================
// Burn-facing evaluation code. The model itself lives with the
// external training driver; this layer only needs to call it.
//
//   classifier.rs — what a model and a loss must provide:
//                   SpeakerClassifier (forward + train/eval mode)
//                   and Criterion (scores, labels → scalar loss),
//                   with a cross-entropy criterion built in
//
//   mode.rs       — ModeGuard: switches a model into eval mode and
//                   switches it back when dropped, on every exit
//                   path including panics
//
//   validator.rs  — forward-and-score for one batch and the full
//                   validation pass with a progress bar
//
// Gradient tracking in burn belongs to the backend: run validation
// on a non-autodiff backend (e.g. the result of `model.valid()`).
//
// Reference: Burn Book §5 (Training, Validation)

/// Classifier and criterion traits
pub mod classifier;

/// Scoped train/eval mode switching
pub mod mode;

/// Validation loop
pub mod validator;
