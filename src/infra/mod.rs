// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to any one layer:
//
//   progress.rs — indicatif progress bar for the validation loop,
//                 showing utterances processed and running loss /
//                 accuracy averages
//
// Reference: indicatif crate documentation

/// Validation progress display
pub mod progress;
