// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types that describe what a speaker dataset IS:
// the metadata records read from disk, the errors that loading
// and validation can produce, and the train/eval mode switch a
// model exposes to the validation loop.
//
// Rules for this layer:
//   - NO file I/O
//   - NO Burn types (classifier and criterion traits live in ml)
//   - Everything here is cheap to construct in unit tests
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Typed metadata.json / mapping.json records
pub mod metadata;

// Error taxonomy for loading and validation
pub mod error;

// Model mode (train / eval) abstraction
pub mod traits;
