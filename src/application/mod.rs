// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the data and ml layers for the CLI.
//
// Rules for this layer:
//   - No tensor math here
//   - No clap types here (the CLI converts its args into DataConfig)
//   - Only workflow coordination and summaries
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Shared dataset configuration
pub mod config;

// Dataset statistics and integrity check
pub mod inspect_use_case;

// Split + dataloader dry run
pub mod preview_use_case;
