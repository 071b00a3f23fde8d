// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `inspect` and `preview`, and all
// their flags. clap's derive macros generate --help, error messages
// for missing args and type conversion.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::config::DataConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarise a dataset directory and check its feature files
    Inspect(InspectArgs),

    /// Split a dataset, build dataloaders and print validation batch shapes
    Preview(PreviewArgs),
}

/// Arguments shared by every command that opens a dataset.
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Directory holding mapping.json, metadata.json and feature files
    #[arg(long, default_value = "./Dataset")]
    pub data_dir: String,

    /// Frames per training segment; longer utterances are cut randomly
    #[arg(long, default_value_t = 128)]
    pub segment_len: usize,

    /// Seed for segment selection and the train/validation shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Utterances per batch
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Fraction of utterances held out for validation
    #[arg(long, default_value_t = 0.1)]
    pub valid_ratio: f64,

    /// Dataloader worker threads
    #[arg(long, default_value_t = 1)]
    pub num_workers: usize,
}

/// The application layer never sees clap types.
impl From<DatasetArgs> for DataConfig {
    fn from(a: DatasetArgs) -> Self {
        DataConfig {
            data_dir:    a.data_dir,
            segment_len: a.segment_len,
            seed:        a.seed,
            ..DataConfig::default()
        }
    }
}

impl From<InspectArgs> for DataConfig {
    fn from(a: InspectArgs) -> Self {
        a.dataset.into()
    }
}

impl From<PreviewArgs> for DataConfig {
    fn from(a: PreviewArgs) -> Self {
        DataConfig {
            batch_size:  a.batch_size,
            valid_ratio: a.valid_ratio,
            num_workers: a.num_workers,
            ..DataConfig::from(a.dataset)
        }
    }
}
