// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands off to Layer 2. Printing
// results happens here; computing them does not.
//
//   1. `inspect` — dataset statistics and missing-file check
//   2. `preview` — train/valid split and dataloader dry run
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InspectArgs, PreviewArgs};

#[derive(Parser, Debug)]
#[command(
    name = "mel-speaker",
    version,
    about = "Inspect mel-spectrogram speaker datasets and preview their batches."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Inspect(args) => run_inspect(args),
            Commands::Preview(args) => run_preview(args),
        }
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::application::inspect_use_case::InspectUseCase;

    tracing::info!("Inspecting dataset in: {}", args.dataset.data_dir);
    let summary = InspectUseCase::new(args.into()).execute()?;

    println!("n_mels:      {}", summary.n_mels);
    println!("speakers:    {}", summary.speakers);
    println!("utterances:  {}", summary.utterances);
    println!(
        "mel_len:     min {} / mean {:.1} / max {}",
        summary.min_mel_len, summary.mean_mel_len, summary.max_mel_len
    );
    println!("segmented:   {}", summary.segmented);
    if summary.missing_files.is_empty() {
        println!("all feature files present");
    } else {
        println!("missing feature files ({}):", summary.missing_files.len());
        for path in &summary.missing_files {
            println!("  {path}");
        }
    }
    Ok(())
}

fn run_preview(args: PreviewArgs) -> Result<()> {
    use crate::application::preview_use_case::PreviewUseCase;

    tracing::info!("Previewing batches for: {}", args.dataset.data_dir);
    let summary = PreviewUseCase::new(args.into()).execute()?;

    println!("train utterances: {}", summary.train_items);
    println!("valid utterances: {}", summary.valid_items);
    for (i, [batch, frames, n_mels]) in summary.valid_shapes.iter().enumerate() {
        println!("valid batch {i:>4}: [{batch}, {frames}, {n_mels}]");
    }
    Ok(())
}
