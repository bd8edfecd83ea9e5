//! xnbrepack CLI - Command-line tool for repacking XNB game textures.
//!
//! Walks an asset directory and transcodes every XNB texture container it
//! finds into an ASTC-encoded container the runtime can load unchanged.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use xnbrepack::prelude::*;

/// xnbrepack - XNB texture to ASTC repacking tool
#[derive(Parser)]
#[command(name = "xnbrepack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory of the game's content assets
    #[arg(env = "ASSET_PATH")]
    path: PathBuf,

    /// ASTC block footprint for converted textures
    #[arg(short, long, value_enum, default_value_t = BlockFootprint::B4x4)]
    block: BlockFootprint,

    /// Report skipped files as well
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum BlockFootprint {
    #[value(name = "4x4")]
    B4x4,
    #[value(name = "5x5")]
    B5x5,
    #[value(name = "6x6")]
    B6x6,
    #[value(name = "8x8")]
    B8x8,
}

impl From<BlockFootprint> for SurfaceFormat {
    fn from(block: BlockFootprint) -> Self {
        match block {
            BlockFootprint::B4x4 => SurfaceFormat::Astc4x4Ext,
            BlockFootprint::B5x5 => SurfaceFormat::Astc5x5Ext,
            BlockFootprint::B6x6 => SurfaceFormat::Astc6x6Ext,
            BlockFootprint::B8x8 => SurfaceFormat::Astc8x8Ext,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let policy = TitlePolicy {
        base_format: cli.block.into(),
        ..TitlePolicy::default()
    };

    println!("Repacking textures under: {}", cli.path.display());

    let start = Instant::now();
    let mut progress: Option<ProgressBar> = None;

    let summary = run_repack(&cli.path, &policy, &VoidExtentEncoder, &mut |event| {
        match event {
            RunEvent::DirectoryExcluded { dir } => {
                println!("Skipped textures in {}.", dir.display());
            }
            RunEvent::Scanned { total } => {
                let pb = ProgressBar::new(total as u64);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                {
                    pb.set_style(style.progress_chars("#>-"));
                }
                progress = Some(pb);
            }
            RunEvent::FileDone {
                path,
                outcome,
                done,
                total,
            } => {
                let Some(pb) = &progress else { return };
                let rel = path.strip_prefix(&cli.path).unwrap_or(path);
                let percent = done * 100 / total.max(1);

                match outcome {
                    FileOutcome::Converted { width, height } => {
                        pb.println(format!(
                            "'{}' [{}%] -> w: {}, h: {}",
                            rel.display(),
                            percent,
                            width,
                            height
                        ));
                    }
                    FileOutcome::Skipped(reason) => {
                        if cli.verbose {
                            pb.println(format!("'{}' skipped: {}", rel.display(), reason));
                        }
                    }
                    FileOutcome::Failed(error) => {
                        pb.println(format!(
                            "File {} failed to be re-encoded: {}",
                            rel.display(),
                            error
                        ));
                    }
                }
                pb.inc(1);
            }
        }
    })
    .context("Failed to walk the asset directory")?;

    if let Some(pb) = progress {
        pb.finish_with_message("Done");
    }

    println!(
        "Processed {} files in {:?}: {} converted, {} skipped, {} failed",
        summary.total,
        start.elapsed(),
        summary.converted,
        summary.skipped,
        summary.failed
    );

    Ok(())
}
