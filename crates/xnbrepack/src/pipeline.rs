//! The repacking pipeline orchestrator.
//!
//! Walks the asset tree depth-first, dispatches each candidate file by
//! extension and drives decode, re-encode and atomic replacement. Every
//! file is processed independently: a failure is reported through the
//! observer and the run moves on.

use std::ffi::OsStr;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::DeflateDecoder;
use xnbrepack_astc::AstcEncoder;
use xnbrepack_xnb::{encode_astc_xnb, read_texture_asset, Error, Result, SkipReason};

use crate::policy::RepackPolicy;

/// What happened to one candidate file.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    /// Converted in place (or to the sibling `.xnb` for compressed
    /// variants).
    Converted { width: u32, height: u32 },
    /// Left untouched; not an error.
    Skipped(String),
    /// Failed; the original file is intact and partial output was removed.
    Failed(String),
}

/// Progress notifications emitted while the run advances.
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// The tree walk finished; `total` candidate files will be processed.
    Scanned { total: usize },
    /// A directory's files were excluded by policy.
    DirectoryExcluded { dir: &'a Path },
    /// One candidate file finished processing.
    FileDone {
        path: &'a Path,
        outcome: &'a FileOutcome,
        done: usize,
        total: usize,
    },
}

/// Aggregate result of one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub total: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Repack every candidate texture under `root`.
///
/// Candidates are `.xnb` and `.zxnb` files (case-insensitive) not excluded
/// by `policy`. Per-file failures never abort the run; only walking the
/// tree itself can fail.
pub fn run_repack(
    root: &Path,
    policy: &dyn RepackPolicy,
    encoder: &dyn AstcEncoder,
    observer: &mut dyn FnMut(RunEvent),
) -> std::io::Result<RunSummary> {
    let mut files = Vec::new();
    collect_candidates(root, policy, &mut files, observer)?;

    let total = files.len();
    observer(RunEvent::Scanned { total });

    let mut summary = RunSummary {
        total,
        ..RunSummary::default()
    };

    for (index, path) in files.iter().enumerate() {
        let outcome = process_file(path, policy, encoder);
        match outcome {
            FileOutcome::Converted { .. } => summary.converted += 1,
            FileOutcome::Skipped(_) => summary.skipped += 1,
            FileOutcome::Failed(_) => summary.failed += 1,
        }
        observer(RunEvent::FileDone {
            path,
            outcome: &outcome,
            done: index + 1,
            total,
        });
    }

    Ok(summary)
}

/// Depth-first candidate collection honoring the exclusion policy.
///
/// A directory excluded by policy keeps its files but its subdirectories
/// are still descended into.
fn collect_candidates(
    dir: &Path,
    policy: &dyn RepackPolicy,
    out: &mut Vec<PathBuf>,
    observer: &mut dyn FnMut(RunEvent),
) -> std::io::Result<()> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        } else {
            files.push(path);
        }
    }
    files.sort();
    dirs.sort();

    if policy.exclude_dir(dir, &files) {
        observer(RunEvent::DirectoryExcluded { dir });
    } else {
        for path in files {
            if is_candidate(&path) && !policy.exclude_file(&path) {
                out.push(path);
            }
        }
    }

    for sub in dirs {
        collect_candidates(&sub, policy, out, observer)?;
    }

    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

fn is_candidate(path: &Path) -> bool {
    matches!(extension_of(path).as_str(), "xnb" | "zxnb")
}

/// Process one file, classifying skip signals apart from failures.
pub fn process_file(
    path: &Path,
    policy: &dyn RepackPolicy,
    encoder: &dyn AstcEncoder,
) -> FileOutcome {
    let result = match extension_of(path).as_str() {
        "xnb" => process_xnb(path, policy, encoder),
        "zxnb" => process_zxnb(path, policy, encoder),
        other => return FileOutcome::Skipped(format!("unhandled extension: {other}")),
    };

    match result {
        Ok((width, height)) => FileOutcome::Converted { width, height },
        Err(e) if e.is_skip() => FileOutcome::Skipped(e.to_string()),
        Err(e) => FileOutcome::Failed(e.to_string()),
    }
}

/// Decode, re-encode and atomically replace a plain container.
///
/// The new container is written to a temporary sibling first; the original
/// is only removed once the write completed, and the temporary file never
/// survives a failure.
fn process_xnb(path: &Path, policy: &dyn RepackPolicy, encoder: &dyn AstcEncoder) -> Result<(u32, u32)> {
    let data = fs::read(path)?;
    let texture = read_texture_asset(&data)?;

    let tmp_path = {
        let mut tmp = path.as_os_str().to_os_string();
        tmp.push("_tmp");
        PathBuf::from(tmp)
    };

    let mut output = fs::File::create(&tmp_path)?;
    let written = encode_astc_xnb(&texture, policy.target_format(path), encoder)
        .and_then(|bytes| output.write_all(&bytes).map_err(Error::from));
    drop(output);

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::remove_file(path)?;
    fs::rename(&tmp_path, path)?;

    Ok((texture.width, texture.height))
}

/// Convert a deflate-compressed variant into a plain container next to it.
///
/// The source file is only removed after the new container was written in
/// full; a failure removes the partial output instead.
fn process_zxnb(path: &Path, policy: &dyn RepackPolicy, encoder: &dyn AstcEncoder) -> Result<(u32, u32)> {
    let file = fs::File::open(path)?;
    let mut data = Vec::new();
    DeflateDecoder::new(file).read_to_end(&mut data)?;

    let texture = read_texture_asset(&data)?;

    let min = policy.min_dimension();
    if texture.width < min || texture.height < min {
        return Err(SkipReason::TooSmall {
            width: texture.width,
            height: texture.height,
        }
        .into());
    }

    let target_path = path.with_extension("xnb");
    if target_path.exists() {
        fs::remove_file(&target_path)?;
    }

    let written = encode_astc_xnb(&texture, policy.target_format(path), encoder)
        .and_then(|bytes| fs::write(&target_path, bytes).map_err(Error::from));

    if let Err(e) = written {
        let _ = fs::remove_file(&target_path);
        return Err(e);
    }

    fs::remove_file(path)?;

    Ok((texture.width, texture.height))
}
