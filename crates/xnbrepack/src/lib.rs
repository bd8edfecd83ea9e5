//! xnbrepack - XNB texture repacking library.
//!
//! This crate provides a unified interface to the xnbrepack library
//! ecosystem for transcoding XNB texture containers to ASTC.
//!
//! # Crates
//!
//! - [`xnbrepack_common`] - Binary reading and .NET serialization
//!   conventions
//! - [`xnbrepack_xnb`] - Container parsing, pixel normalization and the
//!   ASTC container writer
//! - [`xnbrepack_astc`] - ASTC payload sizing and the encoder boundary
//!
//! The [`pipeline`] module drives whole asset trees through the transcode
//! path with atomic, per-file failure isolation.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use xnbrepack::prelude::*;
//!
//! let policy = TitlePolicy::default();
//! let summary = run_repack(
//!     Path::new("Content"),
//!     &policy,
//!     &VoidExtentEncoder,
//!     &mut |event| {
//!         if let RunEvent::FileDone { path, .. } = event {
//!             println!("{}", path.display());
//!         }
//!     },
//! )?;
//! println!("converted {} of {}", summary.converted, summary.total);
//! # Ok::<(), std::io::Error>(())
//! ```

// Re-export all sub-crates
pub use xnbrepack_astc as astc;
pub use xnbrepack_common as common;
pub use xnbrepack_xnb as xnb;

pub mod pipeline;
pub mod policy;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use xnbrepack_astc::{payload_size, AstcEncoder, VoidExtentEncoder};
    pub use xnbrepack_common::BinaryReader;
    pub use xnbrepack_xnb::{
        encode_astc_xnb, read_texture_asset, SurfaceFormat, TextureData, XnbHeader,
    };

    pub use crate::pipeline::{run_repack, FileOutcome, RunEvent, RunSummary};
    pub use crate::policy::{RepackPolicy, TitlePolicy};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
