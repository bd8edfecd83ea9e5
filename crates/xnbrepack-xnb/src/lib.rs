//! XNB container parsing and ASTC re-encoding.
//!
//! XNB is the binary asset container used by XNA, MonoGame and FNA titles.
//! This crate decodes the Texture2D records those containers carry -
//! optionally LZX-compressed, in any of the known legacy surface formats -
//! normalizes the pixels to 8-bit RGBA, and serializes a fresh container
//! with an ASTC payload:
//!
//! - [`XnbHeader`] - magic / platform / version / flags parsing
//! - [`decompress_body`] - the LZX frame layer of compressed containers
//! - [`read_texture_asset`] - container dispatch and record decoding
//! - [`ChannelSwizzle`] - bit-packed direct-color normalization
//! - [`encode_astc_xnb`] - the ASTC container writer
//!
//! # Example
//!
//! ```no_run
//! use xnbrepack_astc::VoidExtentEncoder;
//! use xnbrepack_xnb::{encode_astc_xnb, read_texture_asset, SurfaceFormat};
//!
//! let data = std::fs::read("texture.xnb")?;
//! let texture = read_texture_asset(&data)?;
//! let repacked = encode_astc_xnb(&texture, SurfaceFormat::Astc4x4Ext, &VoidExtentEncoder)?;
//! std::fs::write("texture.xnb", repacked)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod decompress;
mod dxt;
mod error;
mod format;
mod header;
mod swizzle;
mod texture;
mod writer;

pub use decompress::{decompress_body, FrameDecompressor, LzxDecompressor};
pub use dxt::{decompress_dxt1, decompress_dxt3, decompress_dxt5};
pub use error::{Error, Result, SkipReason};
pub use format::SurfaceFormat;
pub use header::{XnbHeader, PLATFORM_IDENTIFIERS, XNB_MAGIC};
pub use swizzle::{convert_surface_format, ChannelSwizzle};
pub use texture::{read_texture, read_texture_asset, TextureData, TEXTURE2D_READER};
pub use writer::encode_astc_xnb;
