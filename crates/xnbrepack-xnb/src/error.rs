//! Error types for the XNB crate.
//!
//! Failures come in two tiers. [`SkipReason`] values signal "leave this file
//! alone" and are not run failures; everything else in [`Error`] is fatal
//! for the file it occurred in.

use thiserror::Error;

use crate::format::SurfaceFormat;

/// Errors that can occur when transcoding an XNB container.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] xnbrepack_common::Error),

    /// Container version is not 4 or 5.
    #[error("unsupported XNB version: {0}")]
    UnsupportedVersion(u8),

    /// A compressed frame failed to decode.
    #[error("decompression error: {0}")]
    Decompression(String),

    /// Decompressed stream length does not match the declared size.
    #[error("decompressed size mismatch: expected {expected} bytes, got {actual}")]
    DecompressionIntegrity { expected: usize, actual: usize },

    /// The container declares more than one shared resource.
    #[error("too many shared resources: {0}")]
    TooManySharedResources(u32),

    /// Pre-version-5 format code outside the known translation table.
    #[error("unsupported legacy format code: {0}")]
    UnsupportedLegacyFormat(i32),

    /// Surface format value outside the known enumeration.
    #[error("unknown surface format: {0}")]
    UnknownSurfaceFormat(i32),

    /// Textures for this target platform cannot be read.
    #[error("unsupported platform: '{0}'")]
    UnsupportedPlatform(char),

    /// Mip level count outside the valid range.
    #[error("invalid mip level count: {0}")]
    InvalidLevelCount(u32),

    /// A direct-color format with no channel mask table entry.
    #[error("unsupported direct-color format: {0:?}")]
    UnsupportedDirectColorFormat(SurfaceFormat),

    /// The requested encode target is not an ASTC format.
    #[error("invalid encode target: {0:?}")]
    InvalidEncodeTarget(SurfaceFormat),

    /// The block-compression encoder reported failure.
    #[error("failed to encode ASTC payload")]
    EncodeFailure,

    /// The image fallback decoder could not decode the payload.
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// Not an error: the file should be left untouched.
    #[error("{0}")]
    Skipped(#[from] SkipReason),
}

/// Reasons a file is skipped rather than failed.
#[derive(Debug, Error)]
pub enum SkipReason {
    /// The container holds some other asset kind.
    #[error("not a Texture2D, got {0} instead")]
    NotATexture(String),

    /// The texture payload is already block-compressed to the target.
    #[error("texture already encoded")]
    AlreadyEncoded,

    /// The texture is below the minimum dimension threshold.
    #[error("asset too small: {width}x{height}")]
    TooSmall { width: u32, height: u32 },
}

impl Error {
    /// Whether this is a skip signal rather than a failure.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// Result type for XNB operations.
pub type Result<T> = std::result::Result<T, Error>;
