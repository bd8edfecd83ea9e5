//! Frame-level decompression of compressed container bodies.
//!
//! The compressed body is a sequence of LZX frames. Each frame is preceded
//! by a 2-byte big-endian block length and decodes to an implicit 32 KiB of
//! output, except when the length's high byte is `0xFF`: that escapes to an
//! explicit 16-bit frame size followed by the real 16-bit block length,
//! which is how mip payloads larger than the default frame are expressed.

use lzxd::{Lzxd, WindowSize};
use xnbrepack_common::BinaryReader;

use crate::{Error, Result};

/// Default output size of one frame.
const DEFAULT_FRAME_SIZE: usize = 0x8000;

/// Stateful frame decompressor.
///
/// Implementations keep their sliding-window history across calls within
/// one container; a fresh instance is created per file.
pub trait FrameDecompressor {
    /// Decompress one `block` into exactly `frame_size` bytes appended to
    /// `output`.
    fn decompress(&mut self, block: &[u8], frame_size: usize, output: &mut Vec<u8>) -> Result<()>;
}

/// LZX decompressor with the 64 KiB window XNB containers use.
pub struct LzxDecompressor {
    inner: Lzxd,
}

impl LzxDecompressor {
    /// Create a decompressor for one container body.
    pub fn new() -> Self {
        Self {
            inner: Lzxd::new(WindowSize::KB64),
        }
    }
}

impl Default for LzxDecompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecompressor for LzxDecompressor {
    fn decompress(&mut self, block: &[u8], frame_size: usize, output: &mut Vec<u8>) -> Result<()> {
        let frame = self
            .inner
            .decompress_next(block, frame_size)
            .map_err(|e| Error::Decompression(format!("{e:?}")))?;
        output.extend_from_slice(frame);
        Ok(())
    }
}

/// Decompress a container body positioned at the reader's cursor.
///
/// Stops at a zero block or frame size, or once `compressed_size` bytes have
/// been consumed. The result must be exactly `decompressed_size` bytes long
/// or the container is considered corrupt.
pub fn decompress_body(
    reader: &mut BinaryReader,
    compressed_size: usize,
    decompressed_size: usize,
    decompressor: &mut dyn FrameDecompressor,
) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(decompressed_size);
    let mut consumed = 0usize;

    while consumed < compressed_size {
        let hi = usize::from(reader.read_u8()?);
        let lo = usize::from(reader.read_u8()?);

        let mut block_size = (hi << 8) | lo;
        let mut frame_size = DEFAULT_FRAME_SIZE;

        if hi == 0xFF {
            frame_size = (lo << 8) | usize::from(reader.read_u8()?);
            block_size = (usize::from(reader.read_u8()?) << 8) | usize::from(reader.read_u8()?);
            consumed += 5;
        } else {
            consumed += 2;
        }

        if block_size == 0 || frame_size == 0 {
            break;
        }

        let block = reader.read_bytes(block_size)?;
        decompressor.decompress(block, frame_size, &mut output)?;
        consumed += block_size;
    }

    if output.len() != decompressed_size {
        return Err(Error::DecompressionIntegrity {
            expected: decompressed_size,
            actual: output.len(),
        });
    }

    Ok(output)
}
