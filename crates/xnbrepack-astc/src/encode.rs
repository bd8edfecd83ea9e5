//! The block-compression encoder boundary.
//!
//! [`AstcEncoder`] is the narrow interface the container writer encodes
//! through. The built-in [`VoidExtentEncoder`] produces valid LDR ASTC
//! output in pure Rust by emitting one void-extent (constant color) block
//! per footprint, carrying the block's average color. A native `astcenc`
//! binding can implement the same trait for production quality.

use crate::payload_size;

/// Encoder for one ASTC payload.
///
/// Implementations must fill `out` completely and return `true`, or leave
/// the run in a recoverable state and return `false`. `out` must be exactly
/// [`payload_size`] bytes for the given dimensions and block footprint;
/// implementations verify this before touching the buffer.
pub trait AstcEncoder {
    /// Encode `rgba` (8-bit RGBA, `width * height * 4` bytes) into `out`.
    fn encode(
        &self,
        width: u32,
        height: u32,
        block_w: u32,
        block_h: u32,
        rgba: &[u8],
        out: &mut [u8],
    ) -> bool;
}

/// Low 64 bits of an LDR void-extent block: the void-extent block mode with
/// all four extent coordinates set to all-ones (extents ignored).
const VOID_EXTENT_LO: u64 = 0xFFFF_FFFF_FFFF_FDFC;

/// Pure-Rust encoder emitting one void-extent block per footprint.
///
/// Each block stores the average color of the texels it covers as UNORM16
/// channels. Lossy for anything but flat color, but always a conformant
/// ASTC stream of the exact expected length.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidExtentEncoder;

impl AstcEncoder for VoidExtentEncoder {
    fn encode(
        &self,
        width: u32,
        height: u32,
        block_w: u32,
        block_h: u32,
        rgba: &[u8],
        out: &mut [u8],
    ) -> bool {
        if width == 0 || height == 0 || block_w == 0 || block_h == 0 {
            return false;
        }
        let texel_bytes = width as usize * height as usize * 4;
        if rgba.len() < texel_bytes || out.len() != payload_size(width, height, block_w, block_h) {
            return false;
        }

        let mut offset = 0;
        for block_y in 0..height.div_ceil(block_h) {
            for block_x in 0..width.div_ceil(block_w) {
                let x0 = block_x * block_w;
                let y0 = block_y * block_h;
                let x1 = (x0 + block_w).min(width);
                let y1 = (y0 + block_h).min(height);

                let mut sums = [0u64; 4];
                for y in y0..y1 {
                    for x in x0..x1 {
                        let i = (y as usize * width as usize + x as usize) * 4;
                        for (sum, &byte) in sums.iter_mut().zip(&rgba[i..i + 4]) {
                            *sum += u64::from(byte);
                        }
                    }
                }

                let count = u64::from((x1 - x0) * (y1 - y0));
                let mut color = 0u64;
                for (channel, sum) in sums.iter().enumerate() {
                    let average = (sum + count / 2) / count;
                    // Replicate the 8-bit value into 16 bits (v * 0x101).
                    color |= (average * 0x101) << (16 * channel);
                }

                out[offset..offset + 8].copy_from_slice(&VOID_EXTENT_LO.to_le_bytes());
                out[offset + 8..offset + 16].copy_from_slice(&color.to_le_bytes());
                offset += 16;
            }
        }

        true
    }
}
