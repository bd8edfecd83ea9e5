//! ASTC payload sizing and the block-compression encoder boundary.
//!
//! ASTC stores a fixed 16 bytes per block regardless of block footprint, so
//! payload sizes are fully determined by the image dimensions and the block
//! dimensions. This crate provides the size formula, the [`AstcEncoder`]
//! trait the container writer encodes through, and a built-in pure-Rust
//! [`VoidExtentEncoder`].

mod encode;

pub use encode::{AstcEncoder, VoidExtentEncoder};

/// Bytes stored per ASTC block, fixed by the format.
pub const BYTES_PER_BLOCK: usize = 16;

/// Compute the exact ASTC payload length for an image.
///
/// Blocks are counted with ceiling division, so images that are not a
/// multiple of the block footprint still round up to whole blocks.
pub fn payload_size(width: u32, height: u32, block_w: u32, block_h: u32) -> usize {
    BYTES_PER_BLOCK * width.div_ceil(block_w) as usize * height.div_ceil(block_h) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_size_exact_multiples() {
        assert_eq!(payload_size(4, 4, 4, 4), 16);
        assert_eq!(payload_size(8, 8, 4, 4), 64);
        assert_eq!(payload_size(1024, 1024, 4, 4), 16 * 256 * 256);
        assert_eq!(payload_size(40, 40, 8, 8), 16 * 5 * 5);
    }

    #[test]
    fn test_payload_size_rounds_up() {
        // Boundary cases where dimensions are not block multiples.
        assert_eq!(payload_size(1, 1, 4, 4), 16);
        assert_eq!(payload_size(5, 4, 4, 4), 32);
        assert_eq!(payload_size(9, 9, 5, 5), 16 * 2 * 2);
        assert_eq!(payload_size(13, 7, 6, 6), 16 * 3 * 2);
        assert_eq!(payload_size(17, 8, 8, 8), 16 * 3 * 1);
    }
}
