//! DXT (BC1/BC2/BC3) block decompression to 8-bit RGBA.
//!
//! Each 4x4 block is decoded with `bcdec_rs` into a scratch block and then
//! copied into the output with edge clamping, so non-multiple-of-4
//! dimensions come out exactly `width * height * 4` bytes.

/// Bytes per 4x4 block for DXT1.
const DXT1_BLOCK_SIZE: usize = 8;
/// Bytes per 4x4 block for DXT3/DXT5.
const DXT_BLOCK_SIZE: usize = 16;

/// Decompress a DXT1 (BC1) mip level.
pub fn decompress_dxt1(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    decode_blocks(data, width, height, DXT1_BLOCK_SIZE, bcdec_rs::bc1)
}

/// Decompress a DXT3 (BC2) mip level.
pub fn decompress_dxt3(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    decode_blocks(data, width, height, DXT_BLOCK_SIZE, bcdec_rs::bc2)
}

/// Decompress a DXT5 (BC3) mip level.
pub fn decompress_dxt5(data: &[u8], width: u32, height: u32) -> Vec<u8> {
    decode_blocks(data, width, height, DXT_BLOCK_SIZE, bcdec_rs::bc3)
}

fn decode_blocks(
    data: &[u8],
    width: u32,
    height: u32,
    block_size: usize,
    decode: fn(&[u8], &mut [u8], usize),
) -> Vec<u8> {
    let width = width as usize;
    let height = height as usize;
    let mut rgba = vec![0u8; width * height * 4];

    let blocks_x = width.div_ceil(4);
    let blocks_y = height.div_ceil(4);

    // One decoded 4x4 block: 16 pixels, pitch of 4 pixels.
    let mut block_rgba = [0u8; 64];
    let block_pitch = 16;

    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let block_offset = (by * blocks_x + bx) * block_size;
            if block_offset + block_size > data.len() {
                break;
            }
            decode(
                &data[block_offset..block_offset + block_size],
                &mut block_rgba,
                block_pitch,
            );

            for py in 0..4 {
                for px in 0..4 {
                    let x = bx * 4 + px;
                    let y = by * 4 + py;
                    if x >= width || y >= height {
                        continue;
                    }
                    let src = (py * 4 + px) * 4;
                    let dst = (y * width + x) * 4;
                    rgba[dst..dst + 4].copy_from_slice(&block_rgba[src..src + 4]);
                }
            }
        }
    }

    rgba
}
