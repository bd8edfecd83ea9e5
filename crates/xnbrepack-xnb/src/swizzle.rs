//! Direct-color pixel format normalization.
//!
//! Bit-packed 16-bit formats store each channel in a masked bit range of
//! the pixel word. [`ChannelSwizzle`] derives a shift/mask pair per channel
//! once from the format's absolute masks and then unpacks whole buffers
//! into interleaved 8-bit R,G,B,A.

use xnbrepack_common::BinaryReader;

use crate::format::SurfaceFormat;
use crate::{Error, Result};

/// Per-channel extraction recipe for a packed direct-color format.
///
/// Channel masks in the fixed format table are trusted; overlapping or
/// malformed masks silently produce wrong colors.
#[derive(Debug, Clone, Copy)]
pub struct ChannelSwizzle {
    bytes_per_pixel: usize,
    // Aligned mask and right-shift per channel, in R,G,B,A order.
    masks: [u32; 4],
    shifts: [u32; 4],
}

/// Align an absolute mask to bit zero, returning `(mask, shift)`.
///
/// A zero mask derives `(0, 0)` and the channel always reads as zero.
fn mask_shift(abs_mask: u32) -> (u32, u32) {
    if abs_mask == 0 {
        return (0, 0);
    }
    let shift = abs_mask.trailing_zeros();
    (abs_mask >> shift, shift)
}

impl ChannelSwizzle {
    /// Build a swizzle from absolute channel masks.
    ///
    /// Pixel width is 4 bytes if any mask reaches above the low 16 bits,
    /// otherwise 2 bytes.
    pub fn new(r_mask: u32, g_mask: u32, b_mask: u32, a_mask: u32) -> Self {
        let mut masks = [0u32; 4];
        let mut shifts = [0u32; 4];
        for (i, abs) in [r_mask, g_mask, b_mask, a_mask].into_iter().enumerate() {
            (masks[i], shifts[i]) = mask_shift(abs);
        }

        let bytes_per_pixel = if (r_mask | g_mask | b_mask | a_mask) & 0xFFFF_0000 != 0 {
            4
        } else {
            2
        };

        Self {
            bytes_per_pixel,
            masks,
            shifts,
        }
    }

    /// Look up the fixed mask table for a direct-color format.
    pub fn for_format(format: SurfaceFormat) -> Result<Self> {
        Ok(match format {
            SurfaceFormat::Bgr565 => Self::new(0x1F, 0x3F << 5, 0x1F << 11, 0x00),
            SurfaceFormat::Bgra4444 => Self::new(0xF << 4, 0xF << 8, 0xF << 12, 0xF),
            SurfaceFormat::Bgra5551 => Self::new(0xF << 1, 0xF << 5, 0xF << 9, 0x1),
            other => return Err(Error::UnsupportedDirectColorFormat(other)),
        })
    }

    /// Source pixel width in bytes (2 or 4).
    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// Extract the four channels of one pixel word.
    pub fn unpack(&self, word: u32) -> [u8; 4] {
        let mut channels = [0u8; 4];
        for i in 0..4 {
            channels[i] = ((word >> self.shifts[i]) & self.masks[i]) as u8;
        }
        channels
    }

    /// Convert a packed buffer into interleaved 8-bit RGBA.
    ///
    /// Output is always exactly `width * height * 4` bytes.
    pub fn convert(&self, data: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        let pixels = width as usize * height as usize;
        let mut reader = BinaryReader::new(data);
        let mut output = Vec::with_capacity(pixels * 4);

        for _ in 0..pixels {
            let word = if self.bytes_per_pixel == 4 {
                reader.read_u32()?
            } else {
                u32::from(reader.read_u16()?)
            };
            output.extend_from_slice(&self.unpack(word));
        }

        Ok(output)
    }
}

/// Normalize one mip level of a direct-color format to 8-bit RGBA.
pub fn convert_surface_format(
    data: &[u8],
    width: u32,
    height: u32,
    format: SurfaceFormat,
) -> Result<Vec<u8>> {
    ChannelSwizzle::for_format(format)?.convert(data, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_shift_derivation() {
        assert_eq!(mask_shift(0x1F), (0x1F, 0));
        assert_eq!(mask_shift(0x3F << 5), (0x3F, 5));
        assert_eq!(mask_shift(0x1F << 11), (0x1F, 11));
        assert_eq!(mask_shift(0), (0, 0));
    }

    #[test]
    fn test_pixel_width_from_masks() {
        assert_eq!(ChannelSwizzle::new(0x1F, 0x3F << 5, 0x1F << 11, 0).bytes_per_pixel(), 2);
        assert_eq!(
            ChannelSwizzle::new(0xFF, 0xFF << 8, 0xFF << 16, 0xFF << 24).bytes_per_pixel(),
            4
        );
    }

    #[test]
    fn test_bgr565_roundtrip() {
        let swizzle = ChannelSwizzle::for_format(SurfaceFormat::Bgr565).unwrap();

        // Sample every channel at its native bit depth.
        for (r, g, b) in [(0u32, 0u32, 0u32), (0x1F, 0x3F, 0x1F), (0x11, 0x2A, 0x05)] {
            let word = r | (g << 5) | (b << 11);
            let data = (word as u16).to_le_bytes();
            let rgba = swizzle.convert(&data, 1, 1).unwrap();
            assert_eq!(rgba, [r as u8, g as u8, b as u8, 0]);
        }
    }

    #[test]
    fn test_bgra4444_roundtrip() {
        let swizzle = ChannelSwizzle::for_format(SurfaceFormat::Bgra4444).unwrap();

        for (r, g, b, a) in [(0u32, 0u32, 0u32, 0u32), (0xF, 0xF, 0xF, 0xF), (1, 2, 3, 4)] {
            let word = a | (r << 4) | (g << 8) | (b << 12);
            let data = (word as u16).to_le_bytes();
            let rgba = swizzle.convert(&data, 1, 1).unwrap();
            assert_eq!(rgba, [r as u8, g as u8, b as u8, a as u8]);
        }
    }

    #[test]
    fn test_bgra5551_roundtrip() {
        let swizzle = ChannelSwizzle::for_format(SurfaceFormat::Bgra5551).unwrap();

        for (r, g, b, a) in [(0u32, 0u32, 0u32, 0u32), (0xF, 0xF, 0xF, 1), (7, 9, 12, 1)] {
            let word = a | (r << 1) | (g << 5) | (b << 9);
            let data = (word as u16).to_le_bytes();
            let rgba = swizzle.convert(&data, 1, 1).unwrap();
            assert_eq!(rgba, [r as u8, g as u8, b as u8, a as u8]);
        }
    }

    #[test]
    fn test_output_size_and_order() {
        let data: Vec<u8> = (0..12u16).flat_map(|w| w.to_le_bytes()).collect();
        let rgba = convert_surface_format(&data, 3, 2, SurfaceFormat::Bgr565).unwrap();
        assert_eq!(rgba.len(), 3 * 2 * 4);
    }

    #[test]
    fn test_unsupported_format() {
        assert!(matches!(
            convert_surface_format(&[], 0, 0, SurfaceFormat::ColorBgraExt),
            Err(Error::UnsupportedDirectColorFormat(SurfaceFormat::ColorBgraExt))
        ));
    }

    #[test]
    fn test_short_buffer_fails() {
        let swizzle = ChannelSwizzle::for_format(SurfaceFormat::Bgr565).unwrap();
        assert!(swizzle.convert(&[0x00], 1, 1).is_err());
    }
}
