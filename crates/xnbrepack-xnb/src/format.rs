//! The XNA/FNA surface format enumeration and legacy translation.

use crate::{Error, Result};

/// Pixel encoding tag of a texture payload.
///
/// Values match the wire format (FNA's `SurfaceFormat`), including the
/// extension tags above 19.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SurfaceFormat {
    Color = 0,
    Bgr565 = 1,
    Bgra5551 = 2,
    Bgra4444 = 3,
    Dxt1 = 4,
    Dxt3 = 5,
    Dxt5 = 6,
    NormalizedByte2 = 7,
    NormalizedByte4 = 8,
    Rgba1010102 = 9,
    Rg32 = 10,
    Rgba64 = 11,
    Alpha8 = 12,
    Single = 13,
    Vector2 = 14,
    Vector4 = 15,
    HalfSingle = 16,
    HalfVector2 = 17,
    HalfVector4 = 18,
    HdrBlendable = 19,
    ColorBgraExt = 20,
    ColorSrgbExt = 21,
    Dxt5SrgbExt = 22,
    Bc7Ext = 23,
    Bc7SrgbExt = 24,
    Astc4x4Ext = 25,
    Astc5x5Ext = 26,
    Astc6x6Ext = 27,
    Astc8x8Ext = 28,
}

impl SurfaceFormat {
    /// Resolve a wire value, failing with `UnknownSurfaceFormat` for values
    /// outside the enumeration.
    pub fn from_wire(value: i32) -> Result<Self> {
        Ok(match value {
            0 => Self::Color,
            1 => Self::Bgr565,
            2 => Self::Bgra5551,
            3 => Self::Bgra4444,
            4 => Self::Dxt1,
            5 => Self::Dxt3,
            6 => Self::Dxt5,
            7 => Self::NormalizedByte2,
            8 => Self::NormalizedByte4,
            9 => Self::Rgba1010102,
            10 => Self::Rg32,
            11 => Self::Rgba64,
            12 => Self::Alpha8,
            13 => Self::Single,
            14 => Self::Vector2,
            15 => Self::Vector4,
            16 => Self::HalfSingle,
            17 => Self::HalfVector2,
            18 => Self::HalfVector4,
            19 => Self::HdrBlendable,
            20 => Self::ColorBgraExt,
            21 => Self::ColorSrgbExt,
            22 => Self::Dxt5SrgbExt,
            23 => Self::Bc7Ext,
            24 => Self::Bc7SrgbExt,
            25 => Self::Astc4x4Ext,
            26 => Self::Astc5x5Ext,
            27 => Self::Astc6x6Ext,
            28 => Self::Astc8x8Ext,
            other => return Err(Error::UnknownSurfaceFormat(other)),
        })
    }

    /// Translate a pre-version-5 format code.
    ///
    /// Only four legacy values ever appear in texture assets.
    pub fn from_legacy(code: i32) -> Result<Self> {
        Ok(match code {
            1 => Self::ColorBgraExt,
            28 => Self::Dxt1,
            30 => Self::Dxt3,
            32 => Self::Dxt5,
            other => return Err(Error::UnsupportedLegacyFormat(other)),
        })
    }

    /// The square ASTC block dimension for ASTC tags.
    pub fn astc_block_dim(self) -> Option<u32> {
        match self {
            Self::Astc4x4Ext => Some(4),
            Self::Astc5x5Ext => Some(5),
            Self::Astc6x6Ext => Some(6),
            Self::Astc8x8Ext => Some(8),
            _ => None,
        }
    }

    /// Whether this tag is already in the block-compressed target encoding.
    pub fn is_astc(self) -> bool {
        self.astc_block_dim().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_roundtrip() {
        for value in 0..=28 {
            let format = SurfaceFormat::from_wire(value).unwrap();
            assert_eq!(format as i32, value);
        }
    }

    #[test]
    fn test_unknown_wire_value() {
        assert!(matches!(
            SurfaceFormat::from_wire(99),
            Err(Error::UnknownSurfaceFormat(99))
        ));
        assert!(SurfaceFormat::from_wire(-1).is_err());
    }

    #[test]
    fn test_legacy_translation() {
        assert_eq!(
            SurfaceFormat::from_legacy(1).unwrap(),
            SurfaceFormat::ColorBgraExt
        );
        assert_eq!(SurfaceFormat::from_legacy(28).unwrap(), SurfaceFormat::Dxt1);
        assert_eq!(SurfaceFormat::from_legacy(30).unwrap(), SurfaceFormat::Dxt3);
        assert_eq!(SurfaceFormat::from_legacy(32).unwrap(), SurfaceFormat::Dxt5);
        assert!(matches!(
            SurfaceFormat::from_legacy(2),
            Err(Error::UnsupportedLegacyFormat(2))
        ));
    }

    #[test]
    fn test_astc_block_dims() {
        assert_eq!(SurfaceFormat::Astc4x4Ext.astc_block_dim(), Some(4));
        assert_eq!(SurfaceFormat::Astc5x5Ext.astc_block_dim(), Some(5));
        assert_eq!(SurfaceFormat::Astc6x6Ext.astc_block_dim(), Some(6));
        assert_eq!(SurfaceFormat::Astc8x8Ext.astc_block_dim(), Some(8));
        assert_eq!(SurfaceFormat::Dxt1.astc_block_dim(), None);
        assert!(!SurfaceFormat::Color.is_astc());
    }
}
