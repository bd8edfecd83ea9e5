//! XNB container header parsing.

use xnbrepack_common::BinaryReader;

use crate::{Error, Result};

/// XNB magic bytes (followed by a one-byte platform identifier).
pub const XNB_MAGIC: &[u8; 3] = b"XNB";

/// Known target platform identifiers (XNA, MonoGame and FNA).
pub const PLATFORM_IDENTIFIERS: &[char] = &[
    'w', 'x', 'm', 'i', 'a', 'd', 'X', 'W', 'n', 'u', 'p', 'M', 'r', 'P', '5', 'O', 'S', 'G',
    'b', 'V',
];

/// The platform identifier whose texture layout is not supported.
pub const PLATFORM_XBOX360: char = 'x';

/// Parsed XNB container header.
#[derive(Debug, Clone, Copy)]
pub struct XnbHeader {
    /// Target platform identifier byte.
    pub platform: char,
    /// Format version (4 or 5).
    pub version: u8,
    /// Flag bits.
    pub flags: u8,
    /// Total container size, header included.
    pub total_size: u32,
}

impl XnbHeader {
    /// Compression bit in `flags`.
    pub const FLAG_COMPRESSED: u8 = 0x80;

    /// Header length for uncompressed containers.
    pub const LEN: usize = 10;

    /// Header length including the decompressed-size field.
    pub const COMPRESSED_LEN: usize = 14;

    /// Byte offset of the total-size field, patched after encoding.
    pub const TOTAL_SIZE_OFFSET: usize = 6;

    /// Check whether a buffer starts with the XNB magic and a known
    /// platform identifier.
    pub fn sniff(data: &[u8]) -> Option<char> {
        if data.len() < 4 || &data[..3] != XNB_MAGIC {
            return None;
        }
        let platform = data[3] as char;
        PLATFORM_IDENTIFIERS.contains(&platform).then_some(platform)
    }

    /// Parse the fixed header fields, magic included.
    ///
    /// Call [`XnbHeader::sniff`] first; this assumes the magic already
    /// matched and only validates the version.
    pub fn parse(reader: &mut BinaryReader) -> Result<Self> {
        let magic = reader.read_bytes(4)?;
        let platform = magic[3] as char;

        let version = reader.read_u8()?;
        if version != 4 && version != 5 {
            return Err(Error::UnsupportedVersion(version));
        }

        let flags = reader.read_u8()?;
        let total_size = reader.read_u32()?;

        Ok(Self {
            platform,
            version,
            flags,
            total_size,
        })
    }

    /// Whether the container body is block-compressed.
    pub fn is_compressed(&self) -> bool {
        self.flags & Self::FLAG_COMPRESSED != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff() {
        assert_eq!(XnbHeader::sniff(b"XNBw\x05\x00"), Some('w'));
        assert_eq!(XnbHeader::sniff(b"XNBd\x05\x00"), Some('d'));
        assert_eq!(XnbHeader::sniff(b"XNB?\x05\x00"), None);
        assert_eq!(XnbHeader::sniff(b"DDS \x00\x00"), None);
        assert_eq!(XnbHeader::sniff(b"XN"), None);
    }

    #[test]
    fn test_parse() {
        let data = [b'X', b'N', b'B', b'w', 5, 0x80, 0x2A, 0, 0, 0];
        let mut reader = BinaryReader::new(&data);
        let header = XnbHeader::parse(&mut reader).unwrap();

        assert_eq!(header.platform, 'w');
        assert_eq!(header.version, 5);
        assert!(header.is_compressed());
        assert_eq!(header.total_size, 0x2A);
        assert_eq!(reader.position(), XnbHeader::LEN);
    }

    #[test]
    fn test_rejects_version() {
        let data = [b'X', b'N', b'B', b'w', 3, 0, 0, 0, 0, 0];
        let mut reader = BinaryReader::new(&data);
        assert!(matches!(
            XnbHeader::parse(&mut reader),
            Err(Error::UnsupportedVersion(3))
        ));
    }
}
