//! Binary reader for zero-copy parsing of byte slices.
//!
//! This module provides [`BinaryReader`], a cursor-like type that reads
//! binary data from a byte slice without copying. Besides plain
//! little-endian primitives it understands the two .NET `BinaryReader`
//! conventions that XNB containers are built on: 7-bit variable-length
//! integers and length-prefixed UTF-8 strings.

use crate::{Error, Result};

/// A binary reader that provides zero-copy reading from a byte slice.
///
/// # Example
///
/// ```
/// use xnbrepack_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// assert_eq!(reader.read_u32().unwrap(), 0x08070605);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Seek to an absolute position.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a .NET 7-bit encoded integer.
    ///
    /// Each byte carries 7 payload bits; the high bit signals that another
    /// byte follows. At most 5 bytes encode a 32-bit value.
    pub fn read_7bit_encoded_int(&mut self) -> Result<u32> {
        let mut value = 0u32;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8()?;
            value |= u32::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift >= 35 {
                return Err(Error::VarIntOverflow);
            }
        }
    }

    /// Read a .NET length-prefixed UTF-8 string.
    ///
    /// The length is a 7-bit encoded byte count, followed by that many
    /// UTF-8 bytes.
    pub fn read_dotnet_string(&mut self) -> Result<&'a str> {
        let length = self.read_7bit_encoded_int()? as usize;
        let bytes = self.read_bytes(length)?;
        std::str::from_utf8(bytes).map_err(Error::Utf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::{write_7bit_encoded_int, write_dotnet_string};

    #[test]
    fn test_read_primitives() {
        let data = [
            0x01u8, 0x02, 0x03, 0x04, // u32: 0x04030201
            0xFF, 0xFF, // u16: 0xFFFF
            0xFE, 0xFF, 0xFF, 0xFF, // i32: -2
        ];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u32().unwrap(), 0x04030201);
        assert_eq!(reader.read_u16().unwrap(), 0xFFFF);
        assert_eq!(reader.read_i32().unwrap(), -2);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_peek_does_not_advance() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.peek_bytes(4).unwrap(), &data);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_u32().unwrap(), 0x04030201);
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_eof_error() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);

        assert!(reader.read_u32().is_err());
    }

    #[test]
    fn test_7bit_encoded_int_roundtrip() {
        let mut buffer = Vec::new();
        let values = [0u32, 1, 127, 128, 300, 16384, 0x7FFF_FFFF, u32::MAX];
        for &v in &values {
            write_7bit_encoded_int(&mut buffer, v);
        }

        let mut reader = BinaryReader::new(&buffer);
        for &v in &values {
            assert_eq!(reader.read_7bit_encoded_int().unwrap(), v);
        }
        assert!(reader.is_empty());
    }

    #[test]
    fn test_7bit_encoded_int_single_bytes() {
        // 0x80 never terminates, 0x05 does
        let mut reader = BinaryReader::new(&[0x80, 0x05]);
        assert_eq!(reader.read_7bit_encoded_int().unwrap(), 0x280);
    }

    #[test]
    fn test_7bit_encoded_int_overflow() {
        let mut reader = BinaryReader::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert!(matches!(
            reader.read_7bit_encoded_int(),
            Err(Error::VarIntOverflow)
        ));
    }

    #[test]
    fn test_dotnet_string_roundtrip() {
        let mut buffer = Vec::new();
        write_dotnet_string(&mut buffer, "Texture2DReader");
        write_dotnet_string(&mut buffer, "héllo wörld");

        let mut reader = BinaryReader::new(&buffer);
        assert_eq!(reader.read_dotnet_string().unwrap(), "Texture2DReader");
        assert_eq!(reader.read_dotnet_string().unwrap(), "héllo wörld");
        assert!(reader.is_empty());
    }
}
