//! Texture record reading and pixel normalization.
//!
//! [`read_texture_asset`] is the decode entry point for one asset file: it
//! recognizes the container, runs the decompression path if needed, reads
//! the embedded Texture2D record and normalizes every mip level to 8-bit
//! RGBA. Non-container payloads fall through to the image decoder.

use xnbrepack_common::BinaryReader;

use crate::decompress::{decompress_body, LzxDecompressor};
use crate::dxt;
use crate::format::SurfaceFormat;
use crate::header::{XnbHeader, PLATFORM_XBOX360};
use crate::swizzle::convert_surface_format;
use crate::{Error, Result, SkipReason};

/// Fully qualified name of the expected content type reader.
pub const TEXTURE2D_READER: &str = "Microsoft.Xna.Framework.Content.Texture2DReader";

/// Upper bound on the declared mip level count.
const MAX_LEVEL_COUNT: u32 = 32;

/// A decoded in-memory texture with all levels normalized to 8-bit RGBA.
#[derive(Debug, Clone)]
pub struct TextureData {
    /// Pixel encoding of `level_data` (always [`SurfaceFormat::Color`]
    /// after normalization).
    pub format: SurfaceFormat,
    /// Full-resolution width in pixels.
    pub width: u32,
    /// Full-resolution height in pixels.
    pub height: u32,
    /// Number of mip levels; `level_data.len()` always matches.
    pub level_count: u32,
    /// Per-level pixel buffers, index 0 at full resolution.
    pub level_data: Vec<Vec<u8>>,
}

/// Decode one asset file into a normalized texture.
///
/// The buffer is recognized as an XNB container by magic and platform
/// identifier. Compressed containers are decompressed first. Anything
/// else, DDS payloads included, goes through the image fallback decoder
/// and either decodes or fails generically.
pub fn read_texture_asset(data: &[u8]) -> Result<TextureData> {
    if XnbHeader::sniff(data).is_none() {
        return decode_image_fallback(data);
    }

    let mut reader = BinaryReader::new(data);
    let header = XnbHeader::parse(&mut reader)?;

    if header.is_compressed() {
        let decompressed_size = reader.read_u32()? as usize;
        let compressed_size = (header.total_size as usize).saturating_sub(XnbHeader::COMPRESSED_LEN);

        let mut lzx = LzxDecompressor::new();
        let body = decompress_body(&mut reader, compressed_size, decompressed_size, &mut lzx)?;

        let mut body_reader = BinaryReader::new(&body);
        read_texture(&mut body_reader, header.version, header.platform)
    } else {
        read_texture(&mut reader, header.version, header.platform)
    }
}

/// Read the Texture2D record at the reader's cursor.
///
/// `version` selects legacy format translation; `platform` is the header's
/// platform identifier.
pub fn read_texture(reader: &mut BinaryReader, version: u8, platform: char) -> Result<TextureData> {
    let reader_count = reader.read_7bit_encoded_int()?;
    let reader_name = reader.read_dotnet_string()?;
    let _reader_version = reader.read_i32()?;

    if reader_count > 1 || !reader_name.contains(TEXTURE2D_READER) {
        let type_name = reader_name.split(',').next().unwrap_or(reader_name);
        return Err(SkipReason::NotATexture(type_name.to_string()).into());
    }

    let shared_resource_count = reader.read_7bit_encoded_int()?;
    if shared_resource_count > 1 {
        return Err(Error::TooManySharedResources(shared_resource_count));
    }

    let _type_id = reader.read_7bit_encoded_int()?;

    let surface_format = if version < 5 {
        SurfaceFormat::from_legacy(reader.read_i32()?)?
    } else {
        SurfaceFormat::from_wire(reader.read_i32()?)?
    };

    if surface_format.is_astc() {
        return Err(SkipReason::AlreadyEncoded.into());
    }

    let width = reader.read_u32()?;
    let height = reader.read_u32()?;
    let level_count = reader.read_u32()?;

    // At least one level, and no more than a 32-bit dimension can halve.
    if level_count == 0 || level_count > MAX_LEVEL_COUNT {
        return Err(Error::InvalidLevelCount(level_count));
    }

    // Xbox 360 levels are tiled and byte-swapped; not supported.
    if platform == PLATFORM_XBOX360 {
        return Err(Error::UnsupportedPlatform(platform));
    }

    let mut level_data = Vec::with_capacity(level_count as usize);
    for i in 0..level_count {
        let level_size = reader.read_u32()? as usize;
        let bytes = reader.read_bytes(level_size)?;
        let level_width = width >> i;
        let level_height = height >> i;

        let normalized = match surface_format {
            SurfaceFormat::Color => bytes.to_vec(),
            SurfaceFormat::Dxt1 => dxt::decompress_dxt1(bytes, level_width, level_height),
            SurfaceFormat::Dxt3 => dxt::decompress_dxt3(bytes, level_width, level_height),
            SurfaceFormat::Dxt5 => dxt::decompress_dxt5(bytes, level_width, level_height),
            other => convert_surface_format(bytes, level_width, level_height, other)?,
        };

        level_data.push(normalized);
    }

    Ok(TextureData {
        format: SurfaceFormat::Color,
        width,
        height,
        level_count,
        level_data,
    })
}

/// Decode a non-container payload through the image library.
fn decode_image_fallback(data: &[u8]) -> Result<TextureData> {
    let rgba = image::load_from_memory(data)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(TextureData {
        format: SurfaceFormat::Color,
        width,
        height,
        level_count: 1,
        level_data: vec![rgba.into_raw()],
    })
}
