//! ASTC container serialization.
//!
//! Re-encodes a normalized texture's level-0 buffer through the
//! block-compression encoder and emits a fresh, uncompressed version-5
//! container around it. The total-size field is not knowable until the
//! payload is encoded, so it is written as a placeholder and patched last.

use byteorder::{LittleEndian, WriteBytesExt};
use xnbrepack_astc::{payload_size, AstcEncoder};
use xnbrepack_common::writer::{write_7bit_encoded_int, write_dotnet_string};

use crate::format::SurfaceFormat;
use crate::header::XnbHeader;
use crate::texture::{TextureData, TEXTURE2D_READER};
use crate::{Error, Result};

/// Output containers are always version 5.
const OUTPUT_VERSION: u8 = 5;

/// Output containers always target the `w` platform.
const OUTPUT_PLATFORM: u8 = b'w';

/// Encode a texture's level 0 to ASTC and serialize a new container.
///
/// `target` must be one of the ASTC surface format tags; its block
/// dimension drives the payload size. The output always carries exactly
/// one mip level.
pub fn encode_astc_xnb(
    texture: &TextureData,
    target: SurfaceFormat,
    encoder: &dyn AstcEncoder,
) -> Result<Vec<u8>> {
    let block_dim = target
        .astc_block_dim()
        .ok_or(Error::InvalidEncodeTarget(target))?;

    let payload_len = payload_size(texture.width, texture.height, block_dim, block_dim);
    let mut payload = vec![0u8; payload_len];

    let ok = encoder.encode(
        texture.width,
        texture.height,
        block_dim,
        block_dim,
        &texture.level_data[0],
        &mut payload,
    );
    if !ok {
        return Err(Error::EncodeFailure);
    }

    let mut out = Vec::with_capacity(payload_len + 128);
    out.extend_from_slice(b"XNB");
    out.push(OUTPUT_PLATFORM);
    out.push(OUTPUT_VERSION);
    out.push(0x00); // flags: decompressed
    out.write_u32::<LittleEndian>(0)?; // total size, patched below

    write_7bit_encoded_int(&mut out, 1); // type reader count
    write_dotnet_string(&mut out, TEXTURE2D_READER);
    out.write_i32::<LittleEndian>(0)?; // reader version
    write_7bit_encoded_int(&mut out, 0); // shared resource count
    write_7bit_encoded_int(&mut out, 1); // type id

    out.write_i32::<LittleEndian>(target as i32)?;
    out.write_u32::<LittleEndian>(texture.width)?;
    out.write_u32::<LittleEndian>(texture.height)?;
    out.write_u32::<LittleEndian>(1)?; // mip level count
    out.write_u32::<LittleEndian>(payload_len as u32)?;
    out.extend_from_slice(&payload);

    let total = out.len() as u32;
    out[XnbHeader::TOTAL_SIZE_OFFSET..XnbHeader::TOTAL_SIZE_OFFSET + 4]
        .copy_from_slice(&total.to_le_bytes());

    Ok(out)
}
