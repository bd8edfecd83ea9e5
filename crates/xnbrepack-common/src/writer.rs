//! .NET binary serialization helpers for writing container fields.

/// Write a .NET 7-bit encoded integer.
///
/// The value is emitted 7 bits at a time, low bits first; the high bit of
/// each byte signals that another byte follows.
pub fn write_7bit_encoded_int(out: &mut Vec<u8>, value: u32) {
    let mut v = value;
    while v >= 0x80 {
        out.push((v as u8) | 0x80);
        v >>= 7;
    }
    out.push(v as u8);
}

/// Write a .NET length-prefixed UTF-8 string.
pub fn write_dotnet_string(out: &mut Vec<u8>, value: &str) {
    write_7bit_encoded_int(out, value.len() as u32);
    out.extend_from_slice(value.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_7bit_encoding_bytes() {
        let mut out = Vec::new();
        write_7bit_encoded_int(&mut out, 1);
        assert_eq!(out, [0x01]);

        out.clear();
        write_7bit_encoded_int(&mut out, 300);
        assert_eq!(out, [0xAC, 0x02]);
    }

    #[test]
    fn test_string_prefix() {
        let mut out = Vec::new();
        write_dotnet_string(&mut out, "abc");
        assert_eq!(out, [0x03, b'a', b'b', b'c']);
    }
}
