//! Little-endian base-128 varints, as used by the datum codec.
//!
//! Each byte carries 7 data bits, least significant group first, with the
//! high bit set on every byte except the last. Signed values are zig-zag
//! mapped first so that small negative numbers stay short.
//!
//! For example, 300 (0x12C) encodes as:
//! - Binary: 100101100 (9 bits)
//! - Split into 7-bit groups from LSB: 0101100, 0000010
//! - First byte: 0x80 | 0x2c = 0xac (continuation)
//! - Second byte: 0x02 (no continuation)
//! - Result: [0xac, 0x02]

/// Longest possible encoding of a u64.
const MAX_VARINT_LEN: usize = 10;

/// Append `value` as an unsigned varint.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn encode_uvarint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value & 0x7f) as u8 | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Append `value` as a zig-zag signed varint.
#[allow(clippy::cast_sign_loss)]
pub(crate) fn encode_varint(out: &mut Vec<u8>, value: i64) {
    let zigzag = ((value << 1) ^ (value >> 63)) as u64;
    encode_uvarint(out, zigzag);
}

/// Decode an unsigned varint.
///
/// Returns the decoded value and number of bytes consumed, or `None` if the
/// varint is unterminated or does not fit in 64 bits.
#[must_use]
pub(crate) fn decode_uvarint(data: &[u8]) -> Option<(u64, usize)> {
    let mut value = 0u64;
    for (i, &byte) in data.iter().enumerate().take(MAX_VARINT_LEN) {
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            return None; // Overflows u64
        }
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Some((value, i + 1));
        }
    }
    None
}

/// Decode a zig-zag signed varint.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn decode_varint(data: &[u8]) -> Option<(i64, usize)> {
    let (zigzag, len) = decode_uvarint(data)?;
    let value = ((zigzag >> 1) as i64) ^ -((zigzag & 1) as i64);
    Some((value, len))
}
