//! Datum codec: the self-describing byte form of one column value.
//!
//! Every encoded datum starts with a codec flag (see [`codec`]):
//! - NIL: no payload
//! - BYTES: memcomparable 8-byte groups, each followed by a marker byte
//!   `0xff - padding`
//! - COMPACT_BYTES: zig-zag varint length + raw bytes
//! - INT: 8 bytes big-endian with the sign bit flipped
//! - UINT: 8 bytes big-endian
//! - FLOAT: 8 bytes big-endian IEEE 754, rearranged to sort bytewise
//! - DECIMAL: precision, scale, MySQL binary decimal
//! - DURATION: nanoseconds, encoded as INT
//! - VARINT / UVARINT: base-128 varints
//! - JSON: JSON text, encoded as COMPACT_BYTES

use core::hash::{Hash, Hasher};

use super::decimal::{Decimal, decode_decimal, encode_decimal};
use super::flags::codec;
use super::varint::{decode_uvarint, decode_varint, encode_uvarint, encode_varint};
use crate::errors::DecodeError;

const SIGN_MASK: u64 = 0x8000_0000_0000_0000;
/// Data bytes per memcomparable group.
const GROUP_SIZE: usize = 8;
/// Marker of a group with no padding.
const GROUP_MARKER: u8 = 0xff;

/// A codec-level value, before it is interpreted under a column type.
#[derive(Debug, Clone)]
pub enum Datum {
    /// SQL NULL
    Null,
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    Uint(u64),
    /// IEEE 754 floating point
    Float(f64),
    /// Raw bytes: text, binary strings and date/time text
    Bytes(Vec<u8>),
    /// Exact decimal
    Decimal(Decimal),
    /// Signed duration in nanoseconds
    Duration(i64),
    /// JSON document text
    Json(String),
}

impl Datum {
    /// Encodes this datum into a fresh buffer.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        encode_datum(&mut out, self);
        out
    }
}

impl PartialEq for Datum {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Datum::Null, Datum::Null) => true,
            (Datum::Int(a), Datum::Int(b)) | (Datum::Duration(a), Datum::Duration(b)) => a == b,
            (Datum::Uint(a), Datum::Uint(b)) => a == b,
            (Datum::Float(a), Datum::Float(b)) => a.to_bits() == b.to_bits(),
            (Datum::Bytes(a), Datum::Bytes(b)) => a == b,
            (Datum::Decimal(a), Datum::Decimal(b)) => a == b,
            (Datum::Json(a), Datum::Json(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Datum {}

impl Hash for Datum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Datum::Null => {}
            Datum::Int(v) | Datum::Duration(v) => v.hash(state),
            Datum::Uint(v) => v.hash(state),
            Datum::Float(v) => v.to_bits().hash(state),
            Datum::Bytes(v) => v.hash(state),
            Datum::Decimal(v) => v.hash(state),
            Datum::Json(v) => v.hash(state),
        }
    }
}

impl From<i64> for Datum {
    fn from(v: i64) -> Self {
        Datum::Int(v)
    }
}

impl From<i32> for Datum {
    fn from(v: i32) -> Self {
        Datum::Int(i64::from(v))
    }
}

impl From<u64> for Datum {
    fn from(v: u64) -> Self {
        Datum::Uint(v)
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Self {
        Datum::Float(v)
    }
}

impl From<&str> for Datum {
    fn from(v: &str) -> Self {
        Datum::Bytes(v.as_bytes().to_vec())
    }
}

impl From<String> for Datum {
    fn from(v: String) -> Self {
        Datum::Bytes(v.into_bytes())
    }
}

impl From<Vec<u8>> for Datum {
    fn from(v: Vec<u8>) -> Self {
        Datum::Bytes(v)
    }
}

impl From<&[u8]> for Datum {
    fn from(v: &[u8]) -> Self {
        Datum::Bytes(v.to_vec())
    }
}

impl From<Decimal> for Datum {
    fn from(v: Decimal) -> Self {
        Datum::Decimal(v)
    }
}

impl<T: Into<Datum>> From<Option<T>> for Datum {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Datum::Null,
        }
    }
}

#[allow(clippy::cast_sign_loss)]
fn comparable_int(v: i64) -> u64 {
    (v as u64) ^ SIGN_MASK
}

#[allow(clippy::cast_possible_wrap)]
fn int_from_comparable(u: u64) -> i64 {
    (u ^ SIGN_MASK) as i64
}

fn comparable_float(v: f64) -> u64 {
    let bits = v.to_bits();
    if v >= 0.0 { bits | SIGN_MASK } else { !bits }
}

fn float_from_comparable(u: u64) -> f64 {
    let bits = if u & SIGN_MASK > 0 { u & !SIGN_MASK } else { !u };
    f64::from_bits(bits)
}

/// Append `data` as memcomparable 8-byte groups.
pub fn encode_comparable_bytes(out: &mut Vec<u8>, data: &[u8]) {
    out.push(codec::BYTES);
    let mut idx = 0;
    while idx <= data.len() {
        let remain = data.len() - idx;
        if remain >= GROUP_SIZE {
            out.extend(&data[idx..idx + GROUP_SIZE]);
            out.push(GROUP_MARKER);
        } else {
            let pad = GROUP_SIZE - remain;
            out.extend(&data[idx..]);
            out.extend(core::iter::repeat_n(0u8, pad));
            // pad is at most GROUP_SIZE.
            out.push(GROUP_MARKER - u8::try_from(pad).unwrap_or(0));
        }
        idx += GROUP_SIZE;
    }
}

fn encode_compact_bytes(out: &mut Vec<u8>, data: &[u8]) {
    encode_varint(out, i64::try_from(data.len()).unwrap_or(i64::MAX));
    out.extend(data);
}

/// Encode a datum. Bytes are written in the compact form.
pub fn encode_datum(out: &mut Vec<u8>, datum: &Datum) {
    match datum {
        Datum::Null => out.push(codec::NIL),
        Datum::Int(v) => {
            out.push(codec::INT);
            out.extend(comparable_int(*v).to_be_bytes());
        }
        Datum::Uint(v) => {
            out.push(codec::UINT);
            out.extend(v.to_be_bytes());
        }
        Datum::Float(v) => {
            out.push(codec::FLOAT);
            out.extend(comparable_float(*v).to_be_bytes());
        }
        Datum::Bytes(v) => {
            out.push(codec::COMPACT_BYTES);
            encode_compact_bytes(out, v);
        }
        Datum::Decimal(v) => {
            out.push(codec::DECIMAL);
            encode_decimal(out, v);
        }
        Datum::Duration(nanos) => {
            out.push(codec::DURATION);
            out.extend(comparable_int(*nanos).to_be_bytes());
        }
        Datum::Json(text) => {
            out.push(codec::JSON);
            encode_compact_bytes(out, text.as_bytes());
        }
    }
}

/// Encode a signed integer in the varint form rather than the fixed one.
pub fn encode_varint_datum(out: &mut Vec<u8>, value: i64) {
    out.push(codec::VARINT);
    encode_varint(out, value);
}

/// Encode an unsigned integer in the varint form rather than the fixed one.
pub fn encode_uvarint_datum(out: &mut Vec<u8>, value: u64) {
    out.push(codec::UVARINT);
    encode_uvarint(out, value);
}

fn take_u64(data: &[u8]) -> Result<u64, DecodeError> {
    let bytes: [u8; 8] = data
        .get(..8)
        .and_then(|b| b.try_into().ok())
        .ok_or(DecodeError::Truncated {
            expected: 8,
            remaining: data.len(),
        })?;
    Ok(u64::from_be_bytes(bytes))
}

fn decode_comparable_bytes(data: &[u8]) -> Result<(Vec<u8>, usize), DecodeError> {
    let mut out = Vec::new();
    let mut pos = 0;
    loop {
        let group = data
            .get(pos..pos + GROUP_SIZE + 1)
            .ok_or(DecodeError::Truncated {
                expected: GROUP_SIZE + 1,
                remaining: data.len() - pos,
            })?;
        let marker = group[GROUP_SIZE];
        let pad = usize::from(GROUP_MARKER - marker);
        if pad > GROUP_SIZE {
            return Err(DecodeError::InvalidGroupMarker(marker));
        }
        let real = GROUP_SIZE - pad;
        out.extend(&group[..real]);
        pos += GROUP_SIZE + 1;
        if pad != 0 {
            if group[real..GROUP_SIZE].iter().any(|&b| b != 0) {
                return Err(DecodeError::InvalidGroupMarker(marker));
            }
            return Ok((out, pos));
        }
    }
}

fn decode_compact_bytes(data: &[u8]) -> Result<(Vec<u8>, usize), DecodeError> {
    let (len, len_bytes) = decode_varint(data).ok_or(DecodeError::InvalidVarint)?;
    let len = usize::try_from(len).map_err(|_| DecodeError::InvalidVarint)?;
    let payload = data
        .get(len_bytes..len_bytes.saturating_add(len))
        .ok_or(DecodeError::Truncated {
            expected: len,
            remaining: data.len() - len_bytes,
        })?;
    Ok((payload.to_vec(), len_bytes + len))
}

/// Decode one datum from the front of `data`.
///
/// Returns the datum and the number of bytes consumed, flag included.
///
/// # Errors
///
/// * `Empty` - If `data` is empty.
/// * `UnknownFlag` - If the leading flag is not a datum codec flag.
/// * `Truncated`, `InvalidVarint`, `InvalidGroupMarker`, `InvalidDecimal` - If
///   the payload is malformed.
/// * `InvalidUtf8`, `InvalidJson` - If a JSON payload is not valid JSON text.
pub fn decode_datum(data: &[u8]) -> Result<(Datum, usize), DecodeError> {
    let (&flag, payload) = data.split_first().ok_or(DecodeError::Empty)?;
    let (datum, consumed) = match flag {
        codec::NIL => (Datum::Null, 0),
        codec::INT => (Datum::Int(int_from_comparable(take_u64(payload)?)), 8),
        codec::UINT => (Datum::Uint(take_u64(payload)?), 8),
        codec::FLOAT => (Datum::Float(float_from_comparable(take_u64(payload)?)), 8),
        codec::DURATION => (Datum::Duration(int_from_comparable(take_u64(payload)?)), 8),
        codec::BYTES => {
            let (bytes, len) = decode_comparable_bytes(payload)?;
            (Datum::Bytes(bytes), len)
        }
        codec::COMPACT_BYTES => {
            let (bytes, len) = decode_compact_bytes(payload)?;
            (Datum::Bytes(bytes), len)
        }
        codec::DECIMAL => {
            let (decimal, len) = decode_decimal(payload)?;
            (Datum::Decimal(decimal), len)
        }
        codec::VARINT => {
            let (v, len) = decode_varint(payload).ok_or(DecodeError::InvalidVarint)?;
            (Datum::Int(v), len)
        }
        codec::UVARINT => {
            let (v, len) = decode_uvarint(payload).ok_or(DecodeError::InvalidVarint)?;
            (Datum::Uint(v), len)
        }
        codec::JSON => {
            let (bytes, len) = decode_compact_bytes(payload)?;
            (Datum::Json(json_text(bytes)?), len)
        }
        other => return Err(DecodeError::UnknownFlag(other)),
    };
    Ok((datum, 1 + consumed))
}

/// Validates JSON text, returning it without re-serializing so key order survives.
pub(crate) fn json_text(bytes: Vec<u8>) -> Result<String, DecodeError> {
    let text = String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)?;
    serde_json::from_str::<serde_json::Value>(&text)
        .map_err(|err| DecodeError::InvalidJson(err.to_string()))?;
    Ok(text)
}
