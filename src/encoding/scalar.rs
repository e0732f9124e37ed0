//! Typed scalars and the column value decoder seam.

use core::fmt::Write;

use super::datum::{Datum, decode_datum, json_text};
use super::decimal::Decimal;
use crate::errors::DecodeError;
use crate::record::ColumnType;

/// A column value decoded under its declared column type.
#[derive(Debug, Clone)]
pub enum DecodedScalar {
    /// SQL NULL
    Null,
    /// Signed integer
    SignedInt(i64),
    /// Unsigned integer
    UnsignedInt(u64),
    /// IEEE 754 floating point
    Float(f64),
    /// Exact decimal text
    Decimal(String),
    /// Binary digits of a bit value, leading zeros trimmed
    Bit(String),
    /// Raw bytes
    ByteString(Vec<u8>),
    /// UTF-8 text
    Utf8String(String),
    /// Ordinal of an enum member, or bitmask of a set
    EnumOrdinal(u64),
    /// Textual `[-]HH:MM:SS[.ffffff]` duration
    DurationText(String),
    /// JSON document text
    JsonText(String),
}

impl DecodedScalar {
    /// Short name of the scalar kind, used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            DecodedScalar::Null => "null",
            DecodedScalar::SignedInt(_) => "signed integer",
            DecodedScalar::UnsignedInt(_) => "unsigned integer",
            DecodedScalar::Float(_) => "float",
            DecodedScalar::Decimal(_) => "decimal",
            DecodedScalar::Bit(_) => "bit",
            DecodedScalar::ByteString(_) => "byte string",
            DecodedScalar::Utf8String(_) => "utf-8 string",
            DecodedScalar::EnumOrdinal(_) => "enum ordinal",
            DecodedScalar::DurationText(_) => "duration",
            DecodedScalar::JsonText(_) => "json",
        }
    }

    /// Check if the value is Null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, DecodedScalar::Null)
    }
}

impl PartialEq for DecodedScalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DecodedScalar::Null, DecodedScalar::Null) => true,
            (DecodedScalar::SignedInt(a), DecodedScalar::SignedInt(b)) => a == b,
            (DecodedScalar::UnsignedInt(a), DecodedScalar::UnsignedInt(b))
            | (DecodedScalar::EnumOrdinal(a), DecodedScalar::EnumOrdinal(b)) => a == b,
            (DecodedScalar::Float(a), DecodedScalar::Float(b)) => a.to_bits() == b.to_bits(),
            (DecodedScalar::ByteString(a), DecodedScalar::ByteString(b)) => a == b,
            (DecodedScalar::Decimal(a), DecodedScalar::Decimal(b))
            | (DecodedScalar::Bit(a), DecodedScalar::Bit(b))
            | (DecodedScalar::Utf8String(a), DecodedScalar::Utf8String(b))
            | (DecodedScalar::DurationText(a), DecodedScalar::DurationText(b))
            | (DecodedScalar::JsonText(a), DecodedScalar::JsonText(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for DecodedScalar {}

/// Turns the encoded bytes of a column into a [`DecodedScalar`].
///
/// Implementations must be deterministic. Closures of the matching shape
/// implement the trait, which makes it easy to substitute a decoder:
///
/// ```rust
/// use binlog_flashback::{ColumnType, DecodeError, encoding::{ColumnValueDecoder, DecodedScalar}};
///
/// let decoder = |_: ColumnType, bytes: &[u8]| -> Result<DecodedScalar, DecodeError> {
///     Ok(DecodedScalar::ByteString(bytes.to_vec()))
/// };
/// assert_eq!(
///     decoder.decode(ColumnType::Blob, b"ab"),
///     Ok(DecodedScalar::ByteString(b"ab".to_vec()))
/// );
/// ```
pub trait ColumnValueDecoder {
    /// Decodes one encoded column value.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the bytes are malformed.
    fn decode(&self, column_type: ColumnType, encoded: &[u8]) -> Result<DecodedScalar, DecodeError>;
}

impl<F> ColumnValueDecoder for F
where
    F: Fn(ColumnType, &[u8]) -> Result<DecodedScalar, DecodeError>,
{
    fn decode(&self, column_type: ColumnType, encoded: &[u8]) -> Result<DecodedScalar, DecodeError> {
        self(column_type, encoded)
    }
}

/// Decoder for values written by the datum codec.
///
/// The datum is interpreted under the column type only where the type
/// changes its meaning (bits, enums, text, temporal values, JSON); every
/// other datum passes through and the literal formatter judges the fit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DatumDecoder;

impl ColumnValueDecoder for DatumDecoder {
    fn decode(&self, column_type: ColumnType, encoded: &[u8]) -> Result<DecodedScalar, DecodeError> {
        let (datum, consumed) = decode_datum(encoded)?;
        if consumed != encoded.len() {
            return Err(DecodeError::TrailingBytes(encoded.len() - consumed));
        }
        interpret(column_type, datum)
    }
}

fn utf8(bytes: Vec<u8>) -> Result<String, DecodeError> {
    String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)
}

/// Binary digits of a big-endian bit string, leading zeros trimmed.
fn bit_digits(bytes: &[u8]) -> String {
    let mut digits = String::with_capacity(bytes.len() * 8);
    for byte in bytes {
        let _ = write!(digits, "{byte:08b}");
    }
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Formats nanoseconds as `[-]HH:MM:SS.ffffff`, truncated to microseconds.
#[must_use]
pub fn format_duration(nanos: i64) -> String {
    let sign = if nanos < 0 { "-" } else { "" };
    let nanos = nanos.unsigned_abs();
    let micros = (nanos / 1_000) % 1_000_000;
    let total_seconds = nanos / 1_000_000_000;
    let (hours, minutes, seconds) = (
        total_seconds / 3600,
        (total_seconds / 60) % 60,
        total_seconds % 60,
    );
    format!("{sign}{hours:02}:{minutes:02}:{seconds:02}.{micros:06}")
}

fn interpret(column_type: ColumnType, datum: Datum) -> Result<DecodedScalar, DecodeError> {
    Ok(match (column_type, datum) {
        (_, Datum::Null) => DecodedScalar::Null,
        (ColumnType::Bit, Datum::Uint(v)) => DecodedScalar::Bit(bit_digits(&v.to_be_bytes())),
        (ColumnType::Bit, Datum::Int(v)) => DecodedScalar::Bit(bit_digits(&v.to_be_bytes())),
        (ColumnType::Bit, Datum::Bytes(b)) => DecodedScalar::Bit(bit_digits(&b)),
        (ColumnType::Enum | ColumnType::Set, Datum::Uint(v)) => DecodedScalar::EnumOrdinal(v),
        (ColumnType::Enum | ColumnType::Set, Datum::Int(v)) if v >= 0 => {
            DecodedScalar::EnumOrdinal(v.unsigned_abs())
        }
        (ColumnType::NewDecimal, Datum::Bytes(b)) => {
            DecodedScalar::Decimal(utf8(b)?.parse::<Decimal>()?.to_string())
        }
        (ColumnType::Duration, Datum::Bytes(b)) => DecodedScalar::DurationText(utf8(b)?),
        (ColumnType::Json, Datum::Bytes(b)) => DecodedScalar::JsonText(json_text(b)?),
        (ColumnType::Varchar, Datum::Bytes(b)) => match String::from_utf8(b) {
            Ok(text) => DecodedScalar::Utf8String(text),
            Err(err) => DecodedScalar::ByteString(err.into_bytes()),
        },
        (t, Datum::Bytes(b)) if t.is_temporal() => DecodedScalar::Utf8String(utf8(b)?),
        (_, Datum::Bytes(b)) => DecodedScalar::ByteString(b),
        (_, Datum::Int(v)) => DecodedScalar::SignedInt(v),
        (_, Datum::Uint(v)) => DecodedScalar::UnsignedInt(v),
        (_, Datum::Float(v)) => DecodedScalar::Float(v),
        (_, Datum::Decimal(d)) => DecodedScalar::Decimal(d.to_string()),
        (_, Datum::Duration(nanos)) => DecodedScalar::DurationText(format_duration(nanos)),
        (_, Datum::Json(text)) => DecodedScalar::JsonText(text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(column_type: ColumnType, datum: impl Into<Datum>) -> DecodedScalar {
        DatumDecoder
            .decode(column_type, &datum.into().encode())
            .unwrap()
    }

    #[test]
    fn test_null_under_any_type() {
        for tag in [0x03, 0x0f, 0xfc, 0xff, 0x42] {
            assert_eq!(decode(ColumnType::from(tag), Datum::Null), DecodedScalar::Null);
        }
    }

    #[test]
    fn test_integers_pass_through() {
        assert_eq!(decode(ColumnType::Long, 1i64), DecodedScalar::SignedInt(1));
        assert_eq!(
            decode(ColumnType::Longlong, u64::MAX),
            DecodedScalar::UnsignedInt(u64::MAX)
        );
        assert_eq!(decode(ColumnType::Double, 2.5), DecodedScalar::Float(2.5));
    }

    #[test]
    fn test_bit_digits() {
        assert_eq!(decode(ColumnType::Bit, 5u64), DecodedScalar::Bit("101".into()));
        assert_eq!(decode(ColumnType::Bit, 0u64), DecodedScalar::Bit("0".into()));
        assert_eq!(
            decode(ColumnType::Bit, vec![0x00, 0x81]),
            DecodedScalar::Bit("10000001".into())
        );
    }

    #[test]
    fn test_enum_and_set_ordinals() {
        assert_eq!(decode(ColumnType::Enum, 2u64), DecodedScalar::EnumOrdinal(2));
        assert_eq!(decode(ColumnType::Set, 6i64), DecodedScalar::EnumOrdinal(6));
        // A negative ordinal is not an ordinal.
        assert_eq!(decode(ColumnType::Set, -1i64), DecodedScalar::SignedInt(-1));
    }

    #[test]
    fn test_text_types() {
        assert_eq!(
            decode(ColumnType::Varchar, "test"),
            DecodedScalar::Utf8String("test".into())
        );
        assert_eq!(
            decode(ColumnType::String, "ab"),
            DecodedScalar::ByteString(b"ab".to_vec())
        );
        assert_eq!(
            decode(ColumnType::Datetime, "2019-01-02 03:04:05"),
            DecodedScalar::Utf8String("2019-01-02 03:04:05".into())
        );
        // Text in a foreign charset keeps its bytes.
        assert_eq!(
            decode(ColumnType::Varchar, vec![0xff_u8, 0xfe]),
            DecodedScalar::ByteString(vec![0xff, 0xfe])
        );
    }

    #[test]
    fn test_decimal_text() {
        let decimal: Decimal = "-3.140".parse().unwrap();
        assert_eq!(
            decode(ColumnType::NewDecimal, decimal),
            DecodedScalar::Decimal("-3.140".into())
        );
        assert_eq!(
            decode(ColumnType::NewDecimal, "12.5"),
            DecodedScalar::Decimal("12.5".into())
        );
    }

    #[test]
    fn test_duration_text() {
        let nanos = ((12 * 3600 + 34 * 60 + 56) * 1_000_000_000) + 789_000;
        assert_eq!(
            decode(ColumnType::Duration, Datum::Duration(nanos)),
            DecodedScalar::DurationText("12:34:56.000789".into())
        );
        assert_eq!(format_duration(-1_500_000_000), "-00:00:01.500000");
        assert_eq!(format_duration(838 * 3600 * 1_000_000_000), "838:00:00.000000");
    }

    #[test]
    fn test_json_text() {
        assert_eq!(
            decode(ColumnType::Json, Datum::Json(r#"{"k": "v"}"#.into())),
            DecodedScalar::JsonText(r#"{"k": "v"}"#.into())
        );
        assert!(matches!(
            DatumDecoder.decode(ColumnType::Json, &Datum::from("nope").encode()),
            Err(DecodeError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_trailing_bytes_are_rejected() {
        let mut bytes = Datum::Int(1).encode();
        bytes.push(0);
        assert_eq!(
            DatumDecoder.decode(ColumnType::Long, &bytes),
            Err(DecodeError::TrailingBytes(1))
        );
    }

    #[test]
    fn test_closure_decoder() {
        let failing = |_: ColumnType, _: &[u8]| -> Result<DecodedScalar, DecodeError> {
            Err(DecodeError::Empty)
        };
        assert_eq!(failing.decode(ColumnType::Long, &[]), Err(DecodeError::Empty));
    }
}
