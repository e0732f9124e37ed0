//! SQL literal text for decoded scalars.
//!
//! The rules follow the MySQL literal grammar per declared column type:
//! - numbers and decimals are written bare
//! - bits become `b'...'` literals
//! - character data is single-quoted with `\` and `'` backslash-escaped
//! - binary data becomes a `0x...` hex literal
//! - enums and sets are written as their integer value
//! - temporal, duration and JSON text is single-quoted
//!
//! NULL renders as `null` whatever the column type.

use crate::encoding::DecodedScalar;
use crate::errors::LiteralError;
use crate::record::ColumnType;

/// Escape backslashes, then single quotes, by prefixing a backslash.
///
/// Backslashes go first so that the escapes added for quotes are not
/// escaped a second time.
#[must_use]
pub fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Wrap `text` in single quotes without escaping it.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    out.push_str(text);
    out.push('\'');
    out
}

/// `0x` hex literal, two digits per byte.
fn hex_literal(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Column types sharing one literal grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Integer,
    Float,
    Bit,
    Decimal,
    Text,
    Binary,
    Ordinal,
    Temporal,
    Year,
    Duration,
    Json,
}

impl Family {
    fn of(column_type: ColumnType) -> Result<Self, LiteralError> {
        Ok(match column_type {
            ColumnType::Tiny
            | ColumnType::Short
            | ColumnType::Long
            | ColumnType::Int24
            | ColumnType::Longlong => Family::Integer,
            ColumnType::Float | ColumnType::Double => Family::Float,
            ColumnType::Bit => Family::Bit,
            ColumnType::NewDecimal => Family::Decimal,
            // Padding of CHAR/BINARY values is the encoder's business.
            ColumnType::Varchar | ColumnType::String => Family::Text,
            ColumnType::VarString
            | ColumnType::Blob
            | ColumnType::TinyBlob
            | ColumnType::MediumBlob
            | ColumnType::LongBlob => Family::Binary,
            ColumnType::Enum | ColumnType::Set => Family::Ordinal,
            ColumnType::Date | ColumnType::Datetime | ColumnType::Timestamp | ColumnType::NewDate => {
                Family::Temporal
            }
            ColumnType::Year => Family::Year,
            ColumnType::Duration => Family::Duration,
            ColumnType::Json => Family::Json,
            ColumnType::OldDecimal | ColumnType::Null | ColumnType::Geometry | ColumnType::Unknown(_) => {
                return Err(LiteralError::UnsupportedColumnType(column_type.tag()));
            }
        })
    }
}

/// Format a decoded scalar as a SQL literal of the given column type.
///
/// # Errors
///
/// * `UnsupportedColumnType` - If the column type has no literal form.
/// * `ScalarMismatch` - If the scalar kind cannot be a value of the column type.
/// * `NonFiniteFloat` - If a float is NaN or infinite.
///
/// # Example
///
/// ```rust
/// use binlog_flashback::{ColumnType, encoding::DecodedScalar, render::format_literal};
///
/// let text = DecodedScalar::Utf8String("it's".into());
/// assert_eq!(format_literal(&text, ColumnType::Varchar).unwrap(), r"'it\'s'");
///
/// let blob = DecodedScalar::ByteString(vec![0xca, 0xfe]);
/// assert_eq!(format_literal(&blob, ColumnType::Blob).unwrap(), "0xcafe");
/// ```
pub fn format_literal(scalar: &DecodedScalar, column_type: ColumnType) -> Result<String, LiteralError> {
    let mismatch = || LiteralError::ScalarMismatch {
        column_type,
        scalar: scalar.kind_name(),
    };

    match scalar {
        DecodedScalar::Null => Ok("null".to_owned()),
        DecodedScalar::SignedInt(v) => match Family::of(column_type)? {
            Family::Integer | Family::Float => Ok(v.to_string()),
            Family::Year => Ok(quote(&v.to_string())),
            _ => Err(mismatch()),
        },
        DecodedScalar::UnsignedInt(v) => match Family::of(column_type)? {
            Family::Integer | Family::Float | Family::Ordinal => Ok(v.to_string()),
            Family::Year => Ok(quote(&v.to_string())),
            _ => Err(mismatch()),
        },
        DecodedScalar::Float(v) => match Family::of(column_type)? {
            Family::Float if v.is_finite() => Ok(v.to_string()),
            Family::Float => Err(LiteralError::NonFiniteFloat),
            _ => Err(mismatch()),
        },
        DecodedScalar::Decimal(text) => match Family::of(column_type)? {
            Family::Decimal => Ok(text.clone()),
            _ => Err(mismatch()),
        },
        DecodedScalar::Bit(digits) => match Family::of(column_type)? {
            Family::Bit => Ok(format!("b'{digits}'")),
            _ => Err(mismatch()),
        },
        // Character data that is not text keeps its bytes through a hex literal.
        DecodedScalar::ByteString(bytes) => match Family::of(column_type)? {
            Family::Text => Ok(core::str::from_utf8(bytes)
                .map_or_else(|_| hex_literal(bytes), |text| quote(&escape(text)))),
            Family::Binary => Ok(hex_literal(bytes)),
            _ => Err(mismatch()),
        },
        DecodedScalar::Utf8String(text) => match Family::of(column_type)? {
            Family::Text => Ok(quote(&escape(text))),
            Family::Binary => Ok(hex_literal(text.as_bytes())),
            Family::Temporal => Ok(quote(text)),
            _ => Err(mismatch()),
        },
        DecodedScalar::EnumOrdinal(v) => match Family::of(column_type)? {
            Family::Ordinal => Ok(v.to_string()),
            _ => Err(mismatch()),
        },
        DecodedScalar::DurationText(text) => match Family::of(column_type)? {
            Family::Duration => Ok(quote(text)),
            _ => Err(mismatch()),
        },
        DecodedScalar::JsonText(text) => match Family::of(column_type)? {
            Family::Json => Ok(quote(&escape(text))),
            _ => Err(mismatch()),
        },
    }
}
