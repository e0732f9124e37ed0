//! Submodule defining the errors used across the crate.
//!
//! Errors are split by blast radius: [`DecodeError`], [`LiteralError`] and
//! [`RenderError`] abandon a single row-change event, while [`SyncError`]
//! stops the whole record stream.

use crate::record::ColumnType;

/// Errors raised while decoding the encoded bytes of a column value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The encoded value was empty, so not even a codec flag could be read.
    #[error("Encoded value is empty")]
    Empty,
    /// The leading codec flag is not one the datum codec knows.
    #[error("Unknown datum codec flag {0:#04x}")]
    UnknownFlag(u8),
    /// The payload ended before the expected number of bytes.
    #[error("Truncated datum: expected {expected} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes the codec needed.
        expected: usize,
        /// Bytes actually left in the input.
        remaining: usize,
    },
    /// A varint was unterminated or overflowed 64 bits.
    #[error("Invalid varint")]
    InvalidVarint,
    /// A memcomparable bytes group carried an impossible marker or non-zero padding.
    #[error("Invalid bytes group marker {0:#04x}")]
    InvalidGroupMarker(u8),
    /// Text data was required but the bytes were not valid UTF-8.
    #[error("Value is not valid UTF-8")]
    InvalidUtf8,
    /// A binary decimal had out-of-range precision, scale or digit groups.
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(&'static str),
    /// A JSON payload was not well-formed JSON text.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    /// Bytes were left over after a complete datum.
    #[error("{0} trailing bytes after datum")]
    TrailingBytes(usize),
}

/// Errors raised while turning a decoded scalar into SQL literal text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiteralError {
    /// The column type has no literal-formatting rule.
    #[error("Unsupported column type {0:#04x}")]
    UnsupportedColumnType(u8),
    /// The scalar kind does not fit the declared column type.
    #[error("Cannot format a {scalar} scalar as column type {column_type}")]
    ScalarMismatch {
        /// Declared column type.
        column_type: ColumnType,
        /// Kind of the scalar that was supplied.
        scalar: &'static str,
    },
    /// NaN and infinities have no literal form in the target dialect.
    #[error("Non-finite float has no SQL literal")]
    NonFiniteFloat,
}

/// Errors that abandon the rendering of one row-change event.
///
/// Under [`EventErrorPolicy::Continue`](crate::EventErrorPolicy::Continue)
/// these are reported and the stream carries on with the next event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A column value could not be decoded.
    #[error("Failed to decode column `{column}`: {source}")]
    Decode {
        /// Column name.
        column: String,
        /// Underlying decode failure.
        source: DecodeError,
    },
    /// A decoded column value could not be formatted.
    #[error("Failed to format column `{column}`: {source}")]
    Literal {
        /// Column name.
        column: String,
        /// Underlying formatting failure.
        source: LiteralError,
    },
    /// An update event carried a column without its pre-image.
    #[error("Update is missing the previous value of column `{column}`")]
    MissingPreImage {
        /// Column name.
        column: String,
    },
    /// The event had no columns to render.
    #[error("Row-change event has no columns")]
    EmptyRow,
}

/// Errors that stop the whole record stream.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Writing to, flushing or closing the output sink failed.
    #[error("Output sink failure: {0}")]
    Io(#[from] std::io::Error),
    /// The record kind is neither a schema change nor a row-change group.
    #[error("Unknown record kind {0}")]
    UnknownRecordKind(i32),
    /// An event failed to render under the strict abort policy.
    #[error("Failed to render event on {schema}.{table}: {source}")]
    Event {
        /// Schema of the failed event.
        schema: String,
        /// Table of the failed event.
        table: String,
        /// Underlying render failure.
        source: RenderError,
    },
    /// The syncer was used after its sink was released.
    #[error("Syncer output is already closed")]
    Closed,
}
