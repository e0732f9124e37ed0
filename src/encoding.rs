//! Decoding of encoded column values into typed scalars.
//!
//! Column values arrive as datum-codec bytes: a one-byte codec flag followed
//! by a flag-specific payload. [`decode_datum`] undoes the codec, and a
//! [`ColumnValueDecoder`] (by default [`DatumDecoder`]) interprets the datum
//! under the declared [`ColumnType`](crate::ColumnType) to produce a
//! [`DecodedScalar`].

pub mod datum;
pub mod decimal;
pub mod flags;
pub mod scalar;
pub(crate) mod varint;

pub use datum::{Datum, decode_datum, encode_datum};
pub use scalar::{ColumnValueDecoder, DatumDecoder, DecodedScalar};
