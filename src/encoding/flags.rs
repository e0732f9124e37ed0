//! Constants for the datum codec and the column type table.

/// Leading flag bytes of the datum codec.
pub mod codec {
    /// SQL NULL, no payload.
    pub const NIL: u8 = 0x00;
    /// Memcomparable bytes: 8-byte groups each followed by a marker byte.
    pub const BYTES: u8 = 0x01;
    /// Compact bytes: zig-zag varint length followed by the raw bytes.
    pub const COMPACT_BYTES: u8 = 0x02;
    /// Signed integer, 8 bytes big-endian with the sign bit flipped.
    pub const INT: u8 = 0x03;
    /// Unsigned integer, 8 bytes big-endian.
    pub const UINT: u8 = 0x04;
    /// Float, 8 bytes in comparable IEEE 754 order.
    pub const FLOAT: u8 = 0x05;
    /// Decimal: precision byte, frac byte, MySQL binary decimal.
    pub const DECIMAL: u8 = 0x06;
    /// Duration in nanoseconds, encoded as [`INT`].
    pub const DURATION: u8 = 0x07;
    /// Signed zig-zag varint.
    pub const VARINT: u8 = 0x08;
    /// Unsigned varint.
    pub const UVARINT: u8 = 0x09;
    /// JSON text, encoded as [`COMPACT_BYTES`].
    pub const JSON: u8 = 0x0a;
}

/// One-byte MySQL column type codes.
pub mod type_tags {
    /// Pre-5.0 packed decimal.
    pub const DECIMAL: u8 = 0x00;
    /// `TINYINT`.
    pub const TINY: u8 = 0x01;
    /// `SMALLINT`.
    pub const SHORT: u8 = 0x02;
    /// `INT`.
    pub const LONG: u8 = 0x03;
    /// `FLOAT`.
    pub const FLOAT: u8 = 0x04;
    /// `DOUBLE`.
    pub const DOUBLE: u8 = 0x05;
    /// The `NULL` type.
    pub const NULL: u8 = 0x06;
    /// `TIMESTAMP`.
    pub const TIMESTAMP: u8 = 0x07;
    /// `BIGINT`.
    pub const LONGLONG: u8 = 0x08;
    /// `MEDIUMINT`.
    pub const INT24: u8 = 0x09;
    /// `DATE`.
    pub const DATE: u8 = 0x0a;
    /// `TIME`.
    pub const DURATION: u8 = 0x0b;
    /// `DATETIME`.
    pub const DATETIME: u8 = 0x0c;
    /// `YEAR`.
    pub const YEAR: u8 = 0x0d;
    /// Internal date type.
    pub const NEW_DATE: u8 = 0x0e;
    /// `VARCHAR`.
    pub const VARCHAR: u8 = 0x0f;
    /// `BIT`.
    pub const BIT: u8 = 0x10;
    /// `JSON`.
    pub const JSON: u8 = 0xf5;
    /// `DECIMAL`.
    pub const NEW_DECIMAL: u8 = 0xf6;
    /// `ENUM`.
    pub const ENUM: u8 = 0xf7;
    /// `SET`.
    pub const SET: u8 = 0xf8;
    /// `TINYBLOB`.
    pub const TINY_BLOB: u8 = 0xf9;
    /// `MEDIUMBLOB`.
    pub const MEDIUM_BLOB: u8 = 0xfa;
    /// `LONGBLOB`.
    pub const LONG_BLOB: u8 = 0xfb;
    /// `BLOB`.
    pub const BLOB: u8 = 0xfc;
    /// `VARBINARY`.
    pub const VAR_STRING: u8 = 0xfd;
    /// `CHAR` / `BINARY`.
    pub const STRING: u8 = 0xfe;
    /// Spatial types.
    pub const GEOMETRY: u8 = 0xff;
}
