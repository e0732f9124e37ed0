//! Source-database column type tags.

use core::fmt;

use crate::encoding::flags::type_tags;

/// Declared column type of a [`ColumnRecord`](crate::ColumnRecord).
///
/// Mirrors the one-byte MySQL protocol type codes. Codes without a named
/// variant are kept as [`ColumnType::Unknown`] so that the literal formatter
/// can reject them as a typed error instead of losing them on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u8", into = "u8"))]
pub enum ColumnType {
    /// Pre-5.0 packed decimal.
    OldDecimal,
    /// `TINYINT`.
    Tiny,
    /// `SMALLINT`.
    Short,
    /// `INT`.
    Long,
    /// `FLOAT`.
    Float,
    /// `DOUBLE`.
    Double,
    /// The `NULL` type.
    Null,
    /// `TIMESTAMP`.
    Timestamp,
    /// `BIGINT`.
    Longlong,
    /// `MEDIUMINT`.
    Int24,
    /// `DATE`.
    Date,
    /// `TIME`.
    Duration,
    /// `DATETIME`.
    Datetime,
    /// `YEAR`.
    Year,
    /// Internal date type.
    NewDate,
    /// `VARCHAR`.
    Varchar,
    /// `BIT`.
    Bit,
    /// `JSON`.
    Json,
    /// `DECIMAL` / `NUMERIC`.
    NewDecimal,
    /// `ENUM`.
    Enum,
    /// `SET`.
    Set,
    /// `TINYBLOB` / `TINYTEXT`.
    TinyBlob,
    /// `MEDIUMBLOB` / `MEDIUMTEXT`.
    MediumBlob,
    /// `LONGBLOB` / `LONGTEXT`.
    LongBlob,
    /// `BLOB` / `TEXT`.
    Blob,
    /// `VARBINARY`.
    VarString,
    /// `CHAR` / `BINARY`.
    String,
    /// Spatial types.
    Geometry,
    /// Any other type code.
    Unknown(u8),
}

impl ColumnType {
    /// Returns the one-byte type code.
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            ColumnType::OldDecimal => type_tags::DECIMAL,
            ColumnType::Tiny => type_tags::TINY,
            ColumnType::Short => type_tags::SHORT,
            ColumnType::Long => type_tags::LONG,
            ColumnType::Float => type_tags::FLOAT,
            ColumnType::Double => type_tags::DOUBLE,
            ColumnType::Null => type_tags::NULL,
            ColumnType::Timestamp => type_tags::TIMESTAMP,
            ColumnType::Longlong => type_tags::LONGLONG,
            ColumnType::Int24 => type_tags::INT24,
            ColumnType::Date => type_tags::DATE,
            ColumnType::Duration => type_tags::DURATION,
            ColumnType::Datetime => type_tags::DATETIME,
            ColumnType::Year => type_tags::YEAR,
            ColumnType::NewDate => type_tags::NEW_DATE,
            ColumnType::Varchar => type_tags::VARCHAR,
            ColumnType::Bit => type_tags::BIT,
            ColumnType::Json => type_tags::JSON,
            ColumnType::NewDecimal => type_tags::NEW_DECIMAL,
            ColumnType::Enum => type_tags::ENUM,
            ColumnType::Set => type_tags::SET,
            ColumnType::TinyBlob => type_tags::TINY_BLOB,
            ColumnType::MediumBlob => type_tags::MEDIUM_BLOB,
            ColumnType::LongBlob => type_tags::LONG_BLOB,
            ColumnType::Blob => type_tags::BLOB,
            ColumnType::VarString => type_tags::VAR_STRING,
            ColumnType::String => type_tags::STRING,
            ColumnType::Geometry => type_tags::GEOMETRY,
            ColumnType::Unknown(tag) => tag,
        }
    }

    /// Returns true for the binary/blob family rendered as hex literals.
    #[must_use]
    pub fn is_blob(self) -> bool {
        matches!(
            self,
            ColumnType::VarString
                | ColumnType::Blob
                | ColumnType::TinyBlob
                | ColumnType::MediumBlob
                | ColumnType::LongBlob
        )
    }

    /// Returns true for the date and timestamp family.
    #[must_use]
    pub fn is_temporal(self) -> bool {
        matches!(
            self,
            ColumnType::Date | ColumnType::Datetime | ColumnType::Timestamp | ColumnType::NewDate
        )
    }
}

impl From<u8> for ColumnType {
    fn from(tag: u8) -> Self {
        match tag {
            type_tags::DECIMAL => ColumnType::OldDecimal,
            type_tags::TINY => ColumnType::Tiny,
            type_tags::SHORT => ColumnType::Short,
            type_tags::LONG => ColumnType::Long,
            type_tags::FLOAT => ColumnType::Float,
            type_tags::DOUBLE => ColumnType::Double,
            type_tags::NULL => ColumnType::Null,
            type_tags::TIMESTAMP => ColumnType::Timestamp,
            type_tags::LONGLONG => ColumnType::Longlong,
            type_tags::INT24 => ColumnType::Int24,
            type_tags::DATE => ColumnType::Date,
            type_tags::DURATION => ColumnType::Duration,
            type_tags::DATETIME => ColumnType::Datetime,
            type_tags::YEAR => ColumnType::Year,
            type_tags::NEW_DATE => ColumnType::NewDate,
            type_tags::VARCHAR => ColumnType::Varchar,
            type_tags::BIT => ColumnType::Bit,
            type_tags::JSON => ColumnType::Json,
            type_tags::NEW_DECIMAL => ColumnType::NewDecimal,
            type_tags::ENUM => ColumnType::Enum,
            type_tags::SET => ColumnType::Set,
            type_tags::TINY_BLOB => ColumnType::TinyBlob,
            type_tags::MEDIUM_BLOB => ColumnType::MediumBlob,
            type_tags::LONG_BLOB => ColumnType::LongBlob,
            type_tags::BLOB => ColumnType::Blob,
            type_tags::VAR_STRING => ColumnType::VarString,
            type_tags::STRING => ColumnType::String,
            type_tags::GEOMETRY => ColumnType::Geometry,
            other => ColumnType::Unknown(other),
        }
    }
}

impl From<ColumnType> for u8 {
    fn from(column_type: ColumnType) -> Self {
        column_type.tag()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Unknown(tag) => write!(f, "unknown({tag:#04x})"),
            known => write!(f, "{known:?}"),
        }
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for ColumnType {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(u8::arbitrary(u)?.into())
    }
}
