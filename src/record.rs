//! Transaction-log records as handed over by the upstream deserializer.
//!
//! A [`Record`] is either a schema change carrying raw DDL text or a group
//! of [`RowChangeEvent`]s committed together. Events are built with a small
//! builder API:
//!
//! ```rust
//! use binlog_flashback::{ColumnRecord, ColumnType, RowChangeEvent, encoding::Datum};
//!
//! let event = RowChangeEvent::insert("test", "t1")
//!     .column(ColumnRecord::new("a", ColumnType::Long, Datum::Int(1).encode()))
//!     .column(ColumnRecord::new("b", ColumnType::Varchar, Datum::from("test").encode()));
//!
//! assert_eq!(event.columns().len(), 2);
//! ```

use core::fmt;

mod column_type;

pub use column_type::ColumnType;

/// Kind of row-level change carried by a [`RowChangeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum EventKind {
    /// A row was inserted.
    Insert,
    /// A row was updated.
    Update,
    /// A row was deleted.
    Delete,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventKind::Insert => "insert",
            EventKind::Update => "update",
            EventKind::Delete => "delete",
        })
    }
}

/// One column of a row-change event, still in its encoded form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnRecord {
    /// Column name.
    name: String,
    /// Declared source column type.
    column_type: ColumnType,
    /// Post-image: the value after the change.
    current_value: Vec<u8>,
    /// Pre-image: the value before the change, only present for updates.
    #[cfg_attr(feature = "serde", serde(default))]
    previous_value: Option<Vec<u8>>,
}

impl ColumnRecord {
    /// Creates a column carrying only a post-image.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        column_type: impl Into<ColumnType>,
        current_value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            current_value: current_value.into(),
            previous_value: None,
        }
    }

    /// Creates an update column carrying both the pre-image and the post-image.
    #[must_use]
    pub fn changed(
        name: impl Into<String>,
        column_type: impl Into<ColumnType>,
        previous_value: impl Into<Vec<u8>>,
        current_value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            previous_value: Some(previous_value.into()),
            ..Self::new(name, column_type, current_value)
        }
    }

    /// Returns the column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared column type.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Returns the encoded post-image.
    #[must_use]
    pub fn current_value(&self) -> &[u8] {
        &self.current_value
    }

    /// Returns the encoded pre-image, if any.
    #[must_use]
    pub fn previous_value(&self) -> Option<&[u8]> {
        self.previous_value.as_deref()
    }
}

/// One row-level insert, update or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowChangeEvent {
    kind: EventKind,
    schema_name: String,
    table_name: String,
    columns: Vec<ColumnRecord>,
}

impl RowChangeEvent {
    /// Creates an event with no columns yet.
    #[must_use]
    pub fn new(kind: EventKind, schema_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            kind,
            schema_name: schema_name.into(),
            table_name: table_name.into(),
            columns: Vec::new(),
        }
    }

    /// Creates an insert event.
    #[must_use]
    pub fn insert(schema_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self::new(EventKind::Insert, schema_name, table_name)
    }

    /// Creates an update event.
    #[must_use]
    pub fn update(schema_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self::new(EventKind::Update, schema_name, table_name)
    }

    /// Creates a delete event.
    #[must_use]
    pub fn delete(schema_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self::new(EventKind::Delete, schema_name, table_name)
    }

    /// Appends a column. Column order is kept verbatim in the rendered statement.
    #[must_use]
    pub fn column(mut self, column: ColumnRecord) -> Self {
        self.columns.push(column);
        self
    }

    /// Returns the change kind.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns the schema name.
    #[must_use]
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Returns the table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Returns the columns in event order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnRecord] {
        &self.columns
    }
}

/// What a [`Record`] carries.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordKind {
    /// A data-definition statement captured verbatim.
    SchemaChange(String),
    /// Row changes committed together, in commit order.
    RowChangeGroup(Vec<RowChangeEvent>),
    /// A record type code this crate does not know how to render.
    Unknown(i32),
}

/// One transaction-log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    commit_sequence: i64,
    kind: RecordKind,
}

impl Record {
    /// Creates a schema-change record.
    #[must_use]
    pub fn schema_change(commit_sequence: i64, statement: impl Into<String>) -> Self {
        Self {
            commit_sequence,
            kind: RecordKind::SchemaChange(statement.into()),
        }
    }

    /// Creates a row-change group from events in commit order.
    #[must_use]
    pub fn row_changes(
        commit_sequence: i64,
        events: impl IntoIterator<Item = RowChangeEvent>,
    ) -> Self {
        Self {
            commit_sequence,
            kind: RecordKind::RowChangeGroup(events.into_iter().collect()),
        }
    }

    /// Creates a record of a type code that has no rendering.
    #[must_use]
    pub fn unknown(commit_sequence: i64, type_code: i32) -> Self {
        Self {
            commit_sequence,
            kind: RecordKind::Unknown(type_code),
        }
    }

    /// Returns the commit sequence of the transaction.
    #[must_use]
    pub fn commit_sequence(&self) -> i64 {
        self.commit_sequence
    }

    /// Returns what the record carries.
    #[must_use]
    pub fn kind(&self) -> &RecordKind {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_order_is_preserved() {
        let event = RowChangeEvent::insert("s", "t")
            .column(ColumnRecord::new("z", ColumnType::Long, vec![0]))
            .column(ColumnRecord::new("a", ColumnType::Long, vec![0]))
            .column(ColumnRecord::new("m", ColumnType::Long, vec![0]));

        let names: Vec<_> = event.columns().iter().map(ColumnRecord::name).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    #[test]
    fn test_changed_column_keeps_both_images() {
        let column = ColumnRecord::changed("c", ColumnType::Varchar, vec![1], vec![2]);
        assert_eq!(column.previous_value(), Some(&[1u8][..]));
        assert_eq!(column.current_value(), &[2]);
    }

    #[test]
    fn test_plain_column_has_no_pre_image() {
        let column = ColumnRecord::new("c", 0x0f, vec![2]);
        assert_eq!(column.column_type(), ColumnType::Varchar);
        assert!(column.previous_value().is_none());
    }

    #[test]
    fn test_record_constructors() {
        let ddl = Record::schema_change(7, "create database test");
        assert_eq!(ddl.commit_sequence(), 7);
        assert_eq!(
            ddl.kind(),
            &RecordKind::SchemaChange("create database test".into())
        );

        let dml = Record::row_changes(8, [RowChangeEvent::delete("s", "t")]);
        assert!(matches!(dml.kind(), RecordKind::RowChangeGroup(events) if events.len() == 1));

        assert_eq!(Record::unknown(9, 42).kind(), &RecordKind::Unknown(42));
    }
}
