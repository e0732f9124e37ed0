//! SQL statement text from a directed [`Operation`].
//!
//! Identifiers are written as given, `schema.table`, and every statement ends
//! with a single `;`. No line terminator is appended here.

use core::fmt::Write;

use super::RenderDirection;
use super::operation::Operation;
use crate::record::EventKind;

/// Literal text of SQL NULL, as produced by the literal formatter.
const NULL_LITERAL: &str = "null";

/// `column = value`, for SET lists.
fn assignment(sql: &mut String, column: &str, value: &str) {
    let _ = write!(sql, "{column} = {value}");
}

/// `column = value`, or `column IS NULL` when matching on NULL.
fn predicate(sql: &mut String, column: &str, value: &str) {
    if value == NULL_LITERAL {
        let _ = write!(sql, "{column} IS NULL");
    } else {
        let _ = write!(sql, "{column} = {value}");
    }
}

/// Writes `columns[i] <op> values[i]` pairs joined by `separator`.
fn write_pairs(
    sql: &mut String,
    columns: &[&str],
    values: &[String],
    separator: &str,
    pair: fn(&mut String, &str, &str),
) {
    for (i, (column, value)) in columns.iter().zip(values).enumerate() {
        if i > 0 {
            sql.push_str(separator);
        }
        pair(sql, column, value);
    }
}

fn format_insert(schema: &str, table: &str, columns: &[&str], values: &[String]) -> String {
    let mut sql = String::new();
    let _ = write!(
        sql,
        "INSERT INTO {schema}.{table}({}) VALUES ({});",
        columns.join(", "),
        values.join(", ")
    );
    sql
}

fn format_delete(schema: &str, table: &str, columns: &[&str], values: &[String]) -> String {
    let mut sql = String::new();
    let _ = write!(sql, "DELETE FROM {schema}.{table} WHERE ");
    write_pairs(&mut sql, columns, values, " AND ", predicate);
    sql.push(';');
    sql
}

fn format_update(
    schema: &str,
    table: &str,
    columns: &[&str],
    old: &[String],
    new: &[String],
) -> String {
    let mut sql = String::new();
    let _ = write!(sql, "UPDATE {schema}.{table} SET ");
    write_pairs(&mut sql, columns, new, ", ", assignment);
    sql.push_str(" WHERE ");
    write_pairs(&mut sql, columns, old, " AND ", predicate);
    sql.push(';');
    sql
}

/// Format a directed operation as one SQL statement.
#[must_use]
pub fn format_operation(schema: &str, table: &str, columns: &[&str], operation: &Operation) -> String {
    match operation {
        Operation::Insert(values) => format_insert(schema, table, columns, values),
        Operation::Delete(values) => format_delete(schema, table, columns, values),
        Operation::Update { old, new } => format_update(schema, table, columns, old, new),
    }
}

/// Column names with their rendered literal images, in event order.
#[derive(Debug, Clone, Copy)]
pub struct StatementColumn<'a> {
    /// Column name.
    pub name: &'a str,
    /// Literal text of the post-image.
    pub current: &'a str,
    /// Literal text of the pre-image, for updates.
    pub previous: Option<&'a str>,
}

/// Build the statement for one event in the given direction.
///
/// | kind   | forward                       | reverse                       |
/// |--------|-------------------------------|-------------------------------|
/// | insert | INSERT of the post-image      | DELETE matching the post-image|
/// | delete | DELETE matching the row image | INSERT of the row image       |
/// | update | SET post-image WHERE pre-image| SET pre-image WHERE post-image|
///
/// Update columns missing a pre-image are matched on NULL; the event renderer
/// rejects such events before they get here.
///
/// # Example
///
/// ```rust
/// use binlog_flashback::{EventKind, RenderDirection, render::{StatementColumn, build_statement}};
///
/// let columns = [
///     StatementColumn { name: "a", current: "1", previous: Some("1") },
///     StatementColumn { name: "c", current: "'abc'", previous: Some("'test'") },
/// ];
/// assert_eq!(
///     build_statement("test", "t1", &columns, EventKind::Update, RenderDirection::Reverse),
///     "UPDATE test.t1 SET a = 1, c = 'test' WHERE a = 1 AND c = 'abc';"
/// );
/// ```
#[must_use]
pub fn build_statement(
    schema: &str,
    table: &str,
    columns: &[StatementColumn<'_>],
    kind: EventKind,
    direction: RenderDirection,
) -> String {
    let names: Vec<&str> = columns.iter().map(|c| c.name).collect();
    let current = columns.iter().map(|c| c.current.to_owned()).collect();
    let previous = match kind {
        EventKind::Update => columns
            .iter()
            .map(|c| c.previous.unwrap_or(NULL_LITERAL).to_owned())
            .collect(),
        EventKind::Insert | EventKind::Delete => Vec::new(),
    };
    let operation = Operation::forward(kind, current, previous).directed(direction);
    format_operation(schema, table, &names, &operation)
}
