//! End-to-end tests for the forward syncer.
//!
//! This module tests:
//! - Schema changes are written verbatim
//! - Row-change groups are bracketed start-first
//! - Each event kind renders to the statement reproducing it

use binlog_flashback::encoding::Datum;
use binlog_flashback::{
    ColumnRecord, ColumnType, EventErrorPolicy, ForwardSyncer, Record, RowChangeEvent, SyncError,
    Syncer,
};

fn int(name: &str, value: i64) -> ColumnRecord {
    ColumnRecord::new(name, ColumnType::Long, Datum::Int(value).encode())
}

fn text(name: &str, value: &str) -> ColumnRecord {
    ColumnRecord::new(name, ColumnType::Varchar, Datum::from(value).encode())
}

fn changed_text(name: &str, previous: &str, current: &str) -> ColumnRecord {
    ColumnRecord::changed(
        name,
        ColumnType::Varchar,
        Datum::from(previous).encode(),
        Datum::from(current).encode(),
    )
}

fn changed_int(name: &str, previous: i64, current: i64) -> ColumnRecord {
    ColumnRecord::changed(
        name,
        ColumnType::Long,
        Datum::Int(previous).encode(),
        Datum::Int(current).encode(),
    )
}

/// Insert, delete and update of the same row in one transaction.
fn dml_record(commit_sequence: i64) -> Record {
    Record::row_changes(
        commit_sequence,
        [
            RowChangeEvent::insert("test", "t1")
                .column(int("a", 1))
                .column(text("b", "test"))
                .column(text("c", "test")),
            RowChangeEvent::delete("test", "t1")
                .column(int("a", 1))
                .column(text("b", "test"))
                .column(text("c", "test")),
            RowChangeEvent::update("test", "t1")
                .column(changed_int("a", 1, 1))
                .column(changed_text("b", "test", "test"))
                .column(changed_text("c", "test", "abc")),
        ],
    )
}

fn run(syncer: &mut ForwardSyncer<Vec<u8>>, records: &[Record]) -> Vec<i64> {
    let mut completed = Vec::new();
    for record in records {
        syncer
            .sync(record, &mut |r| completed.push(r.commit_sequence()))
            .unwrap();
    }
    completed
}

#[test]
fn test_single_insert_scenario() {
    let mut syncer = ForwardSyncer::new(Vec::<u8>::new());
    let record = Record::row_changes(
        0,
        [RowChangeEvent::insert("test", "t1")
            .column(int("a", 1))
            .column(text("b", "test"))
            .column(text("c", "test"))],
    );
    run(&mut syncer, &[record]);

    assert_eq!(
        String::from_utf8(syncer.into_inner().unwrap()).unwrap(),
        "Start Transaction; # 0\n\
         INSERT INTO test.t1(a, b, c) VALUES (1, 'test', 'test');\n\
         Commit; # 0\n"
    );
}

#[test]
fn test_ddl_then_dml() {
    let mut syncer = ForwardSyncer::new(Vec::<u8>::new());
    let completed = run(
        &mut syncer,
        &[Record::schema_change(0, "create database test;"), dml_record(0)],
    );

    assert_eq!(completed, [0, 0]);
    assert_eq!(
        String::from_utf8(syncer.into_inner().unwrap()).unwrap(),
        "create database test;\n\
         Start Transaction; # 0\n\
         INSERT INTO test.t1(a, b, c) VALUES (1, 'test', 'test');\n\
         DELETE FROM test.t1 WHERE a = 1 AND b = 'test' AND c = 'test';\n\
         UPDATE test.t1 SET a = 1, b = 'test', c = 'abc' WHERE a = 1 AND b = 'test' AND c = 'test';\n\
         Commit; # 0\n"
    );
}

#[test]
fn test_groups_are_written_in_stream_order() {
    let mut syncer = ForwardSyncer::new(Vec::<u8>::new());
    let records = [
        Record::row_changes(1, [RowChangeEvent::insert("s", "t").column(int("id", 1))]),
        Record::row_changes(2, [RowChangeEvent::insert("s", "t").column(int("id", 2))]),
    ];
    let completed = run(&mut syncer, &records);

    assert_eq!(completed, [1, 2]);
    assert_eq!(
        String::from_utf8(syncer.into_inner().unwrap()).unwrap(),
        "Start Transaction; # 1\n\
         INSERT INTO s.t(id) VALUES (1);\n\
         Commit; # 1\n\
         Start Transaction; # 2\n\
         INSERT INTO s.t(id) VALUES (2);\n\
         Commit; # 2\n"
    );
}

#[test]
fn test_null_values() {
    let mut syncer = ForwardSyncer::new(Vec::<u8>::new());
    let record = Record::row_changes(
        3,
        [
            RowChangeEvent::insert("s", "t")
                .column(int("id", 1))
                .column(ColumnRecord::new("note", ColumnType::Varchar, Datum::Null.encode())),
            RowChangeEvent::update("s", "t")
                .column(changed_int("id", 1, 1))
                .column(ColumnRecord::changed(
                    "note",
                    ColumnType::Varchar,
                    Datum::Null.encode(),
                    Datum::from("hi").encode(),
                )),
        ],
    );
    run(&mut syncer, &[record]);

    assert_eq!(
        String::from_utf8(syncer.into_inner().unwrap()).unwrap(),
        "Start Transaction; # 3\n\
         INSERT INTO s.t(id, note) VALUES (1, null);\n\
         UPDATE s.t SET id = 1, note = 'hi' WHERE id = 1 AND note IS NULL;\n\
         Commit; # 3\n"
    );
}

#[test]
fn test_bad_event_is_reported_once_and_stream_continues() {
    let mut syncer = ForwardSyncer::new(Vec::<u8>::new());
    let record = Record::row_changes(
        4,
        [
            RowChangeEvent::insert("s", "t").column(int("id", 1)),
            RowChangeEvent::insert("s", "t")
                .column(ColumnRecord::new("shape", ColumnType::Geometry, Datum::from(vec![1u8]).encode())),
            RowChangeEvent::insert("s", "t").column(int("id", 3)),
        ],
    );
    let completed = run(&mut syncer, &[record]);

    assert_eq!(completed, [4]);
    let stats = syncer.stats();
    assert_eq!(stats.events_rendered, 2);
    assert_eq!(stats.events_skipped, 1);
    assert_eq!(
        String::from_utf8(syncer.into_inner().unwrap()).unwrap(),
        "Start Transaction; # 4\n\
         INSERT INTO s.t(id) VALUES (1);\n\
         \n\
         INSERT INTO s.t(id) VALUES (3);\n\
         Commit; # 4\n"
    );
}

#[test]
fn test_abort_policy_stops_the_stream() {
    let mut syncer =
        ForwardSyncer::new(Vec::<u8>::new()).with_event_error_policy(EventErrorPolicy::Abort);
    let record = Record::row_changes(5, [RowChangeEvent::update("s", "t").column(int("id", 1))]);

    let err = syncer.sync(&record, &mut |_| {}).unwrap_err();
    assert!(matches!(err, SyncError::Event { .. }));
    assert!(syncer.get_ref().unwrap().is_empty());
}
