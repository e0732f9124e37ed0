//! Per-record dispatch of a transaction-log stream to an output sink.
//!
//! A syncer receives [`Record`]s in commit order and writes their SQL text:
//! schema changes verbatim (forward only), and row-change groups as one
//! statement per event bracketed by transaction markers. Both variants are
//! the same [`SqlSyncer`] parameterised by a zero-sized [`Mode`] marker.
//!
//! ```rust
//! use binlog_flashback::{
//!     ColumnRecord, ColumnType, FlashbackSyncer, Record, RowChangeEvent, Syncer,
//!     encoding::Datum,
//! };
//!
//! let mut syncer = FlashbackSyncer::new(Vec::<u8>::new());
//! let record = Record::row_changes(
//!     3,
//!     [RowChangeEvent::insert("test", "t1")
//!         .column(ColumnRecord::new("a", ColumnType::Long, Datum::Int(1).encode()))],
//! );
//!
//! let mut completed = Vec::new();
//! syncer.sync(&record, &mut |r| completed.push(r.commit_sequence())).unwrap();
//!
//! assert_eq!(completed, [3]);
//! assert_eq!(
//!     String::from_utf8(syncer.into_inner().unwrap()).unwrap(),
//!     "Commit; # 3\nDELETE FROM test.t1 WHERE a = 1;\nStart Transaction; # 3\n"
//! );
//! ```

use core::marker::PhantomData;
use std::io::Write;

use crate::encoding::{ColumnValueDecoder, DatumDecoder};
use crate::errors::SyncError;
use crate::record::{Record, RecordKind, RowChangeEvent};
use crate::render::{EventOutcome, EventRenderer, RenderDirection, TransactionFrame};

pub mod options;
pub mod sink;
pub mod stats;

pub use options::{EventErrorPolicy, SinkTarget, SyncerOptions};
pub use sink::OutputSink;
pub use stats::SyncStats;

/// The processing contract offered to the record-stream driver.
pub trait Syncer {
    /// Writes the text of one record and then calls `on_complete` with it.
    ///
    /// The callback runs only after the record's text has been written and
    /// flushed to the sink, so it can be used for checkpointing.
    ///
    /// # Errors
    ///
    /// * `Closed` - If the syncer was already closed.
    /// * `UnknownRecordKind` - If the record is neither a schema change nor a row-change group.
    /// * `Event` - If an event fails to render under [`EventErrorPolicy::Abort`].
    /// * `Io` - If writing to or flushing the sink fails.
    fn sync(&mut self, record: &Record, on_complete: &mut dyn FnMut(&Record)) -> Result<(), SyncError>;

    /// Flushes and releases the output sink. Closing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the final flush fails.
    fn close(&mut self) -> Result<(), SyncError>;
}

/// Trait defining the differences between the forward and flashback variants.
pub trait Mode: Default + Clone + Copy + PartialEq + Eq + 'static {
    /// Direction in which row changes are rendered.
    const DIRECTION: RenderDirection;
    /// Whether schema changes are written verbatim or skipped.
    const WRITES_SCHEMA_CHANGES: bool;
}

/// Forward replay marker.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Forward;

impl Mode for Forward {
    const DIRECTION: RenderDirection = RenderDirection::Forward;
    const WRITES_SCHEMA_CHANGES: bool = true;
}

/// Flashback marker. Schema changes cannot be inverted and are skipped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flashback;

impl Mode for Flashback {
    const DIRECTION: RenderDirection = RenderDirection::Reverse;
    const WRITES_SCHEMA_CHANGES: bool = false;
}

/// A syncer writing SQL text into `W`, decoding column values with `D`.
#[derive(Debug)]
pub struct SqlSyncer<M: Mode, W: Write = OutputSink, D = DatumDecoder> {
    sink: Option<W>,
    renderer: EventRenderer<D>,
    stats: SyncStats,
    _mode: PhantomData<M>,
}

/// Syncer replaying changes as they happened.
pub type ForwardSyncer<W = OutputSink, D = DatumDecoder> = SqlSyncer<Forward, W, D>;

/// Syncer writing the statements that undo changes.
pub type FlashbackSyncer<W = OutputSink, D = DatumDecoder> = SqlSyncer<Flashback, W, D>;

impl<M: Mode, W: Write> SqlSyncer<M, W> {
    /// Creates a syncer that exclusively owns `sink`.
    #[must_use]
    pub fn new(sink: W) -> Self {
        Self::with_decoder(sink, DatumDecoder)
    }
}

impl<M: Mode, W: Write, D: ColumnValueDecoder> SqlSyncer<M, W, D> {
    /// Creates a syncer that exclusively owns `sink` and decodes column
    /// values with `decoder`.
    #[must_use]
    pub fn with_decoder(sink: W, decoder: D) -> Self {
        Self {
            sink: Some(sink),
            renderer: EventRenderer::with_decoder(M::DIRECTION, decoder),
            stats: SyncStats::default(),
            _mode: PhantomData,
        }
    }

    /// Sets what happens when one event fails to render.
    #[must_use]
    pub fn with_event_error_policy(mut self, policy: EventErrorPolicy) -> Self {
        self.renderer = self.renderer.with_policy(policy);
        self
    }

    /// Returns the render direction of this syncer.
    #[must_use]
    pub fn direction(&self) -> RenderDirection {
        M::DIRECTION
    }

    /// Returns the counters collected so far.
    #[must_use]
    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    /// Returns the sink, unless the syncer was closed.
    #[must_use]
    pub fn get_ref(&self) -> Option<&W> {
        self.sink.as_ref()
    }

    /// Consumes the syncer and returns the sink, unless it was closed.
    #[must_use]
    pub fn into_inner(mut self) -> Option<W> {
        self.sink.take()
    }
}

impl<M: Mode> SqlSyncer<M, OutputSink> {
    /// Opens the sink named by `options` and creates a syncer over it.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the output file cannot be opened.
    pub fn open(options: &SyncerOptions) -> Result<Self, SyncError> {
        let sink = OutputSink::open(options.sink_target())?;
        Ok(Self::new(sink).with_event_error_policy(options.event_error_policy()))
    }
}

/// Renders a whole row-change group into `out`, bracket markers included.
///
/// Returns the number of rendered and skipped events.
fn render_group<D: ColumnValueDecoder>(
    renderer: &EventRenderer<D>,
    commit_sequence: i64,
    events: &[RowChangeEvent],
    out: &mut String,
) -> Result<(u64, u64), SyncError> {
    let frame = TransactionFrame::new(commit_sequence);
    let (open, close) = frame.bracket(renderer.direction());
    let (mut rendered, mut skipped) = (0, 0);

    out.push_str(open);
    out.push('\n');
    for event in events {
        let outcome = renderer
            .render_line(event, out)
            .map_err(|source| SyncError::Event {
                schema: event.schema_name().to_owned(),
                table: event.table_name().to_owned(),
                source,
            })?;
        match outcome {
            EventOutcome::Rendered => rendered += 1,
            EventOutcome::Skipped(_) => skipped += 1,
        }
    }
    out.push_str(close);
    out.push('\n');

    Ok((rendered, skipped))
}

impl<M: Mode, W: Write, D: ColumnValueDecoder> Syncer for SqlSyncer<M, W, D> {
    fn sync(&mut self, record: &Record, on_complete: &mut dyn FnMut(&Record)) -> Result<(), SyncError> {
        let sink = self.sink.as_mut().ok_or(SyncError::Closed)?;

        match record.kind() {
            RecordKind::SchemaChange(statement) if M::WRITES_SCHEMA_CHANGES => {
                sink.write_all(statement.as_bytes())?;
                sink.write_all(b"\n")?;
                self.stats.schema_changes_written += 1;
            }
            RecordKind::SchemaChange(statement) => {
                tracing::info!(
                    commit_sequence = record.commit_sequence(),
                    statement = %statement,
                    "skipping schema change, it cannot be reversed"
                );
                self.stats.schema_changes_skipped += 1;
            }
            RecordKind::RowChangeGroup(events) => {
                let mut text = String::new();
                let (rendered, skipped) =
                    render_group(&self.renderer, record.commit_sequence(), events, &mut text)?;
                sink.write_all(text.as_bytes())?;
                self.stats.events_rendered += rendered;
                self.stats.events_skipped += skipped;
                tracing::debug!(
                    commit_sequence = record.commit_sequence(),
                    direction = %M::DIRECTION,
                    events = events.len(),
                    skipped,
                    "rendered row-change group"
                );
            }
            RecordKind::Unknown(code) => return Err(SyncError::UnknownRecordKind(*code)),
        }

        sink.flush()?;
        self.stats.records += 1;
        on_complete(record);
        Ok(())
    }

    fn close(&mut self) -> Result<(), SyncError> {
        if let Some(mut sink) = self.sink.take() {
            sink.flush()?;
            tracing::debug!(records = self.stats.records, "closed output sink");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{Datum, DecodedScalar};
    use crate::errors::{DecodeError, RenderError};
    use crate::record::{ColumnRecord, ColumnType};

    fn output<M: Mode, D: ColumnValueDecoder>(syncer: &SqlSyncer<M, Vec<u8>, D>) -> &str {
        core::str::from_utf8(syncer.get_ref().unwrap()).unwrap()
    }

    fn one_row(commit_sequence: i64) -> Record {
        Record::row_changes(
            commit_sequence,
            [RowChangeEvent::insert("s", "t")
                .column(ColumnRecord::new("id", ColumnType::Long, Datum::Int(1).encode()))],
        )
    }

    fn broken_row() -> RowChangeEvent {
        RowChangeEvent::insert("s", "broken")
            .column(ColumnRecord::new("id", ColumnType::Long, vec![0xee]))
    }

    #[test]
    fn test_forward_writes_schema_change() {
        let mut syncer = ForwardSyncer::new(Vec::<u8>::new());
        syncer
            .sync(&Record::schema_change(1, "create database test"), &mut |_| {})
            .unwrap();
        assert_eq!(output(&syncer), "create database test\n");
        assert_eq!(syncer.stats().schema_changes_written, 1);
    }

    #[test]
    fn test_flashback_skips_schema_change_but_completes() {
        let mut syncer = FlashbackSyncer::new(Vec::<u8>::new());
        let mut completed = 0;
        syncer
            .sync(&Record::schema_change(1, "drop table t"), &mut |_| completed += 1)
            .unwrap();
        assert_eq!(output(&syncer), "");
        assert_eq!(completed, 1);
        assert_eq!(syncer.stats().schema_changes_skipped, 1);
    }

    #[test]
    fn test_empty_group_is_only_markers() {
        let mut syncer = ForwardSyncer::new(Vec::<u8>::new());
        syncer
            .sync(&Record::row_changes(5, []), &mut |_| {})
            .unwrap();
        assert_eq!(output(&syncer), "Start Transaction; # 5\nCommit; # 5\n");
    }

    #[test]
    fn test_unknown_record_kind_stops_the_stream() {
        let mut syncer = ForwardSyncer::new(Vec::<u8>::new());
        let mut completed = false;
        let err = syncer
            .sync(&Record::unknown(1, 99), &mut |_| completed = true)
            .unwrap_err();
        assert!(matches!(err, SyncError::UnknownRecordKind(99)));
        assert!(!completed);
    }

    #[test]
    fn test_continue_policy_leaves_an_empty_line() {
        let mut syncer = ForwardSyncer::new(Vec::<u8>::new());
        let record = Record::row_changes(
            2,
            [
                broken_row(),
                RowChangeEvent::delete("s", "t")
                    .column(ColumnRecord::new("id", ColumnType::Long, Datum::Int(2).encode())),
            ],
        );
        syncer.sync(&record, &mut |_| {}).unwrap();
        assert_eq!(
            output(&syncer),
            "Start Transaction; # 2\n\nDELETE FROM s.t WHERE id = 2;\nCommit; # 2\n"
        );
        let stats = syncer.stats();
        assert_eq!(stats.events_skipped, 1);
        assert_eq!(stats.events_rendered, 1);
    }

    #[test]
    fn test_abort_policy_writes_nothing_for_the_record() {
        let mut syncer =
            FlashbackSyncer::new(Vec::<u8>::new()).with_event_error_policy(EventErrorPolicy::Abort);
        let mut completed = false;
        let err = syncer
            .sync(&Record::row_changes(4, [broken_row()]), &mut |_| completed = true)
            .unwrap_err();

        match err {
            SyncError::Event { schema, table, source } => {
                assert_eq!((schema.as_str(), table.as_str()), ("s", "broken"));
                assert_eq!(
                    source,
                    RenderError::Decode {
                        column: "id".into(),
                        source: DecodeError::UnknownFlag(0xee),
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(output(&syncer), "");
        assert!(!completed);
    }

    #[test]
    fn test_custom_decoder_reaches_the_syncer() {
        let decoder = |_: ColumnType, bytes: &[u8]| -> Result<DecodedScalar, DecodeError> {
            Ok(DecodedScalar::ByteString(bytes.to_vec()))
        };
        let mut syncer = FlashbackSyncer::with_decoder(Vec::<u8>::new(), decoder);
        let record = Record::row_changes(
            7,
            [RowChangeEvent::insert("s", "t")
                .column(ColumnRecord::new("raw", ColumnType::Blob, vec![0xbe, 0xef]))],
        );
        let mut completed = false;
        syncer.sync(&record, &mut |_| completed = true).unwrap();

        assert!(completed);
        assert_eq!(
            output(&syncer),
            "Commit; # 7\nDELETE FROM s.t WHERE raw = 0xbeef;\nStart Transaction; # 7\n"
        );
    }

    #[test]
    fn test_close_is_idempotent_and_final() {
        let mut syncer = ForwardSyncer::new(Vec::<u8>::new());
        syncer.sync(&one_row(1), &mut |_| {}).unwrap();
        syncer.close().unwrap();
        syncer.close().unwrap();
        assert!(syncer.get_ref().is_none());
        assert!(matches!(
            syncer.sync(&one_row(2), &mut |_| {}),
            Err(SyncError::Closed)
        ));
        assert_eq!(syncer.stats().records, 1);
    }

    #[test]
    fn test_polymorphic_use() {
        let mut syncers: Vec<Box<dyn Syncer>> = vec![
            Box::new(ForwardSyncer::new(Vec::<u8>::new())),
            Box::new(FlashbackSyncer::new(Vec::<u8>::new())),
        ];
        let mut seen = Vec::new();
        for syncer in &mut syncers {
            syncer
                .sync(&one_row(9), &mut |r| seen.push(r.commit_sequence()))
                .unwrap();
            syncer.close().unwrap();
        }
        assert_eq!(seen, [9, 9]);
    }
}
