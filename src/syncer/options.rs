//! Configuration of a syncer.

use std::path::PathBuf;

/// What a syncer does when one row-change event fails to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum EventErrorPolicy {
    /// Report the failure, write an empty line in place of the statement and
    /// carry on with the next event.
    #[default]
    Continue,
    /// Stop the stream with [`SyncError::Event`](crate::SyncError::Event).
    Abort,
}

/// Where rendered text goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SinkTarget {
    /// Standard output.
    #[default]
    Stdout,
    /// A file, created if missing and appended to.
    File(PathBuf),
}

/// Options for [`SqlSyncer::open`](crate::SqlSyncer::open).
///
/// # Example
///
/// ```rust
/// use binlog_flashback::{EventErrorPolicy, SinkTarget, SyncerOptions};
///
/// let options = SyncerOptions::default()
///     .sink(SinkTarget::File("flashback.sql".into()))
///     .event_errors(EventErrorPolicy::Abort);
/// assert_eq!(options.event_error_policy(), EventErrorPolicy::Abort);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SyncerOptions {
    sink: SinkTarget,
    event_errors: EventErrorPolicy,
}

impl SyncerOptions {
    /// Sets the output target.
    #[must_use]
    pub fn sink(mut self, sink: SinkTarget) -> Self {
        self.sink = sink;
        self
    }

    /// Sets the per-event error policy.
    #[must_use]
    pub fn event_errors(mut self, policy: EventErrorPolicy) -> Self {
        self.event_errors = policy;
        self
    }

    /// Returns the output target.
    #[must_use]
    pub fn sink_target(&self) -> &SinkTarget {
        &self.sink
    }

    /// Returns the per-event error policy.
    #[must_use]
    pub fn event_error_policy(&self) -> EventErrorPolicy {
        self.event_errors
    }
}
