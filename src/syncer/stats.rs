//! Counters kept by a syncer over its lifetime.

/// What a syncer has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncStats {
    /// Records fully processed, completion callback included.
    pub records: u64,
    /// Schema changes written verbatim.
    pub schema_changes_written: u64,
    /// Schema changes skipped because they cannot be inverted.
    pub schema_changes_skipped: u64,
    /// Row-change events rendered into statements.
    pub events_rendered: u64,
    /// Row-change events abandoned under the continue policy.
    pub events_skipped: u64,
}
