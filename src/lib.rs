#![doc = include_str!("../README.md")]
#![deny(clippy::mod_module_files)]

pub mod encoding;
pub mod errors;
pub mod record;
pub mod render;
pub mod syncer;

// Re-export main types
pub use record::{ColumnRecord, ColumnType, EventKind, Record, RecordKind, RowChangeEvent};
pub use render::{EventRenderer, RenderDirection, Reverse};
pub use syncer::{
    EventErrorPolicy, FlashbackSyncer, ForwardSyncer, SinkTarget, SqlSyncer, SyncStats, Syncer,
    SyncerOptions,
};

// Re-export errors
pub use errors::{DecodeError, LiteralError, RenderError, SyncError};
