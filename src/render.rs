//! Rendering of row-change events into SQL text.
//!
//! The pieces compose bottom-up: [`format_literal`] turns one decoded value
//! into literal text, [`build_statement`] assembles the literals of one event
//! into a statement, [`EventRenderer`] drives decoding and formatting for a
//! whole event, and [`TransactionFrame`] supplies the markers bracketing a
//! row-change group.

use core::fmt;

pub mod event;
pub mod framer;
pub mod literal;
pub mod operation;
pub mod statement;

pub use event::{EventOutcome, EventRenderer};
pub use framer::TransactionFrame;
pub use literal::{escape, format_literal};
pub use operation::{Operation, Reverse};
pub use statement::{StatementColumn, build_statement, format_operation};

/// Which way a change is replayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum RenderDirection {
    /// Reproduce the change.
    #[default]
    Forward,
    /// Undo the change.
    Reverse,
}

impl fmt::Display for RenderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenderDirection::Forward => "forward",
            RenderDirection::Reverse => "reverse",
        })
    }
}
