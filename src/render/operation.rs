//! Enumeration of the statements (insert, delete, update) a row change can
//! render to, defined so that reversing a change is a pure value swap.

use super::RenderDirection;
use crate::record::EventKind;

/// Trait for reversing operations.
pub trait Reverse {
    /// The reverse of this operation.
    type Output;

    /// Returns the reverse of this operation.
    fn reverse(self) -> Self::Output;
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The statement to emit for one row change, holding literal texts in column order.
pub enum Operation {
    /// Insert a row with these values.
    Insert(Vec<String>),
    /// Delete the row matching these values.
    Delete(Vec<String>),
    /// Move a row from the `old` image to the `new` image.
    Update {
        /// Values the row is matched on.
        old: Vec<String>,
        /// Values the row is set to.
        new: Vec<String>,
    },
}

impl Operation {
    /// Builds the forward operation for an event from its literal images.
    ///
    /// `previous` is only consulted for updates.
    #[must_use]
    pub fn forward(kind: EventKind, current: Vec<String>, previous: Vec<String>) -> Self {
        match kind {
            EventKind::Insert => Operation::Insert(current),
            EventKind::Delete => Operation::Delete(current),
            EventKind::Update => Operation::Update {
                old: previous,
                new: current,
            },
        }
    }

    /// Orients the operation for the given render direction.
    #[must_use]
    pub fn directed(self, direction: RenderDirection) -> Self {
        match direction {
            RenderDirection::Forward => self,
            RenderDirection::Reverse => self.reverse(),
        }
    }
}

impl Reverse for Operation {
    type Output = Operation;

    fn reverse(self) -> Self::Output {
        match self {
            Operation::Insert(values) => Operation::Delete(values),
            Operation::Delete(values) => Operation::Insert(values),
            Operation::Update { old, new } => Operation::Update { old: new, new: old },
        }
    }
}

impl Reverse for RenderDirection {
    type Output = RenderDirection;

    fn reverse(self) -> Self::Output {
        match self {
            RenderDirection::Forward => RenderDirection::Reverse,
            RenderDirection::Reverse => RenderDirection::Forward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_reverse_insert_is_delete() {
        let insert = Operation::forward(EventKind::Insert, values(&["1"]), Vec::new());
        assert_eq!(insert.reverse(), Operation::Delete(values(&["1"])));
    }

    #[test]
    fn test_reverse_delete_is_insert() {
        let delete = Operation::forward(EventKind::Delete, values(&["1"]), Vec::new());
        assert_eq!(delete.reverse(), Operation::Insert(values(&["1"])));
    }

    #[test]
    fn test_reverse_update_swaps_images() {
        let update = Operation::forward(EventKind::Update, values(&["'abc'"]), values(&["'test'"]));
        assert_eq!(
            update,
            Operation::Update {
                old: values(&["'test'"]),
                new: values(&["'abc'"]),
            }
        );
        assert_eq!(
            update.directed(RenderDirection::Reverse),
            Operation::Update {
                old: values(&["'abc'"]),
                new: values(&["'test'"]),
            }
        );
    }

    #[test]
    fn test_double_reverse_is_identity() {
        let update = Operation::Update {
            old: values(&["1"]),
            new: values(&["2"]),
        };
        assert_eq!(update.clone().reverse().reverse(), update);
        assert_eq!(
            RenderDirection::Forward.reverse().reverse(),
            RenderDirection::Forward
        );
    }
}
