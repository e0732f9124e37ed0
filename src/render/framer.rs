//! Begin/commit markers around the statements of one transaction.

use super::RenderDirection;

/// The bracket markers of one transaction.
///
/// The marker text is the same in both directions. A flashback script walks
/// the transaction backwards, so its bracket is emitted commit-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFrame {
    start: String,
    commit: String,
}

impl TransactionFrame {
    /// Creates the markers for a transaction.
    #[must_use]
    pub fn new(commit_sequence: i64) -> Self {
        Self {
            start: format!("Start Transaction; # {commit_sequence}"),
            commit: format!("Commit; # {commit_sequence}"),
        }
    }

    /// Returns the `Start Transaction; # <seq>` marker.
    #[must_use]
    pub fn start_marker(&self) -> &str {
        &self.start
    }

    /// Returns the `Commit; # <seq>` marker.
    #[must_use]
    pub fn commit_marker(&self) -> &str {
        &self.commit
    }

    /// Returns the markers in emission order: the one written before the
    /// group's statements, then the one written after.
    #[must_use]
    pub fn bracket(&self, direction: RenderDirection) -> (&str, &str) {
        match direction {
            RenderDirection::Forward => (&self.start, &self.commit),
            RenderDirection::Reverse => (&self.commit, &self.start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_text() {
        let frame = TransactionFrame::new(42);
        assert_eq!(frame.start_marker(), "Start Transaction; # 42");
        assert_eq!(frame.commit_marker(), "Commit; # 42");
    }

    #[test]
    fn test_forward_bracket_opens_with_start() {
        let frame = TransactionFrame::new(0);
        assert_eq!(
            frame.bracket(RenderDirection::Forward),
            ("Start Transaction; # 0", "Commit; # 0")
        );
    }

    #[test]
    fn test_reverse_bracket_opens_with_commit() {
        let frame = TransactionFrame::new(0);
        assert_eq!(
            frame.bracket(RenderDirection::Reverse),
            ("Commit; # 0", "Start Transaction; # 0")
        );
    }

    #[test]
    fn test_negative_sequence() {
        assert_eq!(TransactionFrame::new(-1).commit_marker(), "Commit; # -1");
    }
}
