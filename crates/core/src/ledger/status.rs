//! Transaction status transitions.
//!
//! Statuses are data-driven rows, not a fixed enum. A new transaction always
//! starts in [`INITIAL_STATUS`]; where it may go from there is decided by a
//! [`StatusPolicy`].

/// Name of the status every new transaction starts in.
pub const INITIAL_STATUS: &str = "sent";

/// Rule set for moving a transaction between statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Any status may follow any status, including itself.
    ///
    /// This is a known simplification; a legality graph would be a new variant.
    #[default]
    Unconstrained,
}

impl StatusPolicy {
    /// Returns whether a transaction may move from `from` to `to`.
    #[must_use]
    pub const fn allows(&self, _from: i32, _to: i32) -> bool {
        match self {
            Self::Unconstrained => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconstrained_allows_everything() {
        let policy = StatusPolicy::default();

        assert!(policy.allows(1, 2));
        assert!(policy.allows(2, 1));
        assert!(policy.allows(3, 3));
    }
}
