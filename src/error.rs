//! Errors reported by [`Tree`][crate::ordered::Tree] queries that need at least one stored item.

/// The ways a query on a [`Tree`][crate::ordered::Tree] can fail. Both variants mean the caller
/// asked for something the tree doesn't have; the tree is never modified before one of these is
/// returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The tree has no nodes. `op` names the query that was attempted.
    #[error("tree empty on {op}()")]
    Empty {
        /// The name of the failed query, e.g. `"min"`.
        op: &'static str,
    },
    /// The tree has nodes but none of them matches the requested key.
    #[error("non-existent key on retrieve()")]
    NotFound,
}
