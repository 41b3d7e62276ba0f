//! Error type shared by the clicker crates.

/// Result alias for clicker operations.
pub type Result<T> = std::result::Result<T, ClickerError>;

/// Errors that can occur while driving a play session.
///
/// None of these are user-facing: they signal broken invariants or a
/// session that has already been torn down.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClickerError {
    /// A task id outside the static catalog
    #[error("Unknown task id: {0}")]
    UnknownTask(String),

    /// Applying a score delta would overflow the counter
    #[error("Score overflow: {score} + {delta}")]
    ScoreOverflow {
        /// Score before the delta
        score: u32,
        /// Delta that could not be applied
        delta: u32,
    },

    /// A proposed state would regress score or completions
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// The session's state owner is gone
    #[error("Session closed")]
    SessionClosed,
}
