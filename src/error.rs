//! Error taxonomy for the derivation engine.

/// Error type for engine operations.
///
/// Lookup misses are deliberately absent: a table query with no matching
/// entry resolves to a documented default inside the constants provider
/// and never alters control flow.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// A computation was requested before its prerequisite stage ran.
    /// Fatal: aborts the run and sets status to `error`.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Import was given a value that is not a structured record.
    /// Rejected with state left untouched.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
