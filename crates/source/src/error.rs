/// All errors that can be returned by a governance data source.
///
/// Empty result sets are never errors: callers must be able to tell
/// "zero governance activity" apart from "couldn't reach any source".
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The local materialized store failed to answer.
    #[error("local source error: {0}")]
    Local(String),

    /// The live scan-API fallback failed to answer.
    #[error("live fallback error: {0}")]
    Live(String),

    /// Both the local store and the live fallback failed.
    #[error("all sources failed (local: {local}; live: {live})")]
    AllSourcesFailed { local: String, live: String },

    /// The DSO rules record could not be fetched.
    #[error("dso rules error: {0}")]
    DsoRules(String),

    /// The paginated backfill query failed. Distinct from an empty page,
    /// which should prompt a backfill-pipeline diagnostic instead.
    #[error("history query error: {0}")]
    History(String),

    /// A backend-specific source error (connection, serialization, etc.).
    #[error("source backend error: {0}")]
    Backend(String),
}
