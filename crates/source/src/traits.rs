use async_trait::async_trait;

use crate::error::SourceError;
use crate::record::{HistoryQuery, RawHistoryPage};

/// Read access to live governance proposal data.
///
/// `local_vote_requests` serves the materialized store; `live_proposals`
/// is the scan-API fallback, consulted only when the local store comes
/// back empty or unavailable (see the merge policy in `govlens-resolve`).
///
/// ## Ordering
///
/// Callers must not invoke `live_proposals` until the local result is
/// known -- no speculative concurrent fallback fetch.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync + 'static` to cross async task
/// boundaries.
#[async_trait]
pub trait ProposalSource: Send + Sync + 'static {
    /// Fetch open vote-request contracts from the local materialized store.
    ///
    /// An empty vector is a valid answer, not an error.
    async fn local_vote_requests(&self) -> Result<Vec<serde_json::Value>, SourceError>;

    /// Fetch governance proposals from the live scan API.
    async fn live_proposals(&self) -> Result<Vec<serde_json::Value>, SourceError>;

    /// Fetch the DSO rules record (validator set, optional voting
    /// threshold). `Ok(None)` means the record is genuinely absent.
    async fn dso_rules(&self) -> Result<Option<serde_json::Value>, SourceError>;
}

/// Read access to backfilled governance history.
#[async_trait]
pub trait HistorySource: Send + Sync + 'static {
    /// Fetch one server-paginated page of backfilled governance events.
    ///
    /// An empty page with `Ok` is a valid "no activity yet" answer;
    /// failures must surface as `Err(SourceError::History)`.
    async fn backfill_page(&self, query: &HistoryQuery) -> Result<RawHistoryPage, SourceError>;
}
