//! Local-first source selection with live fallback.
//!
//! A pure precedence rule, not a merge: one source or the other is
//! selected wholesale per refresh, never combined record-by-record.

use crate::proposal::resolve_proposals;
use govlens_core::ProposalView;
use govlens_source::{ProposalSource, SourceError};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, warn};

/// Resolved proposals plus which source supplied them.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalSet {
    /// Source order preserved; never re-sorted here.
    pub proposals: Vec<ProposalView>,
    /// True when the local store was empty or unavailable and the live
    /// scan API supplied the records instead. Callers surface this as a
    /// warning, not an error.
    pub using_live_fallback: bool,
}

/// Fetch and resolve governance proposals, preferring the local store.
///
/// The live fallback is invoked only after the local result is known, and
/// never when the local store returned at least one record. A failed local
/// store falls through to the live API; if that also fails, the combined
/// failure surfaces as [`SourceError::AllSourcesFailed`] so callers can
/// tell "zero governance activity" apart from "no reachable source".
pub async fn fetch_proposals<S: ProposalSource>(
    source: &S,
    now: OffsetDateTime,
) -> Result<ProposalSet, SourceError> {
    let dso_rules = match source.dso_rules().await {
        Ok(rules) => rules,
        Err(e) => {
            // Threshold degrades to its defaults; proposals still resolve.
            warn!(error = %e, "dso rules unavailable, using default threshold");
            None
        }
    };

    let (records, using_live_fallback) = match source.local_vote_requests().await {
        Ok(records) if !records.is_empty() => {
            debug!(count = records.len(), "using local vote requests");
            (records, false)
        }
        Ok(_) => {
            debug!("local store empty, invoking live fallback");
            let records = source.live_proposals().await?;
            warn!(count = records.len(), "serving proposals from live fallback");
            (records, true)
        }
        Err(local_err) => {
            warn!(error = %local_err, "local store failed, invoking live fallback");
            match source.live_proposals().await {
                Ok(records) => (records, true),
                Err(live_err) => {
                    return Err(SourceError::AllSourcesFailed {
                        local: local_err.to_string(),
                        live: live_err.to_string(),
                    })
                }
            }
        }
    };

    Ok(ProposalSet {
        proposals: resolve_proposals(&records, dso_rules.as_ref(), now),
        using_live_fallback,
    })
}
