//! Threshold resolution and proposal lifecycle classification.
//!
//! Status is not a persistent state machine: it is recomputed from the
//! current tally, threshold, and wall clock on every refresh.

use serde::{Deserialize, Serialize};
use std::fmt;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Lifecycle status of a live governance proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Approved => "approved",
            ProposalStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

/// Resolve the effective voting threshold.
///
/// First available wins: the externally configured threshold, else
/// `ceil(0.67 * validator_count)`, else `1`. A resolved value of zero or
/// below is floored to `1` to avoid vacuous approval.
pub fn resolve_threshold(explicit: Option<i64>, validator_count: Option<usize>) -> u32 {
    let threshold = match (explicit, validator_count) {
        (Some(t), _) => t,
        (None, Some(n)) => (0.67 * n as f64).ceil() as i64,
        (None, None) => 1,
    };
    threshold.max(1) as u32
}

/// Classify a proposal's lifecycle status.
///
/// Approval is checked first and is final regardless of deadline: a tally
/// at or above threshold locks in even before the nominal `vote_before`.
/// Otherwise the proposal is rejected once a parseable deadline lies
/// strictly before `now`, and pending in every other case. A deadline that
/// fails to parse is treated as absent and never triggers rejection.
pub fn classify_proposal(
    votes_for: u32,
    threshold: u32,
    vote_before: Option<&str>,
    now: OffsetDateTime,
) -> ProposalStatus {
    if votes_for >= threshold {
        return ProposalStatus::Approved;
    }
    match vote_before.and_then(parse_timestamp) {
        Some(deadline) if deadline < now => ProposalStatus::Rejected,
        _ => ProposalStatus::Pending,
    }
}

/// Parse an RFC 3339 ledger timestamp.
pub fn parse_timestamp(s: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(s, &Rfc3339).ok()
}
