//! Derived view-model types consumed by rendering code.
//!
//! All types here are immutable once built: a data refresh constructs a
//! fresh set from the current raw records, it never mutates in place.

use crate::status::ProposalStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized governance proposal derived from a live vote-request
/// contract plus its current tally and the wall clock at resolution time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalView {
    pub id: String,
    pub contract_id: String,
    pub tracking_id: Option<String>,
    pub title: String,
    pub action_type: String,
    pub action_details: Option<serde_json::Value>,
    pub reason_body: Option<String>,
    pub reason_url: Option<String>,
    pub requester: String,
    pub status: ProposalStatus,
    pub votes_for: u32,
    pub votes_against: u32,
    pub voted_parties: Vec<String>,
    pub vote_before: Option<String>,
    pub target_effective_at: Option<String>,
}

/// Status taxonomy for backfilled governance history.
///
/// Deliberately disjoint from [`ProposalStatus`]: historical status comes
/// from the event's own lifecycle markers, never from a live deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoricalStatus {
    Executed,
    Rejected,
    Expired,
    InProgress,
}

impl fmt::Display for HistoricalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HistoricalStatus::Executed => "executed",
            HistoricalStatus::Rejected => "rejected",
            HistoricalStatus::Expired => "expired",
            HistoricalStatus::InProgress => "in_progress",
        };
        write!(f, "{}", s)
    }
}

/// A governance action reconstructed from a backfilled ledger event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalAction {
    pub id: String,
    pub contract_id: String,
    pub template_type: String,
    pub title: String,
    pub requester: String,
    pub status: HistoricalStatus,
    pub votes_for: u32,
    pub votes_against: u32,
    pub voted_parties: Vec<String>,
    pub effective_at: Option<String>,
    pub reason_body: Option<String>,
    pub reason_url: Option<String>,
}

/// Aggregate counts over a set of historical actions.
///
/// The four status counters sum to `total_requests` for whatever scope the
/// summary covers (a page or the full set).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceSummary {
    pub total_requests: u64,
    pub in_progress: u64,
    pub executed: u64,
    pub rejected: u64,
    pub expired: u64,
}
