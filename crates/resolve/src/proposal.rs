//! ProposalView assembly from raw vote-request records.
//!
//! Each resolved field carries its own ordered candidate list; the lists
//! encode every shape observed across the data sources (camelCase vs.
//! snake_case), with the field resolver handling flat vs. payload nesting.

use govlens_core::{
    classify_proposal, normalize_action, resolve_field, resolve_str, resolve_threshold,
    resolve_u64, tally_votes, ProposalView,
};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::debug;

const CONTRACT_ID: &[&str] = &["contractId", "contract_id", "cid"];
const TRACKING_ID: &[&str] = &["trackingCid", "tracking_cid"];
const REQUESTER: &[&str] = &["requester", "sv", "proposer"];
const VOTE_BEFORE: &[&str] = &["voteBefore", "vote_before"];
const TARGET_EFFECTIVE_AT: &[&str] = &[
    "targetEffectiveAt",
    "target_effective_at",
    "effectiveAt",
    "effective_at",
];
const THRESHOLD: &[&str] = &[
    "voteRequestThreshold",
    "vote_request_threshold",
    "threshold",
];
const VALIDATORS: &[&str] = &["svs", "members", "validators"];

/// Resolve a single raw vote-request record into a [`ProposalView`].
///
/// Malformed fields degrade to safe defaults; this never fails.
pub fn resolve_proposal(record: &Value, threshold: u32, now: OffsetDateTime) -> ProposalView {
    let action = normalize_action(resolve_field(record, &["action"]));
    let tally = tally_votes(resolve_field(record, &["votes"]));
    let vote_before = resolve_str(record, VOTE_BEFORE);
    let status = classify_proposal(tally.votes_for, threshold, vote_before, now);

    let contract_id = resolve_str(record, CONTRACT_ID).unwrap_or_default().to_string();
    let tracking_id = resolve_str(record, TRACKING_ID).map(str::to_string);
    let (reason_body, reason_url) = resolve_reason(record);

    ProposalView {
        id: tracking_id.clone().unwrap_or_else(|| contract_id.clone()),
        contract_id,
        tracking_id,
        title: action.title,
        action_type: action.action_type,
        action_details: action.details,
        reason_body,
        reason_url,
        requester: resolve_str(record, REQUESTER).unwrap_or("Unknown").to_string(),
        status,
        votes_for: tally.votes_for,
        votes_against: tally.votes_against,
        voted_parties: tally.entries.into_iter().map(|e| e.party).collect(),
        vote_before: vote_before.map(str::to_string),
        target_effective_at: resolve_str(record, TARGET_EFFECTIVE_AT).map(str::to_string),
    }
}

/// Resolve a batch of raw records, preserving source order.
///
/// The threshold is derived once from the DSO rules record and applied to
/// every proposal in the batch.
pub fn resolve_proposals(
    records: &[Value],
    dso_rules: Option<&Value>,
    now: OffsetDateTime,
) -> Vec<ProposalView> {
    let threshold = threshold_from_rules(dso_rules);
    debug!(records = records.len(), threshold, "resolving vote requests");
    records
        .iter()
        .map(|r| resolve_proposal(r, threshold, now))
        .collect()
}

/// Derive the voting threshold from a DSO rules record.
///
/// Precedence: an explicit numeric threshold field, else two-thirds of the
/// validator collection size (rounded up), else the default of 1.
pub fn threshold_from_rules(rules: Option<&Value>) -> u32 {
    let explicit = rules
        .and_then(|r| resolve_u64(r, THRESHOLD))
        .map(|t| t as i64);
    let validator_count = rules
        .and_then(|r| resolve_field(r, VALIDATORS))
        .map(collection_len);
    resolve_threshold(explicit, validator_count)
}

fn collection_len(v: &Value) -> usize {
    match v {
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        _ => 0,
    }
}

/// Extract `(body, url)` from a record-level reason field.
pub(crate) fn resolve_reason(record: &Value) -> (Option<String>, Option<String>) {
    match resolve_field(record, &["reason"]) {
        Some(Value::Object(obj)) => (
            obj.get("body").and_then(Value::as_str).map(str::to_string),
            obj.get("url").and_then(Value::as_str).map(str::to_string),
        ),
        Some(Value::String(s)) => (Some(s.clone()), None),
        _ => (None, None),
    }
}
