//! Historical governance reconstruction from backfill events.
//!
//! Runs a parallel pipeline to live proposal resolution over a different
//! raw input: backfilled ledger events instead of active contracts. Status
//! comes from each event's own lifecycle markers and uses a disjoint
//! taxonomy (`executed | rejected | expired | in_progress`); it is never
//! recomputed from a deadline.

use crate::proposal::resolve_reason;
use govlens_core::{
    normalize_action, resolve_field, resolve_str, resolve_u64, tally_votes, GovernanceSummary,
    HistoricalAction, HistoricalStatus,
};
use govlens_source::{HistoryQuery, HistorySource, RawHistoryPage, SourceError};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

const EVENT_ID: &[&str] = &["eventId", "event_id", "updateId", "update_id", "id"];
const CONTRACT_ID: &[&str] = &["contractId", "contract_id", "cid"];
const TEMPLATE: &[&str] = &["templateId", "template_id", "templateType", "template_type"];
const REQUESTER: &[&str] = &["requester", "sv", "proposer"];
const STATUS_MARKER: &[&str] = &["status", "outcome", "result"];
const EFFECTIVE_AT: &[&str] = &[
    "effectiveAt",
    "effective_at",
    "targetEffectiveAt",
    "target_effective_at",
    "completedAt",
    "completed_at",
];

/// A resolved page of governance history.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub actions: Vec<HistoricalAction>,
    /// True iff a subsequent page would be non-empty.
    pub has_more: bool,
    /// Covers the entire historical set, not just this page; stable as
    /// the caller pages forward.
    pub summary: GovernanceSummary,
}

/// Resolve one raw backfill event into a [`HistoricalAction`].
///
/// Never fails; malformed fields degrade the same way live proposal
/// resolution does.
pub fn resolve_historical_action(event: &Value) -> HistoricalAction {
    let action = normalize_action(resolve_field(event, &["action"]));
    let tally = tally_votes(resolve_field(event, &["votes"]));
    let (reason_body, reason_url) = resolve_reason(event);

    let contract_id = resolve_str(event, CONTRACT_ID).unwrap_or_default().to_string();

    HistoricalAction {
        id: resolve_str(event, EVENT_ID)
            .map(str::to_string)
            .unwrap_or_else(|| contract_id.clone()),
        contract_id,
        template_type: template_display_name(resolve_str(event, TEMPLATE).unwrap_or("")),
        title: action.title,
        requester: resolve_str(event, REQUESTER).unwrap_or("Unknown").to_string(),
        status: parse_status_marker(resolve_str(event, STATUS_MARKER)),
        votes_for: tally.votes_for,
        votes_against: tally.votes_against,
        voted_parties: tally.entries.into_iter().map(|e| e.party).collect(),
        effective_at: resolve_str(event, EFFECTIVE_AT).map(str::to_string),
        reason_body,
        reason_url,
    }
}

/// Map an event's lifecycle marker onto the historical status taxonomy.
///
/// Several marker spellings are accepted; anything unrecognized (including
/// a missing marker) is an action still in progress.
fn parse_status_marker(marker: Option<&str>) -> HistoricalStatus {
    match marker.map(str::to_ascii_lowercase).as_deref() {
        Some("executed") | Some("accepted") | Some("implemented") => HistoricalStatus::Executed,
        Some("rejected") => HistoricalStatus::Rejected,
        Some("expired") => HistoricalStatus::Expired,
        _ => HistoricalStatus::InProgress,
    }
}

/// Template IDs arrive fully qualified (`Splice.DsoRules:VoteRequest`);
/// only the entity name after the last separator is displayed.
fn template_display_name(template_id: &str) -> String {
    template_id
        .rsplit(':')
        .next()
        .unwrap_or(template_id)
        .to_string()
}

/// Resolve a raw backfill page into a [`HistoryView`].
///
/// The backend-maintained summary is normalized when present; otherwise a
/// summary is derived from this page's actions so the counter-sum
/// invariant always holds.
pub fn resolve_history(raw: &RawHistoryPage) -> HistoryView {
    let actions: Vec<HistoricalAction> = raw
        .actions
        .iter()
        .map(resolve_historical_action)
        .collect();
    let summary = normalize_summary(&raw.summary).unwrap_or_else(|| summarize(&actions));
    HistoryView {
        actions,
        has_more: raw.has_more,
        summary,
    }
}

/// Fetch and resolve one page of governance history.
///
/// Query failures surface as [`SourceError::History`] -- distinctly from
/// an empty page, which is a valid "no activity yet" answer that should
/// prompt a backfill-pipeline diagnostic, not a generic error.
pub async fn fetch_history<S: HistorySource>(
    source: &S,
    query: &HistoryQuery,
) -> Result<HistoryView, SourceError> {
    let raw = source.backfill_page(query).await?;
    debug!(
        count = raw.actions.len(),
        has_more = raw.has_more,
        offset = query.offset,
        "resolved history page"
    );
    Ok(resolve_history(&raw))
}

/// Normalize a backend-maintained summary object.
///
/// Counter names are shape-tolerant; `total_requests` is recomputed as
/// the counter sum so the invariant holds even if the backend's total
/// drifted. Returns `None` when no counter is present at all.
fn normalize_summary(summary: &Value) -> Option<GovernanceSummary> {
    if !summary.is_object() {
        return None;
    }
    let counter = |candidates: &[&str]| resolve_u64(summary, candidates);

    let in_progress = counter(&["inProgress", "in_progress"]);
    let executed = counter(&["executed"]);
    let rejected = counter(&["rejected"]);
    let expired = counter(&["expired"]);

    if [in_progress, executed, rejected, expired]
        .iter()
        .all(Option::is_none)
    {
        return None;
    }

    let in_progress = in_progress.unwrap_or(0);
    let executed = executed.unwrap_or(0);
    let rejected = rejected.unwrap_or(0);
    let expired = expired.unwrap_or(0);
    Some(GovernanceSummary {
        total_requests: in_progress + executed + rejected + expired,
        in_progress,
        executed,
        rejected,
        expired,
    })
}

/// Compute a summary over a set of resolved actions.
pub fn summarize(actions: &[HistoricalAction]) -> GovernanceSummary {
    let mut summary = GovernanceSummary::default();
    for action in actions {
        summary.total_requests += 1;
        match action.status {
            HistoricalStatus::InProgress => summary.in_progress += 1,
            HistoricalStatus::Executed => summary.executed += 1,
            HistoricalStatus::Rejected => summary.rejected += 1,
            HistoricalStatus::Expired => summary.expired += 1,
        }
    }
    summary
}

/// Page an in-memory event set the way a server-side backfill query would:
/// offset/limit slicing, `has_more`, and a summary over the entire set.
///
/// Used by file-backed sources and tests; a real backend pages in the
/// database instead.
pub fn page_events(events: &[Value], query: &HistoryQuery) -> RawHistoryPage {
    let start = events.len().min(query.offset);
    let end = events.len().min(query.offset.saturating_add(query.limit));

    let all: Vec<HistoricalAction> = events.iter().map(resolve_historical_action).collect();
    let summary = serde_json::to_value(summarize(&all)).unwrap_or(Value::Null);

    RawHistoryPage {
        actions: events[start..end].to_vec(),
        has_more: end < events.len(),
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(status: &str) -> Value {
        json!({
            "eventId": format!("ev-{}", status),
            "contractId": "00abc",
            "templateId": "Splice.DsoRules:VoteRequest",
            "requester": "sv-1",
            "status": status,
            "action": { "tag": "SRARC_AddSv", "value": { "name": "sv-9" } },
            "votes": [["sv-1", { "accept": true }]]
        })
    }

    #[test]
    fn maps_lifecycle_markers() {
        assert_eq!(
            resolve_historical_action(&event("executed")).status,
            HistoricalStatus::Executed
        );
        assert_eq!(
            resolve_historical_action(&event("Accepted")).status,
            HistoricalStatus::Executed
        );
        assert_eq!(
            resolve_historical_action(&event("rejected")).status,
            HistoricalStatus::Rejected
        );
        assert_eq!(
            resolve_historical_action(&event("expired")).status,
            HistoricalStatus::Expired
        );
        assert_eq!(
            resolve_historical_action(&event("voting")).status,
            HistoricalStatus::InProgress
        );
        assert_eq!(
            resolve_historical_action(&json!({})).status,
            HistoricalStatus::InProgress
        );
    }

    #[test]
    fn template_name_keeps_entity_segment() {
        let action = resolve_historical_action(&event("executed"));
        assert_eq!(action.template_type, "VoteRequest");
    }

    #[test]
    fn summary_counters_sum_to_total() {
        let actions: Vec<HistoricalAction> = ["executed", "executed", "rejected", "expired", "open"]
            .into_iter()
            .map(|s| resolve_historical_action(&event(s)))
            .collect();
        let summary = summarize(&actions);
        assert_eq!(summary.total_requests, 5);
        assert_eq!(
            summary.in_progress + summary.executed + summary.rejected + summary.expired,
            summary.total_requests
        );
        assert_eq!(summary.executed, 2);
        assert_eq!(summary.in_progress, 1);
    }

    #[test]
    fn backend_summary_normalized_with_recomputed_total() {
        let raw = RawHistoryPage {
            actions: vec![event("executed")],
            has_more: true,
            // Backend total drifted; the counter sum wins.
            summary: json!({ "totalRequests": 99, "inProgress": 2, "executed": 5, "rejected": 1, "expired": 0 }),
        };
        let view = resolve_history(&raw);
        assert_eq!(view.summary.total_requests, 8);
        assert_eq!(view.summary.executed, 5);
        assert!(view.has_more);
    }

    #[test]
    fn missing_summary_derived_from_page() {
        let raw = RawHistoryPage {
            actions: vec![event("executed"), event("rejected")],
            has_more: false,
            summary: Value::Null,
        };
        let view = resolve_history(&raw);
        assert_eq!(view.summary.total_requests, 2);
        assert_eq!(view.summary.executed, 1);
        assert_eq!(view.summary.rejected, 1);
    }

    #[test]
    fn paging_has_more_iff_next_page_nonempty() {
        let events: Vec<Value> = (0..5).map(|_| event("executed")).collect();
        let page = page_events(&events, &HistoryQuery { limit: 2, offset: 2 });
        assert_eq!(page.actions.len(), 2);
        assert!(page.has_more);

        let page = page_events(&events, &HistoryQuery { limit: 2, offset: 4 });
        assert_eq!(page.actions.len(), 1);
        assert!(!page.has_more);

        let page = page_events(&events, &HistoryQuery { limit: 2, offset: 10 });
        assert!(page.actions.is_empty());
        assert!(!page.has_more);
    }
}
