//! Vote collection normalization and tallying.
//!
//! Source votes arrive either as an array of `[voterName, voteObject]`
//! 2-tuples or as an object map of `voterName -> voteObject`. Both shapes
//! are normalized to one ordered pair list at this boundary; nothing
//! downstream branches on shape again.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single validator's decision on a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteDecision {
    Accept,
    Reject,
    Abstain,
}

/// One normalized vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteEntry {
    pub party: String,
    pub decision: VoteDecision,
    pub reason_body: Option<String>,
    pub reason_url: Option<String>,
    pub cast_at: Option<String>,
}

/// Aggregate tally over a votes collection.
///
/// Abstentions appear in `entries` but are excluded from both counters,
/// so `votes_for + votes_against <= entries.len()` always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteTally {
    pub votes_for: u32,
    pub votes_against: u32,
    pub entries: Vec<VoteEntry>,
}

/// Parse and tally a votes collection in either supported shape.
///
/// Tuple-arrays and object maps with identical content produce identical
/// tallies. Malformed array entries missing a voter name fall back to the
/// vote object's own `sv` field, then to `"Unknown"`. An empty or missing
/// collection yields the zero tally -- this function never fails.
pub fn tally_votes(votes: Option<&Value>) -> VoteTally {
    let mut tally = VoteTally::default();

    for (party, vote) in vote_pairs(votes) {
        let decision = classify_vote(vote);
        match decision {
            VoteDecision::Accept => tally.votes_for += 1,
            VoteDecision::Reject => tally.votes_against += 1,
            VoteDecision::Abstain => {}
        }

        let (reason_body, reason_url) = vote_reason(vote);
        tally.entries.push(VoteEntry {
            party,
            decision,
            reason_body,
            reason_url,
            cast_at: vote
                .get("optCastAt")
                .and_then(Value::as_str)
                .map(str::to_string),
        });
    }

    tally
}

/// Normalize either votes shape into an ordered `(name, vote)` pair list.
fn vote_pairs(votes: Option<&Value>) -> Vec<(String, &Value)> {
    match votes {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item.as_array() {
                Some(pair) if pair.len() == 2 => {
                    let name = pair[0]
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| voter_fallback(&pair[1]));
                    (name, &pair[1])
                }
                _ => (voter_fallback(item), item),
            })
            .collect(),
        Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        _ => Vec::new(),
    }
}

fn voter_fallback(vote: &Value) -> String {
    vote.get("sv")
        .and_then(Value::as_str)
        .unwrap_or("Unknown")
        .to_string()
}

/// Classify one vote object, first match wins.
fn classify_vote(vote: &Value) -> VoteDecision {
    let flag = |name: &str| vote.get(name).and_then(Value::as_bool);

    if flag("accept") == Some(true) || flag("Accept") == Some(true) {
        VoteDecision::Accept
    } else if flag("accept") == Some(false)
        || flag("reject") == Some(true)
        || flag("Reject") == Some(true)
    {
        VoteDecision::Reject
    } else {
        VoteDecision::Abstain
    }
}

/// Extract `(body, url)` from a vote's reason field.
///
/// A reason object carries `body`/`url`; a bare string is the body.
fn vote_reason(vote: &Value) -> (Option<String>, Option<String>) {
    match vote.get("reason") {
        Some(Value::Object(obj)) => (
            obj.get("body").and_then(Value::as_str).map(str::to_string),
            obj.get("url").and_then(Value::as_str).map(str::to_string),
        ),
        Some(Value::String(s)) => (Some(s.clone()), None),
        _ => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tuple_array_and_object_map_tally_identically() {
        let as_tuples = json!([
            ["SV1", { "accept": true }],
            ["SV2", { "reject": true }],
            ["SV3", {}]
        ]);
        let as_map = json!({
            "SV1": { "accept": true },
            "SV2": { "reject": true },
            "SV3": {}
        });

        let a = tally_votes(Some(&as_tuples));
        let b = tally_votes(Some(&as_map));
        assert_eq!(a.votes_for, 1);
        assert_eq!(a.votes_against, 1);
        assert_eq!(a.votes_for, b.votes_for);
        assert_eq!(a.votes_against, b.votes_against);
        assert_eq!(a.entries.len(), b.entries.len());
    }

    #[test]
    fn abstain_excluded_from_both_counters() {
        let votes = json!([["SV1", { "accept": true }], ["SV2", {}], ["SV3", {}]]);
        let tally = tally_votes(Some(&votes));
        assert_eq!(tally.votes_for, 1);
        assert_eq!(tally.votes_against, 0);
        assert_eq!(tally.entries.len(), 3);
        assert!(tally.votes_for + tally.votes_against <= tally.entries.len() as u32);
        assert_eq!(tally.entries[1].decision, VoteDecision::Abstain);
    }

    #[test]
    fn accept_false_counts_as_reject() {
        let votes = json!({ "SV1": { "accept": false } });
        let tally = tally_votes(Some(&votes));
        assert_eq!(tally.votes_against, 1);
    }

    #[test]
    fn capitalized_decision_flags() {
        let votes = json!({ "SV1": { "Accept": true }, "SV2": { "Reject": true } });
        let tally = tally_votes(Some(&votes));
        assert_eq!(tally.votes_for, 1);
        assert_eq!(tally.votes_against, 1);
    }

    #[test]
    fn missing_name_falls_back_to_sv_then_unknown() {
        let votes = json!([
            [null, { "sv": "sv-from-vote", "accept": true }],
            [null, { "accept": true }]
        ]);
        let tally = tally_votes(Some(&votes));
        assert_eq!(tally.entries[0].party, "sv-from-vote");
        assert_eq!(tally.entries[1].party, "Unknown");
    }

    #[test]
    fn reason_object_and_reason_string() {
        let votes = json!({
            "SV1": { "accept": true, "reason": { "body": "looks good", "url": "https://x" } },
            "SV2": { "accept": true, "reason": "plain text" }
        });
        let tally = tally_votes(Some(&votes));
        let by_party = |p: &str| tally.entries.iter().find(|e| e.party == p).unwrap();
        assert_eq!(by_party("SV1").reason_body.as_deref(), Some("looks good"));
        assert_eq!(by_party("SV1").reason_url.as_deref(), Some("https://x"));
        assert_eq!(by_party("SV2").reason_body.as_deref(), Some("plain text"));
        assert_eq!(by_party("SV2").reason_url, None);
    }

    #[test]
    fn cast_at_from_opt_cast_at() {
        let votes = json!({ "SV1": { "accept": true, "optCastAt": "2024-07-01T10:00:00Z" } });
        let tally = tally_votes(Some(&votes));
        assert_eq!(
            tally.entries[0].cast_at.as_deref(),
            Some("2024-07-01T10:00:00Z")
        );
    }

    #[test]
    fn empty_or_missing_collection_yields_zero_tally() {
        let empty_array = json!([]);
        let empty_map = json!({});
        let not_a_collection = json!("bad");
        for votes in [None, Some(&empty_array), Some(&empty_map), Some(&not_a_collection)] {
            let tally = tally_votes(votes);
            assert_eq!(tally.votes_for, 0);
            assert_eq!(tally.votes_against, 0);
            assert!(tally.entries.is_empty());
        }
    }
}
