//! Governance view-model primitives for DAML/Canton-style ledgers.
//!
//! Everything in this crate is a pure, synchronous transformation over
//! already-fetched `serde_json::Value` inputs. Upstream data sources are
//! heterogeneous and not contractually guaranteed to match any one JSON
//! shape, so malformed input is always recovered locally with safe
//! defaults -- nothing in this crate returns an error.
//!
//! The pipeline, leaves first:
//! - [`field`] -- shape-tolerant field access (flat vs. payload-nested,
//!   camelCase vs. snake_case)
//! - [`action`] -- tagged-union action envelope normalization
//! - [`votes`] -- vote collection parsing and tallying
//! - [`status`] -- threshold resolution and lifecycle classification
//! - [`views`] -- the derived view-model types consumed by callers

pub mod action;
pub mod field;
pub mod status;
pub mod views;
pub mod votes;

pub use action::{normalize_action, NormalizedAction};
pub use field::{resolve_field, resolve_str, resolve_u64};
pub use status::{classify_proposal, parse_timestamp, resolve_threshold, ProposalStatus};
pub use views::{GovernanceSummary, HistoricalAction, HistoricalStatus, ProposalView};
pub use votes::{tally_votes, VoteDecision, VoteEntry, VoteTally};
