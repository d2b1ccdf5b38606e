//! Governance resolution -- raw ledger records in, view models out.
//!
//! This crate orchestrates the pure primitives from `govlens-core` over
//! the data-source traits from `govlens-source`:
//!
//! - [`proposal`] assembles [`govlens_core::ProposalView`]s from raw
//!   vote-request records and derives the voting threshold from DSO rules.
//! - [`merge`] applies the local-first / live-fallback source precedence.
//! - [`history`] reconstructs paginated governance history from backfill
//!   events with its own status taxonomy and aggregate summary.
//!
//! Resolution is idempotent and rebuilt in full on every refresh; there is
//! no incremental update model. Observability (record counts, fallback
//! warnings) is emitted here via `tracing`, keeping the core primitives
//! free of logging.

pub mod history;
pub mod merge;
pub mod proposal;

pub use history::{
    fetch_history, page_events, resolve_history, resolve_historical_action, summarize, HistoryView,
};
pub use merge::{fetch_proposals, ProposalSet};
pub use proposal::{resolve_proposal, resolve_proposals, threshold_from_rules};
