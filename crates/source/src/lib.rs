//! Source traits, raw record types, and error types for governance data
//! backends (local materialized stores, live scan APIs, backfill queries).

pub mod error;
pub mod record;
pub mod traits;

pub use error::SourceError;
pub use record::{HistoryQuery, RawHistoryPage};
pub use traits::{HistorySource, ProposalSource};
