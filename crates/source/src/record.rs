use serde::{Deserialize, Serialize};

/// Offset/limit window for a backfill history query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub limit: usize,
    pub offset: usize,
}

/// One page of backfilled governance events, as returned by the backend.
///
/// `actions` are raw ledger events in arbitrary JSON shape. `summary` is
/// maintained independently by the backend and covers the entire
/// historical set, not just this page; it is shape-tolerant and may be
/// `null` when the backend does not track one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHistoryPage {
    #[serde(default)]
    pub actions: Vec<serde_json::Value>,
    #[serde(alias = "hasMore", default)]
    pub has_more: bool,
    #[serde(default)]
    pub summary: serde_json::Value,
}
