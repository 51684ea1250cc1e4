use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Lifecycle counters for one world
#[derive(Clone, Default)]
pub struct WorldMetrics {
    joins: Arc<AtomicU64>,
    leaves: Arc<AtomicU64>,
    moves_applied: Arc<AtomicU64>,

    /// Position updates for identities that were not present
    moves_dropped: Arc<AtomicU64>,
}

/// Point-in-time copy of [`WorldMetrics`]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub joins: u64,
    pub leaves: u64,
    #[serde(rename = "movesApplied")]
    pub moves_applied: u64,
    #[serde(rename = "movesDropped")]
    pub moves_dropped: u64,
}

impl WorldMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_join(&self) {
        self.joins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_leave(&self) {
        self.leaves.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_move(&self) {
        self.moves_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped_move(&self) {
        self.moves_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            joins: self.joins.load(Ordering::Relaxed),
            leaves: self.leaves.load(Ordering::Relaxed),
            moves_applied: self.moves_applied.load(Ordering::Relaxed),
            moves_dropped: self.moves_dropped.load(Ordering::Relaxed),
        }
    }
}
