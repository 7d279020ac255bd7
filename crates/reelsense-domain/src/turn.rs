//! Turn counter

use crate::sentiment::SentimentKey;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic per-orchestrator turn counter
///
/// Starts at 0; every call to [`next`](Self::next) atomically increments
/// and returns the new value, so concurrent callers never share a turn.
#[derive(Debug, Default)]
pub struct TurnCounter {
    value: AtomicU64,
}

impl TurnCounter {
    /// Create a counter at 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the new turn number
    pub fn next(&self) -> u64 {
        self.value.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Increment and mint the Sentiment Key for the new turn
    pub fn next_key(&self) -> (u64, SentimentKey) {
        let turn = self.next();
        (turn, SentimentKey::for_turn(turn))
    }

    /// Last issued turn number (0 before the first call)
    pub fn current(&self) -> u64 {
        self.value.load(Ordering::SeqCst)
    }
}
