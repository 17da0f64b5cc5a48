//! Deterministic identifier generator.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::ports::IdGenerator;

/// Yields `00000000-0000-0000-0000-000000000001`, `...002`, and so on.
///
/// Safe to share between tasks; every call returns a distinct id.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        Uuid::from_u128(n as u128)
    }
}
