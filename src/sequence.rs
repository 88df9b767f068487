//! Cache-line-isolated counters.
//!
//! The producer counter P and consumer counter Q are mutated by distinct
//! parties and must not share a cache line with each other or with the
//! inbox's immutable fields, or false sharing serializes unrelated
//! producer/consumer progress.

use std::sync::atomic::AtomicU64;

#[repr(align(64))]
pub(crate) struct ProducerCounter {
    pub(crate) value: AtomicU64,
}

impl ProducerCounter {
    pub(crate) fn new(initial: u64) -> Self {
        Self { value: AtomicU64::new(initial) }
    }
}

#[repr(align(64))]
pub(crate) struct ConsumerCounter {
    pub(crate) value: AtomicU64,
}

impl ConsumerCounter {
    pub(crate) fn new(initial: u64) -> Self {
        Self { value: AtomicU64::new(initial) }
    }
}
