//! The ring itself: capacity, message size (carried at the type level),
//! the fast-modulo reciprocal, the producer and consumer counters, and the
//! contiguous slot array.
//!
//! All eight operations below are implemented directly against the
//! three-flag-per-slot protocol; there is no queue-wide lock. See the crate
//! documentation for the full concurrency contract.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::diagnostics::{NoopReporter, Reporter};
use crate::error::{MeshError, Result};
use crate::fastmod::FastMod;
use crate::sequence::{ConsumerCounter, ProducerCounter};
use crate::slot::Slot;

/// A fixed-capacity lock-free ring of `T`-typed message slots.
///
/// `T` plays the role of the reference design's runtime message size `M`:
/// `size_of::<T>()` is fixed at compile time, so producer/consumer size
/// mismatch (a hazard in the untyped reference) cannot occur. Callers who
/// need a runtime-chosen layout can instantiate `Inbox<[u8; N]>`.
pub struct Inbox<T> {
    name: String,
    fastmod: FastMod,
    producer: ProducerCounter,
    consumer: ConsumerCounter,
    slots: Box<[Slot<T>]>,
}

// SAFETY: all mutable state (the three per-slot flags and the counters) is
// atomic; payload access is gated by the flag protocol implemented below.
unsafe impl<T: Send> Send for Inbox<T> {}
unsafe impl<T: Send> Sync for Inbox<T> {}

impl<T: Copy> Inbox<T> {
    /// Allocates an inbox with a no-op diagnostics reporter. See
    /// [`Inbox::new_with_reporter`] to observe construction failures.
    pub fn new(capacity: usize, name: impl Into<String>) -> Result<Arc<Self>> {
        Self::new_with_reporter(capacity, name, &NoopReporter)
    }

    /// Allocates an inbox, reporting any construction failure to `reporter`
    /// before returning it as an `Err`.
    ///
    /// Fails when `capacity` is zero or odd, or `name` is empty.
    pub fn new_with_reporter(
        capacity: usize,
        name: impl Into<String>,
        reporter: &dyn Reporter,
    ) -> Result<Arc<Self>> {
        let name = name.into();
        if name.is_empty() {
            let err = MeshError::empty_name();
            reporter.report(err.tag(), "inbox name must not be empty");
            return Err(err);
        }
        if capacity == 0 || capacity % 2 != 0 {
            let err = MeshError::invalid_capacity(capacity);
            reporter.report(err.tag(), &format!("capacity {capacity} is zero or odd"));
            return Err(err);
        }

        let slots: Box<[Slot<T>]> = (0..capacity).map(|_| Slot::empty()).collect();

        Ok(Arc::new(Self {
            name,
            fastmod: FastMod::new(capacity),
            producer: ProducerCounter::new(0),
            consumer: ConsumerCounter::new(0),
            slots,
        }))
    }

    pub fn capacity(&self) -> usize {
        self.fastmod.capacity()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_is(&self, name: &str) -> bool {
        self.name == name
    }

    #[inline(always)]
    fn slot(&self, idx: usize) -> &Slot<T> {
        &self.slots[idx]
    }

    /// Non-blocking single-producer write (reference §4.3.1).
    ///
    /// Returns `false` on contention without advancing the producer
    /// counter, so repeated failures keep targeting the same slot. Using
    /// this with more than one concurrent producer on the same inbox is
    /// undefined: two producers may compute the same index and one will
    /// spuriously fail even though the ring is not full.
    #[inline(always)]
    pub fn try_write(&self, value: T) -> bool {
        let p = self.producer.value.load(Ordering::Relaxed);
        let idx = self.fastmod.index(p);
        let slot = self.slot(idx);

        if slot
            .occupied()
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return false;
        }

        unsafe {
            slot.write_payload(value);
        }
        self.producer.value.fetch_add(1, Ordering::Release);
        slot.ready().store(true, Ordering::Release);
        true
    }

    /// Spinning single-producer write (reference §4.3.2).
    ///
    /// Claims a monotonically increasing ticket unconditionally, then spins
    /// on that slot's `occupied` flag until a consumer has freed it. Safe
    /// for multiple concurrent producers (ticket allocation is atomic); safe
    /// for use alongside shared-consumer reads on the same inbox.
    #[inline(always)]
    pub fn write_spin(&self, value: T) {
        let p = self.producer.value.fetch_add(1, Ordering::Acquire);
        let idx = self.fastmod.index(p);
        let slot = self.slot(idx);

        while slot
            .occupied()
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            std::hint::spin_loop();
        }

        unsafe {
            slot.write_payload(value);
        }
        slot.ready().store(true, Ordering::Release);
    }

    /// Non-blocking single-consumer read (reference §4.3.5).
    #[inline(always)]
    pub fn try_read(&self) -> Option<T> {
        let q = self.consumer.value.load(Ordering::Relaxed);
        let idx = self.fastmod.index(q);
        let slot = self.slot(idx);

        if !slot.occupied().load(Ordering::Relaxed) {
            return None;
        }
        if !slot.ready().load(Ordering::Acquire) {
            return None;
        }

        let value = unsafe { slot.read_payload() };
        slot.ready().store(false, Ordering::Relaxed);
        slot.occupied().store(false, Ordering::Release);
        self.consumer.value.fetch_add(1, Ordering::Release);
        Some(value)
    }

    /// Spinning single-consumer read (reference §4.3.6).
    #[inline(always)]
    pub fn read_spin(&self) -> T {
        let q = self.consumer.value.fetch_add(1, Ordering::Acquire);
        let idx = self.fastmod.index(q);
        let slot = self.slot(idx);

        loop {
            if slot.occupied().load(Ordering::Relaxed) && slot.ready().load(Ordering::Acquire) {
                let value = unsafe { slot.read_payload() };
                slot.ready().store(false, Ordering::Relaxed);
                slot.occupied().store(false, Ordering::Release);
                return value;
            }
            std::hint::spin_loop();
        }
    }

    /// Non-blocking shared-consumer read (reference §4.3.7).
    ///
    /// Serializes competing consumers per slot via `shared_locked`; the
    /// consumer counter only advances for the winner, so no two consumers
    /// ever drain the same slot occurrence.
    #[inline(always)]
    pub fn try_read_shared(&self) -> Option<T> {
        let q = self.consumer.value.load(Ordering::Relaxed);
        let idx = self.fastmod.index(q);
        let slot = self.slot(idx);

        if slot
            .shared_locked()
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return None;
        }

        if !slot.occupied().load(Ordering::Relaxed) || !slot.ready().load(Ordering::Acquire) {
            slot.shared_locked().store(false, Ordering::Release);
            return None;
        }

        let value = unsafe { slot.read_payload() };
        self.consumer.value.fetch_add(1, Ordering::Release);
        slot.ready().store(false, Ordering::Relaxed);
        slot.occupied().store(false, Ordering::Release);
        slot.shared_locked().store(false, Ordering::Release);
        Some(value)
    }

    /// Spinning shared-consumer read (reference §4.3.8): retries
    /// [`Inbox::try_read_shared`] until it drains a slot.
    #[inline(always)]
    pub fn read_shared_spin(&self) -> T {
        loop {
            if let Some(value) = self.try_read_shared() {
                return value;
            }
            std::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(
            Inbox::<u64>::new(0, "a").unwrap_err(),
            MeshError::invalid_capacity(0)
        );
    }

    #[test]
    fn rejects_odd_capacity() {
        assert_eq!(
            Inbox::<u64>::new(3, "a").unwrap_err(),
            MeshError::invalid_capacity(3)
        );
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!(Inbox::<u64>::new(4, "").unwrap_err(), MeshError::empty_name());
    }

    #[test]
    fn single_producer_single_consumer_round_trip() {
        let inbox = Inbox::<u64>::new(4, "spsc").unwrap();
        assert!(inbox.try_write(42));
        assert_eq!(inbox.try_read(), Some(42));
        assert_eq!(inbox.try_read(), None);
    }

    #[test]
    fn non_blocking_write_fails_when_slot_still_occupied() {
        let inbox = Inbox::<u64>::new(2, "full").unwrap();
        assert!(inbox.try_write(1));
        assert!(inbox.try_write(2));
        // both slots now occupied; a third try_write targets slot 0 again
        // and must fail without advancing P.
        assert!(!inbox.try_write(3));
        assert_eq!(inbox.try_read(), Some(1));
        assert!(inbox.try_write(3));
    }

    #[test]
    fn spinning_write_and_read_drain_in_fifo_order() {
        let inbox = Inbox::<u64>::new(4, "spin").unwrap();
        for i in 0..10u64 {
            inbox.write_spin(i);
            assert_eq!(inbox.read_spin(), i);
        }
    }

    #[test]
    fn shared_read_returns_none_when_empty() {
        let inbox = Inbox::<u64>::new(4, "shared").unwrap();
        assert_eq!(inbox.try_read_shared(), None);
    }

    #[test]
    fn shared_reads_never_double_deliver() {
        use std::sync::atomic::{AtomicUsize, Ordering as O};
        use std::thread;

        let inbox = Inbox::<u64>::new(4, "shared-mpmc").unwrap();
        const N: usize = 2_000;

        let total = Arc::new(AtomicUsize::new(0));
        thread::scope(|s| {
            // Capacity is 4 and N is 2,000: writing all N up front before
            // any consumer runs would deadlock write_spin on slot reuse, so
            // the producer runs interleaved with the consumers instead.
            {
                let inbox = Arc::clone(&inbox);
                s.spawn(move || {
                    for i in 0..N as u64 {
                        inbox.write_spin(i);
                    }
                });
            }
            for _ in 0..3 {
                let inbox = Arc::clone(&inbox);
                let total = Arc::clone(&total);
                s.spawn(move || loop {
                    if total.load(O::Relaxed) >= N {
                        break;
                    }
                    if inbox.try_read_shared().is_some() {
                        total.fetch_add(1, O::Relaxed);
                    } else {
                        std::hint::spin_loop();
                    }
                });
            }
        });
        assert_eq!(total.load(O::Relaxed), N);
    }
}
