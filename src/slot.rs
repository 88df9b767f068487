//! One cell of the ring: a header of independent atomic flags plus an
//! inline payload region.
//!
//! Lifecycle (cyclic, per slot): `EMPTY -> OCCUPIED -> OCCUPIED+READY ->
//! EMPTY`. `OCCUPIED` alone marks a publish in flight that readers must not
//! observe; `OCCUPIED && READY` is the only consumable state. `shared_locked`
//! is unused outside the shared (multi-consumer) read operations.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::AtomicBool;

#[repr(align(64))]
pub(crate) struct Slot<T> {
    occupied: AtomicBool,
    ready: AtomicBool,
    shared_locked: AtomicBool,
    payload: UnsafeCell<MaybeUninit<T>>,
}

// SAFETY: access to `payload` is gated entirely by the `occupied`/`ready`/
// `shared_locked` atomic protocol implemented in `crate::inbox`; a slot is
// never read and written concurrently once that protocol is followed.
unsafe impl<T: Send> Sync for Slot<T> {}

impl<T> Slot<T> {
    pub(crate) fn empty() -> Self {
        Self {
            occupied: AtomicBool::new(false),
            ready: AtomicBool::new(false),
            shared_locked: AtomicBool::new(false),
            payload: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    #[inline(always)]
    pub(crate) fn occupied(&self) -> &AtomicBool {
        &self.occupied
    }

    #[inline(always)]
    pub(crate) fn ready(&self) -> &AtomicBool {
        &self.ready
    }

    #[inline(always)]
    pub(crate) fn shared_locked(&self) -> &AtomicBool {
        &self.shared_locked
    }

    /// # Safety
    /// Caller must hold exclusive producer access to this slot (a winning
    /// `occupied` CAS) before calling, and must not have an outstanding
    /// unread payload in the slot.
    #[inline(always)]
    pub(crate) unsafe fn write_payload(&self, value: T) {
        (*self.payload.get()).as_mut_ptr().write(value);
    }

    /// # Safety
    /// Caller must have observed `occupied && ready` via the acquire-load
    /// protocol before calling.
    #[inline(always)]
    pub(crate) unsafe fn read_payload(&self) -> T
    where
        T: Copy,
    {
        (*self.payload.get()).assume_init_read()
    }
}
