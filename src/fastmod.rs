//! Branch-free reduction of a 64-bit counter into a slot index.
//!
//! Implements Lemire's "Faster Remainder by Direct Computation", widened
//! one step beyond the textbook 32-bit-counter form so it stays exact over
//! the full 64-bit counter range: a capacity `C` is paired with a
//! precomputed 128-bit reciprocal `M = floor(2^128 / C) + 1`. For any
//! counter `c`, `index(c) == c % C`, computed with two widening multiplies
//! and no division instruction. A 64-bit reciprocal only reproduces `c % C`
//! for small `c` -- it silently diverges once `c` approaches roughly
//! `2^64 / C` -- so both the reciprocal and the intermediate `low` value
//! here are 128 bits wide. `M` is computed once at inbox construction;
//! [`FastMod::index`] is the only per-operation cost.

/// A capacity paired with its precomputed 128-bit reciprocal constant.
#[derive(Debug, Clone, Copy)]
pub struct FastMod {
    capacity: u64,
    reciprocal: u128,
}

impl FastMod {
    /// `capacity` must be nonzero; capacity's evenness is an inbox-level
    /// invariant, not required by the arithmetic itself.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "fast-modulo capacity must be nonzero");
        let capacity = capacity as u64;
        // M = floor(2^128 / C) + 1. 2^128 itself overflows u128, so we
        // divide u128::MAX (2^128 - 1) by C instead; this lands on the same
        // reciprocal for every C, including powers of two.
        let reciprocal = u128::MAX / (capacity as u128) + 1;
        Self { capacity, reciprocal }
    }

    /// `c mod capacity`, for any `c` in `[0, 2^64)`.
    #[inline(always)]
    pub fn index(&self, c: u64) -> usize {
        let c = c as u128;

        // low = (M * c) mod 2^128: a 128-by-64-bit widening multiply,
        // split into the two 64-bit limbs of the reciprocal so each partial
        // product fits in a u128.
        let m_lo = self.reciprocal as u64;
        let m_hi = (self.reciprocal >> 64) as u64;
        let p0 = (m_lo as u128) * c;
        let p1 = (m_hi as u128) * c;
        let low = (p1 << 64).wrapping_add(p0);

        // idx = high64(low * C): the same widening-multiply technique,
        // this time splitting `low` into its two limbs against capacity.
        let low_lo = low as u64;
        let low_hi = (low >> 64) as u64;
        let cap = self.capacity as u128;
        let q0 = (low_lo as u128) * cap;
        let q1 = (low_hi as u128) * cap;
        ((q1 + (q0 >> 64)) >> 64) as usize
    }

    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn matches_modulo_for_small_cases() {
        for capacity in (2usize..=64).step_by(2) {
            let fm = FastMod::new(capacity);
            for c in 0u64..1000 {
                assert_eq!(fm.index(c), (c % capacity as u64) as usize);
            }
        }
    }

    #[test]
    fn matches_modulo_near_u64_boundary() {
        let fm = FastMod::new(6);
        for c in (u64::MAX - 100)..=u64::MAX {
            assert_eq!(fm.index(c), (c % 6) as usize);
        }
    }

    proptest! {
        #[test]
        fn matches_modulo_for_arbitrary_inputs(
            capacity_half in 1u32..100_000u32,
            c in any::<u64>(),
        ) {
            let capacity = (capacity_half as u64) * 2;
            let fm = FastMod::new(capacity as usize);
            prop_assert_eq!(fm.index(c), (c % capacity) as usize);
        }
    }
}
