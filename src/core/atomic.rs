//! Floating-point atomics for the two reduction tiers
//!
//! The kernel reduces in two steps with different contention scopes:
//! - group scope: up to `W` workers of one work-group racing on a local bin.
//!   Publication to the other workers happens through the group barrier, so the
//!   add itself only needs atomicity.
//! - device scope: every work-group mapped to the same region racing on a global bin.
//!   Readers only look after the whole launch has joined, but the add is
//!   release/acquire so partial totals observed mid-launch are coherent.

use std::sync::atomic::{AtomicU64, Ordering};

/// `f64` stored as its bit pattern in an `AtomicU64`.
#[derive(Debug, Default)]
#[repr(transparent)]
pub struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    /// `0.0_f64` has an all-zero bit pattern.
    pub const fn zero() -> Self {
        Self { bits: AtomicU64::new(0) }
    }

    pub fn new(value: f64) -> Self {
        Self { bits: AtomicU64::new(value.to_bits()) }
    }

    #[inline]
    pub fn load(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    #[inline]
    pub fn store(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }

    /// Atomic add among the workers of one work-group. Returns the previous value.
    #[inline]
    pub fn add_group_scoped(&self, value: f64) -> f64 {
        self.fetch_add(value, Ordering::Relaxed)
    }

    /// Atomic add among all concurrently running work-groups. Returns the previous value.
    #[inline]
    pub fn add_device_scoped(&self, value: f64) -> f64 {
        self.fetch_add(value, Ordering::AcqRel)
    }

    #[inline]
    fn fetch_add(&self, value: f64, success: Ordering) -> f64 {
        let mut current = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + value).to_bits();
            match self.bits.compare_exchange_weak(current, next, success, Ordering::Relaxed) {
                Ok(previous) => return f64::from_bits(previous),
                Err(actual) => current = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn zero_is_positive_zero() {
        let a = AtomicF64::zero();
        assert_eq!(a.load().to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn add_returns_previous_value() {
        let a = AtomicF64::new(1.5);
        assert_eq!(a.add_group_scoped(2.0), 1.5);
        assert_eq!(a.add_device_scoped(0.5), 3.5);
        assert_eq!(a.load(), 4.0);
    }

    #[test]
    fn concurrent_adds_are_not_lost() {
        let a = AtomicF64::zero();
        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        a.add_device_scoped(1.0);
                    }
                });
            }
        });
        // integers up to 2^53 are exact, so no rounding slack is needed
        assert_eq!(a.load(), 8000.0);
    }
}
