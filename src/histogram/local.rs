use crate::core::AtomicF64;

use super::buffer::HistogramSlot;

/// Group-local scratch histogram. Lives exactly as long as one work-group and is
/// only touched by that group's workers.
pub struct GroupHistogram<const BINS: usize> {
    bins: [AtomicF64; BINS],
}

impl<const BINS: usize> GroupHistogram<BINS> {
    pub fn new() -> Self {
        Self {
            bins: std::array::from_fn(|_| AtomicF64::zero()),
        }
    }

    #[inline]
    pub fn zero(&self, bin: usize) {
        bin_slot!(self.bins, bin).store(0.0);
    }

    /// Group-scoped atomic add; `bin < BINS`.
    #[inline]
    pub fn add(&self, bin: usize, value: f64) {
        bin_slot!(self.bins, bin).add_group_scoped(value);
    }

    #[inline]
    pub fn load(&self, bin: usize) -> f64 {
        bin_slot!(self.bins, bin).load()
    }

    /// Add one bin into the region histogram (device-scoped).
    #[inline]
    pub fn merge_bin_into(&self, bin: usize, slot: &HistogramSlot<'_, BINS>) {
        slot.add(bin, self.load(bin));
    }
}

impl<const BINS: usize> Default for GroupHistogram<BINS> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::GlobalHistogramBuffer;

    #[test]
    fn merge_adds_instead_of_overwriting() {
        let local = GroupHistogram::<2>::new();
        local.add(1, 2.0);
        local.add(1, 0.5);

        let buffer = GlobalHistogramBuffer::<2>::new(1);
        buffer.shift(0).add(1, 1.0);
        let slot = buffer.shift(0);
        for bin in 0..2 {
            local.merge_bin_into(bin, &slot);
        }
        assert_eq!(buffer.region_values(0), [0.0, 3.5]);
    }

    #[test]
    fn zero_clears_a_bin() {
        let local = GroupHistogram::<1>::new();
        local.add(0, 7.0);
        local.zero(0);
        assert_eq!(local.load(0), 0.0);
    }
}
