use crate::core::AtomicF64;

/// One `BINS`-wide histogram per averaging region, shared by all work-groups.
///
/// The kernel only ever adds. Clearing between simulation steps is the caller's job.
pub struct GlobalHistogramBuffer<const BINS: usize> {
    bins: Vec<AtomicF64>,
    regions: usize,
}

impl<const BINS: usize> GlobalHistogramBuffer<BINS> {
    pub fn new(regions: usize) -> Self {
        let mut bins = Vec::with_capacity(regions * BINS);
        bins.resize_with(regions * BINS, AtomicF64::zero);
        Self { bins, regions }
    }

    pub fn region_count(&self) -> usize {
        self.regions
    }

    pub const fn num_bins(&self) -> usize {
        BINS
    }

    /// Histogram of one averaging region.
    ///
    /// Panics if `region >= region_count()`; launches validate that up front.
    #[inline]
    pub fn shift(&self, region: usize) -> HistogramSlot<'_, BINS> {
        let start = region * BINS;
        HistogramSlot {
            bins: &self.bins[start..start + BINS],
        }
    }

    /// Zero every bin of every region.
    pub fn clear(&mut self) {
        for bin in &mut self.bins {
            *bin = AtomicF64::zero();
        }
    }

    pub fn region_values(&self, region: usize) -> [f64; BINS] {
        self.shift(region).values()
    }

    pub fn to_vec(&self) -> Vec<[f64; BINS]> {
        (0..self.regions).map(|r| self.region_values(r)).collect()
    }

    /// Sum over all regions and bins.
    pub fn total(&self) -> f64 {
        self.bins.iter().map(AtomicF64::load).sum()
    }
}

/// Mutable view of one region's bins; adds are safe across work-groups.
#[derive(Clone, Copy)]
pub struct HistogramSlot<'a, const BINS: usize> {
    bins: &'a [AtomicF64],
}

impl<'a, const BINS: usize> HistogramSlot<'a, BINS> {
    /// Device-scoped atomic add; `bin < BINS`.
    #[inline]
    pub fn add(&self, bin: usize, value: f64) {
        bin_slot!(self.bins, bin).add_device_scoped(value);
    }

    #[inline]
    pub fn load(&self, bin: usize) -> f64 {
        self.bins[bin].load()
    }

    pub fn values(&self) -> [f64; BINS] {
        std::array::from_fn(|bin| self.bins[bin].load())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_zeroed() {
        let buffer = GlobalHistogramBuffer::<3>::new(2);
        assert_eq!(buffer.to_vec(), vec![[0.0; 3]; 2]);
        assert_eq!(buffer.num_bins(), 3);
    }

    #[test]
    fn shift_addresses_one_region() {
        let buffer = GlobalHistogramBuffer::<2>::new(3);
        buffer.shift(1).add(0, 1.5);
        buffer.shift(1).add(0, 1.0);
        buffer.shift(2).add(1, 4.0);
        assert_eq!(buffer.region_values(0), [0.0, 0.0]);
        assert_eq!(buffer.region_values(1), [2.5, 0.0]);
        assert_eq!(buffer.region_values(2), [0.0, 4.0]);
        assert_eq!(buffer.total(), 6.5);
    }

    #[test]
    fn clear_resets_everything() {
        let mut buffer = GlobalHistogramBuffer::<2>::new(1);
        buffer.shift(0).add(1, 3.0);
        buffer.clear();
        assert_eq!(buffer.total(), 0.0);
    }

    #[test]
    #[should_panic]
    fn shift_past_last_region_panics() {
        let buffer = GlobalHistogramBuffer::<2>::new(1);
        let _ = buffer.shift(1);
    }
}
