//! Bin access for the hot kernel loops.
//!
//! Bin indices reaching the histograms come from `EnergyBinning::bin_of` (already
//! range-checked) or from a worker stripe over `0..BINS`, so release builds skip the
//! bounds check. Debug builds assert the index with the bin count in the message.
//!
//! ```rust
//! use plasma_energy_histogram::bin_slot;
//!
//! let bins = [0.0f64, 1.5, 2.5, 0.0];
//! assert_eq!(*bin_slot!(bins, 2), 2.5);
//! ```

/// Shared reference to bin `$bin` of `$bins` (an array, `Vec` or slice).
#[macro_export]
macro_rules! bin_slot {
    ($bins:expr, $bin:expr) => {{
        let bins = &$bins[..];
        let bin: usize = $bin;
        debug_assert!(bin < bins.len(), "bin {} outside a histogram of {} bins", bin, bins.len());
        // SAFETY: callers pass in-range bins, asserted above in debug builds
        unsafe { bins.get_unchecked(bin) }
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::AtomicF64;

    #[test]
    fn reads_bin_by_index() {
        let bins = [0.25f64, 0.5, 0.75];
        assert_eq!(*bin_slot!(bins, 1), 0.5);
    }

    #[test]
    fn atomic_bins_accumulate_through_the_slot() {
        let bins: Vec<AtomicF64> = (0..3).map(|_| AtomicF64::zero()).collect();
        bin_slot!(bins, 2).add_group_scoped(1.5);
        bin_slot!(bins, 2).add_group_scoped(2.0);
        assert_eq!(bin_slot!(bins, 2).load(), 3.5);
        assert_eq!(bins[0].load(), 0.0);
    }

    #[test]
    #[should_panic(expected = "outside a histogram of 3 bins")]
    #[cfg(debug_assertions)]
    fn out_of_range_bin_panics_in_debug() {
        let bins = vec![0.0f64; 3];
        let _ = *bin_slot!(bins, 3);
    }
}
