use crate::core::HistogramError;

/// Energy window `[min, max)` split into `BINS` equal bins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyBinning<const BINS: usize> {
    min: f64,
    max: f64,
}

impl<const BINS: usize> EnergyBinning<BINS> {
    pub fn new(min: f64, max: f64) -> Result<Self, HistogramError> {
        if BINS == 0 {
            return Err(HistogramError::ZeroBins);
        }
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(HistogramError::InvalidEnergyRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 { self.min }

    pub fn max(&self) -> f64 { self.max }

    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / BINS as f64
    }

    /// Bin holding `energy`, or `None` outside `[min, max)`.
    ///
    /// `floor((E - min) / (max - min) * BINS)`; no clamping, NaN falls outside.
    #[inline]
    pub fn bin_of(&self, energy: f64) -> Option<usize> {
        let bin = ((energy - self.min) / (self.max - self.min) * BINS as f64).floor();
        if bin >= 0.0 && bin < BINS as f64 {
            Some(bin as usize)
        } else {
            None
        }
    }

    pub fn lower_edge(&self, bin: usize) -> f64 {
        self.min + bin as f64 * self.bin_width()
    }

    pub fn center(&self, bin: usize) -> f64 {
        self.min + (bin as f64 + 0.5) * self.bin_width()
    }

    /// `BINS + 1` edges from `min` to `max`.
    pub fn edges(&self) -> Vec<f64> {
        (0..=BINS)
            .map(|i| if i == BINS { self.max } else { self.lower_edge(i) })
            .collect()
    }
}
