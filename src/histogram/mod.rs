//! Histograms: energy binning, the shared per-region buffer and the group-local scratch.

mod binning;
mod buffer;
mod local;

pub use binning::EnergyBinning;
pub use buffer::{GlobalHistogramBuffer, HistogramSlot};
pub use local::GroupHistogram;
