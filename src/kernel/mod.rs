//! Energy histogram kernel
//!
//! One work-group per supercell. Each group bins the kinetic energy of its
//! particles into a group-local histogram and adds that into the histogram of the
//! averaging region the supercell belongs to. Groups run in parallel (rayon with the
//! `parallel` feature) and only meet in the device-scoped adds of the final merge.
//!
//! The kernel reports nothing: invalid parameters are rejected when the kernel is
//! built or launched, particles outside the energy window are silently skipped.

use log::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::HistogramError;
use crate::domain::{Species, UnitSystem};
use crate::histogram::{EnergyBinning, GlobalHistogramBuffer};
use crate::spatial::RegionMapping;
use crate::storage::FrameSource;

#[path = "perf/launch_stats.rs"]
mod launch_stats;
mod fill;
mod group;

pub use launch_stats::LaunchStats;

use fill::{fill_energy_histogram, GroupJob};
use group::GroupShared;
use launch_stats::LaunchCounters;

/// Launch-time parameters of the kernel. Energies are in simulation units.
#[derive(Clone, Debug, PartialEq)]
pub struct KernelConfig {
    pub min_energy: f64,
    pub max_energy: f64,
    /// Threads per work-group. Values above 1 spawn OS threads for every supercell.
    pub workers_per_group: usize,
    /// `TYPICAL_PARTICLES_PER_MACROPARTICLE`: every binned weighting is divided by it.
    pub typical_particles_per_macroparticle: f64,
    pub species: Species,
    pub units: UnitSystem,
}

impl KernelConfig {
    /// One worker per group, no normalization, natural eV units.
    pub fn new(min_energy: f64, max_energy: f64, species: Species) -> Self {
        Self {
            min_energy,
            max_energy,
            workers_per_group: 1,
            typical_particles_per_macroparticle: 1.0,
            species,
            units: UnitSystem::natural_ev(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers_per_group = workers;
        self
    }

    pub fn with_typical_particles(mut self, typical: f64) -> Self {
        self.typical_particles_per_macroparticle = typical;
        self
    }

    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }
}

pub struct HistogramKernel<const BINS: usize> {
    binning: EnergyBinning<BINS>,
    species: Species,
    units: UnitSystem,
    workers: usize,
    typical_particles: f64,

    perf_enabled: bool,
    stats: LaunchStats,
}

impl<const BINS: usize> HistogramKernel<BINS> {
    pub fn new(config: KernelConfig) -> Result<Self, HistogramError> {
        let binning = EnergyBinning::new(config.min_energy, config.max_energy)?;
        if config.workers_per_group == 0 {
            return Err(HistogramError::ZeroWorkers);
        }
        let typical = config.typical_particles_per_macroparticle;
        if !(typical.is_finite() && typical > 0.0) {
            return Err(HistogramError::InvalidNormalization(typical));
        }
        config.species.validate()?;
        config.units.validate()?;

        Ok(Self {
            binning,
            species: config.species,
            units: config.units,
            workers: config.workers_per_group,
            typical_particles: typical,
            perf_enabled: false,
            stats: LaunchStats::default(),
        })
    }

    pub fn binning(&self) -> &EnergyBinning<BINS> { &self.binning }

    pub fn species(&self) -> &Species { &self.species }

    pub fn units(&self) -> &UnitSystem { &self.units }

    pub fn workers_per_group(&self) -> usize { self.workers }

    /// Enable or disable launch statistics (adds counter traffic when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.perf_enabled = enabled;
        if !enabled {
            self.stats.reset();
        }
    }

    /// Statistics of the last launch (zeros when perf metrics are disabled)
    pub fn launch_stats(&self) -> LaunchStats {
        self.stats.clone()
    }

    /// Run the work-group of one supercell.
    ///
    /// Adds the weighted energy counts of the supercell's particles into the histogram
    /// of its averaging region. Guard supercells and supercells without particles
    /// leave the buffer untouched. The buffer must hold `mapping.region_count()`
    /// regions.
    pub fn run_group<S: FrameSource>(
        &self,
        storage: &S,
        cell: usize,
        buffer: &GlobalHistogramBuffer<BINS>,
        mapping: &RegionMapping,
    ) {
        self.run_group_with(storage, cell, buffer, mapping, None);
    }

    fn run_group_with<S: FrameSource>(
        &self,
        storage: &S,
        cell: usize,
        buffer: &GlobalHistogramBuffer<BINS>,
        mapping: &RegionMapping,
        counters: Option<&LaunchCounters>,
    ) {
        let Some(region) = mapping.region_of(cell) else {
            return;
        };

        let shared = GroupShared::<BINS>::new(self.workers);
        let job = GroupJob {
            storage,
            cell,
            slot: buffer.shift(region),
            shared: &shared,
            binning: &self.binning,
            species: &self.species,
            units: &self.units,
            typical_particles: self.typical_particles,
            counters,
        };

        group::execute(self.workers, |worker| fill_energy_histogram(&job, worker));
    }

    /// Run one work-group for every core supercell of the mapping.
    ///
    /// Only adds into `buffer`; clear it beforehand if a fresh histogram is wanted.
    pub fn launch<S: FrameSource>(
        &mut self,
        storage: &S,
        buffer: &GlobalHistogramBuffer<BINS>,
        mapping: &RegionMapping,
    ) -> Result<(), HistogramError> {
        let required = mapping.region_count();
        if buffer.region_count() < required {
            return Err(HistogramError::BufferTooSmall {
                required,
                available: buffer.region_count(),
            });
        }
        let layout_cells = mapping.layout().cell_count();
        if storage.cell_count() != layout_cells {
            return Err(HistogramError::StorageMismatch {
                layout_cells,
                storage_cells: storage.cell_count(),
            });
        }

        let cells = mapping.launch_cells();
        let counters = LaunchCounters::start();
        let counters_ref = self.perf_enabled.then_some(&counters);

        let kernel = &*self;
        #[cfg(feature = "parallel")]
        {
            cells
                .par_iter()
                .for_each(|&cell| kernel.run_group_with(storage, cell, buffer, mapping, counters_ref));
        }
        #[cfg(not(feature = "parallel"))]
        {
            for &cell in &cells {
                kernel.run_group_with(storage, cell, buffer, mapping, counters_ref);
            }
        }

        if self.perf_enabled {
            self.stats = LaunchStats::from_counters(&counters);
        }

        debug!(
            "energy histogram launch: {} groups x {} workers, {} regions, {} bins",
            cells.len(),
            self.workers,
            required,
            BINS
        );
        Ok(())
    }
}
