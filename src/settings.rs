//! Histogram settings - JSON configuration validated before any launch.
//!
//! ```json
//! {
//!   "minEnergyEv": 0.0,
//!   "maxEnergyEv": 100.0,
//!   "typicalParticlesPerMacroparticle": 1.0,
//!   "workersPerGroup": 4,
//!   "supercellSize": [8, 8, 4],
//!   "averagingRegionCells": [16, 16, 8],
//!   "species": { "name": "e", "massPerParticle": 510998.95 },
//!   "units": { "speedOfLight": 1.0, "energyUnitEv": 1.0 }
//! }
//! ```

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::HistogramError;
use crate::domain::{Species, UnitSystem};
use crate::kernel::KernelConfig;
use crate::spatial::{RegionMapping, SuperCellLayout};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramSettings {
    pub min_energy_ev: f64,
    pub max_energy_ev: f64,
    #[serde(default = "default_typical_particles")]
    pub typical_particles_per_macroparticle: f64,
    #[serde(default = "default_workers")]
    pub workers_per_group: usize,
    /// Cells per supercell along each axis.
    pub supercell_size: [u32; 3],
    /// Cells per averaging region along each axis.
    pub averaging_region_cells: [u32; 3],
    #[serde(default = "Species::electron_ev")]
    pub species: Species,
    #[serde(default)]
    pub units: UnitSystem,
}

fn default_typical_particles() -> f64 {
    1.0
}

fn default_workers() -> usize {
    1
}

impl HistogramSettings {
    pub fn from_json(json: &str) -> Result<Self, HistogramError> {
        let settings: HistogramSettings = serde_json::from_str(json)?;
        settings.validate()?;
        info!(
            "histogram settings: [{}, {}) eV, {} workers/group, species {}",
            settings.min_energy_ev, settings.max_energy_ev, settings.workers_per_group, settings.species.name
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, HistogramError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check every launch precondition that does not depend on the domain layout.
    pub fn validate(&self) -> Result<(), HistogramError> {
        let (min, max) = (self.min_energy_ev, self.max_energy_ev);
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(HistogramError::InvalidEnergyRange { min, max });
        }
        if self.workers_per_group == 0 {
            return Err(HistogramError::ZeroWorkers);
        }
        let typical = self.typical_particles_per_macroparticle;
        if !(typical.is_finite() && typical > 0.0) {
            return Err(HistogramError::InvalidNormalization(typical));
        }
        if let Some(axis) = self.supercell_size.iter().position(|&n| n == 0) {
            return Err(HistogramError::ZeroRegionSize { axis });
        }
        for axis in 0..3 {
            if self.averaging_region_cells[axis] < self.supercell_size[axis] {
                return Err(HistogramError::ZeroRegionSize { axis });
            }
        }
        self.species.validate()?;
        self.units.validate()
    }

    /// Kernel configuration with the eV window converted to simulation units.
    pub fn kernel_config(&self) -> KernelConfig {
        KernelConfig {
            min_energy: self.units.ev_to_energy(self.min_energy_ev),
            max_energy: self.units.ev_to_energy(self.max_energy_ev),
            workers_per_group: self.workers_per_group,
            typical_particles_per_macroparticle: self.typical_particles_per_macroparticle,
            species: self.species.clone(),
            units: self.units,
        }
    }

    pub fn region_mapping(&self, layout: SuperCellLayout) -> Result<RegionMapping, HistogramError> {
        RegionMapping::from_cells(layout, self.averaging_region_cells, self.supercell_size)
    }
}
