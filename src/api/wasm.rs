use wasm_bindgen::prelude::*;

use crate::domain::Particle;
use crate::histogram::GlobalHistogramBuffer;
use crate::kernel::{HistogramKernel, LaunchStats};
use crate::settings::HistogramSettings;
use crate::spatial::{RegionMapping, SuperCellLayout};
use crate::storage::FrameArena;

/// Bins of the histograms exposed to JavaScript.
pub const WASM_BINS: usize = 64;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Self-contained engine: particle storage, region mapping, histogram buffer and kernel.
#[wasm_bindgen]
pub struct EnergyHistogramEngine {
    kernel: HistogramKernel<WASM_BINS>,
    layout: SuperCellLayout,
    mapping: RegionMapping,
    storage: FrameArena,
    buffer: GlobalHistogramBuffer<WASM_BINS>,
}

#[wasm_bindgen]
impl EnergyHistogramEngine {
    /// Create an engine for `core` supercells per axis with `guard` supercells on each side
    #[wasm_bindgen(constructor)]
    pub fn new(
        settings_json: &str,
        core_x: u32,
        core_y: u32,
        core_z: u32,
        guard_x: u32,
        guard_y: u32,
        guard_z: u32,
        frame_capacity: u32,
    ) -> Result<EnergyHistogramEngine, JsValue> {
        #[allow(unused_mut)]
        let mut settings = HistogramSettings::from_json(settings_json).map_err(js_err)?;

        // no std threads in the browser; groups still run in parallel on the rayon pool
        #[cfg(target_arch = "wasm32")]
        {
            if settings.workers_per_group > 1 {
                web_sys::console::warn_1(&"workers per group forced to 1 on wasm32".into());
                settings.workers_per_group = 1;
            }
        }

        let layout = SuperCellLayout::new([core_x, core_y, core_z], [guard_x, guard_y, guard_z])
            .map_err(js_err)?;
        let mapping = settings.region_mapping(layout).map_err(js_err)?;
        let kernel = HistogramKernel::new(settings.kernel_config()).map_err(js_err)?;
        let storage = FrameArena::new(layout.cell_count(), frame_capacity as usize).map_err(js_err)?;
        let buffer = GlobalHistogramBuffer::new(mapping.region_count());

        Ok(EnergyHistogramEngine {
            kernel,
            layout,
            mapping,
            storage,
            buffer,
        })
    }

    /// Add a macro-particle to the supercell at guard-inclusive coordinates.
    /// Returns false when the coordinates are outside the domain, the weighting is not
    /// finite and positive, or a momentum component is not finite.
    pub fn add_particle(&mut self, x: u32, y: u32, z: u32, px: f64, py: f64, pz: f64, weighting: f64) -> bool {
        let total = self.layout.total();
        if x >= total[0] || y >= total[1] || z >= total[2] {
            return false;
        }
        let cell = self.layout.linear_index([x, y, z]);
        self.storage.push(cell, Particle::new([px, py, pz], weighting)).is_ok()
    }

    pub fn clear_particles(&mut self) {
        self.storage.clear();
    }

    pub fn clear_histograms(&mut self) {
        self.buffer.clear();
    }

    /// Add the histograms of all stored particles into the buffer
    pub fn compute(&mut self) -> Result<(), JsValue> {
        self.kernel
            .launch(&self.storage, &self.buffer, &self.mapping)
            .map_err(js_err)
    }

    pub fn region_count(&self) -> u32 {
        self.mapping.region_count() as u32
    }

    pub fn num_bins(&self) -> u32 {
        WASM_BINS as u32
    }

    /// Bins of one averaging region (empty for an unknown region)
    pub fn region_histogram(&self, region: u32) -> Vec<f64> {
        let region = region as usize;
        if region >= self.buffer.region_count() {
            return Vec::new();
        }
        self.buffer.region_values(region).to_vec()
    }

    /// `num_bins + 1` bin edges in eV
    pub fn bin_edges_ev(&self) -> Vec<f64> {
        let units = *self.kernel.units();
        self.kernel
            .binning()
            .edges()
            .into_iter()
            .map(|e| units.energy_to_ev(e))
            .collect()
    }

    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.kernel.enable_perf_metrics(enabled);
    }

    pub fn get_launch_stats(&self) -> LaunchStats {
        self.kernel.launch_stats()
    }
}
