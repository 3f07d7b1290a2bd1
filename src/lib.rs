//! Plasma energy histogram - per-region kinetic energy histograms of PIC macro-particles
//!
//! Input moment for LTE ionization models: for every averaging region of the local
//! domain, the weighted number of particles per kinetic-energy bin.
//!
//! Layout:
//! - core/       - slot access macro, float atomics, group barrier, errors
//! - domain/     - particles, species, unit system, assignment shapes
//! - spatial/    - supercell layout and averaging-region mapping
//! - storage/    - frame-organised particle storage
//! - histogram/  - energy binning, global buffer, group-local scratch
//! - kernel/     - work-group kernel and parallel launcher
//! - settings    - JSON configuration
//! - api/        - wasm-bindgen facade

// Slot access macro (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod spatial;
pub mod storage;
pub mod histogram;
pub mod kernel;
pub mod settings;
pub mod api;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"energy histogram engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::wasm::EnergyHistogramEngine;
pub use crate::core::HistogramError;
pub use domain::{Particle, Shape, Species, UnitSystem};
pub use histogram::{EnergyBinning, GlobalHistogramBuffer};
pub use kernel::{HistogramKernel, KernelConfig, LaunchStats};
pub use settings::HistogramSettings;
pub use spatial::{RegionMapping, SuperCellLayout};
pub use storage::{FrameArena, FrameHandle, FrameSource};
