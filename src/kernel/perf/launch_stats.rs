use std::sync::atomic::{AtomicU64, Ordering};

use wasm_bindgen::prelude::*;

/// Wall clock in milliseconds. The browser has no `Instant`, so wasm reads `Date.now()`.
#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Counters shared by all work-groups of one launch, plus the launch start time.
pub(crate) struct LaunchCounters {
    started_ms: f64,
    groups: AtomicU64,
    empty_groups: AtomicU64,
    particles_binned: AtomicU64,
    particles_dropped: AtomicU64,
}

impl LaunchCounters {
    pub(crate) fn start() -> Self {
        Self {
            started_ms: now_ms(),
            groups: AtomicU64::new(0),
            empty_groups: AtomicU64::new(0),
            particles_binned: AtomicU64::new(0),
            particles_dropped: AtomicU64::new(0),
        }
    }

    pub(crate) fn record_group(&self, empty: bool) {
        self.groups.fetch_add(1, Ordering::Relaxed);
        if empty {
            self.empty_groups.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_particles(&self, binned: u64, dropped: u64) {
        self.particles_binned.fetch_add(binned, Ordering::Relaxed);
        self.particles_dropped.fetch_add(dropped, Ordering::Relaxed);
    }
}

/// Snapshot of the last launch (zeros while perf metrics are disabled).
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LaunchStats {
    pub(crate) launch_ms: f64,
    pub(crate) groups: u32,
    pub(crate) empty_groups: u32,
    pub(crate) particles_binned: u32,
    pub(crate) particles_dropped: u32,
}

fn saturate(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

impl LaunchStats {
    /// Snapshot taken when the launch has finished.
    pub(crate) fn from_counters(counters: &LaunchCounters) -> Self {
        Self {
            launch_ms: now_ms() - counters.started_ms,
            groups: saturate(counters.groups.load(Ordering::Relaxed)),
            empty_groups: saturate(counters.empty_groups.load(Ordering::Relaxed)),
            particles_binned: saturate(counters.particles_binned.load(Ordering::Relaxed)),
            particles_dropped: saturate(counters.particles_dropped.load(Ordering::Relaxed)),
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = LaunchStats::default();
    }
}

#[wasm_bindgen]
impl LaunchStats {
    #[wasm_bindgen(getter)]
    pub fn launch_ms(&self) -> f64 { self.launch_ms }
    #[wasm_bindgen(getter)]
    pub fn groups(&self) -> u32 { self.groups }
    #[wasm_bindgen(getter)]
    pub fn empty_groups(&self) -> u32 { self.empty_groups }
    #[wasm_bindgen(getter)]
    pub fn particles_binned(&self) -> u32 { self.particles_binned }
    /// Particles outside the energy window.
    #[wasm_bindgen(getter)]
    pub fn particles_dropped(&self) -> u32 { self.particles_dropped }
}
