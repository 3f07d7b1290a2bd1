//! Per-worker body of the energy histogram kernel.
//!
//! Phases, each closed by a group barrier:
//!   zero local bins -> for each frame { bin particles -> advance frame } -> merge.

use crate::domain::{Species, UnitSystem};
use crate::histogram::{EnergyBinning, HistogramSlot};
use crate::storage::FrameSource;

use super::group::{GroupShared, Worker};
use super::LaunchCounters;

/// Everything one work-group needs, shared read-only by its workers.
pub(super) struct GroupJob<'a, S: FrameSource, const BINS: usize> {
    pub(super) storage: &'a S,
    pub(super) cell: usize,
    pub(super) slot: HistogramSlot<'a, BINS>,
    pub(super) shared: &'a GroupShared<BINS>,
    pub(super) binning: &'a EnergyBinning<BINS>,
    pub(super) species: &'a Species,
    pub(super) units: &'a UnitSystem,
    pub(super) typical_particles: f64,
    pub(super) counters: Option<&'a LaunchCounters>,
}

pub(super) fn fill_energy_histogram<S: FrameSource, const BINS: usize>(
    job: &GroupJob<'_, S, BINS>,
    worker: Worker,
) {
    let storage = job.storage;
    let shared = job.shared;

    if worker.is_master() {
        shared.publish_frame(storage.last_frame(job.cell), storage.last_frame_occupancy(job.cell));
    }
    for bin in worker.stripe(BINS) {
        shared.histogram.zero(bin);
    }
    shared.barrier.wait();

    let mut frame = shared.frame();
    if !frame.is_valid() {
        if worker.is_master() {
            if let Some(counters) = job.counters {
                counters.record_group(true);
            }
        }
        return;
    }

    let capacity = storage.frame_capacity();
    let mut binned = 0u64;
    let mut dropped = 0u64;

    while frame.is_valid() {
        let occupancy = shared.occupancy();
        let particles = storage.frame_particles(frame);

        for slot in worker.stripe(capacity) {
            if slot >= occupancy {
                break;
            }
            let particle = &particles[slot];
            let weighting = particle.weighting;
            let mass = job.species.mass(weighting);
            let energy = job.units.kinetic_energy(particle.momentum_sq(), mass) / weighting;

            match job.binning.bin_of(energy) {
                Some(bin) => {
                    shared.histogram.add(bin, weighting / job.typical_particles);
                    binned += 1;
                }
                None => dropped += 1,
            }
        }
        shared.barrier.wait();

        if worker.is_master() {
            // every frame behind the newest one is full
            shared.publish_frame(storage.previous_frame(frame), capacity);
        }
        shared.barrier.wait();
        frame = shared.frame();
    }

    for bin in worker.stripe(BINS) {
        shared.histogram.merge_bin_into(bin, &job.slot);
    }

    if let Some(counters) = job.counters {
        if worker.is_master() {
            counters.record_group(false);
        }
        counters.record_particles(binned, dropped);
    }
}
