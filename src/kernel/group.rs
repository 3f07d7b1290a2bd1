//! Work-group execution - `W` workers, one barrier, group-shared memory.

use std::iter::StepBy;
use std::ops::Range;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::thread;

use crate::core::GroupBarrier;
use crate::histogram::GroupHistogram;
use crate::storage::FrameHandle;

/// Memory shared by the workers of one group. Allocated when the group starts and
/// dropped when it finishes.
pub(super) struct GroupShared<const BINS: usize> {
    pub(super) barrier: GroupBarrier,
    pub(super) histogram: GroupHistogram<BINS>,
    frame: AtomicU32,
    occupancy: AtomicUsize,
}

impl<const BINS: usize> GroupShared<BINS> {
    pub(super) fn new(workers: usize) -> Self {
        Self {
            barrier: GroupBarrier::new(workers),
            histogram: GroupHistogram::new(),
            frame: AtomicU32::new(FrameHandle::INVALID.raw()),
            occupancy: AtomicUsize::new(0),
        }
    }

    /// Master-only write; readers must be past a barrier.
    #[inline]
    pub(super) fn publish_frame(&self, frame: FrameHandle, occupancy: usize) {
        self.frame.store(frame.raw(), Ordering::Relaxed);
        self.occupancy.store(occupancy, Ordering::Relaxed);
    }

    #[inline]
    pub(super) fn frame(&self) -> FrameHandle {
        FrameHandle::from_raw(self.frame.load(Ordering::Relaxed))
    }

    #[inline]
    pub(super) fn occupancy(&self) -> usize {
        self.occupancy.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Copy, Debug)]
pub(super) struct Worker {
    index: usize,
    workers: usize,
}

impl Worker {
    #[inline]
    pub(super) fn is_master(&self) -> bool {
        self.index == 0
    }

    /// Indices `index, index + W, index + 2W, ...` below `len`.
    #[inline]
    pub(super) fn stripe(&self, len: usize) -> StepBy<Range<usize>> {
        (self.index..len).step_by(self.workers)
    }
}

/// Run `body` on every worker of a group and wait for all of them.
/// Worker 0 runs on the calling thread.
///
/// Workers block on the group barrier, so they cannot share the rayon pool: with
/// `W > 1` every call spawns `W - 1` scoped OS threads, i.e. `(W - 1) * supercells`
/// spawns per launch. Large domains should keep `W = 1` and rely on the
/// per-supercell parallelism of the launcher.
pub(super) fn execute<F>(workers: usize, body: F)
where
    F: Fn(Worker) + Sync,
{
    if workers <= 1 {
        body(Worker { index: 0, workers: 1 });
        return;
    }

    let body = &body;
    thread::scope(|s| {
        for index in 1..workers {
            s.spawn(move || body(Worker { index, workers }));
        }
        body(Worker { index: 0, workers });
    });
}
