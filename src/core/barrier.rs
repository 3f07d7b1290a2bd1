//! Work-group barrier
//!
//! Every worker of a group must call `wait` the same number of times. A worker that
//! skips a barrier deadlocks the group, so kernel phases are written so that all
//! workers take the same control path between barriers.

use std::sync::Barrier;

pub struct GroupBarrier {
    inner: Barrier,
    workers: usize,
}

impl GroupBarrier {
    pub fn new(workers: usize) -> Self {
        Self {
            inner: Barrier::new(workers),
            workers,
        }
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Block until all workers of the group have arrived. Writes made before the
    /// barrier are visible to every worker after it.
    #[inline]
    pub fn wait(&self) {
        if self.workers > 1 {
            self.inner.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn single_worker_never_blocks() {
        let barrier = GroupBarrier::new(1);
        for _ in 0..3 {
            barrier.wait();
        }
        assert_eq!(barrier.workers(), 1);
    }

    #[test]
    fn no_worker_passes_before_all_arrive() {
        const WORKERS: usize = 4;
        let barrier = GroupBarrier::new(WORKERS);
        let arrived = AtomicUsize::new(0);

        thread::scope(|s| {
            for _ in 0..WORKERS {
                s.spawn(|| {
                    arrived.fetch_add(1, Ordering::Relaxed);
                    barrier.wait();
                    assert_eq!(arrived.load(Ordering::Relaxed), WORKERS);
                    // reusable: a second phase works the same way
                    barrier.wait();
                });
            }
        });
    }
}
