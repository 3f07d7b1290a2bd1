use crate::domain::Particle;

use super::{FrameHandle, FrameSource};

/// Walks a supercell's frames from newest to oldest until the invalid handle.
pub struct FrameIter<'a, S: FrameSource> {
    source: &'a S,
    next: FrameHandle,
    occupancy: usize,
}

impl<'a, S: FrameSource> FrameIter<'a, S> {
    pub(super) fn new(source: &'a S, cell: usize) -> Self {
        Self {
            source,
            next: source.last_frame(cell),
            occupancy: source.last_frame_occupancy(cell),
        }
    }

    /// Remaining valid particles, frame by frame.
    pub fn particles(self) -> impl Iterator<Item = &'a Particle> + 'a
    where
        S: 'a,
    {
        let source = self.source;
        self.flat_map(move |(frame, occupancy)| source.frame_particles(frame)[..occupancy].iter())
    }
}

impl<'a, S: FrameSource> Iterator for FrameIter<'a, S> {
    type Item = (FrameHandle, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let frame = self.next;
        let occupancy = self.occupancy;
        self.next = self.source.previous_frame(frame);
        // only the newest frame can be partially filled
        self.occupancy = self.source.frame_capacity();
        Some((frame, occupancy))
    }
}
