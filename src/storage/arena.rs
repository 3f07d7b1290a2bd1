use crate::core::HistogramError;
use crate::domain::Particle;

use super::{FrameHandle, FrameSource};

#[derive(Clone, Copy, Debug)]
struct CellFrames {
    last: FrameHandle,
    last_occupancy: usize,
}

impl CellFrames {
    const EMPTY: CellFrames = CellFrames {
        last: FrameHandle::INVALID,
        last_occupancy: 0,
    };
}

/// Arena of fixed-capacity frames shared by all supercells.
///
/// Frame `f` owns slots `f * capacity .. (f + 1) * capacity` of `particles`;
/// unused slots of a partially filled frame hold `Particle::default()`.
pub struct FrameArena {
    capacity: usize,
    particles: Vec<Particle>,
    previous: Vec<FrameHandle>,
    cells: Vec<CellFrames>,
}

impl FrameArena {
    pub fn new(cell_count: usize, frame_capacity: usize) -> Result<Self, HistogramError> {
        if frame_capacity == 0 {
            return Err(HistogramError::ZeroFrameCapacity);
        }
        Ok(Self {
            capacity: frame_capacity,
            particles: Vec::new(),
            previous: Vec::new(),
            cells: vec![CellFrames::EMPTY; cell_count],
        })
    }

    /// Append a particle to a supercell. A full newest frame is kept as is and a new
    /// frame, linked to it, becomes the newest. Particles with a non-positive weighting
    /// or a non-finite momentum are refused.
    pub fn push(&mut self, cell: usize, particle: Particle) -> Result<(), HistogramError> {
        particle.validate()?;
        let cells = self.cells.len();
        let entry = *self
            .cells
            .get(cell)
            .ok_or(HistogramError::CellOutOfRange { cell, cells })?;

        let (frame, slot) = if entry.last.is_valid() && entry.last_occupancy < self.capacity {
            (entry.last, entry.last_occupancy)
        } else {
            (self.allocate_frame(entry.last)?, 0)
        };

        self.particles[frame.index() * self.capacity + slot] = particle;
        self.cells[cell] = CellFrames {
            last: frame,
            last_occupancy: slot + 1,
        };
        Ok(())
    }

    fn allocate_frame(&mut self, previous: FrameHandle) -> Result<FrameHandle, HistogramError> {
        let index = self.previous.len();
        if index >= FrameHandle::INVALID.index() {
            return Err(HistogramError::ArenaFull);
        }
        self.previous.push(previous);
        self.particles
            .resize(self.particles.len() + self.capacity, Particle::default());
        Ok(FrameHandle::from_raw(index as u32))
    }

    /// Valid particles stored for a supercell.
    pub fn particle_count(&self, cell: usize) -> usize {
        self.frames(cell).map(|(_, occupancy)| occupancy).sum()
    }

    /// Frames allocated over all supercells.
    pub fn frame_count(&self) -> usize {
        self.previous.len()
    }

    /// Drop all particles; cell count and frame capacity are kept.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.previous.clear();
        self.cells.fill(CellFrames::EMPTY);
    }
}

impl FrameSource for FrameArena {
    fn frame_capacity(&self) -> usize {
        self.capacity
    }

    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn last_frame(&self, cell: usize) -> FrameHandle {
        self.cells.get(cell).map_or(FrameHandle::INVALID, |c| c.last)
    }

    fn previous_frame(&self, frame: FrameHandle) -> FrameHandle {
        self.previous
            .get(frame.index())
            .copied()
            .unwrap_or(FrameHandle::INVALID)
    }

    fn last_frame_occupancy(&self, cell: usize) -> usize {
        self.cells.get(cell).map_or(0, |c| c.last_occupancy)
    }

    fn frame_particles(&self, frame: FrameHandle) -> &[Particle] {
        let start = frame.index() * self.capacity;
        &self.particles[start..start + self.capacity]
    }
}
