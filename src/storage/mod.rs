//! Particle storage - per-supercell linked lists of fixed-capacity frames.
//!
//! The kernel only talks to storage through `FrameSource`. `FrameArena` is the
//! in-crate implementation: frames live in one arena and link to their
//! predecessor by handle instead of by pointer.

mod arena;
mod frames;

pub use arena::FrameArena;
pub use frames::FrameIter;

use crate::domain::Particle;

/// Index of a frame in its arena. `FrameHandle::INVALID` terminates a frame list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u32);

impl FrameHandle {
    pub const INVALID: FrameHandle = FrameHandle(u32::MAX);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        FrameHandle(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Read access to frame-organised particle storage.
///
/// Implementations must return slices of exactly `frame_capacity()` particles from
/// `frame_particles`; only the first `occupancy` slots of a cell's newest frame
/// are meaningful, every older frame is full.
pub trait FrameSource: Sync {
    fn frame_capacity(&self) -> usize;

    /// Number of supercells (guards included).
    fn cell_count(&self) -> usize;

    /// Newest frame of a supercell, `FrameHandle::INVALID` when it has none.
    fn last_frame(&self, cell: usize) -> FrameHandle;

    /// Frame preceding `frame` in its supercell, `FrameHandle::INVALID` at the end.
    fn previous_frame(&self, frame: FrameHandle) -> FrameHandle;

    /// Valid slots in the newest frame of a supercell.
    fn last_frame_occupancy(&self, cell: usize) -> usize;

    fn frame_particles(&self, frame: FrameHandle) -> &[Particle];

    /// Frames of a supercell, newest first, with their occupancy.
    fn frames(&self, cell: usize) -> FrameIter<'_, Self>
    where
        Self: Sized,
    {
        FrameIter::new(self, cell)
    }
}
