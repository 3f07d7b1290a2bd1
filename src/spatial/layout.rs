//! Supercell layout - local domain in supercells, guard band included.

use crate::core::HistogramError;

/// Supercell grid of the local domain: `core` supercells per axis surrounded by
/// `guard` supercells on both sides. Linear indices are x-fastest and include the
/// guard band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuperCellLayout {
    core: [u32; 3],
    guard: [u32; 3],
    total: [u32; 3],
    cell_count: usize,
}

impl SuperCellLayout {
    /// Fails when the guard-inclusive extent or the supercell count overflows.
    pub fn new(core: [u32; 3], guard: [u32; 3]) -> Result<Self, HistogramError> {
        let too_large = || HistogramError::LayoutTooLarge { core, guard };

        let mut total = [0u32; 3];
        for axis in 0..3 {
            total[axis] = guard[axis]
                .checked_mul(2)
                .and_then(|band| band.checked_add(core[axis]))
                .ok_or_else(too_large)?;
        }
        let cell_count = total
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n as usize))
            .ok_or_else(too_large)?;

        Ok(Self {
            core,
            guard,
            total,
            cell_count,
        })
    }

    /// Layout without guard supercells.
    pub fn without_guard(core: [u32; 3]) -> Result<Self, HistogramError> {
        Self::new(core, [0; 3])
    }

    pub fn core(&self) -> [u32; 3] { self.core }

    pub fn guard(&self) -> [u32; 3] { self.guard }

    /// Extent per axis including guards.
    pub fn total(&self) -> [u32; 3] { self.total }

    /// Number of supercells including guards.
    pub fn cell_count(&self) -> usize { self.cell_count }

    /// Number of supercells in the core (non-guard) area.
    pub fn core_cell_count(&self) -> usize {
        self.core.iter().map(|&n| n as usize).product()
    }

    /// Linear index from coordinates that include the guard offset.
    #[inline]
    pub fn linear_index(&self, coords: [u32; 3]) -> usize {
        let [nx, ny, _] = self.total;
        let [x, y, z] = coords;
        (x as usize) + (nx as usize) * ((y as usize) + (ny as usize) * (z as usize))
    }

    /// Linear index of a core supercell given core-relative coordinates.
    #[inline]
    pub fn core_linear_index(&self, core_coords: [u32; 3]) -> usize {
        self.linear_index([
            core_coords[0] + self.guard[0],
            core_coords[1] + self.guard[1],
            core_coords[2] + self.guard[2],
        ])
    }

    /// Coordinates (guard offset included) of a linear index.
    #[inline]
    pub fn coords(&self, cell: usize) -> [u32; 3] {
        let nx = self.total[0] as usize;
        let ny = self.total[1] as usize;
        let x = cell % nx;
        let y = (cell / nx) % ny;
        let z = cell / (nx * ny);
        [x as u32, y as u32, z as u32]
    }

    #[inline]
    pub fn in_bounds(&self, cell: usize) -> bool {
        cell < self.cell_count
    }

    /// True for supercells in the guard band.
    pub fn is_guard(&self, cell: usize) -> bool {
        let c = self.coords(cell);
        (0..3).any(|axis| c[axis] < self.guard[axis] || c[axis] >= self.guard[axis] + self.core[axis])
    }

    /// Linear indices of all core supercells, x-fastest.
    pub fn core_cells(&self) -> Vec<usize> {
        let mut cells = Vec::with_capacity(self.core_cell_count());
        for z in 0..self.core[2] {
            for y in 0..self.core[1] {
                for x in 0..self.core[0] {
                    cells.push(self.core_linear_index([x, y, z]));
                }
            }
        }
        cells
    }
}
