//! Region Mapping - supercell index to averaging region index.
//!
//! `region = (coords - guard) / region_size` per axis, integer division. When the
//! averaging region is not a whole number of supercells the size is truncated;
//! that is kept as-is and only reported (see `from_cells`).

use log::warn;

use crate::core::HistogramError;

use super::layout::SuperCellLayout;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionMapping {
    layout: SuperCellLayout,
    region_size: [u32; 3],
    regions: [u32; 3],
    region_count: usize,
}

impl RegionMapping {
    /// Mapping with `region_size` supercells per averaging region along each axis.
    pub fn new(layout: SuperCellLayout, region_size: [u32; 3]) -> Result<Self, HistogramError> {
        if let Some(axis) = region_size.iter().position(|&n| n == 0) {
            return Err(HistogramError::ZeroRegionSize { axis });
        }

        let core = layout.core();
        let regions = [
            core[0].div_ceil(region_size[0]),
            core[1].div_ceil(region_size[1]),
            core[2].div_ceil(region_size[2]),
        ];
        let region_count = regions.iter().map(|&n| n as usize).product();

        Ok(Self {
            layout,
            region_size,
            regions,
            region_count,
        })
    }

    /// Mapping from an averaging region given in cells and the supercell size in cells.
    ///
    /// The region size in supercells is `averaging_region_cells / supercell_size`,
    /// truncated. A warning is logged for every axis where the division is inexact.
    pub fn from_cells(
        layout: SuperCellLayout,
        averaging_region_cells: [u32; 3],
        supercell_size: [u32; 3],
    ) -> Result<Self, HistogramError> {
        let mut region_size = [0u32; 3];
        for axis in 0..3 {
            if supercell_size[axis] == 0 {
                return Err(HistogramError::ZeroRegionSize { axis });
            }
            region_size[axis] = averaging_region_cells[axis] / supercell_size[axis];
            if averaging_region_cells[axis] % supercell_size[axis] != 0 {
                warn!(
                    "averaging region of {} cells is not a multiple of the supercell size {} along axis {}; using {} supercells",
                    averaging_region_cells[axis], supercell_size[axis], axis, region_size[axis]
                );
            }
        }
        Self::new(layout, region_size)
    }

    pub fn layout(&self) -> &SuperCellLayout { &self.layout }

    /// Supercells per averaging region along each axis.
    pub fn region_size(&self) -> [u32; 3] { self.region_size }

    /// Averaging regions along each axis.
    pub fn regions_per_axis(&self) -> [u32; 3] { self.regions }

    pub fn region_count(&self) -> usize { self.region_count }

    /// Averaging region of a supercell (linear index including guards).
    /// Guard supercells and out-of-range indices belong to no region.
    #[inline]
    pub fn region_of(&self, cell: usize) -> Option<usize> {
        if !self.layout.in_bounds(cell) {
            return None;
        }
        let coords = self.layout.coords(cell);
        let guard = self.layout.guard();
        let core = self.layout.core();

        let mut region = [0usize; 3];
        for axis in 0..3 {
            let local = coords[axis].checked_sub(guard[axis])?;
            if local >= core[axis] {
                return None;
            }
            region[axis] = (local / self.region_size[axis]) as usize;
        }

        let [rx, ry, _] = self.regions;
        Some(region[0] + (rx as usize) * (region[1] + (ry as usize) * region[2]))
    }

    /// Supercells that get a work-group: the whole core area.
    pub fn launch_cells(&self) -> Vec<usize> {
        self.layout.core_cells()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtracts_guard_before_dividing() {
        let layout = SuperCellLayout::new([4, 2, 1], [1, 1, 0]).unwrap();
        let mapping = RegionMapping::new(layout, [2, 2, 1]).unwrap();
        assert_eq!(mapping.regions_per_axis(), [2, 1, 1]);

        assert_eq!(mapping.region_of(layout.linear_index([1, 1, 0])), Some(0));
        assert_eq!(mapping.region_of(layout.linear_index([2, 2, 0])), Some(0));
        assert_eq!(mapping.region_of(layout.linear_index([3, 1, 0])), Some(1));
        assert_eq!(mapping.region_of(layout.linear_index([4, 2, 0])), Some(1));
    }

    #[test]
    fn guard_cells_have_no_region() {
        let layout = SuperCellLayout::new([4, 2, 1], [1, 1, 0]).unwrap();
        let mapping = RegionMapping::new(layout, [2, 2, 1]).unwrap();
        assert_eq!(mapping.region_of(layout.linear_index([0, 1, 0])), None);
        assert_eq!(mapping.region_of(layout.linear_index([5, 1, 0])), None);
        assert_eq!(mapping.region_of(layout.cell_count()), None);
    }

    #[test]
    fn partial_last_region_is_counted() {
        let layout = SuperCellLayout::without_guard([5, 1, 1]).unwrap();
        let mapping = RegionMapping::new(layout, [2, 1, 1]).unwrap();
        assert_eq!(mapping.region_count(), 3);
        assert_eq!(mapping.region_of(4), Some(2));
    }

    #[test]
    fn from_cells_truncates_region_size() {
        let layout = SuperCellLayout::without_guard([8, 8, 8]).unwrap();
        let mapping = RegionMapping::from_cells(layout, [20, 16, 8], [8, 8, 4]).unwrap();
        assert_eq!(mapping.region_size(), [2, 2, 2]);
    }

    #[test]
    fn region_smaller_than_supercell_is_rejected() {
        let layout = SuperCellLayout::without_guard([8, 8, 8]).unwrap();
        let err = RegionMapping::from_cells(layout, [4, 16, 8], [8, 8, 4]).unwrap_err();
        assert!(matches!(err, HistogramError::ZeroRegionSize { axis: 0 }));
    }

    #[test]
    fn every_core_cell_maps_into_range() {
        let layout = SuperCellLayout::new([5, 3, 2], [1, 1, 1]).unwrap();
        let mapping = RegionMapping::new(layout, [2, 2, 2]).unwrap();
        for cell in mapping.launch_cells() {
            let region = mapping.region_of(cell).unwrap();
            assert!(region < mapping.region_count());
        }
    }

    #[test]
    fn region_larger_than_domain_is_one_region() {
        let layout = SuperCellLayout::new([4, 2, 1], [1, 1, 0]).unwrap();
        let mapping = RegionMapping::new(layout, [u32::MAX, u32::MAX, 7]).unwrap();
        assert_eq!(mapping.regions_per_axis(), [1, 1, 1]);
        assert_eq!(mapping.region_count(), 1);
        assert!(mapping.launch_cells().iter().all(|&c| mapping.region_of(c) == Some(0)));

        let from_cells = RegionMapping::from_cells(layout, [u32::MAX, 2, 1], [1, 1, 1]).unwrap();
        assert_eq!(from_cells.region_count(), 1);
    }
}
