//! Spatial partitioning: supercell layout and averaging regions.

pub mod layout;
pub mod regions;

pub use layout::SuperCellLayout;
pub use regions::RegionMapping;
