//! Error types for host-side validation.
//!
//! The kernel itself never fails; everything that could make a launch meaningless
//! is rejected here before any work-group runs.

use std::fmt;

#[derive(Debug)]
pub enum HistogramError {
    /// Energy window is empty, inverted or not finite.
    InvalidEnergyRange { min: f64, max: f64 },
    /// Histogram has no bins.
    ZeroBins,
    /// Work-group needs at least one worker.
    ZeroWorkers,
    /// `TYPICAL_PARTICLES_PER_MACROPARTICLE` must be finite and positive.
    InvalidNormalization(f64),
    /// Species mass per real particle must be finite and positive.
    InvalidSpeciesMass(f64),
    /// Speed of light or energy unit of the unit system is not finite and positive.
    InvalidUnitSystem(&'static str),
    /// Averaging region collapsed to zero supercells along an axis.
    ZeroRegionSize { axis: usize },
    /// Supercell extent including guards does not fit the index types.
    LayoutTooLarge { core: [u32; 3], guard: [u32; 3] },
    /// Frame capacity must be at least one particle slot.
    ZeroFrameCapacity,
    /// Histogram buffer holds fewer regions than the mapping produces.
    BufferTooSmall { required: usize, available: usize },
    /// Particle storage covers a different number of supercells than the layout.
    StorageMismatch { layout_cells: usize, storage_cells: usize },
    /// Supercell index outside the storage.
    CellOutOfRange { cell: usize, cells: usize },
    /// Frame arena ran out of handles.
    ArenaFull,
    /// Particle weighting must be finite and positive.
    InvalidWeighting(f64),
    /// Particle momentum has a NaN or infinite component.
    NonFiniteMomentum,
    /// Settings JSON could not be parsed or written.
    Settings(serde_json::Error),
}

impl fmt::Display for HistogramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistogramError::InvalidEnergyRange { min, max } => {
                write!(f, "Invalid energy window [{}, {}): min must be finite and below max", min, max)
            }
            HistogramError::ZeroBins => write!(f, "Histogram must have at least one bin"),
            HistogramError::ZeroWorkers => write!(f, "Work-group must have at least one worker"),
            HistogramError::InvalidNormalization(v) => {
                write!(f, "Typical particles per macro-particle must be positive, got {}", v)
            }
            HistogramError::InvalidSpeciesMass(m) => {
                write!(f, "Species mass per particle must be positive, got {}", m)
            }
            HistogramError::InvalidUnitSystem(what) => {
                write!(f, "Unit system {} must be finite and positive", what)
            }
            HistogramError::ZeroRegionSize { axis } => {
                write!(f, "Averaging region is smaller than one supercell along axis {}", axis)
            }
            HistogramError::LayoutTooLarge { core, guard } => write!(
                f,
                "Supercell layout with core {:?} and guard {:?} is too large",
                core, guard
            ),
            HistogramError::ZeroFrameCapacity => write!(f, "Frame capacity must be at least 1"),
            HistogramError::BufferTooSmall { required, available } => write!(
                f,
                "Histogram buffer has {} regions but the region mapping needs {}",
                available, required
            ),
            HistogramError::StorageMismatch { layout_cells, storage_cells } => write!(
                f,
                "Particle storage has {} supercells but the layout has {}",
                storage_cells, layout_cells
            ),
            HistogramError::CellOutOfRange { cell, cells } => {
                write!(f, "Supercell {} out of range (storage has {})", cell, cells)
            }
            HistogramError::ArenaFull => write!(f, "Frame arena has no free frame handles"),
            HistogramError::InvalidWeighting(w) => {
                write!(f, "Particle weighting must be finite and positive, got {}", w)
            }
            HistogramError::NonFiniteMomentum => write!(f, "Particle momentum must be finite"),
            HistogramError::Settings(e) => write!(f, "Histogram settings JSON error: {}", e),
        }
    }
}

impl std::error::Error for HistogramError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistogramError::Settings(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HistogramError {
    fn from(e: serde_json::Error) -> Self {
        HistogramError::Settings(e)
    }
}
