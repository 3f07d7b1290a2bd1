//! Domain model: particles, species, units, assignment shapes.

pub mod particle;
pub mod shapes;
pub mod units;

pub use particle::{Particle, Species, ELECTRON_MASS_EV};
pub use shapes::Shape;
pub use units::UnitSystem;
