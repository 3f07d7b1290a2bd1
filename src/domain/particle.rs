use serde::{Deserialize, Serialize};

use crate::core::HistogramError;

/// One macro-particle slot as seen by the histogram kernel.
///
/// `momentum` is the momentum of the whole macro-particle, i.e. `weighting` times the
/// momentum of one real particle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub momentum: [f64; 3],
    pub weighting: f64,
}

impl Particle {
    pub fn new(momentum: [f64; 3], weighting: f64) -> Self {
        Self { momentum, weighting }
    }

    /// Weighting must be finite and positive, momentum finite.
    pub fn validate(&self) -> Result<(), HistogramError> {
        if !(self.weighting.is_finite() && self.weighting > 0.0) {
            return Err(HistogramError::InvalidWeighting(self.weighting));
        }
        if !self.momentum.iter().all(|p| p.is_finite()) {
            return Err(HistogramError::NonFiniteMomentum);
        }
        Ok(())
    }

    #[inline]
    pub fn momentum_sq(&self) -> f64 {
        let [px, py, pz] = self.momentum;
        pz.mul_add(pz, py.mul_add(py, px * px))
    }
}

/// Species constants the kernel needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub name: String,
    /// Rest mass of one real particle, in simulation mass units.
    pub mass_per_particle: f64,
}

impl Species {
    pub fn new(name: impl Into<String>, mass_per_particle: f64) -> Result<Self, HistogramError> {
        let species = Self {
            name: name.into(),
            mass_per_particle,
        };
        species.validate()?;
        Ok(species)
    }

    /// Electrons in natural eV units (`c = 1`, mass in eV).
    pub fn electron_ev() -> Self {
        Self {
            name: "e".to_string(),
            mass_per_particle: ELECTRON_MASS_EV,
        }
    }

    pub fn validate(&self) -> Result<(), HistogramError> {
        if self.mass_per_particle.is_finite() && self.mass_per_particle > 0.0 {
            Ok(())
        } else {
            Err(HistogramError::InvalidSpeciesMass(self.mass_per_particle))
        }
    }

    /// Rest mass of a macro-particle carrying `weighting` real particles.
    #[inline]
    pub fn mass(&self, weighting: f64) -> f64 {
        self.mass_per_particle * weighting
    }
}

/// Electron rest energy in eV.
pub const ELECTRON_MASS_EV: f64 = 510_998.950_00;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mass_scales_with_weighting() {
        let s = Species::new("ion", 2.0).unwrap();
        assert_eq!(s.mass(3.0), 6.0);
    }

    #[test]
    fn rejects_non_positive_mass() {
        assert!(Species::new("bad", 0.0).is_err());
        assert!(Species::new("bad", f64::NAN).is_err());
    }

    #[test]
    fn momentum_sq_sums_components() {
        let p = Particle::new([1.0, 2.0, 2.0], 1.0);
        assert_eq!(p.momentum_sq(), 9.0);
    }

    #[test]
    fn validate_requires_positive_weighting_and_finite_momentum() {
        assert!(Particle::new([0.0; 3], 1.0).validate().is_ok());
        assert!(Particle::new([0.0; 3], -2.0).validate().is_err());
        assert!(Particle::new([0.0; 3], f64::NAN).validate().is_err());
        assert!(Particle::new([0.0, f64::NAN, 0.0], 1.0).validate().is_err());
    }
}
