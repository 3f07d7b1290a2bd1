//! Unit system and relativistic kinetic energy.

use serde::{Deserialize, Serialize};

use crate::core::HistogramError;

/// Elementary charge in coulomb (J per eV).
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;
/// Speed of light in m/s.
pub const SPEED_OF_LIGHT_SI: f64 = 299_792_458.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitSystem {
    /// Speed of light in simulation units.
    pub speed_of_light: f64,
    /// One simulation energy unit expressed in eV.
    pub energy_unit_ev: f64,
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self::natural_ev()
    }
}

impl UnitSystem {
    /// `c = 1`; masses, momenta and energies all in eV.
    pub const fn natural_ev() -> Self {
        Self {
            speed_of_light: 1.0,
            energy_unit_ev: 1.0,
        }
    }

    /// kg, kg·m/s, J.
    pub fn si() -> Self {
        Self {
            speed_of_light: SPEED_OF_LIGHT_SI,
            energy_unit_ev: 1.0 / ELEMENTARY_CHARGE,
        }
    }

    pub fn validate(&self) -> Result<(), HistogramError> {
        if !(self.speed_of_light.is_finite() && self.speed_of_light > 0.0) {
            return Err(HistogramError::InvalidUnitSystem("speed of light"));
        }
        if !(self.energy_unit_ev.is_finite() && self.energy_unit_ev > 0.0) {
            return Err(HistogramError::InvalidUnitSystem("energy unit"));
        }
        Ok(())
    }

    #[inline]
    pub fn ev_to_energy(&self, ev: f64) -> f64 {
        ev / self.energy_unit_ev
    }

    #[inline]
    pub fn energy_to_ev(&self, energy: f64) -> f64 {
        energy * self.energy_unit_ev
    }

    /// Kinetic energy `sqrt(p²c² + m²c⁴) − mc²` of a body with momentum² `momentum_sq`
    /// and rest mass `mass`.
    ///
    /// Evaluated as `p²c² / (sqrt(p²c² + m²c⁴) + mc²)`, which is the same quantity
    /// without the cancellation of the direct form at low momentum.
    #[inline]
    pub fn kinetic_energy(&self, momentum_sq: f64, mass: f64) -> f64 {
        let c2 = self.speed_of_light * self.speed_of_light;
        let p2c2 = momentum_sq * c2;
        let rest = mass * c2;
        let total = rest.mul_add(rest, p2c2).sqrt();
        let denom = total + rest;
        if denom > 0.0 {
            p2c2 / denom
        } else {
            0.0
        }
    }

    /// Momentum magnitude of one particle of rest mass `mass` with kinetic energy `energy`.
    pub fn momentum_for_kinetic_energy(&self, energy: f64, mass: f64) -> f64 {
        let c = self.speed_of_light;
        let rest = mass * c * c;
        (energy * (energy + 2.0 * rest)).sqrt() / c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::particle::ELECTRON_MASS_EV;

    fn rel_close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1e-300)
    }

    #[test]
    fn zero_momentum_has_zero_energy() {
        let u = UnitSystem::natural_ev();
        assert_eq!(u.kinetic_energy(0.0, ELECTRON_MASS_EV), 0.0);
    }

    #[test]
    fn matches_direct_form_when_relativistic() {
        let u = UnitSystem::natural_ev();
        let m = ELECTRON_MASS_EV;
        let p: f64 = 3.0 * m;
        let direct = (p * p + m * m).sqrt() - m;
        assert!(rel_close(u.kinetic_energy(p * p, m), direct, 1e-12));
    }

    #[test]
    fn low_momentum_approaches_classical_limit() {
        let u = UnitSystem::natural_ev();
        let m = ELECTRON_MASS_EV;
        let p = 1.0e-3 * m;
        let classical = p * p / (2.0 * m);
        assert!(rel_close(u.kinetic_energy(p * p, m), classical, 1e-6));
    }

    #[test]
    fn massless_energy_is_pc() {
        let u = UnitSystem::natural_ev();
        assert!(rel_close(u.kinetic_energy(25.0, 0.0), 5.0, 1e-15));
    }

    #[test]
    fn momentum_for_kinetic_energy_inverts() {
        for units in [UnitSystem::natural_ev(), UnitSystem::si()] {
            let m = if units == UnitSystem::natural_ev() { ELECTRON_MASS_EV } else { 9.109_383_7e-31 };
            let target = units.ev_to_energy(60.0);
            let p = units.momentum_for_kinetic_energy(target, m);
            assert!(rel_close(units.kinetic_energy(p * p, m), target, 1e-9));
        }
    }

    #[test]
    fn si_energy_conversion() {
        let u = UnitSystem::si();
        assert!(rel_close(u.energy_to_ev(ELEMENTARY_CHARGE), 1.0, 1e-15));
        assert!(u.validate().is_ok());
    }

    #[test]
    fn rejects_zero_speed_of_light() {
        let u = UnitSystem { speed_of_light: 0.0, energy_unit_ev: 1.0 };
        assert!(u.validate().is_err());
    }
}
