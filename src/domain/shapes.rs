//! Particle assignment shapes
//!
//! B-spline assignment functions of order 0..3 used for particle-to-grid weighting.
//! `x` is the displacement between particle and grid node in cell units.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Nearest grid point
    Ngp,
    /// Cloud in cell
    Cic,
    /// Triangular shaped cloud
    Tsc,
    /// Piecewise cubic spline
    Pcs,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Ngp, Shape::Cic, Shape::Tsc, Shape::Pcs];

    /// Width of the region where the assignment function is non-zero, in cells.
    pub const fn support(self) -> u32 {
        match self {
            Shape::Ngp => 1,
            Shape::Cic => 2,
            Shape::Tsc => 3,
            Shape::Pcs => 4,
        }
    }

    /// Assignment function, zero outside `[-support/2, support/2)`.
    pub fn evaluate(self, x: f64) -> f64 {
        let half = self.support() as f64 * 0.5;
        // NGP is the only shape whose value at the support edge is non-zero,
        // so the half-open interval matters there.
        let inside = match self {
            Shape::Ngp => -half <= x && x < half,
            _ => x.abs() < half,
        };
        if inside {
            self.evaluate_on_support(x)
        } else {
            0.0
        }
    }

    /// Assignment function for `x` already known to lie in `[-support/2, support/2)`.
    pub fn evaluate_on_support(self, x: f64) -> f64 {
        match self {
            Shape::Ngp => 1.0,
            Shape::Cic => 1.0 - x.abs(),
            Shape::Tsc => {
                let a = x.abs();
                if a < 0.5 {
                    0.75 - x * x
                } else {
                    let d = 1.5 - a;
                    0.5 * d * d
                }
            }
            Shape::Pcs => {
                let a = x.abs();
                if a < 1.0 {
                    let a2 = a * a;
                    (4.0 - 6.0 * a2 + 3.0 * a2 * a) / 6.0
                } else {
                    let d = 2.0 - a;
                    d * d * d / 6.0
                }
            }
        }
    }

    /// Non-zero `(node, weight)` pairs for a particle at `position` (cell units,
    /// nodes on integers). The weights sum to one.
    pub fn grid_weights(self, position: f64) -> Vec<(i64, f64)> {
        let half = self.support() as f64 * 0.5;
        let first = (position - half).floor() as i64;
        let last = (position + half).ceil() as i64;
        (first..=last)
            .filter_map(|node| {
                let w = self.evaluate(position - node as f64);
                (w != 0.0).then_some((node, w))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ngp_is_half_open() {
        assert_eq!(Shape::Ngp.evaluate(-0.5), 1.0);
        assert_eq!(Shape::Ngp.evaluate(0.49), 1.0);
        assert_eq!(Shape::Ngp.evaluate(0.5), 0.0);
        assert_eq!(Shape::Ngp.evaluate_on_support(0.3), 1.0);
    }

    #[test]
    fn supports_grow_with_order() {
        let s: Vec<u32> = Shape::ALL.iter().map(|s| s.support()).collect();
        assert_eq!(s, vec![1, 2, 3, 4]);
    }

    #[test]
    fn vanish_outside_support() {
        for shape in Shape::ALL {
            let half = shape.support() as f64 * 0.5;
            assert_eq!(shape.evaluate(half + 0.01), 0.0, "{:?}", shape);
            assert_eq!(shape.evaluate(-half - 0.01), 0.0, "{:?}", shape);
        }
    }

    #[test]
    fn peak_values() {
        assert_eq!(Shape::Cic.evaluate(0.0), 1.0);
        assert_eq!(Shape::Tsc.evaluate(0.0), 0.75);
        assert!((Shape::Pcs.evaluate(0.0) - 2.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn tsc_is_continuous_at_half() {
        let inner = Shape::Tsc.evaluate(0.5 - 1e-12);
        let outer = Shape::Tsc.evaluate(0.5);
        assert!((inner - outer).abs() < 1e-9);
    }

    #[test]
    fn grid_weights_partition_unity() {
        for shape in Shape::ALL {
            for &p in &[0.0, 0.1, 0.25, 0.5, 0.73, 0.999] {
                let w = shape.grid_weights(p);
                let sum: f64 = w.iter().map(|(_, w)| w).sum();
                assert!((sum - 1.0).abs() < 1e-12, "{:?} at {}: {}", shape, p, sum);
                assert!(w.len() <= shape.support() as usize + 1);
            }
        }
    }

    #[test]
    fn ngp_picks_nearest_node() {
        assert_eq!(Shape::Ngp.grid_weights(0.3), vec![(0, 1.0)]);
        assert_eq!(Shape::Ngp.grid_weights(0.7), vec![(1, 1.0)]);
    }
}
