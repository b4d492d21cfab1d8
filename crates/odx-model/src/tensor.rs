//! Symmetric stress tensor and principal-value computation.

use serde::{Deserialize, Serialize};

/// Stress tensor components in Voigt notation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StressTensor {
    /// Normal component XX
    pub xx: f64,
    /// Normal component YY
    pub yy: f64,
    /// Normal component ZZ
    pub zz: f64,
    /// Shear component XY
    pub xy: f64,
    /// Shear component YZ
    pub yz: f64,
    /// Shear component XZ
    pub xz: f64,
}

/// Principal stresses (eigenvalues of the tensor), sorted descending
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Principal {
    /// Maximum principal value
    pub max: f64,
    /// Middle principal value
    pub mid: f64,
    /// Minimum principal value
    pub min: f64,
}

impl StressTensor {
    /// Compute the principal values of the tensor.
    ///
    /// Solves the characteristic equation det(T - λI) = 0 for the
    /// symmetric 3×3 matrix via the tensor invariants, using the
    /// trigonometric method which yields three real roots.
    pub fn principal_values(&self) -> Principal {
        // Diagonal tensor: eigenvalues are the diagonal entries
        let shear_norm = self.xy.abs() + self.yz.abs() + self.xz.abs();
        if shear_norm < 1e-10 {
            return sorted_principal([self.xx, self.yy, self.zz]);
        }

        // Invariants of the tensor
        // | xx  xy  xz |
        // | xy  yy  yz |
        // | xz  yz  zz |
        let i1 = self.xx + self.yy + self.zz;
        let i2 = self.xx * self.yy + self.yy * self.zz + self.zz * self.xx
            - self.xy.powi(2)
            - self.yz.powi(2)
            - self.xz.powi(2);
        let i3 = self.xx * self.yy * self.zz + 2.0 * self.xy * self.yz * self.xz
            - self.xx * self.yz.powi(2)
            - self.yy * self.xz.powi(2)
            - self.zz * self.xy.powi(2);

        // λ³ - I₁λ² + I₂λ - I₃ = 0, depressed with p, q
        let p = i2 - i1.powi(2) / 3.0;
        let q = 2.0 * i1.powi(3) / 27.0 - i1 * i2 / 3.0 + i3;

        // Degenerate case: triple root
        if p.abs() < 1e-14 {
            let lambda = i1 / 3.0;
            return Principal {
                max: lambda,
                mid: lambda,
                min: lambda,
            };
        }

        let theta = ((-q / 2.0) / ((-p / 3.0).powf(1.5))).acos();
        let k = 2.0 * (-p / 3.0).sqrt();

        sorted_principal([
            k * (theta / 3.0).cos() + i1 / 3.0,
            k * ((theta + 2.0 * std::f64::consts::PI) / 3.0).cos() + i1 / 3.0,
            k * ((theta + 4.0 * std::f64::consts::PI) / 3.0).cos() + i1 / 3.0,
        ])
    }
}

fn sorted_principal(mut values: [f64; 3]) -> Principal {
    values.sort_by(|a, b| b.partial_cmp(a).unwrap());
    Principal {
        max: values[0],
        mid: values[1],
        min: values[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_uniaxial_tension() {
        let stress = StressTensor {
            xx: 100.0,
            ..Default::default()
        };
        let p = stress.principal_values();
        assert!((p.max - 100.0).abs() < 1e-9);
        assert!(p.mid.abs() < 1e-9);
        assert!(p.min.abs() < 1e-9);
    }

    #[test]
    fn principal_sum_equals_trace() {
        let stress = StressTensor {
            xx: 100.0,
            yy: 50.0,
            zz: 25.0,
            xy: 10.0,
            yz: 5.0,
            xz: 2.0,
        };
        let p = stress.principal_values();
        let trace = stress.xx + stress.yy + stress.zz;
        assert!((p.max + p.mid + p.min - trace).abs() < 1e-6);
        assert!(p.max >= p.mid && p.mid >= p.min);
    }

    #[test]
    fn principal_hydrostatic_triple_root() {
        let stress = StressTensor {
            xx: -7.0,
            yy: -7.0,
            zz: -7.0,
            ..Default::default()
        };
        let p = stress.principal_values();
        assert!((p.max + 7.0).abs() < 1e-9);
        assert!((p.min + 7.0).abs() < 1e-9);
    }

    #[test]
    fn principal_pure_shear() {
        // Pure shear τ_xy: eigenvalues are (τ, 0, -τ)
        let stress = StressTensor {
            xy: 30.0,
            ..Default::default()
        };
        let p = stress.principal_values();
        assert!((p.max - 30.0).abs() < 1e-6);
        assert!(p.mid.abs() < 1e-6);
        assert!((p.min + 30.0).abs() < 1e-6);
    }
}
