//! Parametric inverse-square distance curve
//!
//! Models the field of a magnet falling off with distance, normalized so the
//! curve runs from 0 at `b = 0` to 1 at `b = 1`:
//!
//! ```text
//! V(b) = (a+1)/a * (1 - 1/sqrt(b*((a+1)^2 - 1) + 1))
//! ```
//!
//! `a` depends on the magnet and sensor geometry. There is no correct default;
//! values between 0.25 and 6 have been used in practice.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    errors::{DomainFault, GenerateError, GenerateResult},
    traits::{Curve, CurveBounds, Validatable},
};

/// Inverse-square curve for one magnet/sensor geometry
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InverseSquare {
    /// Geometry constant `a`, finite and positive
    #[cfg_attr(feature = "serde", serde(alias = "a"))]
    pub geometry: f64,
}

impl InverseSquare {
    /// Curve for geometry constant `a`
    pub fn new(geometry: f64) -> Self {
        Self { geometry }
    }
}

impl Curve for InverseSquare {
    fn name(&self) -> &'static str {
        "inverse-square"
    }

    fn evaluate(&self, b: f64) -> Result<f64, DomainFault> {
        let a = self.geometry;
        let radicand = b * ((a + 1.0) * (a + 1.0) - 1.0) + 1.0;
        // `!(x >= 0)` also catches NaN
        if !(radicand >= 0.0) {
            return Err(DomainFault::NegativeRadicand { radicand });
        }

        let root = libm::sqrt(radicand);
        if root == 0.0 || a == 0.0 {
            return Err(DomainFault::ZeroDenominator);
        }

        Ok((a + 1.0) / a * (1.0 - 1.0 / root))
    }

    fn bounds(&self) -> CurveBounds {
        CurveBounds::UNIT
    }

    fn check(&self) -> GenerateResult<()> {
        if !self.geometry.is_valid() || self.geometry <= 0.0 {
            return Err(GenerateError::InvalidGeometry { a: self.geometry });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_geometry_reaches_exactly_one() {
        let curve = InverseSquare::new(1.0);
        assert_eq!(curve.evaluate(1.0).unwrap(), 1.0);
        assert_eq!(curve.evaluate(0.0).unwrap(), 0.0);
    }

    #[test]
    fn midpoint_value() {
        // a = 1, b = 0.5: 2 * (1 - 1/sqrt(2.5))
        let curve = InverseSquare::new(1.0);
        let expected = 2.0 * (1.0 - 1.0 / 2.5f64.sqrt());
        assert!((curve.evaluate(0.5).unwrap() - expected).abs() < 1e-15);
    }

    #[test]
    fn geometry_must_be_positive() {
        for a in [0.0, -1.0, -0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                InverseSquare::new(a).check(),
                Err(GenerateError::InvalidGeometry { .. })
            ));
        }
        assert!(InverseSquare::new(0.25).check().is_ok());
    }

    #[test]
    fn invalid_geometry_faults_during_evaluation() {
        // a = -1 collapses the radicand to 0 at b = 1
        assert_eq!(
            InverseSquare::new(-1.0).evaluate(1.0),
            Err(DomainFault::ZeroDenominator)
        );
        // input outside the sweep drives the radicand below 0
        assert!(matches!(
            InverseSquare::new(1.0).evaluate(-1.0),
            Err(DomainFault::NegativeRadicand { .. })
        ));
        assert_eq!(
            InverseSquare::new(0.0).evaluate(0.5),
            Err(DomainFault::ZeroDenominator)
        );
    }
}
