//! Empirical distance curve
//!
//! `V(b) = c0 + c1*sqrt(b) + c2*b`, a fit of the measured magnet distance
//! against the normalized field reading. The coefficients are calibration
//! data; the defaults belong to the original magnet/sensor pairing.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::calibration::{DISTANCE_C0, DISTANCE_C1, DISTANCE_C2},
    errors::{DomainFault, GenerateError, GenerateResult},
    traits::{Curve, CurveBounds, Validatable},
};

/// Distance curve with its calibration coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EmpiricalDistance {
    /// Constant term
    pub c0: f64,
    /// Square-root term
    pub c1: f64,
    /// Linear term
    pub c2: f64,
}

impl Default for EmpiricalDistance {
    fn default() -> Self {
        Self {
            c0: DISTANCE_C0,
            c1: DISTANCE_C1,
            c2: DISTANCE_C2,
        }
    }
}

impl EmpiricalDistance {
    /// Curve with custom calibration
    pub fn new(c0: f64, c1: f64, c2: f64) -> Self {
        Self { c0, c1, c2 }
    }

    /// Quadratic in `s = sqrt(b)`
    fn at_root(&self, s: f64) -> f64 {
        self.c0 + self.c1 * s + self.c2 * (s * s)
    }
}

impl Curve for EmpiricalDistance {
    fn name(&self) -> &'static str {
        "distance"
    }

    fn evaluate(&self, b: f64) -> Result<f64, DomainFault> {
        if b < 0.0 {
            return Err(DomainFault::NegativeRadicand { radicand: b });
        }
        Ok(self.c0 + self.c1 * libm::sqrt(b) + self.c2 * b)
    }

    fn bounds(&self) -> CurveBounds {
        // Extremes of c0 + c1*s + c2*s^2 on s in [0, 1]: the ends, plus the
        // vertex when it falls inside.
        let start = self.c0;
        let end = self.c0 + self.c1 + self.c2;
        let (mut min, mut max) = if start < end { (start, end) } else { (end, start) };

        if self.c2 != 0.0 {
            let vertex = -self.c1 / (2.0 * self.c2);
            if vertex > 0.0 && vertex < 1.0 {
                let apex = self.at_root(vertex);
                min = min.min(apex);
                max = max.max(apex);
            }
        }

        CurveBounds { min, max }
    }

    fn check(&self) -> GenerateResult<()> {
        for (name, value) in [("c0", self.c0), ("c1", self.c1), ("c2", self.c2)] {
            if !value.is_valid() {
                return Err(GenerateError::InvalidCalibration { name, value });
            }
        }
        Ok(())
    }
}
