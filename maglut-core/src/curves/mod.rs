//! Curves Mapping Sensor Codes to Table Values
//!
//! ## Overview
//!
//! Every table entry is a function of the normalized input
//! `b = code / 0x7ff`, a linear sweep over [0, 1]. This module holds the
//! formula families tables are generated from:
//!
//! | Formula          | `V(b)`                                        | Bounds        |
//! |------------------|-----------------------------------------------|---------------|
//! | `Identity`       | `b`                                           | [0, 1]        |
//! | `SquareRoot`     | `sqrt(b)`                                     | [0, 1]        |
//! | `Distance`       | `c0 + c1*sqrt(b) + c2*b`                      | from the fit  |
//! | `InverseSquare`  | `(a+1)/a * (1 - 1/sqrt(b*((a+1)^2-1) + 1))`   | [0, 1]        |
//!
//! ## Domain Safety
//!
//! Every curve must be finite on all of [0, 1]. Parameter-level problems
//! (non-positive `a`, NaN calibration) are caught by [`Curve::check`] before
//! the sweep starts; point-level problems (negative radicand, zero
//! denominator) are reported by [`Curve::evaluate`] and turned into a domain
//! error carrying the table index by the generator.
//!
//! ## Endpoints
//!
//! `InverseSquare` reaches exactly 1.0 at `b = 1`. A Q0.16 word cannot hold
//! 1.0, so tables of this curve belong in a 32-bit format with integer bits
//! to spare (Q16.16 is the usual choice).

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    errors::{DomainFault, GenerateResult},
    traits::{Curve, CurveBounds},
};

pub mod distance;
pub mod identity;
pub mod inverse_square;

pub use distance::EmpiricalDistance;
pub use identity::{Identity, SquareRoot};
pub use inverse_square::InverseSquare;

/// Formula a table is generated from
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "kind", rename_all = "kebab-case")
)]
pub enum Formula {
    /// `V(b) = b`
    Identity,
    /// `V(b) = sqrt(b)`
    #[cfg_attr(feature = "serde", serde(rename = "sqrt"))]
    SquareRoot,
    /// Empirical distance fit
    Distance(EmpiricalDistance),
    /// Parametric inverse-square curve
    InverseSquare(InverseSquare),
}

impl Formula {
    /// Name of the formula family, without parameters
    pub fn kind(&self) -> &'static str {
        self.name()
    }

    /// Distance curve with the default calibration
    pub fn distance() -> Self {
        Self::Distance(EmpiricalDistance::default())
    }

    /// Inverse-square curve for geometry constant `a`
    pub fn inverse_square(a: f64) -> Self {
        Self::InverseSquare(InverseSquare::new(a))
    }

    /// Whether the curve never decreases over [0, 1]
    ///
    /// The distance fit is monotonic when its vertex lies outside the sweep,
    /// which holds for the default calibration.
    pub fn is_monotonic(&self) -> bool {
        match self {
            Self::Identity | Self::SquareRoot | Self::InverseSquare(_) => true,
            Self::Distance(curve) => {
                let bounds = curve.bounds();
                bounds.min == curve.c0 && bounds.max == curve.c0 + curve.c1 + curve.c2
            }
        }
    }
}

impl Curve for Formula {
    fn name(&self) -> &'static str {
        match self {
            Self::Identity => Identity.name(),
            Self::SquareRoot => SquareRoot.name(),
            Self::Distance(curve) => curve.name(),
            Self::InverseSquare(curve) => curve.name(),
        }
    }

    fn evaluate(&self, b: f64) -> Result<f64, DomainFault> {
        match self {
            Self::Identity => Identity.evaluate(b),
            Self::SquareRoot => SquareRoot.evaluate(b),
            Self::Distance(curve) => curve.evaluate(b),
            Self::InverseSquare(curve) => curve.evaluate(b),
        }
    }

    fn bounds(&self) -> CurveBounds {
        match self {
            Self::Identity => Identity.bounds(),
            Self::SquareRoot => SquareRoot.bounds(),
            Self::Distance(curve) => curve.bounds(),
            Self::InverseSquare(curve) => curve.bounds(),
        }
    }

    fn check(&self) -> GenerateResult<()> {
        match self {
            Self::Identity => Identity.check(),
            Self::SquareRoot => SquareRoot.check(),
            Self::Distance(curve) => curve.check(),
            Self::InverseSquare(curve) => curve.check(),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity | Self::SquareRoot => f.write_str(self.name()),
            Self::Distance(curve) => write!(
                f,
                "distance(c0 = {}, c1 = {}, c2 = {})",
                curve.c0, curve.c1, curve.c2
            ),
            Self::InverseSquare(curve) => write!(f, "inverse-square(a = {})", curve.geometry),
        }
    }
}
