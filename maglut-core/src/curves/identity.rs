//! Plain math tables
//!
//! `V(b) = b` and `V(b) = sqrt(b)`, for firmware that cannot afford a runtime
//! square root and looks it up instead.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    errors::DomainFault,
    traits::{Curve, CurveBounds},
};

/// `V(b) = b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Identity;

/// `V(b) = sqrt(b)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SquareRoot;

impl Curve for Identity {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn evaluate(&self, b: f64) -> Result<f64, DomainFault> {
        Ok(b)
    }

    fn bounds(&self) -> CurveBounds {
        CurveBounds::UNIT
    }
}

impl Curve for SquareRoot {
    fn name(&self) -> &'static str {
        "sqrt"
    }

    fn evaluate(&self, b: f64) -> Result<f64, DomainFault> {
        if b < 0.0 {
            return Err(DomainFault::NegativeRadicand { radicand: b });
        }
        Ok(libm::sqrt(b))
    }

    fn bounds(&self) -> CurveBounds {
        CurveBounds::UNIT
    }
}
