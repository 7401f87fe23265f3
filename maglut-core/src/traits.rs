//! Core traits for curves
//!
//! A curve maps the normalized sensor input `b` in [0, 1] to the value stored
//! in a table. Keep it small - a curve is a pure function plus the checks
//! that make it safe to sweep.

use crate::errors::{DomainFault, GenerateResult};

/// Closed interval a curve maps [0, 1] onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveBounds {
    /// Smallest value taken on [0, 1]
    pub min: f64,
    /// Largest value taken on [0, 1]
    pub max: f64,
}

impl CurveBounds {
    /// Unit interval [0, 1]
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };

    /// Whether `value` lies inside the bounds, allowing `tolerance` slack on
    /// both ends for rounding in the evaluation
    pub fn contains(&self, value: f64, tolerance: f64) -> bool {
        value >= self.min - tolerance && value <= self.max + tolerance
    }
}

/// Core curve trait - implement this for each formula family
pub trait Curve {
    /// Short name used in diagnostics and generated comments
    fn name(&self) -> &'static str;

    /// Evaluate the curve at normalized input `b`
    ///
    /// Reports radicand and denominator problems. Finiteness of the result is
    /// checked by the generator for every curve alike.
    fn evaluate(&self, b: f64) -> Result<f64, DomainFault>;

    /// Range of the curve over [0, 1]
    fn bounds(&self) -> CurveBounds;

    /// Reject parameters that are invalid regardless of the input
    fn check(&self) -> GenerateResult<()> {
        Ok(())
    }
}

/// Trait for values that can be validated
pub trait Validatable {
    /// Check if the value is a usable number (not NaN, infinite)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}
