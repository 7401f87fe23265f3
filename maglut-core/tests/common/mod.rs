//! Common test utilities for integration tests
//!
//! This module provides:
//! - The formula set every property is checked against
//! - Dense sampling of the unit interval
//! - Format helpers

#![allow(dead_code)]

use maglut_core::{
    constants::calibration::GEOMETRY_CANDIDATES,
    EmpiricalDistance, Formula, NumericFormat,
};

/// Points of the dense sweep used for bound checks
pub const DENSE_SAMPLES: usize = 10_001;

/// Slack allowed on curve bounds for floating point evaluation
pub const BOUNDS_TOLERANCE: f64 = 1e-12;

/// Every formula family, with each geometry constant that has been tried in
/// practice for the inverse-square curve
pub fn all_formulas() -> Vec<Formula> {
    let mut formulas = vec![
        Formula::Identity,
        Formula::SquareRoot,
        Formula::Distance(EmpiricalDistance::default()),
    ];
    formulas.extend(GEOMETRY_CANDIDATES.iter().map(|&a| Formula::inverse_square(a)));
    formulas
}

/// Evenly spaced points on [0, 1], both ends included
pub fn dense_unit_interval(points: usize) -> impl Iterator<Item = f64> {
    (0..points).map(move |i| i as f64 / (points - 1) as f64)
}

/// Fixed-point formats tables are commonly stored in
pub fn fixed_formats() -> [NumericFormat; 3] {
    [
        NumericFormat::Q0_16,
        NumericFormat::Q16_16,
        NumericFormat::Q32 { frac_bits: 31 },
    ]
}
