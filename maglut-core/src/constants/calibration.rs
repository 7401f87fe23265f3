//! Distance Curve Calibration
//!
//! Coefficients of `V(b) = c0 + c1*sqrt(b) + c2*b`, fitted to the measured
//! response of one magnet/sensor pairing. They are opaque data: a different
//! magnet or sensor needs a new fit, not a tweak.
//!
//! Source: least-squares fit from the original hardware bring-up

/// Constant term of the distance curve.
pub const DISTANCE_C0: f64 = 0.07388;

/// Square-root term of the distance curve.
pub const DISTANCE_C1: f64 = 1.33082;

/// Linear term of the distance curve.
pub const DISTANCE_C2: f64 = -0.41212;

/// Magnet geometry constants the inverse-square curve has been tried with.
///
/// None of them is a correct default; the right one depends on the magnet and
/// sensor in use and must be supplied explicitly.
pub const GEOMETRY_CANDIDATES: [f64; 8] = [0.25, 0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
