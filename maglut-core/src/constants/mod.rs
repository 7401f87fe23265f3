//! Constants for maglut Core
//!
//! Centralized numeric constants for the table generator. Every value used by
//! more than one module lives here, with a note on where it comes from.
//!
//! ## Organization
//!
//! - **Sensor**: the 11-bit code domain the firmware indexes tables with
//! - **Calibration**: fitted curve coefficients for the magnet/sensor pairing
//! - **Fixed point**: word widths and scales of the output encodings
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Calibration values are defaults, not truths: anything that depends on
//!    the magnet or the sensor must stay overridable by the caller

/// Sensor code domain and default table geometry.
pub mod sensor;

/// Default calibration coefficients of the empirical distance curve.
pub mod calibration;

/// Fixed-point word widths and scales.
pub mod fixed_point;

pub use sensor::{SENSOR_CODE_BITS, SENSOR_CODE_MAX, TABLE_LENGTH, MIN_TABLE_LENGTH, MAX_TABLE_LENGTH};
pub use calibration::{DISTANCE_C0, DISTANCE_C1, DISTANCE_C2};
pub use fixed_point::{Q0_16_SCALE, Q32_MAX_FRAC_BITS};
