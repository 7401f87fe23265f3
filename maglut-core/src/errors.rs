//! Error Types for Table Generation
//!
//! ## Design Philosophy
//!
//! Errors are `Copy` and carry no heap data, so the same types work on the
//! host generator and in `no_std` builds of the core. Each variant carries
//! enough context to name the offending formula, parameter and index without
//! a second query.
//!
//! ## Error Categories
//!
//! ### Domain Errors
//! - `Domain`: a formula is undefined at some `b` in [0, 1] for the supplied
//!   parameters (negative radicand, zero denominator, NaN or infinity).
//!   Generation aborts; no partial table is returned.
//!
//! ### Configuration Errors
//! - `InvalidLength`, `InvalidGeometry`, `InvalidCalibration`,
//!   `InvalidFractionBits`, `InvalidIdentifier`: rejected before the first
//!   sample is computed.
//!
//! Range overflow is not an error. Values outside a fixed-point format are
//! clamped and reported as [`ClampEvent`](crate::table::ClampEvent)s on the
//! table.
//!
//! ```rust
//! use maglut_core::{generate_table, Formula, GenerateError, InverseSquare, NumericFormat};
//!
//! let formula = Formula::InverseSquare(InverseSquare::new(-1.0));
//! match generate_table(formula, NumericFormat::Q32 { frac_bits: 16 }, 2048) {
//!     Err(GenerateError::InvalidGeometry { a }) => assert_eq!(a, -1.0),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use thiserror_no_std::Error;

use crate::curves::Formula;

/// Result type for generation operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Why a formula could not be evaluated at one point
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DomainFault {
    /// Square root of a negative number
    #[error("negative radicand {radicand}")]
    NegativeRadicand {
        /// The value that would have been passed to `sqrt`
        radicand: f64,
    },

    /// Division by zero
    #[error("zero denominator")]
    ZeroDenominator,

    /// Result is NaN or infinite
    #[error("non-finite result {value}")]
    NonFinite {
        /// The offending result
        value: f64,
    },
}

/// Table generation errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GenerateError {
    /// Formula undefined for some input of the sweep
    #[error("{formula}: {fault} at index {index} (b = {b})")]
    Domain {
        /// Formula with the parameters in use
        formula: Formula,
        /// Table index of the failing sample
        index: usize,
        /// Normalized input of the failing sample
        b: f64,
        /// What went wrong
        fault: DomainFault,
    },

    /// Table length outside the supported range
    #[error("Table length {length} outside [{min}, {max}]")]
    InvalidLength {
        /// Requested length
        length: usize,
        /// Shortest accepted length
        min: usize,
        /// Longest accepted length
        max: usize,
    },

    /// Geometry constant of the inverse-square curve is not a positive real
    #[error("Geometry constant a = {a} must be finite and positive")]
    InvalidGeometry {
        /// Supplied geometry constant
        a: f64,
    },

    /// Calibration coefficient is NaN or infinite
    #[error("Calibration coefficient {name} = {value} is not finite")]
    InvalidCalibration {
        /// Coefficient name (`c0`, `c1`, `c2`)
        name: &'static str,
        /// Supplied value
        value: f64,
    },

    /// More fractional bits than the 32-bit word holds
    #[error("{bits} fractional bits do not fit a 32-bit word")]
    InvalidFractionBits {
        /// Requested fractional bits
        bits: u8,
    },

    /// Array name or element type is not a C identifier
    #[error("Invalid C identifier for {what}")]
    InvalidIdentifier {
        /// Which part of the declaration was rejected
        what: &'static str,
    },
}

impl GenerateError {
    /// True for errors raised before any sample was computed
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Domain { .. })
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DomainFault {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NegativeRadicand { radicand } =>
                defmt::write!(fmt, "negative radicand {}", radicand),
            Self::ZeroDenominator =>
                defmt::write!(fmt, "zero denominator"),
            Self::NonFinite { value } =>
                defmt::write!(fmt, "non-finite result {}", value),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for GenerateError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Domain { formula, index, b, fault } =>
                defmt::write!(fmt, "{}: {} at index {} (b = {})", formula.kind(), fault, index, b),
            Self::InvalidLength { length, min, max } =>
                defmt::write!(fmt, "Length {} outside [{}, {}]", length, min, max),
            Self::InvalidGeometry { a } =>
                defmt::write!(fmt, "Invalid geometry a = {}", a),
            Self::InvalidCalibration { name, value } =>
                defmt::write!(fmt, "Calibration {} = {} not finite", name, value),
            Self::InvalidFractionBits { bits } =>
                defmt::write!(fmt, "{} fractional bits exceed 32", bits),
            Self::InvalidIdentifier { what } =>
                defmt::write!(fmt, "Invalid C identifier for {}", what),
        }
    }
}
