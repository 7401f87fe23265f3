//! Core table generator for maglut
//!
//! Precomputes the lookup tables a hall-effect sensor firmware indexes with
//! its raw 11-bit code: magnet distance curves and square-root tables, in
//! fixed point or float, emitted as C array initializers.
//!
//! Key constraints:
//! - Tables are exactly what the firmware reads: 0x800 entries, index = code
//! - Every entry is checked finite before anything is emitted
//! - Out-of-range values saturate with a warning, never wrap
//!
//! ```no_run
//! use maglut_core::{generate_table, CArray, CHeader, Formula, NumericFormat};
//!
//! let table = generate_table(Formula::SquareRoot, NumericFormat::Q0_16, 0x800)?;
//!
//! let mut header = CHeader::new();
//! header.include("<stdint.h>").push(CArray::new("lookup_sqrt", table)?);
//! print!("{}", header.render());
//! # Ok::<(), maglut_core::GenerateError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

pub mod constants;
pub mod curves;
pub mod emit;
pub mod encoding;
pub mod errors;
pub mod lookup;
pub mod table;
pub mod traits;

// Public API
pub use curves::{EmpiricalDistance, Formula, Identity, InverseSquare, SquareRoot};
pub use emit::{CArray, CHeader};
pub use encoding::{EncodedValue, NumericFormat, Rounding};
pub use errors::{DomainFault, GenerateError, GenerateResult};
pub use table::{generate_table, generate_table_with, ClampEvent, Table, TableOptions};
pub use traits::{Curve, CurveBounds};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
