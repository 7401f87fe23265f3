//! Fixed-Point Encodings
//!
//! Scales of the unsigned fixed-point words tables are stored in.

/// Scale of the Q0.16 encoding (2^16).
///
/// Maps [0.0, 1.0) to [0, 65535]. 1.0 itself is not representable and
/// saturates to 65535.
pub const Q0_16_SCALE: f64 = 65536.0;

/// Largest value of a Q0.16 word.
pub const Q0_16_MAX: u16 = u16::MAX;

/// Maximum fractional bits of the 32-bit encoding (a pure Q0.32 word).
pub const Q32_MAX_FRAC_BITS: u8 = 32;

/// Fractional bits that leave room for values up to and including 1.0 while
/// keeping Q0.16 resolution (Q16.16).
pub const Q16_16_FRAC_BITS: u8 = 16;
