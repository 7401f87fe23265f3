//! Sensor Code Domain
//!
//! The hall-effect front end is sampled by a 12-bit ADC around a quiescent
//! midpoint, leaving 11 bits of magnitude per pole. Firmware uses that
//! magnitude directly as the table index, without bounds checks.

/// Bits of the raw sensor code used as table index.
pub const SENSOR_CODE_BITS: u32 = 11;

/// Largest raw sensor code (0x7ff).
///
/// Also the divisor that maps a code onto the normalized input `b`.
pub const SENSOR_CODE_MAX: u16 = (1 << SENSOR_CODE_BITS) - 1;

/// Entries of a firmware table (0x800), one per sensor code.
pub const TABLE_LENGTH: usize = 1 << SENSOR_CODE_BITS;

/// Shortest table that still has two distinct sweep endpoints.
pub const MIN_TABLE_LENGTH: usize = 2;

/// Longest table accepted (16-bit index space).
pub const MAX_TABLE_LENGTH: usize = 1 << 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_domain_matches_table() {
        assert_eq!(SENSOR_CODE_MAX, 0x7ff);
        assert_eq!(TABLE_LENGTH, 0x800);
        assert_eq!(TABLE_LENGTH, SENSOR_CODE_MAX as usize + 1);
    }
}
