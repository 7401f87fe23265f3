//! Firmware-Side Table Access
//!
//! ## Motivation
//!
//! The firmware indexes generated tables directly with the 11-bit sensor code
//! and trusts the domain: no bounds check, no interpolation, O(1).
//!
//! ```text
//! Operation                  | Cortex-M4 (no FPU use)
//! ---------------------------|-----------------------
//! sqrtf(y)                   | ~100s of cycles
//! lookup_sqrt[(u16)(y*0x7ff)]| a multiply and a load
//! ```
//!
//! This module reproduces that access pattern on the host so tables can be
//! checked the way the firmware will read them:
//!
//! - [`Table::get`]: plain indexed read, `None` past the end
//! - [`Table::at`]: indexed read clamping out-of-domain codes to the last entry
//! - [`Table::lookup_normalized`]: `table[(uint16_t)(y * 0x7ff)]`, truncating,
//!   exactly as the firmware computes the index from a normalized reading
//! - [`Table::interpolate`]: linear interpolation between neighbouring
//!   entries, to measure what a finer table would gain
//!
//! ## Accuracy
//!
//! Truncating the index costs up to one table step, i.e. `1/2047` in `b`.
//! For the square-root table this error is largest near 0 where the slope
//! is steepest.

use crate::{encoding::EncodedValue, table::Table};

impl Table {
    /// Entry for `code`, if inside the table
    pub fn get(&self, code: u16) -> Option<EncodedValue> {
        self.values().get(code as usize).copied()
    }

    /// Entry for `code`, clamped to the last entry
    pub fn at(&self, code: u16) -> EncodedValue {
        let (index, clamped) = self.clamp_index(code as usize);
        if clamped {
            log_warn!("Table lookup: code {} clamped to {}", code, index);
        }
        self.values()[index]
    }

    /// Entry for a normalized reading `y` in [0, 1]
    ///
    /// The index is `(y * (len - 1))` truncated toward zero, as the firmware
    /// computes it. Readings outside [0, 1] (and NaN) are clamped.
    pub fn lookup_normalized(&self, y: f32) -> EncodedValue {
        let (y, clamped) = clamp_unit(y);
        if clamped {
            log_warn!("Table lookup: reading clamped to {}", y);
        }
        let index = (y * self.last_index() as f32) as usize;
        self.values()[self.clamp_index(index).0]
    }

    /// Linearly interpolated real value at normalized input `b`
    pub fn interpolate(&self, b: f64) -> f64 {
        let b = if b.is_nan() { 0.0 } else { b.max(0.0).min(1.0) };
        let position = b * self.last_index() as f64;
        let index = position as usize;
        let frac = position - index as f64;

        let base = self.format().decode(self.values()[index]);
        if index + 1 < self.len() {
            let next = self.format().decode(self.values()[index + 1]);
            base + (next - base) * frac
        } else {
            base
        }
    }

    fn last_index(&self) -> usize {
        self.len() - 1
    }

    fn clamp_index(&self, index: usize) -> (usize, bool) {
        if index > self.last_index() {
            (self.last_index(), true)
        } else {
            (index, false)
        }
    }
}

/// Clamp a reading to [0, 1], NaN to 0
fn clamp_unit(y: f32) -> (f32, bool) {
    if y.is_nan() || y < 0.0 {
        (0.0, true)
    } else if y > 1.0 {
        (1.0, true)
    } else {
        (y, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::sensor::{SENSOR_CODE_MAX, TABLE_LENGTH},
        curves::Formula,
        encoding::NumericFormat,
        table::generate_table,
    };

    fn sqrt_table() -> Table {
        generate_table(Formula::SquareRoot, NumericFormat::Q0_16, TABLE_LENGTH).unwrap()
    }

    #[test]
    fn code_indexes_table_directly() {
        let table = sqrt_table();
        assert_eq!(table.get(0), Some(EncodedValue::U16(0)));
        assert_eq!(table.get(SENSOR_CODE_MAX), Some(EncodedValue::U16(65535)));
        assert_eq!(table.get(SENSOR_CODE_MAX + 1), None);
    }

    #[test]
    fn out_of_domain_code_clamps() {
        let table = sqrt_table();
        assert_eq!(table.at(0x900), table.at(SENSOR_CODE_MAX));
    }

    #[test]
    fn normalized_lookup_truncates_index() {
        let table = sqrt_table();
        // 0.5 * 2047 = 1023.5 -> 1023
        assert_eq!(table.lookup_normalized(0.5), table.at(1023));
        assert_eq!(table.lookup_normalized(1.0), table.at(SENSOR_CODE_MAX));
    }

    #[test]
    fn normalized_lookup_clamps_readings() {
        let table = sqrt_table();
        assert_eq!(table.lookup_normalized(-0.5), table.at(0));
        assert_eq!(table.lookup_normalized(1.5), table.at(SENSOR_CODE_MAX));
        assert_eq!(table.lookup_normalized(f32::NAN), table.at(0));
    }

    #[test]
    fn interpolation_between_entries() {
        let table = generate_table(Formula::Identity, NumericFormat::F64, 3).unwrap();
        assert_eq!(table.interpolate(0.25), 0.25);
        assert_eq!(table.interpolate(1.0), 1.0);
        assert_eq!(table.interpolate(2.0), 1.0);
    }
}
