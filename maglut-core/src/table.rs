//! Table Generator
//!
//! One stateless pass over the index domain:
//!
//! ```text
//! validate config ──► for i in 0..N: b = i/(N-1) ──► V(b) ──► finite? ──► encode ──► Table
//!                                                              │            │
//!                                                           Domain       clamp?
//!                                                           error        warn + record
//! ```
//!
//! Configuration problems are reported before the first sample is computed,
//! and a domain error aborts the whole table, so a caller never sees a
//! partially valid table. Clamping is not fatal: the table is returned with
//! the list of clamped indices and a warning is logged.

use alloc::vec::Vec;

use crate::{
    constants::sensor::{MAX_TABLE_LENGTH, MIN_TABLE_LENGTH},
    curves::Formula,
    encoding::{EncodedValue, NumericFormat, Rounding},
    errors::{DomainFault, GenerateError, GenerateResult},
    traits::{Curve, Validatable},
};

/// Knobs that do not change which values are computed, only how they are
/// stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableOptions {
    /// Rounding into fixed-point words
    pub rounding: Rounding,
}

/// A sample that did not fit the target format
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampEvent {
    /// Table index
    pub index: usize,
    /// Value before saturation
    pub value: f64,
}

/// A generated, immutable table
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    formula: Formula,
    format: NumericFormat,
    rounding: Rounding,
    values: Vec<EncodedValue>,
    clamps: Vec<ClampEvent>,
}

/// Normalized input of table index `index` in a table of `length` entries
///
/// Exactly 0 at the first and exactly 1 at the last index: `(n-1)/(n-1)` is
/// exact in IEEE arithmetic.
pub fn normalized_input(index: usize, length: usize) -> f64 {
    index as f64 / (length - 1) as f64
}

/// Iterate `(index, b)` over a table of `length` entries
pub fn sweep(length: usize) -> impl Iterator<Item = (usize, f64)> {
    (0..length).map(move |index| (index, normalized_input(index, length)))
}

/// Reject table lengths outside [MIN_TABLE_LENGTH, MAX_TABLE_LENGTH]
pub fn check_length(length: usize) -> GenerateResult<()> {
    if !(MIN_TABLE_LENGTH..=MAX_TABLE_LENGTH).contains(&length) {
        return Err(GenerateError::InvalidLength {
            length,
            min: MIN_TABLE_LENGTH,
            max: MAX_TABLE_LENGTH,
        });
    }
    Ok(())
}

/// Generate a table with default options (round half to even)
pub fn generate_table(
    formula: Formula,
    format: NumericFormat,
    length: usize,
) -> GenerateResult<Table> {
    generate_table_with(formula, format, length, TableOptions::default())
}

/// Generate a table
pub fn generate_table_with(
    formula: Formula,
    format: NumericFormat,
    length: usize,
    options: TableOptions,
) -> GenerateResult<Table> {
    check_length(length)?;
    format.check()?;
    formula.check()?;

    let mut values = Vec::with_capacity(length);
    let mut clamps = Vec::new();

    for (index, b) in sweep(length) {
        let domain_error = |fault| GenerateError::Domain { formula, index, b, fault };

        let value = formula.evaluate(b).map_err(domain_error)?;
        if !value.is_valid() {
            return Err(domain_error(DomainFault::NonFinite { value }));
        }

        let encoded = format.encode(value, options.rounding);
        if encoded.clamped {
            log_debug!("{}: sample {} ({}) clamped to {}", formula, index, value, encoded.value);
            clamps.push(ClampEvent { index, value });
        }
        values.push(encoded.value);
    }

    if let Some(first) = clamps.first() {
        log_warn!(
            "{}: {} of {} samples clamped to the {} range (first at index {}, value {})",
            formula, clamps.len(), length, format, first.index, first.value
        );
    }

    Ok(Table {
        formula,
        format,
        rounding: options.rounding,
        values,
        clamps,
    })
}

impl Table {
    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for generated tables (length >= 2)
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Encoded entries in index order
    pub fn values(&self) -> &[EncodedValue] {
        &self.values
    }

    /// Samples saturated during encoding
    pub fn clamps(&self) -> &[ClampEvent] {
        &self.clamps
    }

    /// Formula the table was generated from
    pub fn formula(&self) -> Formula {
        self.formula
    }

    /// Encoding of the entries
    pub fn format(&self) -> NumericFormat {
        self.format
    }

    /// Rounding used for fixed-point entries
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Entries decoded back to real values
    pub fn decoded(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().map(move |v| self.format.decode(*v))
    }

    /// Bitwise equality of the entries, for reproducibility checks
    pub fn bit_identical(&self, other: &Table) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::sensor::TABLE_LENGTH;
    use crate::curves::EmpiricalDistance;

    fn raw_words(table: &Table) -> Vec<u32> {
        table.values().iter().filter_map(|v| v.raw()).collect()
    }

    #[test]
    fn identity_q0_16_nearest_even() {
        let table = generate_table(Formula::Identity, NumericFormat::Q0_16, 4).unwrap();
        assert_eq!(raw_words(&table), [0, 21845, 43691, 65535]);
        assert_eq!(table.clamps(), &[ClampEvent { index: 3, value: 1.0 }]);
    }

    #[test]
    fn identity_q0_16_toward_zero() {
        let options = TableOptions { rounding: Rounding::TowardZero };
        let table = generate_table_with(Formula::Identity, NumericFormat::Q0_16, 4, options).unwrap();
        assert_eq!(raw_words(&table), [0, 21845, 43690, 65535]);
        assert_eq!(table.rounding(), Rounding::TowardZero);
    }

    #[test]
    fn inverse_square_end_fits_q16_16() {
        let table =
            generate_table(Formula::inverse_square(1.0), NumericFormat::Q16_16, TABLE_LENGTH).unwrap();
        assert_eq!(table.values()[TABLE_LENGTH - 1], EncodedValue::U32(65536));
        assert_eq!(table.values()[0], EncodedValue::U32(0));
        assert!(table.clamps().is_empty());
    }

    #[test]
    fn sweep_endpoints_are_exact() {
        let mut points = sweep(TABLE_LENGTH);
        assert_eq!(points.next(), Some((0, 0.0)));
        assert_eq!(points.last(), Some((TABLE_LENGTH - 1, 1.0)));
        assert_eq!(normalized_input(0x7ff, TABLE_LENGTH), 1.0);
    }

    #[test]
    fn invalid_length_rejected() {
        for length in [0, 1, MAX_TABLE_LENGTH + 1] {
            assert!(matches!(
                generate_table(Formula::Identity, NumericFormat::Q0_16, length),
                Err(GenerateError::InvalidLength { .. })
            ));
        }
        assert!(generate_table(Formula::Identity, NumericFormat::Q0_16, 2).is_ok());
    }

    #[test]
    fn configuration_checked_before_sweep() {
        let result = generate_table(
            Formula::inverse_square(-1.0),
            NumericFormat::Q16_16,
            TABLE_LENGTH,
        );
        assert_eq!(result, Err(GenerateError::InvalidGeometry { a: -1.0 }));

        let result = generate_table(
            Formula::Identity,
            NumericFormat::Q32 { frac_bits: 40 },
            TABLE_LENGTH,
        );
        assert_eq!(result, Err(GenerateError::InvalidFractionBits { bits: 40 }));
    }

    #[test]
    fn overflowing_calibration_is_domain_error() {
        let curve = EmpiricalDistance::new(f64::MAX, f64::MAX, 0.0);
        let result = generate_table(Formula::Distance(curve), NumericFormat::F64, 8);
        match result {
            Err(GenerateError::Domain { index, fault: DomainFault::NonFinite { .. }, .. }) => {
                assert_eq!(index, 1)
            }
            other => panic!("expected domain error, got {:?}", other),
        }
    }

    #[test]
    fn distance_table_in_q0_16_is_unclamped() {
        let table = generate_table(Formula::distance(), NumericFormat::Q0_16, TABLE_LENGTH).unwrap();
        assert!(table.clamps().is_empty());
        // c0 * 65536 = 4841.8
        assert_eq!(table.values()[0], EncodedValue::U16(4842));
    }

    #[test]
    fn decoded_matches_float_table() {
        let fixed = generate_table(Formula::SquareRoot, NumericFormat::Q0_16, 64).unwrap();
        let float = generate_table(Formula::SquareRoot, NumericFormat::F64, 64).unwrap();
        let resolution = NumericFormat::Q0_16.resolution().unwrap();
        for (q, f) in fixed.decoded().zip(float.decoded()) {
            assert!((q - f).abs() <= resolution);
        }
    }

    #[test]
    fn regeneration_is_bit_identical() {
        let a = generate_table(Formula::distance(), NumericFormat::F32, 256).unwrap();
        let b = generate_table(Formula::distance(), NumericFormat::F32, 256).unwrap();
        assert!(a.bit_identical(&b));
        let c = generate_table(Formula::SquareRoot, NumericFormat::F32, 256).unwrap();
        assert!(!a.bit_identical(&c));
    }
}
