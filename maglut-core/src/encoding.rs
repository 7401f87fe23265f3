//! Numeric Encodings of Table Entries
//!
//! ## Formats
//!
//! ```text
//! Format        | Word     | Value of raw word r     | Range
//! --------------|----------|-------------------------|-------------------------
//! Q0.16         | uint16_t | r / 2^16                | [0, 1 - 2^-16]
//! Q32 (f bits)  | uint32_t | r / 2^f                 | [0, (2^32 - 1) / 2^f]
//! f32 / f64     | float    | r                       | IEEE
//! ```
//!
//! ## Rounding
//!
//! Fixed-point encoding scales the value, rounds it and clamps it into the
//! word. Two rounding modes are supported:
//!
//! - **NearestEven** (default): round half to even. Deterministic and unbiased.
//! - **TowardZero**: truncation. This is what a C compiler does when it
//!   converts a decimal literal into a saturating `fract` type, which is how
//!   tables written as float literals end up encoded on the target.
//!
//! ## Clamping
//!
//! Values outside the representable range saturate at the nearest end, they
//! never wrap. `f32` entries saturate at `±f32::MAX` instead of becoming
//! infinite. The encoder reports every clamp so the generator can warn
//! about a calibration/format mismatch.

use core::fmt;

use fixed::types::U0F16;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::fixed_point::{Q0_16_MAX, Q0_16_SCALE, Q16_16_FRAC_BITS, Q32_MAX_FRAC_BITS},
    errors::{GenerateError, GenerateResult},
};

/// Rounding applied when scaling into a fixed-point word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Rounding {
    /// Round half to even
    #[default]
    NearestEven,
    /// Truncate toward zero
    TowardZero,
}

impl Rounding {
    /// Round a scaled value to an integral float
    pub fn apply(self, scaled: f64) -> f64 {
        match self {
            // rint honours the default rounding mode, ties to even
            Self::NearestEven => libm::rint(scaled),
            Self::TowardZero => libm::trunc(scaled),
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NearestEven => "nearest-even",
            Self::TowardZero => "toward-zero",
        })
    }
}

/// Target encoding of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "kind", rename_all = "kebab-case")
)]
pub enum NumericFormat {
    /// Unsigned Q0.16 in a 16-bit word
    #[cfg_attr(feature = "serde", serde(rename = "q0.16"))]
    Q0_16,
    /// Unsigned 32-bit word with `frac_bits` fractional bits
    Q32 {
        /// Fractional bits, 0..=32
        frac_bits: u8,
    },
    /// IEEE single precision
    F32,
    /// IEEE double precision
    F64,
}

/// One encoded table entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EncodedValue {
    /// Q0.16 word
    U16(u16),
    /// Q32 word
    U32(u32),
    /// Single precision float
    F32(f32),
    /// Double precision float
    F64(f64),
}

/// Result of encoding one value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Encoded {
    /// The encoded word
    pub value: EncodedValue,
    /// Whether the value had to be saturated to fit
    pub clamped: bool,
}

impl NumericFormat {
    /// Q16.16, the usual home for curves that reach 1.0
    pub const Q16_16: Self = Self::Q32 { frac_bits: Q16_16_FRAC_BITS };

    /// Reject formats that cannot be represented
    pub fn check(&self) -> GenerateResult<()> {
        match *self {
            Self::Q32 { frac_bits } if frac_bits > Q32_MAX_FRAC_BITS => {
                Err(GenerateError::InvalidFractionBits { bits: frac_bits })
            }
            _ => Ok(()),
        }
    }

    /// Fractional bits of a fixed-point format
    pub fn frac_bits(&self) -> Option<u8> {
        match *self {
            Self::Q0_16 => Some(16),
            Self::Q32 { frac_bits } => Some(frac_bits),
            Self::F32 | Self::F64 => None,
        }
    }

    /// Value of one unit in the last place of a fixed-point format
    pub fn resolution(&self) -> Option<f64> {
        self.frac_bits().map(|bits| 1.0 / pow2(bits))
    }

    /// Largest value the format holds
    pub fn max_value(&self) -> f64 {
        match *self {
            Self::Q0_16 => Q0_16_MAX as f64 / Q0_16_SCALE,
            Self::Q32 { frac_bits } => u32::MAX as f64 / pow2(frac_bits),
            Self::F32 => f32::MAX as f64,
            Self::F64 => f64::MAX,
        }
    }

    /// C element type tables of this format are declared with
    pub fn default_ctype(&self) -> &'static str {
        match self {
            Self::Q0_16 => "uint16_t",
            Self::Q32 { .. } => "uint32_t",
            Self::F32 => "float",
            Self::F64 => "double",
        }
    }

    /// Encode one value
    pub fn encode(&self, value: f64, rounding: Rounding) -> Encoded {
        match *self {
            Self::Q0_16 => {
                let (raw, clamped) = scale_and_clamp(value, Q0_16_SCALE, Q0_16_MAX as f64, rounding);
                Encoded { value: EncodedValue::U16(raw as u16), clamped }
            }
            Self::Q32 { frac_bits } => {
                let (raw, clamped) =
                    scale_and_clamp(value, pow2(frac_bits), u32::MAX as f64, rounding);
                Encoded { value: EncodedValue::U32(raw as u32), clamped }
            }
            Self::F32 => {
                // the cast alone overflows to infinity past f32::MAX
                let limit = self.max_value();
                let clamped = libm::fabs(value) > limit;
                let value = if clamped { libm::copysign(limit, value) } else { value };
                Encoded { value: EncodedValue::F32(value as f32), clamped }
            }
            Self::F64 => Encoded {
                value: EncodedValue::F64(value),
                clamped: false,
            },
        }
    }

    /// Real value represented by an encoded word of this format
    ///
    /// A word of a different width is read as its own format would
    /// (U16 as Q0.16, U32 as Q32 with this format's fractional bits or Q0.32).
    pub fn decode(&self, value: EncodedValue) -> f64 {
        match value {
            EncodedValue::U16(raw) => U0F16::from_bits(raw).to_num::<f64>(),
            EncodedValue::U32(raw) => {
                let bits = match *self {
                    Self::Q32 { frac_bits } => frac_bits,
                    _ => Q32_MAX_FRAC_BITS,
                };
                raw as f64 / pow2(bits)
            }
            EncodedValue::F32(v) => v as f64,
            EncodedValue::F64(v) => v,
        }
    }
}

impl fmt::Display for NumericFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Q0_16 => f.write_str("Q0.16"),
            Self::Q32 { frac_bits } => write!(f, "Q{}.{}", 32u8.saturating_sub(*frac_bits), frac_bits),
            Self::F32 => f.write_str("f32"),
            Self::F64 => f.write_str("f64"),
        }
    }
}

impl EncodedValue {
    /// Raw word of a fixed-point entry
    pub fn raw(&self) -> Option<u32> {
        match *self {
            Self::U16(raw) => Some(raw as u32),
            Self::U32(raw) => Some(raw),
            Self::F32(_) | Self::F64(_) => None,
        }
    }

    /// Q0.16 entry as a `fixed` number, for firmware-side arithmetic
    pub fn to_u0f16(&self) -> Option<U0F16> {
        match *self {
            Self::U16(raw) => Some(U0F16::from_bits(raw)),
            _ => None,
        }
    }

    /// Bit pattern, for comparing tables bit for bit
    pub fn to_bits(&self) -> u64 {
        match *self {
            Self::U16(raw) => raw as u64,
            Self::U32(raw) => raw as u64,
            Self::F32(v) => v.to_bits() as u64,
            Self::F64(v) => v.to_bits(),
        }
    }
}

impl fmt::Display for EncodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U16(raw) => write!(f, "{}", raw),
            Self::U32(raw) => write!(f, "{}", raw),
            // Debug is the shortest representation that round-trips
            Self::F32(v) => write!(f, "{:?}", v),
            Self::F64(v) => write!(f, "{:?}", v),
        }
    }
}

fn pow2(bits: u8) -> f64 {
    libm::ldexp(1.0, bits as i32)
}

/// Scale, round and saturate into [0, max]
fn scale_and_clamp(value: f64, scale: f64, max: f64, rounding: Rounding) -> (f64, bool) {
    let scaled = rounding.apply(value * scale);
    if scaled < 0.0 {
        (0.0, true)
    } else if scaled > max {
        (max, true)
    } else {
        (scaled, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn q0_16_rounding_modes() {
        let two_thirds = 2.0 / 3.0;
        let nearest = NumericFormat::Q0_16.encode(two_thirds, Rounding::NearestEven);
        let truncated = NumericFormat::Q0_16.encode(two_thirds, Rounding::TowardZero);
        assert_eq!(nearest.value, EncodedValue::U16(43691));
        assert_eq!(truncated.value, EncodedValue::U16(43690));
        assert!(!nearest.clamped);
    }

    #[test]
    fn ties_round_to_even() {
        // 0.5 / 65536 and 1.5 / 65536 sit exactly between two words
        let half = 0.5 / Q0_16_SCALE;
        let one_and_half = 1.5 / Q0_16_SCALE;
        assert_eq!(NumericFormat::Q0_16.encode(half, Rounding::NearestEven).value, EncodedValue::U16(0));
        assert_eq!(NumericFormat::Q0_16.encode(one_and_half, Rounding::NearestEven).value, EncodedValue::U16(2));
    }

    #[test]
    fn one_saturates_q0_16_but_fits_q16_16() {
        let q0_16 = NumericFormat::Q0_16.encode(1.0, Rounding::NearestEven);
        assert_eq!(q0_16.value, EncodedValue::U16(65535));
        assert!(q0_16.clamped);

        let q16_16 = NumericFormat::Q16_16.encode(1.0, Rounding::NearestEven);
        assert_eq!(q16_16.value, EncodedValue::U32(65536));
        assert!(!q16_16.clamped);
    }

    #[test]
    fn negative_values_clamp_to_zero() {
        let encoded = NumericFormat::Q16_16.encode(-0.25, Rounding::NearestEven);
        assert_eq!(encoded.value, EncodedValue::U32(0));
        assert!(encoded.clamped);

        // rounds to -0.0, which is not a clamp
        let tiny = NumericFormat::Q0_16.encode(-1e-9, Rounding::NearestEven);
        assert_eq!(tiny.value, EncodedValue::U16(0));
        assert!(!tiny.clamped);
    }

    #[test]
    fn q0_32_saturates_at_word_max() {
        let format = NumericFormat::Q32 { frac_bits: 32 };
        let encoded = format.encode(1.0, Rounding::NearestEven);
        assert_eq!(encoded.value, EncodedValue::U32(u32::MAX));
        assert!(encoded.clamped);
    }

    #[test]
    fn f32_saturates_instead_of_overflowing() {
        let encoded = NumericFormat::F32.encode(1e39, Rounding::NearestEven);
        assert_eq!(encoded.value, EncodedValue::F32(f32::MAX));
        assert!(encoded.clamped);

        let encoded = NumericFormat::F32.encode(-1e39, Rounding::NearestEven);
        assert_eq!(encoded.value, EncodedValue::F32(-f32::MAX));
        assert!(encoded.clamped);

        let encoded = NumericFormat::F32.encode(0.25, Rounding::NearestEven);
        assert_eq!(encoded.value, EncodedValue::F32(0.25));
        assert!(!encoded.clamped);
    }

    #[test]
    fn q16_16_is_q32_with_sixteen_bits() {
        assert_eq!(NumericFormat::Q16_16.frac_bits(), Some(Q16_16_FRAC_BITS));
        assert_eq!(NumericFormat::Q16_16.max_value(), u32::MAX as f64 / 65536.0);
    }

    #[test]
    fn fraction_bits_checked() {
        assert!(NumericFormat::Q32 { frac_bits: 32 }.check().is_ok());
        assert_eq!(
            NumericFormat::Q32 { frac_bits: 33 }.check(),
            Err(GenerateError::InvalidFractionBits { bits: 33 })
        );
    }

    #[test]
    fn decode_inverts_scaling() {
        assert_eq!(NumericFormat::Q0_16.decode(EncodedValue::U16(32768)), 0.5);
        assert_eq!(NumericFormat::Q16_16.decode(EncodedValue::U32(65536)), 1.0);
        assert_eq!(NumericFormat::Q16_16.resolution(), Some(1.0 / 65536.0));
        assert_eq!(NumericFormat::F64.resolution(), None);
    }

    #[test]
    fn u0f16_view() {
        let value = EncodedValue::U16(16384).to_u0f16().unwrap();
        assert_eq!(value, U0F16::from_num(0.25));
        assert!(EncodedValue::U32(1).to_u0f16().is_none());
    }

    #[test]
    fn format_names() {
        use alloc::string::ToString;
        assert_eq!(NumericFormat::Q0_16.to_string(), "Q0.16");
        assert_eq!(NumericFormat::Q16_16.to_string(), "Q16.16");
        assert_eq!(NumericFormat::Q32 { frac_bits: 32 }.to_string(), "Q0.32");
    }

    #[test]
    fn floats_print_round_trip_literals() {
        use alloc::string::ToString;
        assert_eq!(EncodedValue::F64(0.5).to_string(), "0.5");
        assert_eq!(EncodedValue::F64(1.0).to_string(), "1.0");
        let third = 1.0f64 / 3.0;
        let printed = EncodedValue::F64(third).to_string();
        assert_eq!(printed.parse::<f64>().unwrap(), third);
    }
}
