//! Numeral base conversion.
//!
//! Integers are parsed into the signed 64-bit range and re-rendered in the
//! target base. Fractions go through an `f64` accumulator and a greedy
//! multiply-and-truncate expansion: a fraction that does not terminate in the
//! target base is cut at `precision` digits, never rounded, so converting the
//! output back is not guaranteed to reproduce the input.
//!
//! A decimal with an empty or all-zero fraction keeps one fractional digit:
//! `101.` in base 2 renders as `5.0`, never as a bare trailing point.

use rand::Rng;
use thiserror::Error;

/// Smallest supported base.
pub const MIN_BASE: u32 = 2;
/// Largest supported base (digits `0-9` then `a-z`).
pub const MAX_BASE: u32 = 36;
/// Fractional digits emitted when no precision is configured.
pub const DEFAULT_PRECISION: usize = 5;

const RADIX_POINT: char = '.';
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Why a numeral could not be converted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A character is not a digit of the base, or the value does not fit in 64 bits.
    #[error("'{value}' is not a valid base-{base} number")]
    InvalidDigit { value: String, base: u32 },

    /// Decimal input that does not split into integer and fraction parts.
    #[error("'{0}' must contain exactly one radix point")]
    MalformedNumber(String),

    /// Source or target base outside `2..=36`.
    #[error("base {0} is out of range (2..=36)")]
    BaseOutOfRange(u32),
}

impl ConversionError {
    fn invalid_digit(value: &str, radix: Radix) -> Self {
        Self::InvalidDigit {
            value: value.to_string(),
            base: radix.get(),
        }
    }
}

/// A validated base in `2..=36`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Radix(u32);

impl Radix {
    /// Validates `base`, failing with `BaseOutOfRange` outside `2..=36`.
    pub fn new(base: u32) -> Result<Self, ConversionError> {
        if (MIN_BASE..=MAX_BASE).contains(&base) {
            Ok(Self(base))
        } else {
            Err(ConversionError::BaseOutOfRange(base))
        }
    }

    /// Picks a base uniformly from `2..=36`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(MIN_BASE..=MAX_BASE))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Parses a signed integer numeral. Accepts one leading `+` or `-` and
    /// digits in either case.
    pub fn parse(self, value: &str) -> Result<i64, ConversionError> {
        let (negative, digits) = split_sign(value);
        let magnitude = self.parse_magnitude(digits, value)?;
        to_signed(negative, magnitude).ok_or_else(|| ConversionError::invalid_digit(value, self))
    }

    /// Renders `value` with lowercase digits.
    pub fn format(self, value: i64) -> String {
        let digits = self.format_magnitude(value.unsigned_abs());
        if value < 0 {
            format!("-{}", digits)
        } else {
            digits
        }
    }

    /// Parses an unsigned digit run. `whole` is the text reported on failure.
    fn parse_magnitude(self, digits: &str, whole: &str) -> Result<u64, ConversionError> {
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(self.0)) {
            return Err(ConversionError::invalid_digit(whole, self));
        }
        u64::from_str_radix(digits, self.0).map_err(|_| ConversionError::invalid_digit(whole, self))
    }

    fn format_magnitude(self, mut magnitude: u64) -> String {
        if magnitude == 0 {
            return "0".to_string();
        }

        let base = u64::from(self.0);
        let mut digits = Vec::new();
        while magnitude > 0 {
            digits.push(DIGITS[(magnitude % base) as usize]);
            magnitude /= base;
        }
        digits.reverse();
        String::from_utf8_lossy(&digits).into_owned()
    }

    fn digit_char(self, digit: u32) -> char {
        DIGITS[digit.min(self.0 - 1) as usize] as char
    }
}

fn split_sign(value: &str) -> (bool, &str) {
    if let Some(rest) = value.strip_prefix('-') {
        (true, rest)
    } else {
        (false, value.strip_prefix('+').unwrap_or(value))
    }
}

/// Applies the sign, rejecting magnitudes outside the `i64` range.
fn to_signed(negative: bool, magnitude: u64) -> Option<i64> {
    if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

/// True iff `value` contains no radix point.
pub fn is_integer_only(value: &str) -> bool {
    !value.contains(RADIX_POINT)
}

/// Converts a signed integer numeral between bases, preserving sign.
pub fn convert_integer(
    value: &str,
    source_base: u32,
    target_base: u32,
) -> Result<String, ConversionError> {
    let source = Radix::new(source_base)?;
    let target = Radix::new(target_base)?;
    let parsed = source.parse(value)?;
    Ok(target.format(parsed))
}

/// Renders a base-10 integer in `base`.
pub fn format_integer(value: i64, base: u32) -> Result<String, ConversionError> {
    Ok(Radix::new(base)?.format(value))
}

/// Evaluates the digits after a radix point as a base-10 fraction.
///
/// The digit at position `i` contributes `digit / base^(i+1)`. An empty
/// digit string is the zero fraction.
pub fn fraction_to_base10(fraction_digits: &str, source_base: u32) -> Result<f64, ConversionError> {
    let source = Radix::new(source_base)?;
    let base = f64::from(source.get());

    fraction_digits
        .chars()
        .enumerate()
        .try_fold(0.0_f64, |acc, (position, c)| {
            let digit = c
                .to_digit(source.get())
                .ok_or_else(|| ConversionError::invalid_digit(fraction_digits, source))?;
            let exponent = i32::try_from(position + 1).unwrap_or(i32::MAX);
            Ok(acc + f64::from(digit) / base.powi(exponent))
        })
}

/// Expands a base-10 fraction in `[0, 1]` into at most `precision` digits of
/// `target_base`.
///
/// Stops early once the remainder is exactly zero, so `0.0` yields an empty
/// string.
pub fn base10_fraction_to_target(
    fraction: f64,
    target_base: u32,
    precision: usize,
) -> Result<String, ConversionError> {
    let target = Radix::new(target_base)?;
    let base = f64::from(target.get());

    let mut remaining = fraction;
    let mut digits = String::with_capacity(precision);
    let mut emitted = 0;
    while remaining != 0.0 && emitted < precision {
        remaining *= base;
        // A fraction that rounded up to 1.0 would yield `base` here.
        let digit = remaining.trunc().min(base - 1.0);
        digits.push(target.digit_char(digit as u32));
        remaining -= digit;
        emitted += 1;
    }

    Ok(digits)
}

/// Converts a numeral containing exactly one radix point at the default precision.
pub fn convert_decimal(
    value: &str,
    source_base: u32,
    target_base: u32,
) -> Result<String, ConversionError> {
    Converter::default().convert_decimal(value, source_base, target_base)
}

/// Converts `value` at the default precision, dispatching on the radix point.
pub fn convert_number(
    value: &str,
    source_base: u32,
    target_base: u32,
) -> Result<String, ConversionError> {
    Converter::default().convert(value, source_base, target_base)
}

/// Conversion entry point carrying the fractional precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    precision: usize,
}

impl Converter {
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Dispatches to integer or decimal conversion.
    pub fn convert(
        &self,
        value: &str,
        source_base: u32,
        target_base: u32,
    ) -> Result<String, ConversionError> {
        if is_integer_only(value) {
            convert_integer(value, source_base, target_base)
        } else {
            self.convert_decimal(value, source_base, target_base)
        }
    }

    /// Converts `integer.fraction`, joining the two converted parts with a
    /// radix point. The first failing part decides the error.
    pub fn convert_decimal(
        &self,
        value: &str,
        source_base: u32,
        target_base: u32,
    ) -> Result<String, ConversionError> {
        let source = Radix::new(source_base)?;
        let target = Radix::new(target_base)?;

        let mut parts = value.split(RADIX_POINT);
        let (integer_part, fraction_part) = match (parts.next(), parts.next(), parts.next()) {
            (Some(integer), Some(fraction), None) => (integer, fraction),
            _ => return Err(ConversionError::MalformedNumber(value.to_string())),
        };

        // The sign belongs to the whole number, so "-0.1" keeps it.
        let (negative, integer_digits) = split_sign(integer_part);
        let magnitude = source.parse_magnitude(integer_digits, integer_part)?;
        if to_signed(negative, magnitude).is_none() {
            return Err(ConversionError::invalid_digit(integer_part, source));
        }

        let fraction = fraction_to_base10(fraction_part, source.get())?;
        let fraction_digits = base10_fraction_to_target(fraction, target.get(), self.precision)?;

        let sign = if negative && (magnitude != 0 || fraction != 0.0) {
            "-"
        } else {
            ""
        };
        let fraction_digits = if fraction_digits.is_empty() {
            "0".to_string()
        } else {
            fraction_digits
        };

        Ok(format!(
            "{}{}{}{}",
            sign,
            target.format_magnitude(magnitude),
            RADIX_POINT,
            fraction_digits
        ))
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}
