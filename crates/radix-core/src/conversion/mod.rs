//! Conversion domain module.
//!
//! # Module Structure
//!
//! - `engine`: stateless base conversion (`Converter`, `Radix`, `ConversionError`)
//! - `record`: the outcome of one attempt (`ConversionRecord`)

mod engine;
mod record;

pub use engine::{
    ConversionError, Converter, DEFAULT_PRECISION, MAX_BASE, MIN_BASE, Radix,
    base10_fraction_to_target, convert_decimal, convert_integer, convert_number, format_integer,
    fraction_to_base10, is_integer_only,
};
pub use record::{ConversionOutcome, ConversionRecord};
