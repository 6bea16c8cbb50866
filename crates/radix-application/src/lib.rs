//! Application layer for RADIX.
//!
//! This crate wires the domain ledger to user storage and exports. Every
//! menu operation is a method returning values; rendering is left to the
//! caller.

pub mod session_usecase;

pub use session_usecase::ConverterSession;
