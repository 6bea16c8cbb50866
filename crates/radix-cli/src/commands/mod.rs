pub mod convert;
pub mod quiz;
pub mod repl;
