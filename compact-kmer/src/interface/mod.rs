//! The traits providing the abstractions of this crate.

pub mod alphabet;
pub mod symbol_source;
pub mod word;
