//! Alphabets for genome sequences.

pub mod dna_alphabet;
