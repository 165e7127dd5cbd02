//! This crate provides k-mers as immutable genome strings of compile-time length, packed with two bits per character.
//!
//! They are meant as keys and values in the innermost loops of de Bruijn graph construction,
//! so they are `Copy`, hashable, ordered, and can be shifted by one character in constant time.
//!
//! ```
//! use compact_kmer::implementation::packed_sequence::PackedSequence;
//!
//! let kmer = PackedSequence::<4, 1, u8>::from_ascii(b"ACGT");
//! assert_eq!(kmer.shift_left(0).as_string(), "CGTA");
//! assert_eq!(kmer.push_back::<5, 2>(0).as_string(), "ACGTA");
//! assert_eq!(!kmer, kmer);
//! ```
#![warn(missing_docs)]
#![recursion_limit = "1024"]
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

/// Contains the error types used by this crate.
pub mod error;
/// Different implementations of packed genome strings.
pub mod implementation;
/// Traits and encodings shared by the packed genome strings.
pub mod interface;
/// Reading and writing streams of packed genome strings.
pub mod io;
