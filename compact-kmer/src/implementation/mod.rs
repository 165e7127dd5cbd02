/// An iterator over the k-mers of a genome string.
pub mod kmer_iterator;
/// The compile-time sized, two-bit packed genome string.
pub mod packed_sequence;

/// A k-mer stored in 64-bit cells, the default storage type for de Bruijn graph keys.
pub type DefaultKmer<const N: usize, const C: usize> = packed_sequence::PackedSequence<N, C, u64>;
