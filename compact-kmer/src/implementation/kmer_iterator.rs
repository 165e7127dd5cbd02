//! Enumerate the k-mers of a genome string with a sliding window.

use crate::implementation::packed_sequence::PackedSequence;
use crate::interface::alphabet::dna_alphabet::ascii_to_code;
use crate::interface::word::StorageWord;
use std::iter::FusedIterator;

/// An iterator over all windows of length `N` of an ASCII genome string.
///
/// Windows that contain a character other than `A`, `C`, `G` or `T` (e.g. `N`) are skipped.
/// Each item is the offset of the window in the genome string together with the window.
pub struct KmerIterator<'a, const N: usize, const C: usize, W: StorageWord = u64> {
    genome: &'a [u8],
    position: usize,
    /// The amount of valid characters directly before `position`, saturating at `N`.
    valid_characters: usize,
    current: PackedSequence<N, C, W>,
}

impl<'a, const N: usize, const C: usize, W: StorageWord> KmerIterator<'a, N, C, W> {
    /// Creates an iterator over the k-mers of the given ASCII genome string.
    pub fn new(genome: &'a [u8]) -> Self {
        Self {
            genome,
            position: 0,
            valid_characters: 0,
            current: Default::default(),
        }
    }
}

impl<'a, const N: usize, const C: usize, W: StorageWord> Iterator for KmerIterator<'a, N, C, W> {
    type Item = (usize, PackedSequence<N, C, W>);

    fn next(&mut self) -> Option<Self::Item> {
        while self.position < self.genome.len() {
            let character = self.genome[self.position];
            self.position += 1;

            match ascii_to_code(character) {
                Some(code) => {
                    self.current = self.current.shift_left(code);
                    self.valid_characters = (self.valid_characters + 1).min(N);
                    if self.valid_characters == N {
                        return Some((self.position - N, self.current));
                    }
                }
                None => self.valid_characters = 0,
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.genome.len() - self.position))
    }
}

impl<'a, const N: usize, const C: usize, W: StorageWord> FusedIterator
    for KmerIterator<'a, N, C, W>
{
}
