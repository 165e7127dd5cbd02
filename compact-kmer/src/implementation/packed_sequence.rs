//! An immutable DNA sequence with compile-time length, packed into an array of unsigned integers.
//!
//! Each character is encoded as two bits (see [dna_alphabet](crate::interface::alphabet::dna_alphabet)).
//! Symbol `i` is stored in cell `i / W::SYMBOLS` at bit offset `(i % W::SYMBOLS) * 2`.
//! All bits after the last symbol are zero, so equal sequences have equal storage.
//!
//! ```txt
//! ACGT as PackedSequence<4, 1, u8>: 0b11_10_01_00
//! ```

use crate::error::{ErrorKind, Result};
use crate::interface::alphabet::dna_alphabet::{
    ascii_to_code, code_to_ascii, complement_code, is_valid_ascii_character, is_valid_code,
    DnaCharacter,
};
use crate::interface::symbol_source::{SymbolEncoding, SymbolSource};
use crate::interface::word::{cells_for, StorageWord};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::io::{Read, Write};
use std::iter::FusedIterator;
use std::ops::{Index, Not, Shl, Shr};
use std::str::FromStr;

/// The seed of [PackedSequence::polynomial_hash].
const HASH_SEED: u64 = 239;

static CODES: [u8; 4] = [0, 1, 2, 3];

/// A DNA sequence of exactly `N` characters, stored as `C` cells of type `W`.
///
/// `C` must equal [cells_for(N, W::BITS)](cells_for), which is checked at compile time.
/// For example, 31-mers are `PackedSequence<31, 1>` and 33-mers are `PackedSequence<33, 2>`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct PackedSequence<const N: usize, const C: usize, W: StorageWord = u64> {
    /// Invariant: the bits after symbol `N - 1` are zero, except for the [sentinel](PackedSequence::sentinel).
    cells: [W; C],
}

/// An iterator over the two-bit codes of a [PackedSequence].
pub struct PackedSequenceIterator<'a, const N: usize, const C: usize, W: StorageWord> {
    sequence: &'a PackedSequence<N, C, W>,
    front: usize,
    back: usize,
}

struct SizeRelation<const N: usize, const M: usize>;

impl<const N: usize, const M: usize> SizeRelation<N, M> {
    const GROW_BY_ONE: () = assert!(M == N + 1, "the target length must be the source length plus one");
    const SHRINK: () = assert!(M <= N, "the target length must not exceed the source length");
}

impl<const N: usize, const C: usize, W: StorageWord> PackedSequence<N, C, W> {
    const LAYOUT: () = assert!(
        N > 0 && C == cells_for(N, W::BITS),
        "the cell count must be cells_for(N, W::BITS) and N must be positive"
    );

    /// The amount of bytes written by [write_to](PackedSequence::write_to).
    pub const RECORD_SIZE: usize = C * W::BYTES;

    /// The amount of symbols stored in the last cell.
    const LAST_CELL_SYMBOLS: usize = N - (C - 1) * W::SYMBOLS;

    #[inline]
    fn zeroed() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::LAYOUT;
        Self {
            cells: [W::zero(); C],
        }
    }

    /// Masks the valid symbols of the last cell.
    #[inline]
    fn last_cell_mask() -> W {
        if Self::LAST_CELL_SYMBOLS == W::SYMBOLS {
            W::max_value()
        } else {
            (W::one() << (Self::LAST_CELL_SYMBOLS * 2)) - W::one()
        }
    }

    /// Packs the first `count` codes returned by `code_at` into a new sequence.
    /// The remaining symbols are `A`.
    #[inline]
    fn pack(count: usize, mut code_at: impl FnMut(usize) -> u8) -> Self {
        debug_assert!(count <= N);
        let mut result = Self::zeroed();
        let mut cell = W::zero();
        let mut shift = 0;
        let mut cell_index = 0;

        for position in 0..count {
            cell = cell | (W::from_code(code_at(position)) << shift);
            shift += 2;
            if shift == W::BITS {
                result.cells[cell_index] = cell;
                cell_index += 1;
                shift = 0;
                cell = W::zero();
            }
        }

        if shift != 0 {
            result.cells[cell_index] = cell;
        }
        result
    }

    /// Overwrites the symbol at `index` with the given two-bit code.
    #[inline]
    fn set(&mut self, index: usize, code: u8) {
        let cell = index / W::SYMBOLS;
        let shift = (index % W::SYMBOLS) * 2;
        self.cells[cell] =
            (self.cells[cell] & !(W::from_code(3) << shift)) | (W::from_code(code) << shift);
    }

    /// Constructs a sequence from exactly `N` ASCII characters `A`, `C`, `G` or `T`.
    ///
    /// Panics if the length is not `N` or if there is another character.
    /// Use [try_from_ascii](PackedSequence::try_from_ascii) for untrusted input.
    pub fn from_ascii(ascii: &[u8]) -> Self {
        assert_eq!(
            ascii.len(),
            N,
            "expected a sequence of length {}, but got length {}",
            N,
            ascii.len()
        );
        Self::pack(N, |position| {
            let character = ascii[position];
            ascii_to_code(character).unwrap_or_else(|| {
                panic!(
                    "invalid character {:?} (code {}) at position {} of a sequence of length {}",
                    character as char, character, position, N
                )
            })
        })
    }

    /// Constructs a sequence from exactly `N` ASCII characters `A`, `C`, `G` or `T`,
    /// returning an error if the length is not `N` or if there is another character.
    pub fn try_from_ascii(ascii: &[u8]) -> Result<Self> {
        if ascii.len() != N {
            bail!(ErrorKind::WrongLength(N, ascii.len()));
        }
        if let Some((position, &character)) = ascii
            .iter()
            .enumerate()
            .find(|(_, character)| !is_valid_ascii_character(**character))
        {
            bail!(ErrorKind::InvalidCharacter(character, position));
        }
        Ok(Self::pack(N, |position| {
            ascii_to_code(ascii[position]).unwrap_or_default()
        }))
    }

    /// Constructs a sequence from a zero-terminated buffer of ASCII characters.
    ///
    /// Panics if the first zero byte is not at position `N`, or if there is an invalid character before it.
    pub fn from_nul_terminated(bytes: &[u8]) -> Self {
        let terminator = bytes.iter().position(|&byte| byte == 0);
        assert_eq!(
            terminator,
            Some(N),
            "expected the zero terminator at position {}",
            N
        );
        Self::from_ascii(&bytes[..N])
    }

    /// Like [from_nul_terminated](PackedSequence::from_nul_terminated), but returns an error instead of panicking.
    pub fn try_from_nul_terminated(bytes: &[u8]) -> Result<Self> {
        match bytes.iter().position(|&byte| byte == 0) {
            Some(terminator) if terminator == N => Self::try_from_ascii(&bytes[..N]),
            _ => Err(ErrorKind::MissingTerminator(N).into()),
        }
    }

    /// Constructs a sequence from `count` symbols of `source`, starting at `offset`.
    /// If `count < N`, the remaining symbols are `A`.
    ///
    /// This can cut a shorter window out of a longer string or a longer packed sequence.
    /// Panics if `count > N`, if the source is too short, or if a symbol is invalid in the given encoding.
    pub fn from_source<Source: SymbolSource + ?Sized>(
        source: &Source,
        encoding: SymbolEncoding,
        offset: usize,
        count: usize,
    ) -> Self {
        assert!(
            count <= N,
            "cannot read {} symbols into a sequence of length {}",
            count,
            N
        );
        assert!(
            offset + count <= source.symbol_count(),
            "cannot read {} symbols at offset {} from a source of length {}",
            count,
            offset,
            source.symbol_count()
        );

        match encoding {
            SymbolEncoding::Ascii => Self::pack(count, |position| {
                let character = source.symbol(offset + position);
                ascii_to_code(character).unwrap_or_else(|| {
                    panic!(
                        "invalid character {:?} (code {}) at position {}",
                        character as char,
                        character,
                        offset + position
                    )
                })
            }),
            SymbolEncoding::TwoBit => Self::pack(count, |position| {
                let code = source.symbol(offset + position);
                assert!(
                    is_valid_code(code),
                    "invalid two-bit code {} at position {}",
                    code,
                    offset + position
                );
                code
            }),
        }
    }

    /// Like [from_source](PackedSequence::from_source), but returns an error instead of panicking.
    pub fn try_from_source<Source: SymbolSource + ?Sized>(
        source: &Source,
        encoding: SymbolEncoding,
        offset: usize,
        count: usize,
    ) -> Result<Self> {
        if count > N {
            bail!(ErrorKind::WrongLength(N, count));
        }
        let available = source.symbol_count().saturating_sub(offset);
        if count > available {
            bail!(ErrorKind::WrongLength(count, available));
        }

        for position in offset..offset + count {
            let symbol = source.symbol(position);
            match encoding {
                SymbolEncoding::Ascii if !is_valid_ascii_character(symbol) => {
                    bail!(ErrorKind::InvalidCharacter(symbol, position))
                }
                SymbolEncoding::TwoBit if !is_valid_code(symbol) => {
                    bail!(ErrorKind::InvalidCode(symbol, position))
                }
                _ => {}
            }
        }
        Ok(Self::from_source(source, encoding, offset, count))
    }

    /// Constructs a sequence from already packed cells.
    ///
    /// Only the first `C` cells are used, and the bits after the last symbol are cleared.
    /// Panics if there are fewer than `C` cells.
    pub fn from_cells(cells: &[W]) -> Self {
        assert!(
            cells.len() >= C,
            "expected at least {} cells, but got {}",
            C,
            cells.len()
        );
        let mut result = Self::zeroed();
        result.cells.copy_from_slice(&cells[..C]);
        result.cells[C - 1] = result.cells[C - 1] & Self::last_cell_mask();
        result
    }

    /// Returns a sequence with all storage bits set.
    ///
    /// It is larger than any other sequence of the same type and never equal to the default sequence.
    /// If `N` is not a multiple of `W::SYMBOLS`, it is also different from the sequence of only `T`s.
    pub fn sentinel() -> Self {
        let mut result = Self::zeroed();
        result.cells = [W::max_value(); C];
        result
    }

    /// Returns true if this is the [sentinel](PackedSequence::sentinel).
    pub fn is_sentinel(&self) -> bool {
        self.cells.iter().all(|&cell| cell == W::max_value())
    }

    /// Returns true if all storage bits after the last symbol are zero.
    /// This holds for every sequence except the [sentinel](PackedSequence::sentinel).
    pub fn has_zero_padding(&self) -> bool {
        self.cells[C - 1] & !Self::last_cell_mask() == W::zero()
    }

    /// The packed storage cells of this sequence.
    pub fn cells(&self) -> &[W; C] {
        &self.cells
    }

    /// The amount of symbols in this sequence.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        N
    }

    /// Returns the two-bit code at `index`.
    ///
    /// The index is only checked in debug builds, use [get](PackedSequence::get) outside of hot loops.
    #[inline]
    pub fn code(&self, index: usize) -> u8 {
        debug_assert!(index < N, "index {} out of range for length {}", index, N);
        (self.cells[index / W::SYMBOLS] >> ((index % W::SYMBOLS) * 2)).low_code()
    }

    /// Returns the two-bit code at `index`.
    /// Panics if `index >= N`.
    pub fn get(&self, index: usize) -> u8 {
        assert!(index < N, "index {} out of range for length {}", index, N);
        self.code(index)
    }

    /// The two-bit code of the first symbol.
    pub fn first(&self) -> u8 {
        self.code(0)
    }

    /// The two-bit code of the last symbol.
    pub fn last(&self) -> u8 {
        self.code(N - 1)
    }

    /// Returns an iterator over the two-bit codes of this sequence.
    pub fn iter(&self) -> PackedSequenceIterator<'_, N, C, W> {
        PackedSequenceIterator {
            sequence: self,
            front: 0,
            back: N,
        }
    }

    /// Copies this sequence into a vector of ASCII characters.
    pub fn clone_as_vec(&self) -> Vec<u8> {
        self.iter().map(code_to_ascii).collect()
    }

    /// Returns the sequence as nucleotide string.
    pub fn as_string(&self) -> String {
        self.iter().map(|code| code_to_ascii(code) as char).collect()
    }

    /// Drops the first symbol and appends the given two-bit code at the end.
    /// Panics if `code > 3`.
    #[inline]
    pub fn shift_left(&self, code: u8) -> Self {
        assert!(is_valid_code(code), "invalid two-bit code {}", code);
        let mut result = *self;
        let last_shift = (Self::LAST_CELL_SYMBOLS - 1) * 2;

        // The sentinel carries ones in its padding, they must not be shifted into the last symbol.
        let last_cell = result.cells[C - 1] & Self::last_cell_mask();
        let mut carry = last_cell.low_code();
        result.cells[C - 1] = (last_cell >> 2) | (W::from_code(code) << last_shift);
        for cell in result.cells[..C - 1].iter_mut().rev() {
            let next_carry = cell.low_code();
            *cell = (*cell >> 2) | (W::from_code(carry) << (W::BITS - 2));
            carry = next_carry;
        }
        result
    }

    /// Drops the last symbol and inserts the given two-bit code at the front.
    /// Panics if `code > 3`.
    #[inline]
    pub fn shift_right(&self, code: u8) -> Self {
        assert!(is_valid_code(code), "invalid two-bit code {}", code);
        let mut result = *self;

        let mut carry = code;
        for cell in result.cells.iter_mut() {
            let next_carry = (*cell >> (W::BITS - 2)).low_code();
            *cell = (*cell << 2) | W::from_code(carry);
            carry = next_carry;
        }
        result.cells[C - 1] = result.cells[C - 1] & Self::last_cell_mask();
        result
    }

    /// Returns this sequence with the given two-bit code appended.
    /// `M` must be `N + 1`, and `D` must be `cells_for(M, W::BITS)`.
    pub fn push_back<const M: usize, const D: usize>(&self, code: u8) -> PackedSequence<M, D, W> {
        #[allow(clippy::let_unit_value)]
        let () = SizeRelation::<N, M>::GROW_BY_ONE;
        assert!(is_valid_code(code), "invalid two-bit code {}", code);
        let mut result = PackedSequence::<M, D, W>::zeroed();
        result.cells[..C].copy_from_slice(&self.cells);
        result.cells[C - 1] = self.cells[C - 1] & Self::last_cell_mask();
        result.set(N, code);
        result
    }

    /// Returns this sequence with the given two-bit code inserted at the front.
    /// `M` must be `N + 1`, and `D` must be `cells_for(M, W::BITS)`.
    pub fn push_front<const M: usize, const D: usize>(&self, code: u8) -> PackedSequence<M, D, W> {
        #[allow(clippy::let_unit_value)]
        let () = SizeRelation::<N, M>::GROW_BY_ONE;
        assert!(is_valid_code(code), "invalid two-bit code {}", code);
        PackedSequence::<M, D, W>::pack(M, |position| {
            if position == 0 {
                code
            } else {
                self.code(position - 1)
            }
        })
    }

    /// Returns a copy of the prefix of length `M` of this sequence.
    pub fn prefix<const M: usize, const D: usize>(&self) -> PackedSequence<M, D, W> {
        #[allow(clippy::let_unit_value)]
        let () = SizeRelation::<N, M>::SHRINK;
        PackedSequence::<M, D, W>::from_cells(&self.cells[..D])
    }

    /// Returns a copy of the suffix of length `M` of this sequence.
    pub fn suffix<const M: usize, const D: usize>(&self) -> PackedSequence<M, D, W> {
        #[allow(clippy::let_unit_value)]
        let () = SizeRelation::<N, M>::SHRINK;
        PackedSequence::<M, D, W>::pack(M, |position| self.code(N - M + position))
    }

    /// Returns the reverse complement of this sequence.
    pub fn reverse_complement(&self) -> Self {
        Self::pack(N, |position| complement_code(self.code(N - 1 - position)))
    }

    /// Returns true if this sequence is smaller than or equal to its reverse complement.
    pub fn is_canonical(&self) -> bool {
        *self <= self.reverse_complement()
    }

    /// Returns the smaller of this sequence and its reverse complement.
    pub fn canonical(&self) -> Self {
        let reverse_complement = self.reverse_complement();
        if *self <= reverse_complement {
            *self
        } else {
            reverse_complement
        }
    }

    /// Returns true if this sequence equals its reverse complement.
    pub fn is_self_complemental(&self) -> bool {
        *self == self.reverse_complement()
    }

    /// A polynomial hash over the storage cells.
    /// Equal sequences have equal hashes.
    #[inline]
    pub fn polynomial_hash(&self) -> u64 {
        self.cells.iter().fold(HASH_SEED, |hash, cell| {
            (hash << 5)
                .wrapping_sub(hash)
                .wrapping_add(cell.hash_input())
        })
    }

    /// The `hash_index`th member of a family of hash functions, starting from `seed`.
    /// Meant for schemes that need several independent hashes of the same key.
    pub fn multiple_hash(&self, hash_index: usize, seed: u64) -> u64 {
        let shift = u32::try_from(hash_index.saturating_add(1)).unwrap_or(u32::MAX);
        self.cells.iter().fold(seed, |hash, cell| {
            hash.checked_shl(shift)
                .unwrap_or(0)
                .wrapping_add(cell.hash_input())
        })
    }

    /// Writes the storage cells in native byte order.
    /// Exactly [RECORD_SIZE](PackedSequence::RECORD_SIZE) bytes are written.
    pub fn write_to<Writer: Write + ?Sized>(&self, writer: &mut Writer) -> Result<()> {
        for cell in &self.cells {
            cell.write_native(writer)?;
        }
        Ok(())
    }

    /// Reads a sequence as written by [write_to](PackedSequence::write_to).
    ///
    /// Fails if the stream fails or ends early, or if the record has non-zero bits after its last symbol
    /// and is not the [sentinel](PackedSequence::sentinel).
    pub fn read_from<Reader: Read + ?Sized>(reader: &mut Reader) -> Result<Self> {
        let mut result = Self::zeroed();
        for cell in result.cells.iter_mut() {
            *cell = W::read_native(reader)?;
        }

        if !result.has_zero_padding() && !result.is_sentinel() {
            bail!(ErrorKind::InvalidPadding);
        }
        Ok(result)
    }

    /// Overwrites this sequence with one read by [read_from](PackedSequence::read_from).
    /// On error, this sequence is left unchanged.
    pub fn read_into<Reader: Read + ?Sized>(&mut self, reader: &mut Reader) -> Result<()> {
        *self = Self::read_from(reader)?;
        Ok(())
    }
}

/// Returns true if `left` is smaller than `right` in the order of the first differing symbol.
pub fn symbolwise_less<const N: usize, const C: usize, W: StorageWord>(
    left: &PackedSequence<N, C, W>,
    right: &PackedSequence<N, C, W>,
) -> bool {
    left.iter().lt(right.iter())
}

impl<const N: usize, const C: usize, W: StorageWord> Default for PackedSequence<N, C, W> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<const N: usize, const C: usize, W: StorageWord> Ord for PackedSequence<N, C, W> {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        // Only the sentinel can be symbolwise equal to a different sequence.
        self.iter()
            .cmp(other.iter())
            .then_with(|| self.is_sentinel().cmp(&other.is_sentinel()))
    }
}

impl<const N: usize, const C: usize, W: StorageWord> PartialOrd for PackedSequence<N, C, W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize, const C: usize, W: StorageWord> Hash for PackedSequence<N, C, W> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.polynomial_hash());
    }
}

impl<const N: usize, const C: usize, W: StorageWord> Index<usize> for PackedSequence<N, C, W> {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &CODES[self.get(index) as usize]
    }
}

impl<const N: usize, const C: usize, W: StorageWord> Shl<DnaCharacter> for PackedSequence<N, C, W> {
    type Output = Self;

    fn shl(self, character: DnaCharacter) -> Self::Output {
        self.shift_left(character.code())
    }
}

impl<const N: usize, const C: usize, W: StorageWord> Shr<DnaCharacter> for PackedSequence<N, C, W> {
    type Output = Self;

    fn shr(self, character: DnaCharacter) -> Self::Output {
        self.shift_right(character.code())
    }
}

impl<const N: usize, const C: usize, W: StorageWord> Not for PackedSequence<N, C, W> {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.reverse_complement()
    }
}

impl<const N: usize, const C: usize, W: StorageWord> FromStr for PackedSequence<N, C, W> {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_from_ascii(s.as_bytes())
    }
}

impl<const N: usize, const C: usize, W: StorageWord> SymbolSource for PackedSequence<N, C, W> {
    fn symbol_count(&self) -> usize {
        N
    }

    fn symbol(&self, index: usize) -> u8 {
        self.get(index)
    }
}

impl<const N: usize, const C: usize, W: StorageWord> Display for PackedSequence<N, C, W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl<const N: usize, const C: usize, W: StorageWord> Debug for PackedSequence<N, C, W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_sentinel() {
            write!(f, "PackedSequence<{}>(sentinel)", N)
        } else {
            write!(f, "PackedSequence<{}>({})", N, self.as_string())
        }
    }
}

impl<'a, const N: usize, const C: usize, W: StorageWord> IntoIterator
    for &'a PackedSequence<N, C, W>
{
    type Item = u8;
    type IntoIter = PackedSequenceIterator<'a, N, C, W>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, const N: usize, const C: usize, W: StorageWord> Iterator
    for PackedSequenceIterator<'a, N, C, W>
{
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let result = self.sequence.code(self.front);
            self.front += 1;
            Some(result)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, const N: usize, const C: usize, W: StorageWord> DoubleEndedIterator
    for PackedSequenceIterator<'a, N, C, W>
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.sequence.code(self.back))
        } else {
            None
        }
    }
}

impl<'a, const N: usize, const C: usize, W: StorageWord> ExactSizeIterator
    for PackedSequenceIterator<'a, N, C, W>
{
}

impl<'a, const N: usize, const C: usize, W: StorageWord> FusedIterator
    for PackedSequenceIterator<'a, N, C, W>
{
}

#[cfg(test)]
mod tests {
    use super::{symbolwise_less, PackedSequence};
    use crate::error::ErrorKind;
    use crate::interface::alphabet::dna_alphabet::{ascii_to_code, DnaCharacter};
    use crate::interface::symbol_source::SymbolEncoding;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::cmp::Ordering;
    use std::convert::TryFrom;

    type Byte4 = PackedSequence<4, 1, u8>;
    type Byte5 = PackedSequence<5, 2, u8>;
    type Byte6 = PackedSequence<6, 2, u8>;
    type Kmer31 = PackedSequence<31, 1>;
    type Kmer33 = PackedSequence<33, 2>;
    type Kmer34 = PackedSequence<34, 2>;
    type Short7 = PackedSequence<7, 1, u16>;
    type Wide70 = PackedSequence<70, 2, u128>;

    fn character(ascii: u8) -> DnaCharacter {
        DnaCharacter::try_from(ascii).unwrap()
    }

    fn reverse_complement_string(ascii: &str) -> String {
        ascii
            .bytes()
            .rev()
            .map(|character| match character {
                b'A' => 'T',
                b'C' => 'G',
                b'G' => 'C',
                b'T' => 'A',
                _ => unreachable!(),
            })
            .collect()
    }

    fn genome_string(len: usize) -> impl Strategy<Value = String> {
        proptest::collection::vec(prop_oneof![Just('A'), Just('C'), Just('G'), Just('T')], len)
            .prop_map(|characters| characters.into_iter().collect())
    }

    #[test]
    fn test_binary_layout() {
        let sequence = Byte4::from_ascii(b"ACGT");
        assert_eq!(sequence.cells(), &[0b11_10_01_00]);
        assert_eq!(sequence.as_string(), "ACGT");
        assert_eq!(sequence.to_string(), "ACGT");
        assert_eq!(format!("{:?}", sequence), "PackedSequence<4>(ACGT)");
    }

    #[test]
    fn test_reverse_complement_of_palindrome() {
        let sequence = Byte4::from_ascii(b"ACGT");
        assert_eq!(!sequence, sequence);
        assert!(sequence.is_self_complemental());
    }

    #[test]
    fn test_reverse_complement() {
        let sequence = Byte5::from_ascii(b"ATTCG");
        assert_eq!(sequence.reverse_complement().as_string(), "CGAAT");
        assert!(sequence.reverse_complement().has_zero_padding());
        assert!(!sequence.is_self_complemental());

        let sequence = Short7::from_ascii(b"ATTCGGT");
        assert_eq!((!sequence).as_string(), "ACCGAAT");
    }

    #[test]
    fn test_push_back() {
        let sequence = Byte4::from_ascii(b"ACGT");
        let pushed: Byte5 = sequence.push_back(0);
        assert_eq!(pushed.as_string(), "ACGTA");
        assert!(pushed.has_zero_padding());
        let pushed: Byte6 = pushed.push_back(3);
        assert_eq!(pushed.as_string(), "ACGTAT");
    }

    #[test]
    fn test_push_front() {
        let sequence = Byte4::from_ascii(b"ACGT");
        let pushed: Byte5 = sequence.push_front(2);
        assert_eq!(pushed.as_string(), "GACGT");
        assert!(pushed.has_zero_padding());

        let kmer = Kmer33::from_ascii(b"ACGTACGTACGTACGTACGTACGTACGTACGTC");
        let pushed: Kmer34 = kmer.push_front(3);
        assert_eq!(pushed.as_string(), "TACGTACGTACGTACGTACGTACGTACGTACGTC");
    }

    #[test]
    fn test_shift_left() {
        let sequence = Byte4::from_ascii(b"ACGT");
        assert_eq!((sequence << character(b'A')).as_string(), "CGTA");
        assert_eq!(sequence.shift_left(1).as_string(), "CGTC");

        let sequence = Byte5::from_ascii(b"ACGTC");
        let shifted = sequence.shift_left(3);
        assert_eq!(shifted.as_string(), "CGTCT");
        assert_eq!(shifted.cells()[1] & 0b1111_1100, 0);
    }

    #[test]
    fn test_shift_right() {
        let sequence = Byte4::from_ascii(b"ACGT");
        assert_eq!((sequence >> character(b'G')).as_string(), "GACG");

        let sequence = Byte5::from_ascii(b"ACGTC");
        let shifted = sequence.shift_right(3);
        assert_eq!(shifted.as_string(), "TACGT");
        assert_eq!(shifted.cells()[1] & 0b1111_1100, 0);

        let sequence = Kmer33::from_ascii(b"ACGTACGTACGTACGTACGTACGTACGTACGTC");
        assert_eq!(
            sequence.shift_right(2).as_string(),
            "GACGTACGTACGTACGTACGTACGTACGTACGT"
        );
    }

    #[test]
    fn test_sentinel_padding_is_not_carried() {
        let sentinel = Byte5::sentinel();

        let shifted = sentinel.shift_left(0);
        assert_eq!(shifted.cells(), &[0xff, 0]);
        assert_eq!(shifted.last(), 0);
        assert_eq!(shifted, Byte5::from_ascii(b"TTTTA"));
        assert!(shifted.has_zero_padding());
        assert_eq!(shifted.cmp(&Byte5::from_ascii(b"TTTTA")), Ordering::Equal);

        let pushed: Byte6 = sentinel.push_back(0);
        assert_eq!(pushed.cells(), &[0xff, 0b0011]);
        assert_eq!(pushed, Byte6::from_ascii(b"TTTTTA"));
        assert!(pushed.has_zero_padding());

        let shifted = sentinel.shift_right(0);
        assert_eq!(shifted, Byte5::from_ascii(b"ATTTT"));
        let pushed: Byte6 = sentinel.push_front(0);
        assert_eq!(pushed, Byte6::from_ascii(b"ATTTTT"));
        assert_eq!(sentinel.prefix::<3, 1>(), PackedSequence::<3, 1, u8>::from_ascii(b"TTT"));
    }

    #[test]
    fn test_padding_after_every_operation() {
        let sequence = Byte5::from_ascii(b"TTTTT");
        assert_eq!(sequence.cells()[1], 0b11);
        for code in 0..4 {
            assert_eq!(sequence.shift_left(code).cells()[1] & !0b11, 0);
            assert_eq!(sequence.shift_right(code).cells()[1] & !0b11, 0);
        }
        assert_eq!(sequence.reverse_complement().cells()[1] & !0b11, 0);
        assert_eq!(Byte5::from_cells(&[0xff, 0xff]).cells(), &[0xff, 0b11]);
        assert_eq!(sequence.prefix::<3, 1>().cells(), &[0b11_11_11]);
        assert_eq!(sequence.suffix::<3, 1>().cells(), &[0b11_11_11]);
    }

    #[test]
    fn test_prefix_and_suffix() {
        let kmer = Kmer33::from_ascii(b"ACGTACGTACGTACGTACGTACGTACGTACGTC");
        let prefix: Kmer31 = kmer.prefix();
        let suffix: Kmer31 = kmer.suffix();
        assert_eq!(prefix.as_string(), "ACGTACGTACGTACGTACGTACGTACGTACG");
        assert_eq!(suffix.as_string(), "GTACGTACGTACGTACGTACGTACGTACGTC");
        let same: Kmer33 = kmer.prefix();
        assert_eq!(same, kmer);
    }

    #[test]
    fn test_from_source() {
        let genome = "TTACGTAA";
        let window = Byte4::from_source(genome, SymbolEncoding::Ascii, 2, 4);
        assert_eq!(window.as_string(), "ACGT");

        let partial = Byte4::from_source(genome, SymbolEncoding::Ascii, 0, 2);
        assert_eq!(partial.as_string(), "TTAA");

        let codes = [3u8, 2, 1, 0, 1];
        let window = Byte4::from_source(&codes[..], SymbolEncoding::TwoBit, 1, 4);
        assert_eq!(window.as_string(), "GCAC");

        let long = Kmer33::from_ascii(b"ACGTACGTACGTACGTACGTACGTACGTACGTC");
        let inner = Byte5::from_source(&long, SymbolEncoding::TwoBit, 29, 4);
        assert_eq!(inner.as_string(), "CGTCA");
    }

    #[test]
    fn test_try_from_source() {
        let genome = "TTACNTAA";
        assert_eq!(
            Byte4::try_from_source(genome, SymbolEncoding::Ascii, 0, 4)
                .unwrap()
                .as_string(),
            "TTAC"
        );
        assert!(matches!(
            Byte4::try_from_source(genome, SymbolEncoding::Ascii, 2, 4)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidCharacter(b'N', 4)
        ));
        assert!(matches!(
            Byte4::try_from_source(genome, SymbolEncoding::Ascii, 6, 4)
                .unwrap_err()
                .kind(),
            ErrorKind::WrongLength(4, 2)
        ));
        assert!(matches!(
            Byte4::try_from_source(genome, SymbolEncoding::Ascii, 0, 5)
                .unwrap_err()
                .kind(),
            ErrorKind::WrongLength(4, 5)
        ));
        assert!(matches!(
            Byte4::try_from_source(&[0u8, 1, 4, 2][..], SymbolEncoding::TwoBit, 0, 4)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidCode(4, 2)
        ));
    }

    #[test]
    #[should_panic]
    fn test_from_source_invalid_code() {
        Byte4::from_source(&[0u8, 1, 4, 2][..], SymbolEncoding::TwoBit, 0, 4);
    }

    #[test]
    #[should_panic]
    fn test_from_ascii_wrong_length() {
        Byte4::from_ascii(b"ACG");
    }

    #[test]
    #[should_panic]
    fn test_from_ascii_invalid_character() {
        Byte4::from_ascii(b"ACNT");
    }

    #[test]
    fn test_nul_terminated() {
        assert_eq!(
            Byte4::from_nul_terminated(b"GGCA\0TT").as_string(),
            "GGCA"
        );
        assert!(matches!(
            Byte4::try_from_nul_terminated(b"GGCAT\0").unwrap_err().kind(),
            ErrorKind::MissingTerminator(4)
        ));
        assert!(matches!(
            Byte4::try_from_nul_terminated(b"GGCA").unwrap_err().kind(),
            ErrorKind::MissingTerminator(4)
        ));
    }

    #[test]
    #[should_panic]
    fn test_nul_terminated_too_early() {
        Byte4::from_nul_terminated(b"GG\0");
    }

    #[test]
    fn test_fallible_construction() {
        assert!(matches!(
            "ACGTA".parse::<Byte4>().unwrap_err().kind(),
            ErrorKind::WrongLength(4, 5)
        ));
        assert!(matches!(
            "ACgT".parse::<Byte4>().unwrap_err().kind(),
            ErrorKind::InvalidCharacter(b'g', 2)
        ));
        assert_eq!("ACGT".parse::<Byte4>().unwrap(), Byte4::from_ascii(b"ACGT"));
    }

    #[test]
    fn test_accessors() {
        let sequence = Short7::from_ascii(b"GATTACA");
        assert_eq!(sequence.first(), 2);
        assert_eq!(sequence.last(), 0);
        assert_eq!(sequence.get(3), 3);
        assert_eq!(sequence[4], 0);
        assert_eq!(sequence.len(), 7);
        assert_eq!(sequence.iter().rev().collect::<Vec<_>>(), vec![0, 1, 0, 3, 3, 0, 2]);
        assert_eq!(sequence.iter().len(), 7);
        assert_eq!(sequence.clone_as_vec(), b"GATTACA".to_vec());
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range() {
        Short7::from_ascii(b"GATTACA").get(7);
    }

    #[test]
    fn test_default_and_sentinel() {
        let default = Byte5::default();
        let sentinel = Byte5::sentinel();
        assert_eq!(default.as_string(), "AAAAA");
        assert_ne!(default, sentinel);
        assert!(sentinel.is_sentinel());
        assert!(!sentinel.has_zero_padding());
        assert_ne!(sentinel, Byte5::from_ascii(b"TTTTT"));
        assert!(sentinel > Byte5::from_ascii(b"TTTTT"));
        assert!(default < Byte5::from_ascii(b"AAAAC"));
        assert_eq!(format!("{:?}", sentinel), "PackedSequence<5>(sentinel)");
    }

    #[test]
    fn test_order() {
        // The order is by symbols from the front, not by the storage cells.
        let a = Byte5::from_ascii(b"ACAAA");
        let b = Byte5::from_ascii(b"CAAAA");
        assert!(a.cells()[0] > b.cells()[0]);
        assert!(a < b);
        assert!(symbolwise_less(&a, &b));
        assert!(!symbolwise_less(&b, &a));
        assert!(!symbolwise_less(&a, &a));
    }

    #[test]
    fn test_canonical() {
        let forward = Byte5::from_ascii(b"TTGCA");
        let reverse = Byte5::from_ascii(b"TGCAA");
        assert!(!forward.is_canonical());
        assert!(reverse.is_canonical());
        assert_eq!(forward.canonical(), reverse);
        assert_eq!(reverse.canonical(), reverse);
    }

    #[test]
    fn test_hash() {
        let a = Kmer33::from_ascii(b"ACGTACGTACGTACGTACGTACGTACGTACGTC");
        let b = a.shift_left(1).shift_right(0);
        assert_eq!(a, b);
        assert_eq!(a.polynomial_hash(), b.polynomial_hash());
        assert_eq!(a.multiple_hash(3, 17), b.multiple_hash(3, 17));
        assert_ne!(a.multiple_hash(0, 17), a.multiple_hash(1, 17));

        let single = Byte4::from_ascii(b"ACGT");
        assert_eq!(single.polynomial_hash(), 239 * 31 + 0b11_10_01_00);
        assert_eq!(single.multiple_hash(0, 5), (5 << 1) + 0b11_10_01_00);
        assert_eq!(single.multiple_hash(100, 5), 0b11_10_01_00);
        assert_eq!(single.multiple_hash(usize::MAX, 5), 0b11_10_01_00);

        let set: HashSet<_> = [a, b, Kmer33::default()].iter().copied().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_serialization() {
        let sequence = Wide70::from_ascii(&[b'G'; 70]);
        let mut buffer = Vec::new();
        sequence.write_to(&mut buffer).unwrap();
        assert_eq!(buffer.len(), Wide70::RECORD_SIZE);
        assert_eq!(buffer.len(), 32);

        let mut read = Wide70::default();
        read.read_into(&mut buffer.as_slice()).unwrap();
        assert_eq!(read, sequence);

        let mut untouched = Wide70::default();
        assert!(untouched.read_into(&mut &buffer[..31]).is_err());
        assert_eq!(untouched, Wide70::default());
    }

    #[test]
    fn test_serialization_write_failure() {
        let sequence = Wide70::from_ascii(&[b'T'; 70]);
        let mut too_small = [0u8; 20];
        let mut writer = &mut too_small[..];
        assert!(matches!(
            sequence.write_to(&mut writer).unwrap_err().kind(),
            ErrorKind::Io(_)
        ));
    }

    #[test]
    fn test_serialization_rejects_padding() {
        let bytes = [0b1110_0100u8, 0b0000_1111];
        assert!(matches!(
            Byte5::read_from(&mut &bytes[..]).unwrap_err().kind(),
            ErrorKind::InvalidPadding
        ));
        let sentinel = Byte5::read_from(&mut &[0xffu8, 0xff][..]).unwrap();
        assert!(sentinel.is_sentinel());
    }

    proptest! {
        #[test]
        fn string_round_trip(ascii in genome_string(33)) {
            let kmer = Kmer33::from_ascii(ascii.as_bytes());
            prop_assert_eq!(kmer.as_string(), ascii);
            prop_assert!(kmer.has_zero_padding());
        }

        #[test]
        fn serialization_round_trip(ascii in genome_string(70)) {
            let sequence = Wide70::from_ascii(ascii.as_bytes());
            let mut buffer = Vec::new();
            sequence.write_to(&mut buffer).unwrap();
            prop_assert_eq!(Wide70::read_from(&mut buffer.as_slice()).unwrap(), sequence);
        }

        #[test]
        fn shift_left_moves_symbols(ascii in genome_string(33), code in 0u8..4) {
            let kmer = Kmer33::from_ascii(ascii.as_bytes());
            let shifted = kmer.shift_left(code);
            prop_assert_eq!(shifted.last(), code);
            for index in 0..32 {
                prop_assert_eq!(shifted.code(index), kmer.code(index + 1));
            }
            prop_assert!(shifted.has_zero_padding());
        }

        #[test]
        fn shift_right_moves_symbols(ascii in genome_string(5), code in 0u8..4) {
            let sequence = Byte5::from_ascii(ascii.as_bytes());
            let shifted = sequence.shift_right(code);
            prop_assert_eq!(shifted.first(), code);
            for index in 1..5 {
                prop_assert_eq!(shifted.code(index), sequence.code(index - 1));
            }
            prop_assert!(shifted.has_zero_padding());
        }

        #[test]
        fn reverse_complement_matches_strings(ascii in genome_string(33)) {
            let kmer = Kmer33::from_ascii(ascii.as_bytes());
            let reverse_complement = kmer.reverse_complement();
            prop_assert_eq!(reverse_complement.as_string(), reverse_complement_string(&ascii));
            prop_assert_eq!(!reverse_complement, kmer);
            for index in 0..33 {
                prop_assert_eq!(reverse_complement.code(index), kmer.code(32 - index) ^ 3);
            }
        }

        #[test]
        fn equal_sequences_hash_equally(ascii in genome_string(31), code in 0u8..4) {
            let kmer = Kmer31::from_ascii(ascii.as_bytes());
            let first = ascii_to_code(ascii.as_bytes()[0]).unwrap();
            let rebuilt = kmer.shift_left(code).shift_right(first);
            prop_assert_eq!(rebuilt, kmer);
            prop_assert_eq!(rebuilt.polynomial_hash(), kmer.polynomial_hash());
        }

        #[test]
        fn order_matches_strings(left in genome_string(34), right in genome_string(34)) {
            let left_kmer = Kmer34::from_ascii(left.as_bytes());
            let right_kmer = Kmer34::from_ascii(right.as_bytes());
            prop_assert_eq!(left_kmer.cmp(&right_kmer), left.cmp(&right));
        }

        #[test]
        fn push_back_then_prefix(ascii in genome_string(33), code in 0u8..4) {
            let kmer = Kmer33::from_ascii(ascii.as_bytes());
            let pushed: Kmer34 = kmer.push_back(code);
            prop_assert_eq!(pushed.last(), code);
            prop_assert_eq!(pushed.prefix::<33, 2>(), kmer);
            let pushed: Kmer34 = kmer.push_front(code);
            prop_assert_eq!(pushed.first(), code);
            prop_assert_eq!(pushed.suffix::<33, 2>(), kmer);
        }
    }
}
