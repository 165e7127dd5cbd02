//! Unsigned integer types that can serve as storage cells of a packed sequence.

use num_traits::{PrimInt, Unsigned};
use std::fmt::Debug;
use std::hash::Hash;
use std::io::{Read, Write};

/// An unsigned integer type used as storage cell of a two-bit packed sequence.
///
/// Each cell holds `SYMBOLS` two-bit codes, the first symbol in the least significant bits.
pub trait StorageWord: PrimInt + Unsigned + Hash + Debug + Default + Send + Sync + 'static {
    /// The width of this type in bits.
    const BITS: usize;

    /// The amount of two-bit symbols that fit into one cell.
    const SYMBOLS: usize = Self::BITS / 2;

    /// The width of this type in bytes.
    const BYTES: usize = Self::BITS / 8;

    /// Converts a two-bit code into a cell holding it in its lowest two bits.
    fn from_code(code: u8) -> Self;

    /// Returns the lowest two bits of this cell.
    fn low_code(self) -> u8;

    /// Returns the value this cell contributes to hash functions.
    fn hash_input(self) -> u64;

    /// Writes this cell in native byte order.
    fn write_native<Writer: Write + ?Sized>(self, writer: &mut Writer) -> std::io::Result<()>;

    /// Reads a cell in native byte order.
    fn read_native<Reader: Read + ?Sized>(reader: &mut Reader) -> std::io::Result<Self>;
}

macro_rules! impl_storage_word {
    ($word:ty, |$value:ident| $hash_input:expr) => {
        impl StorageWord for $word {
            const BITS: usize = std::mem::size_of::<$word>() * 8;

            #[inline]
            fn from_code(code: u8) -> Self {
                code as $word
            }

            #[inline]
            fn low_code(self) -> u8 {
                (self & 3) as u8
            }

            #[inline]
            fn hash_input(self) -> u64 {
                let $value = self;
                $hash_input
            }

            fn write_native<Writer: Write + ?Sized>(
                self,
                writer: &mut Writer,
            ) -> std::io::Result<()> {
                writer.write_all(&self.to_ne_bytes())
            }

            fn read_native<Reader: Read + ?Sized>(reader: &mut Reader) -> std::io::Result<Self> {
                let mut bytes = [0; std::mem::size_of::<$word>()];
                reader.read_exact(&mut bytes)?;
                Ok(<$word>::from_ne_bytes(bytes))
            }
        }
    };
}

impl_storage_word!(u8, |value| value as u64);
impl_storage_word!(u16, |value| value as u64);
impl_storage_word!(u32, |value| value as u64);
impl_storage_word!(u64, |value| value);
impl_storage_word!(u128, |value| (value as u64) ^ ((value >> 64) as u64));

/// Returns the amount of cells of `word_bits` bits required to store `symbols` two-bit symbols.
///
/// This is the value of the cell count parameter of a [PackedSequence](crate::implementation::packed_sequence::PackedSequence).
pub const fn cells_for(symbols: usize, word_bits: usize) -> usize {
    let symbols_per_word = word_bits / 2;
    (symbols + symbols_per_word - 1) / symbols_per_word
}
