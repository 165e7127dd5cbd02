//! The DNA alphabet, consisting of characters A, C, G and T.
//!
//! Characters are encoded as two-bit codes:
//! ```txt
//! 00 - A
//! 01 - C
//! 10 - G
//! 11 - T
//! ```
//! With this encoding, the complement of a code is its bitwise xor with `0b11`.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

/// A character of a DNA alphabet: A, C, G or T.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct DnaCharacter {
    character: u8,
}

static DNA_CHARACTER_TO_ASCII_TABLE: [u8; 4] = [b'A', b'C', b'G', b'T'];

static ASCII_TO_DNA_CHARACTER_TABLE: [u8; 256] = [
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 0, 4, 1, 4, 4, 4, 2, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 3, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
    4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4, 4,
];

/// Returns the two-bit code of the given ASCII character, or `None` if it is not one of `A`, `C`, `G` or `T`.
#[inline]
pub fn ascii_to_code(ascii: u8) -> Option<u8> {
    let code = ASCII_TO_DNA_CHARACTER_TABLE[ascii as usize];
    if code < 4 {
        Some(code)
    } else {
        None
    }
}

/// Returns the ASCII character of the given two-bit code.
/// Panics if the code is not smaller than four.
#[inline]
pub fn code_to_ascii(code: u8) -> u8 {
    DNA_CHARACTER_TO_ASCII_TABLE[code as usize]
}

/// Returns the two-bit code of the complement of the character with the given code.
#[inline]
pub fn complement_code(code: u8) -> u8 {
    code ^ 3
}

/// Returns true if the given ASCII character represents a valid DNA character.
// Note: do not add more characters here, but make a new method if required.
pub fn is_valid_ascii_character(ascii: u8) -> bool {
    ascii_to_code(ascii).is_some()
}

/// Returns true if the given byte is a valid two-bit code.
pub fn is_valid_code(code: u8) -> bool {
    code < 4
}

impl DnaCharacter {
    /// The two-bit code of this character.
    pub fn code(&self) -> u8 {
        self.character
    }
}

impl From<DnaCharacter> for u8 {
    fn from(character: DnaCharacter) -> u8 {
        code_to_ascii(character.character)
    }
}

impl TryFrom<u8> for DnaCharacter {
    type Error = ();

    fn try_from(ascii: u8) -> Result<Self, Self::Error> {
        ascii_to_code(ascii)
            .map(|character| Self { character })
            .ok_or(())
    }
}

impl Display for DnaCharacter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", code_to_ascii(self.character) as char)
    }
}
