//! Indexable sources of symbols that packed sequences can be constructed from.

/// The encoding of the symbols of a [SymbolSource].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SymbolEncoding {
    /// The symbols are ASCII characters `A`, `C`, `G` or `T`.
    Ascii,
    /// The symbols are two-bit codes `0`, `1`, `2` or `3`.
    TwoBit,
}

/// Anything that can be indexed to obtain a symbol byte.
///
/// Whether the bytes are ASCII characters or two-bit codes is not known to the source,
/// it is specified by the caller as a [SymbolEncoding].
pub trait SymbolSource {
    /// The amount of symbols in this source.
    fn symbol_count(&self) -> usize;

    /// The symbol byte at the given index.
    /// Panics if `index >= self.symbol_count()`.
    fn symbol(&self, index: usize) -> u8;
}

impl SymbolSource for [u8] {
    fn symbol_count(&self) -> usize {
        self.len()
    }

    fn symbol(&self, index: usize) -> u8 {
        self[index]
    }
}

impl<const LEN: usize> SymbolSource for [u8; LEN] {
    fn symbol_count(&self) -> usize {
        LEN
    }

    fn symbol(&self, index: usize) -> u8 {
        self[index]
    }
}

impl SymbolSource for Vec<u8> {
    fn symbol_count(&self) -> usize {
        self.len()
    }

    fn symbol(&self, index: usize) -> u8 {
        self[index]
    }
}

impl SymbolSource for str {
    fn symbol_count(&self) -> usize {
        self.len()
    }

    fn symbol(&self, index: usize) -> u8 {
        self.as_bytes()[index]
    }
}

impl SymbolSource for String {
    fn symbol_count(&self) -> usize {
        self.len()
    }

    fn symbol(&self, index: usize) -> u8 {
        self.as_bytes()[index]
    }
}

impl<Source: SymbolSource + ?Sized> SymbolSource for &Source {
    fn symbol_count(&self) -> usize {
        (**self).symbol_count()
    }

    fn symbol(&self, index: usize) -> u8 {
        (**self).symbol(index)
    }
}
