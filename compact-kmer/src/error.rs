error_chain! {
    foreign_links {
        Io(std::io::Error)
        /// A wrapper for errors thrown by the underlying stream.
        ;
    }

    errors {
        InvalidCharacter(character: u8, position: usize) {
            description("the sequence contains a character other than A, C, G or T")
            display("invalid character {:?} (code {}) at position {}", *character as char, character, position)
        }

        InvalidCode(code: u8, position: usize) {
            description("the sequence contains a two-bit code larger than three")
            display("invalid two-bit code {} at position {}", code, position)
        }

        WrongLength(expected: usize, actual: usize) {
            description("the sequence has the wrong length")
            display("expected a sequence of length {}, but got length {}", expected, actual)
        }

        MissingTerminator(expected: usize) {
            description("the zero terminator is not at the end of the sequence")
            display("expected a zero terminator at position {}", expected)
        }

        InvalidPadding {
            description("a record has non-zero bits after its last symbol")
            display("a record has non-zero bits after its last symbol")
        }

        TruncatedRecord(expected: usize, actual: usize) {
            description("the stream ended in the middle of a record")
            display("the stream ended in the middle of a record: expected {} bytes, but got {}", expected, actual)
        }
    }
}
