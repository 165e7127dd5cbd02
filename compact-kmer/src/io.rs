//! Streams of fixed-size packed sequence records.
//!
//! A record is the storage of one [PackedSequence] in native byte order, without any header.
//! Reader and writer must agree on the sequence length and the storage word type.

use crate::error::{ErrorKind, Result};
use crate::implementation::packed_sequence::PackedSequence;
use crate::interface::word::StorageWord;
use std::io::{Read, Write};
use std::marker::PhantomData;

/// Reads bytes until `buffer` is full or the stream ends, returning the amount of bytes read.
fn fill_or_eof<Reader: Read + ?Sized>(reader: &mut Reader, buffer: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(amount) => filled += amount,
            Err(error) if error.kind() == std::io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error.into()),
        }
    }
    Ok(filled)
}

/// Reads one record, or returns `None` if the stream ends exactly before the record.
/// A stream ending within the record is an error.
pub fn read_record<const N: usize, const C: usize, W: StorageWord, Reader: Read + ?Sized>(
    reader: &mut Reader,
) -> Result<Option<PackedSequence<N, C, W>>> {
    let record_size = PackedSequence::<N, C, W>::RECORD_SIZE;
    let mut buffer = vec![0; record_size];
    match fill_or_eof(reader, &mut buffer)? {
        0 => Ok(None),
        filled if filled < record_size => {
            Err(ErrorKind::TruncatedRecord(record_size, filled).into())
        }
        _ => PackedSequence::read_from(&mut buffer.as_slice()).map(Some),
    }
}

/// Writes all given sequences as consecutive records, returning the amount of records written.
pub fn write_records<
    'a,
    const N: usize,
    const C: usize,
    W: StorageWord,
    Writer: Write + ?Sized,
    Records: IntoIterator<Item = &'a PackedSequence<N, C, W>>,
>(
    records: Records,
    writer: &mut Writer,
) -> Result<usize> {
    let mut amount = 0;
    for record in records {
        record.write_to(writer)?;
        amount += 1;
    }
    trace!(
        "Wrote {} records of {} bytes",
        amount,
        PackedSequence::<N, C, W>::RECORD_SIZE
    );
    Ok(amount)
}

/// An iterator over the records of a stream.
///
/// Ends at the end of the stream, or after yielding the first error.
pub struct RecordReader<Reader: Read, const N: usize, const C: usize, W: StorageWord = u64> {
    reader: Reader,
    records_read: usize,
    finished: bool,
    phantom_data: PhantomData<W>,
}

impl<Reader: Read, const N: usize, const C: usize, W: StorageWord> RecordReader<Reader, N, C, W> {
    /// Creates a record reader over the given stream.
    /// The stream should be buffered.
    pub fn new(reader: Reader) -> Self {
        Self {
            reader,
            records_read: 0,
            finished: false,
            phantom_data: Default::default(),
        }
    }

    /// The amount of records read successfully so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> Reader {
        self.reader
    }
}

impl<Reader: Read, const N: usize, const C: usize, W: StorageWord> Iterator
    for RecordReader<Reader, N, C, W>
{
    type Item = Result<PackedSequence<N, C, W>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match read_record(&mut self.reader) {
            Ok(Some(record)) => {
                self.records_read += 1;
                Some(Ok(record))
            }
            Ok(None) => {
                debug!(
                    "Read {} records of {} bytes",
                    self.records_read,
                    PackedSequence::<N, C, W>::RECORD_SIZE
                );
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}
