use crate::runtime_k::dispatch_kmer_size;
use crate::CliOptions;
use clap::Parser;
use compact_kmer::implementation::DefaultKmer;
use compact_kmer::io::read_record;
use log::{info, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};

#[derive(Parser)]
pub struct DumpKmersCommand {
    #[clap(short, long, help = "A file written by count-kmers")]
    pub input: String,

    #[clap(
        short,
        long,
        help = "The k-mer size the input was written with, one of 11, 15, 21, 25, 27, 31, 33, 41, 55, 63, 77, 99 or 127"
    )]
    pub kmer_size: usize,

    #[clap(
        short,
        long,
        help = "The file the k-mers and their counts are written to as tab separated lines. If not given, they are written to stdout"
    )]
    pub output: Option<String>,
}

/// Reads the next k-mer and its count, or returns `None` at the end of the input.
pub(crate) fn read_kmer_count<const K: usize, const C: usize>(
    reader: &mut impl Read,
) -> crate::Result<Option<(DefaultKmer<K, C>, u32)>> {
    let kmer = match read_record(reader)? {
        Some(kmer) => kmer,
        None => return Ok(None),
    };
    let mut count = [0; 4];
    reader.read_exact(&mut count)?;
    Ok(Some((kmer, u32::from_ne_bytes(count))))
}

pub(crate) fn dump_kmers(_options: &CliOptions, subcommand: &DumpKmersCommand) -> crate::Result<()> {
    dispatch_kmer_size!(subcommand.kmer_size, dump_kmers_with_size(subcommand))
}

fn dump_kmers_with_size<const K: usize, const C: usize>(
    subcommand: &DumpKmersCommand,
) -> crate::Result<()> {
    info!("Reading {}-mers from: {}", K, &subcommand.input);
    let mut reader = BufReader::new(File::open(&subcommand.input)?);
    let mut writer: BufWriter<Box<dyn Write>> = match &subcommand.output {
        Some(output) => {
            info!("Creating/overwriting output file: {}", output);
            BufWriter::new(Box::new(File::create(output)?))
        }
        None => BufWriter::new(Box::new(std::io::stdout())),
    };

    let mut kmers_read = 0;
    while let Some((kmer, count)) = read_kmer_count::<K, C>(&mut reader)? {
        writeln!(writer, "{}\t{}", kmer, count)?;
        kmers_read += 1;
    }
    writer.flush()?;

    if kmers_read == 0 {
        warn!("The input contains no k-mers");
    } else {
        info!("Dumped {} k-mers", kmers_read);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::read_kmer_count;
    use crate::count_kmers::write_kmer_counts;
    use compact_kmer::implementation::DefaultKmer;

    #[test]
    fn test_kmer_counts_round_trip() {
        let kmer_counts = vec![
            (DefaultKmer::<33, 2>::from_ascii(&[b'C'; 33]), 7),
            (DefaultKmer::<33, 2>::from_ascii(&[b'T'; 33]), 1),
        ];
        let mut buffer = Vec::new();
        write_kmer_counts(&kmer_counts, &mut buffer).unwrap();
        assert_eq!(buffer.len(), 2 * (16 + 4));

        let mut reader = buffer.as_slice();
        let mut read = Vec::new();
        while let Some(kmer_count) = read_kmer_count::<33, 2>(&mut reader).unwrap() {
            read.push(kmer_count);
        }
        assert_eq!(read, kmer_counts);
    }

    #[test]
    fn test_missing_count() {
        let mut buffer = Vec::new();
        DefaultKmer::<11, 1>::from_ascii(b"ACGTACGTACG")
            .write_to(&mut buffer)
            .unwrap();
        let mut reader = buffer.as_slice();
        assert!(read_kmer_count::<11, 1>(&mut reader).is_err());
    }
}
