use crate::runtime_k::dispatch_kmer_size;
use crate::CliOptions;
use clap::Parser;
use compact_kmer::implementation::kmer_iterator::KmerIterator;
use compact_kmer::implementation::DefaultKmer;
use log::{error, info, warn};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};

#[derive(Parser)]
pub struct CountKmersCommand {
    #[clap(short, long, help = "The input file in fasta format")]
    pub input: String,

    #[clap(
        short,
        long,
        help = "The file the k-mers are stored into, as binary k-mer records each followed by its count as 32-bit integer in native byte order"
    )]
    pub output: String,

    #[clap(
        short,
        long,
        help = "The k-mer size, one of 11, 15, 21, 25, 27, 31, 33, 41, 55, 63, 77, 99 or 127"
    )]
    pub kmer_size: usize,

    #[clap(
        long,
        help = "Count each k-mer together with its reverse complement, and output only the smaller of the two"
    )]
    pub canonical: bool,

    #[clap(
        long,
        default_value = "1",
        help = "K-mers that occur less often than this are not written to the output"
    )]
    pub min_abundance: u32,
}

/// Counts all k-mers of the given genome strings.
/// Windows containing characters other than ACGT are skipped.
pub(crate) fn count_genome_kmers<'a, const K: usize, const C: usize>(
    genomes: impl IntoIterator<Item = &'a [u8]>,
    canonical: bool,
) -> HashMap<DefaultKmer<K, C>, u32> {
    let mut counts = HashMap::new();
    for genome in genomes {
        for (_, kmer) in KmerIterator::<K, C>::new(genome) {
            let kmer = if canonical { kmer.canonical() } else { kmer };
            let count = counts.entry(kmer).or_insert(0u32);
            *count = count.saturating_add(1);
        }
    }
    counts
}

/// Writes each k-mer as binary record followed by its count.
pub(crate) fn write_kmer_counts<const K: usize, const C: usize>(
    kmer_counts: &[(DefaultKmer<K, C>, u32)],
    writer: &mut impl Write,
) -> crate::Result<()> {
    for (kmer, count) in kmer_counts {
        kmer.write_to(writer)?;
        writer.write_all(&count.to_ne_bytes())?;
    }
    Ok(())
}

fn print_abundance_statistics<const K: usize, const C: usize>(
    kmer_counts: &[(DefaultKmer<K, C>, u32)],
) {
    info!("");
    info!(" === {}-mer Statistics === ", K);
    info!("");

    if kmer_counts.is_empty() {
        warn!("No k-mers were written");
        info!("");
        return;
    }

    let abundances: Vec<_> = kmer_counts.iter().map(|(_, count)| *count).collect();
    let min_abundance = abundances.iter().min().copied().unwrap_or_default();
    let max_abundance = abundances.iter().max().copied().unwrap_or_default();
    let median_abundance = statistical::median(&abundances);
    let mean_abundance = statistical::mean(
        &abundances
            .iter()
            .map(|&count| count as f64)
            .collect::<Vec<_>>(),
    );

    info!("Distinct k-mers: {}", kmer_counts.len());
    info!("Minimum abundance: {}", min_abundance);
    info!("Maximum abundance: {}", max_abundance);
    info!("Median abundance: {}", median_abundance);
    info!("Mean abundance: {:.1}", mean_abundance);
    info!("");
}

pub(crate) fn count_kmers(
    _options: &CliOptions,
    subcommand: &CountKmersCommand,
) -> crate::Result<()> {
    if subcommand.min_abundance == 0 {
        error!("The minimum abundance must be at least one");
        return Err(crate::ErrorKind::Parameter.into());
    }

    dispatch_kmer_size!(subcommand.kmer_size, count_kmers_with_size(subcommand))
}

fn count_kmers_with_size<const K: usize, const C: usize>(
    subcommand: &CountKmersCommand,
) -> crate::Result<()> {
    info!(
        "Counting {}{}-mers",
        if subcommand.canonical { "canonical " } else { "" },
        K
    );

    info!("Reading genome from: {}", &subcommand.input);
    let records = bio::io::fasta::Reader::from_file(&subcommand.input)
        .map_err(|e| {
            error!("Error reading genome file");
            e
        })?
        .records();

    let mut genomes = Vec::new();
    for record in records {
        match record {
            Ok(record) => genomes.push(record),
            Err(err) => {
                error!("Error reading genome file");
                return Err(err.into());
            }
        }
    }

    if genomes.is_empty() {
        warn!("Genome contains no fasta records");
    } else {
        info!("Found {} records", genomes.len());
    }

    let counts = count_genome_kmers::<K, C>(
        genomes.iter().map(|record| record.seq()),
        subcommand.canonical,
    );
    let total_kmers: u64 = counts.values().map(|&count| u64::from(count)).sum();
    info!(
        "Found {} k-mers of which {} are distinct",
        total_kmers,
        counts.len()
    );

    let mut kmer_counts: Vec<_> = counts
        .into_iter()
        .filter(|(_, count)| *count >= subcommand.min_abundance)
        .collect();
    kmer_counts.sort_unstable();

    info!("Creating/overwriting output file: {}", &subcommand.output);
    let mut writer = BufWriter::new(File::create(&subcommand.output)?);
    write_kmer_counts(&kmer_counts, &mut writer)?;
    writer.flush()?;
    info!("Wrote {} k-mers", kmer_counts.len());

    print_abundance_statistics(&kmer_counts);
    Ok(())
}
