use crate::runtime_k::dispatch_kmer_size;
use crate::CliOptions;
use clap::Parser;
use compact_kmer::implementation::DefaultKmer;
use log::{error, info};

#[derive(Parser)]
pub struct ReverseComplementCommand {
    #[clap(
        short,
        long,
        help = "The k-mer size, one of 11, 15, 21, 25, 27, 31, 33, 41, 55, 63, 77, 99 or 127. Defaults to the length of the first k-mer"
    )]
    pub kmer_size: Option<usize>,

    #[clap(help = "The k-mers, as strings over ACGT")]
    pub kmers: Vec<String>,
}

pub(crate) fn reverse_complement(
    _options: &CliOptions,
    subcommand: &ReverseComplementCommand,
) -> crate::Result<()> {
    let kmer_size = match (subcommand.kmer_size, subcommand.kmers.first()) {
        (Some(kmer_size), _) => kmer_size,
        (None, Some(kmer)) => kmer.len(),
        (None, None) => {
            error!("Neither a k-mer size nor any k-mers were given");
            return Err(crate::ErrorKind::Parameter.into());
        }
    };

    dispatch_kmer_size!(kmer_size, print_reverse_complements(&subcommand.kmers))
}

fn print_reverse_complements<const K: usize, const C: usize>(kmers: &[String]) -> crate::Result<()> {
    info!("Reverse complementing {} {}-mers", kmers.len(), K);
    for kmer in kmers {
        let kmer: DefaultKmer<K, C> = kmer.parse().map_err(|e| {
            error!("Not a valid {}-mer: '{}'", K, kmer);
            e
        })?;
        let reverse_complement = !kmer;
        println!(
            "{}\t{}\t{}",
            kmer,
            reverse_complement,
            if kmer.is_canonical() {
                "canonical"
            } else {
                "non-canonical"
            }
        );
    }
    Ok(())
}
