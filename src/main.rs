#![recursion_limit = "1024"]

use clap::Parser;
use error_chain::{error_chain, ChainedError, ExitCode};
use log::{error, info};
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

mod count_kmers;
mod dump_kmers;
mod reverse_complement;
mod runtime_k;

error_chain! {
    foreign_links {
        Io(std::io::Error);
        Anyhow(anyhow::Error);
    }

    links {
        CompactKmer(compact_kmer::error::Error, compact_kmer::error::ErrorKind);
    }

    errors {
        Parameter {
            description("a parameter was missing, superfluous or had an illegal value, see the log for more details")
            display("a parameter was missing, superfluous or had an illegal value, see the log for more details")
        }

        UnsupportedKmerSize(kmer_size: usize) {
            description("the k-mer size is not supported")
            display("the k-mer size {} is not supported, use one of {:?}", kmer_size, runtime_k::SUPPORTED_KMER_SIZES)
        }
    }
}

#[derive(Parser)]
#[clap(name = "kmer-tools", version = env!("CARGO_PKG_VERSION"), author = "Sebastian Schmidt <sebastian.schmidt@helsinki.fi>")]
struct CliOptions {
    #[clap(subcommand)]
    pub subcommand: Command,

    #[clap(
        long,
        default_value = "Info",
        help = "The log level to use, one of Error, Warn, Info, Debug, Trace"
    )]
    pub log_level: LevelFilter,
}

#[derive(Parser)]
enum Command {
    #[clap(
        about = "Counts the k-mers of all records of a fasta file and writes them as binary records."
    )]
    CountKmers(count_kmers::CountKmersCommand),
    #[clap(about = "Prints the k-mers and counts of a file written by count-kmers.")]
    DumpKmers(dump_kmers::DumpKmersCommand),
    /// Prints the reverse complements of the given k-mers.
    ReverseComplement(reverse_complement::ReverseComplementCommand),
}

// The main is unpacked from an error-chain macro.
// The real main (programmed manually) is run(), below this method.
fn main() {
    ::std::process::exit(match run() {
        Ok(()) => ExitCode::code(()),
        Err(ref e) => {
            error!("{}", ChainedError::display_chain(e));
            1
        }
    });
}

fn initialise_logging(level_filter: LevelFilter) {
    CombinedLogger::init(vec![TermLogger::new(
        level_filter,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .unwrap();

    info!("Logging initialised successfully");
}

fn run() -> Result<()> {
    let options = &CliOptions::parse();
    initialise_logging(options.log_level);

    match &options.subcommand {
        Command::CountKmers(subcommand) => count_kmers::count_kmers(options, subcommand),
        Command::DumpKmers(subcommand) => dump_kmers::dump_kmers(options, subcommand),
        Command::ReverseComplement(subcommand) => {
            reverse_complement::reverse_complement(options, subcommand)
        }
    }?;

    info!("Done");
    Ok(())
}
