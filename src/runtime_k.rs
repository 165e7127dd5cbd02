//! Selects a compile-time k-mer size for a k given at runtime.

/// The k-mer sizes that can be chosen at runtime.
pub const SUPPORTED_KMER_SIZES: [usize; 13] = [11, 15, 21, 25, 27, 31, 33, 41, 55, 63, 77, 99, 127];

/// Calls `$function::<K, C>(arguments...)` where `K` equals the runtime value `$kmer_size`
/// and `C` is the amount of 64-bit cells of a `K`-mer.
/// Evaluates to an `UnsupportedKmerSize` error if `$kmer_size` is not in [SUPPORTED_KMER_SIZES].
macro_rules! dispatch_kmer_size {
    ($kmer_size:expr, $function:ident($($argument:expr),* $(,)?)) => {
        match $kmer_size {
            11 => $function::<11, 1>($($argument),*),
            15 => $function::<15, 1>($($argument),*),
            21 => $function::<21, 1>($($argument),*),
            25 => $function::<25, 1>($($argument),*),
            27 => $function::<27, 1>($($argument),*),
            31 => $function::<31, 1>($($argument),*),
            33 => $function::<33, 2>($($argument),*),
            41 => $function::<41, 2>($($argument),*),
            55 => $function::<55, 2>($($argument),*),
            63 => $function::<63, 2>($($argument),*),
            77 => $function::<77, 3>($($argument),*),
            99 => $function::<99, 4>($($argument),*),
            127 => $function::<127, 4>($($argument),*),
            kmer_size => {
                log::error!("Unsupported k-mer size {}", kmer_size);
                Err(crate::Error::from(crate::ErrorKind::UnsupportedKmerSize(kmer_size)))
            }
        }
    };
}

pub(crate) use dispatch_kmer_size;
