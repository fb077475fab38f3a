//! Content hashing used by the duplicate-skip pass.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 64 * 1024;

/// Computes the SHA-256 digest of a file, reading in fixed-size chunks so
/// memory stays bounded for arbitrarily large files.
///
/// Returns the digest as a lowercase hex string. The choice of hash only
/// needs to detect accidental duplicates, not resist an adversary.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened or read
/// (permissions, file disappeared mid-scan). Callers are expected to treat a
/// failed digest as "not a duplicate" rather than aborting the run.
pub fn digest_file(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(CHUNK_SIZE, file);
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
