//! Benchmark log reader with automatic gzip decompression
//!
//! Archived benchmark runs are often kept as `out512-3.txt.gz`. Files ending in
//! `.gz` (case-insensitive) are decompressed transparently, and
//! [`logical_name`] strips the suffix so name-based parsing sees `out512-3.txt`.
//!
//! ```rust,no_run
//! use benchlog::file_reader;
//!
//! let content = file_reader::read_to_string("res/verifier/out512-3.txt.gz")?;
//! # Ok::<(), std::io::Error>(())
//! ```

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Buffer size for file reading. Benchmark logs are small.
const BUFFER_SIZE: usize = 16 * 1024;

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Open a file with automatic gzip detection based on file extension
///
/// # Errors
///
/// Returns an error if the file doesn't exist or cannot be opened.
/// Invalid gzip data surfaces on the first read.
pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead + Send>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    if is_gzip(path) {
        let decoder = GzDecoder::new(file);
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, decoder)))
    } else {
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)))
    }
}

/// Read a whole benchmark log as UTF-8 text, decompressing `.gz` files
pub fn read_to_string<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let mut reader = open(path)?;
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok(content)
}

/// File name with a trailing `.gz` removed (`out512-3.txt.gz` -> `out512-3.txt`)
pub fn logical_name(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    if is_gzip(path) {
        Some(&name[..name.len() - 3])
    } else {
        Some(name)
    }
}
