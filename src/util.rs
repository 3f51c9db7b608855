//! Private utility module
use std::io::{self, Read};
use std::path::Path;

/// Upper bound of buffer preallocation from untrusted header fields.
pub const PREALLOC_LIMIT: usize = 1 << 28;

/// Read at most `len` bytes from the source. Fewer bytes are returned
/// only when the source reaches its end.
pub fn read_up_to<R: Read>(source: R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(len.min(PREALLOC_LIMIT));
    let _ = source.take(len as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Discard up to `len` bytes from the source, returning how many were
/// actually skipped.
pub fn skip_bytes<R: Read>(source: R, len: u64) -> io::Result<u64> {
    io::copy(&mut source.take(len), &mut io::sink())
}

/// Check whether the file path has the Gzip extension.
pub fn is_gz_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .map(|a| a.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false)
}
