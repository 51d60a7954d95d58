use std::io::{self, Read, Write};

use crate::fold::{CaseFolder, fold_capacity};

const READ_BUF: usize = 64 * 1024;

/// Case-folds everything read from `reader` into `writer`.
///
/// Codepoints split across reads are carried over, so the output equals
/// folding the whole stream at once.
///
/// # Returns
///
/// * `Ok(n)` - Number of folded bytes written
/// * `Err(e)` - On I/O errors
pub fn fold_stream<R: Read, W: Write>(reader: &mut R, writer: &mut W) -> io::Result<u64> {
    let mut folder = CaseFolder::new();
    let mut input = vec![0u8; READ_BUF];
    let mut output = vec![0u8; fold_capacity(READ_BUF)];
    let mut written: u64 = 0;
    loop {
        let n = match reader.read(&mut input) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        let folded = folder.fold_chunk(&input[..n], &mut output).map_err(io::Error::other)?;
        writer.write_all(&output[..folded])?;
        written += folded as u64;
    }
    let folded = folder.finish(&mut output).map_err(io::Error::other)?;
    writer.write_all(&output[..folded])?;
    written += folded as u64;
    writer.flush()?;
    tracing::debug!(target: "simd_casefind::io", bytes = written, "folded stream");
    Ok(written)
}
