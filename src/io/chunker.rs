//! Chunked reader with UTF-8 aware overlap.
//!
//! The chunker turns a streaming `Read` source into a sequence of
//! [`Chunk`]s. Each chunk repeats the bytes after the previous chunk's
//! owned prefix, so a match that starts in the owned part of one chunk is
//! always fully contained in it.
//!
//! Invariants:
//! - Every chunk starts on a codepoint boundary of the stream.
//! - Unless the stream is exhausted, a chunk ends on a codepoint boundary
//!   and holds at least `overlap` bytes past its owned prefix.
//! - Owned prefixes tile the stream: chunk `n + 1` starts where the owned
//!   prefix of chunk `n` ends.
//! - At EOF the whole remaining buffer is owned and iteration ends after it.

use std::cmp;
use std::io::{self, Read};

use crate::utf8::{complete_prefix_len, floor_boundary};

/// Smallest payload the chunker works with, so that every chunk owns at
/// least one codepoint.
const MIN_CHUNK: usize = 8;

/// One window of the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk<'b> {
    /// Global offset of `bytes[0]`.
    pub offset: u64,
    pub bytes: &'b [u8],
    /// Matches starting in `bytes[..owned]` belong to this chunk; the rest
    /// is look-ahead that the next chunk starts with.
    pub owned: usize,
}

/// Reads a stream in windows of `chunk_size + overlap` bytes.
pub struct Chunker<'a, R: Read> {
    reader: &'a mut R,
    /// Working buffer (capacity >= chunk_size + overlap).
    buf: Vec<u8>,
    /// Preferred owned payload per chunk.
    chunk_size: usize,
    /// Look-ahead kept past the owned prefix.
    overlap: usize,
    /// Number of valid bytes currently in `buf`.
    len: usize,
    /// Owned length of the chunk returned last; dropped on the next call.
    consumed: usize,
    eof: bool,
    /// Global offset of `buf[0]`.
    next_global_off: u64,
}

impl<'a, R: Read> Chunker<'a, R> {
    /// Creates a chunker reading `reader`.
    ///
    /// # Arguments
    ///
    /// * `reader` - The source to read data from
    /// * `chunk_size` - Preferred owned bytes per chunk
    /// * `overlap` - Look-ahead bytes past the owned prefix, usually the
    ///   longest possible match minus one
    pub fn new(reader: &'a mut R, chunk_size: usize, overlap: usize) -> Self {
        let chunk_size = cmp::max(chunk_size, MIN_CHUNK);
        let cap = cmp::max(4 * 1024, chunk_size.saturating_add(overlap));
        Self {
            reader,
            buf: vec![0u8; cap],
            chunk_size,
            overlap,
            len: 0,
            consumed: 0,
            eof: false,
            next_global_off: 0,
        }
    }

    /// Reads the next chunk from the stream.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(chunk))` - The next window
    /// * `Ok(None)` - When the stream is exhausted
    /// * `Err(e)` - On I/O errors
    pub fn next_chunk(&mut self) -> io::Result<Option<Chunk<'_>>> {
        if self.consumed > 0 {
            self.buf.copy_within(self.consumed..self.len, 0);
            self.len -= self.consumed;
            self.next_global_off += self.consumed as u64;
            self.consumed = 0;
        }

        let target = self.chunk_size + self.overlap;
        while self.len < target && !self.eof {
            let n = match self.reader.read(&mut self.buf[self.len..target]) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if n == 0 {
                self.eof = true;
            }
            self.len += n;
        }

        if self.len == 0 {
            return Ok(None);
        }

        let data = &self.buf[..self.len];
        let (end, owned) = if self.eof {
            (self.len, self.len)
        } else {
            let end = complete_prefix_len(data);
            let owned = floor_boundary(&data[..end], end.saturating_sub(self.overlap));
            (end, owned)
        };
        self.consumed = owned;
        Ok(Some(Chunk { offset: self.next_global_off, bytes: &self.buf[..end], owned }))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn collect(data: &[u8], chunk_size: usize, overlap: usize) -> Vec<(u64, Vec<u8>, usize)> {
        let mut reader = Cursor::new(data.to_vec());
        let mut chunker = Chunker::new(&mut reader, chunk_size, overlap);
        let mut out = Vec::new();
        while let Some(c) = chunker.next_chunk().unwrap() {
            out.push((c.offset, c.bytes.to_vec(), c.owned));
        }
        out
    }

    #[test]
    fn owned_prefixes_tile_the_stream() {
        let data = "naïve café Ωμέγα ".repeat(40).into_bytes();
        let chunks = collect(&data, 16, 5);
        let mut next = 0u64;
        for (offset, bytes, owned) in &chunks {
            assert_eq!(*offset, next);
            assert!(std::str::from_utf8(bytes).is_ok());
            next += *owned as u64;
        }
        assert_eq!(next, data.len() as u64);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(collect(b"", 16, 3).is_empty());
    }

    #[test]
    fn last_chunk_owns_everything() {
        let chunks = collect(b"short", 64, 10);
        assert_eq!(chunks, vec![(0, b"short".to_vec(), 5)]);
    }
}
