//! Streaming search over `io::Read` sources.

use std::io;

use memchr::memchr_iter;

use crate::backend::Backend;
use crate::error::Result;
use crate::find::Finder;
use crate::io::chunker::Chunker;

bitflags::bitflags! {
    /// Flags to control search engine behavior.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SearchFlags: u32 {
        /// Only count matches without reporting positions.
        const COUNT_ONLY = 1 << 0;
        /// Include 1-based line numbers in match reports.
        const LINE_NUMBER = 1 << 1;
        /// Stop after the first match.
        const FIRST_ONLY = 1 << 2;
    }
}

/// Configuration options for the search engine.
#[derive(Clone, Debug)]
pub struct SearchOptions {
    pub chunk_bytes: usize,
    pub flags: SearchFlags,
    pub file_id: u32,
    /// Backend to search with; `None` uses [`Backend::active`].
    pub backend: Option<Backend>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            chunk_bytes: 8 * 1024 * 1024,
            flags: SearchFlags::empty(),
            file_id: 0,
            backend: None,
        }
    }
}

/// A trait for receiving match notifications from the search engine.
pub trait MatchSink {
    /// Reports a single match found by the engine.
    ///
    /// # Arguments
    ///
    /// * `off` - Global byte offset within the entire file/stream
    /// * `len` - Match length in bytes of the stream, which may differ
    ///   from the needle length
    /// * `line_no` - 1-based line number, or 0 unless
    ///   [`SearchFlags::LINE_NUMBER`] is set
    /// * `file_id` - Caller-provided file identifier
    fn on_match(&mut self, off: u64, len: u32, line_no: u32, file_id: u32);
}

/// An input source with `io::Read` semantic.
///
/// This trait is automatically implemented for all types that implement `io::Read`.
pub trait Source: io::Read {}
impl<T: io::Read> Source for T {}

/// Searches streams for one case-insensitive needle.
pub struct SearchEngine<'p> {
    finder: Finder<'p>,
    opts: SearchOptions,
}

impl<'p> SearchEngine<'p> {
    /// Creates an engine for `needle`.
    ///
    /// Fails if `opts.backend` names a backend the CPU cannot run.
    pub fn new(needle: &'p [u8], opts: SearchOptions) -> Result<Self> {
        let finder = match opts.backend {
            Some(backend) => Finder::with_backend(needle, backend)?,
            None => Finder::new(needle),
        };
        Ok(Self { finder, opts })
    }

    pub fn finder(&self) -> &Finder<'p> {
        &self.finder
    }

    /// Runs the search on a `Source`, reporting matches to `sink`.
    ///
    /// Matches are reported left to right; each search resumes one
    /// codepoint past the previous match start, exactly as
    /// [`Finder::find_iter`] does on the whole input.
    ///
    /// # Returns
    ///
    /// * `Ok(count)` - Number of matches found
    /// * `Err(e)` - On I/O errors
    pub fn search<R: Source>(&self, reader: &mut R, sink: &mut dyn MatchSink) -> io::Result<u64> {
        let needle = self.finder.needle();
        let flags = self.opts.flags;
        let file_id = self.opts.file_id;
        if needle.is_empty() {
            // An empty needle matches once, at the start of the stream, even an empty one.
            if !flags.contains(SearchFlags::COUNT_ONLY) {
                let line = u32::from(flags.contains(SearchFlags::LINE_NUMBER));
                sink.on_match(0, 0, line, file_id);
            }
            tracing::debug!(target: "simd_casefind::engine", matches = 1, chunks = 0, "empty needle");
            return Ok(1);
        }

        // A match never spans more than `max_span` bytes of the stream.
        let overlap = self.finder.metadata().max_span.saturating_sub(1);
        let mut chunker = Chunker::new(reader, self.opts.chunk_bytes, overlap);

        let mut count: u64 = 0;
        let mut chunks: u64 = 0;
        // Newlines before `line_pos` in the current chunk, plus one.
        let mut line_no: u32 = 1;

        'chunks: while let Some(chunk) = chunker.next_chunk()? {
            chunks += 1;
            tracing::trace!(
                target: "simd_casefind::engine",
                offset = chunk.offset,
                len = chunk.bytes.len(),
                owned = chunk.owned,
                "searching chunk"
            );
            let mut line_pos = 0usize;
            for m in self.finder.find_iter(chunk.bytes) {
                if m.offset >= chunk.owned {
                    break;
                }
                count += 1;
                if !flags.contains(SearchFlags::COUNT_ONLY) {
                    let line = if flags.contains(SearchFlags::LINE_NUMBER) {
                        line_no += memchr_iter(b'\n', &chunk.bytes[line_pos..m.offset]).count() as u32;
                        line_pos = m.offset;
                        line_no
                    } else {
                        0
                    };
                    sink.on_match(chunk.offset + m.offset as u64, m.len as u32, line, file_id);
                }
                if flags.contains(SearchFlags::FIRST_ONLY) {
                    break 'chunks;
                }
            }
            if flags.contains(SearchFlags::LINE_NUMBER) {
                line_no += memchr_iter(b'\n', &chunk.bytes[line_pos..chunk.owned]).count() as u32;
            }
        }

        tracing::debug!(
            target: "simd_casefind::engine",
            matches = count,
            chunks,
            backend = %self.finder.backend(),
            "search finished"
        );
        Ok(count)
    }
}

/// A simple sink implementation that collects match data into vectors.
///
/// This sink is primarily used in tests, storing all match information
/// for later inspection and verification.
#[derive(Default, Debug)]
pub struct VecSink {
    pub offs: Vec<u64>,
    pub lens: Vec<u32>,
    pub line_nos: Vec<u32>,
    pub file_ids: Vec<u32>,
}

impl MatchSink for VecSink {
    fn on_match(&mut self, off: u64, len: u32, line_no: u32, file_id: u32) {
        self.offs.push(off);
        self.lens.push(len);
        self.line_nos.push(line_no);
        self.file_ids.push(file_id);
    }
}
