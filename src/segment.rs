//! Safe-window segmentation of a haystack.
//!
//! The haystack is cut into fixed 64-byte chunks. A chunk is *safe* when
//! its whole content classifies under one kernel: every codepoint starts
//! and ends inside the chunk, none is malformed and none folds to more
//! than one rune. Safe chunks can be scanned with the chunk's kernel
//! arithmetic. Everything else is a *danger* chunk and is walked
//! codepoint by codepoint.
//!
//! Danger handling always resumes at the first codepoint boundary after
//! the previous chunk, so the bytes on either side of a failing chunk
//! are covered by the scalar walk as well.

use std::ops::Range;

use crate::backend::{Backend, Portable, Scanner};
use crate::kernel::{Kernel, classify};

/// Width of one window, matching a 512-bit vector or a cache line.
pub const CHUNK_SIZE: usize = 64;

/// One window of the haystack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub offset: usize,
    pub len: usize,
    pub kernel: Kernel,
    pub safe: bool,
}

impl Segment {
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// Lazy iterator over the windows of a haystack. See [`segment`].
#[derive(Clone)]
pub struct Segments<'h> {
    haystack: &'h [u8],
    offset: usize,
    scanner: &'static dyn Scanner,
}

impl<'h> Segments<'h> {
    /// Segments `haystack` using `scanner` for the all-ASCII test.
    pub fn new(haystack: &'h [u8], scanner: &'static dyn Scanner) -> Self {
        Self { haystack, offset: 0, scanner }
    }
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let offset = self.offset;
        if offset >= self.haystack.len() {
            return None;
        }
        let len = CHUNK_SIZE.min(self.haystack.len() - offset);
        self.offset += len;
        let kernel = if self.scanner.is_ascii(&self.haystack[offset..offset + len]) {
            Kernel::Ascii
        } else {
            classify(self.haystack, offset..offset + len)
        };
        Some(Segment { offset, len, kernel, safe: kernel != Kernel::Unclassified })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.haystack.len().saturating_sub(self.offset).div_ceil(CHUNK_SIZE);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Segments<'_> {}

/// Splits `haystack` into 64-byte windows and marks each safe or danger.
///
/// # Examples
///
/// ```
/// use simd_casefind::segment::segment;
///
/// let mut text = "a".repeat(63).into_bytes();
/// text.extend_from_slice("ßa".as_bytes());
/// let safe: Vec<bool> = segment(&text).map(|s| s.safe).collect();
/// // The first window ends in the middle of "ß".
/// assert_eq!(safe, [false, false]);
/// ```
pub fn segment(haystack: &[u8]) -> Segments<'_> {
    Segments::new(haystack, Backend::active().scanner().unwrap_or(&Portable))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_scripts_are_safe() {
        let text = "Съешь же ещё этих мягких французских булок, да выпей чаю".repeat(3);
        let segs: Vec<_> = segment(text.as_bytes()).collect();
        assert_eq!(segs.len(), text.len().div_ceil(CHUNK_SIZE));
        // Windows that end inside a two-byte letter are danger chunks.
        for s in &segs {
            let ends_clean = crate::utf8::is_boundary(text.as_bytes(), s.end());
            let starts_clean = crate::utf8::is_boundary(text.as_bytes(), s.offset);
            assert_eq!(s.safe, ends_clean && starts_clean, "{s:?}");
            if s.safe {
                assert!(matches!(s.kernel, Kernel::Cyrillic | Kernel::Ascii));
            }
        }
    }

    #[test]
    fn mixed_and_expanding_windows_are_danger() {
        let greek_cyrillic = "αβγ где".as_bytes();
        assert!(!segment(greek_cyrillic).next().is_some_and(|s| s.safe));
        let expansion = "Masse Maße".as_bytes();
        assert!(!segment(expansion).next().is_some_and(|s| s.safe));
        let malformed = [b'a', 0xFF, b'b'];
        assert!(!segment(&malformed).next().is_some_and(|s| s.safe));
    }

    #[test]
    fn ascii_windows_cover_the_tail() {
        let text = vec![b'x'; 130];
        let segs: Vec<_> = segment(&text).collect();
        assert_eq!(segs.iter().map(|s| s.len).collect::<Vec<_>>(), [64, 64, 2]);
        assert!(segs.iter().all(|s| s.safe && s.kernel == Kernel::Ascii));
    }
}
