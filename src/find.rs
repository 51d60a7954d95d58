//! Case-insensitive find.
//!
//! [`find_serial`] is the reference: it walks every codepoint of the
//! haystack and tries each rune of its fold as a match start. The
//! segmented search gives the same answer faster. It only looks at
//! candidate lead bytes inside safe windows, verifies them with the
//! window's kernel arithmetic, and falls back to the reference walk in
//! danger windows.

use std::ops::Range;

use memchr::memmem;

use crate::backend::{Backend, Scanner};
use crate::error::Result;
use crate::fold::{FoldedRunes, fold_rune};
use crate::kernel::Kernel;
use crate::needle::NeedleMetadata;
use crate::segment::Segments;
use crate::utf8::{decode, is_continuation};

/// A match, in bytes of the original haystack.
///
/// `len` covers every source codepoint that contributed a rune to the match
/// and can differ from the needle's length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Match {
    pub offset: usize,
    pub len: usize,
}

impl Match {
    #[inline]
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// Checks whether the folded needle starts at rune `skip` of the codepoint
/// at `start`. Returns the end of the source span on success.
///
/// Codepoints starting before `kernel_end` are folded with `kernel`.
fn verify(
    haystack: &[u8],
    start: usize,
    skip: usize,
    needle: &[u8],
    kernel: Kernel,
    kernel_end: usize,
) -> Option<usize> {
    let mut runes = FoldedRunes::at(haystack, start).with_kernel(kernel, kernel_end);
    for _ in 0..skip {
        runes.next()?;
    }
    let mut end = start;
    for (want, _) in FoldedRunes::new(needle) {
        let (got, source_end) = runes.next()?;
        if got != want {
            return None;
        }
        end = source_end;
    }
    Some(end)
}

/// Tries every codepoint starting in `*pos..end` as a match start, leaving
/// `*pos` on the first boundary at or past `end` when nothing matches.
fn scan_codepoints(haystack: &[u8], needle: &[u8], first: u32, pos: &mut usize, end: usize) -> Option<Match> {
    while *pos < end {
        let d = decode(haystack, *pos);
        let folded = fold_rune(d.rune);
        for (skip, &rune) in folded.as_slice().iter().enumerate() {
            if rune != first {
                continue;
            }
            if let Some(match_end) = verify(haystack, *pos, skip, needle, Kernel::Unclassified, 0) {
                return Some(Match::new(*pos, match_end - *pos));
            }
        }
        *pos += d.width;
    }
    None
}

/// Reference implementation of [`find`]: one codepoint at a time, no
/// windows, no kernels, no exact-search shortcut.
///
/// # Examples
///
/// ```
/// use simd_casefind::{find_serial, Match};
///
/// assert_eq!(find_serial("straße".as_bytes(), b"SS"), Some(Match::new(4, 2)));
/// ```
pub fn find_serial(haystack: &[u8], needle: &[u8]) -> Option<Match> {
    let Some((first, _)) = FoldedRunes::new(needle).next() else {
        return Some(Match::default());
    };
    let mut pos = 0;
    scan_codepoints(haystack, needle, first, &mut pos, haystack.len())
}

/// Bit `i` set for every codepoint start in `block`.
fn codepoint_starts(block: &[u8]) -> u64 {
    block
        .iter()
        .enumerate()
        .filter(|(_, b)| !is_continuation(**b))
        .fold(0, |mask, (i, _)| mask | 1 << i)
}

/// Returns `false` if an all-ASCII window rules out a match at its start.
///
/// Inside such a window every byte folds to exactly one byte, so the probe
/// lines up with the window byte for byte.
#[inline]
fn probe_accepts(window: &[u8], probe: &[u8]) -> bool {
    window.iter().zip(probe).all(|(h, p)| h.to_ascii_lowercase() == *p)
}

fn find_segmented(
    haystack: &[u8],
    needle: &[u8],
    meta: &NeedleMetadata,
    scanner: &'static dyn Scanner,
) -> Option<Match> {
    let Some(first) = meta.first_rune else {
        return Some(Match::default());
    };
    let mut pos = 0;
    for seg in Segments::new(haystack, scanner) {
        if pos >= seg.end() {
            continue;
        }
        if !seg.safe || pos != seg.offset {
            if let Some(m) = scan_codepoints(haystack, needle, first, &mut pos, seg.end()) {
                return Some(m);
            }
            continue;
        }
        let block = &haystack[seg.range()];
        let mut candidates = match &meta.leads {
            Some(leads) => scanner.find_bytes(block, leads),
            None => codepoint_starts(block),
        };
        while candidates != 0 {
            let start = seg.offset + candidates.trailing_zeros() as usize;
            candidates &= candidates - 1;
            if seg.kernel == Kernel::Ascii && !probe_accepts(&haystack[start..seg.end()], meta.probe.as_bytes()) {
                continue;
            }
            if let Some(end) = verify(haystack, start, 0, needle, seg.kernel, seg.end()) {
                return Some(Match::new(start, end - start));
            }
        }
        pos = seg.end();
    }
    None
}

fn find_prepared(
    haystack: &[u8],
    needle: &[u8],
    meta: &NeedleMetadata,
    backend: Backend,
    exact: Option<&memmem::Finder<'_>>,
) -> Option<Match> {
    if needle.is_empty() {
        return Some(Match::default());
    }
    let Some(scanner) = backend.scanner() else {
        return find_serial(haystack, needle);
    };
    if meta.is_case_agnostic {
        let offset = match exact {
            Some(finder) => finder.find(haystack),
            None => memmem::find(haystack, needle),
        };
        return offset.map(|offset| Match::new(offset, needle.len()));
    }
    find_segmented(haystack, needle, meta, scanner)
}

/// Returns the leftmost case-insensitive match of `needle` in `haystack`.
///
/// Uses the process-wide [`Backend::active`]. Malformed UTF-8 on either side
/// is compared byte by byte.
///
/// # Arguments
///
/// * `haystack` - The bytes to search in
/// * `needle` - The bytes to search for
///
/// # Returns
///
/// * `Some(Match)` - Offset and length of the match in `haystack`
/// * `None` - If no match is found
///
/// An empty needle matches at offset 0 with length 0.
///
/// # Examples
///
/// ```rust
/// use simd_casefind::{find, Match};
///
/// assert_eq!(find(b"Hello World", b"WORLD"), Some(Match::new(6, 5)));
/// assert_eq!(find("STRASSE".as_bytes(), "straße".as_bytes()), Some(Match::new(0, 7)));
/// assert_eq!(find("×".as_bytes(), "÷".as_bytes()), None);
/// assert_eq!(find(b"hello", b""), Some(Match::new(0, 0)));
/// ```
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<Match> {
    let meta = NeedleMetadata::new(needle);
    find_prepared(haystack, needle, &meta, Backend::active(), None)
}

/// Like [`find`], but also hands the needle metadata back to the caller.
pub fn find_with_metadata(haystack: &[u8], needle: &[u8], meta: &mut NeedleMetadata) -> Option<Match> {
    meta.precompute(needle);
    find_prepared(haystack, needle, meta, Backend::active(), None)
}

/// Like [`find`], on an explicitly chosen backend.
///
/// Fails if the running CPU cannot execute `backend`.
pub fn find_with(backend: Backend, haystack: &[u8], needle: &[u8]) -> Result<Option<Match>> {
    let backend = backend.check()?;
    let meta = NeedleMetadata::new(needle);
    Ok(find_prepared(haystack, needle, &meta, backend, None))
}

/// Checks whether `needle` occurs in `haystack`, ignoring case.
///
/// # Examples
///
/// ```rust
/// use simd_casefind::contains;
/// assert!(contains("Ünïcödé".as_bytes(), "üNÏCÖDÉ".as_bytes()));
/// assert!(!contains(b"hello", b"xyz"));
/// ```
#[inline]
pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find(haystack, needle).is_some()
}

/// A needle prepared once for many searches.
///
/// # Examples
///
/// ```
/// use simd_casefind::Finder;
///
/// let finder = Finder::new("σ".as_bytes());
/// let text = "ΟΔΥΣΣΕΥΣ".as_bytes();
/// let offsets: Vec<usize> = finder.find_iter(text).map(|m| m.offset).collect();
/// assert_eq!(offsets, [6, 8, 14]);
/// ```
#[derive(Clone, Debug)]
pub struct Finder<'n> {
    needle: &'n [u8],
    meta: NeedleMetadata,
    backend: Backend,
    exact: Option<memmem::Finder<'n>>,
}

impl<'n> Finder<'n> {
    /// Prepares `needle` for the process-wide backend.
    pub fn new(needle: &'n [u8]) -> Self {
        Self::prepare(needle, Backend::active())
    }

    /// Prepares `needle` for `backend`, failing if the CPU cannot run it.
    pub fn with_backend(needle: &'n [u8], backend: Backend) -> Result<Self> {
        Ok(Self::prepare(needle, backend.check()?))
    }

    fn prepare(needle: &'n [u8], backend: Backend) -> Self {
        let meta = NeedleMetadata::new(needle);
        let exact = (meta.is_case_agnostic && !needle.is_empty()).then(|| memmem::Finder::new(needle));
        Self { needle, meta, backend, exact }
    }

    pub fn needle(&self) -> &'n [u8] {
        self.needle
    }

    pub fn metadata(&self) -> &NeedleMetadata {
        &self.meta
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Returns the leftmost match in `haystack`.
    pub fn find(&self, haystack: &[u8]) -> Option<Match> {
        find_prepared(haystack, self.needle, &self.meta, self.backend, self.exact.as_ref())
    }

    /// Iterates over matches from left to right.
    ///
    /// Each search resumes one codepoint past the previous match start, so
    /// overlapping matches are reported. An empty needle matches once at 0.
    pub fn find_iter<'f, 'h>(&'f self, haystack: &'h [u8]) -> FindIter<'f, 'n, 'h> {
        FindIter { finder: self, haystack, pos: Some(0) }
    }
}

/// Iterator returned by [`Finder::find_iter`].
#[derive(Clone, Debug)]
pub struct FindIter<'f, 'n, 'h> {
    finder: &'f Finder<'n>,
    haystack: &'h [u8],
    pos: Option<usize>,
}

impl Iterator for FindIter<'_, '_, '_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        let pos = self.pos?;
        let Some(found) = self.finder.find(&self.haystack[pos..]) else {
            self.pos = None;
            return None;
        };
        let m = Match::new(pos + found.offset, found.len);
        self.pos = if m.len == 0 || m.offset >= self.haystack.len() {
            None
        } else {
            Some(m.offset + decode(self.haystack, m.offset).width)
        };
        Some(m)
    }
}
