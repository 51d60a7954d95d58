//! Per-needle metadata, computed once and reused across searches.

use crate::backend::ByteSet;
use crate::fold::{FoldedRunes, is_case_agnostic};
use crate::kernel::{Kernel, classify, source_leads};
use crate::utf8::{self, encoded_len, lead_byte};

/// Capacity of [`Probe`] in bytes.
pub const PROBE_CAPACITY: usize = 16;

/// Leading folded bytes of a needle, whole runes only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Probe {
    bytes: [u8; PROBE_CAPACITY],
    len: u8,
}

impl Probe {
    fn push(&mut self, rune: u32) -> bool {
        let mut buf = [0u8; 4];
        let n = utf8::encode(rune, &mut buf);
        let len = self.len as usize;
        if len + n > PROBE_CAPACITY {
            return false;
        }
        self.bytes[len..len + n].copy_from_slice(&buf[..n]);
        self.len += n as u8;
        true
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Everything the find loop needs to know about a needle.
///
/// Holds no heap data, so it can live on the stack of a single call or be
/// kept alongside a [`Finder`](crate::Finder) and reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeedleMetadata {
    /// Folding can only ever match the needle byte for byte.
    pub is_case_agnostic: bool,
    /// First folded bytes, for early rejection of candidates.
    pub probe: Probe,
    /// Kernel of the needle as a whole.
    pub kernel: Kernel,
    /// Length of the folded needle in bytes.
    pub folded_len: usize,
    /// Number of folded runes.
    pub folded_runes: usize,
    /// First folded rune, `None` for an empty needle.
    pub first_rune: Option<u32>,
    /// Lead bytes a match can start with inside a classified window.
    /// `None` when too many qualify to filter on.
    pub leads: Option<ByteSet>,
    /// Upper bound on the source span of any match, in bytes.
    pub max_span: usize,
}

impl Default for NeedleMetadata {
    fn default() -> Self {
        Self {
            is_case_agnostic: true,
            probe: Probe::default(),
            kernel: Kernel::Ascii,
            folded_len: 0,
            folded_runes: 0,
            first_rune: None,
            leads: Some(ByteSet::default()),
            max_span: 0,
        }
    }
}

impl NeedleMetadata {
    /// Folds `needle` once and derives the search metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use simd_casefind::needle::NeedleMetadata;
    ///
    /// let meta = NeedleMetadata::new("Straße".as_bytes());
    /// assert!(!meta.is_case_agnostic);
    /// assert_eq!(meta.probe.as_bytes(), b"strasse");
    /// assert_eq!(meta.folded_len, 7);
    /// ```
    pub fn new(needle: &[u8]) -> Self {
        let mut meta = NeedleMetadata::default();
        meta.precompute(needle);
        meta
    }

    /// Recomputes the metadata in place for `needle`.
    pub fn precompute(&mut self, needle: &[u8]) {
        let mut probe = Probe::default();
        let mut probe_open = true;
        let mut folded_len = 0;
        let mut folded_runes = 0;
        let mut first_rune = None;
        for (rune, _) in FoldedRunes::new(needle) {
            first_rune.get_or_insert(rune);
            folded_len += encoded_len(rune);
            folded_runes += 1;
            probe_open = probe_open && probe.push(rune);
        }
        *self = NeedleMetadata {
            is_case_agnostic: is_case_agnostic(needle),
            probe,
            kernel: classify(needle, 0..needle.len()),
            folded_len,
            folded_runes,
            first_rune,
            leads: first_rune.map_or(Some(ByteSet::default()), start_bytes),
            // A match consumes at most one source codepoint per folded rune.
            max_span: 4 * folded_runes,
        };
    }
}

/// Lead bytes of the classified codepoints whose fold starts with `first`.
fn start_bytes(first: u32) -> Option<ByteSet> {
    if first >= utf8::INVALID_BASE {
        // Classified windows hold no malformed bytes.
        return Some(ByteSet::default());
    }
    source_leads(lead_byte(first)).and_then(ByteSet::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_needle() {
        let meta = NeedleMetadata::new(b"");
        assert!(meta.is_case_agnostic);
        assert_eq!(meta.first_rune, None);
        assert_eq!(meta.folded_len, 0);
        assert_eq!(meta.max_span, 0);
    }

    #[test]
    fn probe_keeps_whole_runes() {
        let meta = NeedleMetadata::new("ЖЖЖЖЖЖЖЖЖ".as_bytes());
        assert_eq!(meta.probe.len(), 16);
        assert_eq!(meta.folded_len, 18);
        let meta = NeedleMetadata::new("aaaaaaaaaaaaaaa€".as_bytes());
        assert_eq!(meta.probe.as_bytes(), b"aaaaaaaaaaaaaaa");
        assert_eq!(meta.kernel, Kernel::Unclassified);
    }

    #[test]
    fn leads_cover_case_variants() {
        let meta = NeedleMetadata::new(b"Kelvin");
        let leads = meta.leads.unwrap();
        assert!(leads.contains(b'k'));
        assert!(leads.contains(b'K'));
        // U+212A KELVIN SIGN lives in an unclassified block.
        assert!(!leads.contains(0xE2));
        let meta = NeedleMetadata::new(&[0xFF, b'a']);
        assert_eq!(meta.leads, Some(ByteSet::default()));
        assert!(!meta.is_case_agnostic);
    }
}
