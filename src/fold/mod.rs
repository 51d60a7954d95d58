//! Unicode full case folding over UTF-8 bytes.
//!
//! [`fold`] folds a complete buffer, [`CaseFolder`] folds a stream delivered
//! in arbitrary pieces, and [`FoldedRunes`] walks the folded form of a buffer
//! rune by rune without writing it anywhere. All three agree: malformed bytes
//! pass through unchanged, everything else goes through [`table::lookup`].

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::kernel::Kernel;
use crate::utf8::{self, Prefix, decode, decode_prefix};

pub mod table;

pub use table::{FoldRule, Folded, fold_rune, lookup};

/// Extra room on top of `3 * len` that every fold output buffer needs.
///
/// Covers a codepoint completed from bytes carried over by [`CaseFolder`].
pub const FOLD_SLACK: usize = 8;

/// Minimum output capacity for folding `len` input bytes.
///
/// No codepoint folds to more than three times its encoded width (`ΐ`, two
/// bytes, becomes six).
#[inline]
pub const fn fold_capacity(len: usize) -> usize {
    len.saturating_mul(3).saturating_add(FOLD_SLACK)
}

struct Writer<'o> {
    out: &'o mut [u8],
    len: usize,
}

impl<'o> Writer<'o> {
    fn new(out: &'o mut [u8]) -> Self {
        Self { out, len: 0 }
    }

    #[inline]
    fn push_byte(&mut self, byte: u8) -> Result<()> {
        match self.out.get_mut(self.len) {
            Some(slot) => {
                *slot = byte;
                self.len += 1;
                Ok(())
            }
            None => Err(self.overflow(1)),
        }
    }

    #[inline]
    fn push_rune(&mut self, rune: u32) -> Result<()> {
        let mut buf = [0u8; 4];
        let n = utf8::encode(rune, &mut buf);
        let end = self.len + n;
        if end > self.out.len() {
            return Err(self.overflow(n));
        }
        self.out[self.len..end].copy_from_slice(&buf[..n]);
        self.len = end;
        Ok(())
    }

    #[inline]
    fn push_folded(&mut self, folded: &Folded) -> Result<()> {
        for &rune in folded.as_slice() {
            self.push_rune(rune)?;
        }
        Ok(())
    }

    fn overflow(&self, extra: usize) -> Error {
        Error::BufferTooSmall { needed: self.len + extra, capacity: self.out.len() }
    }
}

/// Folds `input[pos..]` into `w`, returning the offset of a trailing sequence
/// cut off by the end of `input` when `streaming` is set.
fn fold_from(input: &[u8], mut pos: usize, w: &mut Writer<'_>, streaming: bool) -> Result<Option<usize>> {
    while pos < input.len() {
        let byte = input[pos];
        if byte < 0x80 {
            w.push_byte(byte.to_ascii_lowercase())?;
            pos += 1;
            continue;
        }
        match decode_prefix(&input[pos..]) {
            Prefix::Complete(d) => {
                w.push_folded(&fold_rune(d.rune))?;
                pos += d.width;
            }
            Prefix::Truncated if streaming => return Ok(Some(pos)),
            Prefix::Truncated | Prefix::Invalid => {
                w.push_byte(byte)?;
                pos += 1;
            }
        }
    }
    Ok(None)
}

/// Case-folds `input` into `out`.
///
/// # Arguments
///
/// * `input` - UTF-8 text; malformed bytes are copied through unchanged
/// * `out` - Destination buffer; [`fold_capacity`]`(input.len())` bytes
///   always suffice
///
/// # Returns
///
/// * `Ok(n)` - Number of bytes written to `out`
/// * `Err(Error::BufferTooSmall)` - `out` ran out of room; `needed` is the
///   exact folded length of `input`
///
/// # Examples
///
/// ```
/// use simd_casefind::fold::{fold, fold_capacity};
///
/// let input = "Straße".as_bytes();
/// let mut out = vec![0u8; fold_capacity(input.len())];
/// let n = fold(input, &mut out).unwrap();
/// assert_eq!(&out[..n], b"strasse");
/// ```
pub fn fold(input: &[u8], out: &mut [u8]) -> Result<usize> {
    let mut w = Writer::new(out);
    match fold_from(input, 0, &mut w, false) {
        Ok(_) => Ok(w.len),
        Err(Error::BufferTooSmall { capacity, .. }) => {
            Err(Error::BufferTooSmall { needed: folded_len(input), capacity })
        }
        Err(e) => Err(e),
    }
}

/// Case-folds `input` into a freshly allocated vector.
pub fn fold_to_vec(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(folded_len(input));
    let mut buf = [0u8; 4];
    for (rune, _) in FoldedRunes::new(input) {
        let n = utf8::encode(rune, &mut buf);
        out.extend_from_slice(&buf[..n]);
    }
    out
}

/// Byte length of the folded form of `input`.
pub fn folded_len(input: &[u8]) -> usize {
    FoldedRunes::new(input).map(|(rune, _)| utf8::encoded_len(rune)).sum()
}

/// Resumable folding state for input that arrives in pieces.
///
/// A multi-byte sequence split across two calls is held back (at most three
/// bytes) until the rest of it arrives. Concatenating the outputs of every
/// [`fold_chunk`](Self::fold_chunk) call followed by [`finish`](Self::finish)
/// gives exactly what [`fold`] gives for the whole input.
#[derive(Clone, Debug, Default)]
pub struct CaseFolder {
    carry: [u8; 4],
    carry_len: usize,
}

impl CaseFolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes held back from the previous call.
    pub fn pending(&self) -> &[u8] {
        &self.carry[..self.carry_len]
    }

    /// Folds the next piece of the stream into `out`.
    ///
    /// # Arguments
    ///
    /// * `input` - The next bytes of the stream, of any length
    /// * `out` - Must hold at least [`fold_capacity`]`(input.len())` bytes
    ///
    /// # Returns
    ///
    /// * `Ok(n)` - Number of bytes written to `out`
    /// * `Err(Error::BufferTooSmall)` - `out` is under the documented
    ///   capacity; nothing was consumed and the state is unchanged
    pub fn fold_chunk(&mut self, input: &[u8], out: &mut [u8]) -> Result<usize> {
        let needed = fold_capacity(input.len());
        if out.len() < needed {
            return Err(Error::BufferTooSmall { needed, capacity: out.len() });
        }
        let mut w = Writer::new(out);
        let mut pos = 0;

        if self.carry_len > 0 {
            let take = (4 - self.carry_len).min(input.len());
            let mut joined = [0u8; 4];
            joined[..self.carry_len].copy_from_slice(self.pending());
            joined[self.carry_len..self.carry_len + take].copy_from_slice(&input[..take]);
            match decode_prefix(&joined[..self.carry_len + take]) {
                Prefix::Complete(d) => {
                    w.push_folded(&fold_rune(d.rune))?;
                    pos = d.width - self.carry_len;
                    self.carry_len = 0;
                }
                Prefix::Truncated => {
                    // Still incomplete, so `take` swallowed all of `input`.
                    self.carry = joined;
                    self.carry_len += take;
                    return Ok(w.len);
                }
                Prefix::Invalid => {
                    // The lead and its continuation bytes each stand alone.
                    for &byte in &self.carry[..self.carry_len] {
                        w.push_byte(byte)?;
                    }
                    self.carry_len = 0;
                }
            }
        }

        if let Some(tail) = fold_from(input, pos, &mut w, true)? {
            let rest = &input[tail..];
            self.carry[..rest.len()].copy_from_slice(rest);
            self.carry_len = rest.len();
        }
        Ok(w.len)
    }

    /// Flushes bytes still held back at the end of the stream.
    ///
    /// They never completed a sequence, so they are emitted unchanged.
    pub fn finish(&mut self, out: &mut [u8]) -> Result<usize> {
        let mut w = Writer::new(out);
        for &byte in &self.carry[..self.carry_len] {
            w.push_byte(byte)?;
        }
        self.carry_len = 0;
        Ok(w.len)
    }
}

/// Iterator over the folded runes of a byte string.
///
/// Yields `(rune, source_end)`, where `source_end` is the byte offset just
/// past the source codepoint the rune came from. Runes of one expansion share
/// the same `source_end`. Malformed bytes yield their marker rune.
///
/// When a kernel hint is set, codepoints in front of the hint's end that
/// belong to the kernel are folded with its arithmetic instead of the table.
#[derive(Clone, Debug)]
pub struct FoldedRunes<'a> {
    bytes: &'a [u8],
    pos: usize,
    pending: Folded,
    next_idx: usize,
    kernel: Kernel,
    kernel_end: usize,
}

impl<'a> FoldedRunes<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::at(bytes, 0)
    }

    /// Starts folding at byte offset `start`, which should be a codepoint boundary.
    pub fn at(bytes: &'a [u8], start: usize) -> Self {
        Self {
            bytes,
            pos: start,
            pending: Folded::EMPTY,
            next_idx: 0,
            kernel: Kernel::Unclassified,
            kernel_end: 0,
        }
    }

    /// Uses `kernel` arithmetic for codepoints that start before `end`.
    pub fn with_kernel(mut self, kernel: Kernel, end: usize) -> Self {
        self.kernel = kernel;
        self.kernel_end = end;
        self
    }
}

impl Iterator for FoldedRunes<'_> {
    type Item = (u32, usize);

    #[inline]
    fn next(&mut self) -> Option<(u32, usize)> {
        if self.next_idx >= self.pending.len() {
            if self.pos >= self.bytes.len() {
                return None;
            }
            let d = decode(self.bytes, self.pos);
            let hinted = if self.pos < self.kernel_end { self.kernel.fold(d.rune) } else { None };
            self.pending = match hinted {
                Some(rune) => Folded::one(rune),
                None => fold_rune(d.rune),
            };
            self.next_idx = 0;
            self.pos += d.width;
        }
        let rune = self.pending.as_slice()[self.next_idx];
        self.next_idx += 1;
        Some((rune, self.pos))
    }
}

/// Compares two byte strings by their folded runes.
///
/// Equal folds compare `Equal`; a fold that is a strict prefix of the other
/// is `Less`. Malformed bytes order after every codepoint.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use simd_casefind::fold::order;
///
/// assert_eq!(order("Straße".as_bytes(), b"STRASSE"), Ordering::Equal);
/// assert_eq!(order(b"apple", b"BANANA"), Ordering::Less);
/// assert_eq!(order(b"abc", b"AB"), Ordering::Greater);
/// ```
pub fn order(a: &[u8], b: &[u8]) -> Ordering {
    let mut left = FoldedRunes::new(a);
    let mut right = FoldedRunes::new(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some((x, _)), Some((y, _))) if x != y => return x.cmp(&y),
            _ => {}
        }
    }
}

/// Returns `true` if `cp` has no case: it folds to itself, nothing else folds
/// to it, and it does not sit in a bicameral block.
///
/// Malformed-byte markers are not caseless.
pub fn is_caseless(cp: u32) -> bool {
    if cp < 0x80 {
        return !(cp as u8).is_ascii_alphabetic();
    }
    if cp >= utf8::INVALID_BASE || lookup(cp) != FoldRule::Identity || table::is_fold_target(cp) {
        return false;
    }
    !matches!(
        cp,
        0x00C0..=0x00D6
            | 0x00D8..=0x00F6
            | 0x00F8..=0x02AF
            | 0x0300..=0x036F
            | 0x0370..=0x0587
            | 0x10A0..=0x10FF
            | 0x13A0..=0x13FD
            | 0x1C80..=0x1CBF
            | 0x1E00..=0x1FFF
            | 0x2C00..=0x2D2F
            | 0x2DE0..=0x2DFF
            | 0xA640..=0xA69F
            | 0xA720..=0xA7FF
            | 0xAB30..=0xABBF
            | 0xFB00..=0xFB17
            | 0xFF21..=0xFF5A
            | 0x1_0400..=0x1_044F
            | 0x1_04B0..=0x1_04FF
            | 0x1_0570..=0x1_05BF
            | 0x1_0780..=0x1_07BF
            | 0x1_0C80..=0x1_0CFF
            | 0x1_0D50..=0x1_0D8F
            | 0x1_18A0..=0x1_18FF
            | 0x1_6E40..=0x1_6EBF
            | 0x1_DF00..=0x1_E08F
            | 0x1_E900..=0x1_E95F
    )
}

/// Returns `true` if folding cannot make `bytes` equal to anything but
/// itself: every codepoint is caseless and the input is well-formed.
///
/// For such a needle a byte-exact search finds exactly the case-insensitive
/// matches.
///
/// # Examples
///
/// ```
/// use simd_casefind::is_case_agnostic;
///
/// assert!(is_case_agnostic("2×3 = 6, 中文".as_bytes()));
/// assert!(!is_case_agnostic(b"hello"));
/// ```
pub fn is_case_agnostic(bytes: &[u8]) -> bool {
    let mut pos = 0;
    while pos < bytes.len() {
        let d = decode(bytes, pos);
        if !is_caseless(d.rune) {
            return false;
        }
        pos += d.width;
    }
    true
}
