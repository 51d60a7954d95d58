//! UTF-8 decoding and encoding over raw byte buffers.
//!
//! Decoding never fails: a malformed byte decodes to a marker rune
//! `INVALID_BASE + byte` with width 1. Markers sit above the Unicode range,
//! so two different malformed bytes stay distinct and never equal a real
//! codepoint.

/// First marker value. `INVALID_BASE + b` stands for the malformed byte `b`.
pub const INVALID_BASE: u32 = 0x11_0000;

/// Result of decoding one position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub rune: u32,
    pub width: usize,
}

impl Decoded {
    /// Marker for a malformed byte.
    #[inline]
    pub const fn invalid(byte: u8) -> Self {
        Self { rune: INVALID_BASE + byte as u32, width: 1 }
    }

    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.rune < INVALID_BASE
    }
}

/// Outcome of decoding the start of a byte slice that may end early.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prefix {
    /// A complete, well-formed sequence.
    Complete(Decoded),
    /// The bytes so far are a valid start of a sequence, but the slice ends
    /// before it completes.
    Truncated,
    /// The leading byte cannot start a well-formed sequence here.
    Invalid,
}

/// Decodes the sequence at the start of `bytes`, telling apart a sequence that
/// is cut off by the end of the slice from one that is malformed.
///
/// Rejects overlong forms, surrogates, values above U+10FFFF and stray
/// continuation bytes, the same way `std::str::from_utf8` does.
pub fn decode_prefix(bytes: &[u8]) -> Prefix {
    let Some(&lead) = bytes.first() else {
        return Prefix::Truncated;
    };
    if lead < 0x80 {
        return Prefix::Complete(Decoded { rune: lead as u32, width: 1 });
    }
    // Second byte range depends on the lead; later bytes are always 80..=BF.
    let (width, lo, hi, bits) = match lead {
        0xC2..=0xDF => (2, 0x80, 0xBF, lead & 0x1F),
        0xE0 => (3, 0xA0, 0xBF, lead & 0x0F),
        0xE1..=0xEC | 0xEE..=0xEF => (3, 0x80, 0xBF, lead & 0x0F),
        0xED => (3, 0x80, 0x9F, lead & 0x0F),
        0xF0 => (4, 0x90, 0xBF, lead & 0x07),
        0xF1..=0xF3 => (4, 0x80, 0xBF, lead & 0x07),
        0xF4 => (4, 0x80, 0x8F, lead & 0x07),
        _ => return Prefix::Invalid,
    };
    let mut rune = bits as u32;
    for i in 1..width {
        let Some(&b) = bytes.get(i) else {
            return Prefix::Truncated;
        };
        let (lo, hi) = if i == 1 { (lo, hi) } else { (0x80, 0xBF) };
        if b < lo || b > hi {
            return Prefix::Invalid;
        }
        rune = (rune << 6) | (b & 0x3F) as u32;
    }
    Prefix::Complete(Decoded { rune, width })
}

/// Decodes the codepoint starting at `offset`.
///
/// # Arguments
///
/// * `buf` - The buffer to decode from
/// * `offset` - Byte position of the sequence, must be `< buf.len()`
///
/// # Returns
///
/// The codepoint and its width, or a marker of width 1 when the bytes at
/// `offset` are malformed or cut off by the end of `buf`. Never reads past
/// the end of `buf`.
///
/// # Examples
///
/// ```
/// use simd_casefind::utf8::{decode, INVALID_BASE};
///
/// let s = "aß€😀".as_bytes();
/// assert_eq!((decode(s, 0).rune, decode(s, 0).width), ('a' as u32, 1));
/// assert_eq!((decode(s, 1).rune, decode(s, 1).width), ('ß' as u32, 2));
/// assert_eq!(decode(s, 2).rune, INVALID_BASE + 0x9F);
/// ```
#[inline]
pub fn decode(buf: &[u8], offset: usize) -> Decoded {
    let byte = buf[offset];
    if byte < 0x80 {
        return Decoded { rune: byte as u32, width: 1 };
    }
    match decode_prefix(&buf[offset..]) {
        Prefix::Complete(d) => d,
        Prefix::Truncated | Prefix::Invalid => Decoded::invalid(byte),
    }
}

/// Encodes `rune` into `out` and returns the number of bytes written.
///
/// Markers for malformed bytes are written back as the original byte.
#[inline]
pub fn encode(rune: u32, out: &mut [u8; 4]) -> usize {
    match rune {
        0..=0x7F => {
            out[0] = rune as u8;
            1
        }
        0x80..=0x7FF => {
            out[0] = 0xC0 | (rune >> 6) as u8;
            out[1] = 0x80 | (rune & 0x3F) as u8;
            2
        }
        0x800..=0xFFFF => {
            out[0] = 0xE0 | (rune >> 12) as u8;
            out[1] = 0x80 | ((rune >> 6) & 0x3F) as u8;
            out[2] = 0x80 | (rune & 0x3F) as u8;
            3
        }
        0x1_0000..=0x10_FFFF => {
            out[0] = 0xF0 | (rune >> 18) as u8;
            out[1] = 0x80 | ((rune >> 12) & 0x3F) as u8;
            out[2] = 0x80 | ((rune >> 6) & 0x3F) as u8;
            out[3] = 0x80 | (rune & 0x3F) as u8;
            4
        }
        _ => {
            out[0] = rune.wrapping_sub(INVALID_BASE) as u8;
            1
        }
    }
}

/// Number of bytes [`encode`] writes for `rune`.
#[inline]
pub const fn encoded_len(rune: u32) -> usize {
    match rune {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        0x1_0000..=0x10_FFFF => 4,
        _ => 1,
    }
}

/// Lead byte of the UTF-8 encoding of `rune`.
#[inline]
pub fn lead_byte(rune: u32) -> u8 {
    let mut buf = [0u8; 4];
    encode(rune, &mut buf);
    buf[0]
}

#[inline]
pub const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Returns `true` if a left-to-right decode of `buf` from offset 0 visits
/// `pos`, i.e. `pos` does not fall inside a well-formed multi-byte sequence.
///
/// `pos == buf.len()` is always a boundary.
pub fn is_boundary(buf: &[u8], pos: usize) -> bool {
    if pos == 0 || pos >= buf.len() || !is_continuation(buf[pos]) {
        return true;
    }
    // A sequence covering `pos` must start at most three bytes back.
    let lo = pos.saturating_sub(3);
    match (lo..pos).rev().find(|&q| !is_continuation(buf[q])) {
        Some(q) => {
            let d = decode(buf, q);
            !(d.is_valid() && q + d.width > pos)
        }
        None => true,
    }
}

/// Largest boundary `<= pos` (see [`is_boundary`]).
pub fn floor_boundary(buf: &[u8], pos: usize) -> usize {
    let mut p = pos.min(buf.len());
    while !is_boundary(buf, p) {
        p -= 1;
    }
    p
}

/// Length of the longest prefix of `buf` that does not end inside a sequence
/// cut off by the end of the buffer.
///
/// Used when more bytes may follow: the returned tail (at most three bytes)
/// has to be held back until they arrive.
pub fn complete_prefix_len(buf: &[u8]) -> usize {
    let lo = buf.len().saturating_sub(3);
    match (lo..buf.len()).rev().find(|&q| !is_continuation(buf[q])) {
        Some(q) if decode_prefix(&buf[q..]) == Prefix::Truncated => q,
        _ => buf.len(),
    }
}

/// Counts codepoints in `buf`, treating each malformed byte as one.
pub fn count_codepoints(buf: &[u8]) -> usize {
    let mut pos = 0;
    let mut count = 0;
    while pos < buf.len() {
        pos += decode(buf, pos).width;
        count += 1;
    }
    count
}

/// Byte offset of the `n`-th codepoint, or `None` if `buf` has fewer.
pub fn nth_codepoint_offset(buf: &[u8], n: usize) -> Option<usize> {
    let mut pos = 0;
    for _ in 0..n {
        if pos >= buf.len() {
            return None;
        }
        pos += decode(buf, pos).width;
    }
    (pos < buf.len()).then_some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agrees_with_std_on_valid_text() {
        let s = "Aé€😀 Ꭰ ẞ ﬃ";
        let bytes = s.as_bytes();
        let mut pos = 0;
        for ch in s.chars() {
            let d = decode(bytes, pos);
            assert_eq!(d.rune, ch as u32);
            assert_eq!(d.width, ch.len_utf8());
            pos += d.width;
        }
        assert_eq!(pos, bytes.len());
    }

    #[test]
    fn rejects_overlong_surrogate_and_out_of_range() {
        assert_eq!(decode(&[0xC0, 0xAF], 0), Decoded::invalid(0xC0));
        assert_eq!(decode(&[0xE0, 0x80, 0xAF], 0), Decoded::invalid(0xE0));
        assert_eq!(decode(&[0xED, 0xA0, 0x80], 0), Decoded::invalid(0xED));
        assert_eq!(decode(&[0xF4, 0x90, 0x80, 0x80], 0), Decoded::invalid(0xF4));
        assert_eq!(decode(&[0x80], 0), Decoded::invalid(0x80));
        assert_eq!(decode(&[0xFF], 0), Decoded::invalid(0xFF));
    }

    #[test]
    fn truncated_sequences_are_invalid_in_whole_buffers() {
        let bytes = &"€".as_bytes()[..2];
        assert_eq!(decode(bytes, 0), Decoded::invalid(0xE2));
        assert_eq!(decode_prefix(bytes), Prefix::Truncated);
    }

    #[test]
    fn markers_encode_back_to_their_byte() {
        let mut out = [0u8; 4];
        assert_eq!(encode(Decoded::invalid(0xFE).rune, &mut out), 1);
        assert_eq!(out[0], 0xFE);
    }

    #[test]
    fn boundaries() {
        let s = "a€b".as_bytes();
        assert!(is_boundary(s, 1));
        assert!(!is_boundary(s, 2));
        assert!(!is_boundary(s, 3));
        assert!(is_boundary(s, 4));
        assert_eq!(floor_boundary(s, 3), 1);
        // Orphan continuation bytes are boundaries of their own.
        assert!(is_boundary(&[b'a', 0x80, 0x80], 2));
        assert_eq!(complete_prefix_len(&s[..3]), 1);
        assert_eq!(complete_prefix_len(s), 5);
    }

    #[test]
    fn counting() {
        let s = "añ€😀".as_bytes();
        assert_eq!(count_codepoints(s), 4);
        assert_eq!(nth_codepoint_offset(s, 2), Some(3));
        assert_eq!(nth_codepoint_offset(s, 4), None);
    }
}
