//! SSE2 and AVX2 window scanners.

use std::arch::x86_64::*;

use super::{ByteSet, Scanner, low_bits, padded};

#[derive(Clone, Copy, Debug, Default)]
pub struct Sse2;

#[derive(Clone, Copy, Debug, Default)]
pub struct Avx2;

impl Scanner for Sse2 {
    fn find_bytes(&self, block: &[u8], set: &ByteSet) -> u64 {
        if set.is_empty() || block.is_empty() {
            return 0;
        }
        let buf = padded(block);
        // SAFETY: this scanner is only handed out after SSE2 was detected and
        // `buf` holds 64 readable bytes.
        let mask = unsafe { find_bytes_sse2(&buf, set.lanes()) };
        mask & low_bits(block.len())
    }

    fn is_ascii(&self, block: &[u8]) -> bool {
        let buf = padded(block);
        // SAFETY: as above.
        unsafe { is_ascii_sse2(&buf) }
    }
}

impl Scanner for Avx2 {
    fn find_bytes(&self, block: &[u8], set: &ByteSet) -> u64 {
        if set.is_empty() || block.is_empty() {
            return 0;
        }
        let buf = padded(block);
        // SAFETY: this scanner is only handed out after AVX2 was detected and
        // `buf` holds 64 readable bytes.
        let mask = unsafe { find_bytes_avx2(&buf, set.lanes()) };
        mask & low_bits(block.len())
    }

    fn is_ascii(&self, block: &[u8]) -> bool {
        let buf = padded(block);
        // SAFETY: as above.
        unsafe { is_ascii_avx2(&buf) }
    }
}

#[target_feature(enable = "sse2")]
unsafe fn find_bytes_sse2(buf: &[u8; 64], lanes: [u8; 4]) -> u64 {
    unsafe {
        let n0 = _mm_set1_epi8(lanes[0] as i8);
        let n1 = _mm_set1_epi8(lanes[1] as i8);
        let n2 = _mm_set1_epi8(lanes[2] as i8);
        let n3 = _mm_set1_epi8(lanes[3] as i8);
        let mut mask = 0u64;
        for i in 0..4 {
            let chunk = _mm_loadu_si128(buf.as_ptr().add(i * 16) as *const __m128i);
            let hits = _mm_or_si128(
                _mm_or_si128(_mm_cmpeq_epi8(chunk, n0), _mm_cmpeq_epi8(chunk, n1)),
                _mm_or_si128(_mm_cmpeq_epi8(chunk, n2), _mm_cmpeq_epi8(chunk, n3)),
            );
            mask |= (_mm_movemask_epi8(hits) as u32 as u64) << (i * 16);
        }
        mask
    }
}

#[target_feature(enable = "sse2")]
unsafe fn is_ascii_sse2(buf: &[u8; 64]) -> bool {
    unsafe {
        let mut acc = _mm_setzero_si128();
        for i in 0..4 {
            acc = _mm_or_si128(acc, _mm_loadu_si128(buf.as_ptr().add(i * 16) as *const __m128i));
        }
        _mm_movemask_epi8(acc) == 0
    }
}

#[target_feature(enable = "avx2")]
unsafe fn find_bytes_avx2(buf: &[u8; 64], lanes: [u8; 4]) -> u64 {
    unsafe {
        let n0 = _mm256_set1_epi8(lanes[0] as i8);
        let n1 = _mm256_set1_epi8(lanes[1] as i8);
        let n2 = _mm256_set1_epi8(lanes[2] as i8);
        let n3 = _mm256_set1_epi8(lanes[3] as i8);
        let mut mask = 0u64;
        for i in 0..2 {
            let chunk = _mm256_loadu_si256(buf.as_ptr().add(i * 32) as *const __m256i);
            let hits = _mm256_or_si256(
                _mm256_or_si256(_mm256_cmpeq_epi8(chunk, n0), _mm256_cmpeq_epi8(chunk, n1)),
                _mm256_or_si256(_mm256_cmpeq_epi8(chunk, n2), _mm256_cmpeq_epi8(chunk, n3)),
            );
            mask |= (_mm256_movemask_epi8(hits) as u32 as u64) << (i * 32);
        }
        mask
    }
}

#[target_feature(enable = "avx2")]
unsafe fn is_ascii_avx2(buf: &[u8; 64]) -> bool {
    unsafe {
        let lo = _mm256_loadu_si256(buf.as_ptr() as *const __m256i);
        let hi = _mm256_loadu_si256(buf.as_ptr().add(32) as *const __m256i);
        _mm256_movemask_epi8(_mm256_or_si256(lo, hi)) == 0
    }
}
