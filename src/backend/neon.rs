//! NEON window scanner.

use std::arch::aarch64::*;

use super::{ByteSet, Scanner, low_bits, padded};

#[derive(Clone, Copy, Debug, Default)]
pub struct Neon;

/// Per-lane weights that turn a 0x00/0xFF compare result into a bitmask
/// after a horizontal add over each eight-lane half.
const WEIGHTS: [u8; 16] = [1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128];

impl Scanner for Neon {
    fn find_bytes(&self, block: &[u8], set: &ByteSet) -> u64 {
        if set.is_empty() || block.is_empty() {
            return 0;
        }
        let buf = padded(block);
        // SAFETY: this scanner is only handed out after NEON was detected and
        // `buf` holds 64 readable bytes.
        let mask = unsafe { find_bytes_neon(&buf, set.lanes()) };
        mask & low_bits(block.len())
    }

    fn is_ascii(&self, block: &[u8]) -> bool {
        let buf = padded(block);
        // SAFETY: as above.
        unsafe { is_ascii_neon(&buf) }
    }
}

#[target_feature(enable = "neon")]
unsafe fn movemask(v: uint8x16_t) -> u64 {
    unsafe {
        let bits = vandq_u8(v, vld1q_u8(WEIGHTS.as_ptr()));
        let lo = vaddv_u8(vget_low_u8(bits)) as u64;
        let hi = vaddv_u8(vget_high_u8(bits)) as u64;
        lo | (hi << 8)
    }
}

#[target_feature(enable = "neon")]
unsafe fn find_bytes_neon(buf: &[u8; 64], lanes: [u8; 4]) -> u64 {
    unsafe {
        let n0 = vdupq_n_u8(lanes[0]);
        let n1 = vdupq_n_u8(lanes[1]);
        let n2 = vdupq_n_u8(lanes[2]);
        let n3 = vdupq_n_u8(lanes[3]);
        let mut mask = 0u64;
        for i in 0..4 {
            let chunk = vld1q_u8(buf.as_ptr().add(i * 16));
            let hits = vorrq_u8(
                vorrq_u8(vceqq_u8(chunk, n0), vceqq_u8(chunk, n1)),
                vorrq_u8(vceqq_u8(chunk, n2), vceqq_u8(chunk, n3)),
            );
            mask |= movemask(hits) << (i * 16);
        }
        mask
    }
}

#[target_feature(enable = "neon")]
unsafe fn is_ascii_neon(buf: &[u8; 64]) -> bool {
    unsafe {
        let mut acc = vdupq_n_u8(0);
        for i in 0..4 {
            acc = vorrq_u8(acc, vld1q_u8(buf.as_ptr().add(i * 16)));
        }
        vmaxvq_u8(acc) < 0x80
    }
}
