//! SWAR scanner: eight bytes per `u64`, no vector instructions.

use super::{ByteSet, Scanner};

const LO7: u64 = 0x7F7F_7F7F_7F7F_7F7F;
const HI: u64 = 0x8080_8080_8080_8080;
const ONES: u64 = 0x0101_0101_0101_0101;

#[derive(Clone, Copy, Debug, Default)]
pub struct Portable;

/// Sets bit 7 of every byte of `v` that is zero, and nothing else.
#[inline]
fn zero_bytes(v: u64) -> u64 {
    !(((v & LO7) + LO7) | v) & HI
}

/// Packs the bit-7 flags of the eight bytes into the low eight bits.
#[inline]
fn pack(mut flags: u64) -> u64 {
    let mut mask = 0;
    while flags != 0 {
        mask |= 1 << (flags.trailing_zeros() / 8);
        flags &= flags - 1;
    }
    mask
}

#[inline]
fn load(word: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(word);
    u64::from_le_bytes(buf)
}

impl Scanner for Portable {
    fn find_bytes(&self, block: &[u8], set: &ByteSet) -> u64 {
        let mut mask = 0u64;
        let mut words = block.chunks_exact(8);
        let mut base = 0;
        for word in words.by_ref() {
            let v = load(word);
            let hits = set
                .as_slice()
                .iter()
                .fold(0, |acc, &b| acc | zero_bytes(v ^ (ONES * b as u64)));
            mask |= pack(hits) << base;
            base += 8;
        }
        for (i, &b) in words.remainder().iter().enumerate() {
            if set.contains(b) {
                mask |= 1 << (base + i);
            }
        }
        mask
    }

    fn is_ascii(&self, block: &[u8]) -> bool {
        let mut words = block.chunks_exact(8);
        let high = words.by_ref().fold(0, |acc, word| acc | load(word)) & HI;
        high == 0 && words.remainder().iter().all(|b| *b < 0x80)
    }
}
