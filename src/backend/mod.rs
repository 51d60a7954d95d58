//! Search backends.
//!
//! A backend decides how safe 64-byte windows are scanned for candidate
//! match starts. `Serial` does not scan windows at all and walks every
//! codepoint; the others implement [`Scanner`] with progressively wider
//! vector units. All of them must report identical matches.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{Error, Result};

mod portable;
#[cfg(target_arch = "x86_64")]
mod x86;
#[cfg(target_arch = "aarch64")]
mod neon;

pub use portable::Portable;

/// Environment variable that pins the process-wide backend, e.g. `sse2`.
pub const BACKEND_ENV: &str = "SIMD_CASEFIND_BACKEND";

/// Up to four bytes looked up together in one pass over a window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByteSet {
    bytes: [u8; 4],
    len: u8,
}

impl ByteSet {
    pub const CAPACITY: usize = 4;

    /// Builds a set, or `None` if `bytes` holds more than [`Self::CAPACITY`] values.
    pub fn new(bytes: &[u8]) -> Option<ByteSet> {
        if bytes.len() > Self::CAPACITY {
            return None;
        }
        let mut set = ByteSet::default();
        set.bytes[..bytes.len()].copy_from_slice(bytes);
        set.len = bytes.len() as u8;
        Some(set)
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn contains(&self, byte: u8) -> bool {
        self.as_slice().contains(&byte)
    }

    /// All four lanes, with unused lanes repeating the first byte so that
    /// vector code can compare against four broadcasts unconditionally.
    /// Must not be called on an empty set.
    #[cfg_attr(not(any(target_arch = "x86_64", target_arch = "aarch64")), allow(dead_code))]
    #[inline]
    pub(crate) fn lanes(&self) -> [u8; 4] {
        let mut lanes = [self.bytes[0]; 4];
        lanes[..self.len as usize].copy_from_slice(self.as_slice());
        lanes
    }
}

/// Window-level primitives a vectorized backend provides.
pub trait Scanner: Send + Sync {
    /// Returns a mask with bit `i` set iff `block[i]` is in `set`.
    ///
    /// `block` holds at most 64 bytes; bits at or past `block.len()` are clear.
    fn find_bytes(&self, block: &[u8], set: &ByteSet) -> u64;

    /// Returns `true` if every byte of `block` is below `0x80`.
    fn is_ascii(&self, block: &[u8]) -> bool;
}

/// Mask with the low `len` bits set.
#[cfg_attr(not(any(target_arch = "x86_64", target_arch = "aarch64")), allow(dead_code))]
#[inline]
pub(crate) fn low_bits(len: usize) -> u64 {
    if len >= 64 { u64::MAX } else { (1u64 << len) - 1 }
}

/// Copies a short block into a zeroed 64-byte buffer for full-width loads.
#[cfg_attr(not(any(target_arch = "x86_64", target_arch = "aarch64")), allow(dead_code))]
#[inline]
pub(crate) fn padded(block: &[u8]) -> [u8; 64] {
    let mut buf = [0u8; 64];
    let n = block.len().min(64);
    buf[..n].copy_from_slice(&block[..n]);
    buf
}

/// An interchangeable implementation of the search loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Codepoint-by-codepoint reference scan.
    Serial,
    /// Word-at-a-time scanning with plain `u64` arithmetic.
    Portable,
    /// 128-bit x86 vectors.
    Sse2,
    /// 256-bit x86 vectors.
    Avx2,
    /// 128-bit Arm vectors.
    Neon,
}

impl Backend {
    pub const ALL: [Backend; 5] = [Backend::Serial, Backend::Portable, Backend::Sse2, Backend::Avx2, Backend::Neon];

    pub fn name(self) -> &'static str {
        match self {
            Backend::Serial => "serial",
            Backend::Portable => "portable",
            Backend::Sse2 => "sse2",
            Backend::Avx2 => "avx2",
            Backend::Neon => "neon",
        }
    }

    /// Returns `true` if the running CPU can execute this backend.
    pub fn is_available(self) -> bool {
        match self {
            Backend::Serial | Backend::Portable => true,
            #[cfg(target_arch = "x86_64")]
            Backend::Sse2 => std::arch::is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => std::arch::is_x86_feature_detected!("avx2"),
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => std::arch::is_aarch64_feature_detected!("neon"),
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }

    /// Backends usable on this CPU, from simplest to widest.
    pub fn available() -> impl Iterator<Item = Backend> {
        Self::ALL.into_iter().filter(|b| b.is_available())
    }

    /// The widest backend the CPU supports.
    pub fn detect() -> Backend {
        [Backend::Avx2, Backend::Sse2, Backend::Neon]
            .into_iter()
            .find(|b| b.is_available())
            .unwrap_or(Backend::Portable)
    }

    /// Returns `self` if it can run here, or an error naming it.
    pub fn check(self) -> Result<Backend> {
        if self.is_available() { Ok(self) } else { Err(Error::UnavailableBackend(self.name())) }
    }

    /// Process-wide backend, resolved on first use.
    ///
    /// Honors [`BACKEND_ENV`] when it names an available backend and falls
    /// back to [`Backend::detect`] otherwise.
    pub fn active() -> Backend {
        static ACTIVE: OnceLock<Backend> = OnceLock::new();
        *ACTIVE.get_or_init(|| {
            let backend = match std::env::var(BACKEND_ENV) {
                Ok(name) => match name.parse::<Backend>().and_then(Backend::check) {
                    Ok(backend) => backend,
                    Err(err) => {
                        tracing::warn!(target: "simd_casefind::backend", error = %err, "ignoring {BACKEND_ENV}");
                        Backend::detect()
                    }
                },
                Err(_) => Backend::detect(),
            };
            tracing::debug!(target: "simd_casefind::backend", backend = %backend, "selected search backend");
            backend
        })
    }

    /// The window scanner for this backend, or `None` for `Serial`.
    ///
    /// A vector backend the CPU lacks is replaced by `Portable`, so the
    /// result is always safe to call.
    pub fn scanner(self) -> Option<&'static dyn Scanner> {
        if self == Backend::Serial {
            return None;
        }
        if !self.is_available() {
            return Some(&Portable);
        }
        let scanner: &'static dyn Scanner = match self {
            #[cfg(target_arch = "x86_64")]
            Backend::Sse2 => &x86::Sse2,
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => &x86::Avx2,
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => &neon::Neon,
            _ => &Portable,
        };
        Some(scanner)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Backend> {
        let name = s.trim();
        Backend::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownBackend(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!("AVX2".parse::<Backend>(), Ok(Backend::Avx2));
        assert_eq!(" serial ".parse::<Backend>(), Ok(Backend::Serial));
        assert_eq!("mmx".parse::<Backend>(), Err(Error::UnknownBackend("mmx".into())));
    }

    #[test]
    fn serial_and_portable_always_run() {
        let available: Vec<_> = Backend::available().collect();
        assert!(available.contains(&Backend::Serial));
        assert!(available.contains(&Backend::Portable));
        assert!(Backend::detect().is_available());
    }

    #[test]
    fn scanners_agree_on_every_block_length() {
        let data: Vec<u8> = (0..64u8).map(|i| i.wrapping_mul(37) ^ 0xA5).collect();
        let set = ByteSet::new(&[data[3], data[40], 0x00]).unwrap_or_default();
        for backend in Backend::available().filter(|b| *b != Backend::Serial) {
            let scanner = backend.scanner().unwrap();
            for len in 0..=64 {
                let block = &data[..len];
                let expected = block
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| set.contains(**b))
                    .fold(0u64, |m, (i, _)| m | 1 << i);
                assert_eq!(scanner.find_bytes(block, &set), expected, "{backend} len {len}");
                assert_eq!(scanner.is_ascii(block), block.is_ascii(), "{backend} len {len}");
            }
        }
    }
}
