//! Script kernels: per-script fold arithmetic used as a dispatch hint.
//!
//! Each kernel covers a set of codepoints whose folds are one-to-one and can
//! be computed with a few range checks. A run of text tagged with a kernel
//! may fold every codepoint through [`Kernel::fold`] instead of the table and
//! get the same answer. ASCII mixes into any kernel; Latin-1 also mixes into
//! the Central-Europe and Vietnamese kernels, which need it for their
//! accented letters. Everything else that mixes is `Unclassified`.

use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

use crate::fold::fold_rune;
use crate::utf8::{decode, lead_byte};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kernel {
    Ascii,
    /// Latin-1 Supplement, without `ß`.
    WesternEurope,
    /// Latin Extended-A and the Vietnamese horn letters.
    CentralEurope,
    Cyrillic,
    /// Basic Greek letters and tonos forms.
    Greek,
    Armenian,
    /// Latin Extended Additional, without the expanding letters.
    Vietnamese,
    Georgian,
    Cherokee,
    Coptic,
    Glagolitic,
    /// Scripts without case: CJK, Kana, Hangul, Thai, Devanagari, Arabic,
    /// Hebrew, emoji and similar.
    Caseless,
    /// Mixed, malformed or not covered by any kernel.
    Unclassified,
}

impl Kernel {
    pub const ALL: [Kernel; 13] = [
        Kernel::Ascii,
        Kernel::WesternEurope,
        Kernel::CentralEurope,
        Kernel::Cyrillic,
        Kernel::Greek,
        Kernel::Armenian,
        Kernel::Vietnamese,
        Kernel::Georgian,
        Kernel::Cherokee,
        Kernel::Coptic,
        Kernel::Glagolitic,
        Kernel::Caseless,
        Kernel::Unclassified,
    ];

    /// Kernel of a single codepoint.
    pub fn of(cp: u32) -> Kernel {
        match cp {
            0..=0x7F => Kernel::Ascii,
            0x80..=0xDE | 0xE0..=0xFF => Kernel::WesternEurope,
            0x130 | 0x149 => Kernel::Unclassified,
            0x100..=0x17F | 0x1A0 | 0x1A1 | 0x1AF | 0x1B0 => Kernel::CentralEurope,
            0x390 | 0x3B0 => Kernel::Unclassified,
            0x384..=0x3CE => Kernel::Greek,
            0x400..=0x52F => Kernel::Cyrillic,
            0x531..=0x586 => Kernel::Armenian,
            0x590..=0xFFF | 0x1100..=0x11FF => Kernel::Caseless,
            0x10A0..=0x10FF | 0x1C90..=0x1CBF | 0x2D00..=0x2D2F => Kernel::Georgian,
            0x13A0..=0x13FF | 0xAB70..=0xABBF => Kernel::Cherokee,
            0x1E00..=0x1E95 | 0x1EA0..=0x1EFF => Kernel::Vietnamese,
            0x2C00..=0x2C5F => Kernel::Glagolitic,
            0x2C80..=0x2CFF => Kernel::Coptic,
            0x2E80..=0xA4CF | 0xAC00..=0xD7AF | 0xF900..=0xFAFF => Kernel::Caseless,
            0x1_F000..=0x1_FAFF | 0x2_0000..=0x3_FFFF => Kernel::Caseless,
            _ => Kernel::Unclassified,
        }
    }

    /// The kernel of a run containing codepoints of both `self` and `other`.
    pub fn join(self, other: Kernel) -> Kernel {
        use Kernel::*;
        match (self, other) {
            (a, b) if a == b => a,
            (Ascii, k) | (k, Ascii) => k,
            (WesternEurope, k @ (CentralEurope | Vietnamese)) | (k @ (CentralEurope | Vietnamese), WesternEurope) => k,
            (CentralEurope, Vietnamese) | (Vietnamese, CentralEurope) => Vietnamese,
            _ => Unclassified,
        }
    }

    /// Folds `cp` with this kernel's arithmetic.
    ///
    /// # Returns
    ///
    /// * `Some(rune)` - `cp` is covered by this kernel; `rune` equals the
    ///   table fold of `cp`
    /// * `None` - `cp` is outside the kernel (always for `Unclassified`)
    #[inline]
    pub fn fold(self, cp: u32) -> Option<u32> {
        if self == Kernel::Unclassified {
            return None;
        }
        let own = Kernel::of(cp);
        if own == Kernel::Unclassified || self.join(own) != self {
            return None;
        }
        Some(match own {
            Kernel::Ascii => fold_ascii(cp),
            Kernel::WesternEurope => fold_western(cp),
            Kernel::CentralEurope => fold_central(cp),
            Kernel::Cyrillic => fold_cyrillic(cp),
            Kernel::Greek => fold_greek(cp),
            Kernel::Armenian => fold_armenian(cp),
            Kernel::Vietnamese => fold_vietnamese(cp),
            Kernel::Georgian => fold_georgian(cp),
            Kernel::Cherokee => fold_cherokee(cp),
            Kernel::Coptic => fold_coptic(cp),
            Kernel::Glagolitic => fold_glagolitic(cp),
            Kernel::Caseless | Kernel::Unclassified => cp,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Kernel::Ascii => "ascii",
            Kernel::WesternEurope => "western-europe",
            Kernel::CentralEurope => "central-europe",
            Kernel::Cyrillic => "cyrillic",
            Kernel::Greek => "greek",
            Kernel::Armenian => "armenian",
            Kernel::Vietnamese => "vietnamese",
            Kernel::Georgian => "georgian",
            Kernel::Cherokee => "cherokee",
            Kernel::Coptic => "coptic",
            Kernel::Glagolitic => "glagolitic",
            Kernel::Caseless => "caseless",
            Kernel::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[inline]
fn fold_ascii(cp: u32) -> u32 {
    if cp.wrapping_sub(0x41) < 26 { cp + 0x20 } else { cp }
}

#[inline]
fn fold_western(cp: u32) -> u32 {
    match cp {
        0xB5 => 0x3BC,
        0xC0..=0xDE if cp != 0xD7 => cp + 0x20,
        _ => cp,
    }
}

#[inline]
fn fold_central(cp: u32) -> u32 {
    let even = cp & 1 == 0;
    match cp {
        0x100..=0x12F | 0x132..=0x137 | 0x14A..=0x177 if even => cp + 1,
        0x139..=0x148 | 0x179..=0x17E if !even => cp + 1,
        0x178 => 0xFF,
        0x17F => 0x73,
        0x1A0 | 0x1AF => cp + 1,
        _ => cp,
    }
}

#[inline]
fn fold_cyrillic(cp: u32) -> u32 {
    let even = cp & 1 == 0;
    match cp {
        0x400..=0x40F => cp + 0x50,
        0x410..=0x42F => cp + 0x20,
        0x460..=0x481 | 0x48A..=0x4BF | 0x4D0..=0x52F if even => cp + 1,
        0x4C0 => 0x4CF,
        0x4C1..=0x4CE if !even => cp + 1,
        _ => cp,
    }
}

#[inline]
fn fold_greek(cp: u32) -> u32 {
    match cp {
        0x386 => 0x3AC,
        0x388..=0x38A => cp + 0x25,
        0x38C => 0x3CC,
        0x38E | 0x38F => cp + 0x3F,
        0x391..=0x3A1 | 0x3A3..=0x3AB => cp + 0x20,
        0x3C2 => 0x3C3,
        _ => cp,
    }
}

#[inline]
fn fold_armenian(cp: u32) -> u32 {
    if (0x531..=0x556).contains(&cp) { cp + 0x30 } else { cp }
}

#[inline]
fn fold_vietnamese(cp: u32) -> u32 {
    match cp {
        0x1E00..=0x1E94 | 0x1EA0..=0x1EFE if cp & 1 == 0 => cp + 1,
        _ => cp,
    }
}

#[inline]
fn fold_georgian(cp: u32) -> u32 {
    match cp {
        0x10A0..=0x10C5 => cp + 0x1C60,
        0x10C7 | 0x10CD => cp + 0x1C60,
        0x1C90..=0x1CBA | 0x1CBD..=0x1CBF => cp - 0xBC0,
        _ => cp,
    }
}

#[inline]
fn fold_cherokee(cp: u32) -> u32 {
    match cp {
        0x13F8..=0x13FD => cp - 8,
        0xAB70..=0xABBF => cp - 0x97D0,
        _ => cp,
    }
}

#[inline]
fn fold_coptic(cp: u32) -> u32 {
    match cp {
        0x2C80..=0x2CE3 if cp & 1 == 0 => cp + 1,
        0x2CEB | 0x2CED | 0x2CF2 => cp + 1,
        _ => cp,
    }
}

#[inline]
fn fold_glagolitic(cp: u32) -> u32 {
    if (0x2C00..=0x2C2F).contains(&cp) { cp + 0x30 } else { cp }
}

/// Classifies `buf[range]` under a single kernel.
///
/// # Arguments
///
/// * `buf` - The whole buffer; bytes past `range.end` are only read to
///   decode a codepoint that starts inside the range
/// * `range` - Byte range to classify
///
/// # Returns
///
/// The joined kernel of every codepoint in the range, or
/// [`Kernel::Unclassified`] when the run mixes incompatible kernels,
/// contains malformed bytes or expanding folds, or its last codepoint runs
/// past `range.end`. An empty range is `Ascii`.
///
/// # Examples
///
/// ```
/// use simd_casefind::kernel::{classify, Kernel};
///
/// let text = "Привет, мир".as_bytes();
/// assert_eq!(classify(text, 0..text.len()), Kernel::Cyrillic);
/// assert_eq!(classify(text, 0..1), Kernel::Unclassified);
/// ```
pub fn classify(buf: &[u8], range: Range<usize>) -> Kernel {
    let end = range.end.min(buf.len());
    let mut kernel = Kernel::Ascii;
    let mut pos = range.start;
    while pos < end {
        if buf[pos] < 0x80 {
            pos += 1;
            continue;
        }
        let d = decode(buf, pos);
        if !d.is_valid() || fold_rune(d.rune).is_expansion() {
            return Kernel::Unclassified;
        }
        kernel = kernel.join(Kernel::of(d.rune));
        if kernel == Kernel::Unclassified {
            return kernel;
        }
        pos += d.width;
    }
    if pos == end { kernel } else { Kernel::Unclassified }
}

#[derive(Clone, Copy, Default)]
struct LeadSet {
    bytes: [u8; 4],
    len: u8,
    overflow: bool,
}

impl LeadSet {
    fn insert(&mut self, lead: u8) {
        let len = self.len as usize;
        if self.overflow || self.bytes[..len].contains(&lead) {
            return;
        }
        if len == self.bytes.len() {
            self.overflow = true;
        } else {
            self.bytes[len] = lead;
            self.len += 1;
        }
    }
}

/// Lead bytes of the kernel-covered codepoints whose fold begins with the
/// lead byte `folded_lead`.
///
/// Inside a classified run, a codepoint can only fold to a rune whose UTF-8
/// encoding starts with `folded_lead` if its own lead byte is in this set
/// (`s` is reached from `s`, `S` and the `ſ` lead byte `0xC5`). Returns
/// `None` when more than four lead bytes qualify, in which case callers
/// must treat every codepoint start as a candidate. The table is built once
/// per process.
pub fn source_leads(folded_lead: u8) -> Option<&'static [u8]> {
    static TABLE: OnceLock<[LeadSet; 256]> = OnceLock::new();
    let table = TABLE.get_or_init(|| {
        let mut table = [LeadSet::default(); 256];
        for cp in 0..0x4_0000u32 {
            if let Some(folded) = Kernel::of(cp).fold(cp) {
                table[lead_byte(folded) as usize].insert(lead_byte(cp));
            }
        }
        table
    });
    let set = &table[folded_lead as usize];
    (!set.overflow).then(|| &set.bytes[..set.len as usize])
}
