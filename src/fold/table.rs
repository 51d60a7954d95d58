//! Static case-fold table.
//!
//! Every codepoint maps to exactly one [`FoldRule`]. The table is a sorted
//! list of disjoint codepoint intervals plus a bitmap over 256-codepoint
//! blocks, so codepoints in blocks without any cased letters resolve to
//! `Identity` without touching the interval list.
//!
//! The mapping is locale-free: `I` folds to `i`, dotless `ı` folds to itself,
//! and `×`/`÷` are not a case pair.

/// How a single codepoint folds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoldRule {
    /// The codepoint is its own fold.
    Identity,
    /// The fold is `codepoint + delta`.
    Offset(i32),
    /// The codepoint expands into two or three codepoints, e.g. `ß` into `ss`.
    Expand(&'static [u32]),
    /// The codepoint maps onto a canonical codepoint, usually in another
    /// block, which other codepoints also fold to (`µ`, `Μ` and `μ` all end
    /// up at `μ`).
    Converge(u32),
}

/// Folded form of one codepoint: one to three runes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Folded {
    runes: [u32; 3],
    len: u8,
}

impl Folded {
    /// No runes; the state of an iterator that has not decoded anything yet.
    pub const EMPTY: Folded = Folded { runes: [0; 3], len: 0 };

    #[inline]
    pub const fn one(rune: u32) -> Self {
        Self { runes: [rune, 0, 0], len: 1 }
    }

    fn many(seq: &[u32]) -> Self {
        let mut runes = [0u32; 3];
        let len = seq.len().min(3);
        runes[..len].copy_from_slice(&seq[..len]);
        Self { runes, len: len as u8 }
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.runes[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the first folded rune.
    #[inline]
    pub fn first(&self) -> u32 {
        self.runes[0]
    }

    /// Returns `true` when the source codepoint expanded into several runes.
    #[inline]
    pub fn is_expansion(&self) -> bool {
        self.len > 1
    }
}

impl FoldRule {
    /// Applies the rule to `cp`, which must be the codepoint it was looked up for.
    #[inline]
    pub fn apply(self, cp: u32) -> Folded {
        match self {
            FoldRule::Identity => Folded::one(cp),
            FoldRule::Offset(delta) => Folded::one(cp.wrapping_add_signed(delta)),
            FoldRule::Expand(seq) => Folded::many(seq),
            FoldRule::Converge(target) => Folded::one(target),
        }
    }
}

#[derive(Clone, Copy)]
struct Entry {
    first: u32,
    last: u32,
    /// 1 for contiguous ranges, 2 for alternating upper/lower pairs.
    stride: u32,
    rule: FoldRule,
}

impl Entry {
    const fn range(first: u32, last: u32, rule: FoldRule) -> Self {
        Self { first, last, stride: 1, rule }
    }

    /// Alternating pairs where every other codepoint starting at `first`
    /// folds to its successor.
    const fn paired(first: u32, last: u32) -> Self {
        Self { first, last, stride: 2, rule: FoldRule::Offset(1) }
    }

    const fn single(cp: u32, rule: FoldRule) -> Self {
        Self { first: cp, last: cp, stride: 1, rule }
    }
}

const BLOCK_COUNT: usize = 0x11_0000 >> 8;

/// One bit per 256-codepoint block that has at least one non-identity rule.
static BLOCKS: [u64; BLOCK_COUNT / 64] = block_mask(ENTRIES);

const fn block_mask(entries: &[Entry]) -> [u64; BLOCK_COUNT / 64] {
    let mut mask = [0u64; BLOCK_COUNT / 64];
    let mut i = 0;
    while i < entries.len() {
        let mut block = (entries[i].first >> 8) as usize;
        let end = (entries[i].last >> 8) as usize;
        while block <= end {
            mask[block / 64] |= 1u64 << (block % 64);
            block += 1;
        }
        i += 1;
    }
    mask
}

/// Looks up the fold rule for `cp`.
///
/// Values outside the Unicode range (including the malformed-byte markers
/// produced by [`crate::utf8::decode`]) are `Identity`.
///
/// # Examples
///
/// ```
/// use simd_casefind::fold::table::{lookup, FoldRule};
///
/// assert_eq!(lookup('A' as u32), FoldRule::Offset(32));
/// assert_eq!(lookup('ß' as u32), FoldRule::Expand(&[0x73, 0x73]));
/// assert_eq!(lookup('ı' as u32), FoldRule::Identity);
/// ```
#[inline]
pub fn lookup(cp: u32) -> FoldRule {
    if cp < 0x80 {
        return if cp.wrapping_sub(b'A' as u32) < 26 { FoldRule::Offset(32) } else { FoldRule::Identity };
    }
    let block = (cp >> 8) as usize;
    if block >= BLOCK_COUNT || BLOCKS[block / 64] & (1u64 << (block % 64)) == 0 {
        return FoldRule::Identity;
    }
    let idx = ENTRIES.partition_point(|e| e.last < cp);
    match ENTRIES.get(idx) {
        Some(e) if e.first <= cp && (cp - e.first) % e.stride == 0 => e.rule,
        _ => FoldRule::Identity,
    }
}

/// Folds a single codepoint.
#[inline]
pub fn fold_rune(cp: u32) -> Folded {
    lookup(cp).apply(cp)
}

/// Returns `true` when `cp` is the target, or part of the target, of some
/// other codepoint's fold.
///
/// The answer is computed once by walking the table.
pub fn is_fold_target(cp: u32) -> bool {
    use std::sync::OnceLock;

    static TARGETS: OnceLock<Vec<u32>> = OnceLock::new();
    let targets = TARGETS.get_or_init(|| {
        let mut out = Vec::new();
        for e in ENTRIES {
            let mut cp = e.first;
            while cp <= e.last {
                out.extend_from_slice(e.rule.apply(cp).as_slice());
                cp += e.stride;
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    });
    targets.binary_search(&cp).is_ok()
}

/// Iterates over every codepoint with a non-identity rule, in ascending order.
pub fn folding_codepoints() -> impl Iterator<Item = u32> {
    ENTRIES.iter().flat_map(|e| (e.first..=e.last).step_by(e.stride as usize))
}

const ENTRIES: &[Entry] = &[
    Entry::range(0x0041, 0x005A, FoldRule::Offset(32)),
    Entry::single(0x00B5, FoldRule::Converge(0x03BC)),
    Entry::range(0x00C0, 0x00D6, FoldRule::Offset(32)),
    Entry::range(0x00D8, 0x00DE, FoldRule::Offset(32)),
    Entry::single(0x00DF, FoldRule::Expand(&[0x0073, 0x0073])),
    Entry::paired(0x0100, 0x012E),
    Entry::single(0x0130, FoldRule::Expand(&[0x0069, 0x0307])),
    Entry::paired(0x0132, 0x0136),
    Entry::paired(0x0139, 0x0147),
    Entry::single(0x0149, FoldRule::Expand(&[0x02BC, 0x006E])),
    Entry::paired(0x014A, 0x0176),
    Entry::single(0x0178, FoldRule::Offset(-121)),
    Entry::paired(0x0179, 0x017D),
    Entry::single(0x017F, FoldRule::Converge(0x0073)),
    Entry::single(0x0181, FoldRule::Offset(210)),
    Entry::single(0x0182, FoldRule::Offset(1)),
    Entry::single(0x0184, FoldRule::Offset(1)),
    Entry::single(0x0186, FoldRule::Offset(206)),
    Entry::single(0x0187, FoldRule::Offset(1)),
    Entry::single(0x0189, FoldRule::Offset(205)),
    Entry::single(0x018A, FoldRule::Offset(205)),
    Entry::single(0x018B, FoldRule::Offset(1)),
    Entry::single(0x018E, FoldRule::Offset(79)),
    Entry::single(0x018F, FoldRule::Offset(202)),
    Entry::single(0x0190, FoldRule::Offset(203)),
    Entry::single(0x0191, FoldRule::Offset(1)),
    Entry::single(0x0193, FoldRule::Offset(205)),
    Entry::single(0x0194, FoldRule::Offset(207)),
    Entry::single(0x0196, FoldRule::Offset(211)),
    Entry::single(0x0197, FoldRule::Offset(209)),
    Entry::single(0x0198, FoldRule::Offset(1)),
    Entry::single(0x019C, FoldRule::Offset(211)),
    Entry::single(0x019D, FoldRule::Offset(213)),
    Entry::single(0x019F, FoldRule::Offset(214)),
    Entry::single(0x01A0, FoldRule::Offset(1)),
    Entry::single(0x01A2, FoldRule::Offset(1)),
    Entry::single(0x01A4, FoldRule::Offset(1)),
    Entry::single(0x01A6, FoldRule::Offset(218)),
    Entry::single(0x01A7, FoldRule::Offset(1)),
    Entry::single(0x01A9, FoldRule::Offset(218)),
    Entry::single(0x01AC, FoldRule::Offset(1)),
    Entry::single(0x01AE, FoldRule::Offset(218)),
    Entry::single(0x01AF, FoldRule::Offset(1)),
    Entry::single(0x01B1, FoldRule::Offset(217)),
    Entry::single(0x01B2, FoldRule::Offset(217)),
    Entry::single(0x01B3, FoldRule::Offset(1)),
    Entry::single(0x01B5, FoldRule::Offset(1)),
    Entry::single(0x01B7, FoldRule::Offset(219)),
    Entry::single(0x01B8, FoldRule::Offset(1)),
    Entry::single(0x01BC, FoldRule::Offset(1)),
    Entry::single(0x01C4, FoldRule::Converge(0x01C6)),
    Entry::single(0x01C5, FoldRule::Offset(1)),
    Entry::single(0x01C7, FoldRule::Converge(0x01C9)),
    Entry::single(0x01C8, FoldRule::Offset(1)),
    Entry::single(0x01CA, FoldRule::Converge(0x01CC)),
    Entry::single(0x01CB, FoldRule::Offset(1)),
    Entry::paired(0x01CD, 0x01DB),
    Entry::paired(0x01DE, 0x01EE),
    Entry::single(0x01F0, FoldRule::Expand(&[0x006A, 0x030C])),
    Entry::single(0x01F1, FoldRule::Converge(0x01F3)),
    Entry::single(0x01F2, FoldRule::Offset(1)),
    Entry::single(0x01F4, FoldRule::Offset(1)),
    Entry::single(0x01F6, FoldRule::Offset(-97)),
    Entry::single(0x01F7, FoldRule::Offset(-56)),
    Entry::paired(0x01F8, 0x01FE),
    Entry::paired(0x0200, 0x021E),
    Entry::single(0x0220, FoldRule::Offset(-130)),
    Entry::paired(0x0222, 0x0232),
    Entry::single(0x023A, FoldRule::Offset(10795)),
    Entry::single(0x023B, FoldRule::Offset(1)),
    Entry::single(0x023D, FoldRule::Offset(-163)),
    Entry::single(0x023E, FoldRule::Offset(10792)),
    Entry::single(0x0241, FoldRule::Offset(1)),
    Entry::single(0x0243, FoldRule::Offset(-195)),
    Entry::single(0x0244, FoldRule::Offset(69)),
    Entry::single(0x0245, FoldRule::Offset(71)),
    Entry::paired(0x0246, 0x024E),
    Entry::single(0x0345, FoldRule::Converge(0x03B9)),
    Entry::paired(0x0370, 0x0372),
    Entry::single(0x0376, FoldRule::Offset(1)),
    Entry::single(0x037F, FoldRule::Offset(116)),
    Entry::single(0x0386, FoldRule::Offset(38)),
    Entry::range(0x0388, 0x038A, FoldRule::Offset(37)),
    Entry::single(0x038C, FoldRule::Offset(64)),
    Entry::single(0x038E, FoldRule::Offset(63)),
    Entry::single(0x038F, FoldRule::Offset(63)),
    Entry::single(0x0390, FoldRule::Expand(&[0x03B9, 0x0308, 0x0301])),
    Entry::range(0x0391, 0x03A1, FoldRule::Offset(32)),
    Entry::range(0x03A3, 0x03AB, FoldRule::Offset(32)),
    Entry::single(0x03B0, FoldRule::Expand(&[0x03C5, 0x0308, 0x0301])),
    Entry::single(0x03C2, FoldRule::Offset(1)),
    Entry::single(0x03CF, FoldRule::Offset(8)),
    Entry::single(0x03D0, FoldRule::Converge(0x03B2)),
    Entry::single(0x03D1, FoldRule::Converge(0x03B8)),
    Entry::single(0x03D5, FoldRule::Converge(0x03C6)),
    Entry::single(0x03D6, FoldRule::Converge(0x03C0)),
    Entry::paired(0x03D8, 0x03EE),
    Entry::single(0x03F0, FoldRule::Converge(0x03BA)),
    Entry::single(0x03F1, FoldRule::Converge(0x03C1)),
    Entry::single(0x03F4, FoldRule::Converge(0x03B8)),
    Entry::single(0x03F5, FoldRule::Converge(0x03B5)),
    Entry::single(0x03F7, FoldRule::Offset(1)),
    Entry::single(0x03F9, FoldRule::Offset(-7)),
    Entry::single(0x03FA, FoldRule::Offset(1)),
    Entry::range(0x03FD, 0x03FF, FoldRule::Offset(-130)),
    Entry::range(0x0400, 0x040F, FoldRule::Offset(80)),
    Entry::range(0x0410, 0x042F, FoldRule::Offset(32)),
    Entry::paired(0x0460, 0x0480),
    Entry::paired(0x048A, 0x04BE),
    Entry::single(0x04C0, FoldRule::Offset(15)),
    Entry::paired(0x04C1, 0x04CD),
    Entry::paired(0x04D0, 0x04FE),
    Entry::paired(0x0500, 0x052E),
    Entry::range(0x0531, 0x0556, FoldRule::Offset(48)),
    Entry::single(0x0587, FoldRule::Expand(&[0x0565, 0x0582])),
    Entry::range(0x10A0, 0x10C5, FoldRule::Offset(7264)),
    Entry::single(0x10C7, FoldRule::Offset(7264)),
    Entry::single(0x10CD, FoldRule::Offset(7264)),
    Entry::range(0x13F8, 0x13FD, FoldRule::Offset(-8)),
    Entry::single(0x1C80, FoldRule::Converge(0x0432)),
    Entry::single(0x1C81, FoldRule::Converge(0x0434)),
    Entry::single(0x1C82, FoldRule::Converge(0x043E)),
    Entry::single(0x1C83, FoldRule::Converge(0x0441)),
    Entry::single(0x1C84, FoldRule::Converge(0x0442)),
    Entry::single(0x1C85, FoldRule::Converge(0x0442)),
    Entry::single(0x1C86, FoldRule::Converge(0x044A)),
    Entry::single(0x1C87, FoldRule::Converge(0x0463)),
    Entry::single(0x1C88, FoldRule::Converge(0xA64B)),
    Entry::single(0x1C89, FoldRule::Offset(1)),
    Entry::range(0x1C90, 0x1CBA, FoldRule::Offset(-3008)),
    Entry::range(0x1CBD, 0x1CBF, FoldRule::Offset(-3008)),
    Entry::paired(0x1E00, 0x1E94),
    Entry::single(0x1E96, FoldRule::Expand(&[0x0068, 0x0331])),
    Entry::single(0x1E97, FoldRule::Expand(&[0x0074, 0x0308])),
    Entry::single(0x1E98, FoldRule::Expand(&[0x0077, 0x030A])),
    Entry::single(0x1E99, FoldRule::Expand(&[0x0079, 0x030A])),
    Entry::single(0x1E9A, FoldRule::Expand(&[0x0061, 0x02BE])),
    Entry::single(0x1E9B, FoldRule::Converge(0x1E61)),
    Entry::single(0x1E9E, FoldRule::Expand(&[0x0073, 0x0073])),
    Entry::paired(0x1EA0, 0x1EFE),
    Entry::range(0x1F08, 0x1F0F, FoldRule::Offset(-8)),
    Entry::range(0x1F18, 0x1F1D, FoldRule::Offset(-8)),
    Entry::range(0x1F28, 0x1F2F, FoldRule::Offset(-8)),
    Entry::range(0x1F38, 0x1F3F, FoldRule::Offset(-8)),
    Entry::range(0x1F48, 0x1F4D, FoldRule::Offset(-8)),
    Entry::single(0x1F50, FoldRule::Expand(&[0x03C5, 0x0313])),
    Entry::single(0x1F52, FoldRule::Expand(&[0x03C5, 0x0313, 0x0300])),
    Entry::single(0x1F54, FoldRule::Expand(&[0x03C5, 0x0313, 0x0301])),
    Entry::single(0x1F56, FoldRule::Expand(&[0x03C5, 0x0313, 0x0342])),
    Entry::single(0x1F59, FoldRule::Offset(-8)),
    Entry::single(0x1F5B, FoldRule::Offset(-8)),
    Entry::single(0x1F5D, FoldRule::Offset(-8)),
    Entry::single(0x1F5F, FoldRule::Offset(-8)),
    Entry::range(0x1F68, 0x1F6F, FoldRule::Offset(-8)),
    Entry::single(0x1F80, FoldRule::Expand(&[0x1F00, 0x03B9])),
    Entry::single(0x1F81, FoldRule::Expand(&[0x1F01, 0x03B9])),
    Entry::single(0x1F82, FoldRule::Expand(&[0x1F02, 0x03B9])),
    Entry::single(0x1F83, FoldRule::Expand(&[0x1F03, 0x03B9])),
    Entry::single(0x1F84, FoldRule::Expand(&[0x1F04, 0x03B9])),
    Entry::single(0x1F85, FoldRule::Expand(&[0x1F05, 0x03B9])),
    Entry::single(0x1F86, FoldRule::Expand(&[0x1F06, 0x03B9])),
    Entry::single(0x1F87, FoldRule::Expand(&[0x1F07, 0x03B9])),
    Entry::single(0x1F88, FoldRule::Expand(&[0x1F00, 0x03B9])),
    Entry::single(0x1F89, FoldRule::Expand(&[0x1F01, 0x03B9])),
    Entry::single(0x1F8A, FoldRule::Expand(&[0x1F02, 0x03B9])),
    Entry::single(0x1F8B, FoldRule::Expand(&[0x1F03, 0x03B9])),
    Entry::single(0x1F8C, FoldRule::Expand(&[0x1F04, 0x03B9])),
    Entry::single(0x1F8D, FoldRule::Expand(&[0x1F05, 0x03B9])),
    Entry::single(0x1F8E, FoldRule::Expand(&[0x1F06, 0x03B9])),
    Entry::single(0x1F8F, FoldRule::Expand(&[0x1F07, 0x03B9])),
    Entry::single(0x1F90, FoldRule::Expand(&[0x1F20, 0x03B9])),
    Entry::single(0x1F91, FoldRule::Expand(&[0x1F21, 0x03B9])),
    Entry::single(0x1F92, FoldRule::Expand(&[0x1F22, 0x03B9])),
    Entry::single(0x1F93, FoldRule::Expand(&[0x1F23, 0x03B9])),
    Entry::single(0x1F94, FoldRule::Expand(&[0x1F24, 0x03B9])),
    Entry::single(0x1F95, FoldRule::Expand(&[0x1F25, 0x03B9])),
    Entry::single(0x1F96, FoldRule::Expand(&[0x1F26, 0x03B9])),
    Entry::single(0x1F97, FoldRule::Expand(&[0x1F27, 0x03B9])),
    Entry::single(0x1F98, FoldRule::Expand(&[0x1F20, 0x03B9])),
    Entry::single(0x1F99, FoldRule::Expand(&[0x1F21, 0x03B9])),
    Entry::single(0x1F9A, FoldRule::Expand(&[0x1F22, 0x03B9])),
    Entry::single(0x1F9B, FoldRule::Expand(&[0x1F23, 0x03B9])),
    Entry::single(0x1F9C, FoldRule::Expand(&[0x1F24, 0x03B9])),
    Entry::single(0x1F9D, FoldRule::Expand(&[0x1F25, 0x03B9])),
    Entry::single(0x1F9E, FoldRule::Expand(&[0x1F26, 0x03B9])),
    Entry::single(0x1F9F, FoldRule::Expand(&[0x1F27, 0x03B9])),
    Entry::single(0x1FA0, FoldRule::Expand(&[0x1F60, 0x03B9])),
    Entry::single(0x1FA1, FoldRule::Expand(&[0x1F61, 0x03B9])),
    Entry::single(0x1FA2, FoldRule::Expand(&[0x1F62, 0x03B9])),
    Entry::single(0x1FA3, FoldRule::Expand(&[0x1F63, 0x03B9])),
    Entry::single(0x1FA4, FoldRule::Expand(&[0x1F64, 0x03B9])),
    Entry::single(0x1FA5, FoldRule::Expand(&[0x1F65, 0x03B9])),
    Entry::single(0x1FA6, FoldRule::Expand(&[0x1F66, 0x03B9])),
    Entry::single(0x1FA7, FoldRule::Expand(&[0x1F67, 0x03B9])),
    Entry::single(0x1FA8, FoldRule::Expand(&[0x1F60, 0x03B9])),
    Entry::single(0x1FA9, FoldRule::Expand(&[0x1F61, 0x03B9])),
    Entry::single(0x1FAA, FoldRule::Expand(&[0x1F62, 0x03B9])),
    Entry::single(0x1FAB, FoldRule::Expand(&[0x1F63, 0x03B9])),
    Entry::single(0x1FAC, FoldRule::Expand(&[0x1F64, 0x03B9])),
    Entry::single(0x1FAD, FoldRule::Expand(&[0x1F65, 0x03B9])),
    Entry::single(0x1FAE, FoldRule::Expand(&[0x1F66, 0x03B9])),
    Entry::single(0x1FAF, FoldRule::Expand(&[0x1F67, 0x03B9])),
    Entry::single(0x1FB2, FoldRule::Expand(&[0x1F70, 0x03B9])),
    Entry::single(0x1FB3, FoldRule::Expand(&[0x03B1, 0x03B9])),
    Entry::single(0x1FB4, FoldRule::Expand(&[0x03AC, 0x03B9])),
    Entry::single(0x1FB6, FoldRule::Expand(&[0x03B1, 0x0342])),
    Entry::single(0x1FB7, FoldRule::Expand(&[0x03B1, 0x0342, 0x03B9])),
    Entry::single(0x1FB8, FoldRule::Offset(-8)),
    Entry::single(0x1FB9, FoldRule::Offset(-8)),
    Entry::single(0x1FBA, FoldRule::Offset(-74)),
    Entry::single(0x1FBB, FoldRule::Offset(-74)),
    Entry::single(0x1FBC, FoldRule::Expand(&[0x03B1, 0x03B9])),
    Entry::single(0x1FBE, FoldRule::Converge(0x03B9)),
    Entry::single(0x1FC2, FoldRule::Expand(&[0x1F74, 0x03B9])),
    Entry::single(0x1FC3, FoldRule::Expand(&[0x03B7, 0x03B9])),
    Entry::single(0x1FC4, FoldRule::Expand(&[0x03AE, 0x03B9])),
    Entry::single(0x1FC6, FoldRule::Expand(&[0x03B7, 0x0342])),
    Entry::single(0x1FC7, FoldRule::Expand(&[0x03B7, 0x0342, 0x03B9])),
    Entry::range(0x1FC8, 0x1FCB, FoldRule::Offset(-86)),
    Entry::single(0x1FCC, FoldRule::Expand(&[0x03B7, 0x03B9])),
    Entry::single(0x1FD2, FoldRule::Expand(&[0x03B9, 0x0308, 0x0300])),
    Entry::single(0x1FD3, FoldRule::Expand(&[0x03B9, 0x0308, 0x0301])),
    Entry::single(0x1FD6, FoldRule::Expand(&[0x03B9, 0x0342])),
    Entry::single(0x1FD7, FoldRule::Expand(&[0x03B9, 0x0308, 0x0342])),
    Entry::single(0x1FD8, FoldRule::Offset(-8)),
    Entry::single(0x1FD9, FoldRule::Offset(-8)),
    Entry::single(0x1FDA, FoldRule::Offset(-100)),
    Entry::single(0x1FDB, FoldRule::Offset(-100)),
    Entry::single(0x1FE2, FoldRule::Expand(&[0x03C5, 0x0308, 0x0300])),
    Entry::single(0x1FE3, FoldRule::Expand(&[0x03C5, 0x0308, 0x0301])),
    Entry::single(0x1FE4, FoldRule::Expand(&[0x03C1, 0x0313])),
    Entry::single(0x1FE6, FoldRule::Expand(&[0x03C5, 0x0342])),
    Entry::single(0x1FE7, FoldRule::Expand(&[0x03C5, 0x0308, 0x0342])),
    Entry::single(0x1FE8, FoldRule::Offset(-8)),
    Entry::single(0x1FE9, FoldRule::Offset(-8)),
    Entry::single(0x1FEA, FoldRule::Offset(-112)),
    Entry::single(0x1FEB, FoldRule::Offset(-112)),
    Entry::single(0x1FEC, FoldRule::Offset(-7)),
    Entry::single(0x1FF2, FoldRule::Expand(&[0x1F7C, 0x03B9])),
    Entry::single(0x1FF3, FoldRule::Expand(&[0x03C9, 0x03B9])),
    Entry::single(0x1FF4, FoldRule::Expand(&[0x03CE, 0x03B9])),
    Entry::single(0x1FF6, FoldRule::Expand(&[0x03C9, 0x0342])),
    Entry::single(0x1FF7, FoldRule::Expand(&[0x03C9, 0x0342, 0x03B9])),
    Entry::single(0x1FF8, FoldRule::Offset(-128)),
    Entry::single(0x1FF9, FoldRule::Offset(-128)),
    Entry::single(0x1FFA, FoldRule::Offset(-126)),
    Entry::single(0x1FFB, FoldRule::Offset(-126)),
    Entry::single(0x1FFC, FoldRule::Expand(&[0x03C9, 0x03B9])),
    Entry::single(0x2126, FoldRule::Converge(0x03C9)),
    Entry::single(0x212A, FoldRule::Converge(0x006B)),
    Entry::single(0x212B, FoldRule::Converge(0x00E5)),
    Entry::single(0x2132, FoldRule::Offset(28)),
    Entry::range(0x2160, 0x216F, FoldRule::Offset(16)),
    Entry::single(0x2183, FoldRule::Offset(1)),
    Entry::range(0x24B6, 0x24CF, FoldRule::Offset(26)),
    Entry::range(0x2C00, 0x2C2F, FoldRule::Offset(48)),
    Entry::single(0x2C60, FoldRule::Offset(1)),
    Entry::single(0x2C62, FoldRule::Offset(-10743)),
    Entry::single(0x2C63, FoldRule::Offset(-3814)),
    Entry::single(0x2C64, FoldRule::Offset(-10727)),
    Entry::single(0x2C67, FoldRule::Offset(1)),
    Entry::single(0x2C69, FoldRule::Offset(1)),
    Entry::single(0x2C6B, FoldRule::Offset(1)),
    Entry::single(0x2C6D, FoldRule::Offset(-10780)),
    Entry::single(0x2C6E, FoldRule::Offset(-10749)),
    Entry::single(0x2C6F, FoldRule::Offset(-10783)),
    Entry::single(0x2C70, FoldRule::Offset(-10782)),
    Entry::single(0x2C72, FoldRule::Offset(1)),
    Entry::single(0x2C75, FoldRule::Offset(1)),
    Entry::single(0x2C7E, FoldRule::Offset(-10815)),
    Entry::single(0x2C7F, FoldRule::Offset(-10815)),
    Entry::paired(0x2C80, 0x2CE2),
    Entry::single(0x2CEB, FoldRule::Offset(1)),
    Entry::single(0x2CED, FoldRule::Offset(1)),
    Entry::single(0x2CF2, FoldRule::Offset(1)),
    Entry::paired(0xA640, 0xA66C),
    Entry::paired(0xA680, 0xA69A),
    Entry::paired(0xA722, 0xA72E),
    Entry::paired(0xA732, 0xA76E),
    Entry::single(0xA779, FoldRule::Offset(1)),
    Entry::single(0xA77B, FoldRule::Offset(1)),
    Entry::single(0xA77D, FoldRule::Offset(-35332)),
    Entry::paired(0xA77E, 0xA786),
    Entry::single(0xA78B, FoldRule::Offset(1)),
    Entry::single(0xA78D, FoldRule::Offset(-42280)),
    Entry::paired(0xA790, 0xA792),
    Entry::paired(0xA796, 0xA7A8),
    Entry::single(0xA7AA, FoldRule::Offset(-42308)),
    Entry::single(0xA7AB, FoldRule::Offset(-42319)),
    Entry::single(0xA7AC, FoldRule::Offset(-42315)),
    Entry::single(0xA7AD, FoldRule::Offset(-42305)),
    Entry::single(0xA7AE, FoldRule::Offset(-42308)),
    Entry::single(0xA7B0, FoldRule::Offset(-42258)),
    Entry::single(0xA7B1, FoldRule::Offset(-42282)),
    Entry::single(0xA7B2, FoldRule::Offset(-42261)),
    Entry::single(0xA7B3, FoldRule::Offset(928)),
    Entry::paired(0xA7B4, 0xA7C2),
    Entry::single(0xA7C4, FoldRule::Offset(-48)),
    Entry::single(0xA7C5, FoldRule::Offset(-42307)),
    Entry::single(0xA7C6, FoldRule::Offset(-35384)),
    Entry::single(0xA7C7, FoldRule::Offset(1)),
    Entry::single(0xA7C9, FoldRule::Offset(1)),
    Entry::single(0xA7CB, FoldRule::Offset(-42343)),
    Entry::single(0xA7CC, FoldRule::Offset(1)),
    Entry::single(0xA7CE, FoldRule::Offset(1)),
    Entry::single(0xA7D0, FoldRule::Offset(1)),
    Entry::single(0xA7D2, FoldRule::Offset(1)),
    Entry::single(0xA7D4, FoldRule::Offset(1)),
    Entry::single(0xA7D6, FoldRule::Offset(1)),
    Entry::single(0xA7D8, FoldRule::Offset(1)),
    Entry::single(0xA7DA, FoldRule::Offset(1)),
    Entry::single(0xA7DC, FoldRule::Offset(-42561)),
    Entry::single(0xA7F5, FoldRule::Offset(1)),
    Entry::range(0xAB70, 0xABBF, FoldRule::Offset(-38864)),
    Entry::single(0xFB00, FoldRule::Expand(&[0x0066, 0x0066])),
    Entry::single(0xFB01, FoldRule::Expand(&[0x0066, 0x0069])),
    Entry::single(0xFB02, FoldRule::Expand(&[0x0066, 0x006C])),
    Entry::single(0xFB03, FoldRule::Expand(&[0x0066, 0x0066, 0x0069])),
    Entry::single(0xFB04, FoldRule::Expand(&[0x0066, 0x0066, 0x006C])),
    Entry::single(0xFB05, FoldRule::Expand(&[0x0073, 0x0074])),
    Entry::single(0xFB06, FoldRule::Expand(&[0x0073, 0x0074])),
    Entry::single(0xFB13, FoldRule::Expand(&[0x0574, 0x0576])),
    Entry::single(0xFB14, FoldRule::Expand(&[0x0574, 0x0565])),
    Entry::single(0xFB15, FoldRule::Expand(&[0x0574, 0x056B])),
    Entry::single(0xFB16, FoldRule::Expand(&[0x057E, 0x0576])),
    Entry::single(0xFB17, FoldRule::Expand(&[0x0574, 0x056D])),
    Entry::range(0xFF21, 0xFF3A, FoldRule::Offset(32)),
    Entry::range(0x10400, 0x10427, FoldRule::Offset(40)),
    Entry::range(0x104B0, 0x104D3, FoldRule::Offset(40)),
    Entry::range(0x10570, 0x1057A, FoldRule::Offset(39)),
    Entry::range(0x1057C, 0x1058A, FoldRule::Offset(39)),
    Entry::range(0x1058C, 0x10592, FoldRule::Offset(39)),
    Entry::single(0x10594, FoldRule::Offset(39)),
    Entry::single(0x10595, FoldRule::Offset(39)),
    Entry::range(0x10C80, 0x10CB2, FoldRule::Offset(64)),
    Entry::range(0x10D50, 0x10D65, FoldRule::Offset(32)),
    Entry::range(0x118A0, 0x118BF, FoldRule::Offset(32)),
    Entry::range(0x16E40, 0x16E5F, FoldRule::Offset(32)),
    Entry::range(0x16EA0, 0x16EB8, FoldRule::Offset(27)),
    Entry::range(0x1E900, 0x1E921, FoldRule::Offset(34)),
];
