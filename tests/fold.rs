use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simd_casefind::fold::table::folding_codepoints;
use simd_casefind::fold::{CaseFolder, FoldRule, fold, fold_capacity, fold_rune, fold_to_vec, folded_len, lookup, order};
use simd_casefind::{Error, is_case_agnostic};

fn folded(s: &str) -> Vec<u8> {
    fold_to_vec(s.as_bytes())
}

fn all_chars() -> impl Iterator<Item = char> {
    (0..=0x10_FFFFu32).filter_map(char::from_u32)
}

#[test]
fn basic_scenarios() {
    assert_eq!(folded("ABC"), b"abc");
    assert_eq!(folded("ﬃ"), b"ffi");
    assert_eq!(folded("µ"), folded("Μ"));
    assert_eq!(folded("Μ"), folded("μ"));
    assert_eq!(folded("İ"), "i\u{307}".as_bytes());
    assert_eq!(folded("ΣΊΣΥΦΟΣ"), folded("σίσυφος"));
    assert_eq!(folded("ẞ"), b"ss");
    assert_eq!(folded("\u{212A}"), b"k");
}

#[test]
fn no_locale_tailoring() {
    assert_eq!(folded("I"), b"i");
    assert_eq!(folded("ı"), "ı".as_bytes());
    assert_ne!(folded("ı"), folded("i"));
}

#[test]
fn look_alike_symbols_stay_apart() {
    assert_eq!(folded("×"), "×".as_bytes());
    assert_eq!(folded("÷"), "÷".as_bytes());
    assert_ne!(order("×".as_bytes(), "÷".as_bytes()), Ordering::Equal);
}

#[test]
fn fold_is_idempotent_for_every_codepoint() {
    let mut buf = [0u8; 4];
    for ch in all_chars() {
        let once = fold_to_vec(ch.encode_utf8(&mut buf).as_bytes());
        assert_eq!(fold_to_vec(&once), once, "U+{:04X}", ch as u32);
    }
}

#[test]
fn capacity_bound_holds_for_every_codepoint() {
    let mut buf = [0u8; 4];
    for ch in all_chars() {
        let s = ch.encode_utf8(&mut buf).as_bytes();
        assert!(folded_len(s) <= 3 * s.len(), "U+{:04X}", ch as u32);
    }
}

#[test]
fn table_rules_are_not_identity() {
    let mut count = 0;
    for cp in folding_codepoints() {
        assert_ne!(lookup(cp), FoldRule::Identity, "U+{cp:04X}");
        assert_ne!(fold_rune(cp).as_slice(), &[cp], "U+{cp:04X}");
        count += 1;
    }
    assert!(count > 1400, "{count}");
}

#[test]
fn malformed_bytes_pass_through() {
    let input = [0xFF, b'A', 0xC3, b'B', 0xE2, 0x82];
    assert_eq!(fold_to_vec(&input), [0xFF, b'a', 0xC3, b'b', 0xE2, 0x82]);
}

#[test]
fn small_output_buffer_is_reported() {
    let mut out = [0u8; 3];
    assert_eq!(
        fold("Straße".as_bytes(), &mut out),
        Err(Error::BufferTooSmall { needed: 7, capacity: 3 })
    );
    let mut folder = CaseFolder::new();
    assert!(matches!(folder.fold_chunk(b"abc", &mut out), Err(Error::BufferTooSmall { .. })));
    assert!(folder.pending().is_empty());
}

fn fold_in_pieces(input: &[u8], cuts: &[usize]) -> Vec<u8> {
    let mut folder = CaseFolder::new();
    let mut out = Vec::new();
    let mut buf = vec![0u8; fold_capacity(input.len())];
    let mut start = 0;
    for &cut in cuts.iter().chain(std::iter::once(&input.len())) {
        let n = folder.fold_chunk(&input[start..cut], &mut buf).unwrap();
        out.extend_from_slice(&buf[..n]);
        start = cut;
    }
    let n = folder.finish(&mut buf).unwrap();
    out.extend_from_slice(&buf[..n]);
    out
}

#[test]
fn every_single_split_matches_whole_fold() {
    let text = "Ǆ ΐ 𐐀𐐁 ﬃ Straße İ ꭰ Ⴀ".as_bytes();
    let whole = fold_to_vec(text);
    for cut in 0..=text.len() {
        assert_eq!(fold_in_pieces(text, &[cut]), whole, "cut at {cut}");
    }
}

#[test]
fn random_splits_match_whole_fold() {
    let mut rng = StdRng::seed_from_u64(0x5EED_F01D);
    let alphabet = ["a", "Z", "ß", "Σ", "ς", "İ", "ﬃ", "€", "😀", "Ⴀ", "\u{FF}", "ǅ"];
    for _ in 0..200 {
        let mut input = Vec::new();
        for _ in 0..rng.gen_range(0..40) {
            if rng.gen_range(0..8) == 0 {
                // A stray byte that may or may not complete a sequence.
                input.push(rng.gen_range(0x80..=0xFFu8));
            } else {
                input.extend_from_slice(alphabet[rng.gen_range(0..alphabet.len())].as_bytes());
            }
        }
        let mut cuts: Vec<usize> = (0..rng.gen_range(0..6)).map(|_| rng.gen_range(0..=input.len())).collect();
        cuts.sort_unstable();
        assert_eq!(fold_in_pieces(&input, &cuts), fold_to_vec(&input), "{input:?} {cuts:?}");
    }
}

#[test]
fn ordering() {
    assert_eq!(order("Straße".as_bytes(), b"STRASSE"), Ordering::Equal);
    assert_eq!(order(b"", b""), Ordering::Equal);
    assert_eq!(order(b"", b"a"), Ordering::Less);
    assert_eq!(order(b"Zebra", b"apple"), Ordering::Greater);
    assert_eq!(order(b"I", "ı".as_bytes()), Ordering::Less);
    // Malformed bytes sort after every codepoint.
    assert_eq!(order(&[0x80], "😀".as_bytes()), Ordering::Greater);
}

#[test]
fn case_agnostic_strings() {
    assert!(is_case_agnostic(b""));
    assert!(is_case_agnostic(b"2024-01-01 12:00"));
    assert!(is_case_agnostic("東京 😀".as_bytes()));
    assert!(!is_case_agnostic(b"abc"));
    assert!(!is_case_agnostic("ı".as_bytes()));
    assert!(!is_case_agnostic(&[b'1', 0xFF]));
}
