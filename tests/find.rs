use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simd_casefind::{Finder, Match, NeedleMetadata, contains, find, find_serial, find_with_metadata};

fn at(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    find(haystack.as_bytes(), needle.as_bytes()).map(|m| (m.offset, m.len))
}

#[test]
fn empty_needle_is_zero() {
    assert_eq!(find(b"", b""), Some(Match::new(0, 0)));
    assert_eq!(find(b"abc", b""), Some(Match::new(0, 0)));
    assert_eq!(find(b"", b"a"), None);
}

#[test]
fn documented_scenarios() {
    assert_eq!(at("Hello World", "WORLD"), Some((6, 5)));
    assert_eq!(at("straße", "STRASSE"), Some((0, 7)));
    assert_eq!(at("STRASSE", "straße"), Some((0, 7)));
    assert_eq!(at("273 K", "273 k"), Some((0, 5)));
    assert_eq!(at("273 \u{212A}", "273 k"), Some((0, 7)));
    assert_eq!(at("×", "÷"), None);
}

#[test]
fn spans_are_in_original_bytes() {
    assert_eq!(at("straße", "SS"), Some((4, 2)));
    assert_eq!(at("Die Maße", "MASSE"), Some((4, 5)));
    assert_eq!(at("ǆungla", "Ǆ"), Some((0, 2)));
    assert_eq!(at("ﬃx", "FFIX"), Some((0, 4)));
    assert_eq!(at("efficient", "ﬃ"), Some((1, 3)));
    assert_eq!(at("İstanbul", "i\u{307}stanbul"), Some((0, 9)));
    assert_eq!(at("😀 smile", "😀 SMILE"), Some((0, 10)));
    assert_eq!(at("xx 😀😀", "😀"), Some((3, 4)));
}

#[test]
fn cross_script_equivalences() {
    assert_eq!(at("µs", "ΜS"), Some((0, 3)));
    assert_eq!(at("ΟΔΥΣΣΕΥΣ", "οδυσσευς"), Some((0, 16)));
    assert_eq!(at("Ωmega", "\u{2126}MEGA"), Some((0, 6)));
    assert_eq!(at("ԱՐԵՎ", "արեվ"), Some((0, 8)));
    assert_eq!(at("ԵՒ", "և"), Some((0, 4)));
    assert_eq!(at("ᏣᎳᎩ", "ꮳꮃꭹ"), Some((0, 9)));
}

#[test]
fn no_false_friends() {
    assert_eq!(at("Istanbul", "ıstanbul"), None);
    assert_eq!(at("ıi", "I"), Some((2, 1)));
    assert_eq!(at("a×b", "A÷B"), None);
    assert!(!contains("Straße".as_bytes(), b"STRASE"));
}

#[test]
fn malformed_bytes_match_only_themselves() {
    let h = [b'a', 0xFF, b'B', 0xC3, b'x'];
    assert_eq!(find(&h, &[0xFF, b'b']), Some(Match::new(1, 2)));
    assert_eq!(find(&h, &[0xC3, b'X']), Some(Match::new(3, 2)));
    assert_eq!(find(&h, &[0xFE]), None);
    // A malformed byte never equals the codepoint it resembles.
    assert_eq!(find(&[0xC3], "Ã".as_bytes()), None);
}

#[test]
fn leftmost_match_wins() {
    assert_eq!(at("aaaaa", "AAA"), Some((0, 3)));
    assert_eq!(at("xSSxßx", "ß"), Some((1, 2)));
    assert_eq!(at("xßxSSx", "ss"), Some((1, 2)));
}

#[test]
fn metadata_is_handed_back() {
    let mut meta = NeedleMetadata::default();
    let m = find_with_metadata("Grüße".as_bytes(), "GRÜSSE".as_bytes(), &mut meta);
    assert_eq!(m, Some(Match::new(0, 7)));
    assert!(!meta.is_case_agnostic);
    assert_eq!(meta.probe.as_bytes(), "grüsse".as_bytes());
}

#[test]
fn finder_iterates_overlapping_matches() {
    let finder = Finder::new(b"aa");
    let offsets: Vec<_> = finder.find_iter(b"AaAa").map(|m| m.offset).collect();
    assert_eq!(offsets, [0, 1, 2]);

    let finder = Finder::new(b"s");
    let all: Vec<_> = finder.find_iter("Sßs".as_bytes()).map(|m| (m.offset, m.len)).collect();
    assert_eq!(all, [(0, 1), (1, 2), (3, 1)]);

    let empty = Finder::new(b"");
    assert_eq!(empty.find_iter(b"abc").count(), 1);
}

#[test]
fn random_blob_hit_middle() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut blob = vec![0u8; 32 * 1024];
    rng.fill(blob.as_mut_slice());

    let needle = "Grüßgott-Nadel".as_bytes();
    let planted = "GRÜSSGOTT-nadel".as_bytes();
    let pos = blob.len() / 2;
    blob[pos..pos + planted.len()].copy_from_slice(planted);

    assert_eq!(find(&blob, needle), Some(Match::new(pos, planted.len())));
    assert_eq!(find_serial(&blob, needle), Some(Match::new(pos, planted.len())));
}

#[test]
fn random_blob_no_hit() {
    let mut rng = StdRng::seed_from_u64(0xBAD5EED);
    let mut blob = vec![0u8; 64 * 1024];
    rng.fill(blob.as_mut_slice());

    let needle = "this-needle-should-not-appear-here-Ünlikely".as_bytes();
    assert_eq!(find(&blob, needle), None);
}

#[test]
fn long_pattern_edge() {
    let h = "xX".repeat(1 << 19);
    let n = "x".repeat(64);
    assert_eq!(at(&h, &n), Some((0, 64)));
}
