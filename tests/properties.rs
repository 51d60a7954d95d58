use std::cmp::Ordering;
use std::io::Cursor;

use memchr::memmem;
use proptest::prelude::*;
use simd_casefind::engine::{SearchEngine, SearchOptions, VecSink};
use simd_casefind::fold::{CaseFolder, fold_capacity, fold_to_vec};
use simd_casefind::{Finder, Match, find, find_serial, is_case_agnostic, order};

const PROPTEST_CASES: u32 = 256;

fn arb_char() -> impl Strategy<Value = char> {
    // Small pool of letters with interesting folds, plus caseless filler.
    prop_oneof![
        8 => prop::sample::select(vec!['a', 'B', 's', 'S', 'k', 'i', 'I', ' ', '.', '1', '\n']),
        2 => prop::sample::select(vec!['ß', 'ẞ', 'ſ', 'ﬃ', 'İ', 'ı', '\u{212A}', 'ǅ', 'ΐ']),
        2 => prop::sample::select(vec!['Σ', 'σ', 'ς', 'Ж', 'ж', 'Ⴀ', 'ⴀ', 'Ꭰ', 'ꭰ', 'µ', 'Μ']),
        2 => prop::sample::select(vec!['中', '😀', '€', '×', '÷', '\u{0301}']),
    ]
}

fn arb_text(max_chars: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(arb_char(), 0..=max_chars).prop_map(|chars| chars.into_iter().collect())
}

fn arb_caseless(max_chars: usize) -> impl Strategy<Value = String> {
    let pool = vec![' ', '.', '-', '1', '\n', '中', '😀', '€', '×', '÷'];
    prop::collection::vec(prop::sample::select(pool), 0..=max_chars).prop_map(|chars| chars.into_iter().collect())
}

/// Text with the occasional malformed byte spliced in.
fn arb_bytes(max_chars: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            9 => arb_char().prop_map(|c| c.to_string().into_bytes()),
            1 => (0x80u8..=0xFF).prop_map(|b| vec![b]),
        ],
        0..=max_chars,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: PROPTEST_CASES, .. ProptestConfig::default() })]

    #[test]
    fn fold_is_idempotent(input in arb_bytes(48)) {
        let once = fold_to_vec(&input);
        prop_assert_eq!(fold_to_vec(&once), once);
    }

    #[test]
    fn fold_fits_the_capacity_bound(input in arb_bytes(48)) {
        prop_assert!(fold_to_vec(&input).len() <= fold_capacity(input.len()));
    }

    #[test]
    fn order_is_reflexive(input in arb_bytes(48)) {
        prop_assert_eq!(order(&input, &input), Ordering::Equal);
    }

    #[test]
    fn order_matches_folded_bytes(a in arb_text(16), b in arb_text(16)) {
        let equal = fold_to_vec(a.as_bytes()) == fold_to_vec(b.as_bytes());
        prop_assert_eq!(order(a.as_bytes(), b.as_bytes()) == Ordering::Equal, equal);
    }

    #[test]
    fn chunked_fold_equals_whole_fold(input in arb_bytes(48), cuts in prop::collection::vec(0usize..200, 0..5)) {
        let mut cuts: Vec<usize> = cuts.into_iter().map(|c| c.min(input.len())).collect();
        cuts.sort_unstable();
        let mut folder = CaseFolder::new();
        let mut buf = vec![0u8; fold_capacity(input.len())];
        let mut out = Vec::new();
        let mut start = 0;
        for cut in cuts.into_iter().chain(std::iter::once(input.len())) {
            let n = folder.fold_chunk(&input[start..cut], &mut buf).unwrap();
            out.extend_from_slice(&buf[..n]);
            start = cut;
        }
        let n = folder.finish(&mut buf).unwrap();
        out.extend_from_slice(&buf[..n]);
        prop_assert_eq!(out, fold_to_vec(&input));
    }

    #[test]
    fn agnostic_needles_search_exactly(haystack in arb_bytes(64), needle in arb_caseless(4)) {
        prop_assert!(is_case_agnostic(needle.as_bytes()));
        let needle = needle.as_bytes();
        let exact = if needle.is_empty() { Some(0) } else { memmem::find(&haystack, needle) };
        let expected = exact.map(|offset| Match::new(offset, needle.len()));
        prop_assert_eq!(find(&haystack, needle), expected);
        prop_assert_eq!(find_serial(&haystack, needle), expected);
    }

    #[test]
    fn matches_fold_like_the_needle(haystack in arb_bytes(64), needle in arb_text(4)) {
        if let Some(m) = find(&haystack, needle.as_bytes()) {
            let span = &haystack[m.range()];
            // The span folds to something that contains the folded needle.
            let folded = fold_to_vec(span);
            let want = fold_to_vec(needle.as_bytes());
            prop_assert!(memmem::find(&folded, &want).is_some(), "{:?} {:?}", span, needle);
        }
    }

    #[test]
    fn streaming_equals_whole_buffer(haystack in arb_bytes(96), needle in arb_text(3), chunk in 1usize..40) {
        let finder = Finder::new(needle.as_bytes());
        let expected: Vec<Match> = finder.find_iter(&haystack).collect();
        let opts = SearchOptions { chunk_bytes: chunk, ..Default::default() };
        let engine = SearchEngine::new(needle.as_bytes(), opts).unwrap();
        let mut sink = VecSink::default();
        let count = engine.search(&mut Cursor::new(haystack.clone()), &mut sink).unwrap();
        let got: Vec<Match> = sink
            .offs
            .iter()
            .zip(&sink.lens)
            .map(|(&off, &len)| Match::new(off as usize, len as usize))
            .collect();
        if needle.is_empty() {
            prop_assert_eq!(count, 1);
        } else {
            prop_assert_eq!(count as usize, got.len());
            prop_assert_eq!(got, expected);
        }
    }
}
