//! Property-based invariant tests for the comparison pipeline.
//!
//! 1. `compare` always succeeds for inputs under the length limit.
//! 2. Each side can be rebuilt from its chunks.
//! 3. Comparing a text with itself yields at most one unchanged chunk.
//! 4. Similarity and the added/removed character split do not depend on
//!    argument order, in every mode.
//! 5. The LCS length matches the equal count of an independent minimal diff.
//! 6. Chunks come out in increasing position order.

use proptest::prelude::*;
use similar::{capture_diff_slices, Algorithm, DiffTag};
use textcompare::{
    compare, compute_lcs, preprocess, side_text, tokenize, ChunkPairing, ChunkType,
    ComparisonMode, ComparisonOptions, EngineConfig, Side, TextComparer, ViewMode,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn text_strategy() -> impl Strategy<Value = String> {
    // Small alphabet so the two sides share plenty of tokens
    "[abAB \t\nä]{0,24}"
}

fn mode_strategy() -> impl Strategy<Value = ComparisonMode> {
    prop_oneof![
        Just(ComparisonMode::Character),
        Just(ComparisonMode::Word),
        Just(ComparisonMode::Line),
    ]
}

fn options_strategy() -> impl Strategy<Value = ComparisonOptions> {
    (mode_strategy(), any::<bool>(), any::<bool>()).prop_map(
        |(mode, case_sensitive, ignore_whitespace)| ComparisonOptions {
            mode,
            view_mode: ViewMode::Unified,
            case_sensitive,
            ignore_whitespace,
            show_line_numbers: true,
            context_lines: 3,
        },
    )
}

fn expected_tokens(text: &str, options: &ComparisonOptions) -> Vec<String> {
    tokenize(
        &preprocess(text, options.case_sensitive, options.ignore_whitespace),
        options.mode,
    )
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Totality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn compare_always_succeeds(
        a in text_strategy(),
        b in text_strategy(),
        options in options_strategy(),
    ) {
        let result = compare(&a, &b, &options);
        prop_assert!(result.success, "error: {:?}", result.error);
        prop_assert!(result.statistics.similarity_percentage <= 100);
        prop_assert_eq!(&result.original_text, &a);
        prop_assert_eq!(&result.modified_text, &b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Reconstruction
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn chunks_rebuild_both_sides(
        a in text_strategy(),
        b in text_strategy(),
        options in options_strategy(),
        pair in any::<bool>(),
    ) {
        let pairing = if pair { ChunkPairing::PairReplacements } else { ChunkPairing::Preserve };
        let comparer = TextComparer::new(EngineConfig::default().with_chunk_pairing(pairing));
        let result = comparer.compare(&a, &b, &options);

        let original = side_text(&result.chunks, options.mode, Side::Original);
        let modified = side_text(&result.chunks, options.mode, Side::Modified);

        prop_assert_eq!(tokenize(&original, options.mode), expected_tokens(&a, &options));
        prop_assert_eq!(tokenize(&modified, options.mode), expected_tokens(&b, &options));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Identity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn identical_inputs_are_unchanged(text in text_strategy(), options in options_strategy()) {
        let result = compare(&text, &text, &options);
        let expected_chunks = if expected_tokens(&text, &options).is_empty() { 0 } else { 1 };

        prop_assert_eq!(result.chunks.len(), expected_chunks);
        prop_assert!(result.chunks.iter().all(|c| c.kind == ChunkType::Unchanged));
        prop_assert_eq!(result.statistics.similarity_percentage, 100);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Symmetric similarity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn similarity_is_symmetric(
        a in text_strategy(),
        b in text_strategy(),
        options in options_strategy(),
    ) {
        let forward = compare(&a, &b, &options);
        let backward = compare(&b, &a, &options);

        prop_assert_eq!(
            forward.statistics.similarity_percentage,
            backward.statistics.similarity_percentage
        );
        prop_assert_eq!(forward.statistics.added_chars, backward.statistics.removed_chars);
        prop_assert_eq!(forward.statistics.removed_chars, backward.statistics.added_chars);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. LCS length agrees with a minimal diff
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lcs_length_matches_minimal_diff(
        a in text_strategy(),
        b in text_strategy(),
        mode in mode_strategy(),
    ) {
        let left = tokenize(&a, mode);
        let right = tokenize(&b, mode);

        let lcs = compute_lcs(&left, &right).unwrap();
        let equal: usize = capture_diff_slices(Algorithm::Myers, &left, &right)
            .iter()
            .map(|op| op.as_tag_tuple())
            .filter(|(tag, _, _)| *tag == DiffTag::Equal)
            .map(|(_, old, _)| old.len())
            .sum();

        prop_assert_eq!(lcs.length, equal);
        prop_assert_eq!(lcs.sequence.len(), lcs.length);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Ordering
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn chunks_are_ordered(
        a in text_strategy(),
        b in text_strategy(),
        options in options_strategy(),
    ) {
        let result = compare(&a, &b, &options);

        for pair in result.chunks.windows(2) {
            prop_assert!(pair[0].line_number < pair[1].line_number);
            prop_assert!(pair[0].kind != pair[1].kind);
        }

        let mut next_original = 0;
        let mut next_modified = 0;
        for chunk in &result.chunks {
            if let (Some(start), Some(end)) = (chunk.original_start, chunk.original_end) {
                prop_assert_eq!(start, next_original);
                next_original = end;
            }
            if let (Some(start), Some(end)) = (chunk.modified_start, chunk.modified_end) {
                prop_assert_eq!(start, next_modified);
                next_modified = end;
            }
        }
        prop_assert_eq!(next_original, expected_tokens(&a, &options).len());
        prop_assert_eq!(next_modified, expected_tokens(&b, &options).len());
    }
}
