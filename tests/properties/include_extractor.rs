//! Property tests for import statement scanning.

use proptest::prelude::*;

use kiln::domain::services::{with_extension, IncludeExtractor};

fn token() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_./-]{1,24}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Scanning arbitrary text never panics, even with offsets
    /// inside multi-byte characters or past the end.
    #[test]
    fn property_scan_never_panics(
        text in "(?s).{0,512}",
        offset in 0usize..600
    ) {
        let extractor = IncludeExtractor::new("@import");
        let _ = extractor.find_next_include(&text, offset);
        let _ = extractor.matches(&text).count();
    }

    /// PROPERTY: Match spans lie inside the text and advance strictly.
    #[test]
    fn property_spans_are_ordered_and_in_bounds(
        text in "(?s)(@import|[ ;'\"a-z\n]){0,64}"
    ) {
        let extractor = IncludeExtractor::new("@import");
        let mut last_end = 0;
        for found in extractor.matches(&text) {
            prop_assert!(found.span.start >= last_end);
            prop_assert!(found.span.end <= text.len());
            prop_assert!(found.span.start < found.span.end);
            last_end = found.span.end;
        }
    }

    /// PROPERTY: Every quoted token in a well-formed statement comes back
    /// in order, regardless of quote style.
    #[test]
    fn property_quoted_tokens_round_trip(
        tokens in proptest::collection::vec(token(), 1..5),
        single in proptest::collection::vec(any::<bool>(), 5)
    ) {
        let body = tokens
            .iter()
            .zip(&single)
            .map(|(t, s)| if *s { format!("'{}'", t) } else { format!("\"{}\"", t) })
            .collect::<Vec<_>>()
            .join(", ");
        let text = format!("@import {};\nbody {{ color: red; }}", body);

        let found: Vec<String> = IncludeExtractor::new("@import")
            .matches(&text)
            .flat_map(|m| m.tokens)
            .collect();

        prop_assert_eq!(found, tokens);
    }

    /// PROPERTY: Appending an extension is idempotent and never doubles it.
    #[test]
    fn property_with_extension_is_idempotent(
        t in token()
    ) {
        let once = with_extension(&t, ".scss");
        let twice = with_extension(&once, ".scss");

        prop_assert!(once.ends_with(".scss"));
        prop_assert!(!once.ends_with(".scss.scss") || t.ends_with(".scss.scss"));
        prop_assert_eq!(once, twice);
    }
}
