//! Property tests for lexical include path resolution.

use std::path::{Component, Path};

use proptest::prelude::*;

use kiln::domain::services::resolve;

fn raw_path() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        Just("..".to_string()),
        Just(".".to_string()),
        proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap(),
    ];
    (
        proptest::collection::vec(segment, 1..8),
        any::<bool>(),
    )
        .prop_map(|(segments, backslash)| segments.join(if backslash { "\\" } else { "/" }))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Resolution never panics on arbitrary input.
    #[test]
    fn property_resolve_never_panics(
        s in "(?s).{0,256}"
    ) {
        let _ = resolve(Path::new("/site/css"), &s);
    }

    /// PROPERTY: Resolving against an absolute base yields an absolute path
    /// with no `.` or `..` segments left.
    #[test]
    fn property_resolved_paths_are_normalized(
        raw in raw_path()
    ) {
        let resolved = resolve(Path::new("/site/css"), &raw).unwrap();

        prop_assert!(resolved.was_relative);
        prop_assert!(resolved.path.is_absolute());
        prop_assert!(resolved
            .path
            .components()
            .all(|c| !matches!(c, Component::CurDir | Component::ParentDir)));
    }

    /// PROPERTY: Resolving an already resolved path is a no-op.
    #[test]
    fn property_resolve_is_idempotent(
        raw in raw_path()
    ) {
        let first = resolve(Path::new("/site/css"), &raw).unwrap();
        let again = resolve(Path::new("/elsewhere"), &first.path.display().to_string()).unwrap();

        prop_assert!(!again.was_relative);
        prop_assert_eq!(again.path, first.path);
    }
}
