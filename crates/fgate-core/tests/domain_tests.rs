//! Integration tests for domain normalization and exclusion expansion

use fgate_core::domain::{normalize, ExclusionSet};
use proptest::prelude::*;

const NO_RESERVED: &[&str] = &[];

#[test]
fn test_normalization_variants_collapse() {
    for raw in [
        "wikipedia.org",
        "www.wikipedia.org",
        "http://wikipedia.org",
        "https://wikipedia.org",
        "https://www.wikipedia.org",
        "wikipedia.org/",
        "https://www.wikipedia.org/",
    ] {
        assert_eq!(normalize(raw), "wikipedia.org", "failed for {raw}");
    }
}

#[test]
fn test_subdomain_expansion_includes_parent() {
    let set = ExclusionSet::from_allowlist(&["mkce.codetantra.com"], NO_RESERVED);

    for expected in [
        "mkce.codetantra.com",
        "www.mkce.codetantra.com",
        "codetantra.com",
        "www.codetantra.com",
    ] {
        assert!(set.contains(expected), "missing {expected}");
    }
}

#[test]
fn test_apex_entries_do_not_expand_to_parents() {
    let set = ExclusionSet::from_allowlist(&["github.com"], NO_RESERVED);
    assert_eq!(set.len(), 2);
    assert!(!set.contains("com"));
}

#[test]
fn test_public_suffix_heuristic_is_naive() {
    // Known weakness, preserved: a two-part public suffix is treated as a
    // parent domain like any other
    let set = ExclusionSet::from_allowlist(&["foo.co.uk"], NO_RESERVED);
    assert!(set.contains("co.uk"));
    assert!(set.contains("www.co.uk"));
}

#[test]
fn test_expansion_is_order_stable() {
    let entries = ["github.com", "mkce.codetantra.com", "wikipedia.org"];
    let first = ExclusionSet::from_allowlist(&entries, NO_RESERVED).into_vec();
    let second = ExclusionSet::from_allowlist(&entries, NO_RESERVED).into_vec();
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(
        base in "[a-z0-9]{1,8}(\\.[a-z0-9]{1,8}){1,3}",
        scheme in 0usize..3,
        www in any::<bool>(),
        slash in any::<bool>(),
    ) {
        prop_assume!(!base.starts_with("www."));

        let mut raw = String::new();
        match scheme {
            1 => raw.push_str("http://"),
            2 => raw.push_str("https://"),
            _ => {}
        }
        if www {
            raw.push_str("www.");
        }
        raw.push_str(&base);
        if slash {
            raw.push('/');
        }

        let once = normalize(&raw);
        prop_assert_eq!(normalize(&once), once.clone());
        // All decoration stripped in one pass
        prop_assert_eq!(once, base);
    }

    #[test]
    fn prop_expansion_has_no_duplicates(
        entries in proptest::collection::vec("[a-z]{1,6}(\\.[a-z]{1,6}){1,2}", 0..8),
    ) {
        let set = ExclusionSet::from_allowlist(&entries, NO_RESERVED);
        let domains = set.into_vec();
        let unique: std::collections::HashSet<_> = domains.iter().collect();
        prop_assert_eq!(unique.len(), domains.len());
    }

    #[test]
    fn prop_every_entry_is_covered(
        entries in proptest::collection::vec("[a-z]{1,6}\\.[a-z]{2,4}", 1..6),
    ) {
        let set = ExclusionSet::from_allowlist(&entries, NO_RESERVED);
        for entry in &entries {
            prop_assert!(set.covers(&normalize(entry)));
        }
    }
}
