//! Exclusion-set expansion
//!
//! Expands the normalized allowlist into the full list of domains that the
//! blocking rule must exempt: each entry, its `www.` variant, the two-label
//! parent for subdomain entries, and the fixed reserved domains.

use std::collections::HashSet;

use super::normalize;

/// Ordered, duplicate-free set of domains exempted from blocking.
///
/// Insertion order is preserved so the synthesized rule stays stable across
/// recomputes of the same preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    entries: Vec<String>,
    index: HashSet<String>,
}

impl ExclusionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the exclusion set from raw allowlist entries plus the
    /// reserved platform domains.
    ///
    /// For every entry the set receives the normalized domain and its
    /// `www.` variant. Entries with more than two dot-separated labels are
    /// treated as subdomains and additionally contribute their two-label
    /// parent (and the parent's `www.` variant).
    ///
    /// The parent heuristic is naive about multi-part public suffixes:
    /// `foo.co.uk` surfaces `co.uk` as a parent. Kept as-is.
    pub fn from_allowlist<A, R>(allowed: &[A], reserved: &[R]) -> Self
    where
        A: AsRef<str>,
        R: AsRef<str>,
    {
        let mut set = Self::new();

        for raw in allowed {
            let host = normalize(raw.as_ref());
            if host.is_empty() {
                continue;
            }

            set.insert(&host);
            if !host.starts_with("www.") {
                set.insert(format!("www.{host}"));
            }

            if let Some(parent) = parent_of(&host) {
                set.insert(&parent);
                if !parent.starts_with("www.") {
                    set.insert(format!("www.{parent}"));
                }
            }
        }

        for domain in reserved {
            set.insert(domain.as_ref());
        }

        set
    }

    /// Insert a domain, returning whether it was newly added.
    pub fn insert(&mut self, domain: impl Into<String>) -> bool {
        let domain = domain.into();
        if self.index.contains(&domain) {
            return false;
        }
        self.index.insert(domain.clone());
        self.entries.push(domain);
        true
    }

    /// Exact membership check
    pub fn contains(&self, domain: &str) -> bool {
        self.index.contains(domain)
    }

    /// Check whether a host is covered by the set: either an exact entry
    /// or a subdomain of one (walking up parent labels).
    pub fn covers(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        let mut current = host.as_str();
        loop {
            if self.index.contains(current) {
                return true;
            }
            match current.find('.') {
                Some(pos) => current = &current[pos + 1..],
                None => return false,
            }
        }
    }

    /// Number of domains in the set
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over domains in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Consume the set, yielding the domains in insertion order
    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}

/// Two-label parent of a subdomain, or `None` for apex entries.
///
/// `mkce.codetantra.com` -> `codetantra.com`; `github.com` -> `None`.
fn parent_of(host: &str) -> Option<String> {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() > 2 {
        Some(labels[labels.len() - 2..].join("."))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_RESERVED: &[&str] = &[];

    #[test]
    fn test_entry_and_www_variant() {
        let set = ExclusionSet::from_allowlist(&["github.com"], NO_RESERVED);
        assert!(set.contains("github.com"));
        assert!(set.contains("www.github.com"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_www_entry_not_doubled() {
        let set = ExclusionSet::from_allowlist(&["www.github.com"], NO_RESERVED);
        // Normalization strips the www prefix first
        assert!(set.contains("github.com"));
        assert!(set.contains("www.github.com"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_subdomain_contributes_parent() {
        let set = ExclusionSet::from_allowlist(&["mkce.codetantra.com"], NO_RESERVED);
        assert!(set.contains("mkce.codetantra.com"));
        assert!(set.contains("www.mkce.codetantra.com"));
        assert!(set.contains("codetantra.com"));
        assert!(set.contains("www.codetantra.com"));
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = ExclusionSet::from_allowlist(
            &["github.com", "https://github.com/", "www.github.com"],
            NO_RESERVED,
        );
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_reserved_appended() {
        let set = ExclusionSet::from_allowlist(&["github.com"], &["chrome.google.com"]);
        assert!(set.contains("chrome.google.com"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_reserved_not_duplicated() {
        let set = ExclusionSet::from_allowlist(&["chrome.google.com"], &["chrome.google.com"]);
        assert!(set.contains("chrome.google.com"));
        assert!(set.contains("www.chrome.google.com"));
        // Reserved entry already present via the allowlist; parent google.com
        // and www.google.com come from the subdomain heuristic
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_covers_subdomains() {
        let set = ExclusionSet::from_allowlist(&["wikipedia.org"], NO_RESERVED);
        assert!(set.covers("wikipedia.org"));
        assert!(set.covers("en.wikipedia.org"));
        assert!(set.covers("WWW.WIKIPEDIA.ORG"));
        assert!(!set.covers("notwikipedia.org"));
        assert!(!set.covers("example.com"));
    }

    #[test]
    fn test_empty_entries_skipped() {
        let set = ExclusionSet::from_allowlist(&["", "  ", "/"], NO_RESERVED);
        assert!(set.is_empty());
    }

    #[test]
    fn test_parent_of() {
        assert_eq!(parent_of("mkce.codetantra.com"), Some("codetantra.com".to_string()));
        assert_eq!(parent_of("github.com"), None);
        assert_eq!(parent_of("a.b.c.d"), Some("c.d".to_string()));
    }
}
