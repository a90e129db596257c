//! Domain string handling
//!
//! Best-effort normalization of user-entered domains and expansion of the
//! allowlist into the exclusion list handed to the rule engine.

mod exclusion;

pub use exclusion::ExclusionSet;

use tracing::debug;

/// Normalize a user-entered domain to a canonical host string.
///
/// Strips a leading `http://` or `https://` scheme, one leading `www.`
/// label and a single trailing `/`, then trims whitespace and lowercases.
/// Entries are accepted best-effort: anything that is still not a bare
/// domain after stripping passes through unchanged and is never rejected.
///
/// # Example
///
/// ```rust
/// use fgate_core::domain::normalize;
///
/// assert_eq!(normalize("https://www.Wikipedia.org/"), "wikipedia.org");
/// assert_eq!(normalize("github.com"), "github.com");
/// ```
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();

    let mut host = lowered.as_str();
    host = host
        .strip_prefix("http://")
        .or_else(|| host.strip_prefix("https://"))
        .unwrap_or(host);
    host = host.strip_prefix("www.").unwrap_or(host);
    host = host.strip_suffix('/').unwrap_or(host);

    if host.contains('/') || host.contains(char::is_whitespace) {
        debug!(entry = raw, "allowlist entry does not look like a bare domain");
    }

    host.to_string()
}

/// Extract the host portion of a URL-ish string for diagnostics.
///
/// Takes whatever sits between the scheme (if any) and the first `/`,
/// with any `:port` suffix removed. Like [`normalize`], this never fails.
pub fn host_of(url: &str) -> String {
    let trimmed = url.trim();
    let without_scheme = trimmed
        .split_once("://")
        .map_or(trimmed, |(_, rest)| rest);
    let authority = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(without_scheme);
    let host = authority.rsplit_once(':').map_or(authority, |(h, port)| {
        // Only treat the suffix as a port when it is numeric
        if port.chars().all(|c| c.is_ascii_digit()) {
            h
        } else {
            authority
        }
    });
    host.to_lowercase()
}
