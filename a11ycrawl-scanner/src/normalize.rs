use serde::{Deserialize, Serialize};
use url::Url;

/// Resolve a possibly-relative `href` against the page it was found on.
///
/// Returns `None` when either side cannot be parsed. The result is not
/// otherwise normalized: fragments and query strings are kept.
pub fn resolve(base: &str, href: &str) -> Option<String> {
    let base_url = Url::parse(base).ok()?;
    let resolved = base_url.join(href).ok()?;
    Some(resolved.to_string())
}

/// Decides whether a discovered link belongs to the site being crawled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopePolicy {
    /// Literal, case-sensitive string prefix match against the seed URL.
    /// `https://example.com.evil.net/` passes for a seed of
    /// `https://example.com`.
    #[default]
    Prefix,
    /// Parsed host must equal the seed's host (scheme and port ignored).
    #[serde(alias = "same-host")]
    Host,
}

impl ScopePolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "prefix" => Some(ScopePolicy::Prefix),
            "host" | "same-host" => Some(ScopePolicy::Host),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScopePolicy::Prefix => "prefix",
            ScopePolicy::Host => "host",
        }
    }

    pub fn in_scope(&self, url: &str, base_url: &str) -> bool {
        match self {
            ScopePolicy::Prefix => url.starts_with(base_url),
            ScopePolicy::Host => same_host(url, base_url),
        }
    }
}

fn same_host(url: &str, base_url: &str) -> bool {
    let (Ok(candidate), Ok(base)) = (Url::parse(url), Url::parse(base_url)) else {
        return false;
    };
    match (candidate.host_str(), base.host_str()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}
