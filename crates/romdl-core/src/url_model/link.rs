//! Joining listing links onto base URLs.

use url::Url;

/// Resolves a (possibly relative) listing link against the source's base URL.
///
/// Returns `None` when the base is not an absolute URL or the join fails.
pub fn resolve_link(base: &str, link: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(link).ok().map(String::from)
}

/// Host component of a URL, used to partition the response cache.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}
