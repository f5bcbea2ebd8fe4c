//! URL to domain extraction.

use url::{Host, Url};

/// Placeholder written for URLs whose domain cannot be extracted.
pub const ERROR_DOMAIN: &str = "error";

/// Extract the full host name (subdomains included) of `url`.
///
/// The scheme is optional. Returns `None` for unparsable URLs, IP hosts,
/// single-label hosts such as `localhost`, and hosts whose last label does
/// not look like a public suffix.
#[must_use]
pub fn url_to_domain(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    let parsed = if url.contains("://") {
        Url::parse(url)
    } else {
        Url::parse(&format!("http://{url}"))
    }
    .ok()?;

    let Some(Host::Domain(host)) = parsed.host() else {
        return None;
    };
    let host = host.trim_end_matches('.').to_lowercase();

    let mut labels = host.rsplit('.');
    let suffix = labels.next()?;
    let registrable = labels.next()?;
    if registrable.is_empty() || !is_suffix_label(suffix) {
        return None;
    }
    Some(host)
}

/// Domains of every non-empty URL, with [`ERROR_DOMAIN`] for failures.
#[must_use]
pub fn domains_of<S: AsRef<str>>(urls: &[S]) -> Vec<String> {
    urls.iter()
        .map(AsRef::as_ref)
        .filter(|u| !u.is_empty())
        .map(|u| url_to_domain(u).unwrap_or_else(|| ERROR_DOMAIN.to_string()))
        .collect()
}

fn is_suffix_label(label: &str) -> bool {
    label.starts_with("xn--")
        || (label.len() >= 2 && label.chars().all(|c| c.is_ascii_alphabetic()))
}
