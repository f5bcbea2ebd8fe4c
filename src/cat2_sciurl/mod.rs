//! Category 2: links to scientific domains.
//!
//! Each URL of a post is reduced to its host name and compared with three
//! domain lists: scholarly repositories, science magazines, and news
//! outlets. News outlets only count for URLs under a `/science` path.

pub mod domain;

pub use domain::{ERROR_DOMAIN, domains_of, url_to_domain};

use crate::terms::{DomainLists, TermList};
use crate::types::{Cat2Outcome, Post};

/// Separator between matched domains in an output cell.
pub const MATCH_SEPARATOR: &str = "; ";

/// Path fragment required for news outlet matches.
pub const SCIENCE_PATH: &str = "/science";

/// Matches host names against a domain list.
///
/// A host matches a listed domain when it equals it or is one of its
/// subdomains (`data.nature.com` matches `nature.com`).
#[derive(Debug, Clone, Default)]
pub struct DomainMatcher {
    domains: Vec<String>,
}

impl DomainMatcher {
    /// Create a matcher over `domains`.
    #[must_use]
    pub fn new(domains: &TermList) -> Self {
        Self {
            domains: domains.as_slice().to_vec(),
        }
    }

    /// Number of listed domains that `host` falls under.
    fn hits(&self, host: &str) -> usize {
        self.domains
            .iter()
            .filter(|listed| {
                host == listed.as_str()
                    || host
                        .strip_suffix(listed.as_str())
                        .is_some_and(|rest| rest.ends_with('.'))
            })
            .count()
    }

    /// Matched hosts joined with [`MATCH_SEPARATOR`].
    ///
    /// A host is repeated once per listed domain it falls under.
    #[must_use]
    pub fn annotate<S: AsRef<str>>(&self, hosts: &[S]) -> String {
        self.collect(hosts.iter().map(AsRef::as_ref))
    }

    /// Like [`DomainMatcher::annotate`], restricted to hosts whose URL
    /// contains [`SCIENCE_PATH`].
    #[must_use]
    pub fn annotate_science_section<S: AsRef<str>, U: AsRef<str>>(
        &self,
        hosts: &[S],
        urls: &[U],
    ) -> String {
        self.collect(
            hosts
                .iter()
                .zip(urls)
                .filter(|(_, url)| url.as_ref().contains(SCIENCE_PATH))
                .map(|(host, _)| host.as_ref()),
        )
    }

    fn collect<'a>(&self, hosts: impl Iterator<Item = &'a str>) -> String {
        let mut matches: Vec<&str> = Vec::new();
        for host in hosts {
            matches.extend(std::iter::repeat_n(host, self.hits(host)));
        }
        matches.join(MATCH_SEPARATOR)
    }
}

/// The category 2 heuristics.
#[derive(Debug, Clone, Default)]
pub struct Cat2Heuristics {
    repositories: DomainMatcher,
    magazines: DomainMatcher,
    news_outlets: DomainMatcher,
}

impl Cat2Heuristics {
    /// Create the heuristics from loaded domain lists.
    #[must_use]
    pub fn new(lists: &DomainLists) -> Self {
        Self {
            repositories: DomainMatcher::new(&lists.repositories),
            magazines: DomainMatcher::new(&lists.magazines),
            news_outlets: DomainMatcher::new(&lists.news_outlets),
        }
    }

    /// Evaluate one post. Posts without URLs match nothing.
    #[must_use]
    pub fn evaluate(&self, post: &Post) -> Cat2Outcome {
        let urls: Vec<&str> = post
            .urls
            .iter()
            .map(String::as_str)
            .filter(|u| !u.is_empty())
            .collect();
        if urls.is_empty() {
            return Cat2Outcome::default();
        }

        let hosts = domains_of(&urls);
        tracing::trace!(?hosts, "Extracted domains");

        Cat2Outcome {
            sci_subdomain: self.repositories.annotate(&hosts),
            sci_mag_domain: self.magazines.annotate(&hosts),
            sci_news_domain: self.news_outlets.annotate_science_section(&hosts, &urls),
        }
    }
}
