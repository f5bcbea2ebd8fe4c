//! Loading and filtering of term lists.

use std::collections::HashSet;
use std::path::Path;

use crate::config::ListsConfig;
use crate::error::TermListError;

/// Column read from the domain CSV files.
pub const DOMAIN_COLUMN: &str = "domain";

/// An ordered list of lowercase terms.
///
/// Order is significant (predicates are tried in file order) and duplicates
/// are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermList {
    name: String,
    terms: Vec<String>,
}

impl TermList {
    /// Build a list from raw entries.
    ///
    /// Entries are trimmed and lowercased; blank entries are dropped.
    #[must_use]
    pub fn from_terms<I, S>(name: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .filter_map(|t| {
                let t = t.as_ref().trim();
                (!t.is_empty()).then(|| t.to_lowercase())
            })
            .collect();
        Self {
            name: name.into(),
            terms,
        }
    }

    /// Load a one-term-per-line file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TermListError> {
        let path = path.as_ref();
        let content = read_list_file(path)?;
        let list = Self::from_terms(list_name(path), content.lines());
        tracing::debug!(list = %list.name, terms = list.len(), "Loaded term list");
        Ok(list)
    }

    /// Load the `domain` column of a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, not valid CSV,
    /// or has no `domain` column.
    pub fn load_domain_csv(path: impl AsRef<Path>) -> Result<Self, TermListError> {
        let path = path.as_ref();
        let content = read_list_file(path)?;
        let csv_err = |source| TermListError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let column = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .position(|h| h.trim() == DOMAIN_COLUMN)
            .ok_or_else(|| TermListError::MissingColumn {
                path: path.to_path_buf(),
                column: DOMAIN_COLUMN.to_string(),
            })?;

        let mut domains = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            if let Some(domain) = record.get(column) {
                domains.push(domain.to_string());
            }
        }

        let list = Self::from_terms(list_name(path), domains);
        tracing::debug!(list = %list.name, domains = list.len(), "Loaded domain list");
        Ok(list)
    }

    /// Name of the list (the file stem when loaded from disk).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remove every term that appears in any of `exclusions`, keeping order.
    #[must_use]
    pub fn subtract(&self, exclusions: &[&TermList]) -> Self {
        let excluded: HashSet<&str> = exclusions
            .iter()
            .flat_map(|list| list.iter())
            .collect();
        let terms: Vec<String> = self
            .terms
            .iter()
            .filter(|t| !excluded.contains(t.as_str()))
            .cloned()
            .collect();

        tracing::debug!(
            list = %self.name,
            removed = self.terms.len() - terms.len(),
            "Filtered term list"
        );

        Self {
            name: self.name.clone(),
            terms,
        }
    }

    /// Concatenate two lists.
    #[must_use]
    pub fn concat(&self, other: &TermList, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            terms: self.terms.iter().chain(&other.terms).cloned().collect(),
        }
    }

    /// Sort the terms lexically.
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.terms.sort();
        self
    }

    /// Whether `term` is in the list.
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    /// Iterate over the terms in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// The terms as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn read_list_file(path: &Path) -> Result<String, TermListError> {
    if !path.exists() {
        return Err(TermListError::NotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| TermListError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn list_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Lists used by the claim and scientific-term heuristics.
#[derive(Debug, Clone, Default)]
pub struct ClaimLists {
    /// Argumentative predicates, in priority order.
    pub predicates: TermList,
    /// Scientific vocabulary after noise filtering, sorted.
    pub scientific_terms: TermList,
}

impl ClaimLists {
    /// Load the category 1 lists.
    ///
    /// Scientific terms are the Wikipedia terms plus the methods vocabulary,
    /// minus text-speak words and known false positives, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if any list file is missing or unreadable.
    pub fn load(lists: &ListsConfig) -> Result<Self, TermListError> {
        let predicates = TermList::load(lists.path(&lists.predicates))?;
        let wiki = TermList::load(lists.path(&lists.wiki_sci_terms))?;
        let methods = TermList::load(lists.path(&lists.sc_methods))?;
        let text_speak = TermList::load(lists.path(&lists.text_speak_words))?;
        let false_positives = TermList::load(lists.path(&lists.false_scientific_words))?;

        let scientific_terms = wiki
            .concat(&methods, "scientific_terms")
            .subtract(&[&text_speak, &false_positives])
            .sorted();

        tracing::info!(
            predicates = predicates.len(),
            scientific_terms = scientific_terms.len(),
            "Loaded claim lists"
        );

        Ok(Self {
            predicates,
            scientific_terms,
        })
    }
}

/// Domain lists used by the science URL heuristics.
#[derive(Debug, Clone, Default)]
pub struct DomainLists {
    /// Scholarly repositories and publishers.
    pub repositories: TermList,
    /// Science magazines.
    pub magazines: TermList,
    /// General news outlets (matched only on `/science` URLs).
    pub news_outlets: TermList,
}

impl DomainLists {
    /// Load the category 2 domain CSVs.
    ///
    /// # Errors
    ///
    /// Returns an error if any CSV is missing, unreadable or lacks a
    /// `domain` column.
    pub fn load(lists: &ListsConfig) -> Result<Self, TermListError> {
        let repositories = TermList::load_domain_csv(lists.path(&lists.repo_subdomains))?;
        let magazines = TermList::load_domain_csv(lists.path(&lists.science_mags_domains))?;
        let news_outlets = TermList::load_domain_csv(lists.path(&lists.news_outlets_domains))?;

        tracing::info!(
            repositories = repositories.len(),
            magazines = magazines.len(),
            news_outlets = news_outlets.len(),
            "Loaded domain lists"
        );

        Ok(Self {
            repositories,
            magazines,
            news_outlets,
        })
    }
}

/// Keyword lists used by the research-context heuristics.
#[derive(Debug, Clone, Default)]
pub struct ResearchLists {
    /// Research methods minus the excluded ones, in file order.
    pub research_methods: TermList,
    /// Words naming scientists.
    pub scientists: TermList,
    /// Words naming science or research in general.
    pub science_research_in_general: TermList,
    /// Words naming publications.
    pub publications: TermList,
}

impl ResearchLists {
    /// Load the category 3 lists.
    ///
    /// # Errors
    ///
    /// Returns an error if any list file is missing or unreadable.
    pub fn load(lists: &ListsConfig) -> Result<Self, TermListError> {
        let methods = TermList::load(lists.path(&lists.sc_methods))?;
        let excluded = TermList::load(lists.path(&lists.exclude_methods))?;
        let research_methods = methods.subtract(&[&excluded]);

        let scientists = TermList::load(lists.path(&lists.scientists_kws))?;
        let science_research_in_general =
            TermList::load(lists.path(&lists.science_research_in_general_kws))?;
        let publications = TermList::load(lists.path(&lists.publications_kws))?;

        tracing::info!(
            research_methods = research_methods.len(),
            scientists = scientists.len(),
            science_research_in_general = science_research_in_general.len(),
            publications = publications.len(),
            "Loaded research lists"
        );

        Ok(Self {
            research_methods,
            scientists,
            science_research_in_general,
            publications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn write_claim_lists(dir: &Path) {
        write(dir, "predicates.txt", "show\nsuggest\n\n  indicate  \n");
        write(dir, "wiki_sci_terms.txt", "Vaccine\nlol\ngenome\nsupport\n");
        write(dir, "sc_methods.txt", "survey\nsample size\n");
        write(dir, "text_speak_words.txt", "lol\nomg\n");
        write(dir, "false_scientific_words.txt", "support\nfans\n");
    }

    #[test]
    fn test_from_terms_normalizes() {
        let list = TermList::from_terms("t", [" Show ", "", "suggest", "   "]);
        assert_eq!(list.as_slice(), &["show".to_string(), "suggest".to_string()]);
    }

    #[test]
    fn test_subtract_keeps_order_and_duplicates() {
        let list = TermList::from_terms("t", ["b", "a", "c", "a"]);
        let exclude = TermList::from_terms("x", ["c"]);
        let filtered = list.subtract(&[&exclude]);
        let terms: Vec<&str> = filtered.iter().collect();
        assert_eq!(terms, vec!["b", "a", "a"]);
    }

    #[test]
    fn test_sorted() {
        let list = TermList::from_terms("t", ["gene", "atom", "cell"]).sorted();
        let terms: Vec<&str> = list.iter().collect();
        assert_eq!(terms, vec!["atom", "cell", "gene"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TermList::load(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, TermListError::NotFound(_)));
    }

    #[test]
    fn test_load_claim_lists() {
        let dir = tempfile::tempdir().unwrap();
        write_claim_lists(dir.path());

        let lists = ClaimLists::load(&ListsConfig::in_dir(dir.path())).unwrap();
        let predicates: Vec<&str> = lists.predicates.iter().collect();
        assert_eq!(predicates, vec!["show", "suggest", "indicate"]);

        let terms: Vec<&str> = lists.scientific_terms.iter().collect();
        assert_eq!(terms, vec!["genome", "sample size", "survey", "vaccine"]);
    }

    #[test]
    fn test_load_domain_csv() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "repo.csv",
            "name,domain\nNature,Nature.com\narXiv,arxiv.org\n",
        );
        let list = TermList::load_domain_csv(dir.path().join("repo.csv")).unwrap();
        assert_eq!(list.name(), "repo");
        assert!(list.contains("nature.com"));
        assert!(list.contains("arxiv.org"));
    }

    #[test]
    fn test_load_domain_csv_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "repo.csv", "name,host\nNature,nature.com\n");
        let err = TermList::load_domain_csv(dir.path().join("repo.csv")).unwrap_err();
        assert!(matches!(err, TermListError::MissingColumn { .. }));
    }

    #[test]
    fn test_load_research_lists() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "sc_methods.txt", "case study\nsample size\nsurvey\n");
        write(dir.path(), "exclude_methods.txt", "sample size\n");
        write(dir.path(), "scientists_kws.txt", "scientist\nresearcher\n");
        write(dir.path(), "science_research_in_general_kws.txt", "research\n");
        write(dir.path(), "publications_kws.txt", "studies\n");

        let lists = ResearchLists::load(&ListsConfig::in_dir(dir.path())).unwrap();
        let methods: Vec<&str> = lists.research_methods.iter().collect();
        assert_eq!(methods, vec!["case study", "survey"]);
        assert_eq!(lists.scientists.len(), 2);
    }

    #[test]
    fn test_shipped_lists_load() {
        let lists = ListsConfig::in_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("lists"));

        let claim = ClaimLists::load(&lists).unwrap();
        assert!(claim.scientific_terms.contains("genome"));
        assert!(!claim.scientific_terms.contains("lol"));
        assert!(!claim.scientific_terms.contains("support"));

        let domains = DomainLists::load(&lists).unwrap();
        assert!(domains.repositories.contains("arxiv.org"));

        let research = ResearchLists::load(&lists).unwrap();
        assert!(research.research_methods.contains("case study"));
        assert!(!research.research_methods.contains("sample size"));
    }
}
