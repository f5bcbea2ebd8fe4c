//! Configuration management for `sciref`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Whether the classifier re-checks that `" " + predicate + " "` occurs in the
/// sentence before locating the predicate token.
///
/// This drops sentences where the predicate is sentence-initial, sentence-final
/// or touches punctuation, even though the predicate matcher accepted them.
pub const STRICT_SPACE_RECHECK: bool = true;

/// Whether the after-span noun/adjective requirement is skipped.
///
/// The labelled reference data was produced with a condition that always
/// evaluated to true, so only the pronoun and person exclusions apply after
/// the predicate.
pub const AFTER_SPAN_POS_CHECK_DISABLED: bool = true;

/// Global configuration for `sciref`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SciRefConfig {
    /// Term list locations.
    pub lists: ListsConfig,
    /// Claim classifier switches.
    pub claim: ClaimConfig,
    /// Batch driver configuration.
    pub batch: BatchConfig,
}

/// Locations of the static term lists.
///
/// Every file name is resolved relative to `dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListsConfig {
    /// Directory holding all list files.
    pub dir: PathBuf,
    /// Argumentative predicates, in priority order.
    pub predicates: String,
    /// Scientific terms harvested from Wikipedia glossaries.
    pub wiki_sci_terms: String,
    /// Research methods vocabulary.
    pub sc_methods: String,
    /// Text-speak words removed from the scientific terms.
    pub text_speak_words: String,
    /// Frequent false positives removed from the scientific terms.
    pub false_scientific_words: String,
    /// Methods ignored by the research-method heuristic.
    pub exclude_methods: String,
    /// Keywords naming scientists.
    pub scientists_kws: String,
    /// Keywords naming science or research in general.
    pub science_research_in_general_kws: String,
    /// Keywords naming publications.
    pub publications_kws: String,
    /// Scholarly repository domains (CSV with a `domain` column).
    pub repo_subdomains: String,
    /// Science magazine domains (CSV with a `domain` column).
    pub science_mags_domains: String,
    /// News outlet domains (CSV with a `domain` column).
    pub news_outlets_domains: String,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("lists"),
            predicates: "predicates.txt".to_string(),
            wiki_sci_terms: "wiki_sci_terms.txt".to_string(),
            sc_methods: "sc_methods.txt".to_string(),
            text_speak_words: "text_speak_words.txt".to_string(),
            false_scientific_words: "false_scientific_words.txt".to_string(),
            exclude_methods: "exclude_methods.txt".to_string(),
            scientists_kws: "scientists_kws.txt".to_string(),
            science_research_in_general_kws: "science_research_in_general_kws.txt".to_string(),
            publications_kws: "publications_kws.txt".to_string(),
            repo_subdomains: "repo_subdomains.csv".to_string(),
            science_mags_domains: "science_mags_domains.csv".to_string(),
            news_outlets_domains: "news_outlets_domains.csv".to_string(),
        }
    }
}

impl ListsConfig {
    /// Create a list configuration rooted at `dir` with default file names.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Resolve a list file name against the list directory.
    #[must_use]
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

/// Switches for the claim-pattern classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimConfig {
    /// Re-check `" " + predicate + " "` in each sentence.
    pub strict_space_recheck: bool,
    /// Require a NOUN or ADJ token after the predicate.
    pub check_after_span_pos: bool,
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            strict_space_recheck: STRICT_SPACE_RECHECK,
            check_after_span_pos: !AFTER_SPAN_POS_CHECK_DISABLED,
        }
    }
}

/// What to do with an input row that cannot be turned into a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedRowPolicy {
    /// Log the row and leave it out of the output.
    #[default]
    Skip,
    /// Abort the batch.
    Fail,
}

/// Configuration for the batch annotation driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Column holding the post body.
    pub text_column: String,
    /// Column holding the embedded URLs as a list literal.
    pub urls_column: String,
    /// Handling of rows without a usable text field.
    pub malformed_rows: MalformedRowPolicy,
    /// Shard posts across worker threads.
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            text_column: "text".to_string(),
            urls_column: "urls".to_string(),
            malformed_rows: MalformedRowPolicy::Skip,
            parallel: false,
        }
    }
}

impl SciRefConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn to_file(&self, path: impl AsRef<Path>) -> crate::error::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Serialize configuration to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::error::Result<String> {
        let content = serde_json::to_string_pretty(self)?;
        Ok(content)
    }

    /// Set list configuration.
    #[must_use]
    pub fn with_lists(mut self, lists: ListsConfig) -> Self {
        self.lists = lists;
        self
    }

    /// Set claim classifier configuration.
    #[must_use]
    pub fn with_claim(mut self, claim: ClaimConfig) -> Self {
        self.claim = claim;
        self
    }

    /// Set batch configuration.
    #[must_use]
    pub fn with_batch(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    /// Check values that serde cannot check.
    ///
    /// # Errors
    ///
    /// Returns `SciRefError::Config` when a column name is empty.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.batch.text_column.trim().is_empty() {
            return Err(crate::error::SciRefError::Config(
                "batch.text_column must not be empty".to_string(),
            ));
        }
        if self.batch.urls_column.trim().is_empty() {
            return Err(crate::error::SciRefError::Config(
                "batch.urls_column must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
