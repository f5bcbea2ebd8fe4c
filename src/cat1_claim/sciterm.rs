//! Scientific-term detection.

use std::collections::HashSet;

use crate::annotator::word_tokenize;
use crate::terms::TermList;
use crate::types::ScienceTermMatch;

/// Finds scientific terms among the word tokens of a post.
///
/// Matching is exact token equality: no case folding, no stemming, and a
/// term containing whitespace can never equal a single token.
#[derive(Debug, Clone, Default)]
pub struct ScienceTermDetector {
    terms: Vec<String>,
}

impl ScienceTermDetector {
    /// Create a detector; terms are reported in the order of `terms`.
    #[must_use]
    pub fn new(terms: &TermList) -> Self {
        Self {
            terms: terms.as_slice().to_vec(),
        }
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the detector has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Return every term equal to some token of `text`, tokenized with
    /// [`word_tokenize`].
    #[must_use]
    pub fn detect(&self, text: &str) -> ScienceTermMatch {
        self.detect_tokens(&word_tokenize(text))
    }

    /// Return every term equal to one of `tokens`.
    #[must_use]
    pub fn detect_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> ScienceTermMatch {
        let tokens: HashSet<&str> = tokens.iter().map(AsRef::as_ref).collect();
        let terms = self
            .terms
            .iter()
            .filter(|term| tokens.contains(term.as_str()))
            .cloned()
            .collect();
        ScienceTermMatch { terms }
    }
}
