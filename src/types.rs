//! Core data structures for `sciref`.

use serde::{Deserialize, Serialize};

/// A single social-media record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Raw post body.
    pub text: String,
    /// URLs embedded in the post, in posting order.
    pub urls: Vec<String>,
}

impl Post {
    /// Create a new post with the given text and no URLs.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            urls: Vec::new(),
        }
    }

    /// Set the embedded URLs.
    #[must_use]
    pub fn with_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.urls = urls.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the post carries at least one non-empty URL.
    #[must_use]
    pub fn has_url(&self) -> bool {
        self.urls.iter().any(|u| !u.is_empty())
    }
}

/// Surface form of an accepted claim sentence.
///
/// Recorded for inspection only; every form is accepted alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentenceForm {
    /// No question mark.
    #[default]
    Statement,
    /// Question mark together with "how", "when" or "why".
    WhQuestion,
    /// Any other sentence with a question mark.
    Question,
}

impl SentenceForm {
    /// Classify a lowercased sentence.
    #[must_use]
    pub fn of(sentence: &str) -> Self {
        if !sentence.contains('?') {
            Self::Statement
        } else if sentence.contains(" how ")
            || sentence.contains("when ")
            || sentence.contains("why ")
        {
            Self::WhQuestion
        } else {
            Self::Question
        }
    }
}

/// Outcome of the claim heuristic for one post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimResult {
    /// Whether a claim sentence was found.
    pub is_claim: bool,
    /// The first sentence accepted as a claim, or empty.
    pub sentence: String,
    /// The predicate that anchored the claim.
    pub predicate: Option<String>,
    /// Surface form of the accepted sentence.
    pub form: SentenceForm,
}

impl ClaimResult {
    /// A result with no claim.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A result accepting `sentence` as a claim anchored at `predicate`.
    #[must_use]
    pub fn found(sentence: impl Into<String>, predicate: impl Into<String>) -> Self {
        let sentence = sentence.into();
        let form = SentenceForm::of(&sentence);
        Self {
            is_claim: true,
            sentence,
            predicate: Some(predicate.into()),
            form,
        }
    }

    /// The `(found, sentence)` pair.
    #[must_use]
    pub fn as_pair(&self) -> (bool, &str) {
        (self.is_claim, &self.sentence)
    }
}

/// Scientific terms found in one post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScienceTermMatch {
    /// Matched terms, in term-list order.
    pub terms: Vec<String>,
}

impl ScienceTermMatch {
    /// Whether any term matched.
    #[must_use]
    pub fn found(&self) -> bool {
        !self.terms.is_empty()
    }
}

/// Category 1 outcome: claim form plus scientific vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat1Outcome {
    /// Claim heuristic outcome.
    pub claim: ClaimResult,
    /// Scientific term outcome.
    pub sciterms: ScienceTermMatch,
}

impl Cat1Outcome {
    /// `is_claim AND has_sciterm`.
    #[must_use]
    pub fn is_cat1(&self) -> bool {
        self.claim.is_claim && self.sciterms.found()
    }
}

/// Category 2 outcome: links to scientific domains.
///
/// Each field holds the matched domains joined with `"; "`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat2Outcome {
    /// Matches against scholarly repository domains.
    pub sci_subdomain: String,
    /// Matches against science magazine domains.
    pub sci_mag_domain: String,
    /// Matches against news outlets, restricted to `/science` URLs.
    pub sci_news_domain: String,
}

impl Cat2Outcome {
    /// Whether any of the three lists matched.
    #[must_use]
    pub fn is_cat2(&self) -> bool {
        !self.sci_subdomain.is_empty()
            || !self.sci_mag_domain.is_empty()
            || !self.sci_news_domain.is_empty()
    }
}

/// Category 3 outcome: research vocabulary in nominal use.
///
/// Each field holds the matched keyword, or is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat3Outcome {
    /// General science/research keyword.
    pub science_research_in_general: String,
    /// Scientist keyword.
    pub scientist: String,
    /// Publication keyword.
    pub publications: String,
    /// Multi-word research method.
    pub research_method: String,
}

impl Cat3Outcome {
    /// Whether any of the four heuristics matched.
    #[must_use]
    pub fn is_cat3(&self) -> bool {
        !self.science_research_in_general.is_empty()
            || !self.scientist.is_empty()
            || !self.publications.is_empty()
            || !self.research_method.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_has_url() {
        assert!(!Post::new("hello").has_url());
        assert!(!Post::new("hello").with_urls([""]).has_url());
        assert!(Post::new("hello").with_urls(["https://doi.org/1"]).has_url());
    }

    #[test]
    fn test_sentence_form() {
        assert_eq!(SentenceForm::of("studies show this."), SentenceForm::Statement);
        assert_eq!(
            SentenceForm::of("so why does data show this?"),
            SentenceForm::WhQuestion
        );
        assert_eq!(SentenceForm::of("data shows this?"), SentenceForm::Question);
    }

    #[test]
    fn test_claim_result_pair() {
        let found = ClaimResult::found("studies show effects", "show");
        assert_eq!(found.as_pair(), (true, "studies show effects"));
        assert_eq!(found.predicate.as_deref(), Some("show"));
        assert_eq!(ClaimResult::none().as_pair(), (false, ""));
    }

    #[test]
    fn test_cat1_conjunction() {
        let mut outcome = Cat1Outcome {
            claim: ClaimResult::found("studies show effects", "show"),
            sciterms: ScienceTermMatch::default(),
        };
        assert!(!outcome.is_cat1());

        outcome.sciterms.terms.push("vaccine".to_string());
        assert!(outcome.is_cat1());

        outcome.claim = ClaimResult::none();
        assert!(!outcome.is_cat1());
    }

    #[test]
    fn test_cat2_and_cat3_flags() {
        assert!(!Cat2Outcome::default().is_cat2());
        let cat2 = Cat2Outcome {
            sci_news_domain: "www.bbc.co.uk".to_string(),
            ..Default::default()
        };
        assert!(cat2.is_cat2());

        assert!(!Cat3Outcome::default().is_cat3());
        let cat3 = Cat3Outcome {
            scientist: "researcher".to_string(),
            ..Default::default()
        };
        assert!(cat3.is_cat3());
    }
}
