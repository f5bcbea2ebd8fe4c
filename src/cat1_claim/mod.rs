//! Category 1: scientific claims.
//!
//! A post belongs to category 1 when it both states a claim and uses
//! scientific vocabulary:
//! - `PredicateMatcher` finds the first listed argumentative predicate
//! - `ClaimClassifier` checks the part-of-speech pattern around it
//! - `ScienceTermDetector` looks for scientific terms among the raw tokens

pub mod classifier;
pub mod predicate;
pub mod sciterm;


use std::sync::Arc;

pub use classifier::ClaimClassifier;
pub use predicate::PredicateMatcher;
pub use sciterm::ScienceTermDetector;

use crate::annotator::SentenceAnnotator;
use crate::config::ClaimConfig;
use crate::error::AnnotationError;
use crate::terms::ClaimLists;
use crate::types::{Cat1Outcome, ClaimResult, ScienceTermMatch};

/// The category 1 heuristics bound to their lists and an annotator.
pub struct Cat1Heuristics {
    matcher: PredicateMatcher,
    classifier: ClaimClassifier,
    sciterms: ScienceTermDetector,
    annotator: Arc<dyn SentenceAnnotator>,
}

impl Cat1Heuristics {
    /// Create the heuristics.
    #[must_use]
    pub fn new(
        lists: &ClaimLists,
        config: ClaimConfig,
        annotator: Arc<dyn SentenceAnnotator>,
    ) -> Self {
        Self {
            matcher: PredicateMatcher::new(&lists.predicates),
            classifier: ClaimClassifier::new(config),
            sciterms: ScienceTermDetector::new(&lists.scientific_terms),
            annotator,
        }
    }

    /// Find the first claim sentence of a post.
    ///
    /// The post is lowercased and the predicate is chosen once for the whole
    /// post. Each sentence that still contains it is annotated and
    /// classified; the first accepted sentence wins.
    ///
    /// # Errors
    ///
    /// Returns an error if annotation fails or the predicate cannot be
    /// located among a sentence's tokens.
    pub fn is_claim(&self, text: &str) -> Result<ClaimResult, AnnotationError> {
        let lowered = text.to_lowercase();
        let Some(predicate) = self.matcher.find_predicate(&lowered) else {
            return Ok(ClaimResult::none());
        };

        let padded = format!(" {predicate} ");
        for sentence in self.annotator.segment(&lowered) {
            let present = if self.classifier.config().strict_space_recheck {
                sentence.contains(&padded)
            } else {
                PredicateMatcher::contains_phrase(&sentence, predicate)
            };
            if !present {
                continue;
            }

            let annotation = self.annotator.annotate_aligned(&sentence)?;
            let result = self.classifier.classify(&sentence, predicate, &annotation)?;
            if result.is_claim {
                return Ok(result);
            }
        }

        Ok(ClaimResult::none())
    }

    /// Find scientific terms in the raw (not lowercased) text of a post,
    /// tokenized by the annotator.
    #[must_use]
    pub fn contains_scientific_term(&self, text: &str) -> ScienceTermMatch {
        self.sciterms.detect_tokens(&self.annotator.tokenize(text))
    }

    /// Run both heuristics on one post.
    ///
    /// # Errors
    ///
    /// Returns an error if the claim heuristic fails.
    pub fn evaluate(&self, text: &str) -> Result<Cat1Outcome, AnnotationError> {
        Ok(Cat1Outcome {
            claim: self.is_claim(text)?,
            sciterms: self.contains_scientific_term(text),
        })
    }

    /// Name of the underlying annotator.
    #[must_use]
    pub fn annotator_name(&self) -> &'static str {
        self.annotator.name()
    }
}
