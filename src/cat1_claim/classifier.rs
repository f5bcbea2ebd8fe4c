//! The claim-pattern classifier.
//!
//! A sentence is a claim when the predicate sits between a nominal subject
//! side and an object side, and neither side mentions a pronoun or a person:
//!
//! ```text
//! NOUN ... PREDICATE ... (NOUN | ADJ)
//! ```

use crate::annotator::{
    CoarsePos, PERSON, PERSONAL_PRONOUN, POSSESSIVE_PRONOUN, SentenceAnnotation, TokenSpan,
    word_tokenize,
};
use crate::config::ClaimConfig;
use crate::error::AnnotationError;
use crate::types::ClaimResult;

/// Accepts or rejects one annotated sentence around a located predicate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimClassifier {
    config: ClaimConfig,
}

impl ClaimClassifier {
    /// Create a classifier.
    #[must_use]
    pub fn new(config: ClaimConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> ClaimConfig {
        self.config
    }

    /// Classify `sentence` around `predicate`.
    ///
    /// Only the first word of a multi-word predicate is located, at its
    /// first occurrence among the tokens.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::PredicateNotFound` if the predicate's first
    /// word is not among the annotated tokens.
    pub fn classify(
        &self,
        sentence: &str,
        predicate: &str,
        annotation: &SentenceAnnotation,
    ) -> Result<ClaimResult, AnnotationError> {
        let first_word = word_tokenize(predicate)
            .into_iter()
            .next()
            .map(|w| w.to_lowercase())
            .unwrap_or_default();

        let index = annotation
            .position(&first_word)
            .ok_or_else(|| AnnotationError::PredicateNotFound {
                predicate: predicate.to_string(),
                sentence: sentence.to_string(),
            })?;

        let before = annotation.before(index);
        let after = annotation.after(index);

        if self.accepts_before(before) && self.accepts_after(after) {
            tracing::debug!(predicate, index, "Accepted claim sentence");
            Ok(ClaimResult::found(sentence, predicate))
        } else {
            Ok(ClaimResult::none())
        }
    }

    /// The subject side must hold a noun and no pronoun or person.
    #[must_use]
    pub fn accepts_before(&self, span: TokenSpan<'_>) -> bool {
        span.has_pos(CoarsePos::Noun) && !mentions_persons(span)
    }

    /// The object side must hold no pronoun or person.
    ///
    /// The noun-or-adjective requirement only applies when
    /// `check_after_span_pos` is set.
    #[must_use]
    pub fn accepts_after(&self, span: TokenSpan<'_>) -> bool {
        if mentions_persons(span) {
            return false;
        }
        !self.config.check_after_span_pos
            || span.has_pos(CoarsePos::Noun)
            || span.has_pos(CoarsePos::Adj)
    }
}

fn mentions_persons(span: TokenSpan<'_>) -> bool {
    span.has_tag(PERSONAL_PRONOUN) || span.has_tag(POSSESSIVE_PRONOUN) || span.has_entity(PERSON)
}
