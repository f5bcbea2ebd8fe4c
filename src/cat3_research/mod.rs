//! Category 3: research context.
//!
//! Looks for research vocabulary used as a noun: general science and
//! research words, scientist roles, publication types, and multi-word
//! research methods. Keyword hits are confirmed against the part-of-speech
//! tags of the whole post, which is annotated at most once.

pub mod keyword;


use std::sync::Arc;

pub use keyword::{contains_padded, find_delimited};

use crate::annotator::{CoarsePos, SentenceAnnotation, SentenceAnnotator};
use crate::error::AnnotationError;
use crate::terms::{ResearchLists, TermList};
use crate::types::Cat3Outcome;

/// Lazily computed annotation of one post.
struct PostTags<'a> {
    text: &'a str,
    annotator: &'a dyn SentenceAnnotator,
    annotation: Option<SentenceAnnotation>,
}

impl<'a> PostTags<'a> {
    fn new(text: &'a str, annotator: &'a dyn SentenceAnnotator) -> Self {
        Self {
            text,
            annotator,
            annotation: None,
        }
    }

    /// Whether `word` occurs as a noun or proper noun.
    fn is_nominal(&mut self, word: &str) -> Result<bool, AnnotationError> {
        let annotation = match self.annotation.take() {
            Some(annotation) => annotation,
            None => self.annotator.annotate_text(self.text)?,
        };
        let found = annotation
            .tokens
            .iter()
            .any(|t| matches!(t.pos, CoarsePos::Noun | CoarsePos::Propn) && t.lower == word);
        self.annotation = Some(annotation);
        Ok(found)
    }
}

/// The category 3 heuristics bound to their lists and an annotator.
pub struct Cat3Heuristics {
    lists: ResearchLists,
    annotator: Arc<dyn SentenceAnnotator>,
}

impl Cat3Heuristics {
    /// Create the heuristics.
    #[must_use]
    pub fn new(lists: &ResearchLists, annotator: Arc<dyn SentenceAnnotator>) -> Self {
        Self {
            lists: lists.clone(),
            annotator,
        }
    }

    /// Evaluate one post.
    ///
    /// # Errors
    ///
    /// Returns an error if the post has a keyword hit and annotation fails.
    pub fn evaluate(&self, text: &str) -> Result<Cat3Outcome, AnnotationError> {
        let lowered = text.to_lowercase();
        let mut tags = PostTags::new(&lowered, self.annotator.as_ref());

        Ok(Cat3Outcome {
            science_research_in_general: first_nominal(
                &self.lists.science_research_in_general,
                &lowered,
                &mut tags,
            )?,
            scientist: first_nominal(&self.lists.scientists, &lowered, &mut tags)?,
            publications: first_nominal(&self.lists.publications, &lowered, &mut tags)?,
            research_method: self.mentions_research_method(&lowered),
        })
    }

    /// First multi-word research method occurring between spaces in the
    /// lowercased `text`, or empty.
    #[must_use]
    pub fn mentions_research_method(&self, text: &str) -> String {
        self.lists
            .research_methods
            .iter()
            .filter(|term| term.contains(' '))
            .find(|term| contains_padded(text, term))
            .map(str::to_string)
            .unwrap_or_default()
    }
}

/// First term of `list` that occurs whitespace-delimited in `text` and whose
/// first word is tagged as a noun somewhere in the post.
fn first_nominal(
    list: &TermList,
    text: &str,
    tags: &mut PostTags<'_>,
) -> Result<String, AnnotationError> {
    for term in list.iter() {
        if !find_delimited(text, term) {
            continue;
        }
        let head = term.split(' ').next().unwrap_or(term);
        if tags.is_nominal(head)? {
            return Ok(term.to_string());
        }
    }
    Ok(String::new())
}
