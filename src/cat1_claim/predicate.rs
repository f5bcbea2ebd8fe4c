//! Argumentative predicate matching.
//!
//! Predicates are matched as whole token runs over the word tokenization,
//! so `show` matches `"studies show that"` but not `"showcase"` or
//! `"show-off"`.

use crate::annotator::{Token, boundary_spans, word_tokenize};
use crate::terms::TermList;

/// Minimum number of characters that must follow a predicate.
pub const MIN_TRAILING_CHARS: usize = 2;

#[derive(Debug, Clone)]
struct Predicate {
    phrase: String,
    tokens: Vec<String>,
}

/// Finds the first listed predicate that occurs in a sentence.
///
/// The list order is the tie-break: when several predicates occur, the one
/// listed first wins regardless of where it sits in the sentence.
#[derive(Debug, Clone, Default)]
pub struct PredicateMatcher {
    predicates: Vec<Predicate>,
}

impl PredicateMatcher {
    /// Create a matcher over `predicates`, keeping their order.
    #[must_use]
    pub fn new(predicates: &TermList) -> Self {
        Self::from_phrases(predicates.iter())
    }

    /// Create a matcher from raw phrases, keeping their order.
    #[must_use]
    pub fn from_phrases<'a>(phrases: impl IntoIterator<Item = &'a str>) -> Self {
        let predicates = phrases
            .into_iter()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                let phrase = p.to_lowercase();
                let tokens = word_tokenize(&phrase);
                Predicate { phrase, tokens }
            })
            .filter(|p| !p.tokens.is_empty())
            .collect();
        Self { predicates }
    }

    /// Number of predicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether the matcher has no predicates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Return the first predicate, in list order, that occurs as a whole
    /// phrase in `sentence` and is followed by whitespace and at least
    /// [`MIN_TRAILING_CHARS`] more characters on the same line.
    ///
    /// `sentence` is expected to be lowercased.
    #[must_use]
    pub fn find_predicate(&self, sentence: &str) -> Option<&str> {
        let spans = boundary_spans(sentence);
        self.predicates
            .iter()
            .find(|p| {
                phrase_ends(sentence, &spans, p)
                    .any(|end| has_trailing_content(&sentence[end..]))
            })
            .map(|p| p.phrase.as_str())
    }

    /// Whether `predicate` occurs as a whole phrase anywhere in `sentence`.
    #[must_use]
    pub fn contains_phrase(sentence: &str, predicate: &str) -> bool {
        let predicate = Predicate {
            phrase: predicate.to_string(),
            tokens: word_tokenize(predicate),
        };
        if predicate.tokens.is_empty() {
            return false;
        }
        let spans = boundary_spans(sentence);
        phrase_ends(sentence, &spans, &predicate).next().is_some()
    }
}

/// Byte offsets just past every whole-token occurrence of `predicate`.
fn phrase_ends<'s>(
    sentence: &'s str,
    spans: &'s [Token<'s>],
    predicate: &'s Predicate,
) -> impl Iterator<Item = usize> + 's {
    let n = predicate.tokens.len();
    spans.windows(n).filter_map(move |window| {
        let tokens_match = window
            .iter()
            .zip(&predicate.tokens)
            .all(|(t, p)| t.text == p.as_str());
        let (first, last) = (window.first()?, window.last()?);
        (tokens_match && sentence[first.start..last.end] == predicate.phrase).then_some(last.end)
    })
}

/// Whether `rest` opens with whitespace followed, on the same line, by at
/// least [`MIN_TRAILING_CHARS`] characters of any kind.
///
/// Every split of the leading whitespace run is tried, so `" \n ab"` passes
/// on the line after the break and `"  x"` passes with `" x"` as content.
fn has_trailing_content(rest: &str) -> bool {
    rest.char_indices()
        .take_while(|&(_, c)| c.is_whitespace())
        .any(|(i, c)| {
            rest[i + c.len_utf8()..]
                .split('\n')
                .next()
                .is_some_and(|line| line.chars().count() >= MIN_TRAILING_CHARS)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(phrases: &[&str]) -> PredicateMatcher {
        PredicateMatcher::from_phrases(phrases.iter().copied())
    }

    #[test]
    fn test_single_word_predicate() {
        let m = matcher(&["show"]);
        assert_eq!(
            m.find_predicate("studies show vaccines reduce infection rates"),
            Some("show")
        );
        assert_eq!(m.find_predicate("a showcase of results"), None);
        assert_eq!(m.find_predicate("what a show-off he is"), None);
    }

    #[test]
    fn test_list_order_beats_sentence_order() {
        let m = matcher(&["suggest", "show"]);
        let sentence = "studies show that trials suggest benefits";
        assert_eq!(m.find_predicate(sentence), Some("suggest"));

        let m = matcher(&["show", "suggest"]);
        assert_eq!(m.find_predicate(sentence), Some("show"));
    }

    #[test]
    fn test_predicate_must_not_be_final() {
        let m = matcher(&["show"]);
        assert_eq!(m.find_predicate("the results show"), None);
        assert_eq!(m.find_predicate("the results show."), None);
        assert_eq!(m.find_predicate("the results show a"), None);
        assert_eq!(m.find_predicate("the results show it"), Some("show"));
        assert_eq!(m.find_predicate("results show  x"), Some("show"));
        assert_eq!(m.find_predicate("results show \n ab"), Some("show"));
        assert_eq!(m.find_predicate("results show  "), None);
        assert_eq!(m.find_predicate("results show   "), Some("show"));
        assert_eq!(m.find_predicate("results show \n"), None);
    }

    #[test]
    fn test_whitespace_counts_as_trailing_content() {
        let m = matcher(&["show", "suggest"]);
        assert_eq!(
            m.find_predicate("data suggest harm. results show  x"),
            Some("show")
        );
    }

    #[test]
    fn test_later_occurrence_can_satisfy_trailing_rule() {
        let m = matcher(&["show"]);
        assert_eq!(m.find_predicate("show. data show effects"), Some("show"));
    }

    #[test]
    fn test_trailing_content_stays_on_line() {
        let m = matcher(&["show"]);
        assert_eq!(m.find_predicate("data show\nab"), Some("show"));
        assert_eq!(m.find_predicate("data show \nx"), None);
    }

    #[test]
    fn test_multi_word_predicate() {
        let m = matcher(&["lead to", "due to"]);
        assert_eq!(
            m.find_predicate("smoking can lead to lung cancer"),
            Some("lead to")
        );
        assert_eq!(m.find_predicate("smoking can lead  to cancer"), None);
        assert_eq!(m.find_predicate("the lead tonight was great"), None);
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let m = matcher(&["c++ is", "show"]);
        assert_eq!(m.find_predicate("c++ is faster"), Some("c++ is"));
        assert_eq!(m.find_predicate("cx is faster"), None);
    }

    #[test]
    fn test_clitic_predicate() {
        let m = matcher(&["doesn't"]);
        assert_eq!(
            m.find_predicate("smoking doesn't cause harm"),
            Some("doesn't")
        );
    }

    #[test]
    fn test_blank_predicates_are_ignored() {
        let m = matcher(&["", "   ", "show"]);
        assert_eq!(m.len(), 1);
        assert!(matcher(&[]).is_empty());
        assert_eq!(matcher(&[]).find_predicate("anything at all"), None);
    }

    #[test]
    fn test_contains_phrase() {
        assert!(PredicateMatcher::contains_phrase("data show. effects", "show"));
        assert!(!PredicateMatcher::contains_phrase("data shows effects", "show"));
        assert!(!PredicateMatcher::contains_phrase("data", ""));
    }
}
