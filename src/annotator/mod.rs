//! Sentence annotation.
//!
//! The heuristics only need four aligned attributes per token: the fine
//! part-of-speech tag, the coarse category, the named-entity type and the
//! lowercased text. Any tagger can sit behind [`SentenceAnnotator`] as long
//! as it keeps the alignment contract: `annotate(s)` returns exactly one
//! token per element of `tokenize(s)`, in the same order.

pub mod lexicon;
pub mod tokenizer;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AnnotationError;

pub use lexicon::LexiconAnnotator;
pub use tokenizer::{Token, boundary_spans, split_sentences, word_spans, word_tokenize};

/// Entity label for people, including fictional ones.
pub const PERSON: &str = "PERSON";

/// Fine tag of personal pronouns.
pub const PERSONAL_PRONOUN: &str = "PRP";

/// Fine tag of possessive pronouns.
pub const POSSESSIVE_PRONOUN: &str = "PRP$";

/// Coarse part-of-speech categories (Universal Dependencies).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoarsePos {
    /// Noun.
    Noun,
    /// Proper noun.
    Propn,
    /// Verb.
    Verb,
    /// Auxiliary verb.
    Aux,
    /// Adjective.
    Adj,
    /// Adverb.
    Adv,
    /// Pronoun.
    Pron,
    /// Determiner.
    Det,
    /// Adposition.
    Adp,
    /// Coordinating conjunction.
    Cconj,
    /// Subordinating conjunction.
    Sconj,
    /// Particle.
    Part,
    /// Numeral.
    Num,
    /// Punctuation.
    Punct,
    /// Symbol.
    Sym,
    /// Interjection.
    Intj,
    /// Anything else.
    X,
}

impl CoarsePos {
    /// Parse a Universal or Penn Treebank tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "NOUN" | "NN" | "NNS" => Self::Noun,
            "PROPN" | "NNP" | "NNPS" => Self::Propn,
            "VERB" | "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" => Self::Verb,
            "AUX" | "MD" => Self::Aux,
            "ADJ" | "JJ" | "JJR" | "JJS" => Self::Adj,
            "ADV" | "RB" | "RBR" | "RBS" | "WRB" => Self::Adv,
            "PRON" | "PRP" | "PRP$" | "WP" | "WP$" => Self::Pron,
            "DET" | "DT" | "WDT" | "PDT" => Self::Det,
            "ADP" | "IN" => Self::Adp,
            "CCONJ" | "CC" => Self::Cconj,
            "SCONJ" => Self::Sconj,
            "PART" | "RP" | "TO" | "POS" => Self::Part,
            "NUM" | "CD" => Self::Num,
            "PUNCT" | "." | "," | ":" | "-LRB-" | "-RRB-" | "``" | "''" | "HYPH" | "NFP" => {
                Self::Punct
            }
            "SYM" | "$" | "#" => Self::Sym,
            "INTJ" | "UH" => Self::Intj,
            _ => Self::X,
        }
    }

    /// The Universal Dependencies label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "NOUN",
            Self::Propn => "PROPN",
            Self::Verb => "VERB",
            Self::Aux => "AUX",
            Self::Adj => "ADJ",
            Self::Adv => "ADV",
            Self::Pron => "PRON",
            Self::Det => "DET",
            Self::Adp => "ADP",
            Self::Cconj => "CCONJ",
            Self::Sconj => "SCONJ",
            Self::Part => "PART",
            Self::Num => "NUM",
            Self::Punct => "PUNCT",
            Self::Sym => "SYM",
            Self::Intj => "INTJ",
            Self::X => "X",
        }
    }
}

impl fmt::Display for CoarsePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One annotated token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    /// Fine-grained tag (Penn Treebank), e.g. `PRP`.
    pub tag: String,
    /// Coarse category.
    pub pos: CoarsePos,
    /// Entity type, empty when the token is not part of an entity.
    pub ent_type: String,
    /// Lowercased surface text.
    pub lower: String,
}

impl AnnotatedToken {
    /// Create a token with no entity type.
    #[must_use]
    pub fn new(text: &str, tag: &str, pos: CoarsePos) -> Self {
        Self {
            tag: tag.to_string(),
            pos,
            ent_type: String::new(),
            lower: text.to_lowercase(),
        }
    }

    /// Set the entity type.
    #[must_use]
    pub fn with_entity(mut self, ent_type: &str) -> Self {
        self.ent_type = ent_type.to_string();
        self
    }

    /// Whether the token is a personal or possessive pronoun.
    #[must_use]
    pub fn is_pronoun(&self) -> bool {
        self.tag == PERSONAL_PRONOUN || self.tag == POSSESSIVE_PRONOUN
    }

    /// Whether the token belongs to a person entity.
    #[must_use]
    pub fn is_person(&self) -> bool {
        self.ent_type == PERSON
    }
}

/// A borrowed run of annotated tokens.
#[derive(Debug, Clone, Copy)]
pub struct TokenSpan<'a>(pub &'a [AnnotatedToken]);

impl TokenSpan<'_> {
    /// Whether any token has the coarse category `pos`.
    #[must_use]
    pub fn has_pos(&self, pos: CoarsePos) -> bool {
        self.0.iter().any(|t| t.pos == pos)
    }

    /// Whether any token has the fine tag `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t.tag == tag)
    }

    /// Whether any token has the entity type `ent_type`.
    #[must_use]
    pub fn has_entity(&self, ent_type: &str) -> bool {
        self.0.iter().any(|t| t.ent_type == ent_type)
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the span is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The annotation of one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceAnnotation {
    /// Tokens in sentence order.
    pub tokens: Vec<AnnotatedToken>,
}

impl SentenceAnnotation {
    /// Wrap a token sequence.
    #[must_use]
    pub fn new(tokens: Vec<AnnotatedToken>) -> Self {
        Self { tokens }
    }

    /// Index of the first token whose lowercased text equals `word`.
    #[must_use]
    pub fn position(&self, word: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t.lower == word)
    }

    /// Tokens strictly before `index`.
    #[must_use]
    pub fn before(&self, index: usize) -> TokenSpan<'_> {
        TokenSpan(&self.tokens[..index.min(self.tokens.len())])
    }

    /// Tokens strictly after `index`.
    #[must_use]
    pub fn after(&self, index: usize) -> TokenSpan<'_> {
        let start = (index + 1).min(self.tokens.len());
        TokenSpan(&self.tokens[start..])
    }

    /// All tokens.
    #[must_use]
    pub fn span(&self) -> TokenSpan<'_> {
        TokenSpan(&self.tokens)
    }

    /// Append the tokens of another annotation.
    pub fn extend(&mut self, other: SentenceAnnotation) {
        self.tokens.extend(other.tokens);
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Trait for sentence segmentation, tokenization and token annotation.
pub trait SentenceAnnotator: Send + Sync {
    /// Annotate one sentence.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn annotate(&self, sentence: &str) -> Result<SentenceAnnotation, AnnotationError>;

    /// Split text into sentences.
    fn segment(&self, text: &str) -> Vec<String> {
        split_sentences(text).into_iter().map(str::to_string).collect()
    }

    /// Split text into word tokens.
    fn tokenize(&self, text: &str) -> Vec<String> {
        word_tokenize(text)
    }

    /// Annotate one sentence and check it against the word tokenization.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationError::Misaligned` if the token counts differ, or
    /// any error from [`SentenceAnnotator::annotate`].
    fn annotate_aligned(&self, sentence: &str) -> Result<SentenceAnnotation, AnnotationError> {
        let annotation = self.annotate(sentence)?;
        let expected = self.tokenize(sentence).len();
        if annotation.len() != expected {
            return Err(AnnotationError::Misaligned {
                expected,
                actual: annotation.len(),
            });
        }
        Ok(annotation)
    }

    /// Annotate every sentence of `text` into one token sequence.
    ///
    /// # Errors
    ///
    /// Returns the first sentence-level error.
    fn annotate_text(&self, text: &str) -> Result<SentenceAnnotation, AnnotationError> {
        let mut annotation = SentenceAnnotation::default();
        for sentence in self.segment(text) {
            annotation.extend(self.annotate(&sentence)?);
        }
        Ok(annotation)
    }

    /// Name of the annotator, for logs.
    fn name(&self) -> &'static str {
        "annotator"
    }
}

/// A scripted annotator for testing.
///
/// Registered sentences return their scripted tokens; any other sentence is
/// tokenized and every token tagged `NN`/`NOUN`.
#[derive(Debug, Default)]
pub struct MockAnnotator {
    scripted: HashMap<String, SentenceAnnotation>,
    fail: bool,
}

impl MockAnnotator {
    /// Create an annotator with no scripted sentences.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an annotator whose every call fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            scripted: HashMap::new(),
            fail: true,
        }
    }

    /// Script the annotation of `sentence` from `(text, tag, pos, entity)` rows.
    #[must_use]
    pub fn with_sentence(mut self, sentence: &str, rows: &[(&str, &str, &str, &str)]) -> Self {
        let tokens = rows
            .iter()
            .map(|(text, tag, pos, ent)| {
                AnnotatedToken::new(text, tag, CoarsePos::from_tag(pos)).with_entity(ent)
            })
            .collect();
        self.scripted
            .insert(sentence.to_string(), SentenceAnnotation::new(tokens));
        self
    }
}

impl SentenceAnnotator for MockAnnotator {
    fn annotate(&self, sentence: &str) -> Result<SentenceAnnotation, AnnotationError> {
        if self.fail {
            return Err(AnnotationError::Backend("mock failure".to_string()));
        }
        if let Some(annotation) = self.scripted.get(sentence) {
            return Ok(annotation.clone());
        }
        let tokens = self
            .tokenize(sentence)
            .iter()
            .map(|t| AnnotatedToken::new(t, "NN", CoarsePos::Noun))
            .collect();
        Ok(SentenceAnnotation::new(tokens))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
