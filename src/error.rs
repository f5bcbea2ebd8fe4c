//! Unified error types for `sciref`.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for `sciref` operations.
#[derive(Debug, Error)]
pub enum SciRefError {
    /// Term list loading errors
    #[error("Term list error: {0}")]
    TermList(#[from] TermListError),

    /// Sentence annotation errors
    #[error("Annotation error: {0}")]
    Annotation(#[from] AnnotationError),

    /// Tabular input/output errors
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while loading the static term lists.
///
/// All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum TermListError {
    /// The list file does not exist
    #[error("Term list not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The list file exists but could not be read
    #[error("Failed to read term list {}: {source}", path.display())]
    Read {
        /// Path of the list file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A domain CSV has no column with the expected name
    #[error("Column '{column}' missing from {}", path.display())]
    MissingColumn {
        /// Path of the CSV file
        path: PathBuf,
        /// Name of the expected column
        column: String,
    },

    /// A domain CSV could not be decoded
    #[error("Failed to parse {}: {source}", path.display())]
    Csv {
        /// Path of the CSV file
        path: PathBuf,
        /// Underlying CSV error
        #[source]
        source: csv::Error,
    },
}

/// Errors raised while annotating a single post.
///
/// The batch driver treats these as "no result" for the affected post.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    /// The predicate's first word is not among the annotated tokens
    #[error("Predicate '{predicate}' not found among tokens of: {sentence}")]
    PredicateNotFound {
        /// The predicate that was being located
        predicate: String,
        /// The sentence that was annotated
        sentence: String,
    },

    /// The annotator returned a token sequence of the wrong length
    #[error("Misaligned annotation: expected {expected} tokens, got {actual}")]
    Misaligned {
        /// Number of tokens produced by the word tokenizer
        expected: usize,
        /// Number of annotated tokens returned
        actual: usize,
    },

    /// The annotation backend failed
    #[error("Annotator backend error: {0}")]
    Backend(String),
}

/// Errors raised while reading or writing tabular data.
#[derive(Debug, Error)]
pub enum TableError {
    /// A required column is absent from the header
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),

    /// A record could not be turned into a post
    #[error("Malformed row {row}: {reason}")]
    MalformedRow {
        /// 1-based data row number
        row: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A list-valued cell is not a valid list literal
    #[error("Invalid list literal: {0}")]
    InvalidListLiteral(String),

    /// Row and header lengths disagree
    #[error("Row has {actual} cells but the table has {expected} columns")]
    ShapeMismatch {
        /// Number of header columns
        expected: usize,
        /// Number of cells supplied
        actual: usize,
    },

    /// CSV codec errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for `sciref` operations.
pub type Result<T> = std::result::Result<T, SciRefError>;
