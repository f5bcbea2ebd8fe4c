//! `sciref` - Rule-based heuristics that flag social-media posts referring
//! to scientific research.
//!
//! Each post is checked against three independent categories:
//!
//! - **Category 1 (claims)**: a sentence states a claim through an
//!   argumentative predicate with a noun subject that is not a pronoun or a
//!   named person, and the post uses a scientific term
//! - **Category 2 (links)**: the post links to a scholarly repository, a
//!   science magazine, or the science section of a news outlet
//! - **Category 3 (research context)**: the post talks about research,
//!   scientists, publications, or a research method
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sciref::prelude::*;
//!
//! fn main() -> Result<(), SciRefError> {
//!     let config = SciRefConfig::new().with_lists(ListsConfig::in_dir("lists"));
//!     let pipeline = Pipeline::for_category(config, Category::Cat1)?;
//!
//!     let posts = vec![Post::new("Studies show vaccines reduce infection rates.")];
//!     for outcome in pipeline.evaluate_cat1(&posts)? {
//!         println!("claim: {:?}, cat1: {}", outcome.claim.as_pair(), outcome.is_cat1());
//!     }
//!
//!     // Or annotate a whole TSV file, writing `posts_cat1.tsv` next to it.
//!     pipeline.run_file(Category::Cat1, std::path::Path::new("posts.tsv"))?;
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `native` (default): shard batches across threads with rayon when
//!   `batch.parallel` is set
//!
//! # Architecture
//!
//! ```text
//! TSV table
//!   │
//!   ▼
//! ┌──────────────────┐
//! │ Table::into_posts│  ← malformed rows skipped or fatal
//! └────────┬─────────┘
//!          │ posts
//!          ▼
//! ┌──────────────────┐     ┌────────────────────┐
//! │ Pipeline         │ ──▶ │ SentenceAnnotator  │  ← segmentation, POS, entities
//! │  cat1 / 2 / 3    │     └────────────────────┘
//! └────────┬─────────┘
//!          │ result columns
//!          ▼
//!    <input>_catN.tsv
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod annotator;
pub mod cat1_claim;
pub mod cat2_sciurl;
pub mod cat3_research;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod table;
pub mod terms;
pub mod types;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::annotator::{
        AnnotatedToken, CoarsePos, LexiconAnnotator, MockAnnotator, SentenceAnnotation,
        SentenceAnnotator, TokenSpan,
    };
    pub use crate::cat1_claim::{
        Cat1Heuristics, ClaimClassifier, PredicateMatcher, ScienceTermDetector,
    };
    pub use crate::cat2_sciurl::{Cat2Heuristics, DomainMatcher, url_to_domain};
    pub use crate::cat3_research::Cat3Heuristics;
    pub use crate::config::{
        BatchConfig, ClaimConfig, ListsConfig, MalformedRowPolicy, SciRefConfig,
    };
    pub use crate::error::{AnnotationError, SciRefError, TableError, TermListError};
    pub use crate::metrics::{BatchMetrics, MetricsCollector, StageTiming, TimedOperation};
    pub use crate::pipeline::{Category, Pipeline, PipelineBuilder};
    pub use crate::table::Table;
    pub use crate::terms::{ClaimLists, DomainLists, ResearchLists, TermList};
    pub use crate::types::{
        Cat1Outcome, Cat2Outcome, Cat3Outcome, ClaimResult, Post, ScienceTermMatch, SentenceForm,
    };
}

pub use error::{Result, SciRefError};
