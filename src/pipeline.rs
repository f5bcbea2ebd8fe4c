//! Batch annotation driver.
//!
//! Runs one category of heuristics over every post of a table and appends
//! the result columns. Posts are independent: a per-post annotation failure
//! is logged, counted and treated as "no match" for that post, and row
//! order is always preserved.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::annotator::{LexiconAnnotator, SentenceAnnotator};
use crate::cat1_claim::Cat1Heuristics;
use crate::cat2_sciurl::Cat2Heuristics;
use crate::cat3_research::Cat3Heuristics;
use crate::config::SciRefConfig;
use crate::error::{Result, SciRefError};
use crate::metrics::{BatchMetrics, MetricsCollector, TimedOperation};
use crate::table::{Table, format_bool, format_list_literal, output_path};
use crate::terms::{ClaimLists, DomainLists, ResearchLists};
use crate::types::{Cat1Outcome, Cat2Outcome, Cat3Outcome, ClaimResult, Post};

/// Output columns of category 1, in order.
pub const CAT1_COLUMNS: [&str; 5] = [
    "is_claim",
    "claim_sentence",
    "has_sciterm",
    "sciterms",
    "is_cat1",
];

/// Output columns of category 2, in order.
pub const CAT2_COLUMNS: [&str; 7] = [
    "sci_subdomain",
    "has_sci_subdomain",
    "sci_mag_domain",
    "has_sci_mag_domain",
    "sci_news_domain",
    "has_sci_news_domain",
    "is_cat2",
];

/// Output columns of category 3, in order.
pub const CAT3_COLUMNS: [&str; 5] = [
    "mentions_science_research_in_general",
    "mentions_scientist",
    "mentions_publications",
    "mentions_research_method",
    "is_cat3",
];

/// A heuristic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Scientific claims.
    Cat1,
    /// Links to scientific domains.
    Cat2,
    /// Research context.
    Cat3,
}

impl Category {
    /// Short name, also used as the stage name in metrics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cat1 => "cat1",
            Self::Cat2 => "cat2",
            Self::Cat3 => "cat3",
        }
    }

    /// Suffix inserted before the extension of the output file.
    #[must_use]
    pub fn output_suffix(&self) -> &'static str {
        match self {
            Self::Cat1 => "_cat1",
            Self::Cat2 => "_cat2",
            Self::Cat3 => "_cat3",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The batch driver.
pub struct Pipeline {
    config: SciRefConfig,
    cat1: Option<Cat1Heuristics>,
    cat2: Option<Cat2Heuristics>,
    cat3: Option<Cat3Heuristics>,
    metrics: MetricsCollector,
}

impl Pipeline {
    /// Build a pipeline for `category`, loading its lists from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a list cannot be
    /// loaded.
    pub fn for_category(config: SciRefConfig, category: Category) -> Result<Self> {
        PipelineBuilder::new()
            .with_config(config)
            .load_lists(category)?
            .build()
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SciRefConfig {
        &self.config
    }

    /// A snapshot of the batch counters.
    #[must_use]
    pub fn metrics(&self) -> BatchMetrics {
        self.metrics.snapshot()
    }

    /// Evaluate category 1 on each post, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the claim lists were not loaded.
    pub fn evaluate_cat1(&self, posts: &[Post]) -> Result<Vec<Cat1Outcome>> {
        let heuristics = require(self.cat1.as_ref(), Category::Cat1)?;
        let _timer = self.metrics.time_stage(Category::Cat1.as_str());

        Ok(self.map_posts(posts, |row, post| {
            let claim = match heuristics.is_claim(&post.text) {
                Ok(claim) => claim,
                Err(err) => {
                    self.annotation_failed(Category::Cat1, row, &err);
                    ClaimResult::none()
                }
            };
            let sciterms = heuristics.contains_scientific_term(&post.text);
            self.metrics.record_cat1(claim.is_claim, sciterms.found());
            Cat1Outcome { claim, sciterms }
        }))
    }

    /// Evaluate category 2 on each post, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain lists were not loaded.
    pub fn evaluate_cat2(&self, posts: &[Post]) -> Result<Vec<Cat2Outcome>> {
        let heuristics = require(self.cat2.as_ref(), Category::Cat2)?;
        let _timer = self.metrics.time_stage(Category::Cat2.as_str());

        Ok(self.map_posts(posts, |_, post| {
            let outcome = heuristics.evaluate(post);
            self.metrics.record_cat2(outcome.is_cat2());
            outcome
        }))
    }

    /// Evaluate category 3 on each post, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the research lists were not loaded.
    pub fn evaluate_cat3(&self, posts: &[Post]) -> Result<Vec<Cat3Outcome>> {
        let heuristics = require(self.cat3.as_ref(), Category::Cat3)?;
        let _timer = self.metrics.time_stage(Category::Cat3.as_str());

        Ok(self.map_posts(posts, |row, post| {
            let outcome = match heuristics.evaluate(&post.text) {
                Ok(outcome) => outcome,
                Err(err) => {
                    self.annotation_failed(Category::Cat3, row, &err);
                    Cat3Outcome {
                        research_method: heuristics
                            .mentions_research_method(&post.text.to_lowercase()),
                        ..Cat3Outcome::default()
                    }
                }
            };
            self.metrics.record_cat3(outcome.is_cat3());
            outcome
        }))
    }

    /// Append the category 1 columns to `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lists were not loaded, the text column is
    /// missing, or a malformed row is found under the `Fail` policy.
    pub fn annotate_cat1(&self, table: Table) -> Result<Table> {
        let (mut table, posts) = self.prepare(table, false)?;
        let outcomes = self.evaluate_cat1(&posts)?;

        let [is_claim, claim_sentence, has_sciterm, sciterms, is_cat1] = CAT1_COLUMNS;
        table.set_column(is_claim, column(&outcomes, |o| format_bool(o.claim.is_claim)))?;
        table.set_column(claim_sentence, column(&outcomes, |o| o.claim.sentence.clone()))?;
        table.set_column(has_sciterm, column(&outcomes, |o| format_bool(o.sciterms.found())))?;
        table.set_column(
            sciterms,
            column(&outcomes, |o| format_list_literal(&o.sciterms.terms)),
        )?;
        table.set_column(is_cat1, column(&outcomes, |o| format_bool(o.is_cat1())))?;

        self.log_finished(Category::Cat1, table.len());
        Ok(table)
    }

    /// Append the category 2 columns to `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lists were not loaded, the text or URL column
    /// is missing, or a malformed row is found under the `Fail` policy.
    pub fn annotate_cat2(&self, table: Table) -> Result<Table> {
        let (mut table, posts) = self.prepare(table, true)?;
        let outcomes = self.evaluate_cat2(&posts)?;

        let [sub, has_sub, mag, has_mag, news, has_news, is_cat2] = CAT2_COLUMNS;
        table.set_column(sub, column(&outcomes, |o| o.sci_subdomain.clone()))?;
        table.set_column(
            has_sub,
            column(&outcomes, |o| format_bool(!o.sci_subdomain.is_empty())),
        )?;
        table.set_column(mag, column(&outcomes, |o| o.sci_mag_domain.clone()))?;
        table.set_column(
            has_mag,
            column(&outcomes, |o| format_bool(!o.sci_mag_domain.is_empty())),
        )?;
        table.set_column(news, column(&outcomes, |o| o.sci_news_domain.clone()))?;
        table.set_column(
            has_news,
            column(&outcomes, |o| format_bool(!o.sci_news_domain.is_empty())),
        )?;
        table.set_column(is_cat2, column(&outcomes, |o| format_bool(o.is_cat2())))?;

        self.log_finished(Category::Cat2, table.len());
        Ok(table)
    }

    /// Append the category 3 columns to `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lists were not loaded, the text column is
    /// missing, or a malformed row is found under the `Fail` policy.
    pub fn annotate_cat3(&self, table: Table) -> Result<Table> {
        let (mut table, posts) = self.prepare(table, false)?;
        let outcomes = self.evaluate_cat3(&posts)?;

        let [general, scientist, publications, method, is_cat3] = CAT3_COLUMNS;
        table.set_column(
            general,
            column(&outcomes, |o| o.science_research_in_general.clone()),
        )?;
        table.set_column(scientist, column(&outcomes, |o| o.scientist.clone()))?;
        table.set_column(publications, column(&outcomes, |o| o.publications.clone()))?;
        table.set_column(method, column(&outcomes, |o| o.research_method.clone()))?;
        table.set_column(is_cat3, column(&outcomes, |o| format_bool(o.is_cat3())))?;

        self.log_finished(Category::Cat3, table.len());
        Ok(table)
    }

    /// Append the columns of `category` to `table`.
    ///
    /// # Errors
    ///
    /// See the per-category methods.
    pub fn annotate(&self, category: Category, table: Table) -> Result<Table> {
        match category {
            Category::Cat1 => self.annotate_cat1(table),
            Category::Cat2 => self.annotate_cat2(table),
            Category::Cat3 => self.annotate_cat3(table),
        }
    }

    /// Annotate the table at `input` and write it next to it with the
    /// category suffix. Returns the output path.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, annotating or writing fails.
    pub fn run_file(&self, category: Category, input: &Path) -> Result<PathBuf> {
        let table = Table::read_tsv(input)?;
        tracing::info!(
            %category,
            input = %input.display(),
            rows = table.len(),
            "Annotating table"
        );

        let annotated = self.annotate(category, table)?;
        let output = output_path(input, category.output_suffix());
        annotated.write_tsv(&output)?;

        tracing::info!(output = %output.display(), "Wrote annotated table");
        Ok(output)
    }

    fn prepare(&self, table: Table, with_urls: bool) -> Result<(Table, Vec<Post>)> {
        let rows = table.into_posts(&self.config.batch, with_urls)?;
        if rows.skipped > 0 {
            self.metrics.record_skipped_rows(rows.skipped);
        }
        Ok((rows.table, rows.posts))
    }

    fn map_posts<T, F>(&self, posts: &[Post], f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize, &Post) -> T + Send + Sync,
    {
        map_posts(self.config.batch.parallel, posts, f)
    }

    fn annotation_failed(&self, category: Category, row: usize, err: &dyn std::error::Error) {
        tracing::warn!(
            %category,
            row = row + 1,
            error = %err,
            "Annotation failed, treating post as no match"
        );
        self.metrics.record_annotation_failure();
    }

    fn log_finished(&self, category: Category, rows: usize) {
        let m = self.metrics.snapshot();
        tracing::info!(
            %category,
            rows,
            claims = m.claims,
            sciterm_posts = m.sciterm_posts,
            cat1 = m.cat1,
            cat2 = m.cat2,
            cat3 = m.cat3,
            annotation_failures = m.annotation_failures,
            skipped_rows = m.skipped_rows,
            "Batch finished"
        );
    }
}

#[cfg(feature = "native")]
fn map_posts<T, F>(parallel: bool, posts: &[Post], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &Post) -> T + Send + Sync,
{
    use rayon::prelude::*;

    if parallel {
        posts
            .par_iter()
            .enumerate()
            .map(|(row, post)| f(row, post))
            .collect()
    } else {
        posts
            .iter()
            .enumerate()
            .map(|(row, post)| f(row, post))
            .collect()
    }
}

#[cfg(not(feature = "native"))]
fn map_posts<T, F>(parallel: bool, posts: &[Post], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &Post) -> T + Send + Sync,
{
    if parallel {
        tracing::warn!("Parallel batches need the `native` feature, running sequentially");
    }
    posts
        .iter()
        .enumerate()
        .map(|(row, post)| f(row, post))
        .collect()
}

fn require<T>(heuristics: Option<&T>, category: Category) -> Result<&T> {
    heuristics.ok_or_else(|| {
        SciRefError::Config(format!("lists for {category} were not loaded"))
    })
}

fn column<T>(outcomes: &[T], cell: impl Fn(&T) -> String) -> Vec<String> {
    outcomes.iter().map(cell).collect()
}

/// Builder for constructing a [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: SciRefConfig,
    annotator: Option<Arc<dyn SentenceAnnotator>>,
    claim_lists: Option<ClaimLists>,
    domain_lists: Option<DomainLists>,
    research_lists: Option<ResearchLists>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    #[must_use]
    pub fn with_config(mut self, config: SciRefConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the sentence annotator. Defaults to [`LexiconAnnotator`].
    #[must_use]
    pub fn with_annotator(mut self, annotator: Arc<dyn SentenceAnnotator>) -> Self {
        self.annotator = Some(annotator);
        self
    }

    /// Set the category 1 lists.
    #[must_use]
    pub fn with_claim_lists(mut self, lists: ClaimLists) -> Self {
        self.claim_lists = Some(lists);
        self
    }

    /// Set the category 2 lists.
    #[must_use]
    pub fn with_domain_lists(mut self, lists: DomainLists) -> Self {
        self.domain_lists = Some(lists);
        self
    }

    /// Set the category 3 lists.
    #[must_use]
    pub fn with_research_lists(mut self, lists: ResearchLists) -> Self {
        self.research_lists = Some(lists);
        self
    }

    /// Load the lists of `category` from the configured directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a list file is missing or unreadable.
    pub fn load_lists(mut self, category: Category) -> Result<Self> {
        let lists = &self.config.lists;
        match category {
            Category::Cat1 => self.claim_lists = Some(ClaimLists::load(lists)?),
            Category::Cat2 => self.domain_lists = Some(DomainLists::load(lists)?),
            Category::Cat3 => self.research_lists = Some(ResearchLists::load(lists)?),
        }
        Ok(self)
    }

    /// Build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or no lists were
    /// provided for any category.
    pub fn build(self) -> Result<Pipeline> {
        self.config.validate()?;
        if self.claim_lists.is_none() && self.domain_lists.is_none() && self.research_lists.is_none()
        {
            return Err(SciRefError::Config(
                "no term lists configured for any category".to_string(),
            ));
        }

        let annotator: Arc<dyn SentenceAnnotator> = match self.annotator {
            Some(annotator) => annotator,
            None => Arc::new(LexiconAnnotator::new()),
        };
        tracing::debug!(annotator = annotator.name(), "Building pipeline");

        let claim = self.config.claim;
        Ok(Pipeline {
            cat1: self
                .claim_lists
                .map(|lists| Cat1Heuristics::new(&lists, claim, Arc::clone(&annotator))),
            cat2: self.domain_lists.map(|lists| Cat2Heuristics::new(&lists)),
            cat3: self
                .research_lists
                .map(|lists| Cat3Heuristics::new(&lists, Arc::clone(&annotator))),
            config: self.config,
            metrics: MetricsCollector::new(),
        })
    }
}

#[cfg(test)]
mod tests;
