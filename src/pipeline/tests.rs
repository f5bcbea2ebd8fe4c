//! Tests for the batch driver.

use super::*;
use crate::annotator::MockAnnotator;
use crate::config::{BatchConfig, ListsConfig, MalformedRowPolicy};
use crate::terms::TermList;

fn claim_lists() -> ClaimLists {
    ClaimLists {
        predicates: TermList::from_terms("predicates", ["show", "suggest"]),
        scientific_terms: TermList::from_terms("scientific_terms", ["vaccines", "infection"])
            .sorted(),
    }
}

fn domain_lists() -> DomainLists {
    DomainLists {
        repositories: TermList::from_terms("repo_subdomains", ["arxiv.org", "doi.org"]),
        magazines: TermList::from_terms("science_mags_domains", ["newscientist.com"]),
        news_outlets: TermList::from_terms("news_outlets_domains", ["bbc.co.uk"]),
    }
}

fn research_lists() -> ResearchLists {
    ResearchLists {
        research_methods: TermList::from_terms("sc_methods", ["case study"]),
        scientists: TermList::from_terms("scientists_kws", ["scientist"]),
        science_research_in_general: TermList::from_terms(
            "science_research_in_general_kws",
            ["research"],
        ),
        publications: TermList::from_terms("publications_kws", ["papers"]),
    }
}

fn pipeline() -> Pipeline {
    PipelineBuilder::new()
        .with_claim_lists(claim_lists())
        .with_domain_lists(domain_lists())
        .with_research_lists(research_lists())
        .build()
        .unwrap()
}

fn posts_table(texts: &[&str]) -> Table {
    let mut table = Table::new(["id", "text"]);
    for (i, text) in texts.iter().enumerate() {
        table.push_row([i.to_string(), (*text).to_string()]).unwrap();
    }
    table
}

#[test]
fn test_category_names() {
    assert_eq!(Category::Cat1.as_str(), "cat1");
    assert_eq!(Category::Cat2.output_suffix(), "_cat2");
    assert_eq!(Category::Cat3.to_string(), "cat3");
}

#[test]
fn test_build_requires_some_lists() {
    let result = PipelineBuilder::new().build();
    assert!(matches!(result, Err(SciRefError::Config(_))));
}

#[test]
fn test_missing_category_lists_is_config_error() {
    let pipeline = PipelineBuilder::new()
        .with_domain_lists(domain_lists())
        .build()
        .unwrap();
    let result = pipeline.annotate_cat1(posts_table(&["studies show vaccines work"]));
    assert!(matches!(result, Err(SciRefError::Config(_))));
}

#[test]
fn test_load_lists_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = SciRefConfig::new().with_lists(ListsConfig::in_dir(dir.path()));
    let result = Pipeline::for_category(config, Category::Cat1);
    assert!(matches!(result, Err(SciRefError::TermList(_))));
}

#[test]
fn test_cat1_columns() {
    let table = posts_table(&[
        "Studies show vaccines reduce infection rates.",
        "I think cats are great.",
    ]);
    let out = pipeline().annotate_cat1(table).unwrap();

    let mut expected = vec!["id", "text"];
    expected.extend(CAT1_COLUMNS);
    assert_eq!(out.headers(), expected.as_slice());

    assert_eq!(out.column("is_claim").unwrap(), vec!["True", "False"]);
    assert_eq!(
        out.column("claim_sentence").unwrap(),
        vec!["studies show vaccines reduce infection rates.", ""]
    );
    assert_eq!(out.column("has_sciterm").unwrap(), vec!["True", "False"]);
    assert_eq!(out.column("sciterms").unwrap(), vec!["['infection', 'vaccines']", "[]"]);
    assert_eq!(out.column("is_cat1").unwrap(), vec!["True", "False"]);
}

#[test]
fn test_cat2_columns() {
    let mut table = Table::new(["text", "urls"]);
    table
        .push_row([
            "read this",
            "['https://arxiv.org/abs/1234', 'https://www.bbc.co.uk/news/science-environment-1']",
        ])
        .unwrap();
    table.push_row(["no links here", "[]"]).unwrap();

    let out = pipeline().annotate_cat2(table).unwrap();
    assert_eq!(out.column("sci_subdomain").unwrap(), vec!["arxiv.org", ""]);
    assert_eq!(out.column("has_sci_subdomain").unwrap(), vec!["True", "False"]);
    assert_eq!(out.column("sci_news_domain").unwrap(), vec!["www.bbc.co.uk", ""]);
    assert_eq!(out.column("has_sci_mag_domain").unwrap(), vec!["False", "False"]);
    assert_eq!(out.column("is_cat2").unwrap(), vec!["True", "False"]);
}

#[test]
fn test_cat2_needs_url_column() {
    let result = pipeline().annotate_cat2(posts_table(&["hello"]));
    assert!(matches!(
        result,
        Err(SciRefError::Table(crate::error::TableError::MissingColumn(_)))
    ));
}

#[test]
fn test_cat3_columns() {
    let table = posts_table(&[
        "our lead scientist says new papers are out",
        "we ran a case study today",
        "nothing to see",
    ]);
    let out = pipeline().annotate_cat3(table).unwrap();
    assert_eq!(
        out.column("mentions_scientist").unwrap(),
        vec!["scientist", "", ""]
    );
    assert_eq!(
        out.column("mentions_publications").unwrap(),
        vec!["papers", "", ""]
    );
    assert_eq!(
        out.column("mentions_research_method").unwrap(),
        vec!["", "case study", ""]
    );
    assert_eq!(out.column("is_cat3").unwrap(), vec!["True", "True", "False"]);
}

#[test]
fn test_annotation_failure_is_isolated() {
    let pipeline = PipelineBuilder::new()
        .with_claim_lists(claim_lists())
        .with_research_lists(research_lists())
        .with_annotator(Arc::new(MockAnnotator::failing()))
        .build()
        .unwrap();

    let table = posts_table(&["studies show vaccines work", "nothing here"]);
    let out = pipeline.annotate_cat1(table).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out.column("is_claim").unwrap(), vec!["False", "False"]);
    assert_eq!(out.column("has_sciterm").unwrap(), vec!["True", "False"]);

    let table = posts_table(&["new research in a case study here"]);
    let out = pipeline.annotate_cat3(table).unwrap();
    assert_eq!(
        out.column("mentions_science_research_in_general").unwrap(),
        vec![""]
    );
    assert_eq!(
        out.column("mentions_research_method").unwrap(),
        vec!["case study"]
    );

    let metrics = pipeline.metrics();
    assert_eq!(metrics.annotation_failures, 2);
    assert_eq!(metrics.posts, 3);
}

#[test]
fn test_malformed_rows_skipped_or_fatal() {
    let input = "text\turls\nok\t[]\nbroken\n\"bad urls\"\tnot a list\nfine\t['doi.org/x']\n";

    let out = pipeline()
        .annotate_cat2(Table::from_reader(input.as_bytes()).unwrap())
        .unwrap();
    assert_eq!(out.column("text").unwrap(), vec!["ok", "fine"]);
    assert_eq!(out.column("is_cat2").unwrap(), vec!["False", "True"]);

    let strict = PipelineBuilder::new()
        .with_config(SciRefConfig::new().with_batch(BatchConfig {
            malformed_rows: MalformedRowPolicy::Fail,
            ..BatchConfig::default()
        }))
        .with_domain_lists(domain_lists())
        .build()
        .unwrap();
    let result = strict.annotate_cat2(Table::from_reader(input.as_bytes()).unwrap());
    assert!(matches!(
        result,
        Err(SciRefError::Table(crate::error::TableError::MalformedRow { row: 2, .. }))
    ));
}

#[test]
fn test_skipped_rows_are_counted() {
    let input = "text\turls\nok\t[]\nbroken\n";
    let pipeline = pipeline();
    pipeline
        .annotate_cat2(Table::from_reader(input.as_bytes()).unwrap())
        .unwrap();
    assert_eq!(pipeline.metrics().skipped_rows, 1);
}

#[test]
fn test_parallel_matches_sequential() {
    let texts: Vec<String> = (0..64)
        .map(|i| {
            if i % 3 == 0 {
                format!("Studies show vaccines cut infection number {i}.")
            } else {
                format!("post {i} about nothing")
            }
        })
        .collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();

    let sequential = pipeline().annotate_cat1(posts_table(&refs)).unwrap();
    let parallel = PipelineBuilder::new()
        .with_config(SciRefConfig::new().with_batch(BatchConfig {
            parallel: true,
            ..BatchConfig::default()
        }))
        .with_claim_lists(claim_lists())
        .build()
        .unwrap()
        .annotate_cat1(posts_table(&refs))
        .unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(parallel.column("id").unwrap()[10], "10");
}

#[test]
fn test_stage_timing_recorded() {
    let pipeline = pipeline();
    pipeline.annotate_cat3(posts_table(&["hello"])).unwrap();
    let metrics = pipeline.metrics();
    assert_eq!(metrics.stage_timings.get("cat3").map(|t| t.runs), Some(1));
}

#[test]
fn test_run_file_writes_suffixed_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("posts.tsv");
    std::fs::write(
        &input,
        "id\ttext\n1\tStudies show vaccines reduce infection rates.\n2\tsunny day\n",
    )
    .unwrap();

    let output = pipeline().run_file(Category::Cat1, &input).unwrap();
    assert_eq!(output, dir.path().join("posts_cat1.tsv"));

    let table = Table::read_tsv(&output).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.column("is_cat1").unwrap(), vec!["True", "False"]);
}

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Annotating an already annotated table changes nothing.
        #[test]
        fn annotation_is_idempotent(texts in prop::collection::vec("[a-z ]{0,40}", 0..8)) {
            let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
            let pipeline = pipeline();
            let once = pipeline.annotate_cat3(posts_table(&refs)).unwrap();
            let twice = pipeline.annotate_cat3(once.clone()).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Every input row comes out once, in order.
        #[test]
        fn row_order_is_preserved(texts in prop::collection::vec("[a-zA-Z .]{0,40}", 0..8)) {
            let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
            let out = pipeline().annotate_cat1(posts_table(&refs)).unwrap();
            prop_assert_eq!(out.column("text").unwrap(), refs);
        }
    }
}
