//! Benchmark suite for sciref.
//!
//! Run with: cargo bench

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use sciref::annotator::{LexiconAnnotator, SentenceAnnotator, word_tokenize};
use sciref::cat1_claim::{Cat1Heuristics, PredicateMatcher};
use sciref::cat2_sciurl::{Cat2Heuristics, url_to_domain};
use sciref::config::{BatchConfig, ClaimConfig, SciRefConfig};
use sciref::pipeline::{Pipeline, PipelineBuilder};
use sciref::table::Table;
use sciref::terms::{ClaimLists, DomainLists, TermList};
use sciref::types::Post;

const POSTS: [&str; 4] = [
    "Studies show vaccines reduce infection rates. More at the link.",
    "I think this new phone is great, honestly.",
    "Dr. Jane Smith and her team suggest the genome is older than thought.",
    "New findings indicate that sleep matters more than diet for memory.",
];

fn claim_lists() -> ClaimLists {
    ClaimLists {
        predicates: TermList::from_terms(
            "predicates",
            ["suggest", "show", "indicate", "prove", "find", "reveal"],
        ),
        scientific_terms: TermList::from_terms(
            "wiki_sci_terms",
            ["genome", "vaccines", "infection", "memory", "dna", "protein"],
        )
        .sorted(),
    }
}

// ============================================================================
// Annotation Benchmarks
// ============================================================================

fn bench_annotation(c: &mut Criterion) {
    let annotator = LexiconAnnotator::new();
    let mut group = c.benchmark_group("annotation");

    for (i, post) in POSTS.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("tokenize", i), post, |bench, post| {
            bench.iter(|| word_tokenize(black_box(post)));
        });
        group.bench_with_input(BenchmarkId::new("annotate_text", i), post, |bench, post| {
            bench.iter(|| annotator.annotate_text(black_box(post)));
        });
    }

    group.finish();
}

// ============================================================================
// Category Benchmarks
// ============================================================================

fn bench_cat1(c: &mut Criterion) {
    let lists = claim_lists();
    let matcher = PredicateMatcher::new(&lists.predicates);
    let heuristics = Cat1Heuristics::new(
        &lists,
        ClaimConfig::default(),
        Arc::new(LexiconAnnotator::new()),
    );

    let mut group = c.benchmark_group("cat1");
    for (i, post) in POSTS.iter().enumerate() {
        let lowered = post.to_lowercase();
        group.bench_with_input(BenchmarkId::new("find_predicate", i), &lowered, |bench, text| {
            bench.iter(|| matcher.find_predicate(black_box(text)));
        });
        group.bench_with_input(BenchmarkId::new("evaluate", i), post, |bench, post| {
            bench.iter(|| heuristics.evaluate(black_box(post)));
        });
    }
    group.finish();
}

fn bench_cat2(c: &mut Criterion) {
    let heuristics = Cat2Heuristics::new(&DomainLists {
        repositories: TermList::from_terms("repo", ["arxiv.org", "doi.org", "biorxiv.org"]),
        magazines: TermList::from_terms("mags", ["newscientist.com", "nature.com"]),
        news_outlets: TermList::from_terms("news", ["bbc.co.uk", "nytimes.com"]),
    });
    let post = Post::new("read this").with_urls([
        "https://arxiv.org/abs/2101.00001",
        "https://www.bbc.co.uk/news/science-environment-1",
        "https://example.com/blog",
    ]);

    let mut group = c.benchmark_group("cat2");
    group.bench_function("url_to_domain", |bench| {
        bench.iter(|| url_to_domain(black_box("https://www.nature.com/articles/s41586")));
    });
    group.bench_function("evaluate", |bench| {
        bench.iter(|| heuristics.evaluate(black_box(&post)));
    });
    group.finish();
}

// ============================================================================
// Batch Benchmarks
// ============================================================================

fn batch_table(rows: usize) -> Table {
    let mut table = Table::new(["text"]);
    for i in 0..rows {
        let _ = table.push_row([POSTS[i % POSTS.len()]]);
    }
    table
}

fn batch_pipeline(parallel: bool) -> Option<Pipeline> {
    PipelineBuilder::new()
        .with_config(SciRefConfig::new().with_batch(BatchConfig {
            parallel,
            ..BatchConfig::default()
        }))
        .with_claim_lists(claim_lists())
        .build()
        .ok()
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_cat1");
    group.sample_size(20);

    for parallel in [false, true] {
        let Some(pipeline) = batch_pipeline(parallel) else {
            continue;
        };
        let label = if parallel { "parallel" } else { "sequential" };

        for rows in [100, 1000] {
            group.throughput(Throughput::Elements(rows as u64));
            group.bench_with_input(BenchmarkId::new(label, rows), &rows, |bench, &rows| {
                bench.iter_batched(
                    || batch_table(rows),
                    |table| pipeline.annotate_cat1(black_box(table)),
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_annotation, bench_cat1, bench_cat2, bench_batch);
criterion_main!(benches);
