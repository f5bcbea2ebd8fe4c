//! Command-line entry point: annotate a TSV table of posts with one
//! category of heuristics.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sciref::config::{ListsConfig, SciRefConfig};
use sciref::pipeline::{Category, Pipeline};

/// Flag social-media posts that refer to scientific research.
#[derive(Parser, Debug)]
#[command(name = "sciref", version, about = "Rule-based science reference heuristics")]
struct Args {
    /// Path to a JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the term lists. Overrides the configuration file.
    #[arg(long, global = true)]
    lists_dir: Option<PathBuf>,

    /// Shard posts across worker threads.
    #[arg(long, global = true)]
    parallel: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scientific claims with scientific terms. Writes `<input>_cat1.tsv`.
    Cat1 {
        /// Input TSV with a `text` column.
        input: PathBuf,
    },
    /// Links to scientific domains. Writes `<input>_cat2.tsv`.
    Cat2 {
        /// Input TSV with `text` and `urls` columns.
        input: PathBuf,
    },
    /// Research context. Writes `<input>_cat3.tsv`.
    Cat3 {
        /// Input TSV with a `text` column.
        input: PathBuf,
    },
}

impl Command {
    fn split(self) -> (Category, PathBuf) {
        match self {
            Self::Cat1 { input } => (Category::Cat1, input),
            Self::Cat2 { input } => (Category::Cat2, input),
            Self::Cat3 { input } => (Category::Cat3, input),
        }
    }
}

fn run(args: Args) -> sciref::Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading configuration");
            SciRefConfig::from_file(path)?
        }
        None => SciRefConfig::default(),
    };
    if let Some(dir) = args.lists_dir {
        config.lists = ListsConfig {
            dir,
            ..config.lists
        };
    }
    if args.parallel {
        config.batch.parallel = true;
    }

    let (category, input) = args.command.split();
    tracing::info!(
        %category,
        lists = %config.lists.dir.display(),
        "Loading term lists"
    );
    let pipeline = Pipeline::for_category(config, category)?;
    let output = pipeline.run_file(category, &input)?;

    let metrics = pipeline.metrics();
    match serde_json::to_string(&metrics) {
        Ok(json) => tracing::debug!(metrics = %json, "Batch metrics"),
        Err(e) => tracing::warn!(error = %e, "Could not serialize metrics"),
    }
    println!("{}", output.display());
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "sciref failed");
            ExitCode::from(1)
        }
    }
}
