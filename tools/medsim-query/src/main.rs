//! Medsim Query Tool
//!
//! Reads one medicine name per stdin line and prints one JSON object per
//! line. Failed lookups are reported inline; artifact problems abort before
//! any input is read.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use medsim_core::{
    DEFAULT_CUTOFF, DEFAULT_TOP_K, FuzzyMatcher, Metric, Recommender, RecommenderConfig,
    SelfExclusion,
};
use medsim_store::{ArtifactPaths, DEFAULT_NAME_COLUMN, default_artifact_dir, load_recommender};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// CLI arguments
#[derive(Parser)]
#[command(name = "medsim-query")]
#[command(about = "Resolve medicine names from stdin and print recommendations as JSON lines")]
#[command(version)]
struct Cli {
    /// Directory holding the default artifact files
    #[arg(short = 'D', long, env = "MEDSIM_ARTIFACT_DIR")]
    artifact_dir: Option<PathBuf>,

    /// Catalog file (overrides the artifact directory)
    #[arg(long, env = "MEDSIM_CATALOG")]
    catalog: Option<PathBuf>,

    /// Similarity matrix file (overrides the artifact directory)
    #[arg(long, env = "MEDSIM_MATRIX")]
    matrix: Option<PathBuf>,

    /// Catalog column holding medicine names
    #[arg(long, env = "MEDSIM_COLUMN", default_value = DEFAULT_NAME_COLUMN)]
    column: String,

    /// Minimum fuzzy-match score
    #[arg(long, env = "MEDSIM_CUTOFF", default_value_t = DEFAULT_CUTOFF)]
    cutoff: f64,

    /// Recommendations per query
    #[arg(short = 'k', long, env = "MEDSIM_TOP_K", default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// String similarity metric
    #[arg(long, env = "MEDSIM_METRIC", default_value_t = Metric::default())]
    metric: Metric,

    /// Self-exclusion policy (identity or top_rank)
    #[arg(long, env = "MEDSIM_EXCLUSION", default_value_t = SelfExclusion::default())]
    exclusion: SelfExclusion,

    /// Include similarity scores alongside recommendations
    #[arg(short, long)]
    scores: bool,

    /// Include up to N closest catalog names, regardless of the cutoff
    #[arg(long, value_name = "N")]
    suggest: Option<usize>,
}

impl Cli {
    fn artifact_paths(&self) -> ArtifactPaths {
        let dir = self.artifact_dir.clone().unwrap_or_else(default_artifact_dir);
        let mut paths = ArtifactPaths::in_dir(dir).with_name_column(&self.column);
        if let Some(catalog) = &self.catalog {
            paths.catalog = catalog.clone();
        }
        if let Some(matrix) = &self.matrix {
            paths.matrix = matrix.clone();
        }
        paths
    }

    fn config(&self) -> RecommenderConfig {
        RecommenderConfig::new()
            .with_cutoff(self.cutoff)
            .with_top_k(self.top_k)
            .with_metric(self.metric)
            .with_exclusion(self.exclusion)
    }

    fn options(&self) -> QueryOptions {
        QueryOptions {
            scores: self.scores,
            suggest: self.suggest,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct QueryOptions {
    scores: bool,
    suggest: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct QueryOutput {
    pub input: String,
    pub medicine_searched: Option<String>,
    pub recommended_medicines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn query(recommender: &Recommender, input: &str, options: QueryOptions) -> QueryOutput {
    let suggestions = options.suggest.map(|n| {
        FuzzyMatcher::new(recommender.config().metric, 0.0)
            .closest_matches(input, recommender.catalog().all_names(), n)
            .into_iter()
            .map(|m| m.name)
            .collect()
    });

    match recommender.handle_scored(input) {
        Ok(result) => {
            let scores = options
                .scores
                .then(|| result.recommendations.iter().map(|item| item.score).collect());
            QueryOutput {
                input: input.to_string(),
                medicine_searched: Some(result.resolved_name),
                recommended_medicines: result
                    .recommendations
                    .into_iter()
                    .map(|item| item.name)
                    .collect(),
                scores,
                suggestions,
                error: None,
            }
        }
        Err(e) => QueryOutput {
            input: input.to_string(),
            medicine_searched: None,
            recommended_medicines: Vec::new(),
            scores: None,
            suggestions,
            error: Some(e.to_string()),
        },
    }
}

fn run<R: BufRead, W: Write>(
    recommender: &Recommender,
    input: R,
    mut output: W,
    options: QueryOptions,
) -> Result<usize> {
    let mut answered = 0;
    for line in input.lines() {
        let line = line.context("failed to read query")?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }

        let result = query(recommender, line, options);
        serde_json::to_writer(&mut output, &result).context("failed to encode result")?;
        writeln!(output).context("failed to write result")?;
        answered += 1;
    }
    output.flush().context("failed to flush output")?;
    Ok(answered)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let paths = cli.artifact_paths();
    let recommender = load_recommender(&paths, cli.config()).with_context(|| {
        format!(
            "failed to load artifacts ({}, {})",
            paths.catalog.display(),
            paths.matrix.display()
        )
    })?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let answered = run(&recommender, stdin.lock(), stdout.lock(), cli.options())?;
    debug!(answered, "done");
    Ok(())
}
