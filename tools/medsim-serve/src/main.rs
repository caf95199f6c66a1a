//! Medsim HTTP Service
//!
//! Loads the catalog and similarity matrix once at startup, then answers
//! `POST /recommend` with the resolved medicine and its nearest neighbours.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use clap::Parser;
use medsim_core::{
    DEFAULT_CUTOFF, DEFAULT_TOP_K, Metric, Recommender, RecommenderConfig, SelfExclusion,
};
use medsim_store::{ArtifactPaths, DEFAULT_NAME_COLUMN, default_artifact_dir, load_recommender};
use tracing::info;

mod dto;
mod error;
mod handlers;


/// CLI arguments
#[derive(Parser)]
#[command(name = "medsim-serve")]
#[command(about = "Serve medicine recommendations over HTTP")]
#[command(version)]
struct Cli {
    /// Bind address
    #[arg(short = 'H', long, env = "MEDSIM_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Bind port
    #[arg(short, long, env = "MEDSIM_PORT", default_value_t = 8000)]
    port: u16,

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
}

/// Shared, read-only handler state.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) recommender: Arc<Recommender>,
}

impl AppState {
    fn new(recommender: Recommender) -> Self {
        Self {
            recommender: Arc::new(recommender),
        }
    }
}

pub(crate) fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/recommend", post(handlers::recommend))
        .route("/health", get(handlers::health))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let paths = cli.artifact_paths();
    let config = cli.config();

    let recommender = load_recommender(&paths, config).with_context(|| {
        format!(
            "failed to load artifacts ({}, {})",
            paths.catalog.display(),
            paths.matrix.display()
        )
    })?;

    serve(AppState::new(recommender), &cli.host, cli.port).await
}

async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let bind_addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind http server at {bind_addr}"))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
        .context("http server failed")
}
