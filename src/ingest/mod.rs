//! Repository Ingestion Pipeline
//!
//! One run walks five stages in order:
//!
//! ```text
//! workspace -> fetch -> select -> assemble -> complete -> parse
//! ```
//!
//! Fetch and completion failures abort the run. Selection and parsing never
//! fail. The workspace is deleted on every exit path.

pub mod context;
pub mod fetcher;
pub mod selector;
pub mod workspace;

pub use context::assemble;
pub use fetcher::{FetchResult, GitFetcher, RepositoryFetcher};
pub use selector::{ContentSelector, FileRole, SelectedFile, Selection};
pub use workspace::ScopedWorkspace;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{Instrument, info, info_span};

use crate::ai::{self, HttpCompletionClient, SharedCompletionClient};
use crate::config::Config;
use crate::types::{DocumentGraph, RepoRef, Result, RunToken, WikiError};

/// Live state of one ingestion: the repository and the workspace it owns
#[derive(Debug)]
pub struct IngestionRun {
    repo: RepoRef,
    workspace: ScopedWorkspace,
    started: Instant,
}

impl IngestionRun {
    pub async fn start(base: &Path, repo: &RepoRef) -> Result<Self> {
        let workspace = ScopedWorkspace::acquire(base, repo).await?;
        Ok(Self {
            repo: repo.clone(),
            workspace,
            started: Instant::now(),
        })
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    pub fn path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn token(&self) -> &RunToken {
        self.workspace.token()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Delete the workspace; dropping the run has the same effect
    pub fn finish(self) {
        self.workspace.release();
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub token: RunToken,
    pub files_selected: usize,
    /// Budgeted code characters
    pub total_chars: usize,
    pub elapsed: Duration,
    pub graph: DocumentGraph,
}

pub struct IngestPipeline {
    config: Config,
    selector: ContentSelector,
    fetcher: Arc<dyn RepositoryFetcher>,
    client: SharedCompletionClient,
}

impl IngestPipeline {
    /// Pipeline with the git fetcher and HTTP completion client
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let fetcher = Arc::new(GitFetcher::new(&config.fetch));
        let client = Arc::new(HttpCompletionClient::new(&config.completion)?);
        Ok(Self::with_parts(config, fetcher, client))
    }

    pub fn with_parts(
        config: Config,
        fetcher: Arc<dyn RepositoryFetcher>,
        client: SharedCompletionClient,
    ) -> Self {
        let selector = ContentSelector::new(config.selection.clone());
        Self {
            config,
            selector,
            fetcher,
            client,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Produce documentation for `repo`
    ///
    /// # Errors
    ///
    /// - [`WikiError::Fetch`] when the clone fails (stderr attached)
    /// - [`WikiError::Completion`] when the endpoint fails or returns nothing
    /// - [`WikiError::Io`] when the workspace cannot be created
    pub async fn process_repository(&self, repo: &RepoRef) -> Result<DocumentGraph> {
        Ok(self.process_repository_with_report(repo).await?.graph)
    }

    pub async fn process_repository_with_report(&self, repo: &RepoRef) -> Result<IngestReport> {
        let run = IngestionRun::start(&self.config.workspace.base_dir(), repo).await?;
        let span = info_span!("ingest", repo = %repo, run = %run.token());

        async move {
            info!("Cloning repository");
            self.fetcher.fetch(run.repo(), run.path()).await?;

            info!("Reading source files");
            let selection = self.select(run.path()).await?;
            info!(
                "Read {} files ({} chars)",
                selection.len(),
                selection.total_chars
            );

            info!("Generating documentation (model: {})", self.client.model());
            let context = assemble(run.repo(), &selection.files);
            let raw = self.client.generate_structured_docs(&context).await?;

            info!("Creating document relations and diagrams");
            let graph = ai::parse(&raw, &selection.known_paths());
            info!(
                "Produced {} sections, {} relations, {} diagrams",
                graph.sections.len(),
                graph.relations.len(),
                graph.diagrams.len()
            );

            let report = IngestReport {
                token: run.token().clone(),
                files_selected: selection.len(),
                total_chars: selection.total_chars,
                elapsed: run.elapsed(),
                graph,
            };
            run.finish();
            Ok::<_, WikiError>(report)
        }
        .instrument(span)
        .await
    }

    async fn select(&self, root: &Path) -> Result<Selection> {
        let selector = self.selector.clone();
        let root = root.to_path_buf();
        tokio::task::spawn_blocking(move || selector.select(&root))
            .await
            .map_err(|e| WikiError::Task {
                stage: "selection",
                message: e.to_string(),
            })
    }
}
