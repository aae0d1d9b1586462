//! OpenWiki - Repository Documentation Synthesizer
//!
//! Takes a remote repository identifier, clones a shallow snapshot, selects
//! a budgeted sample of source and manifest files, asks an OpenAI-compatible
//! completion endpoint for structured documentation, and parses the answer
//! into a [`DocumentGraph`] of sections, relations and diagrams.
//!
//! ## Quick Start
//!
//! ```ignore
//! use openwiki::{ConfigLoader, IngestPipeline, RepoRef};
//!
//! let config = ConfigLoader::load()?;
//! let pipeline = IngestPipeline::new(config)?;
//! let graph = pipeline
//!     .process_repository(&RepoRef::parse("rust-lang/cargo")?)
//!     .await?;
//! println!("{}", graph.to_markdown());
//! ```
//!
//! ## Modules
//!
//! - [`ingest`]: workspace, fetcher, content selection, context assembly, pipeline
//! - [`ai`]: completion client, system instruction, response parsing
//! - [`config`]: layered configuration
//! - [`types`]: document graph, repository identity, errors

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod ingest;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{CompletionError, FetchError, Result, WikiError};

// Domain
pub use types::{Diagram, DocumentGraph, Relation, RepoRef, RunToken, Section};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use ingest::{
    ContentSelector, GitFetcher, IngestPipeline, IngestReport, RepositoryFetcher, Selection,
};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{CompletionClient, HttpCompletionClient, SharedCompletionClient};
