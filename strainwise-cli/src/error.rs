//! Error types emitted by the Strainwise CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use strainwise_core::{SqliteStoreError, StoreError};
use strainwise_scorer::RecommendError;
use thiserror::Error;

/// Errors emitted by the Strainwise CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// Creating the directory that holds the journal database failed.
    #[error("failed to prepare journal directory for {path:?}: {source}")]
    PrepareDatabase {
        /// Requested database path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Opening the journal database failed.
    #[error(transparent)]
    OpenJournal(SqliteStoreError),
    /// A journal operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Reading the journal for a report failed.
    #[error(transparent)]
    Recommend(#[from] RecommendError),
    /// Reading an import file failed.
    #[error("failed to read journal export at {path:?}: {source}")]
    ReadExport {
        /// Import file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// An import file was not a valid journal export.
    #[error("failed to parse journal export at {path:?}: {source}")]
    ParseExport {
        /// Import file path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Writing an export file failed.
    #[error("failed to write journal export to {path:?}: {source}")]
    WriteExport {
        /// Export file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
