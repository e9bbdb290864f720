//! Command-line interface for keeping a Strainwise journal.
//!
//! Every subcommand opens the `SQLite` journal named by `--database`
//! (default `strainwise.db`), performs one operation and prints the result as
//! pretty JSON on stdout.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use strainwise_core::SqliteJournalStore;
use strainwise_scorer::EngineOptions;

mod error;
mod output;
mod records;
mod report;
mod transfer;

pub use error::CliError;

use records::{EntryFields, EntryFilter, IdArg, ProductFields, ProductFilter};
use transfer::PathArg;

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_SKIP_UNRATED: &str = "skip-unrated";
pub(crate) const DEFAULT_DATABASE: &str = "strainwise.db";

/// Run the Strainwise CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration or the journal
/// operation fail.
pub fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Help and version requests are not failures.
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => return Err(CliError::ArgumentParsing(err)),
    };
    let mut stdout = std::io::stdout().lock();
    execute(cli.command, &mut stdout)
}

fn execute(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::AddProduct { journal, product } => {
            records::add_product(&mut open_journal(journal)?, product, writer)
        }
        Command::ListProducts { journal, filter } => {
            records::list_products(&open_journal(journal)?, filter, writer)
        }
        Command::EditProduct {
            journal,
            id,
            product,
        } => records::edit_product(&mut open_journal(journal)?, id, product, writer),
        Command::RemoveProduct { journal, id } => {
            records::remove_product(&mut open_journal(journal)?, id, writer)
        }
        Command::AddEntry { journal, entry } => {
            records::add_entry(&mut open_journal(journal)?, entry, writer)
        }
        Command::ListEntries { journal, filter } => {
            records::list_entries(&open_journal(journal)?, filter, writer)
        }
        Command::EditEntry { journal, id, entry } => {
            records::edit_entry(&mut open_journal(journal)?, id, entry, writer)
        }
        Command::RemoveEntry { journal, id } => {
            records::remove_entry(&mut open_journal(journal)?, id, writer)
        }
        Command::Stats { journal } => report::stats(&open_journal(journal)?, writer),
        Command::Recommend { journal } => report::recommend(&open_journal(journal)?, writer),
        Command::Profile { journal } => report::profile(&open_journal(journal)?, writer),
        Command::Import { journal, file } => {
            transfer::import(&mut open_journal(journal)?, &file.path, writer)
        }
        Command::Export { journal, file } => {
            transfer::export(&open_journal(journal)?, &file.path, writer)
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "strainwise",
    about = "Log cannabis experiences and get personalised recommendations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a product to the catalogue.
    AddProduct {
        #[command(flatten)]
        journal: JournalArgs,
        #[command(flatten)]
        product: ProductFields,
    },
    /// List products, optionally of one form only.
    ListProducts {
        #[command(flatten)]
        journal: JournalArgs,
        #[command(flatten)]
        filter: ProductFilter,
    },
    /// Replace every field of a product.
    EditProduct {
        #[command(flatten)]
        journal: JournalArgs,
        #[command(flatten)]
        id: IdArg,
        #[command(flatten)]
        product: ProductFields,
    },
    /// Remove a product and every entry logged against it.
    RemoveProduct {
        #[command(flatten)]
        journal: JournalArgs,
        #[command(flatten)]
        id: IdArg,
    },
    /// Log an experience with a product.
    AddEntry {
        #[command(flatten)]
        journal: JournalArgs,
        #[command(flatten)]
        entry: EntryFields,
    },
    /// List entries newest first, optionally above a minimum rating.
    ListEntries {
        #[command(flatten)]
        journal: JournalArgs,
        #[command(flatten)]
        filter: EntryFilter,
    },
    /// Replace every field of an entry.
    EditEntry {
        #[command(flatten)]
        journal: JournalArgs,
        #[command(flatten)]
        id: IdArg,
        #[command(flatten)]
        entry: EntryFields,
    },
    /// Remove one entry.
    RemoveEntry {
        #[command(flatten)]
        journal: JournalArgs,
        #[command(flatten)]
        id: IdArg,
    },
    /// Show effect frequencies and average ratings.
    Stats {
        #[command(flatten)]
        journal: JournalArgs,
    },
    /// Recommend products based on highly rated entries.
    Recommend {
        #[command(flatten)]
        journal: JournalArgs,
    },
    /// Describe the ideal product learned from the journal.
    Profile {
        #[command(flatten)]
        journal: JournalArgs,
    },
    /// Append products and entries from a JSON export.
    Import {
        #[command(flatten)]
        journal: JournalArgs,
        #[command(flatten)]
        file: PathArg,
    },
    /// Write every product and entry to a JSON file.
    Export {
        #[command(flatten)]
        journal: JournalArgs,
        #[command(flatten)]
        file: PathArg,
    },
}

/// Journal selection shared by every subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "journal",
    long_about = "Select the journal database and how reports treat unrated \
                 entries. Values can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Journal database selection"
)]
#[ortho_config(prefix = "STRAINWISE")]
pub(crate) struct JournalArgs {
    /// Path to the SQLite journal database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Leave unrated entries out of averages in reports.
    #[arg(long = ARG_SKIP_UNRATED, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) skip_unrated: Option<bool>,
}

impl JournalArgs {
    pub(crate) fn into_config(self) -> Result<JournalConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(JournalConfig::from(merged))
    }
}

/// Resolved journal configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JournalConfig {
    /// Path to the `SQLite` journal.
    pub(crate) database: Utf8PathBuf,
    /// Options applied to reports.
    pub(crate) options: EngineOptions,
}

impl From<JournalArgs> for JournalConfig {
    fn from(args: JournalArgs) -> Self {
        let database = args
            .database
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE));
        let options = if args.skip_unrated.unwrap_or(false) {
            EngineOptions::skipping_unrated()
        } else {
            EngineOptions::default()
        };
        Self { database, options }
    }
}

/// An open journal plus the options its reports use.
pub(crate) struct Journal {
    pub(crate) store: SqliteJournalStore,
    pub(crate) options: EngineOptions,
}

impl Journal {
    pub(crate) fn open(config: &JournalConfig) -> Result<Self, CliError> {
        let prepare = |source| CliError::PrepareDatabase {
            path: config.database.clone(),
            source,
        };
        if !strainwise_fs::is_file(&config.database).map_err(prepare)? {
            log::info!("creating a new journal at {}", config.database);
        }
        strainwise_fs::ensure_parent_dir(&config.database).map_err(prepare)?;
        let store =
            SqliteJournalStore::open(config.database.as_std_path()).map_err(CliError::OpenJournal)?;
        log::debug!("opened journal at {}", config.database);
        Ok(Self {
            store,
            options: config.options,
        })
    }
}

fn open_journal(args: JournalArgs) -> Result<Journal, CliError> {
    Journal::open(&args.into_config()?)
}

#[cfg(test)]
mod tests;
