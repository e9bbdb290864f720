//! JSON import and export of a whole journal.

use std::collections::HashMap;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use strainwise_core::{
    Entry, JournalStore, NewEntry, NewProduct, Product, ProductId, StoreError,
};

use crate::output::write_json;
use crate::{CliError, Journal};

/// Location of a journal export.
#[derive(Debug, Clone, Args)]
pub(crate) struct PathArg {
    /// Path to the JSON export file.
    #[arg(value_name = "path")]
    pub(crate) path: Utf8PathBuf,
}

/// Portable journal document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub(crate) struct JournalExport {
    #[serde(default)]
    pub(crate) products: Vec<Product>,
    #[serde(default)]
    pub(crate) entries: Vec<Entry>,
}

/// Counts reported after an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub(crate) struct ImportSummary {
    pub(crate) products: usize,
    pub(crate) entries: usize,
    pub(crate) skipped_entries: usize,
}

#[derive(Debug, Serialize)]
struct ExportSummary<'a> {
    path: &'a Utf8Path,
    products: usize,
    entries: usize,
}

/// Append `export` to `store` as one batch.
///
/// Products receive fresh identifiers; entries follow their product to the
/// new identifier. Entries whose product is absent from the export are
/// skipped. When any record is rejected nothing is written.
pub(crate) fn import_into<S: JournalStore>(
    store: &mut S,
    export: JournalExport,
) -> Result<ImportSummary, CliError> {
    let summary = store.atomically(|batch| append_export(batch, export))?;
    Ok(summary)
}

fn append_export<S: JournalStore>(
    store: &mut S,
    export: JournalExport,
) -> Result<ImportSummary, StoreError> {
    let mut summary = ImportSummary::default();
    let mut remapped: HashMap<ProductId, ProductId> = HashMap::new();
    for product in export.products {
        let old = product.id;
        let new = store.add_product(NewProduct::from(product))?;
        remapped.insert(old, new);
        summary.products += 1;
    }
    for entry in export.entries {
        let Some(&product_id) = remapped.get(&entry.product_id) else {
            warn!(
                "skipping entry {} for product {} missing from the export",
                entry.id, entry.product_id
            );
            summary.skipped_entries += 1;
            continue;
        };
        store.add_entry(NewEntry {
            product_id,
            ..NewEntry::from(entry)
        })?;
        summary.entries += 1;
    }
    Ok(summary)
}

pub(crate) fn import(
    journal: &mut Journal,
    path: &Utf8Path,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let text = strainwise_fs::read_text_file(path).map_err(|source| CliError::ReadExport {
        path: path.to_path_buf(),
        source,
    })?;
    let export: JournalExport =
        serde_json::from_str(&text).map_err(|source| CliError::ParseExport {
            path: path.to_path_buf(),
            source,
        })?;
    let summary = import_into(&mut journal.store, export)?;
    info!(
        "imported {} products and {} entries from {path}",
        summary.products, summary.entries
    );
    write_json(writer, &summary)
}

pub(crate) fn export(
    journal: &Journal,
    path: &Utf8Path,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let snapshot = journal.store.snapshot()?;
    let document = JournalExport {
        products: snapshot.products,
        entries: snapshot.entries,
    };
    let payload = serde_json::to_string_pretty(&document).map_err(CliError::SerialiseOutput)?;
    strainwise_fs::write_file(path, payload).map_err(|source| CliError::WriteExport {
        path: path.to_path_buf(),
        source,
    })?;
    write_json(
        writer,
        &ExportSummary {
            path,
            products: document.products.len(),
            entries: document.entries.len(),
        },
    )
}
