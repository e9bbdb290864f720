//! SQLite-backed journal store.
//!
//! Compound maps and effect lists are stored as JSON text and timestamps as
//! RFC 3339 text, so the database stays readable with the `sqlite3` shell.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use thiserror::Error;

use super::{JournalSnapshot, JournalStore, StoreError, sort_newest_first};
use crate::{
    CompoundProfile, ConsumptionMethod, Entry, EntryId, NewEntry, NewProduct, Product, ProductId,
    ProductKind, Rating, Strain,
};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    kind TEXT NOT NULL,
    strain TEXT,
    brand TEXT,
    cannabinoids TEXT NOT NULL,
    terpenes TEXT NOT NULL,
    notes TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    product_id INTEGER NOT NULL,
    logged_at TEXT NOT NULL,
    rating INTEGER,
    effects TEXT NOT NULL,
    method TEXT,
    dosage TEXT NOT NULL,
    notes TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS entries_by_product ON entries (product_id);
";

const BEGIN_BATCH: &str = "SAVEPOINT journal_batch";
const COMMIT_BATCH: &str = "RELEASE journal_batch";
const ROLLBACK_BATCH: &str = "ROLLBACK TO journal_batch; RELEASE journal_batch";

const PRODUCT_COLUMNS: &str =
    "id, name, kind, strain, brand, cannabinoids, terpenes, notes, created_at";
const ENTRY_COLUMNS: &str = "id, product_id, logged_at, rating, effects, method, dosage, notes";

/// Errors raised by [`SqliteJournalStore`].
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Creating the journal tables failed.
    #[error("failed to create journal schema: {source}")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Preparing or executing a statement failed.
    #[error("failed to {operation}: {source}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Encoding a JSON column failed.
    #[error("failed to encode {column}: {source}")]
    Encode {
        /// Column being written.
        column: &'static str,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A stored column held a value the journal cannot interpret.
    #[error("row {id} in {table} has an invalid {column}: {value}")]
    InvalidColumn {
        /// Table name.
        table: &'static str,
        /// Row identifier.
        id: i64,
        /// Column name.
        column: &'static str,
        /// Offending value, rendered as text.
        value: String,
    },
    /// An identifier does not fit SQLite's signed 64-bit integers.
    #[error("identifier {id} exceeds SQLite i64 range")]
    IdOutOfRange {
        /// Identifier that failed the conversion.
        id: u64,
    },
}

/// Journal store persisted in a SQLite database.
pub struct SqliteJournalStore {
    connection: Connection,
}

impl fmt::Debug for SqliteJournalStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteJournalStore")
            .field("path", &self.connection.path())
            .finish_non_exhaustive()
    }
}

impl SqliteJournalStore {
    /// Open (or create) a journal database at `path`.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError`] when the database cannot be opened or the
    /// schema cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteStoreError> {
        let path = path.as_ref();
        let connection =
            Connection::open(path).map_err(|source| SqliteStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Self::with_connection(connection)
    }

    /// Open a private in-memory journal.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError`] when the schema cannot be created.
    pub fn open_in_memory() -> Result<Self, SqliteStoreError> {
        let connection =
            Connection::open_in_memory().map_err(|source| SqliteStoreError::OpenDatabase {
                path: PathBuf::from(":memory:"),
                source,
            })?;
        Self::with_connection(connection)
    }

    fn run_batch_statement(&self, sql: &str, operation: &'static str) -> Result<(), StoreError> {
        self.connection
            .execute_batch(sql)
            .map_err(query_error(operation))?;
        Ok(())
    }

    fn with_connection(connection: Connection) -> Result<Self, SqliteStoreError> {
        connection
            .execute_batch(SCHEMA_SQL)
            .map_err(|source| SqliteStoreError::CreateSchema { source })?;
        Ok(Self { connection })
    }
}

impl JournalStore for SqliteJournalStore {
    fn list_entries(&self) -> Result<Vec<Entry>, StoreError> {
        Ok(load_entries(&self.connection, None)?)
    }

    fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(load_products(&self.connection)?)
    }

    fn snapshot(&self) -> Result<JournalSnapshot, StoreError> {
        if !self.connection.is_autocommit() {
            // Already inside a batch, which gives the reads one view.
            let entries = load_entries(&self.connection, None)?;
            let products = load_products(&self.connection)?;
            return Ok(JournalSnapshot { entries, products });
        }
        let transaction = self
            .connection
            .unchecked_transaction()
            .map_err(query_error("begin snapshot transaction"))?;
        let entries = load_entries(&transaction, None)?;
        let products = load_products(&transaction)?;
        transaction
            .commit()
            .map_err(query_error("finish snapshot transaction"))?;
        Ok(JournalSnapshot { entries, products })
    }

    fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let key = to_sql_id(id.0)?;
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let raw = self
            .connection
            .query_row(&query, [key], RawProduct::from_row)
            .optional()
            .map_err(query_error("load product"))?;
        Ok(raw.map(RawProduct::decode).transpose()?)
    }

    fn get_entry(&self, id: EntryId) -> Result<Option<Entry>, StoreError> {
        let key = to_sql_id(id.0)?;
        let query = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = ?1");
        let raw = self
            .connection
            .query_row(&query, [key], RawEntry::from_row)
            .optional()
            .map_err(query_error("load entry"))?;
        Ok(raw.map(RawEntry::decode).transpose()?)
    }

    fn entries_for_product(&self, product: ProductId) -> Result<Vec<Entry>, StoreError> {
        Ok(load_entries(&self.connection, Some(product))?)
    }

    fn add_product(&mut self, product: NewProduct) -> Result<ProductId, StoreError> {
        product.validate()?;
        let encoded = EncodedProduct::encode(&product)?;
        self.connection
            .execute(
                "INSERT INTO products (name, kind, strain, brand, cannabinoids, terpenes, notes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    product.name,
                    product.kind.as_str(),
                    product.strain.map(Strain::as_str),
                    product.brand,
                    encoded.cannabinoids,
                    encoded.terpenes,
                    product.notes,
                    Utc::now().to_rfc3339(),
                ],
            )
            .map_err(query_error("insert product"))?;
        Ok(ProductId(from_sql_id(self.connection.last_insert_rowid())))
    }

    fn update_product(&mut self, product: Product) -> Result<(), StoreError> {
        product.validate()?;
        let key = to_sql_id(product.id.0)?;
        let encoded = EncodedProduct::encode(&NewProduct::from(product.clone()))?;
        let changed = self
            .connection
            .execute(
                "UPDATE products SET name = ?2, kind = ?3, strain = ?4, brand = ?5,
                     cannabinoids = ?6, terpenes = ?7, notes = ?8, created_at = ?9
                 WHERE id = ?1",
                params![
                    key,
                    product.name,
                    product.kind.as_str(),
                    product.strain.map(Strain::as_str),
                    product.brand,
                    encoded.cannabinoids,
                    encoded.terpenes,
                    product.notes,
                    product.created_at.to_rfc3339(),
                ],
            )
            .map_err(query_error("update product"))?;
        if changed == 0 {
            return Err(StoreError::ProductNotFound(product.id));
        }
        Ok(())
    }

    fn delete_product(&mut self, id: ProductId) -> Result<(), StoreError> {
        let key = to_sql_id(id.0)?;
        // A savepoint nests inside an enclosing `atomically` batch.
        let savepoint = self
            .connection
            .savepoint()
            .map_err(query_error("begin product deletion"))?;
        savepoint
            .execute("DELETE FROM entries WHERE product_id = ?1", [key])
            .map_err(query_error("delete product entries"))?;
        let removed = savepoint
            .execute("DELETE FROM products WHERE id = ?1", [key])
            .map_err(query_error("delete product"))?;
        if removed == 0 {
            // Dropping the savepoint rolls the entry deletion back.
            return Err(StoreError::ProductNotFound(id));
        }
        savepoint
            .commit()
            .map_err(query_error("commit product deletion"))?;
        Ok(())
    }

    fn add_entry(&mut self, entry: NewEntry) -> Result<EntryId, StoreError> {
        let product_key = to_sql_id(entry.product_id.0)?;
        let effects = encode_json("effects", &entry.effects)?;
        let logged_at = entry.logged_at.unwrap_or_else(Utc::now);
        self.connection
            .execute(
                "INSERT INTO entries (product_id, logged_at, rating, effects, method, dosage, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    product_key,
                    logged_at.to_rfc3339(),
                    entry.rating.map(Rating::get),
                    effects,
                    entry.method.map(ConsumptionMethod::as_str),
                    entry.dosage,
                    entry.notes,
                ],
            )
            .map_err(query_error("insert entry"))?;
        Ok(EntryId(from_sql_id(self.connection.last_insert_rowid())))
    }

    fn update_entry(&mut self, entry: Entry) -> Result<(), StoreError> {
        let key = to_sql_id(entry.id.0)?;
        let product_key = to_sql_id(entry.product_id.0)?;
        let effects = encode_json("effects", &entry.effects)?;
        let changed = self
            .connection
            .execute(
                "UPDATE entries SET product_id = ?2, logged_at = ?3, rating = ?4, effects = ?5,
                     method = ?6, dosage = ?7, notes = ?8
                 WHERE id = ?1",
                params![
                    key,
                    product_key,
                    entry.logged_at.to_rfc3339(),
                    entry.rating.map(Rating::get),
                    effects,
                    entry.method.map(ConsumptionMethod::as_str),
                    entry.dosage,
                    entry.notes,
                ],
            )
            .map_err(query_error("update entry"))?;
        if changed == 0 {
            return Err(StoreError::EntryNotFound(entry.id));
        }
        Ok(())
    }

    fn delete_entry(&mut self, id: EntryId) -> Result<(), StoreError> {
        let key = to_sql_id(id.0)?;
        let removed = self
            .connection
            .execute("DELETE FROM entries WHERE id = ?1", [key])
            .map_err(query_error("delete entry"))?;
        if removed == 0 {
            return Err(StoreError::EntryNotFound(id));
        }
        Ok(())
    }

    fn atomically<T, E, F>(&mut self, work: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        self.run_batch_statement(BEGIN_BATCH, "begin batch")?;
        match work(self) {
            Ok(value) => {
                self.run_batch_statement(COMMIT_BATCH, "commit batch")?;
                Ok(value)
            }
            Err(err) => {
                self.run_batch_statement(ROLLBACK_BATCH, "roll back batch")?;
                Err(err)
            }
        }
    }
}

fn query_error(operation: &'static str) -> impl Fn(rusqlite::Error) -> SqliteStoreError {
    move |source| SqliteStoreError::Query { operation, source }
}

fn to_sql_id(id: u64) -> Result<i64, SqliteStoreError> {
    i64::try_from(id).map_err(|_| SqliteStoreError::IdOutOfRange { id })
}

fn from_sql_id(id: i64) -> u64 {
    // AUTOINCREMENT keys start at 1.
    u64::try_from(id).unwrap_or_default()
}

fn encode_json<T: serde::Serialize>(
    column: &'static str,
    value: &T,
) -> Result<String, SqliteStoreError> {
    serde_json::to_string(value).map_err(|source| SqliteStoreError::Encode { column, source })
}

fn parse_timestamp(
    table: &'static str,
    id: i64,
    column: &'static str,
    raw: &str,
) -> Result<DateTime<Utc>, SqliteStoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|stamp| stamp.with_timezone(&Utc))
        .map_err(|_| invalid(table, id, column, raw))
}

fn invalid(table: &'static str, id: i64, column: &'static str, value: &str) -> SqliteStoreError {
    SqliteStoreError::InvalidColumn {
        table,
        id,
        column,
        value: value.to_owned(),
    }
}

struct EncodedProduct {
    cannabinoids: String,
    terpenes: String,
}

impl EncodedProduct {
    fn encode(product: &NewProduct) -> Result<Self, SqliteStoreError> {
        Ok(Self {
            cannabinoids: encode_json("cannabinoids", &product.cannabinoids)?,
            terpenes: encode_json("terpenes", &product.terpenes)?,
        })
    }
}

struct RawProduct {
    id: i64,
    name: String,
    kind: String,
    strain: Option<String>,
    brand: Option<String>,
    cannabinoids: String,
    terpenes: String,
    notes: String,
    created_at: String,
}

impl RawProduct {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            kind: row.get(2)?,
            strain: row.get(3)?,
            brand: row.get(4)?,
            cannabinoids: row.get(5)?,
            terpenes: row.get(6)?,
            notes: row.get(7)?,
            created_at: row.get(8)?,
        })
    }

    fn decode(self) -> Result<Product, SqliteStoreError> {
        const TABLE: &str = "products";
        let kind: ProductKind = self
            .kind
            .parse()
            .map_err(|_| invalid(TABLE, self.id, "kind", &self.kind))?;
        let strain = self.strain.as_deref().and_then(|raw| {
            raw.parse::<Strain>()
                .inspect_err(|_| {
                    log::warn!("product {} has unknown strain '{raw}'; ignoring it", self.id);
                })
                .ok()
        });
        let cannabinoids: CompoundProfile = serde_json::from_str(&self.cannabinoids)
            .map_err(|_| invalid(TABLE, self.id, "cannabinoids", &self.cannabinoids))?;
        let terpenes: CompoundProfile = serde_json::from_str(&self.terpenes)
            .map_err(|_| invalid(TABLE, self.id, "terpenes", &self.terpenes))?;
        let created_at = parse_timestamp(TABLE, self.id, "created_at", &self.created_at)?;
        Ok(Product {
            id: ProductId(from_sql_id(self.id)),
            name: self.name,
            kind,
            strain,
            brand: self.brand,
            cannabinoids,
            terpenes,
            notes: self.notes,
            created_at,
        })
    }
}

struct RawEntry {
    id: i64,
    product_id: i64,
    logged_at: String,
    rating: Option<i64>,
    effects: String,
    method: Option<String>,
    dosage: String,
    notes: String,
}

impl RawEntry {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            product_id: row.get(1)?,
            logged_at: row.get(2)?,
            rating: row.get(3)?,
            effects: row.get(4)?,
            method: row.get(5)?,
            dosage: row.get(6)?,
            notes: row.get(7)?,
        })
    }

    fn decode(self) -> Result<Entry, SqliteStoreError> {
        const TABLE: &str = "entries";
        let rating = self
            .rating
            .map(|raw| {
                u8::try_from(raw)
                    .ok()
                    .and_then(|value| Rating::new(value).ok())
                    .ok_or_else(|| invalid(TABLE, self.id, "rating", &raw.to_string()))
            })
            .transpose()?;
        let method = self
            .method
            .as_deref()
            .map(|raw| {
                raw.parse::<ConsumptionMethod>()
                    .map_err(|_| invalid(TABLE, self.id, "method", raw))
            })
            .transpose()?;
        let effects: Vec<String> = serde_json::from_str(&self.effects)
            .map_err(|_| invalid(TABLE, self.id, "effects", &self.effects))?;
        let logged_at = parse_timestamp(TABLE, self.id, "logged_at", &self.logged_at)?;
        Ok(Entry {
            id: EntryId(from_sql_id(self.id)),
            product_id: ProductId(from_sql_id(self.product_id)),
            logged_at,
            rating,
            effects,
            method,
            dosage: self.dosage,
            notes: self.notes,
        })
    }
}

fn load_products(connection: &Connection) -> Result<Vec<Product>, SqliteStoreError> {
    let query = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");
    let mut statement = connection
        .prepare(&query)
        .map_err(query_error("prepare product listing"))?;
    let rows = statement
        .query_map([], RawProduct::from_row)
        .map_err(query_error("list products"))?;
    rows.map(|row| row.map_err(query_error("read product row"))?.decode())
        .collect()
}

fn load_entries(
    connection: &Connection,
    product: Option<ProductId>,
) -> Result<Vec<Entry>, SqliteStoreError> {
    let raw = match product {
        Some(id) => {
            let key = to_sql_id(id.0)?;
            let query = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE product_id = ?1");
            collect_entries(connection, &query, Some(key))?
        }
        None => {
            let query = format!("SELECT {ENTRY_COLUMNS} FROM entries");
            collect_entries(connection, &query, None)?
        }
    };
    let mut entries = raw
        .into_iter()
        .map(RawEntry::decode)
        .collect::<Result<Vec<_>, _>>()?;
    sort_newest_first(&mut entries);
    Ok(entries)
}

fn collect_entries(
    connection: &Connection,
    query: &str,
    product_key: Option<i64>,
) -> Result<Vec<RawEntry>, SqliteStoreError> {
    let mut statement = connection
        .prepare(query)
        .map_err(query_error("prepare entry listing"))?;
    let rows = match product_key {
        Some(key) => statement.query_map([key], RawEntry::from_row),
        None => statement.query_map([], RawEntry::from_row),
    }
    .map_err(query_error("list entries"))?;
    rows.map(|row| row.map_err(query_error("read entry row")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::at;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn store() -> SqliteJournalStore {
        SqliteJournalStore::open_in_memory().expect("open in-memory journal")
    }

    #[rstest]
    fn product_round_trips_through_sqlite(mut store: SqliteJournalStore) {
        let draft = NewProduct::named("Lemon Haze")
            .with_strain(Strain::Sativa)
            .with_kind(ProductKind::Vape)
            .with_cannabinoid("thc", 21.5)
            .with_terpene("limonene", 1.25);
        let id = store.add_product(draft.clone()).expect("insert product");
        let stored = store.get_product(id).expect("query").expect("present");
        assert_eq!(NewProduct::from(stored), draft);
    }

    #[rstest]
    fn entry_round_trips_through_sqlite(mut store: SqliteJournalStore) {
        let product = store.add_product(NewProduct::named("P")).expect("insert product");
        let mut draft = NewEntry::new(product)
            .with_rating(Rating::new(4).expect("valid"))
            .with_effect("focused")
            .logged_at(at(1_700_000_000));
        draft.method = Some(ConsumptionMethod::Vaping);
        draft.dosage = "2 puffs".to_owned();
        let id = store.add_entry(draft.clone()).expect("insert entry");
        let stored = store.get_entry(id).expect("query").expect("present");
        assert_eq!(stored, draft.into_entry(id, at(0)));
    }

    #[rstest]
    fn delete_product_removes_its_entries(mut store: SqliteJournalStore) {
        let keep = store.add_product(NewProduct::named("Keep")).expect("keep");
        let gone = store.add_product(NewProduct::named("Gone")).expect("gone");
        store.add_entry(NewEntry::new(keep)).expect("entry on keep");
        store.add_entry(NewEntry::new(gone)).expect("entry on gone");

        store.delete_product(gone).expect("delete");

        let snapshot = store.snapshot().expect("snapshot");
        assert_eq!(snapshot.products.len(), 1);
        assert_eq!(snapshot.entries.len(), 1);
        assert!(store.entries_for_product(gone).expect("query").is_empty());
    }

    #[rstest]
    fn deleting_missing_product_keeps_entries(mut store: SqliteJournalStore) {
        store
            .add_entry(NewEntry::new(ProductId(77)))
            .expect("dangling entry");
        let err = store.delete_product(ProductId(77)).expect_err("no such product");
        assert!(matches!(err, StoreError::ProductNotFound(ProductId(77))));
        assert_eq!(store.list_entries().expect("list").len(), 1);
    }

    #[rstest]
    fn updating_missing_entry_errors(mut store: SqliteJournalStore) {
        let entry = NewEntry::new(ProductId(1)).into_entry(EntryId(5), at(0));
        let err = store.update_entry(entry).expect_err("no such entry");
        assert!(matches!(err, StoreError::EntryNotFound(EntryId(5))));
    }

    #[rstest]
    fn update_product_rejects_invalid_replacements(mut store: SqliteJournalStore) {
        let id = store.add_product(NewProduct::named("Fine")).expect("insert");
        let mut product = store.get_product(id).expect("query").expect("present");
        product.name = String::new();
        product.cannabinoids.insert("thc".to_owned(), -40.0);
        let err = store.update_product(product).expect_err("invalid product");
        assert!(matches!(err, StoreError::InvalidProduct(_)));
        let stored = store.get_product(id).expect("query").expect("present");
        assert_eq!(stored.name, "Fine");
    }

    #[rstest]
    fn failed_batch_rolls_back_every_write(mut store: SqliteJournalStore) {
        let kept = store.add_product(NewProduct::named("Kept")).expect("insert");
        store.add_entry(NewEntry::new(kept)).expect("entry on kept");

        let outcome: Result<(), StoreError> = store.atomically(|batch| {
            batch.add_product(NewProduct::named("Good"))?;
            batch.delete_product(kept)?;
            batch.add_product(NewProduct::named("Bad").with_cannabinoid("thc", 250.0))?;
            Ok(())
        });
        assert!(matches!(outcome, Err(StoreError::InvalidProduct(_))));

        let snapshot = store.snapshot().expect("snapshot");
        let names: Vec<_> = snapshot.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Kept"]);
        assert_eq!(snapshot.entries.len(), 1);
        assert!(store.connection.is_autocommit());
    }

    #[rstest]
    fn successful_batch_commits(mut store: SqliteJournalStore) {
        let outcome: Result<ProductId, StoreError> = store.atomically(|batch| {
            let id = batch.add_product(NewProduct::named("Batched"))?;
            batch.add_entry(NewEntry::new(id))?;
            let seen = batch.snapshot()?;
            assert_eq!(seen.entries.len(), 1);
            Ok(id)
        });
        let id = outcome.expect("batch commits");
        assert!(store.connection.is_autocommit());
        assert_eq!(store.entries_for_product(id).expect("query").len(), 1);
    }

    #[rstest]
    fn unknown_strain_text_is_ignored(mut store: SqliteJournalStore) {
        let id = store.add_product(NewProduct::named("Odd")).expect("insert");
        store
            .connection
            .execute("UPDATE products SET strain = 'ruderalis' WHERE id = ?1", [1_i64])
            .expect("corrupt strain");
        let product = store.get_product(id).expect("query").expect("present");
        assert!(product.strain.is_none());
    }

    #[rstest]
    fn reopening_file_keeps_data() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("journal.db");
        {
            let mut store = SqliteJournalStore::open(&path).expect("open");
            store.add_product(NewProduct::named("Persisted")).expect("insert");
        }
        let store = SqliteJournalStore::open(&path).expect("reopen");
        let products = store.list_products().expect("list");
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.name.as_str()), Some("Persisted"));
    }
}
