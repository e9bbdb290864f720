//! Persistence contract for products and journal entries.
//!
//! The `JournalStore` trait is the only way the engine reaches persisted
//! data. Implementations own their consistency rules; the one behavioural
//! requirement is that deleting a product also deletes every entry that
//! references it.

use thiserror::Error;

use crate::{Entry, EntryId, NewEntry, NewProduct, Product, ProductError, ProductId};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteJournalStore, SqliteStoreError};

/// Entries and products read together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JournalSnapshot {
    /// Entries, newest first.
    pub entries: Vec<Entry>,
    /// Products in identifier order.
    pub products: Vec<Product>,
}

/// Errors raised by [`JournalStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No product carries the requested identifier.
    #[error("product {0} does not exist")]
    ProductNotFound(ProductId),
    /// No entry carries the requested identifier.
    #[error("entry {0} does not exist")]
    EntryNotFound(EntryId),
    /// The product draft failed validation.
    #[error(transparent)]
    InvalidProduct(#[from] ProductError),
    /// The SQLite backend failed.
    #[cfg(feature = "store-sqlite")]
    #[error(transparent)]
    Sqlite(#[from] SqliteStoreError),
}

/// CRUD access to the journal.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "store-sqlite")]
/// # fn main() -> Result<(), strainwise_core::StoreError> {
/// use strainwise_core::{JournalStore, NewEntry, NewProduct, SqliteJournalStore};
///
/// let mut store = SqliteJournalStore::open_in_memory()?;
/// let product = store.add_product(NewProduct::named("Blue Dream"))?;
/// store.add_entry(NewEntry::new(product))?;
/// store.delete_product(product)?;
/// assert!(store.list_entries()?.is_empty());
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "store-sqlite"))]
/// # fn main() {}
/// ```
pub trait JournalStore {
    /// Return every entry, newest first; equal timestamps order by id.
    ///
    /// # Errors
    /// Propagates backend failures.
    fn list_entries(&self) -> Result<Vec<Entry>, StoreError>;

    /// Return every product in identifier order.
    ///
    /// # Errors
    /// Propagates backend failures.
    fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Return entries and products as one consistent read.
    ///
    /// The default reads one list after the other; backends with
    /// transactions override it.
    ///
    /// # Errors
    /// Propagates backend failures.
    fn snapshot(&self) -> Result<JournalSnapshot, StoreError> {
        Ok(JournalSnapshot {
            entries: self.list_entries()?,
            products: self.list_products()?,
        })
    }

    /// Fetch one product.
    ///
    /// # Errors
    /// Propagates backend failures.
    fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Fetch one entry.
    ///
    /// # Errors
    /// Propagates backend failures.
    fn get_entry(&self, id: EntryId) -> Result<Option<Entry>, StoreError>;

    /// Return every entry logged against `product`, newest first.
    ///
    /// # Errors
    /// Propagates backend failures.
    fn entries_for_product(&self, product: ProductId) -> Result<Vec<Entry>, StoreError>;

    /// Validate and insert a product, returning its new identifier.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidProduct`] when validation fails.
    fn add_product(&mut self, product: NewProduct) -> Result<ProductId, StoreError>;

    /// Validate and replace an existing product.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidProduct`] when validation fails and
    /// [`StoreError::ProductNotFound`] for unknown identifiers.
    fn update_product(&mut self, product: Product) -> Result<(), StoreError>;

    /// Delete a product and every entry that references it.
    ///
    /// # Errors
    /// Returns [`StoreError::ProductNotFound`] for unknown identifiers.
    fn delete_product(&mut self, id: ProductId) -> Result<(), StoreError>;

    /// Insert an entry, returning its new identifier.
    ///
    /// The referenced product is not checked; dangling entries are legal.
    ///
    /// # Errors
    /// Propagates backend failures.
    fn add_entry(&mut self, entry: NewEntry) -> Result<EntryId, StoreError>;

    /// Replace an existing entry.
    ///
    /// # Errors
    /// Returns [`StoreError::EntryNotFound`] for unknown identifiers.
    fn update_entry(&mut self, entry: Entry) -> Result<(), StoreError>;

    /// Delete one entry.
    ///
    /// # Errors
    /// Returns [`StoreError::EntryNotFound`] for unknown identifiers.
    fn delete_entry(&mut self, id: EntryId) -> Result<(), StoreError>;

    /// Run `work` so that either all of its writes persist or none do.
    ///
    /// When `work` fails the store is returned to the state it had before
    /// the call and the error is passed through.
    ///
    /// # Errors
    /// Returns the error from `work`, or a backend failure converted into
    /// `E` when the batch cannot be started, committed or rolled back.
    fn atomically<T, E, F>(&mut self, work: F) -> Result<T, E>
    where
        Self: Sized,
        E: From<StoreError>,
        F: FnOnce(&mut Self) -> Result<T, E>;
}

/// Order entries newest first, breaking timestamp ties by identifier.
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|left, right| {
        right
            .logged_at
            .cmp(&left.logged_at)
            .then(left.id.cmp(&right.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, at};
    use crate::{NewEntry, NewProduct, Rating};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> MemoryStore {
        MemoryStore::default()
    }

    #[rstest]
    fn delete_product_cascades_to_entries(mut store: MemoryStore) {
        let keep = store.add_product(NewProduct::named("Keep")).expect("add keep");
        let gone = store.add_product(NewProduct::named("Drop")).expect("add drop");
        store.add_entry(NewEntry::new(keep)).expect("entry on keep");
        store.add_entry(NewEntry::new(gone)).expect("entry on drop");
        store.add_entry(NewEntry::new(gone)).expect("second entry on drop");

        store.delete_product(gone).expect("delete drop");

        let entries = store.list_entries().expect("list entries");
        assert_eq!(entries.len(), 1);
        assert!(entries.iter().all(|entry| entry.product_id == keep));
        assert!(store.get_product(gone).expect("lookup").is_none());
    }

    #[rstest]
    fn deleting_unknown_product_errors(mut store: MemoryStore) {
        let err = store.delete_product(ProductId(42)).expect_err("unknown id");
        assert!(matches!(err, StoreError::ProductNotFound(ProductId(42))));
    }

    #[rstest]
    fn entries_list_newest_first(mut store: MemoryStore) {
        let product = store.add_product(NewProduct::named("P")).expect("add");
        let older = store
            .add_entry(NewEntry::new(product).logged_at(at(100)))
            .expect("older");
        let newer = store
            .add_entry(NewEntry::new(product).logged_at(at(200)))
            .expect("newer");
        let ids: Vec<_> = store
            .list_entries()
            .expect("list")
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(ids, vec![newer, older]);
    }

    #[rstest]
    fn update_entry_replaces_whole_record(mut store: MemoryStore) {
        let product = store.add_product(NewProduct::named("P")).expect("add");
        let id = store
            .add_entry(NewEntry::new(product).with_effect("happy"))
            .expect("add entry");
        let mut entry = store.get_entry(id).expect("get").expect("present");
        entry.effects.clear();
        entry.rating = Some(Rating::new(2).expect("valid"));
        store.update_entry(entry.clone()).expect("update");
        assert_eq!(store.get_entry(id).expect("get"), Some(entry));
    }

    #[rstest]
    fn failed_batches_leave_no_trace(mut store: MemoryStore) {
        let kept = store.add_product(NewProduct::named("Kept")).expect("add kept");
        let outcome: Result<(), StoreError> = store.atomically(|batch| {
            let added = batch.add_product(NewProduct::named("Fresh"))?;
            batch.add_entry(NewEntry::new(added))?;
            batch.delete_product(kept)?;
            batch.add_product(NewProduct::named("Broken").with_cannabinoid("thc", 250.0))?;
            Ok(())
        });
        assert!(matches!(outcome, Err(StoreError::InvalidProduct(_))));

        let names: Vec<_> = store
            .list_products()
            .expect("list products")
            .into_iter()
            .map(|product| product.name)
            .collect();
        assert_eq!(names, vec!["Kept".to_owned()]);
        assert!(store.list_entries().expect("list entries").is_empty());
        let next = store.add_product(NewProduct::named("Next")).expect("add next");
        assert_eq!(next, ProductId(kept.0 + 1));
    }

    #[rstest]
    fn successful_batches_persist(mut store: MemoryStore) {
        let outcome: Result<ProductId, StoreError> =
            store.atomically(|batch| batch.add_product(NewProduct::named("Fresh")));
        let added = outcome.expect("batch succeeds");
        assert!(store.get_product(added).expect("lookup").is_some());
    }

    #[rstest]
    fn update_product_validates(mut store: MemoryStore) {
        let id = store.add_product(NewProduct::named("Fine")).expect("add");
        let mut product = store.get_product(id).expect("get").expect("present");
        product.name = String::new();
        product.cannabinoids.insert("thc".to_owned(), -40.0);
        let err = store
            .update_product(product)
            .expect_err("invalid replacement rejected");
        assert!(matches!(err, StoreError::InvalidProduct(_)));
        let stored = store.get_product(id).expect("get").expect("present");
        assert_eq!(stored.name, "Fine");
    }

    #[rstest]
    fn add_product_validates(mut store: MemoryStore) {
        let err = store
            .add_product(NewProduct::named(""))
            .expect_err("blank name rejected");
        assert!(matches!(err, StoreError::InvalidProduct(_)));
    }
}
