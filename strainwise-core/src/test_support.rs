//! Test-only, in-memory `JournalStore` implementation and record builders
//! used by unit and behaviour tests across the workspace.

use chrono::{DateTime, Utc};

use crate::store::sort_newest_first;
use crate::{
    Entry, EntryId, JournalStore, NewEntry, NewProduct, Product, ProductId, Rating, StoreError,
};

/// Timestamp `secs` seconds after the Unix epoch.
///
/// Values outside chrono's range fall back to the epoch.
#[must_use]
pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Build a stored product from a draft with a fixed creation time.
#[must_use]
pub fn product(id: u64, draft: NewProduct) -> Product {
    draft.into_product(ProductId(id), at(0))
}

/// Build a stored entry against `product`.
///
/// `rating` values outside `1..=5` (including `0`) produce an unrated entry.
/// Entries are timestamped by id so later ids are newer.
#[must_use]
pub fn entry(id: u64, product: u64, rating: u8, effects: &[&str]) -> Entry {
    let draft = NewEntry {
        rating: Rating::new(rating).ok(),
        effects: effects.iter().map(|effect| (*effect).to_owned()).collect(),
        ..NewEntry::new(ProductId(product))
    };
    let stamp = i64::try_from(id).unwrap_or(i64::MAX);
    draft.into_entry(EntryId(id), at(stamp))
}

/// In-memory `JournalStore` implementation used in tests.
///
/// Lookups perform a linear scan and are intended only for small datasets.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    products: Vec<Product>,
    entries: Vec<Entry>,
    next_product: u64,
    next_entry: u64,
}

impl MemoryStore {
    /// Create a store pre-populated with records.
    ///
    /// New identifiers continue after the largest supplied id.
    #[must_use]
    pub fn with_records(products: Vec<Product>, entries: Vec<Entry>) -> Self {
        let next_product = products.iter().map(|p| p.id.0).max().unwrap_or(0);
        let next_entry = entries.iter().map(|e| e.id.0).max().unwrap_or(0);
        Self {
            products,
            entries,
            next_product,
            next_entry,
        }
    }
}

impl JournalStore for MemoryStore {
    fn list_entries(&self) -> Result<Vec<Entry>, StoreError> {
        let mut entries = self.entries.clone();
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let mut products = self.products.clone();
        products.sort_by_key(|product| product.id);
        Ok(products)
    }

    fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    fn get_entry(&self, id: EntryId) -> Result<Option<Entry>, StoreError> {
        Ok(self.entries.iter().find(|e| e.id == id).cloned())
    }

    fn entries_for_product(&self, product: ProductId) -> Result<Vec<Entry>, StoreError> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.product_id == product)
            .cloned()
            .collect();
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    fn add_product(&mut self, product: NewProduct) -> Result<ProductId, StoreError> {
        product.validate()?;
        self.next_product += 1;
        let id = ProductId(self.next_product);
        self.products.push(product.into_product(id, Utc::now()));
        Ok(id)
    }

    fn update_product(&mut self, product: Product) -> Result<(), StoreError> {
        product.validate()?;
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(StoreError::ProductNotFound(product.id))?;
        *slot = product;
        Ok(())
    }

    fn delete_product(&mut self, id: ProductId) -> Result<(), StoreError> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.products.len() == before {
            return Err(StoreError::ProductNotFound(id));
        }
        self.entries.retain(|e| e.product_id != id);
        Ok(())
    }

    fn add_entry(&mut self, entry: NewEntry) -> Result<EntryId, StoreError> {
        self.next_entry += 1;
        let id = EntryId(self.next_entry);
        self.entries.push(entry.into_entry(id, Utc::now()));
        Ok(id)
    }

    fn update_entry(&mut self, entry: Entry) -> Result<(), StoreError> {
        let slot = self
            .entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or(StoreError::EntryNotFound(entry.id))?;
        *slot = entry;
        Ok(())
    }

    fn delete_entry(&mut self, id: EntryId) -> Result<(), StoreError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Err(StoreError::EntryNotFound(id));
        }
        Ok(())
    }

    fn atomically<T, E, F>(&mut self, work: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        let checkpoint = self.clone();
        let outcome = work(self);
        if outcome.is_err() {
            *self = checkpoint;
        }
        outcome
    }
}
