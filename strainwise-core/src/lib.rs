//! Core domain types for the Strainwise journal engine.
//!
//! Products and entries are plain records with validating constructors;
//! the catalogue, preference profile and `Scorer` trait give downstream
//! crates a shared vocabulary. Persistence lives behind [`JournalStore`].

#![forbid(unsafe_code)]

pub mod catalog;
pub mod entry;
pub mod product;
pub mod profile;
pub mod scorer;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use entry::{ConsumptionMethod, Entry, EntryId, NewEntry, Rating, RatingError};
pub use product::{CompoundProfile, NewProduct, Product, ProductError, ProductId, ProductKind, Strain};
pub use profile::{
    FAVORITE_CANNABINOID_LIMIT, FAVORITE_EFFECT_LIMIT, FAVORITE_TERPENE_LIMIT, Favorite,
    PreferenceProfile, Ranked,
};
pub use scorer::Scorer;
pub use store::{JournalSnapshot, JournalStore, StoreError};

#[cfg(feature = "store-sqlite")]
pub use store::{SqliteJournalStore, SqliteStoreError};
