//! Facade crate for the Strainwise journal engine.
//!
//! This crate re-exports the core journal types, the recommendation engine
//! and, behind a feature flag, the `SQLite` journal store.

#![forbid(unsafe_code)]

pub use strainwise_core::{
    ConsumptionMethod, Entry, EntryId, JournalSnapshot, JournalStore, NewEntry, NewProduct,
    PreferenceProfile, Product, ProductId, ProductKind, Rating, Scorer, StoreError, Strain,
    catalog,
};

#[cfg(feature = "store-sqlite")]
pub use strainwise_core::{SqliteJournalStore, SqliteStoreError};

pub use strainwise_scorer::{
    AffinityScorer, EngineOptions, IdealProfile, RecommendError, Recommendation,
    RecommendationReport, Recommendations, Recommender, Statistics, UnratedPolicy,
    build_ideal_profile, compute_recommendations, compute_statistics, learn_preferences,
};
