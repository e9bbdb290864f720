//! Recommendation engine for the Strainwise journal.
//!
//! The crate turns a snapshot of journal entries and products into:
//! - **Statistics**: effect frequencies and average ratings per cannabinoid,
//!   terpene and strain ([`compute_statistics`]).
//! - **Preferences**: a [`PreferenceProfile`](strainwise_core::PreferenceProfile)
//!   learned from high-rated entries ([`learn_preferences`]).
//! - **Recommendations**: every product scored by [`AffinityScorer`] and
//!   ranked ([`compute_recommendations`]), gated on a minimum history.
//!
//! Every operation is a pure function of its inputs. Store-backed requests
//! take a single [`JournalSnapshot`](strainwise_core::JournalSnapshot) so
//! entries and products are read together.
//!
//! # Examples
//!
//! ```
//! use strainwise_core::test_support::{entry, product};
//! use strainwise_core::{NewProduct, Strain};
//! use strainwise_scorer::{build_ideal_profile, compute_recommendations};
//!
//! let products = vec![
//!     product(1, NewProduct::named("Durban Poison").with_strain(Strain::Sativa)),
//!     product(2, NewProduct::named("Bubba Kush").with_strain(Strain::Indica)),
//! ];
//! let entries: Vec<_> = (1..=3).map(|id| entry(id, 1, 5, &["energetic"])).collect();
//! let outcome = compute_recommendations(&entries, &products);
//! let report = outcome.report().expect("three entries are enough");
//! let ideal = build_ideal_profile(&report.profile);
//! assert_eq!(ideal.strain.map(|s| s.name), Some("Sativa"));
//! ```

#![forbid(unsafe_code)]

mod affinity;
mod error;
mod ideal;
mod learner;
mod options;
mod recommend;
mod stats;

pub use affinity::{AffinityScorer, AffinityWeights, ScoreBreakdown};
pub use error::RecommendError;
pub use ideal::{IdealProfile, build_ideal_profile};
pub use learner::{learn_preferences, learn_preferences_with};
pub use options::{EngineOptions, UnratedPolicy};
pub use recommend::{
    DISPLAY_SCORE_CEILING, MIN_ENTRIES, RECOMMENDATION_LIMIT, Recommendation,
    RecommendationReport, Recommendations, Recommender, compute_recommendations,
};
pub use stats::{RatingSummary, Statistics, compute_statistics, compute_statistics_with};
