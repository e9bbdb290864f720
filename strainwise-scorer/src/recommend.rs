//! Rank catalogue products for the user behind a journal.
//!
//! Recommendations are gated on history: below [`MIN_ENTRIES`] entries the
//! engine answers with guidance instead of scores.
#![forbid(unsafe_code)]

use log::debug;
use serde::{Deserialize, Serialize};
use strainwise_core::{Entry, JournalStore, PreferenceProfile, Product, Scorer};

use crate::{
    AffinityScorer, EngineOptions, RecommendError, Statistics, compute_statistics_with,
    learn_preferences_with,
};

/// Entries needed before recommendations are produced.
pub const MIN_ENTRIES: usize = 3;

/// Number of recommendations returned by default.
pub const RECOMMENDATION_LIMIT: usize = 5;

/// Score treated as a perfect match when rendering percentages.
pub const DISPLAY_SCORE_CEILING: f64 = 50.0;

/// One scored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Candidate product.
    pub product: Product,
    /// Raw affinity score.
    pub score: f64,
}

impl Recommendation {
    /// Score as a rounded percentage of [`DISPLAY_SCORE_CEILING`].
    ///
    /// Heavy journals can exceed 100; the value is not clamped.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "percentages scale the raw score"
    )]
    pub fn match_percent(&self) -> f64 {
        (self.score / DISPLAY_SCORE_CEILING * 100.0).round()
    }
}

/// Ranked recommendations with the data they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    /// Learned preferences.
    pub profile: PreferenceProfile,
    /// Best products, highest score first.
    pub recommendations: Vec<Recommendation>,
    /// Aggregates over the same snapshot.
    pub statistics: Statistics,
}

/// Outcome of a recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendations {
    /// Too little history to learn from.
    NotEnoughData {
        /// Guidance for the user.
        message: String,
        /// Entries currently logged.
        entry_count: usize,
        /// Entries required.
        required: usize,
    },
    /// Recommendations were computed.
    Ready(RecommendationReport),
}

impl Recommendations {
    /// Ranked products; empty when not enough data exists.
    #[must_use]
    pub fn recommendations(&self) -> &[Recommendation] {
        match self {
            Self::NotEnoughData { .. } => &[],
            Self::Ready(report) => &report.recommendations,
        }
    }

    /// Guidance message, present only when not enough data exists.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NotEnoughData { message, .. } => Some(message),
            Self::Ready(_) => None,
        }
    }

    /// Report whether recommendations were computed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Full report when recommendations were computed.
    #[must_use]
    pub const fn report(&self) -> Option<&RecommendationReport> {
        match self {
            Self::Ready(report) => Some(report),
            Self::NotEnoughData { .. } => None,
        }
    }
}

fn not_enough_data(entry_count: usize, required: usize) -> Recommendations {
    Recommendations::NotEnoughData {
        message: format!(
            "Keep logging your experiences! We need at least {required} entries to provide personalized recommendations."
        ),
        entry_count,
        required,
    }
}

/// Recommendation pipeline: gate, learn, score, rank.
///
/// # Examples
/// ```
/// use strainwise_scorer::Recommender;
///
/// let outcome = Recommender::new().recommend(&[], &[]);
/// assert!(!outcome.is_ready());
/// assert!(outcome.recommendations().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Recommender<S = AffinityScorer> {
    scorer: S,
    limit: usize,
    min_entries: usize,
    options: EngineOptions,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}

impl Recommender {
    /// Recommender using [`AffinityScorer`] and default limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scorer: AffinityScorer::new(),
            limit: RECOMMENDATION_LIMIT,
            min_entries: MIN_ENTRIES,
            options: EngineOptions::default(),
        }
    }

    /// Apply `options` to learning, aggregation and scoring alike.
    #[must_use]
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self.scorer = self.scorer.with_options(options);
        self
    }
}

impl<S: Scorer> Recommender<S> {
    /// Swap in a different scorer.
    ///
    /// The new scorer is used as given; engine options only reach the
    /// learner and aggregator.
    #[must_use]
    pub fn with_scorer<T: Scorer>(self, scorer: T) -> Recommender<T> {
        Recommender {
            scorer,
            limit: self.limit,
            min_entries: self.min_entries,
            options: self.options,
        }
    }

    /// Return at most `limit` recommendations.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Require at least `min_entries` entries before recommending.
    #[must_use]
    pub const fn with_min_entries(mut self, min_entries: usize) -> Self {
        self.min_entries = min_entries;
        self
    }

    /// Rank `products` against the preferences learned from `entries`.
    #[must_use]
    pub fn recommend(&self, entries: &[Entry], products: &[Product]) -> Recommendations {
        if entries.len() < self.min_entries {
            debug!(
                "not recommending: {} of {} required entries",
                entries.len(),
                self.min_entries
            );
            return not_enough_data(entries.len(), self.min_entries);
        }

        let profile = learn_preferences_with(entries, products, self.options);
        debug!(
            "learned profile: avg rating {:.2}, {} effects, {} cannabinoids, {} terpenes, strain {:?}",
            profile.avg_rating,
            profile.favorite_effects.len(),
            profile.favorite_cannabinoids.len(),
            profile.favorite_terpenes.len(),
            profile.favorite_strain
        );

        let mut ranked: Vec<Recommendation> = products
            .iter()
            .map(|product| Recommendation {
                score: self.scorer.score(product, &profile, entries),
                product: product.clone(),
            })
            .collect();
        ranked.sort_by(|left, right| right.score.total_cmp(&left.score));
        ranked.truncate(self.limit);

        Recommendations::Ready(RecommendationReport {
            profile,
            recommendations: ranked,
            statistics: compute_statistics_with(entries, products, self.options),
        })
    }

    /// Read one snapshot from `store` and recommend from it.
    ///
    /// # Errors
    /// Returns [`RecommendError::Store`] when the store cannot be read.
    pub fn recommend_from_store<T>(&self, store: &T) -> Result<Recommendations, RecommendError>
    where
        T: JournalStore + ?Sized,
    {
        let snapshot = store.snapshot()?;
        Ok(self.recommend(&snapshot.entries, &snapshot.products))
    }
}

/// Recommend with default settings.
///
/// # Examples
/// ```
/// use strainwise_core::test_support::{entry, product};
/// use strainwise_core::{NewProduct, Strain};
/// use strainwise_scorer::compute_recommendations;
///
/// let products = vec![
///     product(1, NewProduct::named("A").with_strain(Strain::Sativa).with_cannabinoid("thc", 20.0)),
///     product(2, NewProduct::named("B").with_strain(Strain::Indica).with_cannabinoid("cbd", 15.0)),
/// ];
/// let entries: Vec<_> = (1..=3).map(|id| entry(id, 1, 5, &["uplifted"])).collect();
/// let outcome = compute_recommendations(&entries, &products);
/// assert_eq!(outcome.recommendations()[0].product.name, "A");
/// ```
#[must_use]
pub fn compute_recommendations(entries: &[Entry], products: &[Product]) -> Recommendations {
    Recommender::new().recommend(entries, products)
}
