//! Additive affinity scoring for a single product.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use strainwise_core::{Entry, PreferenceProfile, Product, Scorer};

use crate::EngineOptions;

/// Multipliers applied to each scoring signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffinityWeights {
    /// Applied to the mean rating of a product already tried.
    pub tried: f64,
    /// Applied to each matching favourite cannabinoid score.
    pub cannabinoid: f64,
    /// Applied to each matching favourite terpene score.
    pub terpene: f64,
    /// Flat bonus when the product's strain is the favourite.
    pub strain: f64,
}

impl Default for AffinityWeights {
    fn default() -> Self {
        Self {
            tried: 10.0,
            cannabinoid: 0.3,
            terpene: 0.5,
            strain: 5.0,
        }
    }
}

/// Per-signal components of an affinity score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Tried-before bonus.
    pub tried: f64,
    /// Sum of cannabinoid-match bonuses.
    pub cannabinoids: f64,
    /// Sum of terpene-match bonuses.
    pub terpenes: f64,
    /// Strain-match bonus.
    pub strain: f64,
}

impl ScoreBreakdown {
    /// Sum of every component.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the affinity score is the sum of independent signals"
    )]
    pub fn total(&self) -> f64 {
        self.tried + self.cannabinoids + self.terpenes + self.strain
    }
}

/// Scorer that rewards products resembling what the user rated highly.
///
/// # Examples
/// ```
/// use strainwise_core::{PreferenceProfile, Scorer, Strain};
/// use strainwise_core::test_support::product;
/// use strainwise_core::NewProduct;
/// use strainwise_scorer::AffinityScorer;
///
/// let profile = PreferenceProfile {
///     favorite_strain: Some(Strain::Indica),
///     ..PreferenceProfile::new()
/// };
/// let candidate = product(1, NewProduct::named("Northern Lights").with_strain(Strain::Indica));
/// let score = AffinityScorer::new().score(&candidate, &profile, &[]);
/// assert!((score - 5.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AffinityScorer {
    weights: AffinityWeights,
    options: EngineOptions,
}

impl AffinityScorer {
    /// Scorer with default weights and options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the signal weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: AffinityWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the engine options.
    #[must_use]
    pub const fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Active weights.
    #[must_use]
    pub const fn weights(&self) -> AffinityWeights {
        self.weights
    }

    /// Score `product` signal by signal.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "bonuses scale accumulated preference scores"
    )]
    pub fn breakdown(
        &self,
        product: &Product,
        profile: &PreferenceProfile,
        history: &[Entry],
    ) -> ScoreBreakdown {
        let tried = self
            .mean_rating(product, history)
            .map_or(0.0, |mean| mean * self.weights.tried);
        let cannabinoids: f64 = profile
            .favorite_cannabinoids
            .iter()
            .filter(|favorite| product.cannabinoid(&favorite.id) > 0.0)
            .map(|favorite| favorite.score * self.weights.cannabinoid)
            .sum();
        let terpenes: f64 = profile
            .favorite_terpenes
            .iter()
            .filter(|favorite| product.terpene(&favorite.id) > 0.0)
            .map(|favorite| favorite.score * self.weights.terpene)
            .sum();
        let strain = match (product.strain, profile.favorite_strain) {
            (Some(own), Some(favourite)) if own == favourite => self.weights.strain,
            _ => 0.0,
        };
        ScoreBreakdown {
            tried,
            cannabinoids,
            terpenes,
            strain,
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the tried-before signal averages past ratings"
    )]
    fn mean_rating(&self, product: &Product, history: &[Entry]) -> Option<f64> {
        let (total, count) = history
            .iter()
            .filter(|entry| entry.product_id == product.id && self.options.rates(entry))
            .fold((0_u32, 0_u32), |(total, count), entry| {
                (total + entry.rating_value(), count + 1)
            });
        (count > 0).then(|| f64::from(total) / f64::from(count))
    }
}

impl Scorer for AffinityScorer {
    fn score(&self, product: &Product, profile: &PreferenceProfile, history: &[Entry]) -> f64 {
        <Self as Scorer>::sanitise(self.breakdown(product, profile, history).total())
    }
}
