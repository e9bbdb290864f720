//! Aggregate statistics over the whole journal.
//!
//! Unlike preference learning, aggregation looks at every entry regardless
//! of rating. Effect frequencies count all entries, including those whose
//! product has been deleted; compound and strain averages only count entries
//! whose product still exists.
#![forbid(unsafe_code)]

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use strainwise_core::{Entry, Product, ProductId, Strain};

use crate::EngineOptions;

/// Rating totals for one identifier.
///
/// Only identifiers with at least one contributing entry are ever reported,
/// so `count >= 1` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Sum of contributing ratings.
    pub total: u32,
    /// Number of contributing entries.
    pub count: u32,
    /// `total / count`.
    pub avg_rating: f64,
}

/// Journal-wide frequency and rating statistics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of entries.
    pub total_entries: usize,
    /// Number of products.
    pub total_products: usize,
    /// Occurrences of each effect across all entries.
    pub effects: BTreeMap<String, u32>,
    /// Ratings of entries whose product lists the cannabinoid.
    pub cannabinoids: BTreeMap<String, RatingSummary>,
    /// Ratings of entries whose product lists the terpene.
    pub terpenes: BTreeMap<String, RatingSummary>,
    /// Ratings of entries grouped by product strain.
    pub strains: BTreeMap<Strain, RatingSummary>,
}

impl Statistics {
    /// Return up to `limit` effects, most frequent first; ties order by id.
    ///
    /// # Examples
    /// ```
    /// use strainwise_scorer::Statistics;
    ///
    /// let mut stats = Statistics::default();
    /// stats.effects.insert("happy".into(), 2);
    /// stats.effects.insert("sleepy".into(), 5);
    /// assert_eq!(stats.most_common_effects(1), vec![("sleepy", 5)]);
    /// ```
    #[must_use]
    pub fn most_common_effects(&self, limit: usize) -> Vec<(&str, u32)> {
        let mut effects: Vec<_> = self
            .effects
            .iter()
            .map(|(id, count)| (id.as_str(), *count))
            .collect();
        effects.sort_by(|(_, left), (_, right)| right.cmp(left));
        effects.truncate(limit);
        effects
    }
}

#[derive(Default)]
struct RatingTally {
    total: u32,
    count: u32,
}

impl RatingTally {
    const fn add(&mut self, rating: u32) {
        self.total += rating;
        self.count += 1;
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "averages divide the rating total by its count"
    )]
    fn summarise(&self) -> RatingSummary {
        RatingSummary {
            total: self.total,
            count: self.count,
            avg_rating: f64::from(self.total) / f64::from(self.count),
        }
    }
}

fn summarise<K: Ord>(tallies: BTreeMap<K, RatingTally>) -> BTreeMap<K, RatingSummary> {
    tallies
        .into_iter()
        .filter(|(_, tally)| tally.count > 0)
        .map(|(key, tally)| (key, tally.summarise()))
        .collect()
}

pub(crate) fn index_products(products: &[Product]) -> HashMap<ProductId, &Product> {
    let mut index = HashMap::with_capacity(products.len());
    for product in products {
        // Keep the first product when identifiers collide.
        index.entry(product.id).or_insert(product);
    }
    index
}

/// Compute [`Statistics`] with default options.
#[must_use]
pub fn compute_statistics(entries: &[Entry], products: &[Product]) -> Statistics {
    compute_statistics_with(entries, products, EngineOptions::default())
}

/// Compute [`Statistics`] for a snapshot of the journal.
///
/// The function is pure and never divides by zero.
///
/// # Examples
/// ```
/// use strainwise_core::test_support::{entry, product};
/// use strainwise_core::{NewProduct, Strain};
/// use strainwise_scorer::{EngineOptions, compute_statistics_with};
///
/// let products = vec![product(1, NewProduct::named("A").with_strain(Strain::Indica))];
/// let entries = vec![entry(1, 1, 4, &["sleepy"]), entry(2, 9, 2, &["sleepy"])];
/// let stats = compute_statistics_with(&entries, &products, EngineOptions::default());
/// assert_eq!(stats.effects.get("sleepy"), Some(&2));
/// assert_eq!(stats.strains.get(&Strain::Indica).map(|s| s.count), Some(1));
/// ```
#[must_use]
pub fn compute_statistics_with(
    entries: &[Entry],
    products: &[Product],
    options: EngineOptions,
) -> Statistics {
    let catalogue = index_products(products);
    let mut effects: BTreeMap<String, u32> = BTreeMap::new();
    let mut cannabinoids: BTreeMap<String, RatingTally> = BTreeMap::new();
    let mut terpenes: BTreeMap<String, RatingTally> = BTreeMap::new();
    let mut strains: BTreeMap<Strain, RatingTally> = BTreeMap::new();

    for entry in entries {
        for effect in &entry.effects {
            *effects.entry(effect.clone()).or_default() += 1;
        }

        let Some(product) = catalogue.get(&entry.product_id) else {
            continue;
        };
        if !options.rates(entry) {
            continue;
        }
        let rating = entry.rating_value();
        for (id, _) in product.active_cannabinoids() {
            cannabinoids.entry(id.to_owned()).or_default().add(rating);
        }
        for (id, _) in product.active_terpenes() {
            terpenes.entry(id.to_owned()).or_default().add(rating);
        }
        if let Some(strain) = product.strain {
            strains.entry(strain).or_default().add(rating);
        }
    }

    Statistics {
        total_entries: entries.len(),
        total_products: products.len(),
        effects,
        cannabinoids: summarise(cannabinoids),
        terpenes: summarise(terpenes),
        strains: summarise(strains),
    }
}
