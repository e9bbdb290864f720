//! Learn a [`PreferenceProfile`] from journal history.
//!
//! Every entry feeds the average rating. Only high-rated entries (rating
//! 4 or 5) feed the favourite effects, compounds and strain:
//! - positive-category effects add one occurrence each;
//! - each positive cannabinoid or terpene on the entry's product adds
//!   `rating × percentage`;
//! - the product's strain adds the bare rating.
//!
//! Accumulators remember the order in which identifiers were first seen so
//! equal scores rank deterministically. A product holds its compounds in
//! identifier order, so ties between compounds first seen on the same
//! product rank alphabetically.
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::AddAssign;

use strainwise_core::{
    Entry, FAVORITE_CANNABINOID_LIMIT, FAVORITE_EFFECT_LIMIT, FAVORITE_TERPENE_LIMIT,
    PreferenceProfile, Product, Ranked, Strain, catalog,
};

use crate::EngineOptions;
use crate::stats::index_products;

/// Running totals keyed by identifier, in first-seen order.
struct Tally<K, V> {
    slots: Vec<(K, V)>,
    positions: HashMap<K, usize>,
}

impl<K, V> Default for Tally<K, V> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash, V: AddAssign + Copy + Default> Tally<K, V> {
    fn add(&mut self, key: &K, amount: V) {
        if let Some(slot) = self
            .positions
            .get(key)
            .and_then(|&position| self.slots.get_mut(position))
        {
            slot.1 += amount;
            return;
        }
        self.positions.insert(key.clone(), self.slots.len());
        let mut value = V::default();
        value += amount;
        self.slots.push((key.clone(), value));
    }

    fn into_slots(self) -> Vec<(K, V)> {
        self.slots
    }
}

impl<V: AddAssign + Copy + Default + PartialOrd> Tally<String, V> {
    fn into_ranked(self, limit: usize) -> Ranked<V> {
        Ranked::top(self.into_slots(), limit)
    }
}

/// Learn preferences with default options.
#[must_use]
pub fn learn_preferences(entries: &[Entry], products: &[Product]) -> PreferenceProfile {
    learn_preferences_with(entries, products, EngineOptions::default())
}

/// Fold `entries` into a [`PreferenceProfile`].
///
/// The function has no minimum-history guard: with no high-rated entries
/// every favourite list is empty, and with no rated entries the average is
/// `0.0`.
///
/// # Examples
/// ```
/// use strainwise_core::test_support::{entry, product};
/// use strainwise_core::{NewProduct, Strain};
/// use strainwise_scorer::learn_preferences;
///
/// let products = vec![product(1, NewProduct::named("A").with_strain(Strain::Sativa))];
/// let entries = vec![entry(1, 1, 5, &["uplifted"]), entry(2, 1, 2, &["anxious"])];
/// let profile = learn_preferences(&entries, &products);
/// assert_eq!(profile.favorite_strain, Some(Strain::Sativa));
/// assert!(profile.favorite_effects.contains("uplifted"));
/// assert!((profile.avg_rating - 3.5).abs() < 1e-9);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "compound preferences weight percentages by rating"
)]
pub fn learn_preferences_with(
    entries: &[Entry],
    products: &[Product],
    options: EngineOptions,
) -> PreferenceProfile {
    let catalogue = index_products(products);
    let mut rating_total = 0_u32;
    let mut rated_entries = 0_u32;
    let mut effects: Tally<String, u32> = Tally::default();
    let mut cannabinoids: Tally<String, f64> = Tally::default();
    let mut terpenes: Tally<String, f64> = Tally::default();
    let mut strains: Tally<Strain, u32> = Tally::default();

    for entry in entries {
        if options.rates(entry) {
            rating_total += entry.rating_value();
            rated_entries += 1;
        }
        if !entry.is_high_rated() {
            continue;
        }
        let rating = entry.rating_value();

        for effect in entry
            .effects
            .iter()
            .filter(|effect| catalog::is_positive_effect(effect))
        {
            effects.add(effect, 1);
        }

        let Some(product) = catalogue.get(&entry.product_id) else {
            continue;
        };
        let weight = f64::from(rating);
        for (id, percent) in product.active_cannabinoids() {
            cannabinoids.add(&id.to_owned(), weight * percent);
        }
        for (id, percent) in product.active_terpenes() {
            terpenes.add(&id.to_owned(), weight * percent);
        }
        if let Some(strain) = product.strain {
            strains.add(&strain, rating);
        }
    }

    let avg_rating = if rated_entries == 0 {
        0.0
    } else {
        f64::from(rating_total) / f64::from(rated_entries)
    };

    PreferenceProfile {
        avg_rating,
        total_entries: entries.len(),
        favorite_effects: effects.into_ranked(FAVORITE_EFFECT_LIMIT),
        favorite_cannabinoids: cannabinoids.into_ranked(FAVORITE_CANNABINOID_LIMIT),
        favorite_terpenes: terpenes.into_ranked(FAVORITE_TERPENE_LIMIT),
        favorite_strain: leading_strain(strains),
    }
}

/// Highest-scoring strain; the first one seen wins a tie.
fn leading_strain(strains: Tally<Strain, u32>) -> Option<Strain> {
    strains
        .into_slots()
        .into_iter()
        .fold(None, |best: Option<(Strain, u32)>, (strain, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((strain, score)),
        })
        .map(|(strain, _)| strain)
}
