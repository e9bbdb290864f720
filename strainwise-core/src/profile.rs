//! Preference profiles: a user's favoured effects, compounds and strain.
//!
//! Profiles are derived on demand from journal history and never stored.
//! Each favourite list is ranked by descending score; equal scores keep the
//! order in which their identifiers were first observed.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Strain;

/// Maximum number of favourite effects kept in a profile.
pub const FAVORITE_EFFECT_LIMIT: usize = 5;
/// Maximum number of favourite cannabinoids kept in a profile.
pub const FAVORITE_CANNABINOID_LIMIT: usize = 3;
/// Maximum number of favourite terpenes kept in a profile.
pub const FAVORITE_TERPENE_LIMIT: usize = 5;

/// One identifier with its accumulated preference score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Favorite<V> {
    /// Catalogue identifier.
    pub id: String,
    /// Accumulated score.
    pub score: V,
}

/// Identifiers ranked by descending score.
///
/// # Examples
/// ```
/// use strainwise_core::Ranked;
///
/// let ranked = Ranked::top(
///     vec![("a".to_owned(), 1_u32), ("b".to_owned(), 3), ("c".to_owned(), 3)],
///     2,
/// );
/// let ids: Vec<_> = ranked.ids().collect();
/// assert_eq!(ids, vec!["b", "c"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Ranked<V> {
    items: Vec<Favorite<V>>,
}

impl<V> Default for Ranked<V> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<V: PartialOrd + Copy> Ranked<V> {
    /// Rank `tally` by descending score and keep the first `limit` items.
    ///
    /// `tally` must be in first-seen order: the sort is stable so ties keep
    /// that order. Incomparable scores (`NaN`) are treated as equal.
    #[must_use]
    pub fn top(mut tally: Vec<(String, V)>, limit: usize) -> Self {
        tally.sort_by(|(_, left), (_, right)| {
            right
                .partial_cmp(left)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        tally.truncate(limit);
        Self {
            items: tally
                .into_iter()
                .map(|(id, score)| Favorite { id, score })
                .collect(),
        }
    }

    /// Score recorded for `id`, if it made the ranking.
    #[must_use]
    pub fn score(&self, id: &str) -> Option<V> {
        self.items
            .iter()
            .find(|favorite| favorite.id == id)
            .map(|favorite| favorite.score)
    }
}

impl<V> Ranked<V> {
    /// Iterate favourites in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &Favorite<V>> {
        self.items.iter()
    }

    /// Iterate identifiers in rank order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|favorite| favorite.id.as_str())
    }

    /// Report whether `id` made the ranking.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|favorite| favorite.id == id)
    }

    /// Number of ranked identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Report whether nothing was ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Transient summary of what a user tends to enjoy.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PreferenceProfile {
    /// Mean rating across the entries that feed the average.
    pub avg_rating: f64,
    /// Number of entries the profile was learned from.
    pub total_entries: usize,
    /// Positive effects seen on high-rated entries, by occurrence count.
    pub favorite_effects: Ranked<u32>,
    /// Cannabinoids by accumulated `rating × percentage`.
    pub favorite_cannabinoids: Ranked<f64>,
    /// Terpenes by accumulated `rating × percentage`.
    pub favorite_terpenes: Ranked<f64>,
    /// Strain with the highest accumulated rating, if any contributed.
    pub favorite_strain: Option<Strain>,
}

impl PreferenceProfile {
    /// Construct an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report whether no high-rated signal was learned.
    #[must_use]
    pub fn has_no_favorites(&self) -> bool {
        self.favorite_effects.is_empty()
            && self.favorite_cannabinoids.is_empty()
            && self.favorite_terpenes.is_empty()
            && self.favorite_strain.is_none()
    }
}
