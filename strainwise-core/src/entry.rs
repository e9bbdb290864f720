//! Journal entries: one logged experience with a catalogued product.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ProductId;

/// Store-assigned identifier of an [`Entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors returned by [`Rating::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    /// The value fell outside `1..=5`.
    #[error("rating {value} must be between {min} and {max}", min = Rating::MIN, max = Rating::MAX)]
    OutOfRange {
        /// Rejected value.
        value: u8,
    },
}

/// A subjective score in the inclusive range `1..=5`.
///
/// # Examples
/// ```
/// use strainwise_core::Rating;
///
/// let rating = Rating::new(4).expect("4 is a valid rating");
/// assert_eq!(rating.get(), 4);
/// assert!(rating.is_high());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;
    /// Ratings at or above this value feed preference learning.
    pub const HIGH_THRESHOLD: u8 = 4;

    /// Validate and construct a [`Rating`].
    ///
    /// # Errors
    /// Returns [`RatingError::OutOfRange`] for `0` or values above `5`.
    pub const fn new(value: u8) -> Result<Self, RatingError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(RatingError::OutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Return the raw value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Report whether the rating counts as high-rated.
    #[must_use]
    pub const fn is_high(self) -> bool {
        self.0 >= Self::HIGH_THRESHOLD
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// How a product was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ConsumptionMethod {
    /// Combustion.
    Smoking,
    /// Vaporisation.
    Vaping,
    /// Eaten.
    Edible,
    /// Held under the tongue.
    Sublingual,
    /// Applied to skin.
    Topical,
    /// Flash-vaporised concentrate.
    Dabbing,
}

impl ConsumptionMethod {
    /// Every method in catalogue order.
    pub const ALL: [Self; 6] = [
        Self::Smoking,
        Self::Vaping,
        Self::Edible,
        Self::Sublingual,
        Self::Topical,
        Self::Dabbing,
    ];

    /// Return the identifier used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smoking => "smoking",
            Self::Vaping => "vaping",
            Self::Edible => "edible",
            Self::Sublingual => "sublingual",
            Self::Topical => "topical",
            Self::Dabbing => "dabbing",
        }
    }
}

impl fmt::Display for ConsumptionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsumptionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == wanted)
            .ok_or_else(|| format!("unknown consumption method '{s}'"))
    }
}

/// One logged experience.
///
/// `product_id` may point at a product that no longer exists; consumers
/// treat such entries as dangling and skip them for compound aggregation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entry {
    /// Store-assigned identifier.
    pub id: EntryId,
    /// Product the experience was logged against.
    pub product_id: ProductId,
    /// When the experience happened.
    pub logged_at: DateTime<Utc>,
    /// Optional rating; unrated entries contribute `0` to rating sums.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: Option<Rating>,
    /// Effect identifiers from the catalogue, in the order they were picked.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<String>,
    /// Consumption method, when recorded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub method: Option<ConsumptionMethod>,
    /// Free-text dosage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dosage: String,
    /// Free-text notes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: String,
}

impl Entry {
    /// Return the rating as a number, treating an absent rating as `0`.
    #[must_use]
    pub fn rating_value(&self) -> u32 {
        self.rating.map_or(0, |rating| u32::from(rating.get()))
    }

    /// Report whether the entry is rated at or above the high threshold.
    #[must_use]
    pub fn is_high_rated(&self) -> bool {
        self.rating.is_some_and(Rating::is_high)
    }
}

/// Draft of an [`Entry`] before the store assigns an identifier.
///
/// # Examples
/// ```
/// use strainwise_core::{NewEntry, ProductId, Rating};
///
/// let draft = NewEntry::new(ProductId(1))
///     .with_rating(Rating::new(5).expect("valid"))
///     .with_effect("uplifted");
/// assert_eq!(draft.effects, vec!["uplifted".to_owned()]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NewEntry {
    /// Product the experience was logged against.
    pub product_id: ProductId,
    /// When the experience happened; the store stamps the current time when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub logged_at: Option<DateTime<Utc>>,
    /// Optional rating.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: Option<Rating>,
    /// Effect identifiers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<String>,
    /// Consumption method.
    #[cfg_attr(feature = "serde", serde(default))]
    pub method: Option<ConsumptionMethod>,
    /// Free-text dosage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dosage: String,
    /// Free-text notes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: String,
}

impl NewEntry {
    /// Start a draft for `product_id` with every optional field empty.
    #[must_use]
    pub const fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            logged_at: None,
            rating: None,
            effects: Vec::new(),
            method: None,
            dosage: String::new(),
            notes: String::new(),
        }
    }

    /// Set the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Append an effect identifier.
    #[must_use]
    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effects.push(effect.into());
        self
    }

    /// Set the timestamp explicitly.
    #[must_use]
    pub fn logged_at(mut self, at: DateTime<Utc>) -> Self {
        self.logged_at = Some(at);
        self
    }

    /// Turn the draft into a stored [`Entry`] with the given identifier.
    ///
    /// `now` is used when the draft carries no timestamp.
    #[must_use]
    pub fn into_entry(self, id: EntryId, now: DateTime<Utc>) -> Entry {
        Entry {
            id,
            product_id: self.product_id,
            logged_at: self.logged_at.unwrap_or(now),
            rating: self.rating,
            effects: self.effects,
            method: self.method,
            dosage: self.dosage,
            notes: self.notes,
        }
    }
}

impl From<Entry> for NewEntry {
    fn from(entry: Entry) -> Self {
        Self {
            product_id: entry.product_id,
            logged_at: Some(entry.logged_at),
            rating: entry.rating,
            effects: entry.effects,
            method: entry.method,
            dosage: entry.dosage,
            notes: entry.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(u8::MAX)]
    fn rating_rejects_out_of_range(#[case] value: u8) {
        assert_eq!(Rating::new(value), Err(RatingError::OutOfRange { value }));
    }

    #[rstest]
    #[case(1, false)]
    #[case(3, false)]
    #[case(4, true)]
    #[case(5, true)]
    fn high_threshold_starts_at_four(#[case] value: u8, #[case] high: bool) {
        let rating = Rating::new(value).expect("valid rating");
        assert_eq!(rating.is_high(), high);
    }

    #[rstest]
    fn unrated_entry_contributes_zero() {
        let entry = NewEntry::new(ProductId(1)).into_entry(EntryId(1), Utc::now());
        assert_eq!(entry.rating_value(), 0);
        assert!(!entry.is_high_rated());
    }

    #[rstest]
    fn draft_keeps_explicit_timestamp() {
        let at = DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
        let entry = NewEntry::new(ProductId(2))
            .logged_at(at)
            .into_entry(EntryId(9), Utc::now());
        assert_eq!(entry.logged_at, at);
        assert_eq!(entry.id, EntryId(9));
    }

    #[rstest]
    #[case("smoking", ConsumptionMethod::Smoking)]
    #[case(" Dabbing ", ConsumptionMethod::Dabbing)]
    fn method_parses_case_insensitively(#[case] raw: &str, #[case] expected: ConsumptionMethod) {
        assert_eq!(raw.parse::<ConsumptionMethod>(), Ok(expected));
    }

    #[rstest]
    fn method_rejects_unknown() {
        let err = "injection".parse::<ConsumptionMethod>().unwrap_err();
        assert!(err.contains("unknown consumption method"));
    }
}
