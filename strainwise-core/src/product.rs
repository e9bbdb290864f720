//! Catalogued products and their chemical profiles.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Compound percentages keyed by catalogue identifier (`thc`, `limonene`, ...).
///
/// A `BTreeMap` keeps iteration order stable, which the preference learner
/// relies on for first-seen tie-breaking.
pub type CompoundProfile = BTreeMap<String, f64>;

/// Store-assigned identifier of a [`Product`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Genetic lineage category of a product.
///
/// # Examples
/// ```
/// use strainwise_core::Strain;
///
/// assert_eq!("Sativa".parse::<Strain>(), Ok(Strain::Sativa));
/// assert_eq!(Strain::Hybrid.to_string(), "hybrid");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Strain {
    /// Energising lineage.
    Sativa,
    /// Relaxing lineage.
    Indica,
    /// Mixed lineage.
    Hybrid,
}

impl Strain {
    /// Every strain in catalogue order.
    pub const ALL: [Self; 3] = [Self::Sativa, Self::Indica, Self::Hybrid];

    /// Return the lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sativa => "sativa",
            Self::Indica => "indica",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Strain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sativa" => Ok(Self::Sativa),
            "indica" => Ok(Self::Indica),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(format!("unknown strain '{s}'")),
        }
    }
}

/// Physical form of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ProductKind {
    /// Dried flower.
    #[default]
    Flower,
    /// Extracts such as wax or shatter.
    Concentrate,
    /// Vape cartridge.
    Vape,
    /// Infused food.
    Edible,
    /// Liquid extract.
    Tincture,
    /// Lotion or balm.
    Topical,
    /// Pre-rolled joint.
    Preroll,
}

impl ProductKind {
    /// Every kind in catalogue order.
    pub const ALL: [Self; 7] = [
        Self::Flower,
        Self::Concentrate,
        Self::Vape,
        Self::Edible,
        Self::Tincture,
        Self::Topical,
        Self::Preroll,
    ];

    /// Return the lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flower => "flower",
            Self::Concentrate => "concentrate",
            Self::Vape => "vape",
            Self::Edible => "edible",
            Self::Tincture => "tincture",
            Self::Topical => "topical",
            Self::Preroll => "preroll",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| format!("unknown product type '{s}'"))
    }
}

/// Errors returned by [`NewProduct::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// The product name was empty or whitespace.
    #[error("product name must not be empty")]
    EmptyName,
    /// A compound percentage was negative, above 100 or not finite.
    #[error("percentage {value} for {compound} must be between 0 and 100")]
    InvalidPercentage {
        /// Compound identifier.
        compound: String,
        /// Rejected value.
        value: f64,
    },
}

/// One catalogued item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Product {
    /// Store-assigned identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Physical form.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: ProductKind,
    /// Lineage, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub strain: Option<Strain>,
    /// Producer, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub brand: Option<String>,
    /// Cannabinoid percentages.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cannabinoids: CompoundProfile,
    /// Terpene percentages.
    #[cfg_attr(feature = "serde", serde(default))]
    pub terpenes: CompoundProfile,
    /// Free-text notes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: String,
    /// When the product was catalogued.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Percentage of a cannabinoid, or `0.0` when not listed.
    #[must_use]
    pub fn cannabinoid(&self, id: &str) -> f64 {
        self.cannabinoids.get(id).copied().unwrap_or(0.0)
    }

    /// Percentage of a terpene, or `0.0` when not listed.
    #[must_use]
    pub fn terpene(&self, id: &str) -> f64 {
        self.terpenes.get(id).copied().unwrap_or(0.0)
    }

    /// Iterate cannabinoids with a positive percentage, in key order.
    pub fn active_cannabinoids(&self) -> impl Iterator<Item = (&str, f64)> {
        positive(&self.cannabinoids)
    }

    /// Iterate terpenes with a positive percentage, in key order.
    pub fn active_terpenes(&self) -> impl Iterator<Item = (&str, f64)> {
        positive(&self.terpenes)
    }

    /// Check the name and every percentage, as [`NewProduct::validate`] does.
    ///
    /// # Errors
    /// Returns [`ProductError`] for an empty name or a percentage outside
    /// `0.0..=100.0`.
    pub fn validate(&self) -> Result<(), ProductError> {
        check_fields(&self.name, &self.cannabinoids, &self.terpenes)
    }
}

fn positive(profile: &CompoundProfile) -> impl Iterator<Item = (&str, f64)> {
    profile
        .iter()
        .filter(|(_, value)| **value > 0.0)
        .map(|(id, value)| (id.as_str(), *value))
}

/// Draft of a [`Product`] before the store assigns an identifier.
///
/// # Examples
/// ```
/// use strainwise_core::{NewProduct, Strain};
///
/// let draft = NewProduct::named("Lemon Haze")
///     .with_strain(Strain::Sativa)
///     .with_cannabinoid("thc", 21.5)
///     .with_terpene("limonene", 1.2);
/// assert!(draft.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Physical form.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: ProductKind,
    /// Lineage, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub strain: Option<Strain>,
    /// Producer, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub brand: Option<String>,
    /// Cannabinoid percentages.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cannabinoids: CompoundProfile,
    /// Terpene percentages.
    #[cfg_attr(feature = "serde", serde(default))]
    pub terpenes: CompoundProfile,
    /// Free-text notes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: String,
}

impl NewProduct {
    /// Start a draft with the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the lineage.
    #[must_use]
    pub fn with_strain(mut self, strain: Strain) -> Self {
        self.strain = Some(strain);
        self
    }

    /// Set the physical form.
    #[must_use]
    pub fn with_kind(mut self, kind: ProductKind) -> Self {
        self.kind = kind;
        self
    }

    /// Record a cannabinoid percentage.
    #[must_use]
    pub fn with_cannabinoid(mut self, id: impl Into<String>, percent: f64) -> Self {
        self.cannabinoids.insert(id.into(), percent);
        self
    }

    /// Record a terpene percentage.
    #[must_use]
    pub fn with_terpene(mut self, id: impl Into<String>, percent: f64) -> Self {
        self.terpenes.insert(id.into(), percent);
        self
    }

    /// Check the name and every percentage.
    ///
    /// # Errors
    /// Returns [`ProductError`] for an empty name or a percentage outside
    /// `0.0..=100.0`.
    pub fn validate(&self) -> Result<(), ProductError> {
        check_fields(&self.name, &self.cannabinoids, &self.terpenes)
    }

    /// Turn the draft into a stored [`Product`].
    #[must_use]
    pub fn into_product(self, id: ProductId, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            kind: self.kind,
            strain: self.strain,
            brand: self.brand,
            cannabinoids: self.cannabinoids,
            terpenes: self.terpenes,
            notes: self.notes,
            created_at,
        }
    }
}

impl From<Product> for NewProduct {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            kind: product.kind,
            strain: product.strain,
            brand: product.brand,
            cannabinoids: product.cannabinoids,
            terpenes: product.terpenes,
            notes: product.notes,
        }
    }
}

fn check_fields(
    name: &str,
    cannabinoids: &CompoundProfile,
    terpenes: &CompoundProfile,
) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::EmptyName);
    }
    cannabinoids
        .iter()
        .chain(terpenes)
        .try_for_each(|(compound, value)| check_percentage(compound, *value))
}

fn check_percentage(compound: &str, value: f64) -> Result<(), ProductError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ProductError::InvalidPercentage {
            compound: compound.to_owned(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn active_compounds_skip_zero_values() {
        let product = NewProduct::named("Mix")
            .with_cannabinoid("thc", 18.0)
            .with_cannabinoid("cbd", 0.0)
            .into_product(ProductId(1), Utc::now());
        let active: Vec<_> = product.active_cannabinoids().collect();
        assert_eq!(active, vec![("thc", 18.0)]);
        assert!(product.cannabinoid("cbd").abs() < f64::EPSILON);
        assert!(product.cannabinoid("cbn").abs() < f64::EPSILON);
    }

    #[rstest]
    fn validate_rejects_blank_name() {
        assert_eq!(NewProduct::named("  ").validate(), Err(ProductError::EmptyName));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(100.5)]
    #[case(f64::NAN)]
    fn validate_rejects_bad_percentages(#[case] value: f64) {
        let draft = NewProduct::named("Odd").with_terpene("myrcene", value);
        assert!(matches!(
            draft.validate(),
            Err(ProductError::InvalidPercentage { .. })
        ));
    }

    #[rstest]
    fn stored_products_validate_like_drafts() {
        let mut product = NewProduct::named("Fine")
            .with_cannabinoid("thc", 20.0)
            .into_product(ProductId(3), Utc::now());
        assert_eq!(product.validate(), Ok(()));
        product.cannabinoids.insert("thc".to_owned(), -40.0);
        assert!(matches!(
            product.validate(),
            Err(ProductError::InvalidPercentage { .. })
        ));
        product.name.clear();
        assert_eq!(product.validate(), Err(ProductError::EmptyName));
    }

    #[rstest]
    #[case("flower", ProductKind::Flower)]
    #[case("PREROLL", ProductKind::Preroll)]
    fn kind_parses(#[case] raw: &str, #[case] expected: ProductKind) {
        assert_eq!(raw.parse::<ProductKind>(), Ok(expected));
    }

    #[rstest]
    fn strain_rejects_unknown() {
        let err = "ruderalis".parse::<Strain>().unwrap_err();
        assert!(err.contains("unknown strain"));
    }
}
