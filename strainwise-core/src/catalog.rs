//! Fixed reference tables for effects, compounds, strains and product forms.
//!
//! The tables are versionless. Lookups return `None` for identifiers the
//! catalogue does not know so callers can drop them quietly.
//!
//! # Examples
//! ```
//! use strainwise_core::catalog;
//!
//! assert_eq!(catalog::terpene("limonene").map(|t| t.aroma), Some("Citrus, lemon"));
//! assert!(catalog::is_positive_effect("uplifted"));
//! assert!(!catalog::is_positive_effect("paranoid"));
//! ```

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{ConsumptionMethod, ProductKind, Strain};

/// Broad valence of an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum EffectCategory {
    /// Desirable effect.
    Positive,
    /// Neither desirable nor undesirable.
    Neutral,
    /// Side effect.
    Negative,
}

/// Display metadata for an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EffectInfo {
    /// Stored identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Valence.
    pub category: EffectCategory,
    /// Emoji shown beside the name.
    pub icon: &'static str,
}

/// Display metadata for a cannabinoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CannabinoidInfo {
    /// Stored identifier.
    pub id: &'static str,
    /// Short name.
    pub name: &'static str,
    /// Chemical name.
    pub full_name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// Display metadata for a terpene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TerpeneInfo {
    /// Stored identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Aroma notes.
    pub aroma: &'static str,
    /// Commonly associated effects.
    pub effects: &'static [&'static str],
}

/// Display metadata for a strain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StrainInfo {
    /// Lineage.
    pub strain: Strain,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Hex colour used by renderers.
    pub color: &'static str,
}

/// Display metadata for a product form or consumption method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LabelInfo<T: 'static> {
    /// Typed identifier.
    pub id: T,
    /// Display name.
    pub name: &'static str,
    /// Emoji shown beside the name.
    pub icon: &'static str,
}

/// Known cannabinoids.
pub const CANNABINOIDS: &[CannabinoidInfo] = &[
    CannabinoidInfo {
        id: "thc",
        name: "THC",
        full_name: "Delta-9-tetrahydrocannabinol",
        description: "Primary psychoactive compound",
    },
    CannabinoidInfo {
        id: "cbd",
        name: "CBD",
        full_name: "Cannabidiol",
        description: "Non-psychoactive, therapeutic",
    },
    CannabinoidInfo {
        id: "cbn",
        name: "CBN",
        full_name: "Cannabinol",
        description: "Mildly psychoactive, sedating",
    },
    CannabinoidInfo {
        id: "cbg",
        name: "CBG",
        full_name: "Cannabigerol",
        description: "Non-psychoactive, antibacterial",
    },
    CannabinoidInfo {
        id: "thcv",
        name: "THCV",
        full_name: "Tetrahydrocannabivarin",
        description: "Appetite suppressant",
    },
    CannabinoidInfo {
        id: "cbc",
        name: "CBC",
        full_name: "Cannabichromene",
        description: "Anti-inflammatory",
    },
];

/// Known terpenes.
pub const TERPENES: &[TerpeneInfo] = &[
    TerpeneInfo {
        id: "myrcene",
        name: "Myrcene",
        aroma: "Earthy, musky, herbal",
        effects: &["Relaxing", "Sedating"],
    },
    TerpeneInfo {
        id: "limonene",
        name: "Limonene",
        aroma: "Citrus, lemon",
        effects: &["Uplifting", "Stress relief"],
    },
    TerpeneInfo {
        id: "caryophyllene",
        name: "Caryophyllene",
        aroma: "Spicy, peppery",
        effects: &["Anti-inflammatory", "Pain relief"],
    },
    TerpeneInfo {
        id: "pinene",
        name: "Pinene",
        aroma: "Pine, fresh",
        effects: &["Alertness", "Memory retention"],
    },
    TerpeneInfo {
        id: "linalool",
        name: "Linalool",
        aroma: "Floral, lavender",
        effects: &["Calming", "Anti-anxiety"],
    },
    TerpeneInfo {
        id: "humulene",
        name: "Humulene",
        aroma: "Earthy, woody",
        effects: &["Appetite suppressant", "Anti-inflammatory"],
    },
    TerpeneInfo {
        id: "terpinolene",
        name: "Terpinolene",
        aroma: "Floral, herbal",
        effects: &["Uplifting", "Sedating"],
    },
    TerpeneInfo {
        id: "ocimene",
        name: "Ocimene",
        aroma: "Sweet, herbal",
        effects: &["Energizing", "Anti-inflammatory"],
    },
];

const fn effect_info(
    id: &'static str,
    name: &'static str,
    category: EffectCategory,
    icon: &'static str,
) -> EffectInfo {
    EffectInfo {
        id,
        name,
        category,
        icon,
    }
}

/// Known effects.
pub const EFFECTS: &[EffectInfo] = &[
    effect_info("relaxed", "Relaxed", EffectCategory::Positive, "😌"),
    effect_info("euphoric", "Euphoric", EffectCategory::Positive, "😊"),
    effect_info("happy", "Happy", EffectCategory::Positive, "😄"),
    effect_info("uplifted", "Uplifted", EffectCategory::Positive, "🚀"),
    effect_info("energetic", "Energetic", EffectCategory::Positive, "⚡"),
    effect_info("focused", "Focused", EffectCategory::Positive, "🎯"),
    effect_info("creative", "Creative", EffectCategory::Positive, "🎨"),
    effect_info("sleepy", "Sleepy", EffectCategory::Neutral, "😴"),
    effect_info("hungry", "Hungry", EffectCategory::Neutral, "🍕"),
    effect_info("talkative", "Talkative", EffectCategory::Positive, "💬"),
    effect_info("giggly", "Giggly", EffectCategory::Positive, "😂"),
    effect_info("anxious", "Anxious", EffectCategory::Negative, "😰"),
    effect_info("paranoid", "Paranoid", EffectCategory::Negative, "😨"),
    effect_info("dry_mouth", "Dry Mouth", EffectCategory::Negative, "👄"),
    effect_info("dry_eyes", "Dry Eyes", EffectCategory::Negative, "👁️"),
    effect_info("dizzy", "Dizzy", EffectCategory::Negative, "😵"),
];

/// Known strains.
pub const STRAINS: &[StrainInfo] = &[
    StrainInfo {
        strain: Strain::Sativa,
        name: "Sativa",
        description: "Energizing, uplifting",
        color: "#f59e0b",
    },
    StrainInfo {
        strain: Strain::Indica,
        name: "Indica",
        description: "Relaxing, sedating",
        color: "#8b5cf6",
    },
    StrainInfo {
        strain: Strain::Hybrid,
        name: "Hybrid",
        description: "Balanced effects",
        color: "#10b981",
    },
];

/// Known product forms.
pub const PRODUCT_KINDS: &[LabelInfo<ProductKind>] = &[
    LabelInfo { id: ProductKind::Flower, name: "Flower", icon: "🌿" },
    LabelInfo { id: ProductKind::Concentrate, name: "Concentrate", icon: "💎" },
    LabelInfo { id: ProductKind::Vape, name: "Vape", icon: "💨" },
    LabelInfo { id: ProductKind::Edible, name: "Edible", icon: "🍫" },
    LabelInfo { id: ProductKind::Tincture, name: "Tincture", icon: "💧" },
    LabelInfo { id: ProductKind::Topical, name: "Topical", icon: "🧴" },
    LabelInfo { id: ProductKind::Preroll, name: "Pre-roll", icon: "🚬" },
];

/// Known consumption methods.
pub const CONSUMPTION_METHODS: &[LabelInfo<ConsumptionMethod>] = &[
    LabelInfo { id: ConsumptionMethod::Smoking, name: "Smoking", icon: "🔥" },
    LabelInfo { id: ConsumptionMethod::Vaping, name: "Vaping", icon: "💨" },
    LabelInfo { id: ConsumptionMethod::Edible, name: "Edible", icon: "🍴" },
    LabelInfo { id: ConsumptionMethod::Sublingual, name: "Sublingual", icon: "💧" },
    LabelInfo { id: ConsumptionMethod::Topical, name: "Topical", icon: "🧴" },
    LabelInfo { id: ConsumptionMethod::Dabbing, name: "Dabbing", icon: "💎" },
];

/// Look up an effect by identifier.
#[must_use]
pub fn effect(id: &str) -> Option<&'static EffectInfo> {
    EFFECTS.iter().find(|info| info.id == id)
}

/// Look up a cannabinoid by identifier.
#[must_use]
pub fn cannabinoid(id: &str) -> Option<&'static CannabinoidInfo> {
    CANNABINOIDS.iter().find(|info| info.id == id)
}

/// Look up a terpene by identifier.
#[must_use]
pub fn terpene(id: &str) -> Option<&'static TerpeneInfo> {
    TERPENES.iter().find(|info| info.id == id)
}

/// Look up strain display metadata.
#[must_use]
pub fn strain(strain: Strain) -> Option<&'static StrainInfo> {
    STRAINS.iter().find(|info| info.strain == strain)
}

/// Look up product-form display metadata.
#[must_use]
pub fn product_kind(kind: ProductKind) -> Option<&'static LabelInfo<ProductKind>> {
    PRODUCT_KINDS.iter().find(|info| info.id == kind)
}

/// Look up consumption-method display metadata.
#[must_use]
pub fn consumption_method(
    method: ConsumptionMethod,
) -> Option<&'static LabelInfo<ConsumptionMethod>> {
    CONSUMPTION_METHODS.iter().find(|info| info.id == method)
}

/// Report whether `id` names an effect in the positive category.
///
/// Unknown identifiers are not positive.
#[must_use]
pub fn is_positive_effect(id: &str) -> bool {
    effect(id).is_some_and(|info| info.category == EffectCategory::Positive)
}
