//! Resolve a preference profile into display-ready catalogue records.
#![forbid(unsafe_code)]

use serde::Serialize;
use strainwise_core::PreferenceProfile;
use strainwise_core::catalog::{self, CannabinoidInfo, EffectInfo, StrainInfo, TerpeneInfo};

/// Catalogue records for a user's favourites, in ranking order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct IdealProfile {
    /// Favourite cannabinoids.
    pub cannabinoids: Vec<&'static CannabinoidInfo>,
    /// Favourite terpenes.
    pub terpenes: Vec<&'static TerpeneInfo>,
    /// Favourite effects.
    pub effects: Vec<&'static EffectInfo>,
    /// Favourite strain.
    pub strain: Option<&'static StrainInfo>,
}

impl IdealProfile {
    /// Report whether nothing resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cannabinoids.is_empty()
            && self.terpenes.is_empty()
            && self.effects.is_empty()
            && self.strain.is_none()
    }
}

/// Map each favourite onto its catalogue record.
///
/// Identifiers the catalogue does not know are dropped.
///
/// # Examples
/// ```
/// use strainwise_core::{PreferenceProfile, Ranked, Strain};
/// use strainwise_scorer::build_ideal_profile;
///
/// let profile = PreferenceProfile {
///     favorite_terpenes: Ranked::top(vec![("myrcene".to_owned(), 4.0)], 5),
///     favorite_strain: Some(Strain::Indica),
///     ..PreferenceProfile::new()
/// };
/// let ideal = build_ideal_profile(&profile);
/// assert_eq!(ideal.terpenes[0].name, "Myrcene");
/// assert_eq!(ideal.strain.map(|s| s.name), Some("Indica"));
/// ```
#[must_use]
pub fn build_ideal_profile(profile: &PreferenceProfile) -> IdealProfile {
    IdealProfile {
        cannabinoids: profile
            .favorite_cannabinoids
            .ids()
            .filter_map(catalog::cannabinoid)
            .collect(),
        terpenes: profile
            .favorite_terpenes
            .ids()
            .filter_map(catalog::terpene)
            .collect(),
        effects: profile
            .favorite_effects
            .ids()
            .filter_map(catalog::effect)
            .collect(),
        strain: profile.favorite_strain.and_then(catalog::strain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strainwise_core::{Ranked, Strain};

    #[rstest]
    fn ranking_order_is_preserved() {
        let profile = PreferenceProfile {
            favorite_cannabinoids: Ranked::top(
                vec![("cbd".to_owned(), 10.0), ("thc".to_owned(), 90.0)],
                3,
            ),
            favorite_effects: Ranked::top(
                vec![("happy".to_owned(), 1), ("relaxed".to_owned(), 4)],
                5,
            ),
            ..PreferenceProfile::new()
        };
        let ideal = build_ideal_profile(&profile);
        let cannabinoids: Vec<_> = ideal.cannabinoids.iter().map(|c| c.id).collect();
        assert_eq!(cannabinoids, vec!["thc", "cbd"]);
        let effects: Vec<_> = ideal.effects.iter().map(|e| e.id).collect();
        assert_eq!(effects, vec!["relaxed", "happy"]);
    }

    #[rstest]
    fn unknown_identifiers_are_dropped() {
        let profile = PreferenceProfile {
            favorite_terpenes: Ranked::top(
                vec![("unobtainium".to_owned(), 9.0), ("pinene".to_owned(), 2.0)],
                5,
            ),
            ..PreferenceProfile::new()
        };
        let ideal = build_ideal_profile(&profile);
        let terpenes: Vec<_> = ideal.terpenes.iter().map(|t| t.id).collect();
        assert_eq!(terpenes, vec!["pinene"]);
    }

    #[rstest]
    #[case(Some(Strain::Hybrid), Some("Hybrid"))]
    #[case(None, None)]
    fn strain_resolves_or_is_absent(#[case] strain: Option<Strain>, #[case] name: Option<&str>) {
        let profile = PreferenceProfile {
            favorite_strain: strain,
            ..PreferenceProfile::new()
        };
        assert_eq!(build_ideal_profile(&profile).strain.map(|s| s.name), name);
    }

    #[rstest]
    fn empty_profile_resolves_to_nothing() {
        assert!(build_ideal_profile(&PreferenceProfile::new()).is_empty());
    }
}
