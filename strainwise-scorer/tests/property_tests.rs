//! Property-based tests for the recommendation engine.
//!
//! # Invariants tested
//!
//! - **Data gate:** fewer than three entries never yields recommendations.
//! - **Score validity:** scores are finite, non-negative and sorted.
//! - **Monotonicity:** raising a tried product's ratings or adding a
//!   favourite compound never lowers its score.
//! - **Tie stability:** equal scores keep catalogue order.
//! - **High-rated only:** entries rated 3 or lower leave favourites alone.

use proptest::prelude::*;
use strainwise_core::test_support::{entry, product};
use strainwise_core::{Entry, NewProduct, PreferenceProfile, Product, Ranked, Scorer, Strain};
use strainwise_scorer::{
    AffinityScorer, MIN_ENTRIES, RECOMMENDATION_LIMIT, compute_recommendations, learn_preferences,
};

const CANNABINOIDS: &[&str] = &["thc", "cbd", "cbn", "cbg"];
const TERPENES: &[&str] = &["myrcene", "limonene", "pinene", "linalool"];
const EFFECTS: &[&str] = &["relaxed", "happy", "focused", "sleepy", "anxious"];

fn strain_strategy() -> impl Strategy<Value = Option<Strain>> {
    prop_oneof![
        Just(None),
        Just(Some(Strain::Sativa)),
        Just(Some(Strain::Indica)),
        Just(Some(Strain::Hybrid)),
    ]
}

fn compounds_strategy(ids: &'static [&'static str]) -> impl Strategy<Value = Vec<(String, f64)>> {
    prop::collection::vec((prop::sample::select(ids), 0.0_f64..30.0), 0..=3).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(id, percent)| (id.to_owned(), percent))
            .collect()
    })
}

fn draft_strategy() -> impl Strategy<Value = NewProduct> {
    (
        strain_strategy(),
        compounds_strategy(CANNABINOIDS),
        compounds_strategy(TERPENES),
    )
        .prop_map(|(strain, cannabinoids, terpenes)| NewProduct {
            strain,
            cannabinoids: cannabinoids.into_iter().collect(),
            terpenes: terpenes.into_iter().collect(),
            ..NewProduct::named("Generated")
        })
}

fn catalogue_strategy() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(draft_strategy(), 1..8).prop_map(|drafts| {
        drafts
            .into_iter()
            .zip(1_u64..)
            .map(|(draft, id)| product(id, draft))
            .collect()
    })
}

/// Entries as `(product id, rating, effect index)`; product ids may dangle.
fn history_strategy(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec((1_u64..10, 0_u8..=5, 0..EFFECTS.len()), len).prop_map(|rows| {
        rows.into_iter()
            .zip(1_u64..)
            .map(|((product_id, rating, effect), id)| {
                let effects: Vec<&str> = EFFECTS.get(effect).into_iter().copied().collect();
                entry(id, product_id, rating, &effects)
            })
            .collect()
    })
}

fn fixed_profile() -> PreferenceProfile {
    PreferenceProfile {
        favorite_cannabinoids: Ranked::top(vec![("thc".to_owned(), 120.0)], 3),
        favorite_terpenes: Ranked::top(vec![("myrcene".to_owned(), 8.0)], 5),
        favorite_strain: Some(Strain::Hybrid),
        ..PreferenceProfile::new()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: short histories are answered with guidance only.
    #[test]
    fn short_history_never_recommends(
        catalogue in catalogue_strategy(),
        history in history_strategy(0..MIN_ENTRIES),
    ) {
        let outcome = compute_recommendations(&history, &catalogue);
        prop_assert!(!outcome.is_ready());
        prop_assert!(outcome.recommendations().is_empty());
        prop_assert!(outcome.message().is_some());
    }

    /// Property: scores are finite, non-negative and descending.
    #[test]
    fn recommendations_are_valid_and_sorted(
        catalogue in catalogue_strategy(),
        history in history_strategy(MIN_ENTRIES..20),
    ) {
        let outcome = compute_recommendations(&history, &catalogue);
        let recommendations = outcome.recommendations();
        prop_assert!(outcome.is_ready());
        prop_assert_eq!(recommendations.len(), catalogue.len().min(RECOMMENDATION_LIMIT));
        for recommendation in recommendations {
            prop_assert!(recommendation.score.is_finite());
            prop_assert!(recommendation.score >= 0.0);
        }
        for pair in recommendations.windows(2) {
            if let [left, right] = pair {
                prop_assert!(left.score >= right.score);
            }
        }
    }

    /// Property: raising one past rating of a tried product never lowers it.
    #[test]
    fn higher_ratings_never_lower_the_score(
        draft in draft_strategy(),
        ratings in prop::collection::vec(1_u8..=5, 1..6),
        bumped in any::<prop::sample::Index>(),
    ) {
        let candidate = product(1, draft);
        let before: Vec<_> = ratings
            .iter()
            .zip(1_u64..)
            .map(|(rating, id)| entry(id, 1, *rating, &[]))
            .collect();
        let target = bumped.index(ratings.len());
        let after: Vec<_> = ratings
            .iter()
            .zip(1_u64..)
            .enumerate()
            .map(|(position, (rating, id))| {
                let rating = if position == target { 5 } else { *rating };
                entry(id, 1, rating, &[])
            })
            .collect();

        let scorer = AffinityScorer::new();
        let profile = fixed_profile();
        let low = scorer.score(&candidate, &profile, &before);
        let high = scorer.score(&candidate, &profile, &after);
        prop_assert!(high >= low);
    }

    /// Property: adding a favourite compound never lowers a product's score.
    #[test]
    fn favourite_compounds_never_lower_the_score(
        draft in draft_strategy(),
        thc in 0.1_f64..30.0,
        myrcene in 0.1_f64..5.0,
    ) {
        let scorer = AffinityScorer::new();
        let profile = fixed_profile();
        let plain = product(1, draft.clone());
        let enriched = product(
            1,
            draft.with_cannabinoid("thc", thc).with_terpene("myrcene", myrcene),
        );
        prop_assert!(
            scorer.score(&enriched, &profile, &[]) >= scorer.score(&plain, &profile, &[])
        );
    }

    /// Property: identical products are recommended in catalogue order.
    #[test]
    fn ties_keep_catalogue_order(
        draft in draft_strategy(),
        copies in 2_u64..6,
        history in history_strategy(MIN_ENTRIES..10),
    ) {
        // Entries point at ids beyond the catalogue so no product is "tried".
        let history: Vec<_> = history
            .into_iter()
            .map(|entry| Entry { product_id: strainwise_core::ProductId(100), ..entry })
            .collect();
        let catalogue: Vec<_> = (1..=copies).map(|id| product(id, draft.clone())).collect();
        let outcome = compute_recommendations(&history, &catalogue);
        let ids: Vec<_> = outcome.recommendations().iter().map(|r| r.product.id.0).collect();
        let expected: Vec<_> = (1..=copies).take(RECOMMENDATION_LIMIT).collect();
        prop_assert_eq!(ids, expected);
    }

    /// Property: entries rated 3 or lower never change the favourites.
    #[test]
    fn low_ratings_leave_favourites_alone(
        catalogue in catalogue_strategy(),
        history in history_strategy(0..12),
        extra in prop::collection::vec((1_u64..10, 0_u8..=3), 1..6),
    ) {
        let baseline = learn_preferences(&history, &catalogue);
        let mut extended = history.clone();
        extended.extend(extra.into_iter().zip(1000_u64..).map(|((product_id, rating), id)| {
            entry(id, product_id, rating, &["happy"])
        }));
        let learned = learn_preferences(&extended, &catalogue);

        prop_assert_eq!(learned.favorite_effects, baseline.favorite_effects);
        prop_assert_eq!(learned.favorite_cannabinoids, baseline.favorite_cannabinoids);
        prop_assert_eq!(learned.favorite_terpenes, baseline.favorite_terpenes);
        prop_assert_eq!(learned.favorite_strain, baseline.favorite_strain);
    }
}
