#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for the recommendation pipeline.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use strainwise_core::test_support::{MemoryStore, entry, product};
use strainwise_core::{Entry, NewProduct, Product, Strain};
use strainwise_scorer::{Recommendations, Recommender};

/// Aggregate fixtures shared across the BDD scenarios.
pub struct TestContext {
    products: RefCell<Vec<Product>>,
    entries: RefCell<Vec<Entry>>,
    outcome: RefCell<Option<Recommendations>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        products: RefCell::new(Vec::new()),
        entries: RefCell::new(Vec::new()),
        outcome: RefCell::new(None),
    }
}

#[given("a catalogue with a sativa and an indica")]
fn sativa_and_indica(context: &TestContext) {
    *context.products.borrow_mut() = vec![
        product(
            1,
            NewProduct::named("Super Lemon Haze")
                .with_strain(Strain::Sativa)
                .with_cannabinoid("thc", 20.0)
                .with_terpene("limonene", 1.0),
        ),
        product(
            2,
            NewProduct::named("Purple Kush")
                .with_strain(Strain::Indica)
                .with_cannabinoid("cbd", 15.0),
        ),
    ];
}

#[given("a catalogue of three plain products")]
fn three_plain_products(context: &TestContext) {
    *context.products.borrow_mut() = ["First", "Second", "Third"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| product(id, NewProduct::named(name)))
        .collect();
}

#[given("2 entries rating the sativa highly")]
fn two_sativa_entries(context: &TestContext) {
    log_entries(context, 2, 1);
}

#[given("3 entries rating the sativa highly")]
fn three_sativa_entries(context: &TestContext) {
    log_entries(context, 3, 1);
}

#[given("3 entries on a deleted product")]
fn three_dangling_entries(context: &TestContext) {
    log_entries(context, 3, 404);
}

#[when("I ask for recommendations")]
fn ask_for_recommendations(context: &TestContext) {
    let store = MemoryStore::with_records(
        context.products.borrow().clone(),
        context.entries.borrow().clone(),
    );
    let outcome = Recommender::new()
        .recommend_from_store(&store)
        .expect("memory store reads");
    *context.outcome.borrow_mut() = Some(outcome);
}

#[then("I am told to keep logging")]
fn told_to_keep_logging(context: &TestContext) {
    let outcome = context.outcome.borrow();
    let message = outcome
        .as_ref()
        .and_then(Recommendations::message)
        .expect("guidance message");
    assert!(message.starts_with("Keep logging your experiences!"));
}

#[then("no products are recommended")]
fn nothing_recommended(context: &TestContext) {
    let outcome = context.outcome.borrow();
    let outcome = outcome.as_ref().expect("recommendations requested");
    assert!(outcome.recommendations().is_empty());
}

#[then("the favourite strain is sativa")]
fn favourite_strain_is_sativa(context: &TestContext) {
    let outcome = context.outcome.borrow();
    let report = outcome
        .as_ref()
        .and_then(Recommendations::report)
        .expect("ready report");
    assert_eq!(report.profile.favorite_strain, Some(Strain::Sativa));
}

#[then("the sativa is recommended first")]
fn sativa_first(context: &TestContext) {
    assert_eq!(
        recommended_names(context).first().map(String::as_str),
        Some("Super Lemon Haze")
    );
}

#[then("the products are recommended in catalogue order")]
fn catalogue_order(context: &TestContext) {
    assert_eq!(recommended_names(context), vec!["First", "Second", "Third"]);
}

fn log_entries(context: &TestContext, count: u64, product_id: u64) {
    let mut entries = context.entries.borrow_mut();
    for id in 1..=count {
        entries.push(entry(id, product_id, 5, &["uplifted"]));
    }
}

fn recommended_names(context: &TestContext) -> Vec<String> {
    let outcome = context.outcome.borrow();
    outcome
        .as_ref()
        .expect("recommendations requested")
        .recommendations()
        .iter()
        .map(|r| r.product.name.clone())
        .collect()
}

#[scenario(path = "tests/features/recommendations.feature", index = 0)]
fn short_journal_is_not_enough(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendations.feature", index = 1)]
fn sativa_fan_gets_sativa(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/recommendations.feature", index = 2)]
fn ties_keep_catalogue_order(context: TestContext) {
    let _ = context;
}
