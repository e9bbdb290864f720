//! Statistics, recommendation and ideal-profile reports.

use std::io::Write;

use serde::Serialize;
use strainwise_core::{JournalStore, PreferenceProfile, Product};
use strainwise_scorer::{
    IdealProfile, Recommendations, Recommender, Statistics, build_ideal_profile,
    compute_statistics_with,
};

use crate::output::write_json;
use crate::{CliError, Journal};

#[derive(Debug, Serialize)]
struct StatsReport<'a> {
    #[serde(flatten)]
    statistics: &'a Statistics,
    most_common_effects: Vec<(&'a str, u32)>,
}

#[derive(Debug, Serialize)]
struct RankedProduct<'a> {
    product: &'a Product,
    score: f64,
    match_percent: f64,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum RecommendReport<'a> {
    NotEnoughData {
        message: &'a str,
        entry_count: usize,
        required: usize,
    },
    Ready {
        recommendations: Vec<RankedProduct<'a>>,
        profile: &'a PreferenceProfile,
        statistics: &'a Statistics,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ProfileReport<'a> {
    NotEnoughData {
        message: &'a str,
        entry_count: usize,
        required: usize,
    },
    Ready {
        profile: &'a PreferenceProfile,
        ideal: IdealProfile,
    },
}

const MOST_COMMON_EFFECTS: usize = 5;

pub(crate) fn stats(journal: &Journal, writer: &mut dyn Write) -> Result<(), CliError> {
    let snapshot = journal.store.snapshot()?;
    let statistics = compute_statistics_with(&snapshot.entries, &snapshot.products, journal.options);
    write_json(
        writer,
        &StatsReport {
            statistics: &statistics,
            most_common_effects: statistics.most_common_effects(MOST_COMMON_EFFECTS),
        },
    )
}

fn recommendations(journal: &Journal) -> Result<Recommendations, CliError> {
    Ok(Recommender::new()
        .with_options(journal.options)
        .recommend_from_store(&journal.store)?)
}

pub(crate) fn recommend(journal: &Journal, writer: &mut dyn Write) -> Result<(), CliError> {
    let outcome = recommendations(journal)?;
    let report = match &outcome {
        Recommendations::NotEnoughData {
            message,
            entry_count,
            required,
        } => RecommendReport::NotEnoughData {
            message,
            entry_count: *entry_count,
            required: *required,
        },
        Recommendations::Ready(ready) => RecommendReport::Ready {
            recommendations: ready
                .recommendations
                .iter()
                .map(|recommendation| RankedProduct {
                    product: &recommendation.product,
                    score: recommendation.score,
                    match_percent: recommendation.match_percent(),
                })
                .collect(),
            profile: &ready.profile,
            statistics: &ready.statistics,
        },
    };
    write_json(writer, &report)
}

pub(crate) fn profile(journal: &Journal, writer: &mut dyn Write) -> Result<(), CliError> {
    let outcome = recommendations(journal)?;
    let report = match &outcome {
        Recommendations::NotEnoughData {
            message,
            entry_count,
            required,
        } => ProfileReport::NotEnoughData {
            message,
            entry_count: *entry_count,
            required: *required,
        },
        Recommendations::Ready(ready) => ProfileReport::Ready {
            profile: &ready.profile,
            ideal: build_ideal_profile(&ready.profile),
        },
    };
    write_json(writer, &report)
}
