//! Engine-wide switches shared by the aggregator, learner and scorer.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use strainwise_core::Entry;

/// How entries without a rating take part in averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnratedPolicy {
    /// An unrated entry adds `0` to rating sums and `1` to counts.
    #[default]
    CountAsZero,
    /// Unrated entries are left out of every average.
    Skip,
}

/// Options applied across one engine invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Treatment of unrated entries.
    pub unrated: UnratedPolicy,
}

impl EngineOptions {
    /// Options that leave unrated entries out of averages.
    #[must_use]
    pub const fn skipping_unrated() -> Self {
        Self {
            unrated: UnratedPolicy::Skip,
        }
    }

    /// Report whether `entry` takes part in rating averages.
    #[must_use]
    pub const fn rates(self, entry: &Entry) -> bool {
        match self.unrated {
            UnratedPolicy::CountAsZero => true,
            UnratedPolicy::Skip => entry.rating.is_some(),
        }
    }
}
