//! Score products against a preference profile.
//!
//! The `Scorer` trait assigns an affinity score to a
//! [`Product`](crate::Product) given a user's
//! [`PreferenceProfile`](crate::PreferenceProfile) and journal history.

use crate::{Entry, PreferenceProfile, Product};

/// Calculate an affinity score for a product.
///
/// Higher scores indicate a better predicted fit. Implementations must be
/// thread-safe (`Send` + `Sync`) and infallible; they return `0.0` when no
/// signal applies.
///
/// Implementations must:
/// - Produce finite (`f64::is_finite`) scores.
/// - Return non-negative values.
///
/// Scores carry no upper bound. Use [`Scorer::sanitise`] to apply these
/// guards.
///
/// # Examples
///
/// ```rust
/// use strainwise_core::{Entry, PreferenceProfile, Product, Scorer};
///
/// struct StrainOnly;
///
/// impl Scorer for StrainOnly {
///     fn score(&self, product: &Product, profile: &PreferenceProfile, _: &[Entry]) -> f64 {
///         if product.strain.is_some() && product.strain == profile.favorite_strain {
///             1.0
///         } else {
///             0.0
///         }
///     }
/// }
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `product` according to `profile` and `history`.
    fn score(&self, product: &Product, profile: &PreferenceProfile, history: &[Entry]) -> f64;

    /// Validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and floors negatives at `0.0`.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Constant;

    impl Scorer for Constant {
        fn score(&self, _: &Product, _: &PreferenceProfile, _: &[Entry]) -> f64 {
            1.0
        }
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    #[case(-3.0, 0.0)]
    #[case(72.5, 72.5)]
    fn sanitise_filters_and_floors(#[case] raw: f64, #[case] expected: f64) {
        assert!((Constant::sanitise(raw) - expected).abs() < f64::EPSILON);
    }
}
