//! Synthetic GDP estimate.
//!
//! `population * multiplier / exchange_rate`, where the multiplier is a
//! uniform random integer in `[1000, 2000]`. The figure is illustrative only.

use crate::constants::{GDP_MULTIPLIER_MAX, GDP_MULTIPLIER_MIN};
use crate::countries::gdp_allowed;
use rand::Rng;

pub fn random_multiplier() -> u32 {
    rand::thread_rng().gen_range(GDP_MULTIPLIER_MIN..=GDP_MULTIPLIER_MAX)
}

/// Returns `None` when the estimate is not defined for these inputs.
/// The result is rounded to two decimals.
pub fn estimate_gdp(population: i64, exchange_rate: Option<f64>, multiplier: u32) -> Option<f64> {
    if !gdp_allowed(population, exchange_rate) {
        return None;
    }
    let rate = exchange_rate?;
    let raw = population as f64 * f64::from(multiplier) / rate;
    Some((raw * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_stays_in_bounds() {
        for _ in 0..500 {
            let m = random_multiplier();
            assert!((GDP_MULTIPLIER_MIN..=GDP_MULTIPLIER_MAX).contains(&m));
        }
    }

    #[test]
    fn test_estimate_rounds_to_cents() {
        assert_eq!(estimate_gdp(3, Some(7.0), 1000), Some(428.57));
        assert_eq!(estimate_gdp(1_000_000, Some(2.0), 1500), Some(750_000_000.0));
    }

    #[test]
    fn test_estimate_requires_people_and_rate() {
        assert_eq!(estimate_gdp(0, Some(2.0), 1000), None);
        assert_eq!(estimate_gdp(10, None, 1000), None);
        assert_eq!(estimate_gdp(10, Some(0.0), 1000), None);
        assert_eq!(estimate_gdp(10, Some(-3.0), 1000), None);
        assert_eq!(estimate_gdp(10, Some(f64::NAN), 1000), None);
    }
}
