pub mod calendar;
pub mod filter;
pub mod forecast;
pub mod normalizer;
pub mod ranking;
pub mod trend;
pub mod views;

/// Rounds half away from zero to one decimal place.
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
