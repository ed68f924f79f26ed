// Prediction history analytics: role frequency, yearly trend, latest-year mix.

pub mod aggregator;
pub mod handlers;
