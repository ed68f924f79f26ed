// Prediction engine
// Pipeline: validation → normalization → rule scoring → ranking → persistence.
// Everything up to ranking is pure; only `service` touches the store.

pub mod catalog;
pub mod handlers;
pub mod normalizer;
pub mod ranking;
pub mod rules;
pub mod scoring;
pub mod service;
pub mod validation;
