//! Interview sessions and their feedback review.

pub mod aggregator;
pub mod handlers;
pub mod models;
