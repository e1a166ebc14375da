//! Progress derivation.
//!
//! Turns raw participant profiles and the lab catalog into a ranked
//! leaderboard, aggregate statistics and chart breakdowns. Everything here
//! is a pure function of its inputs.

#![warn(missing_docs)]

pub mod analytics;
pub mod derive;
pub mod engine;
pub mod stats;
pub mod view;

pub use analytics::{completion_distribution, lab_completion, top_performers};
pub use derive::{derive_profiles, ranking_key};
pub use engine::{Analytics, Leaderboard, ProgressEngine};
pub use stats::compute_stats;
pub use view::filter_and_sort;
