//! Study Jams core data models.
//!
//! Participant profiles as delivered by the feed, the lab catalog they are
//! scored against, and the derived leaderboard and statistics types.

#![warn(missing_docs)]

mod lab;
mod mode;
mod profile;
mod resource;
mod stats;

pub use lab::{CatalogError, LabCatalog, LabDefinition};
pub use mode::{ParseModeError, RankingMode, SortMode};
pub use profile::{DerivedProfile, RawProfile, DERIVED_FIELDS};
pub use resource::{resource_catalog, LabResource, ResourceGroup};
pub use stats::{AggregateStats, CompletionBucket, LabCompletion, PerformerSummary};
