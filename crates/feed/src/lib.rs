//! Profile feed for the Study Jams leaderboard.
//!
//! This crate provides a trait-based profile source with HTTP and JSON
//! file implementations, and a poller that keeps the latest successful
//! response available to readers.

#![warn(missing_docs)]

pub mod config;
pub mod file;
pub mod http;
pub mod poller;
pub mod source;

pub use config::{FeedConfig, HOSTED_ENDPOINT, LOCAL_ENDPOINT};
pub use file::FileProfileSource;
pub use http::HttpProfileSource;
pub use poller::{Poller, PollerHandle, Snapshot, SnapshotStore};
pub use source::{FeedError, ProfileSource, Result};
