//! Scorelab - Football prediction analytics
//!
//! This library provides:
//! - Per-team and league-wide averaging of match statistics
//! - Simulation scoring of model predictions against historical odds
//! - An in-memory fixture store with the query surface the API needs
//! - Bookmaker odds backfill from football-data CSV sheets
//!
//! # Example
//!
//! ```no_run
//! use scorelab::data::FixtureStore;
//! use scorelab::simulation::score_simulations;
//! use chrono::NaiveDate;
//!
//! let store = FixtureStore::load("data/fixtures.json").unwrap();
//! let start = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 8, 31).unwrap();
//! let records: Vec<_> = store
//!     .simulations_between(start, end, "poisson", None)
//!     .into_iter()
//!     .cloned()
//!     .collect();
//! let summary = score_simulations(&records, "poisson").unwrap();
//! println!("guessed {} of {}", summary.overall.games_guessed, summary.overall.total_games);
//! ```

pub mod data;
pub mod error;
pub mod models;
pub mod simulation;
pub mod stats;

// Re-export commonly used types
pub use data::{FixtureStore, OddsTable, StoreError};
pub use models::{MatchRecord, MatchStatEntry, Outcome, StatValue, TeamStatBlock};
pub use simulation::{score_simulations, SimulationSummary};
pub use stats::{average_league_stats, average_team_stats, convert_to_stats, AveragedStats};
