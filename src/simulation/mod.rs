//! Simulation scoring: how accurate a model's past predictions were and what
//! backing them at bookmaker odds would have returned.

pub mod scorer;

pub use scorer::{score_simulations, BucketSummary, ScoreError, SimulationSummary};
