//! Score a model's historical predictions against actual results and odds.
//!
//! Each correctly guessed game collects the bookmaker's decimal odds for the
//! actual outcome (1.0 when the record carries no odds, an even-money
//! stand-in). Subtracting the number of games played in a bucket then nets
//! out the stake: a guessed-and-won game contributes `odds - 1`, every other
//! game contributes `-1`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{MatchRecord, Outcome};

/// Scoring failures. The store's simulation query filters on model-key
/// presence, so these only fire on hand-assembled inputs.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("fixture {fixture_id} has no \"{model}\" prediction")]
    MissingPrediction { fixture_id: i64, model: String },

    #[error("fixture {fixture_id} has no recorded result")]
    MissingResult { fixture_id: i64 },
}

/// Accuracy and return metrics for one outcome bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketSummary {
    pub games_guessed: u32,
    pub total_games: u32,
    /// Net units won: collected odds minus one stake per game, 2 decimals.
    pub total_odd_win: f64,
    /// `total_odd_win / total_games`, 2 decimals; 0 for an empty bucket.
    pub expected_win_per_game: f64,
}

/// Simulation result broken down by predicted-outcome category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub overall: BucketSummary,
    pub home_wins: BucketSummary,
    pub draws: BucketSummary,
    pub away_wins: BucketSummary,
}

/// Per-outcome running totals.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    games: u32,
    correct: u32,
    odd_win: f64,
}

/// Tally predictions for `model` across the records and fold the totals into
/// the four summary buckets.
pub fn score_simulations(
    records: &[MatchRecord],
    model: &str,
) -> Result<SimulationSummary, ScoreError> {
    let mut tallies = [Tally::default(); 3];

    for record in records {
        let predicted = record
            .final_prediction
            .as_ref()
            .and_then(|predictions| predictions.get(model).copied())
            .ok_or_else(|| ScoreError::MissingPrediction {
                fixture_id: record.fixture.id,
                model: model.to_string(),
            })?;
        let actual = record.result.ok_or(ScoreError::MissingResult {
            fixture_id: record.fixture.id,
        })?;

        tallies[predicted.index()].games += 1;

        if predicted == actual {
            tallies[actual.index()].correct += 1;
            // No odds on record (or no price for this outcome) counts as
            // even money: the game at least returns its stake.
            let collected = record
                .odds
                .as_ref()
                .and_then(|odds| odds.get(actual.odds_key()).copied())
                .unwrap_or(1.0);
            tallies[actual.index()].odd_win += collected;
        }
    }

    Ok(SimulationSummary {
        overall: bucket(&tallies, &Outcome::ALL),
        home_wins: bucket(&tallies, &[Outcome::W]),
        draws: bucket(&tallies, &[Outcome::D]),
        away_wins: bucket(&tallies, &[Outcome::L]),
    })
}

fn bucket(tallies: &[Tally; 3], categories: &[Outcome]) -> BucketSummary {
    let games_guessed: u32 = categories.iter().map(|o| tallies[o.index()].correct).sum();
    let total_games: u32 = categories.iter().map(|o| tallies[o.index()].games).sum();
    let collected: f64 = categories.iter().map(|o| tallies[o.index()].odd_win).sum();

    let total_odd_win = round2(collected - total_games as f64);
    let expected_win_per_game = if total_games > 0 {
        round2(total_odd_win / total_games as f64)
    } else {
        0.0
    };

    BucketSummary {
        games_guessed,
        total_games,
        total_odd_win,
        expected_win_per_game,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
