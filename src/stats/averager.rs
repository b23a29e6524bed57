//! Average a team's (or a whole league's) recorded match statistics.
//!
//! Statistic names fall into three closed families with different value
//! shapes: shot counts arrive as numbers, possession/pass accuracy as
//! percentage strings, and the remaining counters as numbers that may be
//! null when nothing happened. Anything outside the three families is
//! dropped without complaint.

use std::collections::HashMap;

use crate::models::{MatchRecord, MatchStatEntry, StatValue};

/// Count-based shot statistics, averaged to 2 decimal places.
pub const SHOT_STATS: [&str; 5] = [
    "Shots on Goal",
    "Total Shots",
    "Blocked Shots",
    "Shots insidebox",
    "Shots outsidebox",
];

/// Percentage statistics, averaged to 3 decimal places.
pub const PERCENTAGE_STATS: [&str; 2] = ["Ball Possession", "Passes %"];

/// Miscellaneous counters, averaged to 2 decimal places. Null means zero.
pub const OTHER_STATS: [&str; 5] = [
    "Fouls",
    "Corner Kicks",
    "Offsides",
    "Yellow Cards",
    "Red Cards",
];

/// Derived ratio inserted alongside the percentage stats.
pub const DERIVED_SHOTS_PCT: &str = "Shots %";

/// Which averaging family a statistic name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatCategory {
    Shot,
    Percentage,
    Other,
    Unrecognized,
}

/// Classify a statistic name into its family. Every name belongs to at most
/// one family.
pub fn classify(name: &str) -> StatCategory {
    if SHOT_STATS.contains(&name) {
        StatCategory::Shot
    } else if PERCENTAGE_STATS.contains(&name) {
        StatCategory::Percentage
    } else if OTHER_STATS.contains(&name) {
        StatCategory::Other
    } else {
        StatCategory::Unrecognized
    }
}

/// Averaged statistics for one team or one league window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AveragedStats {
    pub shot_stats: HashMap<String, f64>,
    pub percentage_stats: HashMap<String, f64>,
    pub other_stats: HashMap<String, f64>,
    /// Divisor the averages were computed with (0 = zero-sample result).
    pub sample_size: usize,
}

impl AveragedStats {
    pub fn is_zero_sample(&self) -> bool {
        self.sample_size == 0
    }
}

/// Running sums before division, built up by folding over stat entries.
#[derive(Debug, Default)]
struct StatAccumulator {
    shots: HashMap<String, f64>,
    percentages: HashMap<String, f64>,
    other: HashMap<String, f64>,
}

impl StatAccumulator {
    /// Fold step: add one stat entry to the matching family's running sum.
    ///
    /// The value shape has to agree with the family: numeric for shots,
    /// string for percentages (trailing `%` stripped), numeric-or-null for
    /// the rest. Mismatched shapes and unparseable percentage strings are
    /// skipped.
    fn observe(mut self, entry: &MatchStatEntry) -> Self {
        match (classify(&entry.name), &entry.value) {
            (StatCategory::Shot, Some(StatValue::Number(v))) => {
                *self.shots.entry(entry.name.clone()).or_insert(0.0) += v;
            }
            (StatCategory::Percentage, Some(StatValue::Text(raw))) => {
                if let Ok(v) = raw.trim_end_matches('%').parse::<f64>() {
                    *self.percentages.entry(entry.name.clone()).or_insert(0.0) += v;
                }
            }
            (StatCategory::Other, Some(StatValue::Number(v))) => {
                *self.other.entry(entry.name.clone()).or_insert(0.0) += v;
            }
            (StatCategory::Other, None) => {
                // Null counts as zero, but the stat still becomes present.
                self.other.entry(entry.name.clone()).or_insert(0.0);
            }
            _ => {}
        }
        self
    }

    /// Divide every sum by `divisor` and attach the derived `Shots %`.
    ///
    /// A zero divisor yields the zero-sample result (empty families,
    /// `Shots %` = 0) instead of propagating NaN.
    fn finalize(self, divisor: usize) -> AveragedStats {
        let mut out = AveragedStats {
            sample_size: divisor,
            ..Default::default()
        };

        if divisor > 0 {
            let d = divisor as f64;
            out.shot_stats = self
                .shots
                .into_iter()
                .map(|(k, v)| (k, round2(v / d)))
                .collect();
            out.percentage_stats = self
                .percentages
                .into_iter()
                .map(|(k, v)| (k, round3(v / d)))
                .collect();
            out.other_stats = self
                .other
                .into_iter()
                .map(|(k, v)| (k, round2(v / d)))
                .collect();
        }

        let shots_pct = match (
            out.shot_stats.get("Shots on Goal"),
            out.shot_stats.get("Total Shots"),
        ) {
            (Some(on_goal), Some(total)) if *total != 0.0 => round3(on_goal / total * 100.0),
            _ => 0.0,
        };
        out.percentage_stats
            .insert(DERIVED_SHOTS_PCT.to_string(), shots_pct);

        out
    }
}

/// Average one team's statistics over the given matches. The team name picks
/// which side of each match to read; the divisor is the match count.
pub fn average_team_stats<'a, I>(matches: I, team: &str) -> AveragedStats
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let (acc, count) = matches.into_iter().fold(
        (StatAccumulator::default(), 0usize),
        |(acc, count), game| {
            let side = game.side_index(team);
            let acc = match game.statistics.get(side) {
                Some(block) => block.statistics.iter().fold(acc, StatAccumulator::observe),
                None => acc,
            };
            (acc, count + 1)
        },
    );

    acc.finalize(count)
}

/// Average statistics over every side of every match in a league window.
/// Both teams contribute, so the divisor is twice the match count.
pub fn average_league_stats<'a, I>(matches: I) -> AveragedStats
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let (acc, count) = matches.into_iter().fold(
        (StatAccumulator::default(), 0usize),
        |(acc, count), game| {
            let acc = game.statistics.iter().fold(acc, |acc, block| {
                block.statistics.iter().fold(acc, StatAccumulator::observe)
            });
            (acc, count + 1)
        },
    );

    acc.finalize(count * 2)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixtureInfo, LeagueInfo, TeamRef, TeamSides, TeamStatBlock};
    use chrono::NaiveDate;

    fn stat(name: &str, value: Option<StatValue>) -> MatchStatEntry {
        MatchStatEntry {
            name: name.to_string(),
            value,
        }
    }

    fn num(v: f64) -> Option<StatValue> {
        Some(StatValue::Number(v))
    }

    fn text(s: &str) -> Option<StatValue> {
        Some(StatValue::Text(s.to_string()))
    }

    fn game(
        home: &str,
        away: &str,
        home_stats: Vec<MatchStatEntry>,
        away_stats: Vec<MatchStatEntry>,
    ) -> MatchRecord {
        MatchRecord {
            date: NaiveDate::from_ymd_opt(2024, 8, 30).unwrap(),
            fixture: FixtureInfo {
                id: 1,
                timestamp: 1_725_000_000,
            },
            league: LeagueInfo {
                id: 39,
                name: None,
                country: None,
                season: None,
            },
            teams: TeamSides {
                home: TeamRef {
                    id: None,
                    name: home.to_string(),
                },
                away: TeamRef {
                    id: None,
                    name: away.to_string(),
                },
            },
            has_stats: true,
            statistics: vec![
                TeamStatBlock {
                    team: None,
                    statistics: home_stats,
                },
                TeamStatBlock {
                    team: None,
                    statistics: away_stats,
                },
            ],
            final_prediction: None,
            result: None,
            odds: None,
        }
    }

    #[test]
    fn test_classify_covers_all_families() {
        assert_eq!(classify("Total Shots"), StatCategory::Shot);
        assert_eq!(classify("Ball Possession"), StatCategory::Percentage);
        assert_eq!(classify("Corner Kicks"), StatCategory::Other);
        assert_eq!(classify("Expected Goals"), StatCategory::Unrecognized);
    }

    #[test]
    fn test_team_average_total_shots() {
        // Two matches at home with Total Shots 10 and 14 -> 12.00
        let matches = vec![
            game("Arsenal", "Chelsea", vec![stat("Total Shots", num(10.0))], vec![]),
            game("Arsenal", "Spurs", vec![stat("Total Shots", num(14.0))], vec![]),
        ];
        let avg = average_team_stats(&matches, "Arsenal");
        assert_eq!(avg.sample_size, 2);
        assert_eq!(avg.shot_stats.get("Total Shots"), Some(&12.0));
    }

    #[test]
    fn test_team_average_resolves_away_side() {
        let matches = vec![
            game("Arsenal", "Chelsea", vec![stat("Fouls", num(20.0))], vec![stat("Fouls", num(8.0))]),
            game("Chelsea", "Spurs", vec![stat("Fouls", num(99.0))], vec![stat("Fouls", num(10.0))]),
        ];
        // Chelsea was away in game 1 (8 fouls) and home in game 2 (99 fouls).
        let avg = average_team_stats(&matches, "Chelsea");
        assert_eq!(avg.other_stats.get("Fouls"), Some(&53.5));
    }

    #[test]
    fn test_percentage_strings_are_stripped_and_averaged() {
        let matches = vec![
            game("Arsenal", "Chelsea", vec![stat("Ball Possession", text("60%"))], vec![]),
            game("Arsenal", "Spurs", vec![stat("Ball Possession", text("47%"))], vec![]),
        ];
        let avg = average_team_stats(&matches, "Arsenal");
        assert_eq!(avg.percentage_stats.get("Ball Possession"), Some(&53.5));
    }

    #[test]
    fn test_null_other_stat_counts_as_zero() {
        let matches = vec![
            game("Arsenal", "Chelsea", vec![stat("Red Cards", None)], vec![]),
            game("Arsenal", "Spurs", vec![stat("Red Cards", num(1.0))], vec![]),
        ];
        let avg = average_team_stats(&matches, "Arsenal");
        assert_eq!(avg.other_stats.get("Red Cards"), Some(&0.5));
    }

    #[test]
    fn test_mismatched_value_shapes_are_dropped() {
        let matches = vec![game(
            "Arsenal",
            "Chelsea",
            vec![
                // Shot stat as a string and percentage stat as a number: both ignored.
                stat("Total Shots", text("10")),
                stat("Ball Possession", num(60.0)),
                // Unrecognized name: ignored.
                stat("Expected Goals", num(1.4)),
                // Unparseable percentage string: ignored.
                stat("Passes %", text("n/a")),
            ],
            vec![],
        )];
        let avg = average_team_stats(&matches, "Arsenal");
        assert!(avg.shot_stats.is_empty());
        assert!(!avg.percentage_stats.contains_key("Ball Possession"));
        assert!(!avg.percentage_stats.contains_key("Passes %"));
    }

    #[test]
    fn test_derived_shots_pct() {
        let matches = vec![game(
            "Arsenal",
            "Chelsea",
            vec![
                stat("Shots on Goal", num(5.0)),
                stat("Total Shots", num(15.0)),
            ],
            vec![],
        )];
        let avg = average_team_stats(&matches, "Arsenal");
        assert_eq!(avg.percentage_stats.get(DERIVED_SHOTS_PCT), Some(&33.333));
    }

    #[test]
    fn test_derived_shots_pct_zero_when_no_total_shots() {
        let matches = vec![game(
            "Arsenal",
            "Chelsea",
            vec![stat("Shots on Goal", num(3.0)), stat("Total Shots", num(0.0))],
            vec![],
        )];
        let avg = average_team_stats(&matches, "Arsenal");
        assert_eq!(avg.percentage_stats.get(DERIVED_SHOTS_PCT), Some(&0.0));
    }

    #[test]
    fn test_league_average_divisor_is_twice_match_count() {
        // Three matches, both sides contribute Corner Kicks: [4,6],[5,5],[3,7]
        let matches = vec![
            game(
                "A",
                "B",
                vec![stat("Corner Kicks", num(4.0))],
                vec![stat("Corner Kicks", num(6.0))],
            ),
            game(
                "C",
                "D",
                vec![stat("Corner Kicks", num(5.0))],
                vec![stat("Corner Kicks", num(5.0))],
            ),
            game(
                "E",
                "F",
                vec![stat("Corner Kicks", num(3.0))],
                vec![stat("Corner Kicks", num(7.0))],
            ),
        ];
        let avg = average_league_stats(&matches);
        assert_eq!(avg.sample_size, 6);
        assert_eq!(avg.other_stats.get("Corner Kicks"), Some(&5.0));
    }

    #[test]
    fn test_zero_sample_result() {
        let matches: Vec<MatchRecord> = Vec::new();
        let avg = average_team_stats(&matches, "Arsenal");
        assert!(avg.is_zero_sample());
        assert!(avg.shot_stats.is_empty());
        assert!(avg.other_stats.is_empty());
        assert_eq!(avg.percentage_stats.get(DERIVED_SHOTS_PCT), Some(&0.0));
    }

    #[test]
    fn test_averaging_is_idempotent() {
        let matches = vec![
            game(
                "Arsenal",
                "Chelsea",
                vec![stat("Total Shots", num(11.0)), stat("Ball Possession", text("58%"))],
                vec![],
            ),
            game(
                "Arsenal",
                "Spurs",
                vec![stat("Total Shots", num(7.0)), stat("Ball Possession", text("41%"))],
                vec![],
            ),
        ];
        let first = average_team_stats(&matches, "Arsenal");
        let second = average_team_stats(&matches, "Arsenal");
        assert_eq!(first, second);
    }

    #[test]
    fn test_rounding_precision() {
        // 10 / 3 = 3.3333... -> 3.33 for counts
        let matches = vec![
            game("A", "B", vec![stat("Offsides", num(4.0))], vec![]),
            game("A", "C", vec![stat("Offsides", num(3.0))], vec![]),
            game("A", "D", vec![stat("Offsides", num(3.0))], vec![]),
        ];
        let avg = average_team_stats(&matches, "A");
        assert_eq!(avg.other_stats.get("Offsides"), Some(&3.33));
    }
}
