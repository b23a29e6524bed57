//! Match statistics aggregation: per-team and league-wide averaging plus the
//! comparison table served to the dashboard.

pub mod averager;
pub mod table;

pub use averager::{
    average_league_stats, average_team_stats, classify, AveragedStats, StatCategory,
};
pub use table::{convert_to_stats, StatRow};
