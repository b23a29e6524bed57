//! Scorelab CLI - Command-line interface for the prediction analytics

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use scorelab::data::{load_records, FixtureStore, OddsTable};
use scorelab::simulation::{score_simulations, BucketSummary};
use scorelab::stats::{average_league_stats, average_team_stats, convert_to_stats};

/// Default dataset location (relative to project root)
const DEFAULT_DATA_FILE: &str = "data/fixtures.json";

const RECENT_MATCH_LIMIT: usize = 4;
const LEAGUE_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Parser)]
#[command(name = "scorelab")]
#[command(author, version, about = "Football prediction analytics CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the fixture dataset (JSON array of match documents)
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Optional football-data CSV sheet to backfill bookmaker odds from
    #[arg(long)]
    odds: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two teams' recent stat averages against the league average
    Stats {
        /// Home team name
        #[arg(long)]
        home: String,

        /// Away team name
        #[arg(long)]
        away: String,
    },

    /// Score a model's predictions over a date range
    Simulate {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Model name to score
        #[arg(long)]
        model: String,

        /// Restrict to these league ids
        #[arg(long, value_delimiter = ',')]
        leagues: Option<Vec<i64>>,
    },

    /// List leagues present in the dataset
    Leagues,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = load_store(&cli.data, cli.odds.as_deref())?;

    match cli.command {
        Commands::Stats { home, away } => run_stats(&store, &home, &away),
        Commands::Simulate {
            start,
            end,
            model,
            leagues,
        } => run_simulate(&store, &start, &end, &model, leagues.as_deref()),
        Commands::Leagues => run_leagues(&store),
    }
}

fn load_store(data: &std::path::Path, odds: Option<&std::path::Path>) -> Result<FixtureStore> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Loading fixture dataset...");

    let mut records = load_records(data)
        .with_context(|| format!("Failed to load dataset from {:?}", data))?;

    if let Some(odds_path) = odds {
        pb.set_message("Backfilling bookmaker odds...");
        let table = OddsTable::load(odds_path)
            .with_context(|| format!("Failed to load odds sheet from {:?}", odds_path))?;
        let filled = table.backfill(&mut records);
        pb.println(format!("Backfilled odds on {} fixtures", filled));
    }

    pb.finish_and_clear();
    Ok(FixtureStore::new(records))
}

fn run_stats(store: &FixtureStore, home: &str, away: &str) -> Result<()> {
    println!(
        "{}: {} vs {}",
        "Stat comparison".green().bold(),
        home,
        away
    );
    println!();

    let home_matches = store.recent_with_stats(home, RECENT_MATCH_LIMIT);
    let away_matches = store.recent_with_stats(away, RECENT_MATCH_LIMIT);

    if home_matches.is_empty() || away_matches.is_empty() {
        println!("{}", "No games available for one of the teams.".yellow());
        return Ok(());
    }

    let anchor = home_matches[0];
    let league_matches = store.league_window(
        anchor.league.id,
        anchor.fixture.timestamp,
        LEAGUE_WINDOW_SECS,
    );

    let home_avg = average_team_stats(home_matches.iter().copied(), home);
    let away_avg = average_team_stats(away_matches.iter().copied(), away);
    let league_avg = average_league_stats(league_matches.iter().copied());

    let table = convert_to_stats(&home_avg, &away_avg, &league_avg, home, away);
    let titles = ["Shots", "Percentages", "Other"];

    for (category, title) in table.iter().zip(titles) {
        if category.is_empty() {
            continue;
        }
        println!("{}", title.yellow().bold());
        println!(
            "{:<20} {:>12} {:>12} {:>15}",
            "Stat", home, away, "League Average"
        );
        println!("{}", "-".repeat(62));
        for row in category {
            println!(
                "{:<20} {:>12.2} {:>12.2} {:>15.2}",
                row.stat, row.home, row.away, row.league_average
            );
        }
        println!();
    }

    println!(
        "Based on {} home-side and {} away-side matches, {} league matches",
        home_avg.sample_size,
        away_avg.sample_size,
        league_matches.len()
    );

    Ok(())
}

fn run_simulate(
    store: &FixtureStore,
    start: &str,
    end: &str,
    model: &str,
    leagues: Option<&[i64]>,
) -> Result<()> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d")
        .with_context(|| format!("Invalid start date: {}", start))?;
    let end = NaiveDate::parse_from_str(end, "%Y-%m-%d")
        .with_context(|| format!("Invalid end date: {}", end))?;
    anyhow::ensure!(start <= end, "start date {} is after end date {}", start, end);

    let records: Vec<_> = store
        .simulations_between(start, end, model, leagues)
        .into_iter()
        .cloned()
        .collect();

    println!(
        "{}: model {:?}, {} to {}, {} records",
        "Simulation".green().bold(),
        model,
        start,
        end,
        records.len()
    );
    println!();

    let summary = score_simulations(&records, model)?;

    println!(
        "{:<12} {:>8} {:>8} {:>10} {:>12} {:>10}",
        "Bucket", "Guessed", "Games", "Hit Rate", "Net Units", "Per Game"
    );
    println!("{}", "-".repeat(65));
    print_bucket("Overall", &summary.overall);
    print_bucket("Home Wins", &summary.home_wins);
    print_bucket("Draws", &summary.draws);
    print_bucket("Away Wins", &summary.away_wins);

    Ok(())
}

fn print_bucket(name: &str, bucket: &BucketSummary) {
    let hit_rate = if bucket.total_games > 0 {
        bucket.games_guessed as f64 / bucket.total_games as f64 * 100.0
    } else {
        0.0
    };
    let net = if bucket.total_odd_win >= 0.0 {
        format!("{:.2}", bucket.total_odd_win).green()
    } else {
        format!("{:.2}", bucket.total_odd_win).red()
    };

    println!(
        "{:<12} {:>8} {:>8} {:>9.1}% {:>12} {:>10.2}",
        name,
        bucket.games_guessed,
        bucket.total_games,
        hit_rate,
        net,
        bucket.expected_win_per_game
    );
}

fn run_leagues(store: &FixtureStore) -> Result<()> {
    let leagues = store.leagues();

    if leagues.is_empty() {
        println!("{}", "No leagues in the dataset.".yellow());
        return Ok(());
    }

    println!("{:>6} {:<28} {:<16}", "Id", "Name", "Country");
    println!("{}", "-".repeat(52));
    for league in &leagues {
        println!(
            "{:>6} {:<28} {:<16}",
            league.id,
            league.name.as_deref().unwrap_or("-"),
            league.country.as_deref().unwrap_or("-")
        );
    }
    println!();
    println!("Total: {} leagues", leagues.len());

    Ok(())
}
