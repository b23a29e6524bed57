use actix_web::{middleware, web, App, HttpServer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod handlers;

use handlers::{health, matches, simulations, stats};
use scorelab::data::{load_records, FixtureStore, OddsTable};

/// Application state shared across handlers
pub struct AppState {
    pub store: FixtureStore,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("{}:{}", host, port);

    let data_file = std::env::var("DATA_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/fixtures.json"));

    info!("Loading fixture dataset from {:?}", data_file);

    let mut records = match load_records(&data_file) {
        Ok(records) => records,
        Err(e) => {
            error!("Failed to load dataset {:?}: {}", data_file, e);
            std::process::exit(1);
        }
    };

    // Optional bookmaker odds backfill from a football-data CSV sheet
    if let Ok(odds_csv) = std::env::var("ODDS_CSV") {
        match OddsTable::load(&odds_csv) {
            Ok(table) => {
                let filled = table.backfill(&mut records);
                info!("Backfilled odds on {} fixtures from {}", filled, odds_csv);
            }
            Err(e) => {
                error!("Failed to load odds sheet {}: {}", odds_csv, e);
                std::process::exit(1);
            }
        }
    }

    let app_state = Arc::new(AppState {
        store: FixtureStore::new(records),
    });

    info!("Starting Scorelab API server at http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(health::health_check))
            .route("/api/match", web::get().to(matches::match_by_id))
            .route("/api/match/stats", web::get().to(stats::match_stats))
            .route(
                "/api/predictions",
                web::get().to(matches::predictions_by_date),
            )
            .route("/api/simulations", web::get().to(simulations::simulations))
            .route("/api/league", web::get().to(matches::leagues))
    })
    .bind(&addr)?
    .run()
    .await
}
