use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use arrival_sign::board::{BoardRefresher, SharedBoard};
use arrival_sign::catalog::Catalog;
use arrival_sign::config::SignConfig;
use arrival_sign::payload_log::PayloadLog;
use arrival_sign::tracker::{
    ArrivalsSource, MockTrainTracker, TrainTrackerClient, TrainTrackerConfig,
};
use arrival_sign::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = SignConfig::from_env()?;

    let catalog = Catalog::load(&config.resources_dir)?;
    info!(
        stations = catalog.stations().count(),
        lines = catalog.lines().count(),
        layouts = catalog.layouts().len(),
        "loaded reference data from {}",
        config.resources_dir.display()
    );
    let station = catalog.resolve_station_query(&config.station)?;
    let catalog = Arc::new(catalog);

    match &config.mock_dir {
        Some(dir) => {
            let mock = MockTrainTracker::new(dir)?;
            info!(
                stations = mock.available_stations().len(),
                "serving recorded arrivals from {}",
                dir.display()
            );
            serve(config.clone(), catalog, station, mock).await
        }
        None => {
            if config.api_key.is_empty() {
                warn!("CTA_API_KEY not set; Train Tracker requests will fail");
            }
            let client = TrainTrackerClient::new(TrainTrackerConfig::new(&config.api_key))?;
            serve(config.clone(), catalog, station, client).await
        }
    }
}

async fn serve<S>(
    config: SignConfig,
    catalog: Arc<Catalog>,
    station: arrival_sign::domain::StationRef,
    source: S,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: ArrivalsSource + Send + Sync + 'static,
{
    let board = SharedBoard::new();
    let name = catalog.station(station).display_name.clone();

    let refresher = BoardRefresher::new(
        catalog,
        source,
        station,
        board.clone(),
        PayloadLog::new(&config.log_dir),
    )?
    .with_capacity(config.capacity);
    tokio::spawn(refresher.run(config.refresh_interval));

    let app = create_router(AppState::new(board, name.as_str()));
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(station = %name, "arrival sign listening on http://{}", config.listen_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
