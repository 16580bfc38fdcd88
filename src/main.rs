//! tokenlens CLI
//!
//! Fetches an asset's price history, prints its technical analysis and a
//! cached (or freshly generated) prediction as JSON.
//!
//! Usage: `tokenlens <asset> [timeframe] [horizon_days]`

use std::env;
use std::sync::Arc;

use dotenvy::dotenv;
use serde_json::json;
use tokenlens::analysis::{AnalysisSession, TechnicalAnalyzer};
use tokenlens::cache::{KeyValueStore, MemoryStore, PredictionCache, RedisStore};
use tokenlens::config::{self, EngineConfig};
use tokenlens::logging;
use tokenlens::models::Timeframe;
use tokenlens::predictions::{PredictionService, TrendProjectionGenerator};
use tokenlens::services::HttpPriceHistoryProvider;
use tokio::signal;
use tracing::{info, warn};

fn open_store() -> Arc<dyn KeyValueStore> {
    match config::get_redis_url() {
        Some(url) => match RedisStore::connect(&url) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!(error = %e, "Redis unavailable, falling back to in-memory prediction cache");
                Arc::new(MemoryStore::new())
            }
        },
        None => Arc::new(MemoryStore::new()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let mut args = env::args().skip(1);
    let asset = args.next().unwrap_or_else(|| "bitcoin".to_string());
    let timeframe: Timeframe = match args.next() {
        Some(raw) => raw.parse()?,
        None => Timeframe::Month,
    };
    let horizon_days: u32 = match args.next() {
        Some(raw) => raw.parse()?,
        None => 7,
    };

    let config = EngineConfig::from_env();
    info!(
        environment = %config::get_environment(),
        asset = %asset,
        timeframe = %timeframe,
        horizon_days,
        "Starting tokenlens"
    );

    let provider = Arc::new(HttpPriceHistoryProvider::new(&config)?);
    let session = AnalysisSession::new(provider, TechnicalAnalyzer::from_config(&config));
    // Connecting to Redis blocks; keep it off the runtime workers.
    let store = tokio::task::spawn_blocking(open_store).await?;
    let cache = PredictionCache::new(store).with_default_max_age(config.cache_max_age_minutes);
    let predictions = PredictionService::new(cache, TrendProjectionGenerator);

    let work = async {
        let analysis = session.refresh(&asset, timeframe).await?;
        // Predict from the series the session just applied, so the history
        // is downloaded once and stays under the session's cancellation.
        let prediction = match session.series() {
            Some(series) if analysis.is_some() => Some(
                predictions
                    .get_or_generate(&asset, horizon_days, &series)
                    .await?,
            ),
            _ => predictions.cached(&asset, horizon_days),
        };
        Ok::<_, Box<dyn std::error::Error>>((analysis, prediction))
    };

    tokio::select! {
        _ = signal::ctrl_c() => {
            session.unmount();
            info!("Interrupted; in-flight fetch cancelled");
        }
        result = work => {
            let (analysis, prediction) = result?;
            let output = json!({
                "asset": asset,
                "timeframe": timeframe,
                "analysis": analysis.as_deref(),
                "prediction": prediction,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
