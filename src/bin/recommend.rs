// Recommendation CLI
//
// Purpose: Run the recommendation pipeline on one observation or a CSV batch
// Usage:
//   cargo run --features cli --bin recommend -- '{"region":"North",...}'
//   cargo run --features cli --bin recommend -- observations.csv
//   echo '{...}' | cargo run --features cli --bin recommend

use anyhow::Context;
use crop_recommender_rust::observation::is_csv_path;
use crop_recommender_rust::{load_observations_csv, EngineConfig, Observation, RecommendationEngine};
use serde_json::json;
use std::io::Read;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_recommender_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match std::env::var("ENGINE_CONFIG") {
        Ok(path) => EngineConfig::load(Path::new(&path))?,
        Err(_) => EngineConfig::from_env()?,
    };

    tracing::info!("Configuration:");
    tracing::info!("  ARTIFACT_DIR: {:?}", config.artifact_dir);
    tracing::info!("  CONVERSION_TABLE: {:?}", config.conversion_table);

    let engine = RecommendationEngine::from_config(config)?;

    let observations = read_input(std::env::args().nth(1))?;
    let results = engine.recommend_batch(&observations);

    let output: Vec<serde_json::Value> = results
        .into_iter()
        .map(|result| match result {
            Ok(rec) => serde_json::to_value(rec).unwrap_or_else(|e| json!({ "error": e.to_string() })),
            Err(e) => json!({ "error": e.to_string() }),
        })
        .collect();

    let rendered = if output.len() == 1 {
        serde_json::to_string_pretty(&output[0])?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    println!("{}", rendered);

    Ok(())
}

/// Observations from a CSV path, an inline JSON argument, or stdin
fn read_input(arg: Option<String>) -> anyhow::Result<Vec<Observation>> {
    let text = match arg {
        Some(a) if is_csv_path(Path::new(&a)) => return load_observations_csv(Path::new(&a)),
        Some(a) => a,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read observation JSON from stdin")?;
            buf
        }
    };

    // Accept a single object or an array
    let value: serde_json::Value = serde_json::from_str(text.trim()).context("Invalid observation JSON")?;
    if value.is_array() {
        serde_json::from_value(value).context("Invalid observation array")
    } else {
        Ok(vec![serde_json::from_value(value).context("Invalid observation object")?])
    }
}
