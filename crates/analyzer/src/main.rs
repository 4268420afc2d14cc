//! `armory-analyzer`: weapon census across every character of a Guild
//! Wars 2 account.
//!
//! Counts equipped land weapons per weapon type over all equipment
//! templates, optionally restricted to legendary-armory items or to one
//! legendary generation. Item details and the legendary catalogue are
//! cached on disk between runs. See [`armory_analyzer::config`] for the
//! environment variables.
//!
//! The report goes to stdout, logs go to stderr. Exit status is `1` for
//! invalid configuration or client setup and `2` for incompatible filter
//! options.

use std::sync::Arc;

use armory_analyzer::config::{AnalyzerConfig, OutputFormat};
use armory_analyzer::report;
use armory_analyzer::{Analyzer, AnalyzerError};
use armory_gw2::Gw2Client;
use armory_store::FileStore;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "armory_analyzer=info,armory_store=info,armory_gw2=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AnalyzerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        base_url = %config.api_base_url,
        cache_dir = %config.cache_dir.display(),
        concurrency = config.fetch_concurrency,
        "Starting armory-analyzer",
    );

    let client = Gw2Client::new(config.client_config()).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build API client");
        std::process::exit(1);
    });

    let analyzer = Analyzer::new(
        Arc::new(client),
        Arc::new(FileStore::new(&config.cache_dir)),
        config.fetch_concurrency,
    );

    let report = match analyzer.run(&config.filter).await {
        Ok(report) => report,
        Err(AnalyzerError::Configuration(e)) => {
            tracing::error!(error = %e, "Refusing to run");
            std::process::exit(2);
        }
    };

    match config.output {
        OutputFormat::Text => print!(
            "{}",
            report::render_text(&report, config.show_character_details)
        ),
        OutputFormat::Json => match report::render_json(&report, chrono::Utc::now()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize report");
                std::process::exit(1);
            }
        },
    }
}
