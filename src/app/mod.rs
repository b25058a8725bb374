pub mod config;
mod error;
mod logging;
mod runtime;

pub use error::AppError;

pub fn run() -> Result<(), AppError> {
    logging::init()?;

    dotenvy::dotenv().ok();
    let config = config::AppConfig::from_env();

    tracing::info!(
        kafka_bootstrap_servers = %config.kafka_bootstrap_servers,
        charging_events_topic = %config.charging_events_topic,
        minio_endpoint = %config.minio_endpoint,
        lakefs_repository = %config.lakefs_repository,
        lakefs_endpoint = %config.lakefs_endpoint,
        "ingestion bootstrap initialized"
    );

    runtime::run(config)
}
