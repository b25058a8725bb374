use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Handle to the stream-processing runtime. Acquired once at bootstrap and
/// released on every exit path; release is idempotent so the explicit
/// shutdown call and the `Drop` backstop cannot tear down twice.
#[derive(Debug)]
pub struct ProcessingSession {
    id: Uuid,
    app_name: String,
    acquired_at: DateTime<Utc>,
    released: AtomicBool,
}

#[derive(Debug, Default)]
pub struct SessionBuilder {
    app_name: Option<String>,
}

impl SessionBuilder {
    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn build(self) -> ProcessingSession {
        let session = ProcessingSession {
            id: Uuid::new_v4(),
            app_name: self
                .app_name
                .unwrap_or_else(|| "charging-events-ingest".to_string()),
            acquired_at: Utc::now(),
            released: AtomicBool::new(false),
        };

        tracing::info!(
            session_id = %session.id,
            app_name = %session.app_name,
            "processing session acquired"
        );

        session
    }
}

impl ProcessingSession {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn acquired_at(&self) -> DateTime<Utc> {
        self.acquired_at
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }

    /// Tears the session down. Returns `true` only for the call that
    /// performed the release; later calls are no-ops.
    pub fn release(&self) -> bool {
        let first_release = !self.released.swap(true, Ordering::AcqRel);

        if first_release {
            tracing::info!(session_id = %self.id, "processing session released");
        }

        first_release
    }
}

impl Drop for ProcessingSession {
    fn drop(&mut self) {
        if self.release() {
            tracing::warn!(
                session_id = %self.id,
                "processing session released by drop; explicit release was skipped"
            );
        }
    }
}
