use crate::adapters::ingest::{IngestionJob, PipelinePlan};
use crate::adapters::session::ProcessingSession;
use crate::app::config::AppConfig;
use crate::app::error::AppError;
use crate::domain::schema::RecordSchema;

pub fn run(config: AppConfig) -> Result<(), AppError> {
    let plan = PipelinePlan::from_config(&config);
    let schema = RecordSchema::charging_event_record();
    let session = ProcessingSession::builder().build();

    run_ingestion(&session, &schema, &plan)
}

/// Delegates to the ingestion job and blocks until it returns, then logs
/// the outcome and releases the session. Both outcomes release exactly
/// once; the caller only sees the mapped result.
pub fn run_ingestion(
    session: &ProcessingSession,
    schema: &RecordSchema,
    job: &dyn IngestionJob,
) -> Result<(), AppError> {
    let outcome = job.run(session, schema);

    match &outcome {
        Ok(()) => {
            tracing::info!(session_id = %session.id(), "ingestion queries ended");
        }
        Err(error) => {
            tracing::error!(
                session_id = %session.id(),
                error = %error,
                "ingestion job failed"
            );
        }
    }

    session.release();

    outcome.map_err(AppError::ingestion)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::adapters::ingest::{IngestionError, IngestionJob};
    use crate::adapters::session::ProcessingSession;
    use crate::domain::schema::RecordSchema;

    use super::run_ingestion;

    struct RecordingJob {
        fail_with: Option<String>,
        observed_fields: Cell<usize>,
        session_released_during_run: Cell<bool>,
    }

    impl RecordingJob {
        fn succeeding() -> Self {
            Self {
                fail_with: None,
                observed_fields: Cell::new(0),
                session_released_during_run: Cell::new(true),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                observed_fields: Cell::new(0),
                session_released_during_run: Cell::new(true),
            }
        }
    }

    impl IngestionJob for RecordingJob {
        fn run(
            &self,
            session: &ProcessingSession,
            schema: &RecordSchema,
        ) -> Result<(), IngestionError> {
            self.observed_fields.set(schema.fields().len());
            self.session_released_during_run.set(session.is_released());

            match &self.fail_with {
                None => Ok(()),
                Some(message) => Err(IngestionError::new(message.clone())),
            }
        }
    }

    #[test]
    fn success_path_releases_session_exactly_once() {
        let session = ProcessingSession::builder().build();
        let schema = RecordSchema::charging_event_record();
        let job = RecordingJob::succeeding();

        run_ingestion(&session, &schema, &job).expect("ingestion must succeed");

        assert!(session.is_released());
        // A later release finds nothing left to tear down.
        assert!(!session.release());
    }

    #[test]
    fn failure_path_releases_session_and_surfaces_error_text() {
        let session = ProcessingSession::builder().build();
        let schema = RecordSchema::charging_event_record();
        let job = RecordingJob::failing("broker unreachable");

        let error = run_ingestion(&session, &schema, &job).expect_err("ingestion must fail");

        assert!(session.is_released());
        assert!(!session.release());
        assert_eq!(
            error.to_string(),
            "ingestion job failed: broker unreachable"
        );
    }

    #[test]
    fn job_runs_against_live_session_and_full_schema() {
        let session = ProcessingSession::builder().build();
        let schema = RecordSchema::charging_event_record();
        let job = RecordingJob::succeeding();

        run_ingestion(&session, &schema, &job).expect("ingestion must succeed");

        assert_eq!(job.observed_fields.get(), 6);
        assert!(!job.session_released_during_run.get());
    }
}
