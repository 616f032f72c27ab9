//! Background submission runner
//!
//! Runs the conversion request on a worker thread so the UI keeps drawing
//! the loading indicator. The main loop polls on every tick and applies the
//! outcome to the workflow state. There is no cancellation: once spawned, a
//! request runs to completion before the next submission is accepted.

use crate::model::workflow::{SubmissionRequest, WorkflowState, GENERIC_ERROR_MESSAGE};
use crate::services::convert::{ConversionClient, ConvertError};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// Message from the worker thread
enum SubmitMessage {
    Finished(Result<String, ConvertError>),
}

/// An in-flight submission
struct ActiveSubmission {
    receiver: Receiver<SubmitMessage>,
    started: Instant,
}

/// Runner owning at most one in-flight conversion request
#[derive(Default)]
pub struct SubmitRunner {
    active: Option<ActiveSubmission>,
}

impl SubmitRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request is currently in flight
    pub fn in_flight(&self) -> bool {
        self.active.is_some()
    }

    /// Time since the current submission started
    pub fn elapsed(&self) -> Option<Duration> {
        self.active.as_ref().map(|a| a.started.elapsed())
    }

    /// Spawn the request on a worker thread.
    ///
    /// The caller must have raised the submitting flag via
    /// `WorkflowState::begin_submission` first; that flag is the
    /// single-flight guard, not this runner.
    pub fn spawn(&mut self, client: ConversionClient, request: SubmissionRequest) {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let _ = tx.send(SubmitMessage::Finished(client.convert(&request)));
        });

        self.active = Some(ActiveSubmission {
            receiver: rx,
            started: Instant::now(),
        });
    }

    /// Poll the worker and apply a finished outcome to the state.
    ///
    /// Returns true when the submission resolved on this call. A worker that
    /// died without reporting counts as a failure; the submitting flag is
    /// reset on every path so the UI can never stay stuck loading.
    pub fn poll(&mut self, state: &mut WorkflowState) -> bool {
        let Some(ref active) = self.active else {
            return false;
        };

        match active.receiver.try_recv() {
            Ok(SubmitMessage::Finished(outcome)) => {
                state.finish_submission(outcome.map_err(|e| e.user_message()));
                self.active = None;
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                state.finish_submission(Err(GENERIC_ERROR_MESSAGE.to_string()));
                self.active = None;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::workflow::{CaseTransform, SelectedFile, SqlDialect};
    use httpmock::prelude::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn wait_for_resolution(runner: &mut SubmitRunner, state: &mut WorkflowState) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !runner.poll(state) {
            assert!(Instant::now() < deadline, "submission never resolved");
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn request_for(path: PathBuf) -> SubmissionRequest {
        SubmissionRequest {
            file: SelectedFile::new(path),
            table_name: "customers".to_string(),
            case_transform: CaseTransform::None,
            sql_dialect: SqlDialect::Postgresql,
        }
    }

    #[test]
    fn test_poll_without_active_submission_is_noop() {
        let mut runner = SubmitRunner::new();
        let mut state = WorkflowState::new();
        assert!(!runner.poll(&mut state));
        assert!(!runner.in_flight());
        assert!(runner.elapsed().is_none());
    }

    #[test]
    fn test_successful_submission_resolves_into_result() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/upload/");
            then.status(200).body("INSERT INTO customers ...;");
        });

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"id\n1\n").unwrap();

        let mut state = WorkflowState::new();
        state.select_file(SelectedFile::new(file.path().to_path_buf()));
        let request = state.begin_submission().unwrap();

        let mut runner = SubmitRunner::new();
        runner.spawn(ConversionClient::new(server.url("/upload/")), request);
        assert!(runner.in_flight());
        assert!(runner.elapsed().is_some());

        wait_for_resolution(&mut runner, &mut state);

        assert_eq!(state.result_text.as_deref(), Some("INSERT INTO customers ...;"));
        assert!(state.error_text.is_none());
        assert!(!state.is_submitting());
        assert!(!runner.in_flight());
    }

    #[test]
    fn test_failed_submission_resolves_into_error_and_resets_flag() {
        // Unreadable file: the worker fails before any request goes out,
        // and the submitting flag must still come back down.
        let mut state = WorkflowState::new();
        state.select_file(SelectedFile::new("/nonexistent/rows.csv".into()));
        let request = state.begin_submission().unwrap();
        assert!(state.is_submitting());

        let mut runner = SubmitRunner::new();
        runner.spawn(
            ConversionClient::new("http://127.0.0.1:1/upload/".to_string()),
            request_for(request.file.path),
        );

        wait_for_resolution(&mut runner, &mut state);

        assert_eq!(state.error_text.as_deref(), Some(GENERIC_ERROR_MESSAGE));
        assert!(state.result_text.is_none());
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_service_detail_reaches_error_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/upload/");
            then.status(400).body(r#"{"detail": "Coluna ausente"}"#);
        });

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"id\n1\n").unwrap();

        let mut state = WorkflowState::new();
        state.select_file(SelectedFile::new(file.path().to_path_buf()));
        let request = state.begin_submission().unwrap();

        let mut runner = SubmitRunner::new();
        runner.spawn(ConversionClient::new(server.url("/upload/")), request);

        wait_for_resolution(&mut runner, &mut state);

        assert_eq!(state.error_text.as_deref(), Some("Coluna ausente"));
        assert!(!state.is_submitting());
    }
}
