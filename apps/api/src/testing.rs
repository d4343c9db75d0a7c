//! Test doubles for the pipeline's collaborators.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use bytes::Bytes;

use crate::analysis::extract::{ExtractionError, TextExtractor};
use crate::analysis::models::AnalysisResult;
use crate::llm_client::{AiService, LlmError};
use crate::models::analysis::AnalysisRecord;
use crate::report::ReportMailer;
use crate::state::AppState;
use crate::storage::{AnalysisStore, StoreError};

/// One scripted reply from the fake AI service.
pub enum Reply {
    Text(String),
    Failure,
}

impl Reply {
    pub fn text(body: &str) -> Self {
        Reply::Text(body.to_string())
    }

    /// Simulates a transport-level failure.
    pub fn failure() -> Self {
        Reply::Failure
    }
}

/// Replays scripted replies in order and records every prompt it receives.
/// Once the script runs out every call fails.
#[derive(Default)]
pub struct ScriptedAi {
    replies: Mutex<VecDeque<Reply>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedAi {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiService for ScriptedAi {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Text(body)) => Ok(body),
            Some(Reply::Failure) | None => Err(LlmError::Api {
                status: 503,
                message: "upstream unavailable".to_string(),
            }),
        }
    }
}

/// Returns fixed text (or an error) regardless of the uploaded bytes.
pub struct StubExtractor {
    text: Option<String>,
    calls: Mutex<usize>,
}

impl StubExtractor {
    pub fn returning(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: Mutex::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl TextExtractor for StubExtractor {
    async fn extract(&self, _document: Bytes) -> Result<String, ExtractionError> {
        *self.calls.lock().unwrap() += 1;
        self.text
            .clone()
            .ok_or_else(|| ExtractionError::Pdf("invalid file header".to_string()))
    }
}

/// Keeps stored records in memory; optionally fails every insert.
#[derive(Default)]
pub struct RecordingStore {
    records: Mutex<Vec<AnalysisRecord>>,
    fail: bool,
}

impl RecordingStore {
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn records(&self) -> Vec<AnalysisRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisStore for RecordingStore {
    async fn store(&self, record: &AnalysisRecord) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Api {
                status: 503,
                message: "storage offline".to_string(),
            });
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Records queued reports instead of sending them.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, i32)>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<(String, i32)> {
        self.sent.lock().unwrap().clone()
    }
}

impl ReportMailer for RecordingMailer {
    fn queue_report(&self, email: &str, result: &AnalysisResult, _job_role: Option<&str>) -> bool {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), result.ats_score));
        true
    }
}

/// Handles on the doubles inside an `AppState`, for assertions after a request.
pub struct TestHarness {
    pub state: AppState,
    pub ai: Arc<ScriptedAi>,
    pub extractor: Arc<StubExtractor>,
    pub store: Arc<RecordingStore>,
}

impl TestHarness {
    pub fn new(ai: ScriptedAi, extractor: StubExtractor, store: RecordingStore) -> Self {
        let ai = Arc::new(ai);
        let extractor = Arc::new(extractor);
        let store = Arc::new(store);
        let state = AppState {
            ai: ai.clone(),
            extractor: extractor.clone(),
            store: store.clone(),
            mailer: None,
        };
        Self {
            state,
            ai,
            extractor,
            store,
        }
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn ReportMailer>) -> Self {
        self.state.mailer = Some(mailer);
        self
    }
}

/// A part of a `multipart/form-data` body.
pub enum Part<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

const BOUNDARY: &str = "resumyzer-test-boundary";

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
