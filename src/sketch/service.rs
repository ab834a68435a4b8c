use crate::sketch::messages::{parse_reply, RecognitionOutcome, TaggedOutcome};
use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

/// Hands canvas snapshots to the remote recognizer. Each request runs on its
/// own worker thread and reports back over the channel tagged with its
/// sequence number; requests are never cancelled, only overtaken.
pub struct RecognitionService {
    endpoint: String,
    timeout: Duration,
    next_seq: u64,
    outcome_tx: Sender<TaggedOutcome>,
    outcome_rx: Receiver<TaggedOutcome>,
}

impl RecognitionService {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        let (outcome_tx, outcome_rx) = channel();
        Self {
            endpoint,
            timeout,
            next_seq: 0,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Sequence number of the most recently submitted request.
    pub fn latest_seq(&self) -> u64 {
        self.next_seq
    }

    /// Posts a base64 snapshot without blocking the caller. Returns the
    /// sequence number assigned to this request.
    pub fn submit(&mut self, snapshot_base64: String) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;

        let endpoint = self.endpoint.clone();
        let timeout = self.timeout;
        let tx = self.outcome_tx.clone();

        std::thread::spawn(move || {
            debug!(seq, %endpoint, "posting canvas snapshot");
            let outcome = match post_snapshot(&endpoint, timeout, &snapshot_base64) {
                Ok(body) => parse_reply(&body),
                Err(err) => {
                    warn!(seq, error = %err, "recognition request failed");
                    RecognitionOutcome::Unavailable {
                        message: err.to_string(),
                    }
                }
            };
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(TaggedOutcome { seq, outcome });
        });

        seq
    }

    /// Drains every outcome that has arrived since the last call.
    pub fn try_drain(&self) -> Vec<TaggedOutcome> {
        let mut drained = Vec::new();
        loop {
            match self.outcome_rx.try_recv() {
                Ok(outcome) => drained.push(outcome),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        drained
    }
}

fn post_snapshot(endpoint: &str, timeout: Duration, snapshot_base64: &str) -> Result<String> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent("sketch_solver recognizer client")
        .build()
        .context("build recognizer http client")?;

    let response = client
        .post(endpoint)
        .header(CONTENT_TYPE, "multipart/form-data")
        .body(snapshot_base64.to_string())
        .send()
        .with_context(|| format!("post snapshot to {endpoint}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("recognizer answered http {status}"));
    }

    response.text().context("read recognizer reply body")
}
