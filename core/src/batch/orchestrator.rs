//! Batch orchestrator: one recording at a time, never in parallel.
//!
//! Per file:
//!   1. cancellation check
//!   2. transcribe (skip on error or empty transcript)
//!   3. score (skip on error)
//!   4. record result, report progress
//!   5. inter-file pause
//!
//! A failing file never aborts the batch; a finished run is always `done`.

use super::cancel::CancelToken;
use super::queue::AudioFile;
use super::service::{ScoringRequest, ScoringService, TranscriptionService};
use super::BatchResult;
use crate::types::RunId;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BatchProgress {
    /// Zero-based index of the file just finished.
    pub index:     usize,
    pub total:     usize,
    /// Results recorded so far.
    pub completed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub run_id:    RunId,
    pub results:   Vec<BatchResult>,
    pub done:      bool,
    pub cancelled: bool,
    /// Files that were picked up before the run ended.
    pub attempted: usize,
}

pub struct BatchOrchestrator<T, S> {
    transcriber: T,
    scorer:      S,
    delay:       Duration,
}

impl<T, S> BatchOrchestrator<T, S>
where
    T: TranscriptionService,
    S: ScoringService,
{
    pub fn new(transcriber: T, scorer: S, delay: Duration) -> Self {
        Self { transcriber, scorer, delay }
    }

    pub async fn run(
        &self,
        files: &[AudioFile],
        cancel: &CancelToken,
        mut progress: impl FnMut(BatchProgress),
    ) -> BatchOutcome {
        let run_id = uuid::Uuid::new_v4().to_string();
        let total = files.len();
        let mut results = Vec::with_capacity(total);
        let mut attempted = 0;
        let mut cancelled = false;

        log::info!("batch {run_id}: {total} file(s) queued");

        for (index, file) in files.iter().enumerate() {
            if cancel.is_cancelled() {
                log::info!("batch {run_id}: cancelled after {attempted} file(s)");
                cancelled = true;
                break;
            }
            attempted += 1;

            if let Some(result) = self.analyze(file).await {
                results.push(result);
            }
            progress(BatchProgress { index, total, completed: results.len() });

            if index + 1 < total && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        log::info!(
            "batch {run_id}: finished with {}/{} result(s){}",
            results.len(),
            total,
            if cancelled { " (cancelled)" } else { "" }
        );

        BatchOutcome { run_id, results, done: true, cancelled, attempted }
    }

    async fn analyze(&self, file: &AudioFile) -> Option<BatchResult> {
        let transcript = match self.transcriber.transcribe(file).await {
            Ok(t) if t.trim().is_empty() => {
                log::warn!("{}: empty transcript, skipping", file.name);
                return None;
            }
            Ok(t) => t,
            Err(e) => {
                log::warn!("{}: transcription failed: {e}", file.name);
                return None;
            }
        };

        let request = ScoringRequest::for_file(file, transcript);
        match self.scorer.score(&request).await {
            Ok(analysis) => Some(analysis.to_batch_result(&file.name)),
            Err(e) => {
                log::warn!("{}: scoring failed: {e}", file.name);
                None
            }
        }
    }
}
