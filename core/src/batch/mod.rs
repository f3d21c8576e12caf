//! Batch analysis: sequential transcription + scoring of call recordings
//! and aggregate automation-feasibility statistics.

pub mod cancel;
pub mod orchestrator;
pub mod queue;
pub mod scoring;
pub mod service;
pub mod stats;

pub use cancel::CancelToken;
pub use orchestrator::{BatchOrchestrator, BatchOutcome, BatchProgress};
pub use queue::{AudioFile, BatchQueue};
pub use scoring::{AutomationTier, CallAnalysis};
pub use service::{EdgeFunctionClient, ScoringRequest, ScoringService, TranscriptionService};
pub use stats::{compute_stats, BatchStats};

use serde::{Deserialize, Serialize};

/// One analysed recording. Never mutated after it is recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchResult {
    pub file_name:          String,
    pub score:              u32,
    pub tier:               AutomationTier,
    pub call_type:          String,
    pub intent:             String,
    pub cost_reduction_pct: f64,
}
