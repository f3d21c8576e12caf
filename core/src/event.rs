//! The event bus: all inter-feed communication.
//!
//! RULE: Feeds communicate ONLY through events.
//! A feed may never call another feed's functions directly.
//! A feed may never read another feed's internal state.
//! Event records are immutable once emitted.

use crate::{
    error::SimResult,
    types::{EntityId, Tick},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every event emitted during a simulation session.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Engine events ──────────────────────────────
    SessionInitialized {
        seed: u64,
    },
    TickStarted {
        tick: Tick,
    },
    TickCompleted {
        tick: Tick,
    },

    // ── Feed events ────────────────────────────────
    CallHandled(CallEvent),
    ClaimProcessed(ClaimsEvent),
    NetworkOptimized(NetworkEvent),
    RoiAttributed(RoiEvent),

    /// Running cost-avoided total of one feed after this tick's fold.
    /// The ROI feed attributes savings from these.
    SavingsRecorded {
        tick: Tick,
        feed: String,
        total: f64,
    },
}

impl SimEvent {
    /// Stable string name for the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionInitialized { .. } => "session_initialized",
            Self::TickStarted { .. }        => "tick_started",
            Self::TickCompleted { .. }      => "tick_completed",
            Self::CallHandled(_)            => "call_handled",
            Self::ClaimProcessed(_)         => "claim_processed",
            Self::NetworkOptimized(_)       => "network_optimized",
            Self::RoiAttributed(_)          => "roi_attributed",
            Self::SavingsRecorded { .. }    => "savings_recorded",
        }
    }

    /// One line of the JSON event log.
    pub fn to_log_line(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ── Call feed ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CallerType {
    Provider,
    Member,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    AiRouted,
    Escalated,
    Resolved,
    InProgress,
}

impl CallStatus {
    /// Handled without an agent.
    pub fn is_deflected(&self) -> bool {
        matches!(self, Self::AiRouted | Self::Resolved)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallEvent {
    pub id:                  EntityId,
    pub timestamp:           DateTime<Utc>,
    pub caller_type:         CallerType,
    pub reason:              String,
    pub payer:               String,
    pub status:              CallStatus,
    pub ai_confidence:       u32,
    pub resolution_time_sec: f64,
}

// ── Claims feed ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Auto,
    Manual,
    Exception,
}

impl ClaimStatus {
    pub fn outcome_label(&self) -> &'static str {
        match self {
            Self::Auto      => "Auto-Adjudicated",
            Self::Manual    => "Manual Review",
            Self::Exception => "Exception",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClaimsEvent {
    pub id:                    EntityId,
    pub timestamp:             DateTime<Utc>,
    pub claim_id:              String,
    pub event_type:            String,
    pub confidence:            f64,
    pub adjudication_time_sec: f64,
    pub manual_review_avoided: bool,
    pub status:                ClaimStatus,
}

// ── Network feed ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkEvent {
    pub id:            EntityId,
    pub timestamp:     DateTime<Utc>,
    pub event_type:    String,
    pub savings:       u32,
    pub network:       String,
    pub plan_impact:   String,
    pub member_impact: String,
}

// ── ROI feed ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoiEvent {
    pub id:         EntityId,
    pub timestamp:  DateTime<Utc>,
    pub event_type: String,
    pub value:      u32,
    pub detail:     String,
}
