use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Engine stopped: tick() called after stop()")]
    EngineStopped,

    #[error("Invalid config: {0}")]
    Config(String),
}

pub type SimResult<T> = Result<T, SimError>;

/// Failures talking to the external transcription / scoring functions.
/// The batch orchestrator swallows these per file.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
