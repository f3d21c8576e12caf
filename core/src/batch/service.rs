//! External transcription / scoring services and the HTTP client that
//! speaks to the hosted edge functions.

use super::queue::AudioFile;
use super::scoring::{parse_analysis_body, CallAnalysis};
use crate::config::BatchConfig;
use crate::error::ServiceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRequest {
    pub transcript:       String,
    pub file_name:        String,
    pub duration_seconds: u64,
}

impl ScoringRequest {
    pub fn for_file(file: &AudioFile, transcript: String) -> Self {
        Self {
            transcript,
            file_name: file.name.clone(),
            duration_seconds: file.estimated_duration_secs(),
        }
    }
}

#[async_trait]
pub trait TranscriptionService: Send + Sync {
    /// Transcript text; empty when the service heard nothing.
    async fn transcribe(&self, file: &AudioFile) -> Result<String, ServiceError>;
}

#[async_trait]
pub trait ScoringService: Send + Sync {
    async fn score(&self, request: &ScoringRequest) -> Result<CallAnalysis, ServiceError>;
}

#[derive(Deserialize)]
struct TranscribeResponse {
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    raw_text:   Option<String>,
}

/// Client for `transcribe-call` and `analyze-call`.
pub struct EdgeFunctionClient {
    client:   reqwest::Client,
    base_url: String,
    api_key:  String,
}

impl EdgeFunctionClient {
    /// `base_url` like `https://project.example.co`; a trailing slash is dropped.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(config: &BatchConfig) -> Self {
        Self::new(config.functions_url.clone(), config.api_key.clone())
    }

    fn endpoint(&self, function: &str) -> String {
        format!("{}/functions/v1/{function}", self.base_url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn checked(resp: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }
}

#[async_trait]
impl TranscriptionService for EdgeFunctionClient {
    async fn transcribe(&self, file: &AudioFile) -> Result<String, ServiceError> {
        let url = self.endpoint("transcribe-call");
        let part = reqwest::multipart::Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = reqwest::multipart::Form::new().part("audio", part);

        log::debug!("transcribing {} ({} bytes)", file.name, file.size());
        let resp = self.authorized(self.client.post(&url)).multipart(form).send().await?;
        let body = Self::checked(resp).await?.text().await?;
        let parsed: TranscribeResponse = serde_json::from_str(&body)?;

        Ok(parsed
            .transcript
            .filter(|t| !t.is_empty())
            .or(parsed.raw_text)
            .unwrap_or_default())
    }
}

#[async_trait]
impl ScoringService for EdgeFunctionClient {
    async fn score(&self, request: &ScoringRequest) -> Result<CallAnalysis, ServiceError> {
        let url = self.endpoint("analyze-call");

        log::debug!("scoring {} ({}s)", request.file_name, request.duration_seconds);
        let resp = self.authorized(self.client.post(&url)).json(request).send().await?;
        let body = Self::checked(resp).await?.text().await?;
        Ok(parse_analysis_body(&body))
    }
}
