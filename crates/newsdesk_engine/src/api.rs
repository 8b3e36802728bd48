use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use url::Url;

use newsdesk_core::{parse_records, Record};
use newsdesk_logging::{desk_debug, desk_info};

use crate::{ApiError, FailureKind};

pub const RUN_PATH: &str = "api/run";
pub const EXPORT_PATH: &str = "api/export";
pub const LOG_STREAM_PATH: &str = "api/logs/stream";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
}

impl ApiSettings {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn parse(base_url: &str) -> Result<Self, ApiError> {
        let url = Url::parse(base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        Ok(Self::new(url))
    }

    /// Resolves `path` below the base URL, keeping any base path prefix.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

/// The two request/response endpoints of the job server.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Starts a gathering job and returns its records in server order.
    async fn run(&self, api_key: &str) -> Result<Vec<Record>, ApiError>;

    /// Converts `records` into a downloadable file; returns the raw file bytes.
    async fn export(&self, records: &[Record]) -> Result<Bytes, ApiError>;
}

#[derive(Serialize)]
struct RunRequest<'a> {
    api_key: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: ApiSettings, client: reqwest::Client) -> Self {
        Self { settings, client }
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    async fn post_json(&self, path: &str, body: Vec<u8>) -> Result<reqwest::Response, ApiError> {
        let url = self.settings.endpoint(path)?;
        desk_debug!("POST {} ({} bytes)", url, body.len());
        self.client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn run(&self, api_key: &str) -> Result<Vec<Record>, ApiError> {
        let body = encode(&RunRequest { api_key })?;
        let response = self.post_json(RUN_PATH, body).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let records = parse_records(&bytes)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        desk_info!("Run returned {} records", records.len());
        Ok(records)
    }

    async fn export(&self, records: &[Record]) -> Result<Bytes, ApiError> {
        let body = encode(records)?;
        let response = self.post_json(EXPORT_PATH, body).await?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            let message = error_message(&bytes).unwrap_or_else(|| status.to_string());
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        desk_info!("Export returned {} bytes", bytes.len());
        Ok(bytes)
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(value).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
}

/// Pulls a human-readable reason out of an error body such as `{"error": "..."}`.
fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(ToOwned::to_owned)
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        return ApiError::new(FailureKind::InvalidUrl, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
