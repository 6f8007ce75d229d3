//! API Client — the single point of entry for calls to the résumé analysis backend.
//!
//! One multipart POST per user action. No retries at this layer; a caller that
//! wants them owns that policy.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::errors::RequestFailure;
use crate::models::{AdjustedDocument, AnalysisResult, ApiResponse};

const FILE_FIELD: &str = "file";
const ADJUST_FIELD: &str = "adjust";

/// Anything that can take a résumé and hand back the backend's verdict.
/// The CLI holds a `&dyn ResumeService` so it can be driven by a stub in tests.
#[async_trait]
pub trait ResumeService: Send + Sync {
    async fn send_resume(
        &self,
        file_bytes: Vec<u8>,
        filename: &str,
        adjust: bool,
    ) -> Result<ApiResponse, RequestFailure>;
}

/// HTTP implementation of `ResumeService`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    analyze_url: String,
    timeout_secs: u64,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, RequestFailure> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| RequestFailure::Transport(e.to_string()))?;

        Ok(Self {
            client,
            analyze_url: config.analyze_url(),
            timeout_secs: config.api_timeout_secs,
        })
    }
}

#[async_trait]
impl ResumeService for ApiClient {
    async fn send_resume(
        &self,
        file_bytes: Vec<u8>,
        filename: &str,
        adjust: bool,
    ) -> Result<ApiResponse, RequestFailure> {
        let size = file_bytes.len();
        let file_part = Part::bytes(file_bytes)
            .file_name(filename.to_string())
            .mime_str(mime_type_for(filename))
            .map_err(|e| RequestFailure::Transport(e.to_string()))?;

        let form = Form::new()
            .part(FILE_FIELD, file_part)
            .text(ADJUST_FIELD, if adjust { "true" } else { "false" });

        info!(url = %self.analyze_url, filename, size, adjust, "Sending résumé to backend");

        let response = self
            .client
            .post(&self.analyze_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Request to {} failed: {e}", self.analyze_url);
                RequestFailure::from_transport(e, self.timeout_secs)
            })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let body = response
            .bytes()
            .await
            .map_err(|e| RequestFailure::from_transport(e, self.timeout_secs))?;

        if !status.is_success() {
            let detail = extract_error_detail(&body);
            warn!("Backend returned {}: {}", status, detail);
            return Err(RequestFailure::Server {
                status: status.as_u16(),
                detail,
            });
        }

        debug!(
            status = status.as_u16(),
            content_type = %content_type,
            bytes = body.len(),
            "Backend responded"
        );

        Ok(interpret_body(&content_type, body))
    }
}

/// `application/pdf` for `.pdf` files (any case), `text/plain` for everything else.
fn mime_type_for(filename: &str) -> &'static str {
    if filename.to_lowercase().ends_with(".pdf") {
        "application/pdf"
    } else {
        "text/plain"
    }
}

/// Reads `detail` from a JSON error body, falling back to the raw body text.
fn extract_error_detail(body: &[u8]) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        match map.get("detail") {
            Some(Value::String(detail)) => return detail.clone(),
            Some(other) => return other.to_string(),
            None => {}
        }
    }
    String::from_utf8_lossy(body).into_owned()
}

/// Dispatches a successful body on its declared content type.
/// Unknown or missing types try JSON first and otherwise keep the raw bytes.
fn interpret_body(content_type: &str, body: Bytes) -> ApiResponse {
    if content_type.contains("application/json") {
        return decode_json(&body).unwrap_or(ApiResponse::Unrecognized(body));
    }

    if content_type.contains("application/pdf") {
        return ApiResponse::Document(AdjustedDocument::new(body));
    }

    decode_json(&body).unwrap_or_else(|| ApiResponse::Document(AdjustedDocument::new(body)))
}

/// `None` when the body is not JSON at all.
fn decode_json(body: &Bytes) -> Option<ApiResponse> {
    let value = serde_json::from_slice::<Value>(body).ok()?;
    if !value.is_object() {
        warn!("Backend JSON is not an object");
        return Some(ApiResponse::Unrecognized(body.clone()));
    }
    match serde_json::from_value::<AnalysisResult>(value) {
        Ok(result) => Some(ApiResponse::Analysis(result)),
        Err(e) => {
            warn!("Backend JSON does not match the analysis shape: {e}");
            Some(ApiResponse::Unrecognized(body.clone()))
        }
    }
}
