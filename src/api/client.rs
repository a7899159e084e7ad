use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::blocking::{Client, multipart};
use tracing::{debug, info};

use super::request::AnalysisRequest;
use crate::models::{AnalysisResponse, AnalysisResult};

/// Path of the analysis endpoint relative to the service base url
pub const ANALYZE_PATH: &str = "/api/v1/analyze";

/// Notice shown to the user for any failed submission
pub const SUBMISSION_FAILED_MESSAGE: &str =
    "Analysis failed. Please check your connection or try again later.";

/// Anything that can turn a request into an analysis report
pub trait AnalysisApi {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;
}

/// Blocking HTTP client for the analysis service
pub struct HttpAnalysisClient {
    client: Client,
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client =
            Client::builder().timeout(timeout).build().context("Failed to build HTTP client")?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_PATH)
    }
}

impl AnalysisApi for HttpAnalysisClient {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let url = self.endpoint();
        info!(
            file = %request.file_name,
            bytes = request.document.len(),
            %url,
            "submitting contract"
        );

        let file_part = multipart::Part::bytes(request.document.clone())
            .file_name(request.file_name.clone());
        let form = multipart::Form::new()
            .part("file", file_part)
            .text("user_explanation", request.expectations.clone());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .with_context(|| format!("Analysis request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("Analysis service returned {}: {}", status, body);
        }

        let parsed: AnalysisResponse =
            response.json().context("Failed to parse analysis response")?;
        debug!(
            score = parsed.analysis.score,
            risks = parsed.analysis.risks.len(),
            "analysis received"
        );
        Ok(parsed.analysis)
    }
}
