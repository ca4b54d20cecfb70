//! Ashby API client — the single point of entry for all upstream ATS calls.
//!
//! Every Ashby endpoint is a POST; list calls carry a JSON body, the file
//! upload is multipart. Authentication is a static credential attached to
//! each request.

use std::path::Path;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

pub mod types;

use types::{Application, ApplicationListResponse, Job, JobListResponse};

const ASHBY_API_URL: &str = "https://api.ashbyhq.com";

#[derive(Debug, Error)]
pub enum AshbyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationListRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    job_id: Option<&'a str>,
}

/// Client for the Ashby ATS, shared across all handlers.
#[derive(Clone)]
pub struct AshbyClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AshbyClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, ASHBY_API_URL.to_string())
    }

    /// Point the client at an alternative base URL (used by tests to target
    /// a stub upstream).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url,
        }
    }

    /// Fetches the full job listing in a single call.
    pub async fn list_jobs(&self) -> Result<Vec<Job>, AshbyError> {
        let response: JobListResponse = self.post_json("/job.list", &serde_json::json!({})).await?;
        Ok(response.results)
    }

    /// Fetches all applications, following the server-issued cursor until the
    /// upstream reports no more data. Arrival order is preserved across
    /// pages; a failure on any page aborts the whole accumulation.
    pub async fn list_candidates(&self, job_id: Option<&str>) -> Result<Vec<Application>, AshbyError> {
        let mut applications = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let request = ApplicationListRequest {
                cursor: cursor.as_deref(),
                job_id,
            };
            let page: ApplicationListResponse =
                self.post_json("/application.list", &request).await?;

            debug!(
                page_size = page.results.len(),
                more = page.more_data_available,
                "fetched application page"
            );
            applications.extend(page.results);

            if !page.more_data_available {
                break;
            }
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => {
                    // Upstream claims more data but gave us nothing to fetch
                    // it with. Return what we have instead of spinning.
                    warn!("application.list reported more data without a cursor; stopping");
                    break;
                }
            }
        }

        Ok(applications)
    }

    /// Uploads a rendered report to a candidate's profile. All failures are
    /// caught and reduced to `false`; the caller is never interrupted by an
    /// upload problem.
    pub async fn upload_file(&self, candidate_id: &str, file_path: &Path) -> bool {
        match self.try_upload(candidate_id, file_path).await {
            Ok(()) => {
                info!(candidate_id, path = %file_path.display(), "report uploaded");
                true
            }
            Err(e) => {
                error!(candidate_id, "failed to upload report: {e}");
                false
            }
        }
    }

    async fn try_upload(&self, candidate_id: &str, file_path: &Path) -> Result<(), AshbyError> {
        let bytes = tokio::fs::read(file_path).await?;
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("assessment.pdf")
            .to_string();

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let form = Form::new()
            .text("candidateId", candidate_id.to_string())
            .part("file", part);

        // No JSON content type here; reqwest sets the multipart boundary.
        let response = self
            .client
            .post(format!("{}/candidate.uploadFile", self.base_url))
            .header(AUTHORIZATION, format!("Basic {}", self.api_key))
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AshbyError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AshbyError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header(AUTHORIZATION, format!("Basic {}", self.api_key))
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AshbyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
