//! Upstream record shapes as Ashby returns them. Unknown fields are ignored;
//! the listing endpoints project these down to the shapes the frontend sees.

use serde::{Deserialize, Serialize};

/// A job posting, sourced verbatim from `job.list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub status: String,
    pub employment_type: String,
    pub created_at: String,
}

/// An application record from `application.list`, linking a candidate to a
/// job and tracking interview-stage progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub candidate: Candidate,
    pub current_interview_stage: InterviewStage,
    pub job: JobRef,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub primary_email_address: Option<EmailAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAddress {
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewStage {
    pub id: String,
    pub title: String,
}

/// The job sub-object embedded in an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRef {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JobListResponse {
    pub results: Vec<Job>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListResponse {
    pub results: Vec<Application>,
    pub more_data_available: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}
