//! Axum route handlers for the listing endpoints. Each handler is a thin
//! projection of the upstream records into the shape the frontend consumes.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::ashby::types::{Application, Job};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: String,
    pub title: String,
    pub status: String,
    pub employment_type: String,
    pub created_at: String,
}

impl From<Job> for JobSummary {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            status: job.status,
            employment_type: job.employment_type,
            created_at: job.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CandidateSummary {
    pub id: String,
    pub name: String,
    /// `null` when the upstream record carries no primary address.
    pub email: Option<String>,
    pub stage: String,
    #[serde(rename = "stageId")]
    pub stage_id: String,
    /// The id of the job this application belongs to.
    pub job: String,
}

impl From<Application> for CandidateSummary {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            name: application.candidate.name,
            email: application
                .candidate
                .primary_email_address
                .map(|address| address.value),
            stage: application.current_interview_stage.title,
            stage_id: application.current_interview_stage.id,
            job: application.job.id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CandidateQuery {
    pub job_id: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /jobs
///
/// Returns every job from the upstream listing, projected 1:1.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobSummary>>, AppError> {
    let jobs = state.ashby.list_jobs().await?;
    Ok(Json(jobs.into_iter().map(JobSummary::from).collect()))
}

/// GET /candidates?job_id=<optional>
///
/// Returns all applications, optionally filtered upstream by job id.
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateQuery>,
) -> Result<Json<Vec<CandidateSummary>>, AppError> {
    let applications = state.ashby.list_candidates(query.job_id.as_deref()).await?;
    Ok(Json(
        applications.into_iter().map(CandidateSummary::from).collect(),
    ))
}
