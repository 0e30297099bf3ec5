//! Axum route handlers for the assessment flow: upload → dashboard → schemes.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::advisor::Scheme;
use crate::assessment::persistence::save_extracted_skills;
use crate::assessment::service::{assess, JobGapResult};
use crate::auth::session::CurrentUser;
use crate::errors::AppError;
use crate::resume::extract_pdf_text;
use crate::scoring::{JobRequirement, ScoreResult, UserSkillSet};
use crate::state::AppState;

const DEFAULT_TARGET_JOB: &str = "Professional";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub name: String,
    pub target_job: Option<String>,
    pub results: Vec<JobGapResult>,
}

#[derive(Debug, Serialize)]
pub struct SchemesResponse {
    pub target_job: String,
    pub schemes: Vec<Scheme>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub user_skills: UserSkillSet,
    #[serde(default)]
    pub job_requirements: JobRequirement,
}

struct UploadForm {
    filename: String,
    data: Bytes,
    target_job: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/assessment/upload
///
/// Multipart `resume_file` + `target_job`. Extracts skills, stores them,
/// scores them against generated requirements and keeps the results in the session.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Json<DashboardResponse>, AppError> {
    let form = read_upload_form(multipart).await?;
    let user_id = user.session.user_id;
    info!(%user_id, target_job = %form.target_job, file = %form.filename, "Starting resume assessment");

    let resume_text = match extract_pdf_text(form.data).await {
        Ok(text) => text,
        Err(e) => {
            warn!(%user_id, "Could not read resume: {e:#}");
            String::new()
        }
    };

    let user_skills = state.advisor.extract_skills(&resume_text).await;

    match save_extracted_skills(&state.db, user_id, &user_skills).await {
        Ok(saved) => info!(%user_id, saved, "Stored extracted skills"),
        Err(e) => error!(%user_id, "Failed to store extracted skills: {e}"),
    }

    let jobs = state.advisor.job_requirements(&form.target_job).await;
    let assessment = assess(&state.scorer, &user_skills, &jobs);
    info!(
        %user_id,
        jobs = assessment.results.len(),
        missing = assessment.missing_skills.len(),
        "Assessment complete"
    );

    let mut session = user.session;
    session.latest_results = assessment.results;
    session.latest_missing_skills = assessment.missing_skills;
    session.target_job = Some(form.target_job);
    state.sessions.save(user.session_id, &session).await?;

    Ok(Json(DashboardResponse {
        name: session.user_name,
        target_job: session.target_job,
        results: session.latest_results,
    }))
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(user: CurrentUser) -> Json<DashboardResponse> {
    let session = user.session;
    Json(DashboardResponse {
        name: session.user_name,
        target_job: session.target_job,
        results: session.latest_results,
    })
}

/// GET /api/v1/schemes
///
/// Suggests upskilling schemes for the skills missing from the latest assessment.
pub async fn handle_schemes(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Json<SchemesResponse> {
    let session = user.session;
    let target_job = session
        .target_job
        .unwrap_or_else(|| DEFAULT_TARGET_JOB.to_string());

    let schemes = if session.latest_missing_skills.is_empty() {
        Vec::new()
    } else {
        state
            .advisor
            .suggest_schemes(&target_job, &session.latest_missing_skills)
            .await
    };

    Json(SchemesResponse { target_job, schemes })
}

/// POST /api/v1/score
///
/// Scores a skill set against one requirement set directly, without the AI steps.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Json<ScoreResult> {
    Json(state.scorer.score(&req.user_skills, &req.job_requirements))
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut target_job: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume_file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid resume file: {e}")))?;
                file = Some((filename, data));
            }
            Some("target_job") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid target_job: {e}")))?;
                target_job = Some(text.trim().to_string());
            }
            _ => {}
        }
    }

    let (filename, data) = file
        .filter(|(filename, _)| !filename.trim().is_empty())
        .ok_or_else(|| AppError::Validation("resume_file is required".to_string()))?;
    let target_job = target_job
        .filter(|job| !job.is_empty())
        .ok_or_else(|| AppError::Validation("target_job is required".to_string()))?;

    Ok(UploadForm {
        filename,
        data,
        target_job,
    })
}
