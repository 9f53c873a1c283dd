//! Axum route handlers for the Resume API.

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        Multipart, State,
    },
    Json,
};
use bytes::Bytes;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_pdf_text, DocumentRole};
use crate::resume::fields::BuildResumeRequest;
use crate::resume::generator::generate_structured_resume;
use crate::resume::prompts::{build_prompt, enhancement_prompt};
use crate::state::AppState;

const MISSING_UPLOADS: &str = "Please upload both a resume and a job description.";

/// POST /enhance_resume
///
/// Multipart upload of two PDFs (`resume`, `job_description`). Both are
/// extracted, sent to the model with the enhancement prompt, and the JSON
/// object in the answer is returned.
pub async fn handle_enhance_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    let multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
    let (resume_pdf, jd_pdf) = read_uploads(multipart).await?;

    let resume_text = extract_text(resume_pdf, DocumentRole::Resume).await?;
    let jd_text = extract_text(jd_pdf, DocumentRole::JobDescription).await?;
    info!("PDF files read successfully");

    let prompt = enhancement_prompt(&resume_text, &jd_text);
    let resume = generate_structured_resume(state.llm.as_ref(), &prompt).await?;
    Ok(Json(resume))
}

/// POST /build_resume
///
/// JSON body with the eight required fields. Validation happens before any
/// model call.
pub async fn handle_build_resume(
    State(state): State<AppState>,
    body: Result<Json<BuildResumeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    info!("Starting build_resume");
    let Json(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    let fields = request.validate()?;

    let prompt = build_prompt(&fields);
    let resume = generate_structured_resume(state.llm.as_ref(), &prompt).await?;
    Ok(Json(resume))
}

/// Collects the two document fields; other fields are ignored.
async fn read_uploads(mut multipart: Multipart) -> Result<(Bytes, Bytes), AppError> {
    let mut resume = None;
    let mut job_description = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let slot = match field.name() {
            Some(name) if name == DocumentRole::Resume.field_name() => &mut resume,
            Some(name) if name == DocumentRole::JobDescription.field_name() => {
                &mut job_description
            }
            _ => continue,
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        *slot = Some(data);
    }

    match (resume, job_description) {
        (Some(resume), Some(job_description)) => Ok((resume, job_description)),
        _ => {
            tracing::warn!("No resume or job description file provided");
            Err(AppError::Validation(MISSING_UPLOADS.to_string()))
        }
    }
}

/// Runs PDF extraction on the blocking pool.
async fn extract_text(pdf: Bytes, role: DocumentRole) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || extract_pdf_text(&pdf, role))
        .await
        .map_err(|e| anyhow::anyhow!("PDF extraction task failed for {role}: {e}"))??;
    Ok(text)
}
