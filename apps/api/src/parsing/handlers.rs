//! Axum route handlers for the Resume API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{file_extension, DocumentFormat, ParsedResume, RawDocument};
use crate::report::template::CandidateStatus;
use crate::report::DOCX_MIME;
use crate::state::AppState;

/// Multipart field carrying the résumé.
const FILE_FIELD: &str = "file";

const REPORT_OUTCOME_HEADER: &str = "x-report-outcome";

#[derive(Debug, Serialize)]
pub struct TemplateStatusResponse {
    pub template_name: String,
    pub candidates: Vec<CandidateStatus>,
}

/// POST /api/v1/resumes/parse
///
/// Multipart upload → extracted contact info, skills and education as JSON.
pub async fn handle_parse(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParsedResume>, AppError> {
    let raw = read_upload(multipart).await?;
    let request_id = Uuid::new_v4();
    let parser = state.parser.clone();

    let parsed = tokio::task::spawn_blocking(move || {
        let _span = info_span!("parse", %request_id).entered();
        parser.parse(&raw)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    Ok(Json(parsed))
}

/// POST /api/v1/resumes/report
///
/// Multipart upload → downloadable Word report. Once the upload parses, a
/// document is always returned; `X-Report-Outcome` says which path built it.
pub async fn handle_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let raw = read_upload(multipart).await?;
    let request_id = Uuid::new_v4();
    let parser = state.parser.clone();
    let renderer = state.renderer.clone();

    let report = tokio::task::spawn_blocking(move || -> Result<_, AppError> {
        let _span = info_span!("report", %request_id).entered();
        let parsed = parser.parse(&raw)?;
        Ok(renderer.render(&parsed)?)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        report.filename
    ))
    .map_err(|e| AppError::Internal(e.into()))?;

    info!("Serving {} ({} bytes)", report.filename, report.bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_MIME)),
            (header::CONTENT_DISPOSITION, disposition),
            (
                HeaderName::from_static(REPORT_OUTCOME_HEADER),
                HeaderValue::from_static(report.outcome.label()),
            ),
        ],
        report.bytes,
    )
        .into_response())
}

/// GET /api/v1/template/status
///
/// Lists every template candidate path with whether it exists right now.
pub async fn handle_template_status(State(state): State<AppState>) -> Json<TemplateStatusResponse> {
    Json(TemplateStatusResponse {
        template_name: state.config.template_name.clone(),
        candidates: state.renderer.template_candidates(),
    })
}

/// Pulls the `file` field out of the multipart body. The extension is checked
/// before the field's bytes are read, so unsupported uploads are never buffered.
async fn read_upload(mut multipart: Multipart) -> Result<RawDocument, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Invalid multipart body"))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let extension = file_extension(&filename).unwrap_or_default();
        if DocumentFormat::from_extension(&extension).is_none() {
            return Err(AppError::UnsupportedFormat(extension));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "Failed to read file data"))?;

        info!("File uploaded: {filename} ({} bytes)", bytes.len());
        return Ok(RawDocument::new(filename, bytes));
    }

    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

/// Body-limit rejections surface as multipart read errors; keep them apart
/// from malformed bodies.
fn multipart_error(err: MultipartError, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: {}", err.body_text()))
    } else {
        AppError::Validation(format!("{context}: {}", err.body_text()))
    }
}
