//! Axum route handlers for the Resume API: preview and the two downloads.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::header::{self, HeaderValue},
    response::{IntoResponse, Response},
    Form, Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::render::render_docx;
use crate::resume::builder::{build_record, DroppedEntry};
use crate::resume::form::ResumeForm;
use crate::resume::preview::render_preview;
use crate::state::AppState;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_FILENAME: &str = "resume.docx";
pub const PDF_FILENAME: &str = "resume.pdf";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// The submitted form, from either a JSON body or a url-encoded browser form.
#[derive(Debug)]
pub struct ResumeInput(pub ResumeForm);

#[async_trait]
impl<S> FromRequest<S> for ResumeInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            Ok(ResumeInput(ResumeForm::from_flat_fields(&fields)))
        } else {
            let Json(form) = Json::<ResumeForm>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            Ok(ResumeInput(form))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub record: ResumeRecord,
    /// Markdown rendering of the record.
    pub preview: String,
    pub dropped_entries: Vec<DroppedEntry>,
}

/// A finished artifact ready to be sent as an attachment.
#[derive(Debug)]
pub struct Download {
    pub bytes: Bytes,
    pub filename: &'static str,
    pub mime: &'static str,
}

impl IntoResponse for Download {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename);
        (
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(self.mime)),
                (
                    header::CONTENT_DISPOSITION,
                    HeaderValue::from_str(&disposition)
                        .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
                ),
            ],
            self.bytes,
        )
            .into_response()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/preview
///
/// Returns the built record, its Markdown preview, and notices for entries
/// that were left out.
pub async fn handle_preview(
    State(state): State<AppState>,
    ResumeInput(form): ResumeInput,
) -> Result<Json<PreviewResponse>, AppError> {
    let outcome = build_record(&form, state.group_limits);
    let preview = render_preview(&outcome.record);

    Ok(Json(PreviewResponse {
        record: outcome.record,
        preview,
        dropped_entries: outcome.dropped,
    }))
}

/// POST /api/v1/resume/docx
pub async fn handle_download_docx(
    State(state): State<AppState>,
    ResumeInput(form): ResumeInput,
) -> Result<Download, AppError> {
    let record = build_record(&form, state.group_limits).record;
    let docx = render_docx(&record)?;
    info!(bytes = docx.len(), "Serving DOCX download");

    Ok(Download {
        bytes: Bytes::from(docx),
        filename: DOCX_FILENAME,
        mime: DOCX_MIME,
    })
}

/// POST /api/v1/resume/pdf
///
/// Renders DOCX, then converts. A failed conversion returns an error body,
/// never a partial file.
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    ResumeInput(form): ResumeInput,
) -> Result<Download, AppError> {
    let record = build_record(&form, state.group_limits).record;
    let docx = render_docx(&record)?;
    let pdf = state.converter.convert(&docx).await?;
    info!(
        backend = state.converter.backend(),
        bytes = pdf.len(),
        "Serving PDF download"
    );

    Ok(Download {
        bytes: Bytes::from(pdf),
        filename: PDF_FILENAME,
        mime: PDF_MIME,
    })
}
