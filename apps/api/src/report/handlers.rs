//! Axum route handlers for the Report API.

use axum::{
    extract::{Path, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::layout::{plan, summarize_plan, PagePlan, PlanSummary};
use crate::models::DocumentSpec;
use crate::render::OutputFormat;
use crate::report::generator::{prepare_spec, run_generation};
use crate::state::AppState;

static PAGE_COUNT_HEADER: HeaderName = HeaderName::from_static("x-page-count");

#[derive(Debug, Serialize)]
pub struct PlanResponse<'a> {
    pub pages: Vec<PagePlan<'a>>,
    pub summary: PlanSummary,
}

/// POST /api/v1/plan
///
/// Returns the computed page plan without rendering. Photo bytes are omitted.
pub async fn handle_plan(
    State(state): State<AppState>,
    Json(spec): Json<DocumentSpec>,
) -> Result<Json<Value>, AppError> {
    let spec = prepare_spec(spec, &state.config.default_header_text)?;

    let pages = plan(&spec, &state.geometry);
    let summary = summarize_plan(&pages, &state.geometry);
    let body = serde_json::to_value(PlanResponse { pages, summary })
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize plan: {e}")))?;

    Ok(Json(body))
}

/// POST /api/v1/documents/:format
///
/// Renders the document as `pdf` or `docx` and returns it as an attachment.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(format): Path<OutputFormat>,
    Json(spec): Json<DocumentSpec>,
) -> Result<Response, AppError> {
    let spec = prepare_spec(spec, &state.config.default_header_text)?;
    let document = run_generation(spec, format, state.geometry).await?;

    let disposition = content_disposition(&document.filename)?;
    let page_count = HeaderValue::from(document.summary.page_count);

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(format.mime())),
            (header::CONTENT_DISPOSITION, disposition),
            (PAGE_COUNT_HEADER.clone(), page_count),
        ],
        document.bytes,
    )
        .into_response())
}

/// `attachment; filename="..."` with quotes and backslashes escaped.
fn content_disposition(filename: &str) -> Result<HeaderValue, AppError> {
    let escaped = filename.replace('\\', "\\\\").replace('"', "\\\"");
    HeaderValue::from_str(&format!("attachment; filename=\"{escaped}\"")).map_err(|_| {
        AppError::Validation("Document title contains characters not allowed in a filename".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_escapes_quotes() {
        let value = content_disposition("Gedung \"A\"_2024.pdf").unwrap();
        assert_eq!(
            value.to_str().unwrap(),
            "attachment; filename=\"Gedung \\\"A\\\"_2024.pdf\""
        );
    }

    #[test]
    fn test_content_disposition_rejects_control_chars() {
        assert!(content_disposition("bad\nname.pdf").is_err());
    }
}
