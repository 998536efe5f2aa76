//! Report Generation — validates a document spec, plans it and renders it.
//!
//! Flow: validate → plan → summarize → render → name the file.
//!
//! Planning and rendering are CPU-bound and synchronous; `run_generation` moves
//! them onto the blocking pool so the async executor is never stalled. Output is
//! all-or-nothing: a failed render returns no bytes.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::layout::{plan, summarize_plan, PageGeometry, PlanSummary};
use crate::models::photo::format_file_size;
use crate::models::DocumentSpec;
use crate::render::{document_filename, renderer_for, OutputFormat, RenderError};

/// A finished document, ready to send.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
    pub summary: PlanSummary,
}

/// Rejects specs that cannot produce a document and fills in a blank title.
pub fn prepare_spec(mut spec: DocumentSpec, default_title: &str) -> Result<DocumentSpec, AppError> {
    if spec.projects.is_empty() {
        return Err(AppError::Validation(
            "Add at least one project before generating a document".to_string(),
        ));
    }

    if spec.title.trim().is_empty() {
        spec.title = default_title.to_string();
    }

    // The title becomes the download filename; reject it before any rendering.
    if spec.title.chars().any(char::is_control) {
        return Err(AppError::Validation(
            "Document title contains characters not allowed in a filename".to_string(),
        ));
    }

    Ok(spec)
}

/// Plans and renders a prepared spec. Synchronous.
pub fn generate_document(
    spec: &DocumentSpec,
    format: OutputFormat,
    geometry: &PageGeometry,
    at: DateTime<Utc>,
) -> Result<GeneratedDocument, RenderError> {
    let pages = plan(spec, geometry);
    let summary = summarize_plan(&pages, geometry);

    let renderer = renderer_for(format, *geometry);
    debug!(pages = pages.len(), "Rendering {:?}", renderer.format());
    let bytes = renderer.render(&spec.title, &pages)?;

    Ok(GeneratedDocument {
        filename: document_filename(&spec.title, at, format),
        format,
        bytes,
        summary,
    })
}

/// Runs `generate_document` on the blocking pool.
pub async fn run_generation(
    spec: DocumentSpec,
    format: OutputFormat,
    geometry: PageGeometry,
) -> Result<GeneratedDocument, AppError> {
    let payload_bytes: u64 = spec
        .projects
        .iter()
        .flat_map(|p| p.active_sections())
        .flat_map(|s| s.photos.iter())
        .map(|photo| photo.size)
        .sum();
    info!(
        "Generating {:?} for '{}': {} projects, {} photos ({})",
        format,
        spec.title,
        spec.projects.len(),
        spec.photo_count(),
        format_file_size(payload_bytes)
    );

    let document = tokio::task::spawn_blocking(move || {
        generate_document(&spec, format, &geometry, Utc::now())
    })
    .await
    .map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "spawn_blocking failed in document generation: {e}"
        ))
    })??;

    info!(
        pages = document.summary.page_count,
        continuation_titles = document.summary.continuation_titles,
        bytes = document.bytes.len(),
        "Generated {}",
        document.filename
    );

    Ok(document)
}
