//! Paper upload endpoint

use axum::extract::{Multipart, State};
use tracing::{debug, error};

use super::state::AppState;
use crate::api::types::{ApiError, Json, UploadResponse, MAX_UPLOAD_BYTES};
use crate::domain::DomainError;
use crate::infrastructure::ingestion::MetadataOverrides;

/// The `file` part of the form
struct UploadedFile {
    filename: Option<String>,
    content_type: Option<String>,
    content: Vec<u8>,
}

enum FileKind {
    Text,
    Pdf,
    Unsupported,
}

impl UploadedFile {
    fn kind(&self) -> FileKind {
        let filename = self.filename.as_deref().unwrap_or_default().to_lowercase();
        let content_type = self.content_type.as_deref().unwrap_or_default();

        if content_type == "application/pdf" || filename.ends_with(".pdf") {
            FileKind::Pdf
        } else if matches!(content_type, "text/plain" | "application/octet-stream")
            || filename.ends_with(".txt")
        {
            FileKind::Text
        } else {
            FileKind::Unsupported
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// POST /api/upload
pub async fn upload_paper(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<UploadedFile> = None;
    let mut overrides = MetadataOverrides::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            let filename = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let content = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?;

            file = Some(UploadedFile {
                filename,
                content_type,
                content: content.to_vec(),
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read field '{}': {}", name, e)))?;

        match name.as_str() {
            "title" => overrides.title = non_empty(value),
            "authors" => overrides.authors = Some(value),
            "journal" => overrides.journal = non_empty(value),
            "year" => {
                overrides.year = match non_empty(value) {
                    Some(year) => Some(year.parse().map_err(|_| {
                        ApiError::unprocessable(format!("year: '{}' is not an integer", year))
                    })?),
                    None => None,
                }
            }
            "url" => overrides.url = non_empty(value),
            other => debug!(field = other, "Ignoring unknown upload field"),
        }
    }

    let file = file.ok_or_else(|| ApiError::unprocessable("file: field required"))?;

    if file.content.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::bad_request("File too large (max 10MB)"));
    }

    let text = match file.kind() {
        FileKind::Text => String::from_utf8_lossy(&file.content).into_owned(),
        FileKind::Pdf => {
            return Err(ApiError::bad_request(
                "PDF uploads are not supported; upload the paper as TXT",
            ));
        }
        FileKind::Unsupported => {
            return Err(ApiError::bad_request("Unsupported file type; upload TXT"));
        }
    };

    let service = state.registry.ingestion_service().await.map_err(|e| {
        error!(error = %e, "Vector store unavailable for upload");
        ApiError::internal("Failed to store document")
    })?;

    let report = service
        .ingest_text(&text, file.filename.as_deref(), overrides)
        .await
        .map_err(|e| match e {
            DomainError::Validation { .. } => ApiError::from(e),
            other => {
                error!(error = %other, "Upload ingest failed");
                ApiError::internal("Failed to store document")
            }
        })?;

    Ok(Json(report.into()))
}
