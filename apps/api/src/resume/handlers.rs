use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ParsedResume;
use crate::resume::extract::extract_text;
use crate::resume::parser::parse_resume;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    #[serde(default)]
    pub text: String,
}

struct UploadedFile {
    bytes: Vec<u8>,
    content_type: Option<String>,
    filename: Option<String>,
}

/// POST /api/resume/upload
/// Multipart form with a single `file` field (PDF or plain text).
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParsedResume>, AppError> {
    let mut upload: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Multipart error", e))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let filename = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Read error", e))?;
        upload = Some(UploadedFile {
            bytes: bytes.to_vec(),
            content_type,
            filename,
        });
    }

    let upload = upload
        .filter(|u| !u.bytes.is_empty())
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    info!(
        "Resume upload: {:?} ({} bytes, {:?})",
        upload.filename,
        upload.bytes.len(),
        upload.content_type
    );

    // PDF extraction is CPU-bound.
    let text = tokio::task::spawn_blocking(move || {
        extract_text(
            &upload.bytes,
            upload.content_type.as_deref(),
            upload.filename.as_deref(),
        )
    })
    .await
    .map_err(|e| anyhow::anyhow!("text extraction task failed: {e}"))??;

    let parsed = parse_resume(&text, &state.llm).await?;
    Ok(Json(parsed))
}

/// Uploads over the route's body limit become 413; other multipart failures are 400.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Resume file exceeds the 5 MiB upload limit".to_string())
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}

/// POST /api/resume/parse
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(req): Json<ParseResumeRequest>,
) -> Result<Json<ParsedResume>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("text is required".to_string()));
    }
    let parsed = parse_resume(&req.text, &state.llm).await?;
    Ok(Json(parsed))
}
