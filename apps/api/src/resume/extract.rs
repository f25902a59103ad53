//! Uploaded file → plain text.

use tracing::{debug, warn};

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Returns the text content of an uploaded resume.
///
/// PDFs (by content type, `.pdf` filename or `%PDF` header) go through
/// `pdf-extract`; everything else is read as UTF-8 with invalid bytes replaced.
/// An unreadable PDF or a file with no visible text is a client error.
pub fn extract_text(
    bytes: &[u8],
    content_type: Option<&str>,
    filename: Option<&str>,
) -> Result<String, AppError> {
    let text = if is_pdf(bytes, content_type, filename) {
        debug!("Extracting text from PDF ({} bytes)", bytes.len());
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            warn!("PDF text extraction failed: {e}");
            AppError::Validation("Could not read PDF file".to_string())
        })?
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract text from file".to_string(),
        ));
    }
    Ok(text)
}

fn is_pdf(bytes: &[u8], content_type: Option<&str>, filename: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.eq_ignore_ascii_case("application/pdf"))
        || filename.is_some_and(|name| name.to_ascii_lowercase().ends_with(".pdf"))
        || bytes.starts_with(PDF_MAGIC)
}
