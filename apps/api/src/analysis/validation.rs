use thiserror::Error;

/// The only document type accepted for analysis.
pub const ACCEPTED_CONTENT_TYPE: &str = "application/pdf";
/// Extracted text is cut to this many characters before it is analyzed or hashed.
pub const MAX_RESUME_CHARS: usize = 8000;
/// Minimum trimmed length for a résumé to be worth an AI call.
pub const MIN_RESUME_CHARS: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Only PDF files are allowed")]
    InvalidDocumentType { declared: Option<String> },

    #[error("Resume content too short for analysis")]
    InsufficientContent { chars: usize },
}

/// Rejects anything not declared as a PDF.
pub fn validate_content_type(content_type: Option<&str>) -> Result<(), ValidationError> {
    match content_type {
        Some(ACCEPTED_CONTENT_TYPE) => Ok(()),
        other => Err(ValidationError::InvalidDocumentType {
            declared: other.map(String::from),
        }),
    }
}

/// Keeps at most `MAX_RESUME_CHARS` characters. Counts chars, not bytes.
pub fn truncate_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_RESUME_CHARS) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Rejects text whose trimmed length is below `MIN_RESUME_CHARS`.
pub fn validate_extracted_text(text: &str) -> Result<(), ValidationError> {
    let chars = text.trim().chars().count();
    if chars < MIN_RESUME_CHARS {
        return Err(ValidationError::InsufficientContent { chars });
    }
    Ok(())
}
