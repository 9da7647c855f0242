//! Resume attachments. Decodes `data:` URIs and extracts the text the question
//! prompt embeds. PDFs go through `pdf-extract`; plain text is taken as UTF-8.

use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use thiserror::Error;

/// Upper bound on the decoded attachment, matching the upload limit in the UI.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;
/// Extracted text beyond this many characters is dropped before prompting.
pub const MAX_RESUME_CHARS: usize = 20_000;

const PDF_MIME: &str = "application/pdf";
const TEXT_MIME: &str = "text/plain";

#[derive(Debug, Error, PartialEq)]
pub enum ResumeError {
    #[error("Resume must be a data URI")]
    NotDataUri,

    #[error("Resume data URI must be base64 encoded")]
    NotBase64,

    #[error("Resume data is not valid base64")]
    InvalidBase64,

    #[error("Resume must be under 5MB (got {0} bytes)")]
    TooLarge(usize),

    #[error("Resume must be a PDF or plain text file (got {0})")]
    UnsupportedType(String),

    #[error("Could not read text from the resume PDF")]
    Unreadable,

    #[error("Resume contains no readable text")]
    NoText,
}

/// A decoded resume upload.
#[derive(Debug, Clone)]
pub struct ResumeAttachment {
    pub mime_type: String,
    pub bytes: Bytes,
}

impl ResumeAttachment {
    /// Parses `data:<mimetype>[;param=value]*;base64,<payload>`.
    pub fn from_data_uri(uri: &str) -> Result<Self, ResumeError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or(ResumeError::NotDataUri)?;
        let (header, payload) = rest.split_once(',').ok_or(ResumeError::NotDataUri)?;

        let mut params = header.split(';');
        let mime_type = params
            .next()
            .map(|m| m.trim().to_ascii_lowercase())
            .unwrap_or_default();
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(ResumeError::NotBase64);
        }

        if mime_type != PDF_MIME && mime_type != TEXT_MIME {
            let shown = if mime_type.is_empty() {
                "unknown type".to_string()
            } else {
                mime_type
            };
            return Err(ResumeError::UnsupportedType(shown));
        }

        // Reject oversized payloads before allocating the decoded buffer
        let estimated = payload.len() / 4 * 3;
        if estimated > MAX_RESUME_BYTES + 3 {
            return Err(ResumeError::TooLarge(estimated));
        }

        let decoded = STANDARD
            .decode(payload.trim())
            .map_err(|_| ResumeError::InvalidBase64)?;
        if decoded.len() > MAX_RESUME_BYTES {
            return Err(ResumeError::TooLarge(decoded.len()));
        }

        Ok(Self {
            mime_type,
            bytes: Bytes::from(decoded),
        })
    }

    /// Extracts readable text, capped at `MAX_RESUME_CHARS`.
    pub fn extract_text(&self) -> Result<String, ResumeError> {
        let raw = match self.mime_type.as_str() {
            PDF_MIME => pdf_extract::extract_text_from_mem(&self.bytes).map_err(|e| {
                tracing::warn!("PDF text extraction failed: {e}");
                ResumeError::Unreadable
            })?,
            TEXT_MIME => String::from_utf8_lossy(&self.bytes).into_owned(),
            other => return Err(ResumeError::UnsupportedType(other.to_string())),
        };

        let text = raw.trim();
        if text.is_empty() {
            return Err(ResumeError::NoText);
        }

        Ok(text.chars().take(MAX_RESUME_CHARS).collect())
    }
}

/// Decodes a resume data URI and returns its text in one step.
pub fn resume_text_from_data_uri(uri: &str) -> Result<String, ResumeError> {
    ResumeAttachment::from_data_uri(uri)?.extract_text()
}
