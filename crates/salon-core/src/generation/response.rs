//! Interpretation of proxy responses.
//!
//! A successful response may carry an image, a text explanation (when the
//! model declines), or nothing usable. Every level of the body is optional,
//! so the parser collapses any missing or malformed shape into
//! [`ParsedResponse::Empty`] instead of failing.

use crate::error::GenerationError;
use crate::types::ImagePayload;
use serde::Deserialize;

/// Shown when the response has neither an image nor an explanation.
pub const GENERATION_FAILED_MESSAGE: &str = "Image generation failed. Please try again.";

/// MIME type assumed when an inline image omits one.
const DEFAULT_OUTPUT_MIME_TYPE: &str = "image/png";

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    inline_data: Option<ResponseInlineData>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseInlineData {
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// What a successful response turned out to contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedResponse {
    /// The first inline image part
    Image(ImagePayload),
    /// No image, but the model explained itself
    Text(String),
    /// Neither, including bodies that are not JSON at all
    Empty,
}

impl ParsedResponse {
    /// Parse a success body, looking only at the first candidate.
    ///
    /// Image parts win over text parts regardless of their order.
    pub fn parse(body: &[u8]) -> Self {
        let response: GenerateResponse = match serde_json::from_slice(body) {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Response body is not a recognizable JSON object: {e}");
                return ParsedResponse::Empty;
            }
        };

        let Some(parts) = response
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
        else {
            return ParsedResponse::Empty;
        };

        let image = parts.iter().find_map(|p| {
            let inline = p.inline_data.as_ref()?;
            let data = inline.data.as_deref().filter(|d| !d.is_empty())?;
            let mime_type = inline
                .mime_type
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_OUTPUT_MIME_TYPE);
            Some(ImagePayload::new(mime_type, data))
        });
        if let Some(image) = image {
            return ParsedResponse::Image(image);
        }

        parts
            .into_iter()
            .find_map(|p| p.text.filter(|t| !t.is_empty()))
            .map(ParsedResponse::Text)
            .unwrap_or(ParsedResponse::Empty)
    }

    /// Map the parsed shape onto the outcome of the attempt.
    pub fn into_result(self) -> Result<ImagePayload, GenerationError> {
        match self {
            ParsedResponse::Image(payload) => Ok(payload),
            ParsedResponse::Text(text) => Err(GenerationError::ContentRefused(text)),
            ParsedResponse::Empty => Err(GenerationError::MalformedResponse(
                GENERATION_FAILED_MESSAGE.to_string(),
            )),
        }
    }
}

/// Extract `error.message` from a failure body, if there is one.
pub fn parse_error_message(body: &[u8]) -> Option<String> {
    let body: ErrorBody = serde_json::from_slice(body).ok()?;
    body.error?
        .message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Message used when a failure body carries no usable explanation.
pub fn remote_failure_message(status: u16) -> String {
    format!("The generation service call failed (HTTP {status}). Please try again.")
}
