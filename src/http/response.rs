//! Response construction and error mapping.
//!
//! # Responsibilities
//! - Map request failures to status codes and plain-text bodies
//! - Build the JPEG attachment response
//!
//! # Design Decisions
//! - The `Display` text of each `ApiError` variant is the exact response body
//! - Error bodies are `text/plain` with `X-Content-Type-Options: nosniff`
//! - Control characters in the client filename are neutralised before they
//!   reach a header

use axum::{
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::compress::{CompressError, InvalidQuality};

/// Every way a `/compress` request can fail.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Only POST method is supported")]
    MethodNotAllowed,

    /// Holds the framework's reason, logged but never returned.
    #[error("Unable to parse form")]
    InvalidForm(String),

    #[error("Unable to retrieve the file")]
    MissingFile,

    #[error("Quality must be an integer between 1 and 100")]
    InvalidQuality(#[from] InvalidQuality),

    #[error("Unsupported image format")]
    UnsupportedFormat(#[source] image::ImageError),

    #[error("Failed to compress the image")]
    CompressionFailed(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidForm(_) | ApiError::MissingFile | ApiError::InvalidQuality(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::CompressionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CompressError> for ApiError {
    fn from(err: CompressError) -> Self {
        match err {
            CompressError::Decode(e) => ApiError::UnsupportedFormat(e),
            CompressError::Encode(e) => ApiError::CompressionFailed(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::InvalidForm(reason) => {
                tracing::warn!(status = status.as_u16(), reason = %reason, "Rejected form")
            }
            ApiError::InvalidQuality(e) => {
                tracing::warn!(status = status.as_u16(), raw = %e.raw, "Rejected quality")
            }
            ApiError::UnsupportedFormat(e) => {
                tracing::warn!(status = status.as_u16(), error = %e, "Undecodable upload")
            }
            ApiError::CompressionFailed(reason) => {
                tracing::error!(status = status.as_u16(), reason = %reason, "Compression failed")
            }
            ApiError::MethodNotAllowed | ApiError::MissingFile => {
                tracing::warn!(status = status.as_u16(), error = %self, "Rejected request")
            }
        }

        (
            status,
            [(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"))],
            self.to_string(),
        )
            .into_response()
    }
}

/// Replace control characters so the name is safe inside a header value.
pub fn sanitize_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// `Content-Disposition` value for the compressed copy of `original`.
pub fn attachment_disposition(original: &str) -> Result<HeaderValue, ApiError> {
    let value = format!(
        "attachment; filename=compressed_{}",
        sanitize_file_name(original)
    );
    HeaderValue::from_bytes(value.as_bytes())
        .map_err(|e| ApiError::CompressionFailed(format!("invalid response header: {}", e)))
}

/// 200 response carrying `jpeg` as a download named `compressed_<original>`.
pub fn jpeg_attachment(original: &str, jpeg: Vec<u8>) -> Result<Response, ApiError> {
    let disposition = attachment_disposition(original)?;
    Ok((
        StatusCode::OK,
        [
            (CONTENT_DISPOSITION, disposition),
            (CONTENT_TYPE, HeaderValue::from_static("image/jpeg")),
        ],
        jpeg,
    )
        .into_response())
}
