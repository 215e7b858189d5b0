//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for tracing
//! - Parse the multipart form and pull out the uploaded file
//! - Read query parameters
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The whole form is read before any field is looked up, so a broken or
//!   oversized form is always reported as such
//! - Form size is capped through axum's `DefaultBodyLimit`

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Query, Request},
    http::{HeaderValue, Uri},
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::response::ApiError;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a fresh UUID v4 for requests that arrive without an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request ID set by the request-ID layer.
pub fn request_id<B>(request: &axum::http::Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// One part of a parsed multipart form.
#[derive(Debug, Clone)]
struct FormPart {
    name: Option<String>,
    file_name: Option<String>,
    data: Bytes,
}

/// A file part pulled out of the form.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Base name of the client-supplied filename.
    pub file_name: String,
    pub data: Bytes,
}

/// A fully buffered multipart form.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    parts: Vec<FormPart>,
}

impl UploadForm {
    /// Read every part of a `multipart/form-data` body.
    ///
    /// Fails when the content type is not multipart, the body is malformed, or
    /// the body exceeds the configured size limit.
    pub async fn from_request<S>(request: Request, state: &S) -> Result<Self, ApiError>
    where
        S: Send + Sync,
    {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| ApiError::InvalidForm(e.body_text()))?;

        let mut parts = Vec::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::InvalidForm(e.body_text()))?
        {
            let name = field.name().map(str::to_owned);
            let file_name = field.file_name().map(str::to_owned);
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidForm(e.body_text()))?;
            parts.push(FormPart {
                name,
                file_name,
                data,
            });
        }

        Ok(Self { parts })
    }

    /// Take the first file part named `field`.
    ///
    /// A part only counts as a file when it carries a non-empty filename.
    pub fn into_file(self, field: &str) -> Result<Upload, ApiError> {
        self.parts
            .into_iter()
            .filter(|part| part.name.as_deref() == Some(field))
            .find_map(|part| {
                let file_name = part.file_name.as_deref().and_then(base_name)?.to_owned();
                Some(Upload {
                    file_name,
                    data: part.data,
                })
            })
            .ok_or(ApiError::MissingFile)
    }
}

/// Strip any directory components a client put in the filename.
///
/// Unlike POSIX `basename`, a backslash also counts as a separator, and a name
/// made only of separators (such as `"/"`) yields no file name at all.
fn base_name(file_name: &str) -> Option<&str> {
    let trimmed = file_name.trim_end_matches(['/', '\\']);
    let base = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    (!base.is_empty()).then_some(base)
}

/// First value of query parameter `key`, if any.
pub fn query_param(uri: &Uri, key: &str) -> Option<String> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri).ok()?;
    pairs.into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
}
