//! Route handlers.

use axum::{
    extract::{Request, State},
    http::Method,
    response::Response,
};

use crate::compress::{self, Quality};
use crate::http::request::{query_param, UploadForm};
use crate::http::response::{jpeg_attachment, ApiError};
use crate::http::server::AppState;

/// Multipart field holding the upload.
pub const IMAGE_FIELD: &str = "image";

/// Query parameter selecting the JPEG quality.
pub const QUALITY_PARAM: &str = "quality";

/// Health check. Answers every method.
pub async fn health() -> &'static str {
    "OK"
}

/// `/compress`: recompress the uploaded `image` as JPEG.
///
/// Checks run in a fixed order and the first failure wins: method, form,
/// file field, quality, decode, encode.
pub async fn compress(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ApiError> {
    if request.method() != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    let uri = request.uri().clone();
    let form = UploadForm::from_request(request, &state).await?;
    let upload = form.into_file(IMAGE_FIELD)?;
    let quality = Quality::parse_or(
        query_param(&uri, QUALITY_PARAM).as_deref(),
        state.default_quality,
    )?;

    tracing::debug!(
        upload_bytes = upload.data.len(),
        quality = quality.value(),
        "Compressing upload"
    );

    let data = upload.data;
    let jpeg = tokio::task::spawn_blocking(move || compress::recompress(&data, quality))
        .await
        .map_err(|e| ApiError::CompressionFailed(format!("compression task failed: {}", e)))??;

    tracing::debug!(output_bytes = jpeg.len(), "Compressed upload");

    jpeg_attachment(&upload.file_name, jpeg)
}
