//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::error::UploadError;

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Error details
    error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub message: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(
        status: StatusCode,
        code: &'static str,
        msg: &'static str,
        retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry: retry,
                error: ErrorBody { code, message: msg },
            },
        }
    }

    /// HTTP status of the error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.inner.error.code
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert upload errors to application errors
impl From<UploadError> for AppError {
    #[allow(clippy::cognitive_complexity)]
    fn from(err: UploadError) -> Self {
        match &err {
            UploadError::ConfigurationMissing(setting) => {
                tracing::error!("Configuration missing: {setting}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "configuration_missing",
                    "Upload destination is not configured",
                    false,
                )
            }
            UploadError::DirectoryNotFound(dir) => {
                tracing::error!("Upload directory not found: {}", dir.display());
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "directory_not_found",
                    "Upload directory does not exist",
                    false,
                )
            }
            UploadError::NoFilesUploaded => Self::new(
                StatusCode::BAD_REQUEST,
                "no_files_uploaded",
                "No files were uploaded",
                false,
            ),
            UploadError::InvalidExpiration(secs) => {
                tracing::error!("Presigned URL expiry out of range: {secs}s");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "invalid_expiration",
                    "Presigned URL expiry is misconfigured",
                    false,
                )
            }
            UploadError::BucketNotConfigured => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "bucket_not_configured",
                "S3 bucket is not configured",
                false,
            ),
            UploadError::Provider(e) => {
                tracing::error!("S3 signing error: {e}");
                Self::new(
                    StatusCode::BAD_GATEWAY,
                    "upstream_error",
                    "Storage provider failed to sign the upload",
                    true,
                )
            }
            UploadError::Multipart(e) => {
                tracing::warn!("Multipart error: {e}");
                Self::new(
                    StatusCode::BAD_REQUEST,
                    "invalid_multipart",
                    "Invalid multipart body",
                    false,
                )
            }
            UploadError::Io(e) => {
                tracing::error!("Failed to store upload: {e}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                    false,
                )
            }
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}
