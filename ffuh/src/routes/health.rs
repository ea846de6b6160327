use std::sync::Arc;

use aide::axum::IntoApiResponse;
use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::Serialize;

use crate::strategy::UploadStrategy;

#[derive(Debug, Serialize, JsonSchema)]
pub struct HealthResponse {
    status: String,
    /// Current version of the application
    semver: String,
    /// Commit hash of the current build (if available)
    rev: Option<String>,
    /// Whether presigned S3 uploads are available
    bucket_configured: bool,
}

/// Health check endpoint
///
/// Reports the service version and whether an S3 bucket is registered.
#[allow(clippy::unused_async)]
pub async fn handler(Extension(strategy): Extension<Arc<UploadStrategy>>) -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        semver: env!("CARGO_PKG_VERSION").to_string(),
        rev: option_env!("GIT_REV").map(ToString::to_string),
        bucket_configured: strategy.bucket().is_ok(),
    })
}
