use std::sync::Arc;

use axum::{
    extract::{Extension, Multipart},
    Json,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    local_upload::handle_local_upload,
    naming::generate_name,
    signed_upload::SignedRequest,
    strategy::{UploadDestination, UploadRequest, UploadStrategy},
    types::{AppError, ValidatedQuery},
};

#[derive(Debug, Deserialize, Serialize, Validate, JsonSchema)]
pub struct UploadQuery {
    /// Name of the file to upload
    #[validate(length(min = 1, message = "missing_file_name"))]
    pub name: String,
    /// MIME type of the file
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    /// Directory inside the bucket, defaults to the configured prefix
    pub path: Option<String>,
}

impl From<UploadQuery> for UploadRequest {
    fn from(query: UploadQuery) -> Self {
        Self {
            file_name: query.name,
            content_type: query.content_type,
            target_path: query.path,
        }
    }
}

/// Creates a presigned URL for uploading a file straight to S3
///
/// Returns `{ signedRequest, url }`: the URL to `PUT` the file to, and the
/// public URL of the object once uploaded.
///
/// # Errors
///
/// - `UploadError::BucketNotConfigured` - `S3_BUCKET` was not set at startup
/// - `UploadError::Provider` - the SDK failed to sign the request
#[instrument(skip_all)]
pub async fn sign_s3(
    Extension(strategy): Extension<Arc<UploadStrategy>>,
    ValidatedQuery(query): ValidatedQuery<UploadQuery>,
) -> Result<Json<SignedRequest>, AppError> {
    let bucket = strategy.bucket()?;
    let config = strategy.config();

    let name = generate_name(&query.name, config.random_names);
    let path_prefix = query
        .path
        .as_deref()
        .or(config.storage_path_prefix.as_deref());

    let destination = bucket
        .request_signed_upload(
            &name,
            query.content_type.as_deref(),
            config.expiration_secs,
            path_prefix,
        )
        .await?;

    Ok(Json(destination.into()))
}

/// Stores the files of a multipart body in the local upload directory
///
/// Responds with the URL of every stored file, one per line.
#[instrument(skip_all)]
pub async fn upload_local(
    Extension(strategy): Extension<Arc<UploadStrategy>>,
    multipart: Multipart,
) -> Result<String, AppError> {
    let config = strategy.config();
    let stored = handle_local_upload(multipart, config).await?;

    let urls: Vec<String> = stored
        .iter()
        .map(|file| file.url(config.local_file_base_url.as_deref()))
        .collect();

    info!("Stored local upload(s): {}", urls.join(", "));

    Ok(urls.join("\n"))
}

/// Tells the client where to upload a file
///
/// In production this is a presigned S3 URL, otherwise the local upload
/// endpoint. The response is `{ upload, file }`; `file` is omitted when the
/// local flow has no public base URL.
#[instrument(skip_all)]
pub async fn upload_ffuh(
    Extension(strategy): Extension<Arc<UploadStrategy>>,
    ValidatedQuery(query): ValidatedQuery<UploadQuery>,
) -> Result<Json<UploadDestination>, AppError> {
    let request = UploadRequest::from(query);
    let destination = strategy.destination(&request).await?;
    Ok(Json(destination))
}
