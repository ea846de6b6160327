use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    bucket::{PutRequest, UploadSigner},
    config::is_valid_expiration,
    error::{UploadError, UploadResult},
    naming::build_path,
    strategy::UploadDestination,
};

/// Public URL of `key` in `bucket`
#[must_use]
pub fn bucket_url(bucket: &str, key: &str) -> String {
    format!("https://{bucket}.s3.amazonaws.com/{key}")
}

/// Response of the stand-alone signing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignedRequest {
    /// Presigned URL to `PUT` the file to
    pub signed_request: String,
    /// Public URL of the file once uploaded
    pub url: String,
}

impl From<UploadDestination> for SignedRequest {
    fn from(destination: UploadDestination) -> Self {
        Self {
            signed_request: destination.upload,
            url: destination.file.unwrap_or_default(),
        }
    }
}

/// Requests a presigned `PUT` URL for `file_name` and derives its public URL
///
/// The storage key is computed once from `path_prefix` and `file_name` and
/// used for both URLs.
///
/// # Errors
///
/// - `UploadError::InvalidExpiration` if `expiration_secs` is not between one
///   second and seven days
/// - `UploadError::Provider` with the signer's error if signing fails
#[instrument(skip(signer))]
pub async fn request_signed_upload(
    signer: &dyn UploadSigner,
    bucket: &str,
    file_name: &str,
    content_type: Option<&str>,
    expiration_secs: u64,
    path_prefix: Option<&str>,
) -> UploadResult<UploadDestination> {
    if !is_valid_expiration(expiration_secs) {
        return Err(UploadError::InvalidExpiration(expiration_secs));
    }

    let key = build_path([path_prefix, Some(file_name)]);

    let signed_url = signer
        .presign_put(&PutRequest {
            bucket,
            key: &key,
            content_type,
            expires_in_secs: expiration_secs,
        })
        .await
        .map_err(UploadError::Provider)?;

    debug!("Generated presigned URL for key: {key}");

    Ok(UploadDestination {
        upload: signed_url,
        file: Some(bucket_url(bucket, &key)),
    })
}
