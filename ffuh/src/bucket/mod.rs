//! S3 bucket handle and the signing capability behind it

mod client;
mod registry;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

pub use client::S3Signer;
pub use registry::{ensure_bucket, setup_bucket, BucketRegistry};

use crate::{error::UploadResult, signed_upload, strategy::UploadDestination};

/// Opaque error returned by a storage provider
pub type ProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Parameters of a presigned `PUT` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PutRequest<'a> {
    /// Bucket name
    pub bucket: &'a str,
    /// Object key inside the bucket
    pub key: &'a str,
    /// Content type the upload must be sent with
    pub content_type: Option<&'a str>,
    /// Lifetime of the signed URL in seconds
    pub expires_in_secs: u64,
}

/// Produces presigned upload URLs
///
/// Implementations sign a `PUT` of a publicly readable object.
#[async_trait]
pub trait UploadSigner: Send + Sync {
    /// Returns a URL the client can `PUT` the object to
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged when signing fails
    async fn presign_put(&self, request: &PutRequest<'_>) -> Result<String, ProviderError>;
}

/// A named bucket together with the signer used for it
///
/// Created once at startup and shared by all requests.
pub struct Bucket {
    name: String,
    signer: Arc<dyn UploadSigner>,
}

impl Bucket {
    /// Creates a bucket handle
    pub fn new(name: impl Into<String>, signer: Arc<dyn UploadSigner>) -> Self {
        Self {
            name: name.into(),
            signer,
        }
    }

    /// Bucket name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signer for this bucket
    #[must_use]
    pub fn signer(&self) -> &dyn UploadSigner {
        self.signer.as_ref()
    }

    /// Requests a presigned upload for `file_name` in this bucket
    ///
    /// # Errors
    ///
    /// Returns `UploadError::InvalidExpiration` for an expiry S3 refuses, or
    /// `UploadError::Provider` if signing fails
    pub async fn request_signed_upload(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        expiration_secs: u64,
        path_prefix: Option<&str>,
    ) -> UploadResult<UploadDestination> {
        signed_upload::request_signed_upload(
            self.signer(),
            &self.name,
            file_name,
            content_type,
            expiration_secs,
            path_prefix,
        )
        .await
    }
}

impl fmt::Debug for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bucket").field("name", &self.name).finish_non_exhaustive()
    }
}
