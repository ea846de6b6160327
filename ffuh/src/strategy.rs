use std::fmt;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    bucket::Bucket,
    config::UploadConfig,
    error::{UploadError, UploadResult},
    naming::generate_name,
    types::Environment,
};

/// Decides whether a request uploads to S3 (`true`) or locally (`false`)
pub type Predicate = Arc<dyn Fn() -> bool + Send + Sync>;

/// What the client wants to upload
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadRequest {
    /// Original file name
    pub file_name: String,
    /// MIME type of the file
    pub content_type: Option<String>,
    /// Directory inside the bucket, overrides the configured prefix
    pub target_path: Option<String>,
}

impl UploadRequest {
    /// Creates a request for `file_name`
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Sets the content type
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the target path
    #[must_use]
    pub fn with_target_path(mut self, target_path: impl Into<String>) -> Self {
        self.target_path = Some(target_path.into());
        self
    }
}

/// Where the client should send the file, and where it can be read afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UploadDestination {
    /// URL to send the file to
    pub upload: String,
    /// URL the file is readable at after the upload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Predicate that selects S3 in production
///
/// The environment is resolved once, the returned predicate only reads the
/// captured flag.
#[must_use]
pub fn production_predicate(environment: &Environment) -> Predicate {
    let is_production = environment.is_production();
    Arc::new(move || is_production)
}

/// Routes upload requests to the S3 or the local flow
pub struct UploadStrategy {
    config: UploadConfig,
    bucket: Option<Arc<Bucket>>,
    predicate: Predicate,
}

impl UploadStrategy {
    /// Creates a strategy
    #[must_use]
    pub fn new(config: UploadConfig, bucket: Option<Arc<Bucket>>, predicate: Predicate) -> Self {
        Self {
            config,
            bucket,
            predicate,
        }
    }

    /// Creates a strategy that uses S3 only in production
    #[must_use]
    pub fn for_environment(
        config: UploadConfig,
        bucket: Option<Arc<Bucket>>,
        environment: &Environment,
    ) -> Self {
        Self::new(config, bucket, production_predicate(environment))
    }

    /// Upload configuration
    #[must_use]
    pub const fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Bucket handle
    ///
    /// # Errors
    ///
    /// Returns `UploadError::BucketNotConfigured` if no bucket was provided
    pub fn bucket(&self) -> UploadResult<&Bucket> {
        self.bucket.as_deref().ok_or(UploadError::BucketNotConfigured)
    }

    /// Computes the upload destination for `request`
    ///
    /// The S3 flow returns a presigned URL and the public object URL. The local
    /// flow only advertises the configured endpoint, nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::BucketNotConfigured` for the S3 flow without a bucket,
    /// `UploadError::ConfigurationMissing` for the local flow without an endpoint,
    /// and `UploadError::Provider` if signing fails
    #[instrument(skip(self))]
    pub async fn destination(&self, request: &UploadRequest) -> UploadResult<UploadDestination> {
        if (self.predicate)() {
            self.signed_destination(request).await
        } else {
            self.local_destination(request)
        }
    }

    async fn signed_destination(&self, request: &UploadRequest) -> UploadResult<UploadDestination> {
        let bucket = self.bucket()?;
        let name = generate_name(&request.file_name, self.config.random_names);
        let path_prefix = request
            .target_path
            .as_deref()
            .or(self.config.storage_path_prefix.as_deref());

        debug!("Routing upload of {} to bucket {}", name, bucket.name());

        bucket
            .request_signed_upload(
                &name,
                request.content_type.as_deref(),
                self.config.expiration_secs,
                path_prefix,
            )
            .await
    }

    fn local_destination(&self, request: &UploadRequest) -> UploadResult<UploadDestination> {
        let endpoint = self
            .config
            .local_upload_endpoint
            .as_ref()
            .ok_or(UploadError::ConfigurationMissing("local upload endpoint"))?;
        let name = generate_name(&request.file_name, self.config.random_names);

        debug!("Routing upload of {name} to local endpoint {endpoint}");

        Ok(UploadDestination {
            upload: endpoint.clone(),
            file: self
                .config
                .local_file_base_url
                .as_ref()
                .map(|base| format!("{base}/{name}")),
        })
    }
}

impl fmt::Debug for UploadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadStrategy")
            .field("config", &self.config)
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}
