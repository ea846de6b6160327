use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::{Bucket, S3Signer};
use crate::types::Environment;

/// Holds the process-wide bucket handle once it has been created
#[derive(Debug, Default)]
pub struct BucketRegistry {
    bucket: OnceCell<Arc<Bucket>>,
}

impl BucketRegistry {
    /// Creates an empty registry
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bucket: OnceCell::const_new(),
        }
    }

    /// Returns the registered bucket, if any
    #[must_use]
    pub fn get(&self) -> Option<Arc<Bucket>> {
        self.bucket.get().cloned()
    }

    /// Registers `bucket` unless a handle is already present
    ///
    /// Returns the handle that ends up registered.
    pub async fn register(&self, bucket: Bucket) -> Arc<Bucket> {
        self.bucket
            .get_or_init(|| async { Arc::new(bucket) })
            .await
            .clone()
    }
}

/// Returns the registered bucket, creating an S3-backed one on first use
///
/// Later calls on the same registry return the same handle and ignore their
/// arguments.
pub async fn ensure_bucket(
    registry: &BucketRegistry,
    name: impl Into<String> + Send,
    s3_config: aws_sdk_s3::Config,
) -> Arc<Bucket> {
    registry
        .bucket
        .get_or_init(|| async {
            let name = name.into();
            info!("Initialized S3 bucket client for bucket: {name}");
            Arc::new(Bucket::new(name, Arc::new(S3Signer::from_conf(s3_config))))
        })
        .await
        .clone()
}

/// Creates the bucket handle at startup when `S3_BUCKET` is set
///
/// Without a bucket name this only logs a warning, signed uploads will then
/// fail with `UploadError::BucketNotConfigured`.
pub async fn setup_bucket(
    registry: &BucketRegistry,
    environment: &Environment,
) -> Option<Arc<Bucket>> {
    let Some(name) = Environment::bucket_name() else {
        warn!("S3_BUCKET is not set, presigned uploads are disabled");
        return None;
    };

    let s3_config = environment.s3_client_config().await;
    Some(ensure_bucket(registry, name, s3_config).await)
}
