//! S3 implementation of [`UploadSigner`]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{presigning::PresigningConfig, types::ObjectCannedAcl, Client};
use tracing::debug;

use super::{ProviderError, PutRequest, UploadSigner};

/// Signs `PutObject` requests with the AWS SDK
///
/// Presigning is computed locally from the client's credentials and region,
/// no request is sent to S3.
#[derive(Clone, Debug)]
pub struct S3Signer {
    client: Arc<Client>,
}

impl S3Signer {
    /// Creates a signer from a pre-configured S3 client
    #[must_use]
    pub const fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Creates a signer from an S3 service configuration
    #[must_use]
    pub fn from_conf(config: aws_sdk_s3::Config) -> Self {
        Self::new(Arc::new(Client::from_conf(config)))
    }
}

#[async_trait]
impl UploadSigner for S3Signer {
    async fn presign_put(&self, request: &PutRequest<'_>) -> Result<String, ProviderError> {
        debug!(
            "Presigning PUT for s3://{}/{} expiring in {}s",
            request.bucket, request.key, request.expires_in_secs
        );

        let presigned_config =
            PresigningConfig::expires_in(Duration::from_secs(request.expires_in_secs))?;

        let presigned = self
            .client
            .put_object()
            .bucket(request.bucket)
            .key(request.key)
            .set_content_type(request.content_type.map(ToString::to_string))
            .acl(ObjectCannedAcl::PublicRead)
            .presigned(presigned_config)
            .await
            .map_err(aws_sdk_s3::Error::from)?;

        Ok(presigned.uri().to_string())
    }
}
