use std::sync::Mutex;

use async_trait::async_trait;
use ffuh::bucket::{ProviderError, PutRequest, UploadSigner};

/// Signer that records every key it signs and returns a predictable URL
#[derive(Default)]
pub struct StubSigner {
    pub keys: Mutex<Vec<String>>,
}

impl StubSigner {
    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadSigner for StubSigner {
    async fn presign_put(&self, request: &PutRequest<'_>) -> Result<String, ProviderError> {
        self.keys.lock().unwrap().push(request.key.to_string());
        Ok(format!(
            "https://signed.test/{}/{}?expires={}",
            request.bucket, request.key, request.expires_in_secs
        ))
    }
}

/// Signer that always fails like a provider rejecting the credentials
pub struct FailingSigner;

#[async_trait]
impl UploadSigner for FailingSigner {
    async fn presign_put(&self, _request: &PutRequest<'_>) -> Result<String, ProviderError> {
        Err("InvalidAccessKeyId: the access key does not exist".into())
    }
}
