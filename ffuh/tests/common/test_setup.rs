use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use ffuh::{
    bucket::{Bucket, UploadSigner},
    server,
    strategy::Predicate,
    types::Environment,
    UploadConfig, UploadStrategy,
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use super::{multipart_content_type, StubSigner};

pub const BUCKET_NAME: &str = "my-bucket";
pub const LOCAL_ENDPOINT: &str = "http://localhost:4000/api/upload-local";
pub const LOCAL_BASE_URL: &str = "http://localhost:4000/uploads";

/// Setup test environment variables and logging
pub fn setup_test_env() {
    dotenvy::from_path(".env.example").ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Router plus the collaborators a test may want to inspect
pub struct TestSetup {
    pub router: Router,
    pub strategy: Arc<UploadStrategy>,
    pub signer: Arc<StubSigner>,
    pub upload_dir: TempDir,
}

impl TestSetup {
    /// Local uploads only: no bucket, predicate always false
    pub fn local(config: impl FnOnce(UploadConfig) -> UploadConfig) -> Self {
        Self::build(config, false, false)
    }

    /// S3 uploads through a stub signer, predicate always true
    pub fn s3(config: impl FnOnce(UploadConfig) -> UploadConfig) -> Self {
        Self::build(config, true, true)
    }

    /// S3 predicate without any registered bucket
    pub fn s3_without_bucket() -> Self {
        Self::build(|config| config, false, true)
    }

    /// Uses `signer` for the bucket instead of the stub
    pub fn s3_with_signer(signer: Arc<dyn UploadSigner>) -> Self {
        setup_test_env();

        let upload_dir = TempDir::new().expect("Failed to create temp dir");
        let bucket = Arc::new(Bucket::new(BUCKET_NAME, signer));
        let strategy = Arc::new(UploadStrategy::new(
            UploadConfig::default(),
            Some(bucket),
            always(true),
        ));

        Self::with_strategy(strategy, Arc::new(StubSigner::default()), upload_dir)
    }

    fn build(
        config: impl FnOnce(UploadConfig) -> UploadConfig,
        with_bucket: bool,
        use_s3: bool,
    ) -> Self {
        setup_test_env();

        let upload_dir = TempDir::new().expect("Failed to create temp dir");
        let base = UploadConfig::default()
            .with_local_directory(upload_dir.path())
            .with_local_upload_endpoint(LOCAL_ENDPOINT)
            .with_local_file_base_url(LOCAL_BASE_URL);

        let signer = Arc::new(StubSigner::default());
        let bucket = with_bucket.then(|| Arc::new(Bucket::new(BUCKET_NAME, signer.clone())));
        let strategy = Arc::new(UploadStrategy::new(config(base), bucket, always(use_s3)));

        Self::with_strategy(strategy, signer, upload_dir)
    }

    fn with_strategy(
        strategy: Arc<UploadStrategy>,
        signer: Arc<StubSigner>,
        upload_dir: TempDir,
    ) -> Self {
        let environment = Environment::Development {
            endpoint_override: None,
        };
        let router = server::router(environment, strategy.clone());

        Self {
            router,
            strategy,
            signer,
            upload_dir,
        }
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_multipart_request(
        &self,
        route: &str,
        body: Vec<u8>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("PUT")
            .header("Content-Type", multipart_content_type())
            .body(Body::from(body))?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    /// Names of the files currently in the upload directory
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir.path())
            .expect("Failed to read upload dir")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub fn always(value: bool) -> Predicate {
    Arc::new(move || value)
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Read response body as text
pub async fn response_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}
