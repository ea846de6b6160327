use std::sync::Arc;

use ffuh::{
    bucket::{setup_bucket, BucketRegistry},
    server,
    types::Environment,
    UploadConfig, UploadStrategy,
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.tracing_level().as_str()));

    // JSON logs for deployed stages, human-readable logs for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt().json().with_env_filter(env_filter).init();
        }
        Environment::Development { .. } => {
            fmt().with_env_filter(env_filter).init();
        }
    }

    let config = UploadConfig::from_env();
    tracing::info!(
        "S3_BUCKET: {:?}, S3_BUCKET_REGION: {}",
        Environment::bucket_name(),
        Environment::region()
    );

    let registry = BucketRegistry::new();
    let bucket = setup_bucket(&registry, &environment).await;

    let strategy = Arc::new(UploadStrategy::for_environment(config, bucket, &environment));

    server::start(environment, strategy).await
}
