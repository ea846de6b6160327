mod docs;
mod health;
pub mod upload;

use aide::axum::{
    routing::{get, put},
    ApiRouter,
};

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler())
        .api_route("/health", get(health::handler))
        .api_route("/api", get(hello))
        .api_route("/api/sign-s3", get(upload::sign_s3))
        .api_route("/api/upload-local", put(upload::upload_local))
        .api_route("/api/upload-ffuh", get(upload::upload_ffuh))
}

#[allow(clippy::unused_async)]
async fn hello() -> String {
    "Hello World!".to_string()
}
