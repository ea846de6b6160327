use std::sync::Arc;

use aide::openapi::OpenApi;
use axum::{Extension, Router};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{routes, strategy::UploadStrategy, types::Environment};

/// Port used when `PORT` is not set
const DEFAULT_PORT: u16 = 4000;

/// Builds the application router
///
/// Files in the local upload directory, if one is configured, are served
/// under `/uploads`.
pub fn router(environment: Environment, strategy: Arc<UploadStrategy>) -> Router {
    let mut openapi = OpenApi::default();

    let mut router = routes::handler().finish_api(&mut openapi);

    if let Some(dir) = &strategy.config().local_directory {
        router = router.nest_service("/uploads", ServeDir::new(dir));
    }

    router
        .layer(Extension(openapi))
        .layer(Extension(environment))
        .layer(Extension(strategy))
        .layer(TraceLayer::new_for_http())
}

/// Starts the server with the given environment and upload strategy
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(environment: Environment, strategy: Arc<UploadStrategy>) -> anyhow::Result<()> {
    let router = router(environment, strategy);

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(DEFAULT_PORT), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("File upload helper listening on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutting down");
}
