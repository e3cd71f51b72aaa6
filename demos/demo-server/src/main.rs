use axum::{Json, Router, body::Body, extract::Path, http::Request, routing::get};
use faultwall::prelude::*;
use serde_json::{Value, json};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Rejects everything under `/legacy` before it reaches a handler
struct RetiredRoutesInterceptor;

#[async_trait]
impl Interceptor for RetiredRoutesInterceptor {
    async fn intercept(&self, request: Request<Body>, next: Next) -> InterceptorResult {
        if request.uri().path().starts_with("/legacy") {
            return Err("Resource not found".into());
        }
        next.run(request).await
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn find_item(Path(id): Path<u32>) -> Json<Value> {
    if id == 0 {
        panic!("item {} does not exist", id);
    }
    Json(json!({ "id": id, "name": format!("item-{}", id) }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ConfigService::new();
    let translation = TranslationConfig::from_config(&config)?;
    tracing::info!(
        catch_panics = translation.catch_panics,
        log_faults = translation.log_faults,
        "Starting demo server"
    );

    let router = Router::new()
        .route("/health", get(health))
        .route("/items/{id}", get(find_item))
        .route("/legacy/items", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(ErrorTranslationLayer::new().config(translation))
                .layer(InterceptorLayer::new(vec![
                    Box::new(LoggingInterceptor),
                    Box::new(RetiredRoutesInterceptor),
                ])),
        );

    let host = config.get("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
    let port = config.get("PORT").unwrap_or_else(|| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
