// src/bin/api_server.rs

use menuiq::infra::{init_telemetry, Settings, StorageBackend};
use menuiq::storage::{schema, MemoryMenuStore, MenuStore, PgMenuStore};
use menuiq::transport;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

async fn open_store(settings: &Settings) -> anyhow::Result<Arc<dyn MenuStore>> {
    match settings.storage.backend {
        StorageBackend::Postgres => {
            let url = settings.database.require_url()?;
            let store = PgMenuStore::connect(url, &settings.database).await?;
            schema::migrate(store.pool()).await?;
            tracing::info!("postgres store ready (schema migrated)");
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            tracing::warn!("using the in-memory store; data is lost on shutdown");
            Ok(Arc::new(MemoryMenuStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_telemetry(&settings.logging);

    // --- Store Initialization ---
    tracing::info!(backend = ?settings.storage.backend, "opening menu store");
    let store = open_store(&settings).await?;

    let app_state = transport::http::AppState::new(&settings, store);

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, development = settings.server.development, "API server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received (Ctrl+C)");
        }
    }

    tracing::info!("graceful shutdown complete");
    Ok(())
}
