use axum::{
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod storage;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, ADMIN_TOKEN, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = crate::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting product-purge in {:?} mode", config.environment);

    let app = app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("product-purge listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Deletion endpoint (open, per the service contract)
        .merge(delete_routes())
        // Admin settings
        .merge(settings_routes())
        // Global middleware
        .layer(TraceLayer::new_for_http());

    if config::config().security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}

fn delete_routes() -> Router {
    use handlers::products;

    Router::new().route(
        "/product-delete/v1/delete-products",
        post(products::delete_products),
    )
}

fn settings_routes() -> Router {
    use handlers::settings;

    Router::new()
        .route("/api/settings", get(settings::get::get).put(settings::put::put))
        .layer(axum::middleware::from_fn(middleware::require_admin))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "product-purge",
            "version": version,
            "description": "Bulk deletion service for product records and their media attachments",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "delete": "POST /product-delete/v1/delete-products (open, optional ?limit=N)",
                "settings": "/api/settings (admin bearer token)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
