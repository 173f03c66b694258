use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use rewards_api::config;
use rewards_api::database::manager::DatabaseManager;
use rewards_api::middleware::jwt_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting rewards API in {:?} mode", config.environment);

    // Apply schema migrations when the database is reachable; otherwise start
    // anyway and let /health report the degraded state.
    if let Err(e) = DatabaseManager::migrate().await {
        tracing::warn!("skipping startup migrations: {}", e);
    }

    let app = app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("rewards API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(account_public_routes())
        .merge(rewards_routes())
        // Protected (bearer JWT)
        .merge(account_protected_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn account_public_routes() -> Router {
    use rewards_api::handlers::public::account;

    Router::new()
        .route("/account/register", post(account::register))
        .route("/account/login", post(account::login))
}

fn rewards_routes() -> Router {
    use rewards_api::handlers::public::rewards;

    Router::new()
        .route("/rewards/cal-points", post(rewards::cal_points))
        .route("/rewards/cal-points/v2", post(rewards::cal_points_batch))
        .route(
            "/rewards/pointsByCustomerId",
            get(rewards::points_by_customer_id),
        )
        .route(
            "/rewards/pointsByMonthAndYear/:month/:year",
            get(rewards::points_by_month_year),
        )
        .route("/rewards/pointsBy", get(rewards::points_by))
}

fn account_protected_routes() -> Router {
    use rewards_api::handlers::protected::account;

    Router::new()
        .route("/account/profile", get(account::profile))
        .layer(middleware::from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Rewards API",
            "version": version,
            "description": "Customer rewards REST API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "account": "/account/register, /account/login (public), /account/profile (protected)",
                "rewards": "/rewards/cal-points[/v2], /rewards/pointsByCustomerId, /rewards/pointsByMonthAndYear/:month/:year, /rewards/pointsBy",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
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
