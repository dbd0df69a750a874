//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{BlobStoreAdapter, MockEmailAdapter},
    config::Config,
    error::ApiError,
    web::{
        auth::{login_handler, signup_handler},
        business_insights_handler, create_entry_handler, create_share_handler,
        delete_entry_handler, insights_handler, list_entries_handler,
        monthly_reflections_handler, rest::ApiDoc, resolve_share_handler, state::AppState,
        todays_entry_handler, weekly_reflections_handler,
    },
};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{delete, get, post},
    Router,
};
use reflection_core::{
    analysis::TextSignalAnalyzer,
    journal::Journal,
    ports::{SystemClock, ThreadRandom},
    sharing::ShareService,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let blob_store = Arc::new(BlobStoreAdapter::new(db_pool.clone()));
    info!("Running database migrations...");
    blob_store
        .run_migrations()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    info!("Database migrations complete.");

    // --- 3. Wire Up the Core Services ---
    let rng = Arc::new(ThreadRandom);
    let clock = Arc::new(SystemClock);

    let journal = Arc::new(Journal::new(blob_store.clone(), clock.clone()));
    let shares = Arc::new(ShareService::new(
        blob_store.clone(),
        rng.clone(),
        clock.clone(),
    ));
    let analyzer = Arc::new(TextSignalAnalyzer::new(rng.clone(), clock.clone()));
    let email = Arc::new(MockEmailAdapter::new(
        rng.clone(),
        config.email_failure_rate,
        config.email_delay_ms,
    ));

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        journal,
        shares,
        analyzer,
        email,
        clock,
        config: config.clone(),
    });

    let cors = CorsLayer::new()
        .allow_origin("http://localhost:5173".parse::<HeaderValue>().unwrap())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    let api_router = Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/signup", post(signup_handler))
        .route("/entries", get(list_entries_handler).post(create_entry_handler))
        .route("/entries/today", get(todays_entry_handler))
        .route("/entries/{id}", delete(delete_entry_handler))
        .route("/insights", get(insights_handler))
        .route("/insights/business", get(business_insights_handler))
        .route("/reflections/weekly", get(weekly_reflections_handler))
        .route("/reflections/monthly", get(monthly_reflections_handler))
        .route("/shares", post(create_share_handler))
        .route("/shares/{share_id}", get(resolve_share_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
