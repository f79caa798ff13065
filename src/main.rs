mod model;
mod server;

use std::net::SocketAddr;

use axum::http::{header, HeaderValue, Method};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::{AppEnv, Config},
    error::{config::ConfigError, AppError},
    middleware::rate_limit::RateLimits,
    realtime::hub::Hub,
    router,
    scheduler::maintenance,
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pollstraw=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let hub = Hub::new(startup::HUB_CAPACITY);
    let cache = startup::connect_to_cache(&config, &hub).await;

    let state = AppState::new(db.clone(), cache.clone(), hub, config.clone());

    startup::check_for_admin(&db, &state.tokens, &config).await?;

    tokio::spawn(async move {
        if let Err(e) = maintenance::start_scheduler(db, cache).await {
            tracing::error!("Maintenance scheduler error: {}", e);
        }
    });

    let cors = cors_layer(&config)?;
    let app = router::router(RateLimits::from_config(&config))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("PollStraw listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Any origin in development; only the frontend origin in production.
fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match config.app_env {
        AppEnv::Development => Ok(layer.allow_origin(Any)),
        AppEnv::Production => {
            let origin = HeaderValue::from_str(&config.frontend_url).map_err(|_| {
                ConfigError::InvalidEnvVar {
                    name: "FRONTEND_URL".to_string(),
                    value: config.frontend_url.clone(),
                }
            })?;
            Ok(layer.allow_origin(origin).allow_credentials(true))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
