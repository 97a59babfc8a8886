use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod analytics;
mod auth;
mod config;
mod crypto;
mod db;
mod error;
mod handlers;
mod models;
mod rollforward;
mod services;

use analytics::SentimentScorer;
use config::Config;
use crypto::EntryCipher;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub cipher: Arc<EntryCipher>,
    pub sentiment: Arc<SentimentScorer>,
    pub ws_tx: Option<broadcast::Sender<String>>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aura_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env();
    let config = Arc::new(config);

    // Database
    let db = db::create_pool(&config.database_url).await;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    // Entry-change broadcast channel (the live insights path)
    let (ws_tx, _) = broadcast::channel::<String>(256);

    let state = AppState {
        db,
        cipher: Arc::new(EntryCipher::new(&config.journal_key)),
        sentiment: Arc::new(SentimentScorer::new()),
        config: config.clone(),
        ws_tx: Some(ws_tx),
    };

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/ws", get(handlers::ws::ws_handler));

    let protected_routes = Router::new()
        // Journal entries
        .route("/api/entries", get(handlers::entries::list_entries))
        .route("/api/entries", post(handlers::entries::create_entry))
        .route("/api/entries/:id", put(handlers::entries::update_entry))
        .route("/api/entries/:id", delete(handlers::entries::delete_entry))
        // Stats
        .route("/api/stats/streak", get(handlers::stats::get_streak))
        .route("/api/stats/mood-trend", get(handlers::stats::mood_trend))
        .route(
            "/api/stats/sentiment-trend",
            get(handlers::stats::sentiment_trend),
        )
        .route("/api/stats/habit-trend", get(handlers::stats::habit_trend))
        .route(
            "/api/stats/mood-distribution",
            get(handlers::stats::mood_distribution),
        )
        .route("/api/stats/summary", get(handlers::stats::get_summary))
        // Insights
        .route("/api/insights", get(handlers::insights::get_insights))
        // Habit catalog & master list
        .route("/api/habits/catalog", get(handlers::habits::get_catalog))
        .route(
            "/api/habits/custom",
            post(handlers::habits::create_custom_habit),
        )
        .route("/api/habits/master", get(handlers::habits::get_master_list))
        .route(
            "/api/habits/master",
            post(handlers::habits::add_to_master_list),
        )
        .route(
            "/api/habits/master/:id",
            delete(handlers::habits::remove_from_master_list),
        )
        // Per-day habit snapshots
        .route("/api/habits/day/:date", get(handlers::habit_days::get_day))
        .route(
            "/api/habits/day/:date/toggle",
            post(handlers::habit_days::toggle_habit),
        )
        .route(
            "/api/habits/day/:date/:habit_id",
            delete(handlers::habit_days::remove_habit_for_day),
        )
        // Per-day objectives
        .route("/api/objectives", get(handlers::objectives::list_objectives))
        .route("/api/objectives", post(handlers::objectives::create_objective))
        .route(
            "/api/objectives/:id/toggle",
            post(handlers::objectives::toggle_objective),
        )
        .route(
            "/api/objectives/:id",
            delete(handlers::objectives::delete_objective),
        )
        // Companion chat & quote of the day
        .route("/api/chat", post(handlers::chat::send_chat))
        .route("/api/quote", get(handlers::quotes::get_quote))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let allowed_origins: Vec<axum::http::HeaderValue> = {
        let mut origins = vec![config
            .frontend_url
            .parse::<axum::http::HeaderValue>()
            .unwrap()];
        // In dev, also allow LAN access (e.g. testing from a device)
        if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
            for o in extra.split(',') {
                if let Ok(hv) = o.trim().parse::<axum::http::HeaderValue>() {
                    origins.push(hv);
                }
            }
        }
        origins
    };
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
