use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quizcast::notify::Notifier;
use quizcast::server;
use quizcast::source::TrivialBuzzSource;
use quizcast::state::AppState;
use quizcast::transport::HttpEventTransport;
use quizcast::types::GameConfig;

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizcast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting quizcast...");

    let config = GameConfig::default();
    let client = reqwest::Client::new();
    let notifier = Notifier::new(
        Arc::new(HttpEventTransport::new(client.clone())),
        config.notify_concurrency,
    );
    let source = Arc::new(TrivialBuzzSource::new(client));
    let state = AppState::new(config, source, notifier);

    let app = server::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let port = std::env::var("QUIZCAST_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(6899);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
