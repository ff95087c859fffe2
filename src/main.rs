use std::env;
use std::path::Path;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use ravenpass::api;
use ravenpass::catalog::ProgressionCatalog;
use ravenpass::database::postgres::{init_schema, PgAccountDirectory, PgProfileStore};
use ravenpass::model::AppState;
use ravenpass::services::notify::{drain_outbox, OutboxNotifier};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let database_url = env::var("DATABASE_URL").expect("Expected DATABASE_URL in the environment.");
    let api_key = env::var("API_KEY").expect("Expected API_KEY in the environment.");
    let catalog_dir = env::var("CATALOG_DIR").unwrap_or_else(|_| "data".to_string());
    let http_addr = env::var("HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8787".to_string());

    let catalog = ProgressionCatalog::load(Path::new(&catalog_dir))
        .expect("Failed to load the progression catalog.");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("Failed to connect to the database.");
    init_schema(&pool)
        .await
        .expect("Failed to initialize the database schema.");

    let (notifier, outbox_rx) = OutboxNotifier::new();
    tokio::spawn(drain_outbox(outbox_rx));

    let state = Arc::new(AppState::new(
        Arc::new(PgProfileStore::new(pool.clone())),
        Arc::new(PgAccountDirectory::new(pool)),
        Arc::new(catalog),
        Arc::new(notifier),
        api_key,
    ));

    let app = api::router(state).layer(TraceLayer::new_for_http());
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("Failed to bind the HTTP listener.");
    tracing::info!(target: "server", addr = %http_addr, "listening");
    axum::serve(listener, app)
        .await
        .expect("HTTP server terminated unexpectedly.");
}
