use oshop_backoffice::{
    AccessPolicy, AppState, MemoryRepository, PostgresRepository, RepositoryState,
    config::{AppConfig, Env},
    create_router,
    routes::RouteTable,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, sets up logging, opens the record store, builds the gates from
/// the access policy and serves the back-office.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast on missing production settings)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging: RUST_LOG wins, otherwise debug for this crate.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "oshop_backoffice=debug,tower_http=info".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Back-office starting in {:?} mode", config.env);

    // 3. Record store: Postgres when configured, process memory otherwise (local only).
    let repo = match &config.db_url {
        Some(db_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(db_url)
                .await
                .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("FATAL: Failed to apply database migrations.");

            Arc::new(PostgresRepository::new(pool)) as RepositoryState
        }
        None => {
            tracing::warn!("DATABASE_URL not set, records are kept in memory only");
            Arc::new(MemoryRepository::new()) as RepositoryState
        }
    };

    // 4. Access policy: built-in unless a JSON override is configured.
    let policy = match &config.access_policy_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .expect("FATAL: ACCESS_POLICY_PATH points to an unreadable file.");
            AccessPolicy::from_json(&raw).expect("FATAL: ACCESS_POLICY_PATH is not a valid policy.")
        }
        None => AccessPolicy::default(),
    };

    for route in policy.unknown_routes(&RouteTable::default()) {
        tracing::warn!(route = %route, "access policy names a route that does not exist");
    }

    let state = AppState::new(repo, config.clone(), policy)
        .expect("FATAL: Failed to build application state.");

    // 5. Router and server
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("FATAL: Failed to bind the HTTP listener.");

    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .expect("FATAL: HTTP server terminated unexpectedly.");
}
