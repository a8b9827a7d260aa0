mod routes;
mod session;

use fitness_app::infrastructure::db::{create_connection, run_migrations};
use fitness_app::{AppContext, Config};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let db = create_connection(&config.database_url)
        .await
        .expect("Failed to connect to database");
    run_migrations(&db)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database ready");

    let app_context = AppContext::new(&config, db);

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(7)));

    let app = routes::router(app_context).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(session_layer),
    );

    tracing::info!("Listening on http://{}", config.app_addr);
    tracing::info!("Rate limits: AI 10/min, exercises 60/min, nutrition search 30/min, parse 20/min");

    let listener = tokio::net::TcpListener::bind(&config.app_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
