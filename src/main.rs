//! Account service entry point
//!
//! Boots tracing, configuration, the database (with migrations), the
//! Prometheus recorder and the HTTP server with graceful shutdown.

use std::sync::Arc;
use std::time::Instant;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use account_service::application::AccountService;
use account_service::config::AppConfig;
use account_service::infrastructure::database::migrator::Migrator;
use account_service::infrastructure::database::repositories::AccountRepository;
use account_service::infrastructure::delegates::{HttpNotificationDispatcher, HttpTokenAuthority};
use account_service::interfaces::http::modules::accounts::AccountsState;
use account_service::interfaces::http::modules::health::HealthState;
use account_service::interfaces::http::modules::metrics::MetricsState;
use account_service::{create_router, init_database, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    info!("Starting account service...");

    // Prometheus recorder must be installed before any metrics calls.
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig::from_env();
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Service wiring ─────────────────────────────────────────
    let repo = Arc::new(AccountRepository::new(db.clone()));
    let token_authority = Arc::new(HttpTokenAuthority::new(config.token_service.clone()));
    let notifier = Arc::new(HttpNotificationDispatcher::new(
        config.notifications.service_url.clone(),
    ));

    let service = Arc::new(AccountService::new(
        repo,
        token_authority,
        notifier,
        config.security.bcrypt_cost,
        config.notifications.send_email,
    ));

    let router = create_router(
        AccountsState { service },
        HealthState {
            db: db.clone(),
            started_at: Arc::new(Instant::now()),
        },
        Some(MetricsState {
            handle: prometheus_handle,
        }),
    );

    // ── HTTP server with graceful shutdown ─────────────────────
    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    if let Err(e) = db.close().await {
        error!("Error closing database connection: {}", e);
    }
    info!("Account service shutdown complete");
    Ok(())
}
