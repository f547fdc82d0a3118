//! Issue tracker HTTP server.

use std::sync::Arc;

use axum::Router;
use http::HeaderValue;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use issue_tracker::adapters::http::{issues_router, IssuesAppState};
use issue_tracker::adapters::memory::InMemoryProjectRepository;
use issue_tracker::adapters::postgres::{self, PostgresProjectRepository};
use issue_tracker::config::{AppConfig, ServerConfig, StoreBackend, ValidationError};
use issue_tracker::ports::ProjectRepository;
use issue_tracker::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init(&config.server);

    if config.is_production() && config.store.backend == StoreBackend::Memory {
        tracing::warn!("memory store in production; issues are lost on restart");
    }

    let (repository, pool) = build_repository(&config).await?;

    for name in config.store.seed_project_names()? {
        if repository.ensure_project(&name).await? {
            tracing::info!(project = %name, "seeded project");
        }
    }

    let state =
        IssuesAppState::new(repository).with_storage_timeout(config.server.request_timeout());
    let app = build_app(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        "issue tracker listening on {} ({:?} store)",
        addr,
        config.store.backend
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    tracing::info!("shutdown complete");
    Ok(())
}

async fn build_repository(
    config: &AppConfig,
) -> Result<(Arc<dyn ProjectRepository>, Option<PgPool>), Box<dyn std::error::Error>> {
    match config.store.backend {
        StoreBackend::Memory => Ok((Arc::new(InMemoryProjectRepository::new()), None)),
        StoreBackend::Postgres => {
            let database = config
                .database
                .as_ref()
                .ok_or(ValidationError::MissingRequired("DATABASE__URL"))?;
            let pool = postgres::connect(database).await?;
            if database.run_migrations {
                postgres::run_migrations(&pool).await?;
                tracing::info!("database migrations applied");
            }
            Ok((Arc::new(PostgresProjectRepository::new(pool.clone())), Some(pool)))
        }
    }
}

fn build_app(state: IssuesAppState, server: &ServerConfig) -> Router {
    let app = issues_router().with_state(state);

    let origins = server.cors_origins_list();
    let app = if origins.is_empty() {
        app
    } else {
        app.layer(cors_layer(&origins))
    };

    app.layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received, draining connections");
}
