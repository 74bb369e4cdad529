use std::{future::Future, net::SocketAddr, sync::Arc};

use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use service::auth::{repo::seaorm::SeaOrmCredentialRepository, CredentialStore, TokenService};
use service::catalog::CatalogService;
use service::media::MediaStore;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire services over an open database connection.
pub fn build_state(db: DatabaseConnection, cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let tokens = Arc::new(TokenService::new(&cfg.auth)?);
    let credentials = Arc::new(CredentialStore::new(Arc::new(SeaOrmCredentialRepository { db: db.clone() })));
    let catalog = Arc::new(CatalogService::new(db, MediaStore::new(cfg.media.upload_dir.clone())));
    Ok(ServerState { tokens, credentials, catalog })
}

/// Connect, migrate, bind and serve until `shutdown` resolves.
pub async fn run_with_shutdown<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    common::env::ensure_env(&cfg.media.upload_dir).await?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!(event = "migrations_applied", "database schema up to date");

    let state = build_state(db, &cfg)?;
    let app = routes::build_router(state, build_cors(), &cfg.media);

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, upload_dir = %cfg.media.upload_dir, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
