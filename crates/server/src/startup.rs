use std::future::Future;

use anyhow::Context;
use axum::Router;
use configs::AppConfig;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: connect the store, create the schema if absent, and serve
/// until SIGINT/SIGTERM.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg)
        .await
        .context("connecting to database")?;
    models::db::migrate(&db).await.context("applying migrations")?;

    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port))
        .await
        .with_context(|| format!("binding {}:{}", cfg.server.host, cfg.server.port))?;
    serve(listener, db, shutdown_signal()).await
}

/// Serve on `listener` until `shutdown` resolves, let in-flight requests finish,
/// then release the database pool.
pub async fn serve<F>(listener: TcpListener, db: DatabaseConnection, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app: Router = routes::build_router(ServerState::new(db.clone()), build_cors());

    let addr = listener.local_addr()?;
    info!(%addr, "starting movie server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

    info!("server stopped, closing database pool");
    db.close().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
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
}
