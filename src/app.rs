use error_stack::{Result, ResultExt};
use std::sync::Arc;
use thiserror::Error;

use crate::auth::{self, AuthGate, SessionStore};
use crate::config;
use crate::services::BoatService;
use crate::store::{self, BoatStore, PrincipalStore};

/// Everything a request handler needs, cheap to clone per worker.
#[derive(Debug, Clone)]
pub struct App {
    pub config: Arc<config::Server>,
    pub boats: BoatService,
    pub auth: AuthGate,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
    /// Connects to PostgreSQL and runs pending migrations when `db` is
    /// configured, otherwise keeps records in memory. Seed principals
    /// are provisioned either way.
    #[tracing::instrument(skip_all)]
    pub async fn new(cfg: config::Server) -> Result<Self, AppError> {
        let (boats, principals): (Arc<dyn BoatStore>, Arc<dyn PrincipalStore>) =
            if let Some(db) = cfg.db.as_ref() {
                let pool = store::Pool::new(db).await.change_context(AppError)?;
                pool.migrate().await.change_context(AppError)?;
                tracing::info!("using PostgreSQL record store");
                (
                    Arc::new(store::PgBoatStore::new(pool.clone())),
                    Arc::new(store::PgPrincipalStore::new(pool)),
                )
            } else {
                tracing::warn!("no database configured, records are kept in memory");
                (
                    Arc::new(store::MemoryBoatStore::new()),
                    Arc::new(store::MemoryPrincipalStore::new()),
                )
            };

        Self::with_stores(cfg, boats, principals).await
    }

    /// Same as [`App::new`] but never touches a database, even if
    /// one is configured.
    pub async fn in_memory(cfg: config::Server) -> Result<Self, AppError> {
        Self::with_stores(
            cfg,
            Arc::new(store::MemoryBoatStore::new()),
            Arc::new(store::MemoryPrincipalStore::new()),
        )
        .await
    }

    pub async fn with_stores(
        cfg: config::Server,
        boats: Arc<dyn BoatStore>,
        principals: Arc<dyn PrincipalStore>,
    ) -> Result<Self, AppError> {
        let created = auth::seed::provision(principals.as_ref(), &cfg.auth.seed)
            .await
            .change_context(AppError)?;

        if created > 0 {
            tracing::info!("provisioned {created} seed principal(s)");
        }

        let sessions = Arc::new(SessionStore::new(cfg.auth.session_ttl()));
        Ok(Self {
            boats: BoatService::new(boats),
            auth: AuthGate::new(principals, sessions),
            config: Arc::new(cfg),
        })
    }
}
