use async_trait::async_trait;
use sqlx::FromRow;

use super::Pool;
use crate::schema::{NewPrincipal, Principal};
use crate::store::{ErrorExt, PrincipalStore, Result};
use crate::types::{id::PrincipalId, Sensitive};

#[derive(Debug, FromRow)]
struct PrincipalRow {
    id: PrincipalId,
    username: String,
    password_hash: String,
    enabled: bool,
}

impl From<PrincipalRow> for Principal {
    fn from(row: PrincipalRow) -> Self {
        Principal {
            id: row.id,
            username: row.username,
            password_hash: Sensitive::new(row.password_hash),
            enabled: row.enabled,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgPrincipalStore {
    pool: Pool,
}

impl PgPrincipalStore {
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrincipalStore for PgPrincipalStore {
    #[tracing::instrument(skip_all, name = "store.pg.principals.find_by_username")]
    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>> {
        let mut conn = self.pool.get().await?;
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"SELECT * FROM "principals" WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await
        .into_store_error()?;

        Ok(row.map(Principal::from))
    }

    #[tracing::instrument(skip_all, name = "store.pg.principals.exists_by_username")]
    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let mut conn = self.pool.get().await?;
        sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM "principals" WHERE username = $1)"#,
        )
        .bind(username)
        .fetch_one(&mut *conn)
        .await
        .into_store_error()
    }

    #[tracing::instrument(skip_all, name = "store.pg.principals.create")]
    async fn create(&self, principal: NewPrincipal) -> Result<Principal> {
        let mut conn = self.pool.get().await?;
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"INSERT INTO "principals" (username, password_hash, enabled)
            VALUES ($1, $2, $3)
            RETURNING *"#,
        )
        .bind(&principal.username)
        .bind(principal.password_hash.as_str())
        .bind(principal.enabled)
        .fetch_one(&mut *conn)
        .await
        .into_store_error()?;

        Ok(row.into())
    }
}
