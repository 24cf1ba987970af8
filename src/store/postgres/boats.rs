use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_stack::{Report, ResultExt};
use sqlx::FromRow;

use super::Pool;
use crate::schema::{Boat, BoatType, NewBoat, Page, PageRequest};
use crate::store::{BoatStore, Error, ErrorExt, Result};
use crate::types::id::BoatId;

#[derive(Debug, FromRow)]
struct BoatRow {
    id: BoatId,
    name: String,
    description: Option<String>,
    boat_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BoatRow> for Boat {
    type Error = Report<Error>;

    fn try_from(row: BoatRow) -> Result<Self> {
        let boat_type = row
            .boat_type
            .parse::<BoatType>()
            .change_context(Error::CorruptRecord)
            .attach_printable_lazy(|| format!("boat type = {:?}", row.boat_type))?;

        Ok(Boat {
            id: row.id,
            name: row.name,
            description: row.description,
            boat_type,
            created_at: row.created_at.into(),
            updated_at: row.updated_at.into(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct PgBoatStore {
    pool: Pool,
}

impl PgBoatStore {
    #[must_use]
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BoatStore for PgBoatStore {
    #[tracing::instrument(skip_all, name = "store.pg.boats.create")]
    async fn create(&self, boat: NewBoat) -> Result<Boat> {
        let mut conn = self.pool.get().await?;
        sqlx::query_as::<_, BoatRow>(
            r#"INSERT INTO "boats" (name, description, boat_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *"#,
        )
        .bind(&boat.name)
        .bind(&boat.description)
        .bind(boat.boat_type.as_str())
        .bind(boat.created_at.into_datetime())
        .bind(boat.updated_at.into_datetime())
        .fetch_one(&mut *conn)
        .await
        .into_store_error()?
        .try_into()
    }

    #[tracing::instrument(skip(self), name = "store.pg.boats.find_by_id")]
    async fn find_by_id(&self, id: BoatId) -> Result<Option<Boat>> {
        let mut conn = self.pool.get().await?;
        sqlx::query_as::<_, BoatRow>(r#"SELECT * FROM "boats" WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .into_store_error()?
            .map(Boat::try_from)
            .transpose()
    }

    #[tracing::instrument(skip(self), name = "store.pg.boats.find_all")]
    async fn find_all(&self, request: &PageRequest) -> Result<Page<Boat>> {
        let mut conn = self.pool.get().await?;

        // column and direction come from closed enums, never from input
        let query = format!(
            r#"SELECT * FROM "boats" ORDER BY {} {}, id ASC LIMIT $1 OFFSET $2"#,
            request.sort.field.column(),
            request.sort.direction.as_sql(),
        );

        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, BoatRow>(&query)
            .bind(i64::from(request.size))
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
            .into_store_error()?;

        let total = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM "boats""#)
            .fetch_one(&mut *conn)
            .await
            .into_store_error()?;

        let content = rows
            .into_iter()
            .map(Boat::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Page::new(
            content,
            request,
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    #[tracing::instrument(skip_all, fields(id = %boat.id), name = "store.pg.boats.save")]
    async fn save(&self, boat: &Boat) -> Result<Boat> {
        let mut conn = self.pool.get().await?;
        sqlx::query_as::<_, BoatRow>(
            r#"INSERT INTO "boats" (id, name, description, boat_type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                boat_type = EXCLUDED.boat_type,
                updated_at = EXCLUDED.updated_at
            RETURNING *"#,
        )
        .bind(boat.id)
        .bind(&boat.name)
        .bind(&boat.description)
        .bind(boat.boat_type.as_str())
        .bind(boat.created_at.into_datetime())
        .bind(boat.updated_at.into_datetime())
        .fetch_one(&mut *conn)
        .await
        .into_store_error()?
        .try_into()
    }

    #[tracing::instrument(skip(self), name = "store.pg.boats.delete_by_id")]
    async fn delete_by_id(&self, id: BoatId) -> Result<()> {
        let mut conn = self.pool.get().await?;
        sqlx::query(r#"DELETE FROM "boats" WHERE id = $1"#)
            .bind(id)
            .execute(&mut *conn)
            .await
            .into_store_error()?;

        Ok(())
    }

    #[tracing::instrument(skip(self), name = "store.pg.boats.exists_by_id")]
    async fn exists_by_id(&self, id: BoatId) -> Result<bool> {
        let mut conn = self.pool.get().await?;
        sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS(SELECT 1 FROM "boats" WHERE id = $1)"#)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .into_store_error()
    }
}
