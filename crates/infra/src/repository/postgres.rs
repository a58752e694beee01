//! Postgres-backed beer repository.
//!
//! ## Error Mapping
//!
//! | SQLx Error | RepositoryError |
//! |------------|-----------------|
//! | Database (any code) | `Storage` |
//! | PoolClosed / Io / other | `Storage` |
//! | Column decode / out-of-range value | `Corrupt` |
//!
//! ## Schema
//!
//! A single `beers` table keyed by a `BIGSERIAL` id. Name uniqueness is a
//! service rule and deliberately has no unique index here.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use beerstock_beer::{Beer, BeerType, NewBeer};
use beerstock_core::{BeerId, Entity};

use super::r#trait::{BeerRepository, RepositoryError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS beers (
    id           BIGSERIAL PRIMARY KEY,
    name         TEXT   NOT NULL,
    brand        TEXT   NOT NULL,
    beer_type    TEXT   NOT NULL,
    quantity     BIGINT NOT NULL CHECK (quantity >= 0),
    max_quantity BIGINT NOT NULL CHECK (max_quantity > 0),
    CHECK (quantity <= max_quantity)
)
"#;

/// Postgres-backed beer repository.
///
/// Uses the SQLx connection pool, which is `Send + Sync`; the repository can be
/// shared freely across handlers.
#[derive(Debug, Clone)]
pub struct PostgresBeerRepository {
    pool: Arc<PgPool>,
}

impl PostgresBeerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the `beers` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl BeerRepository for PostgresBeerRepository {
    #[instrument(skip(self), err)]
    async fn find_by_name(&self, name: &str) -> Result<Option<Beer>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, brand, beer_type, quantity, max_quantity
            FROM beers
            WHERE name = $1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_name", e))?;

        row.as_ref().map(beer_from_row).transpose()
    }

    #[instrument(skip(self), fields(beer_id = %id), err)]
    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, brand, beer_type, quantity, max_quantity
            FROM beers
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.as_ref().map(beer_from_row).transpose()
    }

    #[instrument(skip(self, beer), fields(name = %beer.name()), err)]
    async fn save(&self, beer: NewBeer) -> Result<Beer, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO beers (name, brand, beer_type, quantity, max_quantity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(beer.name())
        .bind(beer.brand())
        .bind(beer.beer_type().as_str())
        .bind(i64::from(beer.stock().quantity()))
        .bind(i64::from(beer.stock().max()))
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save", e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| RepositoryError::Corrupt(format!("id: {e}")))?;
        Ok(beer.with_id(BeerId::new(id)))
    }

    #[instrument(skip(self, beer), fields(beer_id = %beer.id()), err)]
    async fn update(&self, beer: &Beer) -> Result<Beer, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE beers
            SET quantity = $2
            WHERE id = $1
            "#,
        )
        .bind(beer.id().value())
        .bind(i64::from(beer.quantity()))
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Storage(format!(
                "cannot update beer {}: no such record",
                beer.id()
            )));
        }
        Ok(beer.clone())
    }

    #[instrument(skip(self), err)]
    async fn find_all(&self) -> Result<Vec<Beer>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, brand, beer_type, quantity, max_quantity
            FROM beers
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.iter().map(beer_from_row).collect()
    }

    #[instrument(skip(self), fields(beer_id = %id), err)]
    async fn delete_by_id(&self, id: BeerId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM beers WHERE id = $1")
            .bind(id.value())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;
        Ok(())
    }
}

/// Raw column values of one `beers` row, before domain validation.
#[derive(Debug)]
struct BeerRow {
    id: i64,
    name: String,
    brand: String,
    beer_type: String,
    quantity: i64,
    max: i64,
}

impl BeerRow {
    fn into_beer(self) -> Result<Beer, RepositoryError> {
        let beer_type: BeerType = self
            .beer_type
            .parse()
            .map_err(|e| corrupt("beer_type", &e))?;
        let quantity = u32::try_from(self.quantity).map_err(|e| corrupt("quantity", &e))?;
        let max = u32::try_from(self.max).map_err(|e| corrupt("max_quantity", &e))?;

        Beer::from_parts(BeerId::new(self.id), self.name, self.brand, beer_type, quantity, max)
            .map_err(|e| corrupt("row", &e))
    }
}

fn corrupt(column: &str, e: &dyn core::fmt::Display) -> RepositoryError {
    RepositoryError::Corrupt(format!("{column}: {e}"))
}

fn beer_from_row(row: &PgRow) -> Result<Beer, RepositoryError> {
    BeerRow {
        id: row.try_get("id").map_err(|e| corrupt("id", &e))?,
        name: row.try_get("name").map_err(|e| corrupt("name", &e))?,
        brand: row.try_get("brand").map_err(|e| corrupt("brand", &e))?,
        beer_type: row.try_get("beer_type").map_err(|e| corrupt("beer_type", &e))?,
        quantity: row.try_get("quantity").map_err(|e| corrupt("quantity", &e))?,
        max: row
            .try_get("max_quantity")
            .map_err(|e| corrupt("max_quantity", &e))?,
    }
    .into_beer()
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => RepositoryError::Storage(format!(
            "database error in {}: {}",
            operation,
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            RepositoryError::Storage(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::ColumnDecode { index, source } => {
            RepositoryError::Corrupt(format!("column {index} in {operation}: {source}"))
        }
        other => RepositoryError::Storage(format!("sqlx error in {operation}: {other}")),
    }
}
