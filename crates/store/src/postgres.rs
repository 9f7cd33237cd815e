//! PostgreSQL-backed document store.
//!
//! Each record is one row holding the contact document as JSONB. Text search
//! runs `ILIKE` per searchable field with LIKE metacharacters escaped, so the
//! user's text is always matched literally.

use std::time::Duration;

use async_trait::async_trait;
use contact_core::error::DbErrorCode;
use contact_core::{
    validate_update, ContactFilter, ContactId, ContactRecord, ContactUs, Error, Result,
};
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::Row;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::store::ContactStore;

const SELECT_FILTERED: &str = r#"
SELECT id, doc
FROM contact_us
WHERE ($1::uuid IS NULL OR id = $1)
  AND (
    $2::text IS NULL
    OR doc->>'talkAbout' ILIKE $2 ESCAPE '\'
    OR doc->>'timeFrame' ILIKE $2 ESCAPE '\'
    OR doc->>'projectType' ILIKE $2 ESCAPE '\'
    OR doc->>'budget' ILIKE $2 ESCAPE '\'
    OR doc->>'description' ILIKE $2 ESCAPE '\'
    OR doc->'requester'->>'name' ILIKE $2 ESCAPE '\'
    OR doc->'requester'->>'companyName' ILIKE $2 ESCAPE '\'
    OR doc->'requester'->>'email' ILIKE $2 ESCAPE '\'
  )
ORDER BY seq
"#;

/// PostgreSQL store with a connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects a pool using `config`.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to connect to PostgreSQL");
                Error::database(DbErrorCode::OperationFailed, format!("connect failed: {}", e))
            })?;

        info!(
            max_connections = config.max_connections,
            "Created PostgreSQL pool"
        );

        Ok(Self { pool })
    }

    /// Runs the DDL. Safe to call on every startup.
    pub async fn init_schema(&self) -> Result<()> {
        for ddl in crate::schema::all_tables() {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(db_error("init_schema"))?;
        }
        info!("PostgreSQL schema initialized");
        Ok(())
    }
}

/// Escapes `\`, `%` and `_` and wraps the text for a substring `ILIKE`.
pub fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn db_error(op: &'static str) -> impl Fn(sqlx::Error) -> Error {
    move |e| {
        error!(operation = op, error = %e, "PostgreSQL operation failed");
        Error::database(DbErrorCode::OperationFailed, format!("{} failed", op))
    }
}

fn decode(row: PgRow) -> Result<ContactRecord> {
    let id: Uuid = row.try_get("id").map_err(db_error("decode"))?;
    let Json(contact): Json<ContactUs> = row.try_get("doc").map_err(db_error("decode"))?;
    Ok(ContactRecord::new(ContactId::from_uuid(id), contact))
}

fn decode_all(rows: Vec<PgRow>) -> Result<Vec<ContactRecord>> {
    rows.into_iter().map(decode).collect()
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[async_trait]
impl ContactStore for PgStore {
    async fn find(&self, filter: &ContactFilter) -> Result<Vec<ContactRecord>> {
        let rows = sqlx::query(SELECT_FILTERED)
            .bind(filter.id.map(|id| id.as_uuid()))
            .bind(filter.text.as_deref().map(like_pattern))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("find"))?;
        decode_all(rows)
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<ContactRecord>> {
        let row = sqlx::query("SELECT id, doc FROM contact_us WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find_by_id"))?;
        row.map(decode).transpose()
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_us")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count"))?;
        Ok(count.max(0) as u64)
    }

    async fn page(&self, offset: u64, limit: u64) -> Result<Vec<ContactRecord>> {
        let rows = sqlx::query("SELECT id, doc FROM contact_us ORDER BY seq LIMIT $1 OFFSET $2")
            .bind(to_i64(limit))
            .bind(to_i64(offset))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("page"))?;
        decode_all(rows)
    }

    async fn insert(&self, contact: ContactUs) -> Result<ContactRecord> {
        let record = ContactRecord::new(ContactId::generate(), contact);
        sqlx::query("INSERT INTO contact_us (id, doc) VALUES ($1, $2)")
            .bind(record.id.as_uuid())
            .bind(Json(&record.contact))
            .execute(&self.pool)
            .await
            .map_err(db_error("insert"))?;
        Ok(record)
    }

    async fn apply_patch(&self, id: &ContactId, patch: &Value) -> Result<Option<ContactRecord>> {
        let mut tx = self.pool.begin().await.map_err(db_error("apply_patch"))?;

        // Row lock serializes concurrent patches of the same record.
        let row = sqlx::query("SELECT id, doc FROM contact_us WHERE id = $1 FOR UPDATE")
            .bind(id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("apply_patch"))?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut record = decode(row)?;
        record.contact = validate_update(&record.contact, patch).map_err(Error::Validation)?;

        sqlx::query("UPDATE contact_us SET doc = $2, updated_at = NOW() WHERE id = $1")
            .bind(id.as_uuid())
            .bind(Json(&record.contact))
            .execute(&mut *tx)
            .await
            .map_err(db_error("apply_patch"))?;
        tx.commit().await.map_err(db_error("apply_patch"))?;

        Ok(Some(record))
    }

    async fn replace(&self, record: &ContactRecord) -> Result<bool> {
        let result =
            sqlx::query("UPDATE contact_us SET doc = $2, updated_at = NOW() WHERE id = $1")
                .bind(record.id.as_uuid())
                .bind(Json(&record.contact))
                .execute(&self.pool)
                .await
                .map_err(db_error("replace"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &ContactId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contact_us WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[ContactId]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<Uuid> = ids.iter().map(|id| id.as_uuid()).collect();
        let result = sqlx::query("DELETE FROM contact_us WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete_many"))?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error("ping"))?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL pool closed");
    }
}
