//! Company repository
//!
//! Handles company CRUD with:
//! - bound parameters for every value (including ids and tax ids)
//! - ORDER BY built only from the `SortField`/`SortDir` allow-lists
//! - writes inside a transaction, rolled back before an error is returned

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, Transaction};
use uuid::Uuid;

use crate::db::DbError;
use crate::models::{CompanyPatch, ListQuery, NewCompany, TaxId};

const COMPANY_COLUMNS: &str =
    "id, tax_id, legal_name, trade_name, activity_code, created_at, updated_at";

/// Company record from database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: Uuid,
    pub tax_id: String,
    pub legal_name: String,
    pub trade_name: String,
    pub activity_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for Company {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let id = Uuid::parse_str(&id).map_err(|e| sqlx::Error::ColumnDecode {
            index: "id".to_owned(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id,
            tax_id: row.try_get("tax_id")?,
            legal_name: row.try_get("legal_name")?,
            trade_name: row.try_get("trade_name")?,
            activity_code: row.try_get("activity_code")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Company repository
pub struct CompanyRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CompanyRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List one page of companies.
    ///
    /// Ties on the sort column fall back to `id` so paging is stable.
    /// `limit: None` binds `-1`, which SQLite reads as "no limit".
    pub async fn list(&self, query: ListQuery) -> Result<Vec<Company>, DbError> {
        let sql = format!(
            "SELECT {COMPANY_COLUMNS} FROM companies ORDER BY {} {}, id ASC LIMIT ?1 OFFSET ?2",
            query.sort.column(),
            query.dir.as_sql(),
        );

        tracing::debug!(
            sort = query.sort.as_str(),
            dir = query.dir.as_sql(),
            offset = query.offset,
            limit = ?query.limit,
            "listing companies"
        );

        sqlx::query_as::<_, Company>(&sql)
            .bind(query.limit.map(i64::from).unwrap_or(-1))
            .bind(i64::from(query.offset))
            .fetch_all(self.pool)
            .await
            .map_err(DbError::during("failed to list companies"))
    }

    /// Insert a new company with a generated id.
    ///
    /// `created_at` and `updated_at` are the same instant.
    pub async fn create(&self, company: &NewCompany) -> Result<Company, DbError> {
        const CONTEXT: &str = "failed to register company";

        let id = Uuid::new_v4();
        let now = now();

        let mut tx = self.pool.begin().await.map_err(DbError::during(CONTEXT))?;
        let result = sqlx::query(
            r#"
            INSERT INTO companies (id, tax_id, legal_name, trade_name, activity_code, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(id.to_string())
        .bind(company.tax_id.as_str())
        .bind(company.legal_name.as_str())
        .bind(company.trade_name.as_str())
        .bind(company.activity_code.as_str())
        .bind(format_timestamp(now))
        .bind(format_timestamp(now))
        .execute(&mut *tx)
        .await;
        finish(tx, result, CONTEXT).await?;

        tracing::info!(%id, tax_id = company.tax_id.as_str(), "company registered");

        Ok(Company {
            id,
            tax_id: company.tax_id.as_str().to_owned(),
            legal_name: company.legal_name.as_str().to_owned(),
            trade_name: company.trade_name.as_str().to_owned(),
            activity_code: company.activity_code.as_str().to_owned(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update and refresh `updated_at`.
    ///
    /// Fields absent from the patch bind as NULL and `COALESCE` keeps the
    /// stored value. The new `updated_at` is always later than the stored
    /// one, even within the same microsecond. Returns the number of rows
    /// touched (0 or 1).
    pub async fn update(&self, id: Uuid, patch: &CompanyPatch) -> Result<u64, DbError> {
        const CONTEXT: &str = "failed to update company";

        let mut tx = self.pool.begin().await.map_err(DbError::during(CONTEXT))?;
        let result = apply_patch(&mut tx, id, patch).await;
        let rows = finish(tx, result, CONTEXT).await?;

        tracing::info!(%id, rows, "company update applied");
        Ok(rows)
    }

    /// Get a single company by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, DbError> {
        let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE id = ?1");

        sqlx::query_as::<_, Company>(&sql)
            .bind(id.to_string())
            .fetch_optional(self.pool)
            .await
            .map_err(DbError::during("failed to find company"))
    }

    /// Delete the company registered under `tax_id`. Returns rows removed.
    pub async fn delete_by_tax_id(&self, tax_id: &TaxId) -> Result<u64, DbError> {
        const CONTEXT: &str = "failed to delete company";

        let mut tx = self.pool.begin().await.map_err(DbError::during(CONTEXT))?;
        let result = sqlx::query("DELETE FROM companies WHERE tax_id = ?1")
            .bind(tax_id.as_str())
            .execute(&mut *tx)
            .await
            .map(|r| r.rows_affected());
        let rows = finish(tx, result, CONTEXT).await?;

        tracing::info!(tax_id = tax_id.as_str(), rows, "company delete applied");
        Ok(rows)
    }

    /// Total number of stored companies.
    pub async fn count(&self) -> Result<i64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM companies")
            .fetch_one(self.pool)
            .await
            .map_err(DbError::during("failed to count companies"))?;
        Ok(count)
    }
}

async fn apply_patch(
    tx: &mut Transaction<'_, Sqlite>,
    id: Uuid,
    patch: &CompanyPatch,
) -> Result<u64, sqlx::Error> {
    let previous: Option<DateTime<Utc>> =
        sqlx::query_scalar("SELECT updated_at FROM companies WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&mut **tx)
            .await?;
    let Some(previous) = previous else {
        return Ok(0);
    };

    let result = sqlx::query(
        r#"
        UPDATE companies SET
            trade_name = COALESCE(?1, trade_name),
            activity_code = COALESCE(?2, activity_code),
            updated_at = ?3
        WHERE id = ?4
        "#,
    )
    .bind(patch.trade_name.as_ref().map(|t| t.as_str()))
    .bind(patch.activity_code.as_ref().map(|a| a.as_str()))
    .bind(format_timestamp(next_stamp(previous)))
    .bind(id.to_string())
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// Commit on success; roll back and wrap the error otherwise.
async fn finish<T>(
    tx: Transaction<'_, Sqlite>,
    result: Result<T, sqlx::Error>,
    context: &'static str,
) -> Result<T, DbError> {
    match result {
        Ok(value) => {
            tx.commit().await.map_err(DbError::during(context))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "rollback failed");
            }
            Err(DbError::persistence(context, err))
        }
    }
}

/// Current time at the precision stored in the table.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// `now()`, bumped past `previous` when the clock hasn't moved a full tick.
fn next_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    now().max(previous + Duration::microseconds(1))
}

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}
