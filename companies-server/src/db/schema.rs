//! Table initialisation for the companies store

use sqlx::SqlitePool;

use super::DbError;

/// Create the `companies` table and its indexes if they don't exist.
///
/// Idempotent; run once at startup before serving traffic. Timestamps are
/// fixed-width RFC 3339 text so that lexical order is chronological order.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!("Initialising companies schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            id TEXT PRIMARY KEY NOT NULL,
            tax_id TEXT NOT NULL,
            legal_name TEXT NOT NULL,
            trade_name TEXT NOT NULL,
            activity_code TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(DbError::during("failed to create companies table"))?;

    // Delete is keyed on tax id; one row per tax id
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_companies_tax_id ON companies(tax_id)")
        .execute(pool)
        .await
        .map_err(DbError::during("failed to create tax id index"))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_companies_legal_name ON companies(legal_name)")
        .execute(pool)
        .await
        .map_err(DbError::during("failed to create legal name index"))?;

    tracing::info!("Companies schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::db::create_pool;

    #[tokio::test]
    async fn init_is_idempotent() {
        let pool = create_pool(&StoreConfig::in_memory()).await.unwrap();

        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'companies'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn table_has_expected_columns() {
        let pool = create_pool(&StoreConfig::in_memory()).await.unwrap();
        init_schema(&pool).await.unwrap();

        let columns: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info('companies') ORDER BY cid")
            .fetch_all(&pool)
            .await
            .unwrap();
        let columns: Vec<String> = columns.into_iter().map(|(name,)| name).collect();

        assert_eq!(
            columns,
            [
                "id",
                "tax_id",
                "legal_name",
                "trade_name",
                "activity_code",
                "created_at",
                "updated_at"
            ]
        );
    }
}
