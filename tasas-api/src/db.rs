//! Database access for the API server
//!
//! The API never writes: connections are opened with SQLite `mode=ro`.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;

/// Connect to an existing database in read-only mode
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        anyhow::bail!(
            "Database not found: {}\nRun tasas-import first to create and fill the database.",
            db_path.display()
        );
    }

    let options = SqliteConnectOptions::new().filename(db_path).read_only(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to connect to database in read-only mode")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_database_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = connect_readonly(&dir.path().join("none.db")).await.unwrap_err();
        assert!(err.to_string().contains("Database not found"));
    }

    #[tokio::test]
    async fn test_readonly_connection_rejects_writes() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("tasas.db");
        tasas_common::db::init_database(&db_path)
            .await
            .unwrap()
            .close()
            .await;

        let pool = connect_readonly(&db_path).await.expect("Should connect read-only");

        let result = sqlx::query("CREATE TABLE _test (id INTEGER)")
            .execute(&pool)
            .await;
        assert!(result.is_err(), "Write operation should fail in read-only mode");
    }

    #[tokio::test]
    async fn test_readonly_path_with_url_characters() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("tasas?mode=rwc#1.db");
        tasas_common::db::init_database(&db_path)
            .await
            .unwrap()
            .close()
            .await;

        let pool = connect_readonly(&db_path).await.expect("Should open the literal path");
        let count = tasas_common::db::count_universities(&pool, None).await.unwrap();
        assert_eq!(count, 0);
    }
}
