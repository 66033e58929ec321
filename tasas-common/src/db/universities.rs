//! University queries

use sqlx::SqlitePool;

use super::models::{NewUniversity, University};
use crate::{Error, Result};

const SELECT_UNIVERSITY: &str = "SELECT id, short_code, name, category, center, campus, province, \
     url, logo, updated_at FROM universities";

/// Look up a university by its unique short code
pub async fn find_by_short_code(pool: &SqlitePool, short_code: &str) -> Result<Option<University>> {
    let row = sqlx::query(&format!("{} WHERE short_code = ?", SELECT_UNIVERSITY))
        .bind(short_code)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(University::from_row).transpose()
}

pub async fn get_university(pool: &SqlitePool, id: i64) -> Result<University> {
    let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_UNIVERSITY))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("university {}", id)))?;

    University::from_row(&row)
}

/// Insert a new university row
pub async fn insert_university(pool: &SqlitePool, uni: &NewUniversity) -> Result<University> {
    let id = sqlx::query(
        r#"
        INSERT INTO universities (short_code, name, category, center, campus, province, url, logo)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&uni.short_code)
    .bind(&uni.name)
    .bind(uni.category.code())
    .bind(&uni.center)
    .bind(&uni.campus)
    .bind(&uni.province)
    .bind(&uni.url)
    .bind(&uni.logo)
    .execute(pool)
    .await?
    .last_insert_rowid();

    get_university(pool, id).await
}

/// Overwrite an existing university row in place
///
/// A `None` logo keeps the stored one.
pub async fn update_university(pool: &SqlitePool, id: i64, uni: &NewUniversity) -> Result<University> {
    let result = sqlx::query(
        r#"
        UPDATE universities
        SET short_code = ?, name = ?, category = ?, center = ?, campus = ?, province = ?,
            url = ?, logo = COALESCE(?, logo), updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&uni.short_code)
    .bind(&uni.name)
    .bind(uni.category.code())
    .bind(&uni.center)
    .bind(&uni.campus)
    .bind(&uni.province)
    .bind(&uni.url)
    .bind(&uni.logo)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("university {}", id)));
    }

    get_university(pool, id).await
}

/// Count universities, optionally restricted to one province
pub async fn count_universities(pool: &SqlitePool, province: Option<&str>) -> Result<i64> {
    let count = match province {
        Some(p) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM universities WHERE province = ?")
                .bind(p)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM universities")
                .fetch_one(pool)
                .await?
        }
    };

    Ok(count)
}

/// One page of universities ordered by short code
pub async fn list_universities(
    pool: &SqlitePool,
    province: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<University>> {
    let rows = match province {
        Some(p) => {
            sqlx::query(&format!(
                "{} WHERE province = ? ORDER BY short_code ASC LIMIT ? OFFSET ?",
                SELECT_UNIVERSITY
            ))
            .bind(p)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(&format!(
                "{} ORDER BY short_code ASC LIMIT ? OFFSET ?",
                SELECT_UNIVERSITY
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter().map(University::from_row).collect()
}
