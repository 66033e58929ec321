//! Fee record queries

use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

use super::models::{round_cents, Fee, FeeDraft, YearlyAverage};
use crate::category::UniversityCategory;
use crate::Result;

/// Append a fee row for a university (never overwrites existing rows)
pub async fn insert_fee(pool: &SqlitePool, university_id: i64, fee: &FeeDraft) -> Result<Fee> {
    let [t1, t2, t3, t4] = fee.tiers.map(round_cents);

    let id = sqlx::query(
        r#"
        INSERT INTO fees (university_id, academic_year, fee_type, degree_level,
                          tier1, tier2, tier3, tier4, source_url)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(university_id)
    .bind(fee.academic_year)
    .bind(fee.fee_type.as_str())
    .bind(fee.degree_level.as_str())
    .bind(t1)
    .bind(t2)
    .bind(t3)
    .bind(t4)
    .bind(&fee.source_url)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(Fee {
        id,
        university_id,
        academic_year: fee.academic_year,
        fee_type: fee.fee_type,
        degree_level: fee.degree_level,
        tiers: [t1, t2, t3, t4],
        source_url: fee.source_url.clone(),
    })
}

/// All fee rows of a university, oldest year first
pub async fn fees_for_university(pool: &SqlitePool, university_id: i64) -> Result<Vec<Fee>> {
    let rows = sqlx::query(
        r#"
        SELECT id, university_id, academic_year, fee_type, degree_level,
               tier1, tier2, tier3, tier4, source_url
        FROM fees
        WHERE university_id = ?
        ORDER BY academic_year ASC, id ASC
        "#,
    )
    .bind(university_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(Fee::from_row).collect()
}

/// Fee row each university has for `academic_year`, keyed by university id
///
/// Re-imports append rows, so the most recently inserted one wins.
pub async fn latest_fees_for_year(
    pool: &SqlitePool,
    academic_year: i32,
) -> Result<HashMap<i64, Fee>> {
    let rows = sqlx::query(
        r#"
        SELECT id, university_id, academic_year, fee_type, degree_level,
               tier1, tier2, tier3, tier4, source_url
        FROM fees
        WHERE id IN (
            SELECT MAX(id) FROM fees WHERE academic_year = ? GROUP BY university_id
        )
        "#,
    )
    .bind(academic_year)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| Fee::from_row(row).map(|fee| (fee.university_id, fee)))
        .collect()
}

pub async fn count_fees(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM fees")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Per-year averages of every tier, optionally for one category only
pub async fn yearly_averages(
    pool: &SqlitePool,
    category: Option<UniversityCategory>,
) -> Result<Vec<YearlyAverage>> {
    let rows = sqlx::query(
        r#"
        SELECT f.academic_year AS academic_year,
               COUNT(DISTINCT f.university_id) AS universities,
               AVG(f.tier1) AS tier1, AVG(f.tier2) AS tier2,
               AVG(f.tier3) AS tier3, AVG(f.tier4) AS tier4
        FROM fees f
        JOIN universities u ON u.id = f.university_id
        WHERE ? IS NULL OR u.category = ?
        GROUP BY f.academic_year
        ORDER BY f.academic_year ASC
        "#,
    )
    .bind(category.map(|c| c.code()))
    .bind(category.map(|c| c.code()))
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<YearlyAverage> {
            Ok(YearlyAverage {
                academic_year: row.try_get("academic_year")?,
                universities: row.try_get("universities")?,
                tiers: [
                    round_cents(row.try_get("tier1")?),
                    round_cents(row.try_get("tier2")?),
                    round_cents(row.try_get("tier3")?),
                    round_cents(row.try_get("tier4")?),
                ],
            })
        })
        .collect()
}
