//! Per-year fee averages

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use tasas_common::db::{yearly_averages, YearlyAverage};
use tasas_common::UniversityCategory;

use super::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AverageQuery {
    /// Restrict to one category code
    pub category: Option<i64>,
}

/// GET /api/average?category=<code>
pub async fn get_averages(
    State(state): State<AppState>,
    Query(query): Query<AverageQuery>,
) -> Result<Json<Vec<YearlyAverage>>, ApiError> {
    let category = query
        .category
        .map(|code| {
            UniversityCategory::from_code(code)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown category code: {}", code)))
        })
        .transpose()?;

    Ok(Json(yearly_averages(&state.db, category).await?))
}
