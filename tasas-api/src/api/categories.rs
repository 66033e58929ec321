//! University category enumeration

use axum::Json;
use serde::Serialize;
use tasas_common::UniversityCategory;

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub code: i64,
    pub key: UniversityCategory,
    pub label: &'static str,
}

/// GET /api/categories
pub async fn list_categories() -> Json<Vec<CategoryResponse>> {
    Json(
        UniversityCategory::ALL
            .into_iter()
            .map(|c| CategoryResponse {
                code: c.code(),
                key: c,
                label: c.label(),
            })
            .collect(),
    )
}
