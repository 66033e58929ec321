//! University list, detail and fee endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use tasas_common::db::{self, Fee, University};
use tasas_common::{DegreeLevel, FeeType, UniversityCategory};

use super::ApiError;
use crate::pagination::{calculate_pagination, Page, PAGE_SIZE};
use crate::AppState;

/// Query parameters for paginated lists
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Serialize)]
pub struct UniversityResponse {
    pub short_code: String,
    pub name: String,
    pub category: UniversityCategory,
    pub category_label: &'static str,
    pub center: Option<String>,
    pub campus: Option<String>,
    pub province: String,
    pub url: Option<String>,
    pub logo: Option<String>,
    /// Fee row for the course in progress, if one was imported
    pub current_fees: Option<FeeResponse>,
}

impl UniversityResponse {
    fn with_current_fees(mut self, fee: Option<Fee>) -> Self {
        self.current_fees = fee.map(Into::into);
        self
    }
}

impl From<University> for UniversityResponse {
    fn from(u: University) -> Self {
        Self {
            short_code: u.short_code,
            name: u.name,
            category: u.category,
            category_label: u.category.label(),
            center: u.center,
            campus: u.campus,
            province: u.province,
            url: u.url,
            logo: u.logo,
            current_fees: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeeResponse {
    pub academic_year: i32,
    pub fee_type: FeeType,
    pub degree_level: DegreeLevel,
    pub tier1: f64,
    pub tier2: f64,
    pub tier3: f64,
    pub tier4: f64,
    pub source_url: Option<String>,
}

impl From<Fee> for FeeResponse {
    fn from(f: Fee) -> Self {
        let [tier1, tier2, tier3, tier4] = f.tiers;
        Self {
            academic_year: f.academic_year,
            fee_type: f.fee_type,
            degree_level: f.degree_level,
            tier1,
            tier2,
            tier3,
            tier4,
            source_url: f.source_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UniversityFeesResponse {
    pub university: UniversityResponse,
    pub fees: Vec<FeeResponse>,
}

/// GET /api/universities?page=N
pub async fn list_universities(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<UniversityResponse>>, ApiError> {
    page_of_universities(&state, None, query.page).await.map(Json)
}

/// GET /api/provinces/:province?page=N
pub async fn list_province_universities(
    State(state): State<AppState>,
    Path(province): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<UniversityResponse>>, ApiError> {
    if province.trim().is_empty() {
        return Err(ApiError::BadRequest("Province must not be empty".to_string()));
    }
    page_of_universities(&state, Some(&province), query.page).await.map(Json)
}

async fn page_of_universities(
    state: &AppState,
    province: Option<&str>,
    page: i64,
) -> Result<Page<UniversityResponse>, ApiError> {
    let total = db::count_universities(&state.db, province).await?;
    let p = calculate_pagination(total, page);
    let rows = db::list_universities(&state.db, province, PAGE_SIZE, p.offset).await?;
    let mut current = db::latest_fees_for_year(&state.db, state.current_course()).await?;

    let results = rows
        .into_iter()
        .map(|u| {
            let fee = current.remove(&u.id);
            UniversityResponse::from(u).with_current_fees(fee)
        })
        .collect();

    Ok(Page::new(total, p, results))
}

/// GET /api/universities/:code
pub async fn get_university(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<UniversityResponse>, ApiError> {
    let university = find(&state, &code).await?;
    let fees = db::fees_for_university(&state.db, university.id).await?;
    let current = latest_for_course(&fees, state.current_course());

    Ok(Json(UniversityResponse::from(university).with_current_fees(current)))
}

/// GET /api/universities/:code/fees
pub async fn get_university_fees(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<UniversityFeesResponse>, ApiError> {
    let university = find(&state, &code).await?;
    let fees = db::fees_for_university(&state.db, university.id).await?;
    let current = latest_for_course(&fees, state.current_course());

    Ok(Json(UniversityFeesResponse {
        university: UniversityResponse::from(university).with_current_fees(current),
        fees: fees.into_iter().map(Into::into).collect(),
    }))
}

/// Last imported row for `course` in a year-then-id ordered fee list
fn latest_for_course(fees: &[Fee], course: i32) -> Option<Fee> {
    fees.iter().rev().find(|f| f.academic_year == course).cloned()
}

async fn find(state: &AppState, code: &str) -> Result<University, ApiError> {
    if !db::is_valid_short_code(code) {
        return Err(ApiError::BadRequest(format!("Invalid short code: {}", code)));
    }

    db::find_by_short_code(&state.db, code)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("university '{}'", code)))
}
