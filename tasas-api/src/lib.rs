//! tasas-api library - read-only browsable API over the fee catalog

use axum::Router;
use sqlx::SqlitePool;
use tasas_common::config::ImportSettings;
use tasas_common::current_course_now;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod pagination;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (read-only)
    pub db: SqlitePool,
    /// Month (1-12) in which a new course starts, for `current_fees`
    pub course_start_month: u32,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            course_start_month: ImportSettings::default().course_start_month,
        }
    }

    pub fn with_course_start_month(mut self, month: u32) -> Self {
        self.course_start_month = month;
        self
    }

    /// Course in progress today
    pub fn current_course(&self) -> i32 {
        current_course_now(self.course_start_month)
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/categories", get(api::list_categories))
        .route("/api/universities", get(api::list_universities))
        .route("/api/universities/:code", get(api::get_university))
        .route("/api/universities/:code/fees", get(api::get_university_fees))
        .route("/api/provinces/:province", get(api::list_province_universities))
        .route("/api/average", get(api::get_averages));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
