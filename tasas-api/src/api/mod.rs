//! HTTP API handlers for tasas-api

pub mod average;
pub mod categories;
pub mod error;
pub mod health;
pub mod universities;

pub use average::get_averages;
pub use categories::list_categories;
pub use error::ApiError;
pub use health::health_routes;
pub use universities::{
    get_university, get_university_fees, list_province_universities, list_universities,
};
