//! # Tasas Common Library
//!
//! Shared code for the tasas import command and API server:
//! - Error and result types
//! - Bootstrap configuration and root folder resolution
//! - University category / fee type enumerations
//! - Per-entity validation
//! - Academic year window
//! - Database initialization and queries

pub mod academic_year;
pub mod category;
pub mod config;
pub mod db;
pub mod error;
pub mod validation;

pub use academic_year::{current_course, current_course_now, YearWindow};
pub use category::{DegreeLevel, FeeType, UniversityCategory};
pub use error::{Error, Result};
pub use validation::{FieldError, ValidationError};
