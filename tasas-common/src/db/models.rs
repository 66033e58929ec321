//! Database models and their validation

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::category::{DegreeLevel, FeeType, UniversityCategory};
use crate::validation::{check_amount, check_optional, check_required, check_url, ValidationError};
use crate::{Error, Result};

const SHORT_CODE_MAX: usize = 20;
const NAME_MAX: usize = 200;
const PROVINCE_MAX: usize = 100;
const URL_MAX: usize = 200;

/// Stored university
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct University {
    pub id: i64,
    pub short_code: String,
    pub name: String,
    pub category: UniversityCategory,
    pub center: Option<String>,
    pub campus: Option<String>,
    pub province: String,
    pub url: Option<String>,
    /// Logo path relative to the media folder
    pub logo: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl University {
    pub(crate) fn from_row(row: &SqliteRow) -> Result<Self> {
        let code: i64 = row.try_get("category")?;
        let category = UniversityCategory::from_code(code)
            .ok_or_else(|| Error::Internal(format!("Unknown category code {} in database", code)))?;

        Ok(Self {
            id: row.try_get("id")?,
            short_code: row.try_get("short_code")?,
            name: row.try_get("name")?,
            category,
            center: row.try_get("center")?,
            campus: row.try_get("campus")?,
            province: row.try_get("province")?,
            url: row.try_get("url")?,
            logo: row.try_get("logo")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// University assembled from an import record, not yet validated
#[derive(Debug, Clone, PartialEq)]
pub struct UniversityDraft {
    pub short_code: Option<String>,
    pub name: Option<String>,
    pub category: UniversityCategory,
    pub center: Option<String>,
    pub campus: Option<String>,
    pub province: Option<String>,
    pub url: Option<String>,
}

/// University that passed validation and can be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewUniversity {
    pub short_code: String,
    pub name: String,
    pub category: UniversityCategory,
    pub center: Option<String>,
    pub campus: Option<String>,
    pub province: String,
    pub url: Option<String>,
    /// `None` keeps whatever logo an existing row already has
    pub logo: Option<String>,
}

impl UniversityDraft {
    /// Field-level validation; every failing field is reported
    pub fn validate(self) -> std::result::Result<NewUniversity, ValidationError> {
        let mut errors = ValidationError::new();

        check_required(&mut errors, "short_code", self.short_code.as_deref(), SHORT_CODE_MAX);
        check_required(&mut errors, "name", self.name.as_deref(), NAME_MAX);
        check_required(&mut errors, "province", self.province.as_deref(), PROVINCE_MAX);
        check_optional(&mut errors, "center", self.center.as_deref(), NAME_MAX);
        check_optional(&mut errors, "campus", self.campus.as_deref(), NAME_MAX);
        check_optional(&mut errors, "url", self.url.as_deref(), URL_MAX);
        check_url(&mut errors, "url", self.url.as_deref());

        errors.into_result()?;

        match (self.short_code, self.name, self.province) {
            (Some(short_code), Some(name), Some(province)) => Ok(NewUniversity {
                short_code,
                name,
                category: self.category,
                center: self.center,
                campus: self.campus,
                province,
                url: self.url,
                logo: None,
            }),
            // check_required already rejected any missing field
            _ => Err(ValidationError::single("short_code", "This field is required")),
        }
    }
}

/// Whether `code` could name a stored university: non-blank, no whitespace,
/// at most the stored column width
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty()
        && code.chars().count() <= SHORT_CODE_MAX
        && !code.chars().any(|c| c.is_whitespace() || c.is_control())
}

/// Stored fee record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fee {
    pub id: i64,
    pub university_id: i64,
    pub academic_year: i32,
    pub fee_type: FeeType,
    pub degree_level: DegreeLevel,
    pub tiers: [f64; 4],
    pub source_url: Option<String>,
}

impl Fee {
    pub(crate) fn from_row(row: &SqliteRow) -> Result<Self> {
        let fee_type: String = row.try_get("fee_type")?;
        let degree_level: String = row.try_get("degree_level")?;

        Ok(Self {
            id: row.try_get("id")?,
            university_id: row.try_get("university_id")?,
            academic_year: row.try_get("academic_year")?,
            fee_type: FeeType::parse(&fee_type)
                .ok_or_else(|| Error::Internal(format!("Unknown fee type '{}'", fee_type)))?,
            degree_level: DegreeLevel::parse(&degree_level).ok_or_else(|| {
                Error::Internal(format!("Unknown degree level '{}'", degree_level))
            })?,
            tiers: [
                row.try_get("tier1")?,
                row.try_get("tier2")?,
                row.try_get("tier3")?,
                row.try_get("tier4")?,
            ],
            source_url: row.try_get("source_url")?,
        })
    }
}

/// Fee record for one university and year, not yet validated
#[derive(Debug, Clone, PartialEq)]
pub struct FeeDraft {
    pub academic_year: i32,
    pub fee_type: FeeType,
    pub degree_level: DegreeLevel,
    /// Amounts for first, second, third and fourth enrolment
    pub tiers: [f64; 4],
    pub source_url: Option<String>,
}

const TIER_FIELDS: [&str; 4] = ["tier1", "tier2", "tier3", "tier4"];

impl FeeDraft {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut errors = ValidationError::new();

        if !(1900..=2100).contains(&self.academic_year) {
            errors.push(
                "academic_year",
                format!("{} is not a valid academic year", self.academic_year),
            );
        }
        for (field, amount) in TIER_FIELDS.into_iter().zip(self.tiers) {
            check_amount(&mut errors, field, amount);
        }
        check_optional(&mut errors, "source_url", self.source_url.as_deref(), URL_MAX);
        check_url(&mut errors, "source_url", self.source_url.as_deref());

        errors.into_result()
    }
}

/// Round an amount to cents for storage
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Average fee amounts for one academic year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyAverage {
    pub academic_year: i32,
    pub universities: i64,
    pub tiers: [f64; 4],
}
