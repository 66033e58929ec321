//! Fixed enumerations: university category, fee type, degree level
//!
//! Each enum is a static bidirectional mapping between an internal code and
//! the human-readable label used by the source dataset. Label lookups scan
//! the declaration order; the first exact (case-sensitive) match wins.

use serde::{Deserialize, Serialize};

/// Kind of institution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniversityCategory {
    Public,
    Private,
    Distance,
}

impl UniversityCategory {
    /// Declaration order, used for label lookup
    pub const ALL: [UniversityCategory; 3] = [
        UniversityCategory::Public,
        UniversityCategory::Private,
        UniversityCategory::Distance,
    ];

    /// Code stored in the `universities.category` column
    pub fn code(self) -> i64 {
        match self {
            UniversityCategory::Public => 1,
            UniversityCategory::Private => 2,
            UniversityCategory::Distance => 3,
        }
    }

    /// Label used by the source dataset (`tipo`)
    pub fn label(self) -> &'static str {
        match self {
            UniversityCategory::Public => "Pública",
            UniversityCategory::Private => "Privada",
            UniversityCategory::Distance => "A distancia",
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Map a dataset label back to its category
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

/// How a fee amount is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    PricePerCredit,
    FlatRate,
}

impl FeeType {
    pub const ALL: [FeeType; 2] = [FeeType::PricePerCredit, FeeType::FlatRate];

    /// Value stored in `fees.fee_type`
    pub fn as_str(self) -> &'static str {
        match self {
            FeeType::PricePerCredit => "price_per_credit",
            FeeType::FlatRate => "flat_rate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FeeType::PricePerCredit => "Precio por crédito",
            FeeType::FlatRate => "Precio por curso",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// Degree level a fee applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeLevel {
    Undergraduate,
    Postgraduate,
}

impl DegreeLevel {
    pub const ALL: [DegreeLevel; 2] = [DegreeLevel::Undergraduate, DegreeLevel::Postgraduate];

    /// Value stored in `fees.degree_level`
    pub fn as_str(self) -> &'static str {
        match self {
            DegreeLevel::Undergraduate => "undergraduate",
            DegreeLevel::Postgraduate => "postgraduate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DegreeLevel::Undergraduate => "Grado",
            DegreeLevel::Postgraduate => "Máster",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_roundtrip() {
        for category in UniversityCategory::ALL {
            assert_eq!(UniversityCategory::from_label(category.label()), Some(category));
            assert_eq!(UniversityCategory::from_code(category.code()), Some(category));
        }
    }

    #[test]
    fn test_category_label_is_case_sensitive() {
        assert_eq!(UniversityCategory::from_label("Pública"), Some(UniversityCategory::Public));
        assert_eq!(UniversityCategory::from_label("pública"), None);
        assert_eq!(UniversityCategory::from_label("Publica"), None);
        assert_eq!(UniversityCategory::from_label(" Privada"), None);
        assert_eq!(UniversityCategory::from_label(""), None);
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(UniversityCategory::from_code(0), None);
        assert_eq!(UniversityCategory::from_code(99), None);
    }

    #[test]
    fn test_fee_enums_parse_stored_values() {
        assert_eq!(FeeType::parse("price_per_credit"), Some(FeeType::PricePerCredit));
        assert_eq!(FeeType::parse("Precio por crédito"), None);
        assert_eq!(DegreeLevel::parse("undergraduate"), Some(DegreeLevel::Undergraduate));
        assert_eq!(DegreeLevel::parse("master"), None);
    }
}
