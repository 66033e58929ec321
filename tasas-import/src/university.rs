//! University upsert: find-or-create by short code

use serde_json::{Map, Value};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use tasas_common::db::{find_by_short_code, insert_university, update_university, University, UniversityDraft};
use tasas_common::{UniversityCategory, ValidationError};

use crate::logo::{attach_logo, resolve_logo};
use crate::normalize::text_field;
use crate::{ImportOptions, Result};

/// What happened to one university record
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    /// Already stored and overwrite is off; fees are not processed either
    Skipped,
    /// Row inserted (`created`) or overwritten in place
    Saved {
        university: University,
        created: bool,
        logo_attached: bool,
    },
}

/// Find-or-create the university described by `record`
///
/// Returns `ImportError::Validation` for an unknown category or invalid
/// fields; the caller treats that as a skipped record.
pub async fn upsert_university(
    pool: &SqlitePool,
    record: &Map<String, Value>,
    options: &ImportOptions,
) -> Result<UpsertOutcome> {
    let short_code = text_field(record, "siglas");

    let existing = match short_code.as_deref() {
        Some(code) => find_by_short_code(pool, code).await?,
        None => None,
    };

    if existing.is_some() && !options.overwrite {
        debug!("University '{}' already imported, skipping", short_code.as_deref().unwrap_or(""));
        return Ok(UpsertOutcome::Skipped);
    }

    let name = text_field(record, "nombre");
    let category = resolve_category(record.get("tipo"), name.as_deref())?;

    let draft = UniversityDraft {
        short_code: short_code.clone(),
        name,
        category,
        center: text_field(record, "centro"),
        campus: text_field(record, "campus"),
        province: text_field(record, "provincia"),
        url: text_field(record, "url"),
    };

    let logo_source = resolve_logo(short_code.as_deref(), &options.logo_dir);

    let mut university = draft.validate()?;

    let mut logo_attached = false;
    if let Some(source) = logo_source {
        match attach_logo(&source, &options.media_dir).await {
            Ok(stored) => {
                university.logo = Some(stored);
                logo_attached = true;
            }
            Err(e) => warn!("Error opening logo {}: {}", source.display(), e),
        }
    }

    let (saved, created) = match existing {
        Some(current) => (update_university(pool, current.id, &university).await?, false),
        None => (insert_university(pool, &university).await?, true),
    };

    info!(
        "{} university '{}' ({})",
        if created { "Created" } else { "Updated" },
        saved.short_code,
        saved.name
    );

    Ok(UpsertOutcome::Saved {
        university: saved,
        created,
        logo_attached,
    })
}

/// Map the dataset label (`tipo`) to a category
fn resolve_category(
    label: Option<&Value>,
    name: Option<&str>,
) -> std::result::Result<UniversityCategory, ValidationError> {
    let label = match label {
        Some(Value::String(s)) => s.as_str(),
        Some(Value::Null) | None => "",
        Some(other) => return Err(invalid_category(&other.to_string(), name)),
    };

    UniversityCategory::from_label(label).ok_or_else(|| invalid_category(label, name))
}

fn invalid_category(label: &str, name: Option<&str>) -> ValidationError {
    ValidationError::single(
        "category",
        format!(
            "University category '{}' not valid for {}. Skipping.",
            label,
            name.unwrap_or("<unnamed>")
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_category() {
        assert_eq!(
            resolve_category(Some(&json!("Privada")), Some("X")),
            Ok(UniversityCategory::Private)
        );

        let err = resolve_category(Some(&json!("Concertada")), Some("Universidad X")).unwrap_err();
        assert!(err.has_field("category"));
        assert!(err.to_string().contains("'Concertada'"));
        assert!(err.to_string().contains("Universidad X"));

        assert!(resolve_category(None, None).is_err());
        assert!(resolve_category(Some(&json!(1)), None).is_err());
    }
}
