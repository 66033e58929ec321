//! Batch driver: runs the upsert pipeline over every record of a document

use serde_json::Value;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{info, warn};

use crate::fees::{upsert_fees, FeeReport};
use crate::normalize::display_code;
use crate::university::{upsert_university, UpsertOutcome};
use crate::{ImportError, ImportOptions, Result};

/// Totals for one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub universities_created: usize,
    pub universities_updated: usize,
    pub universities_skipped: usize,
    pub universities_rejected: usize,
    pub logos_attached: usize,
    pub fees_created: usize,
    pub fee_years_missing: usize,
    pub fee_years_invalid: usize,
}

impl ImportSummary {
    fn add_fees(&mut self, report: FeeReport) {
        self.fees_created += report.created;
        self.fee_years_missing += report.missing;
        self.fee_years_invalid += report.invalid;
    }

    pub fn log(&self) {
        info!(
            "Import finished: {} created, {} updated, {} skipped, {} rejected universities; \
             {} logos attached; {} fee rows created ({} years without data, {} invalid)",
            self.universities_created,
            self.universities_updated,
            self.universities_skipped,
            self.universities_rejected,
            self.logos_attached,
            self.fees_created,
            self.fee_years_missing,
            self.fee_years_invalid
        );
    }
}

/// Read `path` and import it
pub async fn import_file(
    pool: &SqlitePool,
    path: &Path,
    options: &ImportOptions,
) -> Result<ImportSummary> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ImportError::InputNotFound {
            path: path.to_path_buf(),
            source,
        })?;

    let document: Value = serde_json::from_str(&content)?;
    run(pool, &document, options).await
}

/// Import every university of `document`
///
/// The document must hold a `unis` array; anything else fails before a
/// single row is written. Record-level validation failures are logged and
/// skipped.
pub async fn run(pool: &SqlitePool, document: &Value, options: &ImportOptions) -> Result<ImportSummary> {
    let unis = document
        .get("unis")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ImportError::MalformedDocument("expected a top-level \"unis\" array".to_string())
        })?;

    info!(
        "Importing {} universities (years {}-{}, overwrite: {})",
        unis.len(),
        options.window.first,
        options.window.last,
        options.overwrite
    );

    let mut summary = ImportSummary::default();

    for (index, entry) in unis.iter().enumerate() {
        let Some(record) = entry.as_object() else {
            warn!("Entry #{} is not an object, skipping", index);
            summary.universities_rejected += 1;
            continue;
        };

        match upsert_university(pool, record, options).await {
            Ok(UpsertOutcome::Skipped) => summary.universities_skipped += 1,
            Ok(UpsertOutcome::Saved {
                university,
                created,
                logo_attached,
            }) => {
                if created {
                    summary.universities_created += 1;
                } else {
                    summary.universities_updated += 1;
                }
                if logo_attached {
                    summary.logos_attached += 1;
                }

                let report = upsert_fees(pool, record, &university, options.window).await;
                summary.add_fees(report);
            }
            Err(ImportError::Validation(e)) => {
                warn!("Error in key: {}: {}", display_code(record), e);
                summary.universities_rejected += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}
